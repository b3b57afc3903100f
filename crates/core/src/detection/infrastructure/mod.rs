pub mod cascade_plate_detector;
