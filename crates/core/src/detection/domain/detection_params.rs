use std::fmt;

use thiserror::Error;

pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: u32 = 5;

/// Slider ranges exposed by the desktop controls. The scale factor slider
/// is in hundredths.
pub const SCALE_SLIDER_RANGE: (u32, u32) = (110, 150);
pub const NEIGHBORS_SLIDER_RANGE: (u32, u32) = (1, 10);

#[derive(Debug, Error, PartialEq)]
pub enum InvalidParams {
    #[error("scale factor must be greater than 1.0, got {0}")]
    ScaleFactor(f64),
    #[error("minimum neighbors must be at least 1, got {0}")]
    MinNeighbors(u32),
}

/// Tunables for the multi-scale cascade search, passed explicitly into
/// every detection call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    scale_factor: f64,
    min_neighbors: u32,
}

impl DetectionParams {
    pub fn new(scale_factor: f64, min_neighbors: u32) -> Result<Self, InvalidParams> {
        if !scale_factor.is_finite() || scale_factor <= 1.0 {
            return Err(InvalidParams::ScaleFactor(scale_factor));
        }
        if min_neighbors < 1 {
            return Err(InvalidParams::MinNeighbors(min_neighbors));
        }
        Ok(Self {
            scale_factor,
            min_neighbors,
        })
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn min_neighbors(&self) -> u32 {
        self.min_neighbors
    }

    /// Scale factor as the hundredths value shown on the slider.
    pub fn scale_slider_value(&self) -> u32 {
        (self.scale_factor * 100.0).round() as u32
    }

    /// Applies a scale slider position, clamped to the slider range.
    pub fn with_scale_slider(self, value: u32) -> Self {
        let value = value.clamp(SCALE_SLIDER_RANGE.0, SCALE_SLIDER_RANGE.1);
        Self {
            scale_factor: value as f64 / 100.0,
            ..self
        }
    }

    /// Applies a neighbors slider position, clamped to the slider range.
    pub fn with_neighbors_slider(self, value: u32) -> Self {
        Self {
            min_neighbors: value.clamp(NEIGHBORS_SLIDER_RANGE.0, NEIGHBORS_SLIDER_RANGE.1),
            ..self
        }
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
        }
    }
}

impl fmt::Display for DetectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale Factor: {}, Min Neighbors: {}",
            self.scale_factor, self.min_neighbors
        )
    }
}
