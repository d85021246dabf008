//! Setup-time errors.
//!
//! Tracing itself never fails; these only come out of building a frame
//! buffer or validating a `RenderConfig`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid frame buffer dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Target frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f32),

    #[error("Field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Fog far distance ({far}) must be greater than fog near distance ({near})")]
    InvalidFogRange { near: f32, far: f32 },

    #[error("Light direction must be a finite non-zero vector")]
    InvalidLightDirection,

    #[error("Parameter `{name}` must be non-negative and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
