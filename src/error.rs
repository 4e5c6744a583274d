use thiserror::Error;

/// Errors raised by the viewport, the live feed and configuration loading.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The world bounds enclose no area.
    #[error("degenerate world bounds: x=[{min_x}, {max_x}], y=[{min_y}, {max_y}]")]
    DegenerateBounds {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },
    /// The canvas has no drawable area.
    #[error("canvas has no drawable area ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
    /// A zoom factor that is not finite and strictly positive.
    #[error("invalid zoom factor {0}")]
    InvalidZoom(f64),
    /// The scale would leave the strictly positive range.
    #[error("scale must stay finite and positive, got {0}")]
    NonPositiveScale(f64),
    /// A configuration value outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A feed message that could not be decoded.
    #[error("failed to decode feed message: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;
