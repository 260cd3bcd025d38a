use thiserror::Error;

/// Configuration errors for the motion pipeline. These are raised when a
/// map, spring or track is built, never while a frame is being evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("degenerate input range [{min}, {max}]")]
    DegenerateRange { min: f64, max: f64 },

    #[error("non-finite output range [{min}, {max}]")]
    InvalidOutputRange { min: f64, max: f64 },

    #[error("invalid spring parameter `{field}`: {value}")]
    InvalidSpring { field: &'static str, value: f64 },

    #[error("invalid animation track: {0}")]
    InvalidTrack(&'static str),
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("site content could not be parsed: {0}")]
    Content(#[from] serde_json::Error),

    #[error(transparent)]
    Motion(#[from] MotionError),
}
