//! Configuration errors
//!
//! The simulation itself never fails; everything that can go wrong is caught
//! when a [`SimConfig`](crate::settings::SimConfig) is loaded or validated.

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed into a config
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `[min, max]` range with `min > max`
    #[error("Invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// NaN or infinite value
    #[error("Non-finite value for {field}")]
    NonFinite { field: &'static str },

    /// Value that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Value outside its allowed bounds
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Choice list with nothing to pick from
    #[error("{field} must not be empty")]
    EmptyChoice { field: &'static str },

    /// Unknown preset name
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),
}
