use thiserror::Error;

/// Reasons a launch dataset cannot be loaded.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("{format} input is missing required column '{column}'")]
    MissingColumn { format: &'static str, column: String },

    #[error("row {row}: column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        row: usize,
        column: String,
        found: String,
        expected: &'static str,
    },

    #[error("row {row}: 'class' must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: i64 },

    #[error("row {row}: payload mass {value} is not a finite number")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: String },

    #[error("dataset contains no launches")]
    Empty,
}

/// Reasons a configuration file is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("slider min {min} is greater than max {max}")]
    SliderBounds { min: f64, max: f64 },

    #[error("slider step must be positive, got {0}")]
    SliderStep(f64),
}
