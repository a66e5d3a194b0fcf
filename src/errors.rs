use thiserror::Error;

/// Failures while loading or checking [`Settings`](crate::config::Settings).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid length range for {field}: min={min}, max={max}")]
    InvalidRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;
