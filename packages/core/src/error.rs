use thiserror::Error;

/// Errors raised while building a conversion pipeline.
///
/// Conversion itself never fails: every problem is surfaced when the
/// configuration is constructed.
#[derive(Error, Debug)]
pub enum PxUnitError {
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfiguration { field: &'static str, message: String },

    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl PxUnitError {
    pub fn invalid_configuration(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

pub type PxUnitResult<T> = Result<T, PxUnitError>;
