use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the digest pipeline.
///
/// Validation and configuration problems stop the run before any network
/// call. Inference errors carry the underlying cause when one exists.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{message}")]
    Inference {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn inference(message: impl Into<String>) -> Self {
        AppError::Inference {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a lower-level failure. The cause stays reachable through
    /// `source()`, so `{:#}` formatting prints `context: cause`.
    pub fn inference_from<E>(context: impl Into<String>, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        AppError::Inference {
            message: context.into(),
            source: Some(cause.into()),
        }
    }
}
