use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can stop a render call.
///
/// `Validation` and `UnsupportedChartType` are client problems (bad input) and carry the
/// message shown to the caller. `Draw` and `Encode` are backend failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    UnsupportedChartType(String),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("image encoding failed: {0}")]
    Encode(String),
}

impl RenderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        RenderError::Validation(msg.into())
    }

    /// HTTP-equivalent status for the transport layer.
    pub fn status_code(&self) -> u16 {
        match self {
            RenderError::Validation(_) | RenderError::UnsupportedChartType(_) => 400,
            RenderError::Draw(_) | RenderError::Encode(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Error body in the `{"detail": "..."}` shape callers expect.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
        }
    }
}

impl From<anyhow::Error> for RenderError {
    fn from(e: anyhow::Error) -> Self {
        RenderError::Draw(format!("{e:#}"))
    }
}

/// JSON error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
