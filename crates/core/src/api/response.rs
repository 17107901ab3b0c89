//! Response envelope shared by the auth and task services

use serde::Deserialize;

use crate::{Error, Result};

/// A single validation failure, as returned by `POST /auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationError {
    pub msg: String,
}

/// Envelope every endpoint wraps its payload in
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

impl<T> ApiResponse<T> {
    /// Human-readable failure message: `message`, else the first validation
    /// error, else a generic fallback.
    pub fn error_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.errors.first().map(|e| e.msg.clone()))
            .unwrap_or_else(|| "unknown error".to_string())
    }

    /// Unwrap the envelope into its payload, or an API error carrying the
    /// extracted message.
    pub fn into_result(self) -> Result<T> {
        if self.success {
            if let Some(data) = self.data {
                return Ok(data);
            }
        }
        Err(Error::Api(self.error_message()))
    }
}
