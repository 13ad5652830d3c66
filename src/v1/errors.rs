/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::fmt;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum InstagramError {
    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authorization error. {0}")]
    Auth(String),

    #[error("API Response was error: {0}")]
    ApiResponse(ApiError),

    #[error("Unable to parse response, not valid JSON (status {status}): {source}")]
    ApiResponseMalformed {
        status: u16,
        source: serde_json::Error,
    },

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("An access token is already set on this client")]
    AccessTokenAlreadySet(),
}

impl InstagramError {
    /// True when the call failed because of missing or rejected credentials,
    /// whether detected locally or reported by the API.
    pub fn is_authorization(&self) -> bool {
        match self {
            InstagramError::Auth(_) => true,
            InstagramError::ApiResponse(err) => err.is_authorization(),
            _ => false,
        }
    }

    /// The structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            InstagramError::ApiResponse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for InstagramError {
    fn from(err: ApiError) -> Self {
        InstagramError::ApiResponse(err)
    }
}

/// A failure reported by the API itself, carried verbatim from the response meta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: u16,
    pub error_type: String,
    pub error_message: String,
}

impl ApiError {
    pub fn new(code: u16, error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            code,
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }

    pub(crate) fn rate_limited(code: u16) -> Self {
        Self::new(
            code,
            "Rate limited",
            "Your client is making too many request per second",
        )
    }

    /// OAuth failures come back as 400s with an `OAuth*` error type, so the
    /// status alone is not enough.
    pub fn is_authorization(&self) -> bool {
        matches!(self.code, 401 | 403) || self.error_type.starts_with("OAuth")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}-{}", self.code, self.error_type, self.error_message)
    }
}
