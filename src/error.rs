//! Standard errors used by all functions in the crate.

use crate::response::ResponseEnvelope;
use std::fmt;

/// Error collecting all possible failures of the Iamport client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// The token exchange failed or the API answered `401 Unauthorized`.
    ///
    /// Carries the message returned by Iamport, if any.
    #[error("Iamport authentication failed: {}", .0.as_deref().unwrap_or("no message"))]
    Unauthorized(Option<String>),
    /// Iamport answered with an unsuccessful envelope.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// A required argument was missing or arguments were combined incorrectly.
    ///
    /// Always raised before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Iamport HTTP APIs error.
///
/// Holds the full [`ResponseEnvelope`](crate::response::ResponseEnvelope) so callers can
/// inspect the vendor code and message.
#[derive(thiserror::Error, Debug, Clone)]
pub struct ApiError {
    pub response: ResponseEnvelope,
}

impl ApiError {
    /// HTTP status returned by the server.
    pub fn status(&self) -> u16 {
        self.response.status()
    }

    /// Iamport result code, if the body carried one.
    pub fn code(&self) -> Option<i64> {
        self.response.code()
    }

    /// Human readable message returned by Iamport.
    pub fn message(&self) -> Option<&str> {
        self.response.message()
    }
}

impl From<ResponseEnvelope> for ApiError {
    fn from(response: ResponseEnvelope) -> Self {
        Self { response }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iamport API error (status={}", self.status())?;

        if let Some(code) = self.code() {
            write!(f, ", code={}", code)?;
        }

        if let Some(message) = self.message() {
            write!(f, ", message={}", message)?;
        }

        write!(f, ")")
    }
}
