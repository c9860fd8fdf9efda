//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`RouteTableError`] - Invalid route table definitions
//! - [`NavigationError`] - Rejected or aborted route transitions
//! - [`HttpError`] - Transport and decoding errors for HTTP requests
//! - [`ApiError`] - Backend envelope errors on top of [`HttpError`]
//! - [`StartupError`] - Application wiring failures

use thiserror::Error;

/// Route table validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    /// Two siblings share the same path pattern.
    #[error("duplicate route path '{0}' among siblings")]
    DuplicatePath(String),
    /// A catch-all entry is followed by other siblings it would shadow.
    #[error("catch-all route must be the last sibling")]
    CatchAllNotLast,
    /// A top-level entry has an empty path.
    ///
    /// Nested entries may use `""` for a default child.
    #[error("route '{0}' has an empty path")]
    EmptyPath(String),
}

/// Errors produced by a route transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Target resolves to the route that is already active.
    #[error("avoided redundant navigation to current location: {0}")]
    Duplicated(String),
    /// A navigation guard cancelled the transition.
    #[error("navigation aborted from {from} to {to}")]
    Aborted { from: String, to: String },
    /// Redirects did not settle on a final route.
    #[error("too many redirects while navigating to {0}")]
    RedirectLoop(String),
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Request could not be built (bad URL, header, body)
    #[error("failed to create request: {0}")]
    RequestCreation(String),
    /// Network request failed (CORS, connection refused, ...)
    #[error("network error: {0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("HTTP error {status}")]
    Status { status: u16, body: String },
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(String),
}

/// Errors returned by the typed backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Backend envelope carried a failure code.
    #[error("request rejected ({code}): {msg}")]
    Rejected { code: String, msg: String },
    /// Success envelope without a `data` field.
    #[error("response carried no data")]
    MissingData,
    /// Input refused before sending.
    #[error("invalid input: {0}")]
    Invalid(String),
}

/// Errors raised while wiring the application at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupError {
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),
    #[error("cannot resolve initial location: {0}")]
    Navigation(#[from] NavigationError),
}
