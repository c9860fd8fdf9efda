//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Deployment-specific values are read from the build environment with
//! `option_env!`, so they are fixed at compile time.

use std::time::Duration;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the navigation bar.
pub const APP_NAME: &str = "Literature Manager";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Network Configuration
// =============================================================================

/// Backend API base URL (e.g. `http://localhost:9090`).
///
/// Override at build time with `LITGRAPH_API_BASE_URL`.
pub const API_BASE_URL: &str = match option_env!("LITGRAPH_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:9090",
};

/// Request timeout in milliseconds.
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Content type forced onto every outgoing request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Envelope code the backend uses for successful responses.
pub const API_SUCCESS_CODE: &str = "200";

/// Rows per page of an article search.
pub const SEARCH_PAGE_SIZE: u32 = 10;

// =============================================================================
// Routing Configuration
// =============================================================================

/// Base path the application is served under (history mode).
///
/// Override at build time with `LITGRAPH_BASE_PATH`.
pub const ROUTER_BASE_PATH: &str = match option_env!("LITGRAPH_BASE_PATH") {
    Some(base) => base,
    None => "/",
};

/// Upper bound on redirects followed while resolving a single navigation.
pub const MAX_REDIRECTS: usize = 8;

// =============================================================================
// HTTP Client Configuration
// =============================================================================

/// Settings shared by every request an [`ApiClient`](crate::core::ApiClient) sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined with relative request paths.
    pub base_url: String,
    /// Transport-level timeout.
    pub timeout: Duration,
    /// Headers applied to every request before interceptors run.
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Build the configuration from compile-time environment values.
    pub fn from_env() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::from_millis(u64::from(REQUEST_TIMEOUT_MS)),
            headers: vec![("Accept".to_string(), "application/json, text/plain, */*".to_string())],
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
