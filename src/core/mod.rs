//! Core logic for navigation and backend access.
//!
//! This module provides:
//! - [`Router`] route transitions with [`NavigationGuard`] hooks
//! - [`ApiClient`] HTTP client with request/response interceptors
//! - [`Api`] typed backend endpoints

pub mod api;
pub mod error;
pub mod http;
pub mod navigation;

pub use api::Api;
pub use http::{ApiClient, BrowserTransport, HttpRequest, Transport};
pub use navigation::{AllowAll, GuardDecision, NavigationGuard, Router};
