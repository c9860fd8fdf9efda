//! Routing and backend access for the literature manager front end.
//!
//! - [`models`] - Route table and backend payload types
//! - [`core`] - Router, HTTP client with interceptors, typed endpoints
//! - [`config`] - Build-time configuration

pub mod config;
pub mod core;
pub mod models;
