//! Browser utility functions.
//!
//! - [`dom`] - Window, History API, and document access

pub mod dom;
