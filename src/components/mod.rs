//! UI components built with Leptos.
//!
//! - [`router`] - History-mode routing (main entry point)
//! - [`views`] - Route views and their registry
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod icons;
pub mod router;
pub mod views;

pub use router::AppRouter;
