//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`RouteEntry`], [`RouteTable`], [`RouteMatch`] - History-mode routing
//! - [`ProcessingStatus`], [`ArticleInfo`], [`CustomConcept`] - Backend payloads

mod article;
mod route;

pub use article::{
    ApiEnvelope, ArticleInfo, ArticleSummary, CustomConcept, MAX_CONCEPT_SLOTS,
    MAX_CONCEPTS_PER_SLOT, PageInfo, ProcessingStatus, TaskStatus,
};
pub use route::{CATCH_ALL, CATCH_ALL_PARAM, ROUTES, RouteEntry, RouteMatch, RouteTable, ViewId};
