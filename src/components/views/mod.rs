//! Route views and the registry that instantiates them.
//!
//! Route entries only name a [`ViewId`]; [`factory`] maps it to the function
//! that builds the component, which runs only when the route is rendered.

mod front;
mod pages;

use leptos::prelude::*;
use litgraph_web::models::ViewId;

pub use front::Front;
pub use pages::{
    ArticleDetail, Graph, GraphPersonalization, Home, NotFound, ProcessingStatus, Settings, Upload,
};

stylance::import_crate_style!(css, "src/components/views/views.module.css");

/// Builds a view; the argument is the nesting depth it is rendered at.
pub type ViewFactory = fn(usize) -> AnyView;

/// Registry lookup for `id`.
pub fn factory(id: ViewId) -> ViewFactory {
    match id {
        ViewId::Front => |depth| view! { <Front depth=depth /> }.into_any(),
        ViewId::Home => |_| view! { <Home /> }.into_any(),
        ViewId::ArticleDetail => |_| view! { <ArticleDetail /> }.into_any(),
        ViewId::Upload => |_| view! { <Upload /> }.into_any(),
        ViewId::ProcessingStatus => |_| view! { <ProcessingStatus /> }.into_any(),
        ViewId::Graph => |_| view! { <Graph /> }.into_any(),
        ViewId::GraphPersonalization => |_| view! { <GraphPersonalization /> }.into_any(),
        ViewId::Settings => |_| view! { <Settings /> }.into_any(),
        ViewId::NotFound => |_| view! { <NotFound /> }.into_any(),
    }
}
