//! Application router components.
//!
//! Handles URL-based routing in history mode. Uses native `popstate` events
//! and the History API instead of leptos_router, so route resolution stays
//! in [`Router`](litgraph_web::core::Router).
//!
//! # Architecture
//!
//! - **Router state is the source of truth**: `AppContext::route` mirrors it
//! - **Nested rendering**: each [`RouterView`] renders the matched entry at
//!   its depth; layouts place another `RouterView` one level deeper
//! - **popstate events**: browser back/forward buttons re-sync the router

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::components::views;

// ============================================================================
// Main Router
// ============================================================================

/// Main application router.
///
/// Listens for `popstate` and renders the top-level matched view.
#[component]
pub fn AppRouter() -> impl IntoView {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let ctx = use_context::<AppContext>().expect("AppContext must be provided");
        let closure = Closure::wrap(Box::new(move || {
            ctx.sync_with_location();
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    view! { <RouterView /> }
}

// ============================================================================
// RouterView
// ============================================================================

/// Renders the view matched at nesting level `depth`.
///
/// The view is only rebuilt when the entry at this depth changes, so a
/// layout survives navigation between its children.
#[component]
pub fn RouterView(#[prop(default = 0)] depth: usize) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let view_id = Memo::new(move |_| ctx.route.with(|r| r.view_at(depth)));

    move || view_id.get().map(|id| views::factory(id)(depth))
}

// ============================================================================
// RouterLink
// ============================================================================

/// In-app link that navigates without reloading the page.
///
/// Modified clicks (ctrl/meta/shift, middle button) fall back to the
/// browser so links can still open in a new tab.
#[component]
pub fn RouterLink(
    /// Route path (without base path).
    #[prop(into)]
    to: String,
    /// Class applied to the anchor.
    #[prop(optional)]
    class: &'static str,
    /// Extra class applied while `to` is the current route.
    #[prop(optional)]
    active_class: &'static str,
    children: Children,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let href = ctx.href(&to);

    let target = to.clone();
    let is_active = Memo::new(move |_| ctx.route.with(|r| r.path == to));
    let classes = move || {
        if is_active.get() && !active_class.is_empty() {
            format!("{class} {active_class}")
        } else {
            class.to_string()
        }
    };

    let on_click = move |ev: leptos::ev::MouseEvent| {
        if ev.button() != 0 || ev.ctrl_key() || ev.meta_key() || ev.shift_key() {
            return;
        }
        ev.prevent_default();
        ctx.navigate(&target);
    };

    view! {
        <a href=href class=classes on:click=on_click>
            {children()}
        </a>
    }
}
