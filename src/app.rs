//! Root application module.
//!
//! Contains the main App component, the AppContext definition, and
//! application-level setup logic following Leptos conventions.

use leptos::logging::warn;
use leptos::prelude::*;
use litgraph_web::config::{APP_NAME, ROUTER_BASE_PATH};
use litgraph_web::core::error::StartupError;
use litgraph_web::core::{AllowAll, Api, ApiClient, Router};
use litgraph_web::models::{RouteMatch, RouteTable};

use crate::components::AppRouter;
use crate::utils::dom;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Architecture
///
/// The router and the API client are built once in [`App`] and injected
/// here; nothing reaches for a module-level instance.
/// - **Route**: signal mirroring the router's current match
/// - **Router**: navigation state, guard, and base path
/// - **Api**: backend endpoints over the configured HTTP client
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Currently rendered route.
    pub route: RwSignal<RouteMatch>,
    router: StoredValue<Router>,
    api: StoredValue<Api>,
}

impl AppContext {
    pub fn new(router: Router, api: Api) -> Self {
        Self {
            route: RwSignal::new(router.current().clone()),
            router: StoredValue::new(router),
            api: StoredValue::new(api),
        }
    }

    /// Build the context from the browser location and compile-time config.
    ///
    /// When the initial location redirects (e.g. `/`), the address bar is
    /// rewritten to the resolved route without adding a history entry.
    pub fn from_browser() -> Result<Self, StartupError> {
        let location = dom::location_path();
        let router = Router::new(RouteTable::app()?, AllowAll, ROUTER_BASE_PATH, &location)?;

        let resolved = router.href(&router.current().full_path());
        if resolved != location {
            dom::replace_state(&resolved);
        }

        Ok(Self::new(router, Api::new(ApiClient::browser())))
    }

    /// Backend endpoints (cheap clone of the shared client).
    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    /// Browser URL for a route path.
    pub fn href(&self, path: &str) -> String {
        self.router.with_value(|r| r.href(path))
    }

    /// Path of a named route, e.g. `("ArticleDetail", &[("id", "7")])`.
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.router.with_value(|r| r.table().path_for(name, params))
    }

    /// Navigate to `path`.
    ///
    /// Redundant or aborted navigations are dropped silently.
    pub fn navigate(&self, path: &str) {
        let Some(route) = self.router.try_update_value(|r| r.navigate(path)).flatten() else {
            return;
        };
        dom::push_state(&self.href(&route.full_path()));
        self.route.set(route);
    }

    /// Re-read the browser location after back/forward navigation.
    pub fn sync_with_location(&self) {
        let location = dom::location_path();
        let synced = self.router.try_update_value(|r| {
            let path = r.strip_base(&location).to_string();
            r.sync(&path)
        });
        match synced {
            Some(Ok(route)) => self.route.set(route),
            Some(Err(err)) => warn!("history navigation rejected: {err}"),
            None => {}
        }
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the router
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::from_browser();
    if let Ok(ctx) = &ctx {
        let ctx = *ctx;
        provide_context(ctx);

        // Keep the tab title in sync with the route's display name
        Effect::new(move |_| {
            let title = ctx.route.with(|r| r.title());
            match title {
                Some(title) => dom::set_document_title(&format!("{title} | {APP_NAME}")),
                None => dom::set_document_title(APP_NAME),
            }
        });
    }

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f5f7fa;
                    color: #303133;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #f56c6c; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #909399; margin-bottom: 2rem;">
                            "The application failed to start. Please try reloading the page."
                        </p>
                        <ul style="text-align: left; color: #f56c6c; font-size: 0.9rem;">
                            {move || errors.get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                            }
                        </ul>
                        <button
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #409eff;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 4px;
                                cursor: pointer;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            {ctx.map(|_| view! { <AppRouter /> })}
        </ErrorBoundary>
    }
}
