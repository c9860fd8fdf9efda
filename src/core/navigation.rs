//! Route transitions: guards, redirects, and redundant-navigation handling.
//!
//! [`Router`] owns the current [`RouteMatch`]. It never touches the browser
//! itself; the router component mirrors committed routes into the History
//! API and feeds `popstate` back through [`Router::sync`].

use leptos::logging::debug_warn;

use crate::config::MAX_REDIRECTS;
use crate::core::error::NavigationError;
use crate::models::{RouteMatch, RouteTable};

// ============================================================================
// Navigation Guards
// ============================================================================

/// Outcome of a navigation guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue the transition.
    Allow,
    /// Cancel the transition and stay on the current route.
    Abort,
    /// Navigate somewhere else instead.
    Redirect(String),
}

/// Hook invoked before every route transition.
pub trait NavigationGuard: Send + Sync {
    fn before_each(&self, to: &RouteMatch, from: &RouteMatch) -> GuardDecision;
}

/// Guard that lets every transition through.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl NavigationGuard for AllowAll {
    fn before_each(&self, _to: &RouteMatch, _from: &RouteMatch) -> GuardDecision {
        GuardDecision::Allow
    }
}

// ============================================================================
// Router
// ============================================================================

/// Application router state.
pub struct Router {
    table: RouteTable,
    guard: Box<dyn NavigationGuard>,
    base: String,
    current: RouteMatch,
}

impl Router {
    /// Create a router positioned at the browser location `initial`.
    ///
    /// The initial location goes through redirects but not the guard.
    pub fn new(
        table: RouteTable,
        guard: impl NavigationGuard + 'static,
        base: &str,
        initial: &str,
    ) -> Result<Self, NavigationError> {
        let base = normalize_base(base);
        let current = resolve(&table, strip_base(&base, initial))?;
        Ok(Self {
            table,
            guard: Box::new(guard),
            base,
            current,
        })
    }

    pub fn current(&self) -> &RouteMatch {
        &self.current
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Base path the app is served under, without trailing slash (`""` for root).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Navigate to `location`.
    ///
    /// Fails with [`NavigationError::Duplicated`] when the target resolves to
    /// the active route.
    pub fn push(&mut self, location: &str) -> Result<RouteMatch, NavigationError> {
        let target = self.transition(location)?;
        if target.full_path() == self.current.full_path() {
            return Err(NavigationError::Duplicated(target.full_path()));
        }
        self.current = target.clone();
        Ok(target)
    }

    /// Navigate to `location`, discarding any navigation failure.
    ///
    /// Returns the new route when the transition happened.
    pub fn navigate(&mut self, location: &str) -> Option<RouteMatch> {
        match self.push(location) {
            Ok(route) => Some(route),
            Err(err) => {
                debug_warn!("navigation ignored: {err}");
                None
            }
        }
    }

    /// Adopt a location the browser already moved to (back/forward).
    ///
    /// Guards still run; redundant transitions are not an error here.
    pub fn sync(&mut self, location: &str) -> Result<RouteMatch, NavigationError> {
        let target = self.transition(location)?;
        self.current = target.clone();
        Ok(target)
    }

    /// Strip the base path from a browser pathname.
    pub fn strip_base<'a>(&self, pathname: &'a str) -> &'a str {
        strip_base(&self.base, pathname)
    }

    /// Browser URL for a route path (base path prepended).
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn transition(&self, location: &str) -> Result<RouteMatch, NavigationError> {
        let mut target = resolve(&self.table, location)?;
        for _ in 0..MAX_REDIRECTS {
            match self.guard.before_each(&target, &self.current) {
                GuardDecision::Allow => return Ok(target),
                GuardDecision::Abort => {
                    return Err(NavigationError::Aborted {
                        from: self.current.full_path(),
                        to: target.full_path(),
                    });
                }
                GuardDecision::Redirect(next) => target = resolve(&self.table, &next)?,
            }
        }
        Err(NavigationError::RedirectLoop(location.to_string()))
    }
}

/// Resolve `location`, following redirect entries.
///
/// A table without a catch-all resolves unknown paths to an empty match.
fn resolve(table: &RouteTable, location: &str) -> Result<RouteMatch, NavigationError> {
    let mut next = location.to_string();
    for _ in 0..=MAX_REDIRECTS {
        let Some(found) = table.match_path(&next) else {
            return Ok(RouteMatch {
                path: next,
                query: String::new(),
                matched: Vec::new(),
                params: Default::default(),
            });
        };
        match found.redirect() {
            Some(to) => next = to.to_string(),
            None => return Ok(found),
        }
    }
    Err(NavigationError::RedirectLoop(location.to_string()))
}

fn strip_base<'a>(base: &str, pathname: &'a str) -> &'a str {
    if base.is_empty() {
        return pathname;
    }
    match pathname.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') || rest.starts_with('?') => rest,
        _ => pathname,
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RouteEntry, ViewId};

    fn router_at(path: &str) -> Router {
        Router::new(RouteTable::app().unwrap(), AllowAll, "/", path).unwrap()
    }

    #[test]
    fn test_initial_root_follows_redirect() {
        let router = router_at("/");
        assert_eq!(router.current().path, "/front/home");
        assert_eq!(router.current().name(), Some("Home"));
    }

    #[test]
    fn test_push_changes_route() {
        let mut router = router_at("/front/home");
        let route = router.push("/front/article/9").unwrap();
        assert_eq!(route.name(), Some("ArticleDetail"));
        assert_eq!(route.param("id"), Some("9"));
        assert_eq!(router.current().path, "/front/article/9");
    }

    #[test]
    fn test_push_to_unknown_path_lands_on_not_found() {
        let mut router = router_at("/front/home");
        let route = router.push("/missing/page").unwrap();
        assert!(route.is_not_found());
        assert_eq!(route.view_at(0), Some(ViewId::NotFound));
    }

    #[test]
    fn test_push_to_current_path_is_duplicated() {
        let mut router = router_at("/front/graph");
        assert_eq!(
            router.push("/front/graph/"),
            Err(NavigationError::Duplicated("/front/graph".to_string()))
        );
        // A redirect that lands on the current route is redundant too
        let mut router = router_at("/front/home");
        assert!(matches!(
            router.push("/"),
            Err(NavigationError::Duplicated(_))
        ));
    }

    #[test]
    fn test_navigate_swallows_duplicate_navigation() {
        let mut router = router_at("/front/settings");
        assert_eq!(router.navigate("/front/settings"), None);
        assert_eq!(router.current().name(), Some("Settings"));

        let moved = router.navigate("/front/upload").unwrap();
        assert_eq!(moved.name(), Some("Upload"));
    }

    #[test]
    fn test_query_change_is_not_duplicate() {
        let mut router = router_at("/front/graph");
        let route = router.push("/front/graph?focus=rct").unwrap();
        assert_eq!(route.full_path(), "/front/graph?focus=rct");
    }

    #[test]
    fn test_sync_accepts_current_location() {
        let mut router = router_at("/front/graph");
        let route = router.sync("/front/graph").unwrap();
        assert_eq!(route.name(), Some("Graph"));
    }

    struct BlockUpload;

    impl NavigationGuard for BlockUpload {
        fn before_each(&self, to: &RouteMatch, _from: &RouteMatch) -> GuardDecision {
            match to.name() {
                Some("Upload") => GuardDecision::Abort,
                Some("Settings") => GuardDecision::Redirect("/front/home".to_string()),
                _ => GuardDecision::Allow,
            }
        }
    }

    #[test]
    fn test_guard_abort_and_redirect() {
        let mut router =
            Router::new(RouteTable::app().unwrap(), BlockUpload, "/", "/front/graph").unwrap();

        assert!(matches!(
            router.push("/front/upload"),
            Err(NavigationError::Aborted { .. })
        ));
        assert_eq!(router.current().name(), Some("Graph"));

        let route = router.push("/front/settings").unwrap();
        assert_eq!(route.name(), Some("Home"));
    }

    struct AlwaysRedirect;

    impl NavigationGuard for AlwaysRedirect {
        fn before_each(&self, _to: &RouteMatch, _from: &RouteMatch) -> GuardDecision {
            GuardDecision::Redirect("/front/graph".to_string())
        }
    }

    #[test]
    fn test_guard_redirect_loop_is_bounded() {
        let mut router =
            Router::new(RouteTable::app().unwrap(), AlwaysRedirect, "/", "/front/home").unwrap();
        assert!(matches!(
            router.push("/front/upload"),
            Err(NavigationError::RedirectLoop(_))
        ));
    }

    #[test]
    fn test_cyclic_redirect_entries() {
        const CYCLE: &[RouteEntry] = &[
            RouteEntry::redirect("/a", "/b"),
            RouteEntry::redirect("/b", "/a"),
        ];
        let table = RouteTable::new(CYCLE).unwrap();
        assert!(matches!(
            Router::new(table, AllowAll, "/", "/a"),
            Err(NavigationError::RedirectLoop(_))
        ));
    }

    #[test]
    fn test_base_path_handling() {
        let router =
            Router::new(RouteTable::app().unwrap(), AllowAll, "/app/", "/app/front/upload").unwrap();
        assert_eq!(router.current().name(), Some("Upload"));
        assert_eq!(router.base(), "/app");
        assert_eq!(router.strip_base("/app/front/graph"), "/front/graph");
        assert_eq!(router.strip_base("/app"), "/");
        assert_eq!(router.strip_base("/application"), "/application");
        assert_eq!(router.href("/front/graph"), "/app/front/graph");

        let root = router_at("/");
        assert_eq!(root.base(), "");
        assert_eq!(root.strip_base("/front/graph"), "/front/graph");
        assert_eq!(root.href("/front/graph"), "/front/graph");
    }
}
