//! Route table for history-mode navigation.
//!
//! URL format: `/front/<page>[/<param>]`, e.g. `/front/article/42` or
//! `/front/processing/5f0c...`. The table is static data; [`RouteTable`]
//! resolves a pathname to the chain of entries that render it.

use std::borrow::Cow;
use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::core::error::RouteTableError;

/// Pattern that matches any path not claimed by an earlier sibling.
pub const CATCH_ALL: &str = "*";

/// Parameter name under which a catch-all stores the unmatched remainder.
pub const CATCH_ALL_PARAM: &str = "pathMatch";

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ============================================================================
// Route Entries
// ============================================================================

/// Identifies a view in the view registry.
///
/// Entries reference views by id so the component itself is only
/// instantiated when its route is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Layout wrapping every `/front/...` page
    Front,
    Home,
    ArticleDetail,
    Upload,
    ProcessingStatus,
    Graph,
    GraphPersonalization,
    Settings,
    NotFound,
}

/// A mapping from a path pattern to a view and its metadata.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path pattern. Top-level entries are absolute, children relative.
    pub path: &'static str,
    /// Symbolic route name.
    pub name: Option<&'static str>,
    /// Display name shown in the page header.
    pub title: Option<&'static str>,
    /// View rendered for this entry.
    pub view: Option<ViewId>,
    /// Redirect target; entries with a redirect render nothing.
    pub redirect: Option<&'static str>,
    /// Nested entries rendered inside this entry's view.
    pub children: &'static [RouteEntry],
}

impl RouteEntry {
    /// A page rendering `view`.
    pub const fn page(
        path: &'static str,
        name: &'static str,
        title: &'static str,
        view: ViewId,
    ) -> Self {
        Self {
            path,
            name: Some(name),
            title: Some(title),
            view: Some(view),
            redirect: None,
            children: &[],
        }
    }

    /// A layout rendering `view` around one of `children`.
    pub const fn layout(
        path: &'static str,
        name: &'static str,
        view: ViewId,
        children: &'static [RouteEntry],
    ) -> Self {
        Self {
            path,
            name: Some(name),
            title: None,
            view: Some(view),
            redirect: None,
            children,
        }
    }

    /// An entry that forwards navigation to `to`.
    pub const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            title: None,
            view: None,
            redirect: Some(to),
            children: &[],
        }
    }

    #[inline]
    pub fn is_catch_all(&self) -> bool {
        self.path == CATCH_ALL
    }
}

// ============================================================================
// Application Routes
// ============================================================================

const FRONT_CHILDREN: &[RouteEntry] = &[
    RouteEntry::page("home", "Home", "Home", ViewId::Home),
    RouteEntry::page(
        "article/:id",
        "ArticleDetail",
        "Article Detail",
        ViewId::ArticleDetail,
    ),
    RouteEntry::page("upload", "Upload", "Upload Paper", ViewId::Upload),
    RouteEntry::page(
        "processing/:taskId",
        "ProcessingStatus",
        "Processing Status",
        ViewId::ProcessingStatus,
    ),
    RouteEntry::page("graph", "Graph", "Knowledge Graph", ViewId::Graph),
    RouteEntry::page(
        "graph-personalization",
        "GraphPersonalization",
        "Graph Personalization",
        ViewId::GraphPersonalization,
    ),
    RouteEntry::page("settings", "Settings", "Settings", ViewId::Settings),
];

/// The application's route table. The catch-all stays last.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry::redirect("/", "/front/home"),
    RouteEntry::layout("/front", "Front", ViewId::Front, FRONT_CHILDREN),
    RouteEntry::page(CATCH_ALL, "NotFound", "Not Found", ViewId::NotFound),
];

// ============================================================================
// RouteMatch
// ============================================================================

/// Result of resolving a path against a [`RouteTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    /// Normalized pathname (leading slash, no trailing slash).
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
    /// Matched entries from the top-level entry down to the leaf.
    pub matched: Vec<&'static RouteEntry>,
    /// Captured `:param` segments, percent-decoded.
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Path plus query, used to detect redundant navigation.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// The deepest matched entry.
    pub fn leaf(&self) -> Option<&'static RouteEntry> {
        self.matched.last().copied()
    }

    /// Symbolic name of the leaf entry.
    pub fn name(&self) -> Option<&'static str> {
        self.leaf().and_then(|e| e.name)
    }

    /// Display name of the leaf entry.
    pub fn title(&self) -> Option<&'static str> {
        self.leaf().and_then(|e| e.title)
    }

    /// Redirect target of the leaf entry, if it is a redirect.
    pub fn redirect(&self) -> Option<&'static str> {
        self.leaf().and_then(|e| e.redirect)
    }

    /// View rendered at nesting level `depth` (0 = top level).
    pub fn view_at(&self, depth: usize) -> Option<ViewId> {
        self.matched.get(depth).and_then(|e| e.view)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// `true` when the not-found entry was matched.
    pub fn is_not_found(&self) -> bool {
        self.leaf().is_some_and(RouteEntry::is_catch_all)
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Validated route table.
#[derive(Clone, Copy, Debug)]
pub struct RouteTable {
    entries: &'static [RouteEntry],
}

impl RouteTable {
    /// Validate `entries` and wrap them.
    ///
    /// Sibling paths must be unique and a catch-all must be the last sibling.
    pub fn new(entries: &'static [RouteEntry]) -> Result<Self, RouteTableError> {
        validate(entries, true)?;
        Ok(Self { entries })
    }

    /// The application's table ([`ROUTES`]).
    pub fn app() -> Result<Self, RouteTableError> {
        Self::new(ROUTES)
    }

    /// Match `location` (pathname with optional query/fragment).
    ///
    /// Redirect entries are returned as-is; following them is up to the
    /// caller. Returns `None` only when the table has no catch-all.
    pub fn match_path(&self, location: &str) -> Option<RouteMatch> {
        let (path, query) = split_location(location);
        let segments: Vec<&str> = segments(path).collect();

        let mut matched = Vec::new();
        let mut params = BTreeMap::new();
        if !match_entries(self.entries, &segments, &mut matched, &mut params) {
            return None;
        }

        Some(RouteMatch {
            path: normalize(&segments),
            query: query.to_string(),
            matched,
            params,
        })
    }

    /// Build the path of the route named `name`, filling `:param` segments.
    ///
    /// Parameter values are percent-encoded. Returns `None` for unknown names
    /// or missing parameters.
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let patterns = find_named(self.entries, name)?;
        let mut out: Vec<Cow<'_, str>> = Vec::new();
        for pattern in patterns {
            for segment in segments(pattern) {
                match segment.strip_prefix(':') {
                    Some(key) => {
                        let (_, value) = params.iter().find(|(k, _)| *k == key)?;
                        out.push(utf8_percent_encode(value, SEGMENT).into());
                    }
                    None => out.push(segment.into()),
                }
            }
        }
        Some(format!("/{}", out.join("/")))
    }
}

fn validate(entries: &'static [RouteEntry], top_level: bool) -> Result<(), RouteTableError> {
    for (i, entry) in entries.iter().enumerate() {
        if top_level && entry.path.trim().is_empty() {
            return Err(RouteTableError::EmptyPath(
                entry.name.unwrap_or_default().to_string(),
            ));
        }
        if entry.is_catch_all() && i + 1 != entries.len() {
            return Err(RouteTableError::CatchAllNotLast);
        }
        let key = normalize(&segments(entry.path).collect::<Vec<_>>());
        let duplicate = entries[..i].iter().any(|prev| {
            normalize(&segments(prev.path).collect::<Vec<_>>()).eq_ignore_ascii_case(&key)
        });
        if duplicate {
            return Err(RouteTableError::DuplicatePath(entry.path.to_string()));
        }
        validate(entry.children, false)?;
    }
    Ok(())
}

fn match_entries(
    entries: &'static [RouteEntry],
    segments: &[&str],
    matched: &mut Vec<&'static RouteEntry>,
    params: &mut BTreeMap<String, String>,
) -> bool {
    for entry in entries {
        if entry.is_catch_all() {
            params.insert(CATCH_ALL_PARAM.to_string(), decode_param(&normalize(segments)));
            matched.push(entry);
            return true;
        }

        let mut captured = Vec::new();
        let Some(rest) = match_prefix(entry.path, segments, &mut captured) else {
            continue;
        };

        if rest.is_empty() {
            matched.push(entry);
            params.extend(captured);
            return true;
        }

        matched.push(entry);
        let mut child_params = BTreeMap::new();
        if match_entries(entry.children, rest, matched, &mut child_params) {
            params.extend(captured);
            params.extend(child_params);
            return true;
        }
        matched.truncate(matched.len() - 1);
    }
    false
}

/// Match the segments of `pattern` against the front of `segments`,
/// returning the unconsumed remainder.
fn match_prefix<'a, 'b>(
    pattern: &str,
    segments: &'b [&'a str],
    captured: &mut Vec<(String, String)>,
) -> Option<&'b [&'a str]> {
    let mut rest = segments;
    for expected in self::segments(pattern) {
        let (actual, tail) = rest.split_first()?;
        match expected.strip_prefix(':') {
            Some(key) => captured.push((key.to_string(), decode_param(actual))),
            None if expected.eq_ignore_ascii_case(actual) => {}
            None => return None,
        }
        rest = tail;
    }
    Some(rest)
}

fn find_named(entries: &'static [RouteEntry], name: &str) -> Option<Vec<&'static str>> {
    for entry in entries {
        if entry.name == Some(name) {
            return Some(vec![entry.path]);
        }
        if let Some(mut tail) = find_named(entry.children, name) {
            tail.insert(0, entry.path);
            return Some(tail);
        }
    }
    None
}

/// Percent-decode a captured value, keeping the raw text when the bytes are
/// not UTF-8.
fn decode_param(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

fn split_location(location: &str) -> (&str, &str) {
    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn normalize(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
