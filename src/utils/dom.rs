//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::JsValue;
use web_sys::Window;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Current pathname plus query string (e.g. `/front/graph?focus=rct`).
pub fn location_path() -> String {
    let Some(location) = window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{pathname}{search}")
}

/// Push a new history entry for `url`.
pub fn push_state(url: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
    }
}

/// Replace the current history entry without adding to browser history.
///
/// Useful for redirects that shouldn't appear in back button history.
pub fn replace_state(url: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
    }
}

/// Set `document.title`.
pub fn set_document_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}
