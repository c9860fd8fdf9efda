//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;
use litgraph_web::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuFileText as Article, LuHouse as Home, LuNetwork as Graph, LuSettings as Settings,
        LuSlidersHorizontal as Personalize, LuTriangleAlert as Warning, LuUpload as Upload,
    };
}

mod bootstrap {
    pub use icondata::{
        BsDiagram3 as Graph, BsExclamationTriangle as Warning, BsFileEarmarkText as Article,
        BsGear as Settings, BsHouseFill as Home, BsSliders as Personalize, BsUpload as Upload,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match litgraph_web::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(HOME, Home);
themed_icon!(ARTICLE, Article);
themed_icon!(UPLOAD, Upload);
themed_icon!(GRAPH, Graph);
themed_icon!(PERSONALIZE, Personalize);
themed_icon!(SETTINGS, Settings);
themed_icon!(WARNING, Warning);
