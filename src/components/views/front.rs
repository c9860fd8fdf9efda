//! Layout shared by every `/front/...` page.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;
use litgraph_web::config::APP_NAME;

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::router::{RouterLink, RouterView};

/// Navigation bar entries: route name, label, icon.
const NAV_ITEMS: &[(&str, &str, IconData)] = &[
    ("Home", "Home", ic::HOME),
    ("Upload", "Upload", ic::UPLOAD),
    ("Graph", "Knowledge Graph", ic::GRAPH),
    ("GraphPersonalization", "Personalization", ic::PERSONALIZE),
    ("Settings", "Settings", ic::SETTINGS),
];

/// Page frame with the navigation bar; the matched child renders below it.
#[component]
pub fn Front(depth: usize) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let links = NAV_ITEMS
        .iter()
        .filter_map(|&(name, label, icon)| {
            let to = ctx.path_for(name, &[])?;
            Some(view! {
                <RouterLink to=to class=css::navLink active_class=css::active>
                    <Icon icon=icon />
                    <span>{label}</span>
                </RouterLink>
            })
        })
        .collect::<Vec<_>>();

    let home = ctx.path_for("Home", &[]).unwrap_or_else(|| "/".to_string());

    view! {
        <div class=css::layout>
            <header class=css::header>
                <RouterLink to=home class=css::brand>{APP_NAME}</RouterLink>
                <nav class=css::nav>{links}</nav>
            </header>
            <main class=css::main>
                <RouterView depth={depth + 1} />
            </main>
        </div>
    }
}
