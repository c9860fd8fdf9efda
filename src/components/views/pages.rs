//! Page views rendered inside the [`Front`](super::Front) layout.
//!
//! The pages only identify themselves and their route parameters; document
//! processing and graph rendering live elsewhere.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_icons::Icon;
use litgraph_web::config::{APP_VERSION, ROUTER_BASE_PATH};
use litgraph_web::models::{self, ArticleInfo, MAX_CONCEPT_SLOTS, TaskStatus};

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::router::RouterLink;

fn app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext must be provided")
}

/// Heading showing the current route's display name.
#[component]
fn PageTitle() -> impl IntoView {
    let ctx = app_context();
    let title = Memo::new(move |_| ctx.route.with(|r| r.title().unwrap_or_default()));

    view! { <h1 class=css::pageTitle>{title}</h1> }
}

/// Reactive route parameter `key` (empty when absent).
fn route_param(ctx: AppContext, key: &'static str) -> Memo<String> {
    Memo::new(move |_| ctx.route.with(|r| r.param(key).unwrap_or_default().to_string()))
}

#[component]
pub fn Home() -> impl IntoView {
    let ctx = app_context();
    let backend = RwSignal::new(None::<Result<String, String>>);

    let api = ctx.api();
    spawn_local(async move {
        let banner = api.hello().await.map_err(|e| e.to_string());
        backend.set(Some(banner));
    });

    let status = move || match backend.get() {
        None => view! { <span class=css::muted>"Connecting to backend..."</span> }.into_any(),
        Some(Ok(banner)) => view! { <span>{banner}</span> }.into_any(),
        Some(Err(err)) => {
            view! { <span class=css::error>{format!("Backend unreachable: {err}")}</span> }
                .into_any()
        }
    };

    view! {
        <PageTitle />
        <section class=css::card>
            <p>"Upload papers, review the extracted metadata, and explore the knowledge graph built from them."</p>
            <p>{status}</p>
        </section>
    }
}

#[component]
pub fn ArticleDetail() -> impl IntoView {
    let id = route_param(app_context(), "id");

    view! {
        <PageTitle />
        <section class=css::card>
            <Icon icon=ic::ARTICLE />
            " Article "
            <code>{id}</code>
        </section>
    }
}

#[component]
pub fn Upload() -> impl IntoView {
    view! {
        <PageTitle />
        <section class=css::card>
            <p>"Submit a paper (PDF) for extraction. Progress is tracked on the processing page."</p>
        </section>
    }
}

/// Progress of an upload task, with the review step once extraction is done.
#[component]
pub fn ProcessingStatus() -> impl IntoView {
    let ctx = app_context();
    let task_id = route_param(ctx, "taskId");
    let upload = ctx.path_for("Upload", &[]).unwrap_or_default();
    let record = RwSignal::new(None::<Result<models::ProcessingStatus, String>>);
    let notice = RwSignal::new(None::<String>);

    let load = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            let status = api.processing_status(&id).await.map_err(|e| e.to_string());
            record.set(Some(status));
        });
    };
    Effect::new(move |_| load(task_id.get()));

    let review = move |approve: bool| {
        let Some(Ok(status)) = record.get_untracked() else {
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            let outcome = if approve {
                let article = ArticleInfo::from_extracted(&status);
                api.approve_task(&status.task_id, &article).await
            } else {
                api.reject_task(&status.task_id).await
            };
            match outcome {
                Ok(msg) => {
                    notice.set(Some(msg));
                    load(status.task_id);
                }
                Err(err) => notice.set(Some(err.to_string())),
            }
        });
    };

    let details = move || match record.get() {
        None => view! { <p class=css::muted>"Loading..."</p> }.into_any(),
        Some(Err(err)) => view! { <p class=css::error>{err}</p> }.into_any(),
        Some(Ok(status)) => {
            let pending = status.status == TaskStatus::PendingApproval;
            view! {
                <dl class=css::settings>
                    <dt>"File"</dt>
                    <dd>{status.file_name.unwrap_or_default()}</dd>
                    <dt>"Status"</dt>
                    <dd>{status.status.label()}</dd>
                    <dt>"Progress"</dt>
                    <dd>{format!("{}%", status.progress)}</dd>
                    <dt>"Step"</dt>
                    <dd>{status.current_step.unwrap_or_default()}</dd>
                    <dt>"Title"</dt>
                    <dd>{status.extracted_title.unwrap_or_default()}</dd>
                </dl>
                {status.error_message.map(|msg| view! { <p class=css::error>{msg}</p> })}
                {pending
                    .then(|| {
                        view! {
                            <div class=css::actions>
                                <button on:click=move |_| review(true)>"Approve"</button>
                                <button on:click=move |_| review(false)>"Reject"</button>
                            </div>
                        }
                    })}
            }
                .into_any()
        }
    };

    view! {
        <PageTitle />
        <section class=css::card>
            <p>"Task " <code>{task_id}</code></p>
            {details}
            <p class=css::muted>{move || notice.get()}</p>
            <RouterLink to=upload>"Upload another paper"</RouterLink>
        </section>
    }
}

#[component]
pub fn Graph() -> impl IntoView {
    view! {
        <PageTitle />
        <section class=css::card>
            <p class=css::muted>"Knowledge graph of the stored articles."</p>
        </section>
    }
}

#[component]
pub fn GraphPersonalization() -> impl IntoView {
    let ctx = app_context();
    let saved = RwSignal::new(None::<Result<Vec<models::CustomConcept>, String>>);

    let api = ctx.api();
    spawn_local(async move {
        let concepts = api.custom_concepts().await.map_err(|e| e.to_string());
        saved.set(Some(concepts));
    });

    let slots = move || match saved.get() {
        None => view! { <p class=css::muted>"Loading..."</p> }.into_any(),
        Some(Err(err)) => view! { <p class=css::error>{err}</p> }.into_any(),
        Some(Ok(concepts)) if concepts.is_empty() => {
            view! { <p class=css::muted>"No combinations saved yet."</p> }.into_any()
        }
        Some(Ok(mut concepts)) => {
            concepts.sort_by_key(|c| c.display_order);
            let items = concepts
                .iter()
                .map(|c| {
                    let heading = format!("#{} {}", c.display_order, c.relationship_name);
                    let members = c.concepts_list().join(", ");
                    view! {
                        <li>
                            <strong>{heading}</strong>
                            " "
                            <span class=css::muted>{members}</span>
                        </li>
                    }
                })
                .collect::<Vec<_>>();
            view! { <ol class=css::concepts>{items}</ol> }.into_any()
        }
    };

    view! {
        <PageTitle />
        <section class=css::card>
            <p class=css::muted>
                {format!("Define up to {MAX_CONCEPT_SLOTS} custom concept combinations for the graph.")}
            </p>
            {slots}
        </section>
    }
}

#[component]
pub fn Settings() -> impl IntoView {
    let ctx = app_context();
    let api = ctx.api();
    let config = api.client().config();
    let base_url = config.base_url.clone();
    let timeout = format!("{} ms", config.timeout.as_millis());

    view! {
        <PageTitle />
        <section class=css::card>
            <dl class=css::settings>
                <dt>"API base URL"</dt>
                <dd>{base_url}</dd>
                <dt>"Request timeout"</dt>
                <dd>{timeout}</dd>
                <dt>"Router base path"</dt>
                <dd>{ROUTER_BASE_PATH}</dd>
                <dt>"Version"</dt>
                <dd>{APP_VERSION}</dd>
            </dl>
        </section>
    }
}

/// Rendered for any path no other route claims.
#[component]
pub fn NotFound() -> impl IntoView {
    let ctx = app_context();
    let path = Memo::new(move |_| ctx.route.with(|r| r.path.clone()));
    let home = ctx.path_for("Home", &[]).unwrap_or_else(|| "/".to_string());

    view! {
        <div class=css::notFound>
            <Icon icon=ic::WARNING />
            <PageTitle />
            <p class=css::muted>"Nothing lives at " <code>{path}</code></p>
            <RouterLink to=home>"Back to home"</RouterLink>
        </div>
    }
}
