use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server::fetch_content_page;

/// Admin-editable static pages (resources, code of conduct) keyed by slug
/// from the route, or by a fixed slug for the dedicated routes. Paragraphs
/// are split on blank lines; no markup is interpreted.
#[component]
pub fn ContentPageView(#[prop(optional, into)] slug: Option<String>) -> impl IntoView {
    let params = use_params_map();
    let fixed = slug;
    let slug = Memo::new(move |_| {
        fixed
            .clone()
            .unwrap_or_else(|| params.get().get("slug").unwrap_or_default())
    });

    let page = Resource::new(
        move || slug.get(),
        |slug| async move { fetch_content_page(slug).await },
    );

    view! {
        <div class="content-page">
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    page.get()
                        .map(|result| match result {
                            Ok(Some(page)) => {
                                view! {
                                    <article>
                                        <h1>{page.title.clone()}</h1>
                                        {page
                                            .body
                                            .split("\n\n")
                                            .map(|paragraph| {
                                                view! { <p>{paragraph.to_string()}</p> }
                                            })
                                            .collect_view()}
                                    </article>
                                }
                                    .into_any()
                            }
                            Ok(None) => {
                                view! {
                                    <ErrorView message=Some(
                                        "This page doesn't exist.".to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! {
                                    <ErrorView message=Some(
                                        "Couldn't load this page.".to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
