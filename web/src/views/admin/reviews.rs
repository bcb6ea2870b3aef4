use leptos::{prelude::*, task::spawn_local};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::components::reviews::star_row;
use crate::server_admin::{approve_queued_review, fetch_review_queue, remove_review};

/// Review moderation queue: everything submitted and not yet approved.
#[component]
pub fn ReviewsPanel(token: String) -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let action_error = RwSignal::new(Option::<String>::None);

    let list_token = token.clone();
    let queue = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = list_token.clone();
            async move { fetch_review_queue(token).await }
        },
    );

    let approve_token = token.clone();
    let approve = move |id: i64| {
        let token = approve_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match approve_queued_review(token, id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    let remove_token = token;
    let remove = move |id: i64| {
        let token = remove_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match remove_review(token, id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h2>"Review queue"</h2>
            {move || {
                action_error
                    .get()
                    .map(|msg| view! { <ErrorView message=Some(msg) /> })
            }}
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    queue
                        .get()
                        .map(|result| match result {
                            Ok(reviews) if reviews.is_empty() => {
                                view! { <p>"Nothing waiting for review."</p> }.into_any()
                            }
                            Ok(reviews) => {
                                view! {
                                    <ul class="admin-panel__list">
                                        {reviews
                                            .into_iter()
                                            .map(|review| {
                                                let id = review.id;
                                                let approve = approve.clone();
                                                let remove = remove.clone();
                                                view! {
                                                    <li class="admin-panel__item">
                                                        <div class="admin-panel__summary">
                                                            <span>{star_row(review.rating)}</span>
                                                            <span>{review.author_name.clone()}</span>
                                                        </div>
                                                        <p>{review.body.clone()}</p>
                                                        <div class="admin-panel__actions">
                                                            <button on:click=move |_| approve(id)>"Approve"</button>
                                                            <button on:click=move |_| remove(id)>"Remove"</button>
                                                        </div>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! {
                                    <ErrorView message=Some(
                                        "Couldn't load the review queue.".to_string(),
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
