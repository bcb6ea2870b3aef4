use leptos::{prelude::*, task::spawn_local};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server_admin::{fetch_sponsor_queue, rule_on_sponsor_application};

/// Sponsor enquiry queue. Approval creates the active sponsor entry shown
/// on the landing page.
#[component]
pub fn SponsorsPanel(token: String) -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let action_error = RwSignal::new(Option::<String>::None);

    let list_token = token.clone();
    let queue = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = list_token.clone();
            async move { fetch_sponsor_queue(token).await }
        },
    );

    let rule_token = token;
    let rule = move |id: i64, approve: bool| {
        let token = rule_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match rule_on_sponsor_application(token, id, approve).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h2>"Sponsor enquiries"</h2>
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
                            Ok(applications) if applications.is_empty() => {
                                view! { <p>"No sponsor enquiries."</p> }.into_any()
                            }
                            Ok(applications) => {
                                view! {
                                    <ul class="admin-panel__list">
                                        {applications
                                            .into_iter()
                                            .map(|app| {
                                                let id = app.id;
                                                let rule = rule.clone();
                                                let rule_reject = rule.clone();
                                                view! {
                                                    <li class="admin-panel__item">
                                                        <div class="admin-panel__summary">
                                                            <strong>{app.name.clone()}</strong>
                                                            <span>{app.contact_email.clone()}</span>
                                                            {app
                                                                .website
                                                                .clone()
                                                                .map(|url| {
                                                                    view! {
                                                                        <a href=url.clone() target="_blank" rel="noopener">
                                                                            {url.clone()}
                                                                        </a>
                                                                    }
                                                                })}
                                                        </div>
                                                        <p>{app.message.clone()}</p>
                                                        <div class="admin-panel__actions">
                                                            <button on:click=move |_| rule(
                                                                id,
                                                                true,
                                                            )>"Approve"</button>
                                                            <button on:click=move |_| rule_reject(
                                                                id,
                                                                false,
                                                            )>"Reject"</button>
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
                                        "Couldn't load sponsor enquiries.".to_string(),
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
