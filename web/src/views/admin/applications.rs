use leptos::{prelude::*, task::spawn_local};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server_admin::{
    approve_application, fetch_applications, publish_approved_application, reject_application,
};

/// Venue application queue. Pending entries can be approved or rejected;
/// approved ones can be published, which creates the live venue.
#[component]
pub fn ApplicationsPanel(token: String) -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let action_error = RwSignal::new(Option::<String>::None);

    let list_token = token.clone();
    let applications = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = list_token.clone();
            async move { fetch_applications(token, None).await }
        },
    );

    let approve_token = token.clone();
    let approve = move |id: i64| {
        let token = approve_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match approve_application(token, id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    let reject_token = token.clone();
    let reject = move |id: i64| {
        let token = reject_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match reject_application(token, id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    let publish_token = token.clone();
    let publish = move |id: i64| {
        let token = publish_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match publish_approved_application(token, id).await {
                Ok(_) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h2>"Venue applications"</h2>
            {move || {
                action_error
                    .get()
                    .map(|msg| view! { <ErrorView message=Some(msg) /> })
            }}
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    applications
                        .get()
                        .map(|result| match result {
                            Ok(applications) if applications.is_empty() => {
                                view! { <p>"No applications."</p> }.into_any()
                            }
                            Ok(applications) => {
                                view! {
                                    <ul class="admin-panel__list">
                                        {applications
                                            .into_iter()
                                            .map(|app| {
                                                let id = app.id;
                                                let approve = approve.clone();
                                                let reject = reject.clone();
                                                let publish = publish.clone();
                                                let is_pending = app.status == "pending";
                                                let is_approved = app.status == "approved";
                                                view! {
                                                    <li class="admin-panel__item">
                                                        <div class="admin-panel__summary">
                                                            <strong>{app.venue_name.clone()}</strong>
                                                            <span>
                                                                {format!(
                                                                    "{} ({}) in {}",
                                                                    app.applicant_name,
                                                                    app.applicant_email,
                                                                    app.city,
                                                                )}
                                                            </span>
                                                            <span class=format!(
                                                                "admin-panel__status admin-panel__status--{}",
                                                                app.status,
                                                            )>{app.status.clone()}</span>
                                                        </div>
                                                        <p class="admin-panel__description">
                                                            {app.description.clone()}
                                                        </p>
                                                        <div class="admin-panel__actions">
                                                            {is_pending
                                                                .then(|| {
                                                                    let approve = approve.clone();
                                                                    let reject = reject.clone();
                                                                    view! {
                                                                        <button on:click=move |_| approve(id)>"Approve"</button>
                                                                        <button on:click=move |_| reject(id)>"Reject"</button>
                                                                    }
                                                                })}
                                                            {is_approved
                                                                .then(|| {
                                                                    let publish = publish.clone();
                                                                    view! {
                                                                        <button on:click=move |_| publish(id)>"Publish"</button>
                                                                    }
                                                                })}
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
                                        "Couldn't load applications.".to_string(),
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
