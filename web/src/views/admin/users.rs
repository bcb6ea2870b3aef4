use leptos::{prelude::*, task::spawn_local};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server_admin::{
    complete_data_rights, fetch_data_rights_queue, fetch_users, lookup_user_email, set_user_role,
};

const ROLES: &[&str] = &["user", "owner", "admin"];

/// Account administration: role changes and the data-rights queue.
#[component]
pub fn UsersPanel(token: String) -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let action_error = RwSignal::new(Option::<String>::None);

    let users_token = token.clone();
    let users = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = users_token.clone();
            async move { fetch_users(token).await }
        },
    );

    let rights_token = token.clone();
    let rights = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = rights_token.clone();
            async move { fetch_data_rights_queue(token).await }
        },
    );

    let role_token = token.clone();
    let change_role = move |user_id: i64, role: String| {
        let token = role_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match set_user_role(token, user_id, role).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    let complete_token = token.clone();
    let complete = move |request_id: i64| {
        let token = complete_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match complete_data_rights(token, request_id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    // Resolves a user id from a moderation record to an address.
    let lookup_id = RwSignal::new(String::new());
    let lookup_result = RwSignal::new(Option::<String>::None);
    let lookup_token = token;
    let lookup = move |_| {
        let Ok(user_id) = lookup_id.get().trim().parse::<i64>() else {
            lookup_result.set(Some("Enter a numeric user id".to_string()));
            return;
        };
        let token = lookup_token.clone();
        spawn_local(async move {
            match lookup_user_email(token, user_id).await {
                Ok(Some(email)) => lookup_result.set(Some(email)),
                Ok(None) => lookup_result.set(Some("No account with that id".to_string())),
                Err(e) => lookup_result.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h2>"Accounts"</h2>
            {move || {
                action_error
                    .get()
                    .map(|msg| view! { <ErrorView message=Some(msg) /> })
            }}
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    users
                        .get()
                        .map(|result| match result {
                            Ok(accounts) => {
                                view! {
                                    <table class="admin-panel__table">
                                        <thead>
                                            <tr>
                                                <th>"Email"</th>
                                                <th>"Role"</th>
                                                <th>"Joined"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {accounts
                                                .into_iter()
                                                .map(|account| {
                                                    let user_id = account.id;
                                                    let current_role = account.role.clone();
                                                    let change_role = change_role.clone();
                                                    view! {
                                                        <tr>
                                                            <td>{account.email.clone()}</td>
                                                            <td>
                                                                <select on:change=move |ev| change_role(
                                                                    user_id,
                                                                    event_target_value(&ev),
                                                                )>
                                                                    {ROLES
                                                                        .iter()
                                                                        .map(|role| {
                                                                            view! {
                                                                                <option value=*role selected=*role == current_role>
                                                                                    {*role}
                                                                                </option>
                                                                            }
                                                                        })
                                                                        .collect_view()}
                                                                </select>
                                                            </td>
                                                            <td>{account.created_at.clone()}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! {
                                    <ErrorView message=Some(
                                        "Couldn't load accounts.".to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>

            <h2>"Email lookup"</h2>
            <div class="admin-panel__lookup">
                <input
                    type="text"
                    placeholder="User id"
                    prop:value=move || lookup_id.get()
                    on:input=move |ev| lookup_id.set(event_target_value(&ev))
                />
                <button on:click=lookup>"Look up"</button>
                {move || lookup_result.get().map(|text| view! { <span>{text}</span> })}
            </div>

            <h2>"Data rights requests"</h2>
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    rights
                        .get()
                        .map(|result| match result {
                            Ok(requests) if requests.is_empty() => {
                                view! { <p>"No open requests."</p> }.into_any()
                            }
                            Ok(requests) => {
                                view! {
                                    <ul class="admin-panel__list">
                                        {requests
                                            .into_iter()
                                            .map(|request| {
                                                let id = request.id;
                                                let complete = complete.clone();
                                                view! {
                                                    <li class="admin-panel__item">
                                                        <span>
                                                            {format!(
                                                                "{} requested {} on {}",
                                                                request.user_email,
                                                                request.kind,
                                                                request.created_at,
                                                            )}
                                                        </span>
                                                        <button on:click=move |_| complete(id)>
                                                            "Mark completed"
                                                        </button>
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
                                        "Couldn't load data rights requests.".to_string(),
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
