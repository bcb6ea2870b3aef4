use leptos::{prelude::*, task::spawn_local};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server_admin::{fetch_pending_changes, rule_on_pending_change};

fn describe_changes(changes: &serde_json::Value) -> Vec<String> {
    match changes.as_object() {
        Some(map) => map
            .iter()
            .map(|(field, value)| {
                let shown = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("{field}: {shown}")
            })
            .collect(),
        None => vec![changes.to_string()],
    }
}

/// Pending edits to published venues. Approving applies the diff and puts
/// the venue back online; rejecting discards it and also reactivates.
#[component]
pub fn PendingChangesPanel(token: String) -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let action_error = RwSignal::new(Option::<String>::None);

    let list_token = token.clone();
    let changes = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = list_token.clone();
            async move { fetch_pending_changes(token).await }
        },
    );

    let rule_token = token;
    let rule = move |change_id: i64, approve: bool| {
        let token = rule_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match rule_on_pending_change(token, change_id, approve).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h2>"Pending venue changes"</h2>
            {move || {
                action_error
                    .get()
                    .map(|msg| view! { <ErrorView message=Some(msg) /> })
            }}
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    changes
                        .get()
                        .map(|result| match result {
                            Ok(changes) if changes.is_empty() => {
                                view! { <p>"No pending changes."</p> }.into_any()
                            }
                            Ok(changes) => {
                                view! {
                                    <ul class="admin-panel__list">
                                        {changes
                                            .into_iter()
                                            .map(|change| {
                                                let id = change.id;
                                                let rule = rule.clone();
                                                let rule_reject = rule.clone();
                                                view! {
                                                    <li class="admin-panel__item">
                                                        <strong>{change.venue_name.clone()}</strong>
                                                        <ul class="admin-panel__diff">
                                                            {describe_changes(&change.changes)
                                                                .into_iter()
                                                                .map(|line| view! { <li>{line}</li> })
                                                                .collect_view()}
                                                        </ul>
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
                                        "Couldn't load pending changes.".to_string(),
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

#[cfg(test)]
mod tests {
    use super::describe_changes;
    use serde_json::json;

    #[test]
    fn field_diffs_read_one_per_line() {
        let lines = describe_changes(&json!({
            "name": "The New Anchor",
            "phone": "0161 000 0000"
        }));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l == "name: The New Anchor"));
    }

    #[test]
    fn non_object_payloads_still_render() {
        let lines = describe_changes(&json!("unexpected"));
        assert_eq!(lines, vec!["\"unexpected\"".to_string()]);
    }
}
