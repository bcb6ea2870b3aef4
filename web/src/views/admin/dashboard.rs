use leptos::prelude::*;

use crate::components::error::ErrorView;
use crate::utils::auth::AuthSession;

use super::applications::ApplicationsPanel;
use super::pending_changes::PendingChangesPanel;
use super::reviews::ReviewsPanel;
use super::settings::SettingsPanel;
use super::sponsors::SponsorsPanel;
use super::users::UsersPanel;

const TABS: &[(&str, &str)] = &[
    ("applications", "Applications"),
    ("changes", "Pending changes"),
    ("reviews", "Reviews"),
    ("sponsors", "Sponsors"),
    ("users", "Users"),
    ("settings", "Settings"),
];

/// Admin home. Everything here is double-gated: this component checks the
/// session role for display, and every server call re-verifies the token.
#[component]
pub fn AdminDashboard(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    let active_tab = RwSignal::new("applications".to_string());

    view! {
        <div class="admin-dashboard">
            {move || match session.get() {
                Some(auth) if auth.is_admin() => {
                    let token = auth.token.clone();
                    view! {
                        <h1>"Moderation"</h1>
                        <nav class="admin-dashboard__tabs">
                            {TABS
                                .iter()
                                .map(|(key, label)| {
                                    let key = key.to_string();
                                    let class_key = key.clone();
                                    view! {
                                        <button
                                            class=move || {
                                                if active_tab.get() == class_key {
                                                    "admin-dashboard__tab admin-dashboard__tab--active"
                                                } else {
                                                    "admin-dashboard__tab"
                                                }
                                            }
                                            on:click=move |_| active_tab.set(key.clone())
                                        >
                                            {*label}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </nav>
                        {move || {
                            let token = token.clone();
                            match active_tab.get().as_str() {
                                "changes" => {
                                    view! { <PendingChangesPanel token=token /> }.into_any()
                                }
                                "reviews" => view! { <ReviewsPanel token=token /> }.into_any(),
                                "sponsors" => view! { <SponsorsPanel token=token /> }.into_any(),
                                "users" => view! { <UsersPanel token=token /> }.into_any(),
                                "settings" => view! { <SettingsPanel token=token /> }.into_any(),
                                _ => view! { <ApplicationsPanel token=token /> }.into_any(),
                            }
                        }}
                    }
                        .into_any()
                }
                _ => {
                    view! {
                        <ErrorView message=Some(
                            "You need an administrator account to see this page.".to_string(),
                        ) />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
