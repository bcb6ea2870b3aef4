use leptos::{prelude::*, task::spawn_local};

use crate::components::loading::LoadingView;
use crate::server_auth::{
    change_account_email, fetch_my_profile, request_data_rights, update_my_profile,
};
use crate::utils::auth::{clear_session, AuthSession};

/// Account settings: profile details, email change and data-rights
/// requests. Changing the email signs the account out because the stored
/// token carries the old address.
#[component]
pub fn AccountPage(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    view! {
        <div class="account">
            {move || match session.get() {
                Some(auth) => view! { <AccountPanels auth=auth session=session /> }.into_any(),
                None => {
                    view! {
                        <p class="account__signin">
                            <a href="/auth">"Sign in"</a>
                            " to manage your account."
                        </p>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn AccountPanels(auth: AuthSession, session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    let profile_token = auth.token.clone();
    let profile = Resource::new(
        || (),
        move |_| {
            let token = profile_token.clone();
            async move { fetch_my_profile(token).await }
        },
    );

    let display_name = RwSignal::new(String::new());
    let pronouns = RwSignal::new(String::new());
    let new_email = RwSignal::new(String::new());
    let profile_status = RwSignal::new(Option::<String>::None);
    let email_status = RwSignal::new(Option::<String>::None);
    let rights_status = RwSignal::new(Option::<String>::None);

    Effect::new(move |_| {
        if let Some(Ok(Some(profile))) = profile.get() {
            display_name.set(profile.display_name.clone());
            pronouns.set(profile.pronouns.clone().unwrap_or_default());
        }
    });

    let save_profile_token = auth.token.clone();
    let save_profile = move |_| {
        let token = save_profile_token.clone();
        profile_status.set(None);
        spawn_local(async move {
            let result = update_my_profile(token, display_name.get_untracked(), {
                let p = pronouns.get_untracked();
                (!p.trim().is_empty()).then(|| p.trim().to_string())
            })
            .await;
            profile_status.set(Some(match result {
                Ok(()) => "Profile saved.".to_string(),
                Err(e) => e.to_string(),
            }));
        });
    };

    let change_email_token = auth.token.clone();
    let change_email = move |_| {
        let token = change_email_token.clone();
        email_status.set(None);
        spawn_local(async move {
            match change_account_email(token, new_email.get_untracked()).await {
                Ok(()) => {
                    // The token still carries the old address; force a
                    // fresh sign-in.
                    clear_session();
                    session.set(None);
                }
                Err(e) => email_status.set(Some(e.to_string())),
            }
        });
    };

    let rights_token = auth.token.clone();
    let file_request = move |kind: &'static str| {
        let token = rights_token.clone();
        rights_status.set(None);
        spawn_local(async move {
            rights_status.set(Some(match request_data_rights(token, kind.to_string()).await {
                Ok(()) => "Request filed. An administrator will be in touch.".to_string(),
                Err(e) => e.to_string(),
            }));
        });
    };
    let request_export = file_request.clone();
    let request_delete = file_request;

    view! {
        <h1>"Your account"</h1>

        <section class="account__section">
            <h2>"Profile"</h2>
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    profile
                        .get()
                        .map(|_| {
                            view! {
                                <div class="account__profile">
                                    <input
                                        type="text"
                                        placeholder="Display name"
                                        prop:value=move || display_name.get()
                                        on:input=move |ev| {
                                            display_name.set(event_target_value(&ev))
                                        }
                                    />
                                    <input
                                        type="text"
                                        placeholder="Pronouns (optional)"
                                        prop:value=move || pronouns.get()
                                        on:input=move |ev| pronouns.set(event_target_value(&ev))
                                    />
                                    <button on:click=save_profile.clone()>"Save profile"</button>
                                    {move || {
                                        profile_status
                                            .get()
                                            .map(|msg| view! { <p>{msg}</p> })
                                    }}
                                </div>
                            }
                        })
                }}
            </Suspense>
        </section>

        <section class="account__section">
            <h2>"Email"</h2>
            <p>{format!("Signed in as {}", auth.email)}</p>
            <input
                type="email"
                placeholder="New email address"
                prop:value=move || new_email.get()
                on:input=move |ev| new_email.set(event_target_value(&ev))
            />
            <button
                disabled=move || new_email.get().trim().is_empty()
                on:click=change_email
            >
                "Change email"
            </button>
            <p class="account__note">"You'll be signed out and need to sign in again."</p>
            {move || email_status.get().map(|msg| view! { <p class="account__error">{msg}</p> })}
        </section>

        <section class="account__section">
            <h2>"Your data"</h2>
            <p>
                "You can ask for a copy of everything we hold about you, or for your "
                "account and reviews to be deleted."
            </p>
            <div class="account__rights-buttons">
                <button on:click=move |_| request_export("export")>"Request my data"</button>
                <button on:click=move |_| request_delete("delete")>
                    "Request account deletion"
                </button>
            </div>
            {move || rights_status.get().map(|msg| view! { <p>{msg}</p> })}
        </section>
    }
}
