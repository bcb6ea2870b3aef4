use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::server_auth::{login, signup, LoginData, SignupData};
use crate::utils::auth::{load_session, store_token, AuthSession};
use crate::views::venue_owner::OWNER_DASHBOARD_PATH;

/// Combined sign-in / sign-up screen. A successful response stores the
/// token, refreshes the session signal and sends owners to their
/// dashboard. The `/venue-owner/auth` route mounts it with `for_owners`
/// set, which opens on sign-up with the owner box pre-checked.
#[component]
pub fn AuthPage(
    session: RwSignal<Option<AuthSession>>,
    #[prop(optional)] for_owners: bool,
) -> impl IntoView {
    let signing_up = RwSignal::new(for_owners);

    let display_name = RwSignal::new(String::new());
    let pronouns = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let as_owner = RwSignal::new(for_owners);

    let loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let is_button_disabled = Memo::new(move |_| {
        if email.get().is_empty() || password.get().is_empty() {
            return true;
        }
        signing_up.get() && (display_name.get().is_empty() || confirm_password.get().is_empty())
    });

    let navigate = use_navigate();
    let finish_sign_in = move |token: String, role: String| {
        store_token(&token);
        session.set(load_session());
        if role == "owner" || role == "admin" {
            navigate(OWNER_DASHBOARD_PATH, Default::default());
        } else {
            navigate("/directory", Default::default());
        }
    };

    let submit = move |_| {
        loading.set(true);
        error_message.set(None);

        if signing_up.get() && password.get() != confirm_password.get() {
            error_message.set(Some("Passwords do not match".to_string()));
            loading.set(false);
            return;
        }

        let finish_sign_in = finish_sign_in.clone();
        spawn_local(async move {
            let response = if signing_up.get_untracked() {
                signup(SignupData {
                    display_name: display_name.get_untracked(),
                    pronouns: {
                        let p = pronouns.get_untracked();
                        (!p.trim().is_empty()).then(|| p.trim().to_string())
                    },
                    email: email.get_untracked(),
                    password: password.get_untracked(),
                    as_owner: as_owner.get_untracked(),
                })
                .await
            } else {
                login(LoginData {
                    email: email.get_untracked(),
                    password: password.get_untracked(),
                })
                .await
            };

            match response {
                Ok(auth) if auth.success => {
                    if let (Some(token), Some(role)) = (auth.token, auth.role) {
                        finish_sign_in(token, role);
                    }
                }
                Ok(auth) => error_message.set(auth.error),
                Err(e) => error_message.set(Some(format!("Request failed: {}", e))),
            }
            loading.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>
                        {move || if signing_up.get() { "Create Your Account" } else { "Welcome Back" }}
                    </h1>
                    <p>
                        {if for_owners {
                            "Create a venue-owner account to submit and manage your listing."
                        } else {
                            "Havenmap accounts are free for visitors and venue owners alike."
                        }}
                    </p>
                </div>

                <div class="auth-toggle-buttons">
                    <button
                        class=move || {
                            if !signing_up.get() {
                                "auth-toggle-btn auth-active"
                            } else {
                                "auth-toggle-btn"
                            }
                        }
                        on:click=move |_| signing_up.set(false)
                    >
                        "Sign In"
                    </button>
                    <button
                        class=move || {
                            if signing_up.get() {
                                "auth-toggle-btn auth-active"
                            } else {
                                "auth-toggle-btn"
                            }
                        }
                        on:click=move |_| signing_up.set(true)
                    >
                        "Sign Up"
                    </button>
                </div>

                <form on:submit=move |ev| {
                    ev.prevent_default();
                    submit(());
                }>
                    <Show when=move || signing_up.get()>
                        <div class="auth-form-group">
                            <Input
                                class="auth-input"
                                placeholder="Display name"
                                value=display_name
                            />
                        </div>
                        <div class="auth-form-group">
                            <Input
                                class="auth-input"
                                placeholder="Pronouns (optional)"
                                value=pronouns
                            />
                        </div>
                    </Show>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Email"
                            input_type=InputType::Email
                            value=email
                        />
                    </div>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Password"
                            input_type=InputType::Password
                            value=password
                        />
                    </div>

                    <Show when=move || signing_up.get()>
                        <div class="auth-form-group">
                            <Input
                                class="auth-input"
                                placeholder="Confirm password"
                                input_type=InputType::Password
                                value=confirm_password
                            />
                        </div>
                        <label class="auth-owner-toggle">
                            <input
                                type="checkbox"
                                prop:checked=move || as_owner.get()
                                on:change=move |_| as_owner.update(|v| *v = !*v)
                            />
                            "I run a venue and want to submit a listing"
                        </label>
                    </Show>

                    {move || {
                        error_message
                            .get()
                            .map(|msg| view! { <div class="auth-error-message">{msg}</div> })
                    }}

                    <Button
                        class="auth-submit-btn"
                        button_type=ButtonType::Submit
                        loading=Signal::from(loading)
                        disabled=Signal::from(is_button_disabled)
                    >
                        {move || if signing_up.get() { "Create Account" } else { "Sign In" }}
                    </Button>
                </form>
            </div>
        </div>
    }
}
