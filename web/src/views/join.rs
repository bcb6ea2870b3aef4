use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;

use crate::server_owner::submit_sponsor_application;
use crate::utils::auth::AuthSession;
use crate::views::venue_owner::OWNER_DASHBOARD_PATH;

/// Pitch page for venue owners and would-be sponsors.
#[component]
pub fn JoinPage(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    view! {
        <div class="join">
            <section class="join__owners">
                <h1>"List your venue on Havenmap"</h1>
                <p>
                    "If you run a pub, cafe, shop or community space that welcomes trans "
                    "and gender-diverse people, a Havenmap listing puts you in front of "
                    "the people looking for somewhere safe to go."
                </p>
                <ol class="join__steps">
                    <li>"Create a free owner account."</li>
                    <li>"Submit your venue details from your dashboard."</li>
                    <li>"Our moderators check every listing before it goes live."</li>
                </ol>
                {move || match session.get() {
                    Some(auth) if auth.is_owner() => {
                        view! {
                            <A href=OWNER_DASHBOARD_PATH attr:class="join__cta">
                                "Go to your dashboard"
                            </A>
                        }
                            .into_any()
                    }
                    _ => {
                        view! {
                            <A href="/venue-owner/auth" attr:class="join__cta">
                                "Create an owner account"
                            </A>
                        }
                            .into_any()
                    }
                }}
            </section>

            <section class="join__sponsors">
                <h2>"Become a sponsor"</h2>
                <p>
                    "Sponsors keep Havenmap free to use and free of ads. Sponsorships are "
                    "reviewed before your name appears on the site."
                </p>
                <SponsorForm session=session />
            </section>
        </div>
    }
}

#[component]
fn SponsorForm(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let contact_email = RwSignal::new(String::new());
    let website = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let status = RwSignal::new(Option::<Result<(), String>>::None);
    let is_submitting = RwSignal::new(false);

    let submit = move |_| {
        let Some(auth) = session.get() else {
            return;
        };
        let token = auth.token.clone();

        is_submitting.set(true);
        status.set(None);
        spawn_local(async move {
            let result = submit_sponsor_application(
                token,
                name.get_untracked(),
                contact_email.get_untracked(),
                {
                    let url = website.get_untracked();
                    (!url.trim().is_empty()).then(|| url.trim().to_string())
                },
                message.get_untracked(),
            )
            .await;

            match result {
                Ok(()) => {
                    status.set(Some(Ok(())));
                    name.set(String::new());
                    contact_email.set(String::new());
                    website.set(String::new());
                    message.set(String::new());
                }
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
            is_submitting.set(false);
        });
    };

    view! {
        <Show
            when=move || session.get().is_some()
            fallback=|| {
                view! {
                    <p class="join__signin">
                        <a href="/auth">"Sign in"</a>
                        " to send a sponsorship enquiry."
                    </p>
                }
            }
        >
            <div class="sponsor-form">
                <input
                    type="text"
                    placeholder="Organisation name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Contact email"
                    prop:value=move || contact_email.get()
                    on:input=move |ev| contact_email.set(event_target_value(&ev))
                />
                <input
                    type="url"
                    placeholder="Website (optional)"
                    prop:value=move || website.get()
                    on:input=move |ev| website.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="Tell us about your organisation and why you'd like to sponsor Havenmap."
                    prop:value=move || message.get()
                    on:input=move |ev| message.set(event_target_value(&ev))
                ></textarea>
                <button
                    disabled=move || {
                        is_submitting.get() || name.get().trim().is_empty()
                            || message.get().trim().is_empty()
                    }
                    on:click=submit
                >
                    {move || if is_submitting.get() { "Sending..." } else { "Send enquiry" }}
                </button>
                {move || {
                    status
                        .get()
                        .map(|result| match result {
                            Ok(()) => {
                                view! {
                                    <p class="sponsor-form__ok">
                                        "Thanks! We'll be in touch once your enquiry has been reviewed."
                                    </p>
                                }
                                    .into_any()
                            }
                            Err(message) => {
                                view! { <p class="sponsor-form__error">{message}</p> }.into_any()
                            }
                        })
                }}
            </div>
        </Show>
    }
}
