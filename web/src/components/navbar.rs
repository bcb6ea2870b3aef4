use leptos::prelude::*;
use leptos_router::components::A;

use crate::utils::auth::AuthSession;
use crate::views::venue_owner::OWNER_DASHBOARD_PATH;

/// Top navigation. The link set follows the session role; signing out
/// clears the stored token and drops the session signal.
#[component]
pub fn Navbar(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    let sign_out = move |_| {
        crate::utils::auth::clear_session();
        session.set(None);
    };

    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <A href="/" attr:class="navbar__logo">
                        "Havenmap"
                    </A>
                </div>

                <div class="navbar__links">
                    <A href="/directory" attr:class="navbar__link">
                        "Directory"
                    </A>
                    <A href="/map" attr:class="navbar__link">
                        "Map"
                    </A>
                    <A href="/resources" attr:class="navbar__link">
                        "Resources"
                    </A>
                    <A href="/join" attr:class="navbar__link">
                        "For Venues"
                    </A>

                    <Show when=move || session.get().is_some_and(|s| s.is_owner())>
                        <A href=OWNER_DASHBOARD_PATH attr:class="navbar__link">
                            "Dashboard"
                        </A>
                    </Show>
                    <Show when=move || session.get().is_some_and(|s| s.is_admin())>
                        <A href="/admin" attr:class="navbar__link">
                            "Admin"
                        </A>
                    </Show>

                    <Show
                        when=move || session.get().is_some()
                        fallback=|| {
                            view! {
                                <A href="/auth" attr:class="navbar__link navbar__link--cta">
                                    "Sign In"
                                </A>
                            }
                        }
                    >
                        <button class="navbar__link navbar__link--cta" on:click=sign_out>
                            "Sign Out"
                        </button>
                    </Show>
                </div>
            </div>
        </nav>
    }
}
