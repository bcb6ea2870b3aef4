use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::ConfigProvider;

use crate::components::navbar::Navbar;
use crate::utils::auth::use_session;
use crate::views::account::AccountPage;
use crate::views::admin::AdminDashboard;
use crate::views::auth::AuthPage;
use crate::views::content_page::ContentPageView;
use crate::views::directory::DirectoryPage;
use crate::views::home::HomePage;
use crate::views::join::JoinPage;
use crate::views::map::MapWrapper;
use crate::views::not_found::NotFound;
use crate::views::qr::VenuePage;
use crate::views::venue_owner::OwnerDashboard;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <link
                    rel="stylesheet"
                    href="https://unpkg.com/leaflet@1.9.3/dist/leaflet.css"
                />
                <script
                    src="https://unpkg.com/leaflet@1.9.3/dist/leaflet.js"
                    defer
                ></script>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Decoded once from the stored token and passed down explicitly; the
    // server re-verifies on every authorized call.
    let session = use_session();

    view! {
        <Stylesheet id="leptos" href="/pkg/havenmap.css"/>

        <Title text="Havenmap"/>

        <ConfigProvider>
            <Router>
                <Navbar session=session />
                <main>
                    <Routes fallback=NotFound>
                        <Route path=path!("") view=HomePage />
                        <Route
                            path=path!("directory")
                            view=move || view! { <DirectoryPage session=session /> }
                        />
                        <Route path=path!("map") view=MapWrapper />
                        <Route
                            path=path!("venues/:slug")
                            view=move || view! { <VenuePage session=session /> }
                        />
                        <Route
                            path=path!("qr/:slug")
                            view=move || view! { <VenuePage session=session /> }
                        />
                        <Route path=path!("pages/:slug") view=|| view! { <ContentPageView /> } />
                        <Route
                            path=path!("resources")
                            view=|| view! { <ContentPageView slug="resources" /> }
                        />
                        <Route
                            path=path!("code-of-conduct")
                            view=|| view! { <ContentPageView slug="code-of-conduct" /> }
                        />
                        <Route
                            path=path!("join")
                            view=move || view! { <JoinPage session=session /> }
                        />
                        <Route
                            path=path!("auth")
                            view=move || view! { <AuthPage session=session /> }
                        />
                        <Route
                            path=path!("venue-owner/auth")
                            view=move || view! { <AuthPage session=session for_owners=true /> }
                        />
                        <Route
                            path=path!("account")
                            view=move || view! { <AccountPage session=session /> }
                        />
                        <Route
                            path=path!("venue-owner/dashboard")
                            view=move || view! { <OwnerDashboard session=session /> }
                        />
                        <Route
                            path=path!("owner")
                            view=move || view! { <OwnerDashboard session=session /> }
                        />
                        <Route
                            path=path!("admin")
                            view=move || view! { <AdminDashboard session=session /> }
                        />
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
