use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::loading::LoadingView;
use crate::server::{fetch_directory_stats, fetch_sponsors};

/// Landing page: hero, directory stats and the active sponsor strip.
#[component]
pub fn HomePage() -> impl IntoView {
    let stats = Resource::new(|| (), |_| async { fetch_directory_stats().await });
    let sponsors = Resource::new(|| (), |_| async { fetch_sponsors().await });

    view! {
        <div class="home">
            <section class="home__hero">
                <h1>"Find places that welcome you"</h1>
                <p>
                    "Havenmap is a community directory of venues across the UK that are "
                    "welcoming to trans and gender-diverse people, reviewed by the people "
                    "who visit them."
                </p>
                <div class="home__hero-actions">
                    <A href="/directory" attr:class="home__cta">
                        "Browse the directory"
                    </A>
                    <A href="/map" attr:class="home__cta home__cta--secondary">
                        "Open the map"
                    </A>
                </div>
            </section>

            <section class="home__stats">
                <Suspense fallback=move || view! { <LoadingView message=None /> }>
                    {move || {
                        stats
                            .get()
                            .map(|result| match result {
                                Ok(stats) => {
                                    view! {
                                        <div class="home__stat-row">
                                            <div class="home__stat">
                                                <span class="home__stat-number">
                                                    {stats.venue_count}
                                                </span>
                                                <span class="home__stat-label">"venues listed"</span>
                                            </div>
                                            <div class="home__stat">
                                                <span class="home__stat-number">
                                                    {stats.review_count}
                                                </span>
                                                <span class="home__stat-label">
                                                    "community reviews"
                                                </span>
                                            </div>
                                            <div class="home__stat">
                                                <span class="home__stat-number">
                                                    {stats.city_count}
                                                </span>
                                                <span class="home__stat-label">"towns and cities"</span>
                                            </div>
                                        </div>
                                    }
                                        .into_any()
                                }
                                Err(_) => view! { <div class="home__stat-row"></div> }.into_any(),
                            })
                    }}
                </Suspense>
            </section>

            <section class="home__sponsors">
                <Suspense fallback=|| ()>
                    {move || {
                        sponsors
                            .get()
                            .and_then(|result| result.ok())
                            .filter(|sponsors| !sponsors.is_empty())
                            .map(|sponsors| {
                                view! {
                                    <div class="home__sponsor-strip">
                                        <h2>"Supported by"</h2>
                                        <ul>
                                            {sponsors
                                                .into_iter()
                                                .map(|sponsor| {
                                                    let inner = view! {
                                                        <span class="home__sponsor-name">
                                                            {sponsor.name.clone()}
                                                        </span>
                                                    };
                                                    match sponsor.website.clone() {
                                                        Some(url) => view! {
                                                            <li>
                                                                <a href=url target="_blank" rel="noopener">
                                                                    {inner}
                                                                </a>
                                                            </li>
                                                        }
                                                            .into_any(),
                                                        None => view! { <li>{inner}</li> }.into_any(),
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    </div>
                                }
                            })
                    }}
                </Suspense>
            </section>
        </div>
    }
}
