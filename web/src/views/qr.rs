use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::error::ErrorView;
use crate::components::filter_panel::feature_label;
use crate::components::loading::LoadingView;
use crate::components::reviews::{star_row, ReviewForm, ReviewList};
use crate::server::{fetch_venue, fetch_venue_reviews};
use crate::utils::auth::AuthSession;

/// Standalone venue card, reached from the directory, the map popups and
/// the printable QR codes venues put up on site. Served at both
/// `/venues/:slug` and `/qr/:slug`.
#[component]
pub fn VenuePage(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    let params = use_params_map();
    let slug = Memo::new(move |_| params.get().get("slug").unwrap_or_default());

    let venue = Resource::new(
        move || slug.get(),
        |slug| async move { fetch_venue(slug).await },
    );

    view! {
        <div class="venue-page">
            <Suspense fallback=move || {
                view! { <LoadingView message=Some("Loading venue...".to_string()) /> }
            }>
                {move || {
                    venue
                        .get()
                        .map(|result| match result {
                            Ok(Some(venue)) => {
                                let venue_id = venue.id;
                                let rating = venue
                                    .average_rating
                                    .map(|r| {
                                        format!(
                                            "{} {:.1} ({} reviews)",
                                            star_row(r.round() as i32),
                                            r,
                                            venue.review_count,
                                        )
                                    })
                                    .unwrap_or_else(|| "No reviews yet".to_string());
                                let reviews = Resource::new(
                                    || (),
                                    move |_| async move { fetch_venue_reviews(venue_id).await },
                                );

                                view! {
                                    <article class="venue-page__card">
                                        {venue
                                            .logo_url
                                            .clone()
                                            .map(|url| {
                                                view! {
                                                    <img
                                                        class="venue-page__logo"
                                                        src=url
                                                        alt=format!("{} logo", venue.name)
                                                    />
                                                }
                                            })}
                                        <h1>{venue.name.clone()}</h1>
                                        <p class="venue-page__type">
                                            {feature_label(&venue.business_type)}
                                        </p>
                                        <p class="venue-page__rating">{rating}</p>
                                        <p class="venue-page__address">
                                            {format!(
                                                "{}, {} {}",
                                                venue.address,
                                                venue.city,
                                                venue.postcode,
                                            )}
                                        </p>
                                        <p class="venue-page__description">
                                            {venue.description.clone()}
                                        </p>
                                        {(!venue.features.is_empty())
                                            .then(|| {
                                                view! {
                                                    <ul class="venue-page__features">
                                                        {venue
                                                            .features
                                                            .iter()
                                                            .map(|f| {
                                                                view! { <li>{feature_label(f)}</li> }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                }
                                            })}
                                        <div class="venue-page__links">
                                            {venue
                                                .website
                                                .clone()
                                                .map(|url| {
                                                    view! {
                                                        <a href=url target="_blank" rel="noopener">
                                                            "Website"
                                                        </a>
                                                    }
                                                })}
                                            {venue
                                                .phone
                                                .clone()
                                                .map(|phone| {
                                                    view! {
                                                        <a href=format!(
                                                            "tel:{phone}",
                                                        )>{format!("Call {phone}")}</a>
                                                    }
                                                })}
                                        </div>

                                        <section class="venue-page__reviews">
                                            <h2>"Reviews"</h2>
                                            <Suspense fallback=move || {
                                                view! { <LoadingView message=None /> }
                                            }>
                                                {move || {
                                                    reviews
                                                        .get()
                                                        .map(|result| match result {
                                                            Ok(reviews) => {
                                                                view! { <ReviewList reviews=reviews /> }.into_any()
                                                            }
                                                            Err(_) => {
                                                                view! {
                                                                    <ErrorView message=Some(
                                                                        "Couldn't load reviews.".to_string(),
                                                                    ) />
                                                                }
                                                                    .into_any()
                                                            }
                                                        })
                                                }}
                                            </Suspense>
                                            <ReviewForm venue_id=venue_id session=session />
                                        </section>
                                    </article>
                                }
                                    .into_any()
                            }
                            Ok(None) => {
                                view! {
                                    <ErrorView message=Some(
                                        "This venue isn't listed, or its listing is being updated."
                                            .to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! {
                                    <ErrorView message=Some(
                                        "Couldn't load this venue.".to_string(),
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
