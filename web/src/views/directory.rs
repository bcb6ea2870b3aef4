use leptos::prelude::*;
use shared_types::{filter_venues_with_distance, SearchFilters, VenueSummary};

use crate::components::error::ErrorView;
use crate::components::filter_panel::{feature_label, FilterPanel};
use crate::components::loading::LoadingView;
use crate::components::reviews::{star_row, ReviewForm, ReviewList};
use crate::server::{fetch_venue_reviews, fetch_venues};
use crate::utils::auth::AuthSession;

/// The browsable venue list. Filtering runs entirely client-side against
/// the published set; distances appear once a location is chosen.
#[component]
pub fn DirectoryPage(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    let filters = RwSignal::new(SearchFilters::default());
    let venues = Resource::new(|| (), |_| async { fetch_venues().await });

    let all_venues = Memo::new(move |_| match venues.get() {
        Some(Ok(venues)) => venues,
        _ => Vec::new(),
    });

    let visible = Memo::new(move |_| filter_venues_with_distance(&all_venues.get(), &filters.get()));

    let business_types = Signal::derive(move || {
        let mut types: Vec<String> = all_venues
            .get()
            .iter()
            .map(|v| v.business_type.clone())
            .collect();
        types.sort();
        types.dedup();
        types
    });
    let features = Signal::derive(move || {
        let mut features: Vec<String> = all_venues
            .get()
            .iter()
            .flat_map(|v| v.features.iter().cloned())
            .collect();
        features.sort();
        features.dedup();
        features
    });

    view! {
        <div class="directory">
            <aside class="directory__sidebar">
                <FilterPanel filters=filters business_types=business_types features=features />
            </aside>

            <div class="directory__results">
                <Suspense fallback=move || {
                    view! { <LoadingView message=Some("Loading venues...".to_string()) /> }
                }>
                    {move || match venues.get() {
                        Some(Err(_)) => {
                            view! {
                                <ErrorView message=Some(
                                    "Couldn't load venues, please try again.".to_string(),
                                ) />
                            }
                                .into_any()
                        }
                        Some(Ok(_)) => {
                            let shown = visible.get();
                            if shown.is_empty() {
                                view! {
                                    <p class="directory__empty">
                                        "No venues match these filters. Try widening the search."
                                    </p>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <ul class="directory__list">
                                        {shown
                                            .into_iter()
                                            .map(|(venue, distance)| {
                                                view! {
                                                    <VenueCard
                                                        venue=venue
                                                        distance=distance
                                                        session=session
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                                    .into_any()
                            }
                        }
                        None => {
                            view! {
                                <LoadingView message=Some("Loading venues...".to_string()) />
                            }
                                .into_any()
                        }
                    }}
                </Suspense>
            </div>
        </div>
    }
}

/// One directory entry. Reviews load on demand when the card is expanded,
/// not with the list.
#[component]
fn VenueCard(
    venue: VenueSummary,
    distance: Option<f64>,
    session: RwSignal<Option<AuthSession>>,
) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let venue_id = venue.id;

    let reviews = Resource::new(
        move || expanded.get(),
        move |expanded| async move {
            if expanded {
                fetch_venue_reviews(venue_id).await.map(Some)
            } else {
                Ok(None)
            }
        },
    );

    let rating_summary = venue
        .average_rating
        .map(|r| format!("{} {:.1} ({} reviews)", star_row(r.round() as i32), r, venue.review_count))
        .unwrap_or_else(|| "No reviews yet".to_string());
    let distance_badge = distance.map(|d| format!("{d:.1} km away"));
    let feature_tags = venue
        .features
        .iter()
        .map(|f| feature_label(f))
        .collect::<Vec<_>>();

    view! {
        <li class="venue-card">
            <div class="venue-card__header">
                <h3 class="venue-card__name">
                    <a href=format!("/venues/{}", venue.slug)>{venue.name.clone()}</a>
                </h3>
                <span class="venue-card__type">{feature_label(&venue.business_type)}</span>
                {distance_badge
                    .map(|badge| view! { <span class="venue-card__distance">{badge}</span> })}
            </div>
            <p class="venue-card__address">
                {format!("{}, {} {}", venue.address, venue.city, venue.postcode)}
            </p>
            <p class="venue-card__rating">{rating_summary}</p>
            {(!feature_tags.is_empty())
                .then(|| {
                    view! {
                        <ul class="venue-card__features">
                            {feature_tags
                                .into_iter()
                                .map(|tag| view! { <li class="venue-card__feature">{tag}</li> })
                                .collect_view()}
                        </ul>
                    }
                })}
            <button
                class="venue-card__toggle"
                on:click=move |_| expanded.update(|e| *e = !*e)
            >
                {move || if expanded.get() { "Hide reviews" } else { "Show reviews" }}
            </button>

            <Show when=move || expanded.get()>
                <div class="venue-card__reviews">
                    <Suspense fallback=move || view! { <LoadingView message=None /> }>
                        {move || {
                            reviews
                                .get()
                                .map(|result| match result {
                                    Ok(Some(reviews)) => {
                                        view! { <ReviewList reviews=reviews /> }.into_any()
                                    }
                                    Ok(None) => view! {}.into_any(),
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
                </div>
            </Show>
        </li>
    }
}
