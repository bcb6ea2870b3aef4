use leptos::prelude::*;
use shared_types::VenueSummary;

use super::projection::{projectable_venues, venue_type_color};

/// Tile-free fallback backend: venues drawn as dots on a fixed-viewBox
/// canvas using the shared projection. No panning or zooming; selection
/// still works.
#[component]
pub fn SvgRenderer(venues: Signal<Vec<VenueSummary>>) -> impl IntoView {
    let selected = RwSignal::new(Option::<VenueSummary>::None);

    view! {
        <div class="svg-map">
            <svg
                class="svg-map__canvas"
                viewBox="0 0 100 100"
                preserveAspectRatio="xMidYMid meet"
            >
                <rect x="0" y="0" width="100" height="100" class="svg-map__background" />
                {move || {
                    projectable_venues(&venues.get())
                        .into_iter()
                        .map(|(venue, (x, y))| {
                            let color = venue_type_color(&venue.business_type);
                            let title = format!("{}, {}", venue.name, venue.city);
                            let choice = venue.clone();
                            view! {
                                <circle
                                    cx=format!("{x:.2}")
                                    cy=format!("{y:.2}")
                                    r="1.4"
                                    fill=color
                                    stroke="#ffffff"
                                    stroke-width="0.3"
                                    class="svg-map__marker"
                                    on:click=move |_| selected.set(Some(choice.clone()))
                                >
                                    <title>{title}</title>
                                </circle>
                            }
                        })
                        .collect_view()
                }}
            </svg>

            {move || {
                selected
                    .get()
                    .map(|venue| {
                        let rating = venue
                            .average_rating
                            .map(|r| format!("{:.1} stars ({} reviews)", r, venue.review_count))
                            .unwrap_or_else(|| "No reviews yet".to_string());
                        view! {
                            <div class="svg-map__card">
                                <h3>{venue.name.clone()}</h3>
                                <p>{venue.address.clone()}</p>
                                <p>{rating}</p>
                                <a href=format!("/venues/{}", venue.slug)>"View venue"</a>
                                <button on:click=move |_| selected.set(None)>"Close"</button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
