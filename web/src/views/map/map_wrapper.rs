use leptos::prelude::*;
use shared_types::{filter_venues, LatLong, SearchFilters, VenueSummary};

use crate::components::error::ErrorView;
use crate::components::filter_panel::FilterPanel;
use crate::components::loading::LoadingView;
use crate::server::{fetch_map_backend, fetch_venues};

use super::map_renderer::MapRenderer;
use super::svg_renderer::SvgRenderer;

// Roughly the middle of Great Britain; used until a location is chosen.
const DEFAULT_CENTER: LatLong = LatLong { lat: 54.0, long: -2.5 };

/// The map screen. Picks the configured backend once at load, then feeds
/// the same filtered venue list to whichever renderer is active.
#[component]
pub fn MapWrapper() -> impl IntoView {
    let filters = RwSignal::new(SearchFilters::default());

    let venues = Resource::new(|| (), |_| async { fetch_venues().await });
    let backend = Resource::new(|| (), |_| async { fetch_map_backend().await });

    let all_venues = Memo::new(move |_| match venues.get() {
        Some(Ok(venues)) => venues,
        _ => Vec::new(),
    });

    let filtered: Signal<Vec<VenueSummary>> =
        Signal::derive(move || filter_venues(&all_venues.get(), &filters.get()));

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

    let center = Signal::derive(move || {
        filters
            .get()
            .location
            .map(|l| l.coords)
            .unwrap_or(DEFAULT_CENTER)
    });

    view! {
        <div class="map-page">
            <aside class="map-page__sidebar">
                <FilterPanel filters=filters business_types=business_types features=features />
            </aside>
            <div class="map-page__canvas">
                <Suspense fallback=move || {
                    view! { <LoadingView message=Some("Loading the map...".to_string()) /> }
                }>
                    {move || match (venues.get(), backend.get()) {
                        (Some(Err(_)), _) => {
                            view! {
                                <ErrorView message=Some(
                                    "Couldn't load venues for the map.".to_string(),
                                ) />
                            }
                                .into_any()
                        }
                        (Some(Ok(_)), Some(backend)) => {
                            let backend = backend.unwrap_or_else(|_| "tiles".to_string());
                            if backend == "svg" {
                                view! { <SvgRenderer venues=filtered /> }.into_any()
                            } else {
                                view! { <MapRenderer venues=filtered center=center /> }
                                    .into_any()
                            }
                        }
                        _ => {
                            view! {
                                <LoadingView message=Some("Loading the map...".to_string()) />
                            }
                                .into_any()
                        }
                    }}
                </Suspense>
            </div>
        </div>
    }
}
