use leptos::prelude::*;
use leptos_leaflet::{leaflet::Map, prelude::*};
use shared_types::{LatLong, VenueSummary};
use thaw::{Label, LabelSize};

use super::projection::venue_type_color;

/// Tile-backed map. Markers are inline SVG pins colored by venue type;
/// venues without coordinates simply don't appear here.
#[component]
pub fn MapRenderer(
    venues: Signal<Vec<VenueSummary>>,
    center: Signal<LatLong>,
) -> impl IntoView {
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);

    let position: Memo<Position> = Memo::new(move |_| {
        let LatLong { lat, long } = center.get();
        Position::new(lat, long)
    });

    Effect::new(move |_| {
        let new_pos = position.get();
        if let Some(map) = map.get_untracked() {
            map.set_view(&new_pos.as_lat_lng(), map.get_zoom());
        }
    });

    view! {
        <MapContainer
            style="height: 100%; width: 100%; flex: 1"
            center=position.get()
            zoom=6.0
            set_view=true
            map=map.write_only()
        >
            <TileLayer
                url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            />
            {move || {
                venues
                    .get()
                    .into_iter()
                    .filter_map(|venue| {
                        let coords = venue.coords().filter(|c| c.is_valid())?;
                        let fill = venue_type_color(&venue.business_type).replace('#', "%23");
                        let icon_svg = format!(
                            "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='28' height='42' viewBox='0 0 28 42'%3E%3Cpath fill='{}' stroke='%23ffffff' stroke-width='1.5' d='M14 2C8.5 2 4 6.5 4 12c0 8.5 10 26 10 26s10-17.5 10-26c0-5.5-4.5-10-10-10zm0 13.5c-1.9 0-3.5-1.6-3.5-3.5s1.6-3.5 3.5-3.5 3.5 1.6 3.5 3.5-1.6 3.5-3.5 3.5z'/%3E%3C/svg%3E",
                            fill
                        );
                        let rating = venue
                            .average_rating
                            .map(|r| format!("{:.1} stars ({} reviews)", r, venue.review_count))
                            .unwrap_or_else(|| "No reviews yet".to_string());

                        Some(view! {
                            <Marker
                                position=Position::new(coords.lat, coords.long)
                                draggable=false
                                icon_url=Some(icon_svg)
                                icon_size=Some((28.0, 42.0))
                                icon_anchor=Some((14.0, 42.0))
                            >
                                <Popup>
                                    <Label size=LabelSize::Large>{venue.name.clone()}</Label>
                                    <p>{venue.address.clone()}</p>
                                    <p>{rating}</p>
                                    <a href=format!("/venues/{}", venue.slug)>"View venue"</a>
                                </Popup>
                            </Marker>
                        })
                    })
                    .collect_view()
            }}
        </MapContainer>
    }
}
