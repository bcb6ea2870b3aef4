use leptos::{prelude::*, task::spawn_local};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Position, PositionError, PositionOptions};

use shared_types::LocationResult;

use crate::server::geocode_search;
use crate::utils::geolocation::{current_location_result, geolocation_error_message};
use crate::utils::stale::LatestTicket;

const DEBOUNCE_MS: u64 = 300;
const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;
const GEOLOCATION_MAX_AGE_MS: u32 = 300_000;

/// True when a bump of the reset counter should wipe the search box. The
/// first observation is the mount itself, not a reset.
fn should_clear(prev: Option<u32>, tick: u32) -> bool {
    prev.is_some_and(|p| p != tick)
}

/// Place-name search box backed by the server-side geocoding proxy.
///
/// Keystrokes are debounced and each lookup carries a ticket; a response
/// may only publish while its ticket is still the latest, so a slow early
/// response never overwrites a later one. The pin button uses browser
/// geolocation instead. Bumping `reset` clears the box from outside, for
/// when the owning panel drops the whole filter set at once.
#[component]
pub fn LocationSearch<F>(
    on_location_selected: F,
    #[prop(into)] reset: Signal<u32>,
) -> impl IntoView
where
    F: Fn(Option<LocationResult>) + 'static + Copy + Send + Sync,
{
    let search_input = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<LocationResult>::new());
    let show_results = RwSignal::new(false);
    let is_searching = RwSignal::new(false);
    let is_degraded = RwSignal::new(false);
    let search_error = RwSignal::new(Option::<String>::None);
    let selected_label = RwSignal::new(Option::<String>::None);

    let tickets = StoredValue::new_local(LatestTicket::new());

    let run_search = move |query: String| {
        let query = query.trim().to_string();
        if query.chars().count() < 2 {
            results.set(Vec::new());
            show_results.set(false);
            is_searching.set(false);
            return;
        }

        let ticket = tickets.with_value(|t| t.issue());
        is_searching.set(true);
        search_error.set(None);

        set_timeout(
            move || {
                if !tickets.with_value(|t| t.is_current(ticket)) {
                    return;
                }
                spawn_local(async move {
                    let response = geocode_search(query.clone()).await;
                    if !tickets.with_value(|t| t.is_current(ticket)) {
                        return;
                    }
                    match response {
                        Ok(response) => {
                            is_degraded.set(response.degraded);
                            if response.results.is_empty() {
                                search_error
                                    .set(Some(format!("No places found for '{}'", query)));
                                results.set(Vec::new());
                                show_results.set(false);
                            } else {
                                results.set(response.results);
                                show_results.set(true);
                            }
                        }
                        Err(_) => {
                            search_error
                                .set(Some("Place search failed, please try again".to_string()));
                            results.set(Vec::new());
                            show_results.set(false);
                        }
                    }
                    is_searching.set(false);
                });
            },
            std::time::Duration::from_millis(DEBOUNCE_MS),
        );
    };

    let pick = move |location: LocationResult| {
        selected_label.set(Some(location.address.clone()));
        search_input.set(location.address.clone());
        show_results.set(false);
        on_location_selected(Some(location));
    };

    let clear_state = move || {
        // Invalidate anything still in flight before dropping the selection.
        tickets.with_value(|t| t.issue());
        search_input.set(String::new());
        results.set(Vec::new());
        show_results.set(false);
        search_error.set(None);
        selected_label.set(None);
        is_searching.set(false);
        on_location_selected(None);
    };
    let clear = move |_| clear_state();

    Effect::new(move |prev: Option<u32>| {
        let tick = reset.get();
        if should_clear(prev, tick) {
            clear_state();
        }
        tick
    });

    let use_current_location = move |_| {
        search_error.set(None);

        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(geolocation) = window.navigator().geolocation() else {
            search_error.set(Some(
                "Location isn't available in this browser. Search by place name instead."
                    .to_string(),
            ));
            return;
        };

        is_searching.set(true);

        let on_success = Closure::<dyn FnMut(Position)>::new(move |position: Position| {
            let coords = position.coords();
            is_searching.set(false);
            pick(current_location_result(coords.latitude(), coords.longitude()));
        });
        let on_error = Closure::<dyn FnMut(PositionError)>::new(move |error: PositionError| {
            is_searching.set(false);
            search_error.set(Some(geolocation_error_message(error.code()).to_string()));
        });

        let options = PositionOptions::new();
        options.set_timeout(GEOLOCATION_TIMEOUT_MS);
        options.set_maximum_age(GEOLOCATION_MAX_AGE_MS);

        if geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &options,
            )
            .is_err()
        {
            is_searching.set(false);
            search_error.set(Some(
                "Location isn't available in this browser. Search by place name instead."
                    .to_string(),
            ));
        }

        // The browser holds the callbacks until the request settles.
        on_success.forget();
        on_error.forget();
    };

    let handle_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());
        selected_label.set(None);
        run_search(value);
    };

    view! {
        <div class="location-search">
            <div class="location-search__input-row">
                <input
                    type="text"
                    class="location-search__input"
                    placeholder="Town, city or postcode..."
                    prop:value=move || search_input.get()
                    on:input=handle_input
                    on:blur=move |_| {
                        // Delay so a click on a result still lands.
                        set_timeout(
                            move || show_results.set(false),
                            std::time::Duration::from_millis(200),
                        );
                    }
                />
                <button
                    class="location-search__gps-button"
                    title="Use my location"
                    on:click=use_current_location
                >
                    "Use my location"
                </button>
                <Show when=move || selected_label.get().is_some()>
                    <button class="location-search__clear-button" on:click=clear>
                        "Clear"
                    </button>
                </Show>
            </div>

            <Show when=move || is_searching.get()>
                <div class="location-search__status">"Searching..."</div>
            </Show>

            <Show when=move || is_degraded.get()>
                <div class="location-search__degraded">
                    "Live place search is unavailable; showing major cities only."
                </div>
            </Show>

            {move || {
                search_error
                    .get()
                    .map(|error| view! { <div class="location-search__error">{error}</div> })
            }}

            <Show when=move || show_results.get() && !results.get().is_empty()>
                <ul class="location-search__results">
                    <For
                        each=move || results.get()
                        key=|location| (location.name.clone(), location.address.clone())
                        children=move |location: LocationResult| {
                            let choice = location.clone();
                            view! {
                                <li
                                    class="location-search__result"
                                    on:mousedown=move |_| pick(choice.clone())
                                >
                                    <span class="location-search__result-name">
                                        {location.name.clone()}
                                    </span>
                                    <span class="location-search__result-address">
                                        {location.address.clone()}
                                    </span>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::should_clear;

    #[test]
    fn mount_does_not_clear_the_box() {
        assert!(!should_clear(None, 0));
    }

    #[test]
    fn every_counter_bump_clears_once() {
        assert!(should_clear(Some(0), 1));
        assert!(should_clear(Some(1), 2));
        assert!(!should_clear(Some(2), 2));
    }
}
