use leptos::prelude::*;

use shared_types::{LocationResult, SearchFilters};

use crate::components::location_search::LocationSearch;

/// Human-readable label for a snake_case feature key.
pub fn feature_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    for (i, part) in key.split('_').enumerate() {
        if i > 0 {
            label.push(' ');
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                label.extend(first.to_uppercase());
            } else {
                label.push(first);
            }
            label.push_str(chars.as_str());
        }
    }
    label
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

/// Sidebar filter controls for the directory and map screens. The radius
/// slider only appears once a location is selected; without one distance
/// filtering is off entirely.
#[component]
pub fn FilterPanel(
    filters: RwSignal<SearchFilters>,
    business_types: Signal<Vec<String>>,
    features: Signal<Vec<String>>,
) -> impl IntoView {
    let on_location = move |location: Option<LocationResult>| {
        filters.update(|f| f.location = location);
    };

    // Bumped on reset so the search box drops its text along with the
    // location it had published into the filters.
    let location_reset = RwSignal::new(0u32);

    view! {
        <div class="filter-panel">
            <div class="filter-panel__section">
                <label class="filter-panel__label">"Search"</label>
                <input
                    type="text"
                    class="filter-panel__query"
                    placeholder="Venue name or address..."
                    prop:value=move || filters.get().query
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| f.query = value);
                    }
                />
            </div>

            <div class="filter-panel__section">
                <label class="filter-panel__label">"Near"</label>
                <LocationSearch on_location_selected=on_location reset=location_reset />
                <Show when=move || filters.get().location.is_some()>
                    <div class="filter-panel__radius">
                        <label class="filter-panel__label">
                            {move || format!("Within {:.0} km", filters.get().distance_km)}
                        </label>
                        <input
                            type="range"
                            min="1"
                            max="100"
                            step="1"
                            prop:value=move || format!("{:.0}", filters.get().distance_km)
                            on:input=move |ev| {
                                if let Ok(radius) = event_target_value(&ev).parse::<f64>() {
                                    filters.update(|f| f.distance_km = radius);
                                }
                            }
                        />
                    </div>
                </Show>
            </div>

            <div class="filter-panel__section">
                <label class="filter-panel__label">"Venue type"</label>
                <For
                    each=move || business_types.get()
                    key=|t| t.clone()
                    children=move |business_type: String| {
                        let value = business_type.clone();
                        let checked_value = business_type.clone();
                        view! {
                            <label class="filter-panel__checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || {
                                        filters.get().business_types.contains(&checked_value)
                                    }
                                    on:change=move |_| {
                                        let value = value.clone();
                                        filters.update(|f| toggle(&mut f.business_types, &value));
                                    }
                                />
                                {feature_label(&business_type)}
                            </label>
                        }
                    }
                />
            </div>

            <div class="filter-panel__section">
                <label class="filter-panel__label">"Features"</label>
                <For
                    each=move || features.get()
                    key=|f| f.clone()
                    children=move |feature: String| {
                        let value = feature.clone();
                        let checked_value = feature.clone();
                        view! {
                            <label class="filter-panel__checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || {
                                        filters.get().features.contains(&checked_value)
                                    }
                                    on:change=move |_| {
                                        let value = value.clone();
                                        filters.update(|f| toggle(&mut f.features, &value));
                                    }
                                />
                                {feature_label(&feature)}
                            </label>
                        }
                    }
                />
            </div>

            <Show when=move || !filters.get().is_empty()>
                <button
                    class="filter-panel__reset"
                    on:click=move |_| {
                        filters.set(SearchFilters::default());
                        location_reset.update(|n| *n += 1);
                    }
                >
                    "Reset filters"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{feature_label, toggle};

    #[test]
    fn feature_labels_read_naturally() {
        assert_eq!(feature_label("gender_neutral_toilets"), "Gender neutral toilets");
        assert_eq!(feature_label("quiet_space"), "Quiet space");
        assert_eq!(feature_label("pub"), "Pub");
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut list = Vec::new();
        toggle(&mut list, "quiet_space");
        assert_eq!(list, vec!["quiet_space".to_string()]);
        toggle(&mut list, "quiet_space");
        assert!(list.is_empty());
    }
}
