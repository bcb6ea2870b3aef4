use leptos::{prelude::*, task::spawn_local};
use wasm_bindgen::JsCast;

use crate::components::error::ErrorView;
use crate::components::filter_panel::feature_label;
use crate::components::loading::LoadingView;
use crate::components::reviews::star_row;
use crate::db::entities::Venue;
use crate::server_owner::{
    fetch_my_applications, fetch_my_venues, fetch_owner_reviews, reply_to_review,
    submit_venue_application, submit_venue_change, VenueApplicationForm,
};
use crate::utils::auth::AuthSession;

const BUSINESS_TYPES: &[&str] = &[
    "pub",
    "bar",
    "cafe",
    "restaurant",
    "shop",
    "community_space",
    "health",
    "other",
];

const FEATURE_OPTIONS: &[&str] = &[
    "gender_neutral_toilets",
    "staff_training",
    "quiet_space",
    "step_free_access",
    "community_events",
    "changing_facilities",
];

/// Owner home: applications, published venues and review replies in one
/// place. Signed-out or non-owner visitors get a sign-in prompt.
#[component]
pub fn OwnerDashboard(session: RwSignal<Option<AuthSession>>) -> impl IntoView {
    view! {
        <div class="owner-dashboard">
            {move || match session.get() {
                Some(auth) if auth.is_owner() => {
                    view! { <OwnerPanels token=auth.token.clone() /> }.into_any()
                }
                Some(_) => {
                    view! {
                        <ErrorView message=Some(
                            "This area is for venue owners. Sign up as an owner to submit a listing."
                                .to_string(),
                        ) />
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <p class="owner-dashboard__signin">
                            <a href="/auth">"Sign in"</a>
                            " with an owner account to manage your venues."
                        </p>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn OwnerPanels(token: String) -> impl IntoView {
    // Bumped after every successful write so the lists refetch.
    let refresh = RwSignal::new(0u32);

    let applications_token = token.clone();
    let applications = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = applications_token.clone();
            async move { fetch_my_applications(token).await }
        },
    );

    let venues_token = token.clone();
    let venues = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = venues_token.clone();
            async move { fetch_my_venues(token).await }
        },
    );

    let reviews_token = token.clone();
    let reviews = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = reviews_token.clone();
            async move { fetch_owner_reviews(token).await }
        },
    );

    let application_form_token = token.clone();
    let reply_token = token.clone();
    let change_token = token;

    view! {
        <h1>"Your venues"</h1>

        <section class="owner-dashboard__section">
            <h2>"Applications"</h2>
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    applications
                        .get()
                        .map(|result| match result {
                            Ok(applications) if applications.is_empty() => {
                                view! {
                                    <p>"No applications yet. Submit your first venue below."</p>
                                }
                                    .into_any()
                            }
                            Ok(applications) => {
                                view! {
                                    <ul class="owner-dashboard__applications">
                                        {applications
                                            .into_iter()
                                            .map(|app| {
                                                view! {
                                                    <li>
                                                        <span class="owner-dashboard__app-name">
                                                            {app.venue_name.clone()}
                                                        </span>
                                                        <span class=format!(
                                                            "owner-dashboard__status owner-dashboard__status--{}",
                                                            app.status,
                                                        )>{app.status.clone()}</span>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! {
                                    <ErrorView message=Some(
                                        "Couldn't load your applications.".to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
            <ApplicationForm token=application_form_token refresh=refresh />
        </section>

        <section class="owner-dashboard__section">
            <h2>"Published venues"</h2>
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    venues
                        .get()
                        .map(|result| match result {
                            Ok(venues) if venues.is_empty() => {
                                view! { <p>"Nothing published yet."</p> }.into_any()
                            }
                            Ok(venues) => {
                                view! {
                                    <ul class="owner-dashboard__venues">
                                        {venues
                                            .into_iter()
                                            .map(|venue| {
                                                view! {
                                                    <VenueEditor
                                                        venue=venue
                                                        token=change_token.clone()
                                                        refresh=refresh
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! {
                                    <ErrorView message=Some(
                                        "Couldn't load your venues.".to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </section>

        <section class="owner-dashboard__section">
            <h2>"Recent reviews"</h2>
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    reviews
                        .get()
                        .map(|result| match result {
                            Ok(reviews) if reviews.is_empty() => {
                                view! { <p>"No reviews on your venues yet."</p> }.into_any()
                            }
                            Ok(reviews) => {
                                view! {
                                    <ul class="owner-dashboard__reviews">
                                        {reviews
                                            .into_iter()
                                            .map(|review| {
                                                view! {
                                                    <ReviewReplyCard
                                                        review_id=review.id
                                                        author=review.author_name.clone()
                                                        rating=review.rating
                                                        body=review.body.clone()
                                                        token=reply_token.clone()
                                                        refresh=refresh
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                                    .into_any()
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
        </section>
    }
}

/// New venue application. The logo file is read client-side and sent as
/// bytes; the server checks the content before storing anything.
#[component]
fn ApplicationForm(token: String, refresh: RwSignal<u32>) -> impl IntoView {
    let venue_name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let business_type = RwSignal::new("pub".to_string());
    let features = RwSignal::new(Vec::<String>::new());
    let address = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let postcode = RwSignal::new(String::new());
    let website = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let logo_bytes = StoredValue::new_local(Option::<Vec<u8>>::None);

    let status = RwSignal::new(Option::<Result<(), String>>::None);
    let is_submitting = RwSignal::new(false);

    let on_logo_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            logo_bytes.set_value(None);
            return;
        };
        spawn_local(async move {
            if let Ok(buffer) = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                logo_bytes.set_value(Some(bytes));
            }
        });
    };

    let submit = move |_| {
        let token = token.clone();
        let form = VenueApplicationForm {
            venue_name: venue_name.get(),
            description: description.get(),
            business_type: business_type.get(),
            features: features.get(),
            address: address.get(),
            city: city.get(),
            postcode: postcode.get(),
            lat: None,
            long: None,
            website: {
                let url = website.get();
                (!url.trim().is_empty()).then(|| url.trim().to_string())
            },
            phone: {
                let number = phone.get();
                (!number.trim().is_empty()).then(|| number.trim().to_string())
            },
        };
        let logo = logo_bytes.get_value();

        is_submitting.set(true);
        status.set(None);
        spawn_local(async move {
            match submit_venue_application(token, form, logo).await {
                Ok(_) => {
                    status.set(Some(Ok(())));
                    venue_name.set(String::new());
                    description.set(String::new());
                    features.set(Vec::new());
                    address.set(String::new());
                    city.set(String::new());
                    postcode.set(String::new());
                    website.set(String::new());
                    phone.set(String::new());
                    logo_bytes.set_value(None);
                    refresh.update(|n| *n += 1);
                }
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
            is_submitting.set(false);
        });
    };

    view! {
        <details class="application-form">
            <summary>"Submit a new venue"</summary>
            <div class="application-form__fields">
                <input
                    type="text"
                    placeholder="Venue name"
                    prop:value=move || venue_name.get()
                    on:input=move |ev| venue_name.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="Describe your venue and what makes it welcoming."
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <select on:change=move |ev| business_type.set(event_target_value(&ev))>
                    {BUSINESS_TYPES
                        .iter()
                        .map(|t| {
                            view! {
                                <option value=*t selected=*t == "pub">
                                    {feature_label(t)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <fieldset class="application-form__features">
                    <legend>"Features"</legend>
                    {FEATURE_OPTIONS
                        .iter()
                        .map(|feature| {
                            let key = feature.to_string();
                            let checked_key = feature.to_string();
                            view! {
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || {
                                            features.get().contains(&checked_key)
                                        }
                                        on:change=move |_| {
                                            let key = key.clone();
                                            features
                                                .update(|list| {
                                                    if let Some(pos) = list.iter().position(|f| *f == key) {
                                                        list.remove(pos);
                                                    } else {
                                                        list.push(key);
                                                    }
                                                });
                                        }
                                    />
                                    {feature_label(feature)}
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>
                <input
                    type="text"
                    placeholder="Street address"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Town or city"
                    prop:value=move || city.get()
                    on:input=move |ev| city.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Postcode"
                    prop:value=move || postcode.get()
                    on:input=move |ev| postcode.set(event_target_value(&ev))
                />
                <input
                    type="url"
                    placeholder="Website (optional)"
                    prop:value=move || website.get()
                    on:input=move |ev| website.set(event_target_value(&ev))
                />
                <input
                    type="tel"
                    placeholder="Phone (optional)"
                    prop:value=move || phone.get()
                    on:input=move |ev| phone.set(event_target_value(&ev))
                />
                <label class="application-form__logo">
                    "Logo (JPEG, PNG, WebP or GIF, up to 5 MB)"
                    <input type="file" accept="image/*" on:change=on_logo_change />
                </label>
                <button
                    disabled=move || {
                        is_submitting.get() || venue_name.get().trim().is_empty()
                            || address.get().trim().is_empty()
                    }
                    on:click=submit
                >
                    {move || {
                        if is_submitting.get() { "Submitting..." } else { "Submit application" }
                    }}
                </button>
                {move || {
                    status
                        .get()
                        .map(|result| match result {
                            Ok(()) => {
                                view! {
                                    <p class="application-form__ok">
                                        "Application received. We'll review it shortly."
                                    </p>
                                }
                                    .into_any()
                            }
                            Err(message) => {
                                view! { <p class="application-form__error">{message}</p> }
                                    .into_any()
                            }
                        })
                }}
            </div>
        </details>
    }
}

/// Inline editor for a published venue. Saving sends only the changed
/// fields; the venue goes offline until a moderator approves them.
#[component]
fn VenueEditor(venue: Venue, token: String, refresh: RwSignal<u32>) -> impl IntoView {
    let venue_id = venue.id;
    let name = RwSignal::new(venue.name.clone());
    let description = RwSignal::new(venue.description.clone());
    let address = RwSignal::new(venue.address.clone());
    let phone = RwSignal::new(venue.phone.clone().unwrap_or_default());
    let website = RwSignal::new(venue.website.clone().unwrap_or_default());

    let original = StoredValue::new(venue.clone());
    let status = RwSignal::new(Option::<Result<(), String>>::None);
    let is_submitting = RwSignal::new(false);

    let submit = move |_| {
        let before = original.get_value();
        let mut changes = serde_json::Map::new();
        if name.get() != before.name {
            changes.insert("name".to_string(), name.get().into());
        }
        if description.get() != before.description {
            changes.insert("description".to_string(), description.get().into());
        }
        if address.get() != before.address {
            changes.insert("address".to_string(), address.get().into());
        }
        if phone.get() != before.phone.unwrap_or_default() {
            changes.insert("phone".to_string(), phone.get().into());
        }
        if website.get() != before.website.unwrap_or_default() {
            changes.insert("website".to_string(), website.get().into());
        }
        if changes.is_empty() {
            status.set(Some(Err("Nothing changed".to_string())));
            return;
        }

        let token = token.clone();
        is_submitting.set(true);
        status.set(None);
        spawn_local(async move {
            match submit_venue_change(token, venue_id, serde_json::Value::Object(changes)).await {
                Ok(_) => {
                    status.set(Some(Ok(())));
                    refresh.update(|n| *n += 1);
                }
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
            is_submitting.set(false);
        });
    };

    view! {
        <li class="venue-editor">
            <details>
                <summary>
                    {venue.name.clone()}
                    {(!venue.is_active)
                        .then(|| {
                            view! {
                                <span class="venue-editor__offline">
                                    " (offline pending review)"
                                </span>
                            }
                        })}
                </summary>
                <div class="venue-editor__fields">
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                    <input
                        type="text"
                        prop:value=move || address.get()
                        on:input=move |ev| address.set(event_target_value(&ev))
                    />
                    <input
                        type="tel"
                        placeholder="Phone"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                    <input
                        type="url"
                        placeholder="Website"
                        prop:value=move || website.get()
                        on:input=move |ev| website.set(event_target_value(&ev))
                    />
                    <p class="venue-editor__note">
                        "Edits are checked before they go live; your listing will be offline "
                        "until then."
                    </p>
                    <button disabled=move || is_submitting.get() on:click=submit>
                        {move || if is_submitting.get() { "Sending..." } else { "Submit changes" }}
                    </button>
                    {move || {
                        status
                            .get()
                            .map(|result| match result {
                                Ok(()) => {
                                    view! {
                                        <p class="venue-editor__ok">"Changes sent for review."</p>
                                    }
                                        .into_any()
                                }
                                Err(message) => {
                                    view! { <p class="venue-editor__error">{message}</p> }
                                        .into_any()
                                }
                            })
                    }}
                </div>
            </details>
        </li>
    }
}

#[component]
fn ReviewReplyCard(
    review_id: i64,
    author: String,
    rating: i32,
    body: String,
    token: String,
    refresh: RwSignal<u32>,
) -> impl IntoView {
    let reply_body = RwSignal::new(String::new());
    let status = RwSignal::new(Option::<Result<(), String>>::None);
    let is_submitting = RwSignal::new(false);

    let submit = move |_| {
        let token = token.clone();
        let reply = reply_body.get();

        is_submitting.set(true);
        status.set(None);
        spawn_local(async move {
            match reply_to_review(token, review_id, reply).await {
                Ok(()) => {
                    status.set(Some(Ok(())));
                    reply_body.set(String::new());
                    refresh.update(|n| *n += 1);
                }
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
            is_submitting.set(false);
        });
    };

    view! {
        <li class="review-reply-card">
            <div class="review-reply-card__review">
                <span class="review-reply-card__stars">{star_row(rating)}</span>
                <span class="review-reply-card__author">{author}</span>
                <p>{body}</p>
            </div>
            <div class="review-reply-card__form">
                <textarea
                    placeholder="Reply as the venue..."
                    prop:value=move || reply_body.get()
                    on:input=move |ev| reply_body.set(event_target_value(&ev))
                ></textarea>
                <button
                    disabled=move || is_submitting.get() || reply_body.get().trim().is_empty()
                    on:click=submit
                >
                    "Post reply"
                </button>
                {move || {
                    status
                        .get()
                        .map(|result| match result {
                            Ok(()) => view! { <p>"Reply posted."</p> }.into_any(),
                            Err(message) => {
                                view! { <p class="review-reply-card__error">{message}</p> }
                                    .into_any()
                            }
                        })
                }}
            </div>
        </li>
    }
}
