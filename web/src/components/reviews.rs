use leptos::{prelude::*, task::spawn_local};

use crate::db::entities::VenueReview;
use crate::server::submit_review;
use crate::utils::auth::AuthSession;

pub fn star_row(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Approved reviews for one venue, with owner replies nested under each.
#[component]
pub fn ReviewList(reviews: Vec<VenueReview>) -> impl IntoView {
    if reviews.is_empty() {
        return view! { <p class="reviews__empty">"No reviews yet."</p> }.into_any();
    }

    view! {
        <ul class="reviews__list">
            {reviews
                .into_iter()
                .map(|review| {
                    view! {
                        <li class="reviews__item">
                            <div class="reviews__header">
                                <span class="reviews__stars">{star_row(review.rating)}</span>
                                <span class="reviews__author">{review.author_name.clone()}</span>
                            </div>
                            <p class="reviews__body">{review.body.clone()}</p>
                            {(!review.replies.is_empty())
                                .then(|| {
                                    view! {
                                        <ul class="reviews__replies">
                                            {review
                                                .replies
                                                .iter()
                                                .map(|reply| {
                                                    view! {
                                                        <li class="reviews__reply">
                                                            <span class="reviews__reply-label">
                                                                "Reply from the venue: "
                                                            </span>
                                                            {reply.body.clone()}
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    }
                                })}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

/// Review submission form. Signed-out visitors see a sign-in prompt
/// instead; accepted submissions go to the moderation queue rather than
/// straight to the page.
#[component]
pub fn ReviewForm(
    venue_id: i64,
    session: RwSignal<Option<AuthSession>>,
) -> impl IntoView {
    let rating = RwSignal::new(5i32);
    let body = RwSignal::new(String::new());
    let status = RwSignal::new(Option::<Result<(), String>>::None);
    let is_submitting = RwSignal::new(false);

    let submit = move |_| {
        let Some(auth) = session.get() else {
            return;
        };
        let token = auth.token.clone();
        let review_body = body.get();

        is_submitting.set(true);
        status.set(None);
        spawn_local(async move {
            match submit_review(token, venue_id, rating.get_untracked(), review_body).await {
                Ok(()) => {
                    status.set(Some(Ok(())));
                    body.set(String::new());
                }
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
            is_submitting.set(false);
        });
    };

    view! {
        <div class="review-form">
            <Show
                when=move || session.get().is_some()
                fallback=|| {
                    view! {
                        <p class="review-form__signin">
                            <a href="/auth">"Sign in"</a>
                            " to leave a review."
                        </p>
                    }
                }
            >
                <div class="review-form__rating">
                    <label>"Rating"</label>
                    <select on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<i32>() {
                            rating.set(value);
                        }
                    }>
                        {(1..=5)
                            .rev()
                            .map(|n| {
                                view! {
                                    <option value=n.to_string() selected=n == 5>
                                        {star_row(n)}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <textarea
                    class="review-form__body"
                    placeholder="How was your visit? Reviews are checked before they appear."
                    prop:value=move || body.get()
                    on:input=move |ev| body.set(event_target_value(&ev))
                ></textarea>
                <button
                    class="review-form__submit"
                    disabled=move || is_submitting.get() || body.get().trim().is_empty()
                    on:click=submit
                >
                    {move || if is_submitting.get() { "Sending..." } else { "Submit review" }}
                </button>
                {move || {
                    status
                        .get()
                        .map(|result| match result {
                            Ok(()) => {
                                view! {
                                    <p class="review-form__ok">
                                        "Thanks! Your review will appear once it's been checked."
                                    </p>
                                }
                                    .into_any()
                            }
                            Err(message) => {
                                view! { <p class="review-form__error">{message}</p> }.into_any()
                            }
                        })
                }}
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::star_row;

    #[test]
    fn star_rows_are_five_wide() {
        assert_eq!(star_row(0), "☆☆☆☆☆");
        assert_eq!(star_row(3), "★★★☆☆");
        assert_eq!(star_row(5), "★★★★★");
        // Out-of-range ratings clamp instead of panicking.
        assert_eq!(star_row(9), "★★★★★");
        assert_eq!(star_row(-2), "☆☆☆☆☆");
    }
}
