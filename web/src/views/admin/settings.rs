use leptos::{prelude::*, task::spawn_local};

use crate::components::error::ErrorView;
use crate::components::loading::LoadingView;
use crate::server::fetch_content_page;
use crate::server_admin::{fetch_site_settings, update_content_page, update_site_setting};

const EDITABLE_PAGES: &[&str] = &["resources", "code-of-conduct"];

/// Site settings (map backend and friends) and the content page editor.
#[component]
pub fn SettingsPanel(token: String) -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let action_error = RwSignal::new(Option::<String>::None);

    let list_token = token.clone();
    let settings = Resource::new(
        move || refresh.get(),
        move |_| {
            let token = list_token.clone();
            async move { fetch_site_settings(token).await }
        },
    );

    let update_token = token.clone();
    let update = move |key: String, value: String| {
        let token = update_token.clone();
        action_error.set(None);
        spawn_local(async move {
            match update_site_setting(token, key, value).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="admin-panel">
            <h2>"Site settings"</h2>
            {move || {
                action_error
                    .get()
                    .map(|msg| view! { <ErrorView message=Some(msg) /> })
            }}
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    settings
                        .get()
                        .map(|result| match result {
                            Ok(settings) => {
                                view! {
                                    <ul class="admin-panel__settings">
                                        {settings
                                            .into_iter()
                                            .map(|setting| {
                                                let key = setting.key.clone();
                                                let update = update.clone();
                                                if setting.key == "map_backend" {
                                                    view! {
                                                        <li>
                                                            <label>"Map backend"</label>
                                                            <select on:change=move |ev| update(
                                                                key.clone(),
                                                                event_target_value(&ev),
                                                            )>
                                                                <option
                                                                    value="tiles"
                                                                    selected=setting.value == "tiles"
                                                                >
                                                                    "Street map tiles"
                                                                </option>
                                                                <option value="svg" selected=setting.value == "svg">
                                                                    "Plain SVG map"
                                                                </option>
                                                            </select>
                                                        </li>
                                                    }
                                                        .into_any()
                                                } else {
                                                    let value = RwSignal::new(setting.value.clone());
                                                    let save_key = setting.key.clone();
                                                    view! {
                                                        <li>
                                                            <label>{setting.key.clone()}</label>
                                                            <input
                                                                type="text"
                                                                prop:value=move || value.get()
                                                                on:input=move |ev| value.set(event_target_value(&ev))
                                                            />
                                                            <button on:click=move |_| update(
                                                                save_key.clone(),
                                                                value.get(),
                                                            )>"Save"</button>
                                                        </li>
                                                    }
                                                        .into_any()
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
                                        "Couldn't load settings.".to_string(),
                                    ) />
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>

            <h2>"Content pages"</h2>
            {EDITABLE_PAGES
                .iter()
                .map(|slug| {
                    view! { <PageEditor token=token.clone() slug=slug.to_string() /> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn PageEditor(token: String, slug: String) -> impl IntoView {
    let load_slug = slug.clone();
    let page = Resource::new(
        || (),
        move |_| {
            let slug = load_slug.clone();
            async move { fetch_content_page(slug).await }
        },
    );

    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let status = RwSignal::new(Option::<String>::None);

    Effect::new(move |_| {
        if let Some(Ok(Some(page))) = page.get() {
            title.set(page.title.clone());
            body.set(page.body.clone());
        }
    });

    let save_slug = slug.clone();
    let save = move |_| {
        let token = token.clone();
        let slug = save_slug.clone();
        status.set(None);
        spawn_local(async move {
            status.set(Some(
                match update_content_page(token, slug, title.get_untracked(), body.get_untracked())
                    .await
                {
                    Ok(()) => "Saved.".to_string(),
                    Err(e) => e.to_string(),
                },
            ));
        });
    };

    view! {
        <details class="page-editor">
            <summary>{slug.clone()}</summary>
            <Suspense fallback=move || view! { <LoadingView message=None /> }>
                {move || {
                    page.get()
                        .map(|_| {
                            view! {
                                <div class="page-editor__fields">
                                    <input
                                        type="text"
                                        placeholder="Title"
                                        prop:value=move || title.get()
                                        on:input=move |ev| title.set(event_target_value(&ev))
                                    />
                                    <textarea
                                        rows="12"
                                        prop:value=move || body.get()
                                        on:input=move |ev| body.set(event_target_value(&ev))
                                    ></textarea>
                                    <button on:click=save.clone()>"Save page"</button>
                                    {move || status.get().map(|msg| view! { <p>{msg}</p> })}
                                </div>
                            }
                        })
                }}
            </Suspense>
        </details>
    }
}
