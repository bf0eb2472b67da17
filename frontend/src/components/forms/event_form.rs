use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::{Event as EventRecord, Language, TranslationFields};

use crate::components::image_upload::ImageUpload;
use crate::components::toast::{Toast, ToastMessage};
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct EventScreenProps {
    pub api_client: ApiClient,
}

/// Event editor. The English record and its Hindi translation are edited on
/// one screen and saved sequentially; a translation failure after a
/// successful event save is reported as exactly that, never as a silent
/// all-or-nothing.
#[function_component(EventScreen)]
pub fn event_screen(props: &EventScreenProps) -> Html {
    let events = use_state(Vec::<EventRecord>::new);
    let draft = use_state(EventRecord::default);
    let gallery = use_state(Vec::<String>::new);
    let hindi = use_state(TranslationFields::default);
    let hindi_exists = use_state(|| false);
    let toast = use_state(|| Option::<ToastMessage>::None);
    let saving = use_state(|| false);

    let reload = {
        let events = events.clone();
        let api_client = props.api_client.clone();
        let toast = toast.clone();
        Callback::from(move |_: ()| {
            let events = events.clone();
            let api_client = api_client.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match api_client.get_events().await {
                    Ok(list) => events.set(list),
                    Err(e) => {
                        toast.set(Some(ToastMessage::error(format!(
                            "Failed to load events: {}",
                            e
                        ))));
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    let on_select = {
        let draft = draft.clone();
        let gallery = gallery.clone();
        let hindi = hindi.clone();
        let hindi_exists = hindi_exists.clone();
        let api_client = props.api_client.clone();
        Callback::from(move |event: EventRecord| {
            gallery.set(event.gallery_urls());
            hindi.set(TranslationFields::default());
            hindi_exists.set(false);
            if let Some(id) = event.id {
                let hindi = hindi.clone();
                let hindi_exists = hindi_exists.clone();
                let api_client = api_client.clone();
                spawn_local(async move {
                    match api_client
                        .get_translation("events", id, Language::Hindi)
                        .await
                    {
                        Ok(Some(fields)) => {
                            hindi.set(fields);
                            hindi_exists.set(true);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            Logger::warn_with_component("event_form", &e);
                        }
                    }
                });
            }
            draft.set(event);
        })
    };

    let on_new = {
        let draft = draft.clone();
        let gallery = gallery.clone();
        let hindi = hindi.clone();
        let hindi_exists = hindi_exists.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(EventRecord::default());
            gallery.set(Vec::new());
            hindi.set(TranslationFields::default());
            hindi_exists.set(false);
        })
    };

    let event_field = {
        let draft = draft.clone();
        move |setter: fn(&mut EventRecord, String)| {
            let draft = draft.clone();
            Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                let mut next = (*draft).clone();
                setter(&mut next, value);
                draft.set(next);
            })
        }
    };

    let on_description_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            let mut next = (*draft).clone();
            next.description = value;
            draft.set(next);
        })
    };

    let on_gallery_uploaded = {
        let gallery = gallery.clone();
        Callback::from(move |url: String| {
            let mut next = (*gallery).clone();
            next.push(url);
            gallery.set(next);
        })
    };

    let on_gallery_remove = {
        let gallery = gallery.clone();
        Callback::from(move |index: usize| {
            let mut next = (*gallery).clone();
            if index < next.len() {
                next.remove(index);
            }
            gallery.set(next);
        })
    };

    let on_upload_error = {
        let toast = toast.clone();
        Callback::from(move |e: String| toast.set(Some(ToastMessage::error(e))))
    };

    let hindi_field = {
        let hindi = hindi.clone();
        move |setter: fn(&mut TranslationFields, String)| {
            let hindi = hindi.clone();
            Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                let mut next = (*hindi).clone();
                setter(&mut next, value);
                hindi.set(next);
            })
        }
    };

    let on_hindi_body_change = {
        let hindi = hindi.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            let mut next = (*hindi).clone();
            next.body = value;
            hindi.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let gallery = gallery.clone();
        let hindi = hindi.clone();
        let hindi_exists = hindi_exists.clone();
        let toast = toast.clone();
        let saving = saving.clone();
        let api_client = props.api_client.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut event = (*draft).clone();
            event.set_gallery_urls(&gallery);
            if event.title.trim().is_empty() {
                toast.set(Some(ToastMessage::error("Event title is required")));
                return;
            }
            let translation = (*hindi).clone();
            let translation_exists = *hindi_exists;

            let draft = draft.clone();
            let hindi_exists = hindi_exists.clone();
            let toast = toast.clone();
            let saving = saving.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();
            saving.set(true);
            spawn_local(async move {
                let english_result = match event.id {
                    Some(id) => api_client.update_event(id, &event).await.map(|_| event.clone()),
                    None => api_client.create_event(&event).await,
                };
                let saved = match english_result {
                    Ok(saved) => saved,
                    Err(e) => {
                        toast.set(Some(ToastMessage::error(e)));
                        saving.set(false);
                        return;
                    }
                };

                // English is committed; the translation step can only fail
                // on its own terms now.
                if translation.is_blank() {
                    toast.set(Some(ToastMessage::success("Event saved")));
                } else if let Some(id) = saved.id {
                    match api_client
                        .save_translation(
                            "events",
                            id,
                            Language::Hindi,
                            &translation,
                            translation_exists,
                        )
                        .await
                    {
                        Ok(()) => {
                            hindi_exists.set(true);
                            toast.set(Some(ToastMessage::success(
                                "Event and Hindi translation saved",
                            )));
                        }
                        Err(e) => {
                            toast.set(Some(ToastMessage::error(format!(
                                "Event saved, but the Hindi translation failed: {}",
                                e
                            ))));
                        }
                    }
                }

                draft.set(saved);
                reload.emit(());
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let draft = draft.clone();
        let gallery = gallery.clone();
        let toast = toast.clone();
        let api_client = props.api_client.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = draft.id else { return };
            let draft = draft.clone();
            let gallery = gallery.clone();
            let toast = toast.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_event(id).await {
                    Ok(()) => {
                        toast.set(Some(ToastMessage::success("Event deleted")));
                        draft.set(EventRecord::default());
                        gallery.set(Vec::new());
                        reload.emit(());
                    }
                    Err(e) => toast.set(Some(ToastMessage::error(e))),
                }
            });
        })
    };

    let on_dismiss_toast = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(None))
    };

    html! {
        <section class="form-screen event-form">
            <h2>{"Events"}</h2>
            <Toast toast={(*toast).clone()} on_dismiss={on_dismiss_toast} />

            <div class="record-list">
                <button type="button" class="btn btn-secondary" onclick={on_new}>
                    {"+ New Event"}
                </button>
                <ul>
                    {for events.iter().map(|event| {
                        let on_select = on_select.clone();
                        let item = event.clone();
                        let active = event.id.is_some() && event.id == draft.id;
                        html! {
                            <li class={classes!(active.then_some("active"))}
                                onclick={Callback::from(move |_| on_select.emit(item.clone()))}>
                                {&event.title}
                                <span class="record-date">
                                    {date_utils::format_date_for_display(&event.event_date)}
                                </span>
                            </li>
                        }
                    })}
                </ul>
            </div>

            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label>{"Title"}</label>
                    <input type="text" value={draft.title.clone()}
                        onchange={event_field(|f, v| f.title = v)} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label>{"Description"}</label>
                    <textarea rows="4" value={draft.description.clone()}
                        onchange={on_description_change} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label>{"Date"}</label>
                    <input type="date" value={draft.event_date.clone()}
                        onchange={event_field(|f, v| f.event_date = v)} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label>{"Venue"}</label>
                    <input type="text" value={draft.venue.clone()}
                        onchange={event_field(|f, v| f.venue = v)} disabled={*saving} />
                </div>

                <div class="form-group gallery">
                    <label>{"Gallery"}</label>
                    <ul class="gallery-list">
                        {for gallery.iter().enumerate().map(|(index, url)| {
                            let on_gallery_remove = on_gallery_remove.clone();
                            html! {
                                <li>
                                    <img class="thumb" src={url.clone()} alt="gallery" />
                                    <button type="button" class="btn-remove"
                                        onclick={Callback::from(move |_| on_gallery_remove.emit(index))}
                                        disabled={*saving}>
                                        {"✕"}
                                    </button>
                                </li>
                            }
                        })}
                    </ul>
                    <ImageUpload
                        api_client={props.api_client.clone()}
                        label="Add Image"
                        on_uploaded={on_gallery_uploaded}
                        on_error={on_upload_error}
                        disabled={*saving}
                    />
                </div>

                <fieldset class="form-section hindi-translation">
                    <legend>{"Hindi Translation"}</legend>
                    <div class="form-group">
                        <label>{"Title (Hindi)"}</label>
                        <input type="text" value={hindi.title.clone()}
                            onchange={hindi_field(|f, v| f.title = v)} disabled={*saving} />
                    </div>
                    <div class="form-group">
                        <label>{"Description (Hindi)"}</label>
                        <textarea rows="4" value={hindi.body.clone()}
                            onchange={on_hindi_body_change} disabled={*saving} />
                    </div>
                </fieldset>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={*saving}>
                        {if *saving {
                            "Saving..."
                        } else if draft.id.is_some() {
                            "Update Event"
                        } else {
                            "Create Event"
                        }}
                    </button>
                    {if draft.id.is_some() {
                        html! {
                            <button type="button" class="btn btn-danger"
                                onclick={on_delete} disabled={*saving}>
                                {"Delete"}
                            </button>
                        }
                    } else { html! {} }}
                </div>
            </form>
        </section>
    }
}
