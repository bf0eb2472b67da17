use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::{ContentSection, Language};

use crate::components::language_tabs::LanguageTabs;
use crate::components::toast::{Toast, ToastMessage};
use crate::components::translation_panel::TranslationPanel;
use crate::hooks::use_translation::use_translation;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ContentSectionScreenProps {
    pub api_client: ApiClient,
}

#[function_component(ContentSectionScreen)]
pub fn content_section_screen(props: &ContentSectionScreenProps) -> Html {
    let sections = use_state(Vec::<ContentSection>::new);
    let draft = use_state(ContentSection::default);
    let language = use_state(|| Language::English);
    let toast = use_state(|| Option::<ToastMessage>::None);
    let saving = use_state(|| false);

    let on_toast = {
        let toast = toast.clone();
        Callback::from(move |message: ToastMessage| toast.set(Some(message)))
    };

    let translation = use_translation(&props.api_client, "content-sections", on_toast.clone());

    let reload = {
        let sections = sections.clone();
        let api_client = props.api_client.clone();
        let toast = toast.clone();
        Callback::from(move |_: ()| {
            let sections = sections.clone();
            let api_client = api_client.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match api_client.get_content_sections().await {
                    Ok(list) => sections.set(list),
                    Err(e) => {
                        toast.set(Some(ToastMessage::error(format!(
                            "Failed to load content sections: {}",
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
        let language = language.clone();
        let translation_load = translation.actions.load.clone();
        Callback::from(move |section: ContentSection| {
            language.set(Language::English);
            if let Some(id) = section.id {
                translation_load.emit(id);
            }
            draft.set(section);
        })
    };

    let on_new = {
        let draft = draft.clone();
        let language = language.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(ContentSection::default());
            language.set(Language::English);
        })
    };

    let on_title_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*draft).clone();
            next.title = value;
            draft.set(next);
        })
    };

    let on_body_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            let mut next = (*draft).clone();
            next.body = value;
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let toast = toast.clone();
        let saving = saving.clone();
        let api_client = props.api_client.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let section = (*draft).clone();
            if section.title.trim().is_empty() {
                toast.set(Some(ToastMessage::error("Section title is required")));
                return;
            }
            let draft = draft.clone();
            let toast = toast.clone();
            let saving = saving.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match section.id {
                    Some(id) => api_client
                        .update_content_section(id, &section)
                        .await
                        .map(|_| section.clone()),
                    None => api_client.create_content_section(&section).await,
                };
                match result {
                    Ok(saved) => {
                        toast.set(Some(ToastMessage::success("Content section saved")));
                        draft.set(saved);
                        reload.emit(());
                    }
                    Err(e) => toast.set(Some(ToastMessage::error(e))),
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let draft = draft.clone();
        let toast = toast.clone();
        let api_client = props.api_client.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = draft.id else { return };
            let draft = draft.clone();
            let toast = toast.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_content_section(id).await {
                    Ok(()) => {
                        toast.set(Some(ToastMessage::success("Content section deleted")));
                        draft.set(ContentSection::default());
                        reload.emit(());
                    }
                    Err(e) => toast.set(Some(ToastMessage::error(e))),
                }
            });
        })
    };

    let on_translation_save = {
        let save = translation.actions.save.clone();
        let record_id = draft.id;
        Callback::from(move |_: ()| {
            if let Some(id) = record_id {
                save.emit(id);
            }
        })
    };
    let on_translation_delete = {
        let delete = translation.actions.delete.clone();
        let record_id = draft.id;
        Callback::from(move |_: ()| {
            if let Some(id) = record_id {
                delete.emit(id);
            }
        })
    };

    let on_dismiss_toast = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(None))
    };

    let on_language_select = {
        let language = language.clone();
        Callback::from(move |selected: Language| language.set(selected))
    };

    html! {
        <section class="form-screen content-section-form">
            <h2>{"Content Sections"}</h2>
            <Toast toast={(*toast).clone()} on_dismiss={on_dismiss_toast} />

            <div class="record-list">
                <button type="button" class="btn btn-secondary" onclick={on_new}>
                    {"+ New Section"}
                </button>
                <ul>
                    {for sections.iter().map(|section| {
                        let on_select = on_select.clone();
                        let item = section.clone();
                        let active = section.id.is_some() && section.id == draft.id;
                        html! {
                            <li class={classes!(active.then_some("active"))}
                                onclick={Callback::from(move |_| on_select.emit(item.clone()))}>
                                {&section.title}
                            </li>
                        }
                    })}
                </ul>
            </div>

            <LanguageTabs
                active={*language}
                on_select={on_language_select}
                hindi_enabled={draft.id.is_some()}
            />

            {if *language == Language::English {
                html! {
                    <form onsubmit={on_submit}>
                        <div class="form-group">
                            <label>{"Title"}</label>
                            <input type="text" value={draft.title.clone()}
                                onchange={on_title_change} disabled={*saving} />
                        </div>
                        <div class="form-group">
                            <label>{"Body"}</label>
                            <textarea rows="8" value={draft.body.clone()}
                                onchange={on_body_change} disabled={*saving} />
                        </div>
                        <div class="form-actions">
                            <button type="submit" class="btn btn-primary" disabled={*saving}>
                                {if draft.id.is_some() { "Update" } else { "Create" }}
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
                }
            } else {
                html! {
                    <TranslationPanel
                        fields={translation.state.fields.clone()}
                        exists={translation.state.exists}
                        saving={translation.state.saving}
                        loading={translation.state.loading}
                        on_change={translation.actions.set_fields.clone()}
                        on_save={on_translation_save}
                        on_delete={on_translation_delete}
                    />
                }
            }}
        </section>
    }
}
