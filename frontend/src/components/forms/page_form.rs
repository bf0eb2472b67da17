use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::{Language, Page};

use crate::components::language_tabs::LanguageTabs;
use crate::components::toast::{Toast, ToastMessage};
use crate::components::translation_panel::TranslationPanel;
use crate::hooks::use_translation::use_translation;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PageScreenProps {
    pub api_client: ApiClient,
}

/// Static-page editor. Pages carry Hindi translations the same way the
/// other content resources do.
#[function_component(PageScreen)]
pub fn page_screen(props: &PageScreenProps) -> Html {
    let pages = use_state(Vec::<Page>::new);
    let draft = use_state(Page::default);
    let language = use_state(|| Language::English);
    let toast = use_state(|| Option::<ToastMessage>::None);
    let saving = use_state(|| false);

    let on_toast = {
        let toast = toast.clone();
        Callback::from(move |message: ToastMessage| toast.set(Some(message)))
    };

    let translation = use_translation(&props.api_client, "pages", on_toast.clone());

    let reload = {
        let pages = pages.clone();
        let api_client = props.api_client.clone();
        let toast = toast.clone();
        Callback::from(move |_: ()| {
            let pages = pages.clone();
            let api_client = api_client.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match api_client.get_pages().await {
                    Ok(list) => pages.set(list),
                    Err(e) => {
                        toast.set(Some(ToastMessage::error(format!(
                            "Failed to load pages: {}",
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
        Callback::from(move |page: Page| {
            language.set(Language::English);
            if let Some(id) = page.id {
                translation_load.emit(id);
            }
            draft.set(page);
        })
    };

    let on_new = {
        let draft = draft.clone();
        let language = language.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(Page::default());
            language.set(Language::English);
        })
    };

    let page_field = {
        let draft = draft.clone();
        move |setter: fn(&mut Page, String)| {
            let draft = draft.clone();
            Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                let mut next = (*draft).clone();
                setter(&mut next, value);
                draft.set(next);
            })
        }
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
            let page = (*draft).clone();
            if page.title.trim().is_empty() || page.slug.trim().is_empty() {
                toast.set(Some(ToastMessage::error("Page title and slug are required")));
                return;
            }
            let draft = draft.clone();
            let toast = toast.clone();
            let saving = saving.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match page.id {
                    Some(id) => api_client.update_page(id, &page).await.map(|_| page.clone()),
                    None => api_client.create_page(&page).await,
                };
                match result {
                    Ok(saved) => {
                        toast.set(Some(ToastMessage::success("Page saved")));
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
                match api_client.delete_page(id).await {
                    Ok(()) => {
                        toast.set(Some(ToastMessage::success("Page deleted")));
                        draft.set(Page::default());
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
        <section class="form-screen page-form">
            <h2>{"Pages"}</h2>
            <Toast toast={(*toast).clone()} on_dismiss={on_dismiss_toast} />

            <div class="record-list">
                <button type="button" class="btn btn-secondary" onclick={on_new}>
                    {"+ New Page"}
                </button>
                <ul>
                    {for pages.iter().map(|page| {
                        let on_select = on_select.clone();
                        let item = page.clone();
                        let active = page.id.is_some() && page.id == draft.id;
                        html! {
                            <li class={classes!(active.then_some("active"))}
                                onclick={Callback::from(move |_| on_select.emit(item.clone()))}>
                                {&page.title}
                                <span class="record-slug">{format!("/{}", page.slug)}</span>
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
                                onchange={page_field(|f, v| f.title = v)} disabled={*saving} />
                        </div>
                        <div class="form-group">
                            <label>{"Slug"}</label>
                            <input type="text" value={draft.slug.clone()}
                                onchange={page_field(|f, v| f.slug = v)} disabled={*saving} />
                        </div>
                        <div class="form-group">
                            <label>{"Body"}</label>
                            <textarea rows="10" value={draft.body.clone()}
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
