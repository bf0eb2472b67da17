use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::{Category, Language};

use crate::components::image_upload::ImageUpload;
use crate::components::language_tabs::LanguageTabs;
use crate::components::toast::{Toast, ToastMessage};
use crate::components::translation_panel::TranslationPanel;
use crate::hooks::use_translation::use_translation;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct CategoryScreenProps {
    pub api_client: ApiClient,
}

#[function_component(CategoryScreen)]
pub fn category_screen(props: &CategoryScreenProps) -> Html {
    let categories = use_state(Vec::<Category>::new);
    let draft = use_state(Category::default);
    let language = use_state(|| Language::English);
    let toast = use_state(|| Option::<ToastMessage>::None);
    let saving = use_state(|| false);

    let on_toast = {
        let toast = toast.clone();
        Callback::from(move |message: ToastMessage| toast.set(Some(message)))
    };

    let translation = use_translation(&props.api_client, "categories", on_toast.clone());

    let reload = {
        let categories = categories.clone();
        let api_client = props.api_client.clone();
        let toast = toast.clone();
        Callback::from(move |_: ()| {
            let categories = categories.clone();
            let api_client = api_client.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match api_client.get_categories().await {
                    Ok(list) => categories.set(list),
                    Err(e) => {
                        toast.set(Some(ToastMessage::error(format!(
                            "Failed to load categories: {}",
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
        Callback::from(move |category: Category| {
            language.set(Language::English);
            if let Some(id) = category.id {
                translation_load.emit(id);
            }
            draft.set(category);
        })
    };

    let on_new = {
        let draft = draft.clone();
        let language = language.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(Category::default());
            language.set(Language::English);
        })
    };

    let on_name_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*draft).clone();
            next.name = value;
            draft.set(next);
        })
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

    let on_image_uploaded = {
        let draft = draft.clone();
        Callback::from(move |url: String| {
            let mut next = (*draft).clone();
            next.image = Some(url);
            draft.set(next);
        })
    };

    let on_image_error = {
        let toast = toast.clone();
        Callback::from(move |e: String| toast.set(Some(ToastMessage::error(e))))
    };

    // Creating hands back the server-assigned record, then jumps straight to
    // the Hindi tab so the translation can be entered in the same sitting.
    let on_save_english = {
        let draft = draft.clone();
        let language = language.clone();
        let toast = toast.clone();
        let saving = saving.clone();
        let api_client = props.api_client.clone();
        let reload = reload.clone();
        let translation_load = translation.actions.load.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let category = (*draft).clone();
            if category.name.trim().is_empty() {
                toast.set(Some(ToastMessage::error("Category name is required")));
                return;
            }

            let draft = draft.clone();
            let language = language.clone();
            let toast = toast.clone();
            let saving = saving.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();
            let translation_load = translation_load.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match category.id {
                    Some(id) => api_client
                        .update_category(id, &category)
                        .await
                        .map(|_| category.clone()),
                    None => api_client.create_category(&category).await,
                };
                match result {
                    Ok(saved) => {
                        let is_new = category.id.is_none();
                        toast.set(Some(ToastMessage::success("Category saved")));
                        if let Some(id) = saved.id {
                            if is_new {
                                Logger::info_with_component(
                                    "category_form",
                                    &format!("category {} created, opening translation", id),
                                );
                                translation_load.emit(id);
                                language.set(Language::Hindi);
                            }
                        }
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
                match api_client.delete_category(id).await {
                    Ok(()) => {
                        toast.set(Some(ToastMessage::success("Category deleted")));
                        draft.set(Category::default());
                        reload.emit(());
                    }
                    Err(e) => toast.set(Some(ToastMessage::error(e))),
                }
            });
        })
    };

    let on_translation_change = translation.actions.set_fields.clone();
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
        <section class="form-screen category-form">
            <h2>{"Categories"}</h2>
            <Toast toast={(*toast).clone()} on_dismiss={on_dismiss_toast} />

            <div class="record-list">
                <button type="button" class="btn btn-secondary" onclick={on_new}>
                    {"+ New Category"}
                </button>
                <ul>
                    {for categories.iter().map(|category| {
                        let on_select = on_select.clone();
                        let item = category.clone();
                        let active = category.id.is_some() && category.id == draft.id;
                        html! {
                            <li class={classes!(active.then_some("active"))}
                                onclick={Callback::from(move |_| on_select.emit(item.clone()))}>
                                {&category.name}
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
                    <form onsubmit={on_save_english}>
                        <div class="form-group">
                            <label>{"Name"}</label>
                            <input type="text" value={draft.name.clone()}
                                onchange={on_name_change} disabled={*saving} />
                        </div>
                        <div class="form-group">
                            <label>{"Description"}</label>
                            <textarea rows="4" value={draft.description.clone()}
                                onchange={on_description_change} disabled={*saving} />
                        </div>
                        <ImageUpload
                            api_client={props.api_client.clone()}
                            label="Category Image"
                            on_uploaded={on_image_uploaded}
                            on_error={on_image_error}
                            disabled={*saving}
                        />
                        {if let Some(url) = draft.image.as_ref() {
                            html! { <img class="preview" src={url.clone()} alt="category" /> }
                        } else { html! {} }}
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
                        on_change={on_translation_change}
                        on_save={on_translation_save}
                        on_delete={on_translation_delete}
                    />
                }
            }}
        </section>
    }
}
