use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::TranslationFields;

#[derive(Properties, PartialEq)]
pub struct TranslationPanelProps {
    pub fields: TranslationFields,
    /// Whether a translation record exists server-side.
    pub exists: bool,
    pub saving: bool,
    pub loading: bool,
    pub on_change: Callback<TranslationFields>,
    pub on_save: Callback<()>,
    pub on_delete: Callback<()>,
}

/// Editor for a record's Hindi translation. Save and delete act only on the
/// translation sub-record; the English parent is never touched from here.
#[function_component(TranslationPanel)]
pub fn translation_panel(props: &TranslationPanelProps) -> Html {
    if props.loading {
        return html! { <div class="loading">{"Loading translation..."}</div> };
    }

    let on_title_change = {
        let on_change = props.on_change.clone();
        let fields = props.fields.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = fields.clone();
            next.title = input.value();
            on_change.emit(next);
        })
    };

    let on_body_change = {
        let on_change = props.on_change.clone();
        let fields = props.fields.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = fields.clone();
            next.body = area.value();
            on_change.emit(next);
        })
    };

    let on_save = {
        let on_save = props.on_save.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(()))
    };

    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    html! {
        <div class="translation-panel">
            {if !props.exists {
                html! { <p class="translation-hint">{"No Hindi translation yet."}</p> }
            } else { html! {} }}

            <div class="form-group">
                <label>{"Title (Hindi)"}</label>
                <input
                    type="text"
                    value={props.fields.title.clone()}
                    onchange={on_title_change}
                    disabled={props.saving}
                />
            </div>
            <div class="form-group">
                <label>{"Body (Hindi)"}</label>
                <textarea
                    rows="6"
                    value={props.fields.body.clone()}
                    onchange={on_body_change}
                    disabled={props.saving}
                />
            </div>

            <div class="translation-actions">
                <button
                    type="button"
                    class="btn btn-primary"
                    onclick={on_save}
                    disabled={props.saving}
                >
                    {if props.saving {
                        "Saving..."
                    } else if props.exists {
                        "Update Translation"
                    } else {
                        "Save Translation"
                    }}
                </button>
                {if props.exists {
                    html! {
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_delete}
                            disabled={props.saving}
                        >
                            {"Delete Translation"}
                        </button>
                    }
                } else { html! {} }}
            </div>
        </div>
    }
}
