use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::{ChildEntry, ChildErrors};

#[derive(Properties, PartialEq)]
pub struct ChildRowsProps {
    pub entries: Vec<ChildEntry>,
    /// One error entry per row, aligned by index with `entries`.
    pub errors: Vec<ChildErrors>,
    pub on_change: Callback<(usize, ChildEntry)>,
    pub on_add: Callback<()>,
    pub on_remove: Callback<usize>,
    pub disabled: bool,
}

#[function_component(ChildRows)]
pub fn child_rows(props: &ChildRowsProps) -> Html {
    let on_add = {
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| on_add.emit(()))
    };

    html! {
        <div class="child-rows">
            <div class="child-rows-header">
                <h3>{"Children"}</h3>
                <button
                    type="button"
                    class="btn btn-secondary"
                    onclick={on_add}
                    disabled={props.disabled}
                >
                    {"+ Add Child"}
                </button>
            </div>

            {for props.entries.iter().enumerate().map(|(index, entry)| {
                let errors = props.errors.get(index).cloned().unwrap_or_default();

                let on_name_change = {
                    let on_change = props.on_change.clone();
                    let entry = entry.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut next = entry.clone();
                        next.name = input.value();
                        on_change.emit((index, next));
                    })
                };

                let on_dob_change = {
                    let on_change = props.on_change.clone();
                    let entry = entry.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let mut next = entry.clone();
                        next.dob = input.value();
                        on_change.emit((index, next));
                    })
                };

                let on_remove = {
                    let on_remove = props.on_remove.clone();
                    Callback::from(move |_: MouseEvent| on_remove.emit(index))
                };

                html! {
                    <div class="child-row">
                        <div class="form-group">
                            <input
                                type="text"
                                placeholder="Child name"
                                value={entry.name.clone()}
                                onchange={on_name_change}
                                disabled={props.disabled}
                            />
                            {if let Some(error) = errors.name.as_ref() {
                                html! { <span class="field-error">{error}</span> }
                            } else { html! {} }}
                        </div>
                        <div class="form-group">
                            <input
                                type="date"
                                value={entry.dob.clone()}
                                onchange={on_dob_change}
                                disabled={props.disabled}
                            />
                            {if let Some(error) = errors.dob.as_ref() {
                                html! { <span class="field-error">{error}</span> }
                            } else { html! {} }}
                        </div>
                        <button
                            type="button"
                            class="btn btn-link child-row-remove"
                            onclick={on_remove}
                            disabled={props.disabled}
                        >
                            {"Remove"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
