use yew::prelude::*;

use shared::Language;

#[derive(Properties, PartialEq)]
pub struct LanguageTabsProps {
    pub active: Language,
    pub on_select: Callback<Language>,
    /// The Hindi tab stays disabled until the English record is saved,
    /// because translations attach to a saved record's id.
    pub hindi_enabled: bool,
}

#[function_component(LanguageTabs)]
pub fn language_tabs(props: &LanguageTabsProps) -> Html {
    let tab = |lang: Language, enabled: bool| {
        let on_select = props.on_select.clone();
        let class = if props.active == lang {
            "lang-tab active"
        } else {
            "lang-tab"
        };
        html! {
            <button
                type="button"
                class={class}
                disabled={!enabled}
                onclick={Callback::from(move |_| on_select.emit(lang))}
            >
                {lang.label()}
            </button>
        }
    };

    html! {
        <div class="lang-tabs">
            {tab(Language::English, true)}
            {tab(Language::Hindi, props.hindi_enabled)}
        </div>
    }
}
