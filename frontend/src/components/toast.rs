use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A single user-visible notification. Every failure path in the dashboard
/// ultimately degrades to one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            text: text.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub toast: Option<ToastMessage>,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let Some(toast) = props.toast.as_ref() else {
        return html! {};
    };

    let class = match toast.kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
        ToastKind::Info => "toast toast-info",
    };

    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class={class} role="status">
            <span class="toast-text">{&toast.text}</span>
            <button type="button" class="toast-dismiss" onclick={on_dismiss}>{"×"}</button>
        </div>
    }
}
