mod components;
mod hooks;
mod services;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use components::forms::category_form::CategoryScreen;
use components::forms::content_section_form::ContentSectionScreen;
use components::forms::event_form::EventScreen;
use components::forms::page_form::PageScreen;
use components::forms::registrant_form::RegistrantScreen;
use components::header::{Header, Screen};
use hooks::use_session::{use_session, AuthContext};
use services::api::ApiClient;
use services::logging::Logger;

#[derive(Properties, PartialEq)]
struct LoginProps {
    on_login: Callback<String>,
}

/// Minimal credential gate. The admin endpoints enforce the real session;
/// this just keeps the dashboard from rendering for anonymous visitors.
#[function_component(Login)]
fn login(props: &LoginProps) -> Html {
    let user_name = use_state(String::new);
    let error = use_state(|| Option::<String>::None);

    let on_name_change = {
        let user_name = user_name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            user_name.set(input.value());
        })
    };

    let on_submit = {
        let user_name = user_name.clone();
        let error = error.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = user_name.trim().to_string();
            if name.is_empty() {
                error.set(Some("Enter your admin user name".to_string()));
                return;
            }
            error.set(None);
            on_login.emit(name);
        })
    };

    html! {
        <div class="login-screen">
            <form class="login-card" onsubmit={on_submit}>
                <h1>{"Samaj Registry Admin"}</h1>
                <div class="form-group">
                    <label>{"User Name"}</label>
                    <input type="text" value={(*user_name).clone()} onchange={on_name_change} />
                </div>
                {if let Some(message) = error.as_ref() {
                    html! { <span class="field-error">{message}</span> }
                } else { html! {} }}
                <button type="submit" class="btn btn-primary">{"Sign In"}</button>
            </form>
        </div>
    }
}

#[function_component(Dashboard)]
fn dashboard() -> Html {
    let session = use_session();
    let screen = use_state(|| Screen::Registrants);
    let api_client = use_memo((), |_| ApiClient::new());

    let on_navigate = {
        let screen = screen.clone();
        Callback::from(move |next: Screen| screen.set(next))
    };

    let body = match *screen {
        Screen::Registrants => html! {
            <RegistrantScreen api_client={(*api_client).clone()} />
        },
        Screen::Events => html! {
            <EventScreen api_client={(*api_client).clone()} />
        },
        Screen::Categories => html! {
            <CategoryScreen api_client={(*api_client).clone()} />
        },
        Screen::ContentSections => html! {
            <ContentSectionScreen api_client={(*api_client).clone()} />
        },
        Screen::Pages => html! {
            <PageScreen api_client={(*api_client).clone()} />
        },
    };

    html! {
        <div class="dashboard">
            <Header
                active={*screen}
                on_navigate={on_navigate}
                user_name={session.user_name.clone()}
            />
            <main class="container">
                {body}
            </main>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(AuthContext::anonymous);

    let on_login = {
        let session = session.clone();
        Callback::from(move |user_name: String| {
            Logger::info_with_component("app", &format!("session started for {}", user_name));
            session.set(AuthContext {
                logged_in: true,
                user_name: Some(user_name),
            });
        })
    };

    if !session.logged_in {
        return html! { <Login on_login={on_login} /> };
    }

    html! {
        <ContextProvider<AuthContext> context={(*session).clone()}>
            <Dashboard />
        </ContextProvider<AuthContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
