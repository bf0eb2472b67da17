use yew::prelude::*;

/// The dashboard's top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Registrants,
    Events,
    Categories,
    ContentSections,
    Pages,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Registrants,
        Screen::Events,
        Screen::Categories,
        Screen::ContentSections,
        Screen::Pages,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Registrants => "Registrants",
            Screen::Events => "Events",
            Screen::Categories => "Categories",
            Screen::ContentSections => "Content Sections",
            Screen::Pages => "Pages",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub active: Screen,
    pub on_navigate: Callback<Screen>,
    pub user_name: Option<String>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Samaj Registry Admin"}</h1>
                <nav class="header-nav">
                    {for Screen::ALL.iter().map(|screen| {
                        let on_navigate = props.on_navigate.clone();
                        let screen = *screen;
                        let class = if screen == props.active {
                            "nav-link active"
                        } else {
                            "nav-link"
                        };
                        html! {
                            <button
                                type="button"
                                class={class}
                                onclick={Callback::from(move |_| on_navigate.emit(screen))}
                            >
                                {screen.label()}
                            </button>
                        }
                    })}
                </nav>
                {if let Some(name) = props.user_name.as_ref() {
                    html! { <span class="header-user">{name}</span> }
                } else {
                    html! {}
                }}
            </div>
        </header>
    }
}
