use yew::prelude::*;

/// Session state threaded explicitly from the composition root.
/// No component reads ambient session state.
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub logged_in: bool,
    pub user_name: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self {
            logged_in: false,
            user_name: None,
        }
    }
}

/// Read the session from context; outside a provider the session is absent,
/// which the layout treats as "redirect to login".
#[hook]
pub fn use_session() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::anonymous)
}
