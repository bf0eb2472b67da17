use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::{Language, TranslationFields};

use crate::components::toast::ToastMessage;
use crate::services::api::ApiClient;

/// State of one record's Hindi translation.
#[derive(Clone, PartialEq, Default)]
pub struct TranslationState {
    pub fields: TranslationFields,
    /// Whether a translation record exists server-side. Drives POST vs PUT.
    pub exists: bool,
    pub loading: bool,
    pub saving: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseTranslationActions {
    /// Fetch the translation for a record id; a 404 means "none yet".
    pub load: Callback<i64>,
    pub set_fields: Callback<TranslationFields>,
    pub save: Callback<i64>,
    pub delete: Callback<i64>,
}

pub struct UseTranslationResult {
    pub state: TranslationState,
    pub actions: UseTranslationActions,
}

/// Manages the Hindi translation sub-record for one content resource.
///
/// The English record must already be saved (the endpoints key on its id);
/// deleting the translation never touches the parent.
#[hook]
pub fn use_translation(
    api_client: &ApiClient,
    resource: &'static str,
    on_toast: Callback<ToastMessage>,
) -> UseTranslationResult {
    let state = use_state(TranslationState::default);

    let load = {
        let state = state.clone();
        let api_client = api_client.clone();
        let on_toast = on_toast.clone();
        Callback::from(move |record_id: i64| {
            let state = state.clone();
            let api_client = api_client.clone();
            let on_toast = on_toast.clone();
            state.set(TranslationState {
                loading: true,
                ..TranslationState::default()
            });
            spawn_local(async move {
                match api_client
                    .get_translation(resource, record_id, Language::Hindi)
                    .await
                {
                    Ok(Some(fields)) => state.set(TranslationState {
                        fields,
                        exists: true,
                        loading: false,
                        saving: false,
                    }),
                    Ok(None) => state.set(TranslationState::default()),
                    Err(e) => {
                        state.set(TranslationState::default());
                        on_toast.emit(ToastMessage::error(format!(
                            "Failed to load translation: {}",
                            e
                        )));
                    }
                }
            });
        })
    };

    let set_fields = {
        let state = state.clone();
        Callback::from(move |fields: TranslationFields| {
            state.set(TranslationState {
                fields,
                ..(*state).clone()
            });
        })
    };

    let save = {
        let state = state.clone();
        let api_client = api_client.clone();
        let on_toast = on_toast.clone();
        Callback::from(move |record_id: i64| {
            let snapshot = (*state).clone();
            let state = state.clone();
            let api_client = api_client.clone();
            let on_toast = on_toast.clone();
            state.set(TranslationState {
                saving: true,
                ..snapshot.clone()
            });
            spawn_local(async move {
                match api_client
                    .save_translation(
                        resource,
                        record_id,
                        Language::Hindi,
                        &snapshot.fields,
                        snapshot.exists,
                    )
                    .await
                {
                    Ok(()) => {
                        state.set(TranslationState {
                            exists: true,
                            saving: false,
                            ..snapshot
                        });
                        on_toast.emit(ToastMessage::success("Hindi translation saved"));
                    }
                    Err(e) => {
                        state.set(TranslationState {
                            saving: false,
                            ..snapshot
                        });
                        // Distinct from the English-save failure: the parent
                        // record is already committed and stays committed.
                        on_toast.emit(ToastMessage::error(format!(
                            "Translation save failed: {}",
                            e
                        )));
                    }
                }
            });
        })
    };

    let delete = {
        let state = state.clone();
        let api_client = api_client.clone();
        let on_toast = on_toast.clone();
        Callback::from(move |record_id: i64| {
            let snapshot = (*state).clone();
            let state = state.clone();
            let api_client = api_client.clone();
            let on_toast = on_toast.clone();
            spawn_local(async move {
                match api_client
                    .delete_translation(resource, record_id, Language::Hindi)
                    .await
                {
                    Ok(()) => {
                        state.set(TranslationState::default());
                        on_toast.emit(ToastMessage::success("Hindi translation deleted"));
                    }
                    Err(e) => {
                        state.set(snapshot);
                        on_toast.emit(ToastMessage::error(format!(
                            "Failed to delete translation: {}",
                            e
                        )));
                    }
                }
            });
        })
    };

    UseTranslationResult {
        state: (*state).clone(),
        actions: UseTranslationActions {
            load,
            set_fields,
            save,
            delete,
        },
    }
}
