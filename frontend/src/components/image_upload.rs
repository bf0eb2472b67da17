use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ImageUploadProps {
    pub api_client: ApiClient,
    pub label: String,
    /// Emits the absolute asset URL once the upload finishes.
    pub on_uploaded: Callback<String>,
    pub on_error: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ImageUpload)]
pub fn image_upload(props: &ImageUploadProps) -> Html {
    let uploading = use_state(|| false);

    let on_file_change = {
        let api_client = props.api_client.clone();
        let on_uploaded = props.on_uploaded.clone();
        let on_error = props.on_error.clone();
        let uploading = uploading.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow re-selecting the same file later.
            input.set_value("");

            let api_client = api_client.clone();
            let on_uploaded = on_uploaded.clone();
            let on_error = on_error.clone();
            let uploading = uploading.clone();
            uploading.set(true);
            spawn_local(async move {
                match api_client.upload_image(file).await {
                    Ok(url) => on_uploaded.emit(url),
                    Err(e) => on_error.emit(e),
                }
                uploading.set(false);
            });
        })
    };

    html! {
        <div class="form-group image-upload">
            <label>{&props.label}</label>
            <input
                type="file"
                accept="image/*"
                onchange={on_file_change}
                disabled={props.disabled || *uploading}
            />
            {if *uploading {
                html! { <span class="image-upload-status">{"Uploading..."}</span> }
            } else { html! {} }}
        </div>
    }
}
