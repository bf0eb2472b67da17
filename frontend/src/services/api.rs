use gloo::net::http::Request;
use web_sys::FormData;

use shared::{
    ApiEnvelope, CategoriesEnvelope, Category, ContentSection, CreatedCategoryEnvelope,
    Event, GenerateOtpRequest, Hobby, Language, OtpResponse, Page, PersonRecord,
    PersonSaveResponse, ProfessionsEnvelope, RegistrantPayload, TranslationFields,
    UploadResponse, VerifyOtpRequest,
};
use shared::{BusinessStream, City, EducationLevel, Profession};

/// Client for the remote registry API.
///
/// `base_url` fronts the `/admin/...` resources; `upload_url` is the local
/// image upload endpoint; `asset_host` is prefixed onto the relative paths
/// the upload endpoint returns.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    upload_url: String,
    asset_host: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            upload_url: "http://localhost:3000".to_string(),
            asset_host: "https://assets.samajregistry.org".to_string(),
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/admin/{}", self.base_url, path)
    }

    fn translation_url(&self, resource: &str, id: i64, lang: Language) -> String {
        format!(
            "{}/admin/{}/{}/translation/{}",
            self.base_url,
            resource,
            id,
            lang.code()
        )
    }

    /// GET a uniform `{ success, data, message }` envelope and unwrap it.
    async fn get_enveloped<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, String> {
        let url = self.admin_url(path);
        match Request::get(&url).send().await {
            Ok(response) => match response.json::<ApiEnvelope<T>>().await {
                Ok(envelope) => match (envelope.success, envelope.data) {
                    (true, Some(data)) => Ok(data),
                    _ => Err(envelope
                        .message
                        .unwrap_or_else(|| format!("Request to {path} was rejected"))),
                },
                Err(e) => Err(format!("Failed to parse {path} response: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch {path}: {}", e)),
        }
    }

    // --- reference lists ---

    pub async fn get_hobbies(&self) -> Result<Vec<Hobby>, String> {
        self.get_enveloped("hobbies").await
    }

    pub async fn get_cities(&self) -> Result<Vec<City>, String> {
        self.get_enveloped("cities").await
    }

    pub async fn get_education_levels(&self) -> Result<Vec<EducationLevel>, String> {
        self.get_enveloped("education-levels").await
    }

    /// Legacy endpoint: returns a bare `{ professions: [...] }` body with no
    /// envelope around it.
    pub async fn get_professions(&self) -> Result<Vec<Profession>, String> {
        let url = self.admin_url("professions");
        match Request::get(&url).send().await {
            Ok(response) => match response.json::<ProfessionsEnvelope>().await {
                Ok(data) => Ok(data.professions),
                Err(e) => Err(format!("Failed to parse professions: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch professions: {}", e)),
        }
    }

    pub async fn get_business_streams(&self) -> Result<Vec<BusinessStream>, String> {
        self.get_enveloped("business-streams").await
    }

    // --- person records ---

    /// Look up a person by the human-entered unique id. A 404 or an
    /// unsuccessful envelope means "no such person", not a transport error.
    pub async fn lookup_person(&self, unique_id: &str) -> Result<Option<PersonRecord>, String> {
        let url = self.admin_url(&format!("users/by-unique-id/{}", unique_id.trim()));
        match Request::get(&url).send().await {
            Ok(response) => {
                if response.status() == 404 {
                    return Ok(None);
                }
                match response.json::<ApiEnvelope<PersonRecord>>().await {
                    Ok(envelope) => Ok(envelope.success.then_some(envelope.data).flatten()),
                    Err(e) => Err(format!("Failed to parse person lookup: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to look up person: {}", e)),
        }
    }

    pub async fn get_person(&self, id: i64) -> Result<RegistrantPayload, String> {
        self.get_enveloped(&format!("users/{id}")).await
    }

    pub async fn create_person(
        &self,
        payload: &RegistrantPayload,
    ) -> Result<PersonSaveResponse, String> {
        self.send_person(Request::post(&self.admin_url("users")), payload)
            .await
    }

    pub async fn update_person(
        &self,
        id: i64,
        payload: &RegistrantPayload,
    ) -> Result<PersonSaveResponse, String> {
        self.send_person(
            Request::put(&self.admin_url(&format!("users/{id}"))),
            payload,
        )
        .await
    }

    async fn send_person(
        &self,
        builder: gloo::net::http::RequestBuilder,
        payload: &RegistrantPayload,
    ) -> Result<PersonSaveResponse, String> {
        match builder
            .json(payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<PersonSaveResponse>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    // --- OTP ---

    pub async fn generate_otp(&self, mobile_no: &str) -> Result<OtpResponse, String> {
        let request = GenerateOtpRequest {
            mobile_no: mobile_no.to_string(),
        };
        self.post_otp("generate-otp", &request).await
    }

    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<OtpResponse, String> {
        self.post_otp("verify-otp", request).await
    }

    async fn post_otp<R: serde::Serialize>(
        &self,
        path: &str,
        request: &R,
    ) -> Result<OtpResponse, String> {
        match Request::post(&self.admin_url(path))
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => match response.json::<OtpResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse OTP response: {}", e)),
            },
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    // --- categories ---

    /// Legacy endpoint: returns `{ categories: [...] }` with no envelope.
    pub async fn get_categories(&self) -> Result<Vec<Category>, String> {
        let url = self.admin_url("categories");
        match Request::get(&url).send().await {
            Ok(response) => match response.json::<CategoriesEnvelope>().await {
                Ok(data) => Ok(data.categories),
                Err(e) => Err(format!("Failed to parse categories: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch categories: {}", e)),
        }
    }

    /// Category create returns its own bespoke
    /// `{ success, category: { CATE_ID } }` shape.
    pub async fn create_category(&self, category: &Category) -> Result<Category, String> {
        match Request::post(&self.admin_url("categories"))
            .json(category)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<CreatedCategoryEnvelope>().await {
                        Ok(envelope) => match (envelope.success, envelope.category) {
                            (true, Some(category)) => Ok(category),
                            _ => Err(envelope
                                .message
                                .unwrap_or_else(|| "Category create was rejected".to_string())),
                        },
                        Err(e) => Err(format!("Failed to parse category response: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_category(&self, id: i64, category: &Category) -> Result<(), String> {
        self.put_record(&format!("categories/{id}"), category).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), String> {
        self.delete_record(&format!("categories/{id}")).await
    }

    // --- events ---

    pub async fn get_events(&self) -> Result<Vec<Event>, String> {
        self.get_enveloped("events").await
    }

    pub async fn create_event(&self, event: &Event) -> Result<Event, String> {
        self.post_record("events", event).await
    }

    pub async fn update_event(&self, id: i64, event: &Event) -> Result<(), String> {
        self.put_record(&format!("events/{id}"), event).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), String> {
        self.delete_record(&format!("events/{id}")).await
    }

    // --- content sections ---

    pub async fn get_content_sections(&self) -> Result<Vec<ContentSection>, String> {
        self.get_enveloped("content-sections").await
    }

    pub async fn create_content_section(
        &self,
        section: &ContentSection,
    ) -> Result<ContentSection, String> {
        self.post_record("content-sections", section).await
    }

    pub async fn update_content_section(
        &self,
        id: i64,
        section: &ContentSection,
    ) -> Result<(), String> {
        self.put_record(&format!("content-sections/{id}"), section)
            .await
    }

    pub async fn delete_content_section(&self, id: i64) -> Result<(), String> {
        self.delete_record(&format!("content-sections/{id}")).await
    }

    // --- pages ---

    pub async fn get_pages(&self) -> Result<Vec<Page>, String> {
        self.get_enveloped("pages").await
    }

    pub async fn create_page(&self, page: &Page) -> Result<Page, String> {
        self.post_record("pages", page).await
    }

    pub async fn update_page(&self, id: i64, page: &Page) -> Result<(), String> {
        self.put_record(&format!("pages/{id}"), page).await
    }

    pub async fn delete_page(&self, id: i64) -> Result<(), String> {
        self.delete_record(&format!("pages/{id}")).await
    }

    // --- translations (shared across resources) ---

    /// Fetch a record's translation. A 404 means the translation does not
    /// exist yet and is reported as `Ok(None)`.
    pub async fn get_translation(
        &self,
        resource: &str,
        id: i64,
        lang: Language,
    ) -> Result<Option<TranslationFields>, String> {
        let url = self.translation_url(resource, id, lang);
        match Request::get(&url).send().await {
            Ok(response) => {
                if response.status() == 404 {
                    return Ok(None);
                }
                match response.json::<ApiEnvelope<TranslationFields>>().await {
                    Ok(envelope) => Ok(envelope.success.then_some(envelope.data).flatten()),
                    Err(e) => Err(format!("Failed to parse translation: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to fetch translation: {}", e)),
        }
    }

    /// Create or update a translation depending on whether one exists.
    pub async fn save_translation(
        &self,
        resource: &str,
        id: i64,
        lang: Language,
        fields: &TranslationFields,
        exists: bool,
    ) -> Result<(), String> {
        let url = self.translation_url(resource, id, lang);
        let builder = if exists {
            Request::put(&url)
        } else {
            Request::post(&url)
        };
        match builder
            .json(fields)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a translation. The parent record is never touched.
    pub async fn delete_translation(
        &self,
        resource: &str,
        id: i64,
        lang: Language,
    ) -> Result<(), String> {
        let url = self.translation_url(resource, id, lang);
        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    // --- image upload ---

    /// Upload an image as multipart form data (field name `image`) and
    /// return the absolute URL, asset host prefixed onto the relative path
    /// the endpoint returns.
    pub async fn upload_image(&self, file: web_sys::File) -> Result<String, String> {
        let form = FormData::new().map_err(|_| "Failed to build form data".to_string())?;
        form.append_with_blob("image", &file)
            .map_err(|_| "Failed to attach image".to_string())?;

        let url = format!("{}/api/uploadImage", self.upload_url);
        match Request::post(&url)
            .body(form)
            .map_err(|e| format!("Failed to build upload request: {}", e))?
            .send()
            .await
        {
            Ok(response) => match response.json::<UploadResponse>().await {
                Ok(upload) => {
                    if upload.is_success() {
                        match upload.url {
                            Some(path) => Ok(format!("{}{}", self.asset_host, path)),
                            None => Err("Upload succeeded but returned no URL".to_string()),
                        }
                    } else {
                        Err("Image upload failed".to_string())
                    }
                }
                Err(e) => Err(format!("Failed to parse upload response: {}", e)),
            },
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    // --- generic helpers ---

    async fn post_record<T>(&self, path: &str, record: &T) -> Result<T, String>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        match Request::post(&self.admin_url(path))
            .json(record)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<ApiEnvelope<T>>().await {
                        Ok(envelope) => match (envelope.success, envelope.data) {
                            (true, Some(data)) => Ok(data),
                            _ => Err(envelope
                                .message
                                .unwrap_or_else(|| format!("Create at {path} was rejected"))),
                        },
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn put_record<T: serde::Serialize>(&self, path: &str, record: &T) -> Result<(), String> {
        match Request::put(&self.admin_url(path))
            .json(record)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    async fn delete_record(&self, path: &str) -> Result<(), String> {
        match Request::delete(&self.admin_url(path)).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
