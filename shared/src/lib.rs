use serde::{Deserialize, Serialize};
use std::fmt;

pub mod otp;
pub mod relative;
pub mod validation;

pub use otp::{OtpPhase, OtpSession};
pub use relative::{RelativeError, RelativeRole};
pub use validation::{validate_registrant, ChildErrors, RegistrantErrors};

/// Gender as selected on the registration form.
///
/// The remote API is inconsistent about how it spells gender on the wire
/// ("Male", "M", "male" have all been observed), so [`Gender::parse`] accepts
/// every spelling and serialization always writes the long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse any wire spelling of a gender value.
    pub fn parse(raw: &str) -> Option<Gender> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            "other" | "o" => Some(Gender::Other),
            _ => None,
        }
    }

    /// The opposite gender, used by the spouse resolution rule.
    /// `Other` has no opposite.
    pub fn opposite(&self) -> Option<Gender> {
        match self {
            Gender::Male => Some(Gender::Female),
            Gender::Female => Some(Gender::Male),
            Gender::Other => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content language for the bilingual records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    /// Language code used in translation endpoint paths.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }
}

/// Marital status as the form and the wire represent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Yes,
    No,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Yes => "Yes",
            MaritalStatus::No => "No",
        }
    }

    pub fn parse(raw: &str) -> Option<MaritalStatus> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Some(MaritalStatus::Yes),
            "no" | "n" => Some(MaritalStatus::No),
            _ => None,
        }
    }
}

/// A person record as returned by the unique-id lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "PR_ID")]
    pub id: i64,
    #[serde(rename = "PR_UNIQUE_ID", default)]
    pub unique_id: String,
    #[serde(rename = "PR_FULL_NAME", default)]
    pub full_name: String,
    /// Raw wire gender value; use [`PersonRecord::gender`] to interpret it.
    #[serde(rename = "PR_GENDER", default)]
    pub gender_raw: String,
    #[serde(rename = "PR_MOBILE_NO", default)]
    pub mobile_no: Option<String>,
    #[serde(rename = "PR_DOB", default)]
    pub dob: Option<String>,
}

impl PersonRecord {
    pub fn gender(&self) -> Option<Gender> {
        Gender::parse(&self.gender_raw)
    }
}

/// A child row on the registration form (name + date of birth, YYYY-MM-DD).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildEntry {
    #[serde(rename = "CH_NAME", default)]
    pub name: String,
    #[serde(rename = "CH_DOB", default)]
    pub dob: String,
}

impl ChildEntry {
    /// A row the user never touched; skipped by validation and submission.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.dob.trim().is_empty()
    }
}

/// Typed state for the registrant add/edit form.
///
/// Every field the screen binds lives here under a compile-time-checked name;
/// the stringly-keyed bag the remote schema suggests is deliberately not
/// reproduced on the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrantForm {
    pub role: String,
    pub full_name: String,
    pub language: String,
    pub father_unique_id: String,
    pub father_name: String,
    pub father_id: Option<i64>,
    pub mother_unique_id: String,
    pub mother_name: String,
    pub mother_id: Option<i64>,
    pub spouse_unique_id: String,
    pub spouse_name: String,
    pub spouse_id: Option<i64>,
    /// Date of birth, YYYY-MM-DD.
    pub dob: String,
    pub gender: Option<Gender>,
    pub mobile_no: String,
    pub hobby: String,
    pub marital_status: Option<MaritalStatus>,
    pub address: String,
    pub pincode: String,
    pub city_code: String,
    pub district_code: String,
    pub state_code: String,
    pub area: String,
    pub education: String,
    pub profession_id: String,
    pub profession_detail: String,
    pub business_interest: Option<MaritalStatus>,
    pub business_stream: String,
    pub business_type: String,
    pub business_code: String,
    pub children: Vec<ChildEntry>,
}

/// Wire shape for person create/update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrantPayload {
    #[serde(rename = "PR_ROLE")]
    pub role: String,
    #[serde(rename = "PR_FULL_NAME")]
    pub full_name: String,
    #[serde(rename = "PR_LANG")]
    pub language: String,
    #[serde(rename = "PR_FATHER_NAME")]
    pub father_name: String,
    #[serde(rename = "PR_FATHER_ID", skip_serializing_if = "Option::is_none")]
    pub father_id: Option<i64>,
    #[serde(rename = "PR_MOTHER_NAME")]
    pub mother_name: String,
    #[serde(rename = "PR_MOTHER_ID", skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<i64>,
    #[serde(rename = "PR_SPOUSE_NAME", skip_serializing_if = "Option::is_none")]
    pub spouse_name: Option<String>,
    #[serde(rename = "PR_SPOUSE_ID", skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<i64>,
    #[serde(rename = "PR_DOB")]
    pub dob: String,
    #[serde(rename = "PR_GENDER")]
    pub gender: String,
    #[serde(rename = "PR_MOBILE_NO")]
    pub mobile_no: String,
    #[serde(rename = "PR_HOBBY")]
    pub hobby: String,
    #[serde(rename = "PR_MARRIED_YN")]
    pub married: String,
    #[serde(rename = "PR_ADDRESS")]
    pub address: String,
    #[serde(rename = "PR_PIN_CODE")]
    pub pincode: String,
    #[serde(rename = "PR_CITY_CODE", skip_serializing_if = "Option::is_none")]
    pub city_code: Option<i64>,
    #[serde(rename = "PR_DISTRICT_CODE", skip_serializing_if = "Option::is_none")]
    pub district_code: Option<i64>,
    #[serde(rename = "PR_STATE_CODE", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<i64>,
    #[serde(rename = "PR_AREA_NAME")]
    pub area: String,
    #[serde(rename = "PR_EDUCATION")]
    pub education: String,
    #[serde(rename = "PR_PROFESSION_ID", skip_serializing_if = "Option::is_none")]
    pub profession_id: Option<i64>,
    #[serde(rename = "PR_PROFESSION_DETA")]
    pub profession_detail: String,
    #[serde(rename = "PR_BUSINESS_INTER")]
    pub business_interest: String,
    #[serde(rename = "PR_BUSINESS_STREAM", skip_serializing_if = "Option::is_none")]
    pub business_stream: Option<String>,
    #[serde(rename = "PR_BUSINESS_TYPE", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(rename = "PR_BUSINESS_CODE", skip_serializing_if = "Option::is_none")]
    pub business_code: Option<String>,
    #[serde(rename = "PR_CHILDS")]
    pub children: Vec<ChildEntry>,
}

impl RegistrantForm {
    /// Serialize the form to the API's expected shape.
    ///
    /// Numeric codes are coerced, blank child rows and unset optional fields
    /// are pruned, and the business fields are cleared entirely when
    /// business interest is No.
    pub fn to_payload(&self) -> RegistrantPayload {
        let married = self.marital_status.unwrap_or(MaritalStatus::No);
        let business = self.business_interest.unwrap_or(MaritalStatus::No);
        let opt_string = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };

        RegistrantPayload {
            role: self.role.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            language: self.language.trim().to_string(),
            father_name: self.father_name.trim().to_string(),
            father_id: self.father_id,
            mother_name: self.mother_name.trim().to_string(),
            mother_id: self.mother_id,
            spouse_name: match married {
                MaritalStatus::Yes => opt_string(&self.spouse_name),
                MaritalStatus::No => None,
            },
            spouse_id: match married {
                MaritalStatus::Yes => self.spouse_id,
                MaritalStatus::No => None,
            },
            dob: self.dob.trim().to_string(),
            gender: self.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
            mobile_no: self.mobile_no.trim().to_string(),
            hobby: self.hobby.trim().to_string(),
            married: married.as_str().to_string(),
            address: self.address.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
            city_code: self.city_code.trim().parse().ok(),
            district_code: self.district_code.trim().parse().ok(),
            state_code: self.state_code.trim().parse().ok(),
            area: self.area.trim().to_string(),
            education: self.education.trim().to_string(),
            profession_id: self.profession_id.trim().parse().ok(),
            profession_detail: self.profession_detail.trim().to_string(),
            business_interest: business.as_str().to_string(),
            business_stream: match business {
                MaritalStatus::Yes => opt_string(&self.business_stream),
                MaritalStatus::No => None,
            },
            business_type: match business {
                MaritalStatus::Yes => opt_string(&self.business_type),
                MaritalStatus::No => None,
            },
            business_code: match business {
                MaritalStatus::Yes => opt_string(&self.business_code),
                MaritalStatus::No => None,
            },
            children: self
                .children
                .iter()
                .filter(|c| !c.is_blank())
                .cloned()
                .collect(),
        }
    }

    /// Rebuild form state from a stored record, for the edit screen.
    ///
    /// The free-typed unique-id inputs are not stored server-side; the
    /// resolved names and internal ids are what round-trips.
    pub fn from_payload(payload: &RegistrantPayload) -> Self {
        RegistrantForm {
            role: payload.role.clone(),
            full_name: payload.full_name.clone(),
            language: payload.language.clone(),
            father_name: payload.father_name.clone(),
            father_id: payload.father_id,
            mother_name: payload.mother_name.clone(),
            mother_id: payload.mother_id,
            spouse_name: payload.spouse_name.clone().unwrap_or_default(),
            spouse_id: payload.spouse_id,
            dob: payload.dob.clone(),
            gender: Gender::parse(&payload.gender),
            mobile_no: payload.mobile_no.clone(),
            hobby: payload.hobby.clone(),
            marital_status: MaritalStatus::parse(&payload.married),
            address: payload.address.clone(),
            pincode: payload.pincode.clone(),
            city_code: payload.city_code.map(|v| v.to_string()).unwrap_or_default(),
            district_code: payload
                .district_code
                .map(|v| v.to_string())
                .unwrap_or_default(),
            state_code: payload.state_code.map(|v| v.to_string()).unwrap_or_default(),
            area: payload.area.clone(),
            education: payload.education.clone(),
            profession_id: payload
                .profession_id
                .map(|v| v.to_string())
                .unwrap_or_default(),
            profession_detail: payload.profession_detail.clone(),
            business_interest: MaritalStatus::parse(&payload.business_interest),
            business_stream: payload.business_stream.clone().unwrap_or_default(),
            business_type: payload.business_type.clone().unwrap_or_default(),
            business_code: payload.business_code.clone().unwrap_or_default(),
            children: payload.children.clone(),
            ..RegistrantForm::default()
        }
    }
}

// --- reference lists ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hobby {
    #[serde(rename = "HOBBY_ID")]
    pub id: i64,
    #[serde(rename = "HOBBY_NAME", default)]
    pub name: String,
}

/// A city reference row; one row per (city, pincode, area) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(rename = "CITY_ID")]
    pub id: i64,
    #[serde(rename = "CITY_PIN_CODE", default)]
    pub pincode: String,
    #[serde(rename = "CITY_NAME", default)]
    pub name: String,
    #[serde(rename = "CITY_DS_CODE", default)]
    pub district_code: String,
    #[serde(rename = "CITY_ST_CODE", default)]
    pub state_code: String,
    #[serde(rename = "CITY_AREA", default)]
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationLevel {
    #[serde(rename = "EDU_ID")]
    pub id: i64,
    #[serde(rename = "EDU_NAME", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    #[serde(rename = "PROF_ID")]
    pub id: i64,
    #[serde(rename = "PROF_NAME", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessStream {
    #[serde(rename = "STREAM_ID")]
    pub id: i64,
    #[serde(rename = "STREAM_NAME", default)]
    pub name: String,
    #[serde(rename = "STREAM_CODE", default)]
    pub code: String,
}

// --- envelopes ---

/// The uniform `{ success, data, message }` envelope most endpoints return.
///
/// Every field except `success` is optional because the API is not consistent
/// about which ones it includes on error paths.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Legacy categories list shape: `{ categories: [...] }`, no envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Legacy professions list shape: `{ professions: [...] }`, no envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfessionsEnvelope {
    #[serde(default)]
    pub professions: Vec<Profession>,
}

/// Category create returns its own bespoke shape:
/// `{ success: true, category: { CATE_ID: 42, ... } }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedCategoryEnvelope {
    pub success: bool,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from person create/update and OTP verification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonSaveResponse {
    pub success: bool,
    #[serde(rename = "PR_ID", default)]
    pub person_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

// --- content records ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "CATE_ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "CATE_NAME", default)]
    pub name: String,
    #[serde(rename = "CATE_DESC", default)]
    pub description: String,
    #[serde(rename = "CATE_IMAGE", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "EVENT_ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "EVENT_TITLE", default)]
    pub title: String,
    #[serde(rename = "EVENT_DESC", default)]
    pub description: String,
    /// Event date, YYYY-MM-DD.
    #[serde(rename = "EVENT_DATE", default)]
    pub event_date: String,
    #[serde(rename = "EVENT_VENUE", default)]
    pub venue: String,
    /// Gallery image URLs, comma-joined on the wire.
    #[serde(rename = "EVENT_GALLERY", default)]
    pub gallery: String,
}

impl Event {
    pub fn gallery_urls(&self) -> Vec<String> {
        self.gallery
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn set_gallery_urls(&mut self, urls: &[String]) {
        self.gallery = urls.join(",");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(rename = "SECTION_ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "SECTION_TITLE", default)]
    pub title: String,
    #[serde(rename = "SECTION_BODY", default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "PAGE_ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "PAGE_TITLE", default)]
    pub title: String,
    #[serde(rename = "PAGE_SLUG", default)]
    pub slug: String,
    #[serde(rename = "PAGE_BODY", default)]
    pub body: String,
}

/// A language-specific variant of a content record, stored independently of
/// the parent through the per-resource translation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationFields {
    #[serde(rename = "TR_TITLE", default)]
    pub title: String,
    #[serde(rename = "TR_BODY", default)]
    pub body: String,
}

impl TranslationFields {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }
}

// --- OTP wire types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOtpRequest {
    #[serde(rename = "PR_MOBILE_NO")]
    pub mobile_no: String,
}

/// Verification sends identity fields alongside the code so the server can
/// cross-check the person, not just the number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(rename = "PR_MOBILE_NO")]
    pub mobile_no: String,
    #[serde(rename = "PR_FULL_NAME")]
    pub full_name: String,
    #[serde(rename = "PR_DOB")]
    pub dob: String,
    #[serde(rename = "PR_ROLE")]
    pub role: String,
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OtpResponse {
    pub success: bool,
    #[serde(rename = "PR_ID", default)]
    pub person_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Image upload response: `{ status: "success", url: "/uploads/…" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_accepts_wire_spellings() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::parse("f"), Some(Gender::Female));
        assert_eq!(Gender::parse(" female "), Some(Gender::Female));
        assert_eq!(Gender::parse("O"), Some(Gender::Other));
        assert_eq!(Gender::parse("unknown"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn gender_opposite() {
        assert_eq!(Gender::Male.opposite(), Some(Gender::Female));
        assert_eq!(Gender::Female.opposite(), Some(Gender::Male));
        assert_eq!(Gender::Other.opposite(), None);
    }

    #[test]
    fn event_gallery_round_trip() {
        let mut event = Event::default();
        event.set_gallery_urls(&[
            "/uploads/a.jpg".to_string(),
            "/uploads/b.jpg".to_string(),
        ]);
        assert_eq!(event.gallery, "/uploads/a.jpg,/uploads/b.jpg");
        assert_eq!(
            event.gallery_urls(),
            vec!["/uploads/a.jpg".to_string(), "/uploads/b.jpg".to_string()]
        );
    }

    #[test]
    fn event_date_round_trips_on_the_wire() {
        let event = Event {
            event_date: "2026-03-01".to_string(),
            ..Event::default()
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["EVENT_DATE"], "2026-03-01");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back.event_date, "2026-03-01");
    }

    #[test]
    fn event_gallery_tolerates_padding_and_empties() {
        let event = Event {
            gallery: " /a.jpg ,, /b.jpg,".to_string(),
            ..Event::default()
        };
        assert_eq!(
            event.gallery_urls(),
            vec!["/a.jpg".to_string(), "/b.jpg".to_string()]
        );
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let env: ApiEnvelope<Vec<Hobby>> =
            serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert!(env.message.is_none());
    }

    #[test]
    fn envelope_works_for_non_default_payloads() {
        // PersonRecord has no Default impl; the envelope must not demand one.
        let env: ApiEnvelope<PersonRecord> = serde_json::from_str(
            r#"{"success":true,"data":{"PR_ID":9,"PR_UNIQUE_ID":"FAM-9","PR_FULL_NAME":"Suresh","PR_GENDER":"M"}}"#,
        )
        .unwrap();
        assert!(env.success);
        let person = env.data.unwrap();
        assert_eq!(person.id, 9);
        assert_eq!(person.full_name, "Suresh");

        let env: ApiEnvelope<PersonRecord> =
            serde_json::from_str(r#"{"success":false,"message":"not found"}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("not found"));
    }

    #[test]
    fn legacy_professions_envelope() {
        let env: ProfessionsEnvelope = serde_json::from_str(
            r#"{"professions":[{"PROF_ID":7,"PROF_NAME":"Doctor"}]}"#,
        )
        .unwrap();
        assert_eq!(env.professions.len(), 1);
        assert_eq!(env.professions[0].id, 7);
        assert_eq!(env.professions[0].name, "Doctor");
    }

    #[test]
    fn created_category_envelope() {
        let env: CreatedCategoryEnvelope =
            serde_json::from_str(r#"{"success":true,"category":{"CATE_ID":42,"CATE_NAME":"News"}}"#)
                .unwrap();
        assert!(env.success);
        assert_eq!(env.category.unwrap().id, Some(42));
    }

    #[test]
    fn payload_prunes_business_fields_when_no_interest() {
        let form = RegistrantForm {
            business_interest: Some(MaritalStatus::No),
            business_stream: "Retail".to_string(),
            business_type: "Shop".to_string(),
            business_code: "RT01".to_string(),
            ..RegistrantForm::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.business_interest, "No");
        assert!(payload.business_stream.is_none());
        assert!(payload.business_type.is_none());
        assert!(payload.business_code.is_none());
    }

    #[test]
    fn payload_prunes_spouse_when_unmarried() {
        let form = RegistrantForm {
            marital_status: Some(MaritalStatus::No),
            spouse_name: "Someone".to_string(),
            spouse_id: Some(9),
            ..RegistrantForm::default()
        };
        let payload = form.to_payload();
        assert!(payload.spouse_name.is_none());
        assert!(payload.spouse_id.is_none());
    }

    #[test]
    fn payload_coerces_numeric_codes() {
        let form = RegistrantForm {
            city_code: "101".to_string(),
            district_code: "".to_string(),
            state_code: "not-a-number".to_string(),
            profession_id: "7".to_string(),
            ..RegistrantForm::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.city_code, Some(101));
        assert_eq!(payload.district_code, None);
        assert_eq!(payload.state_code, None);
        assert_eq!(payload.profession_id, Some(7));
    }

    #[test]
    fn payload_drops_blank_child_rows() {
        let form = RegistrantForm {
            children: vec![
                ChildEntry {
                    name: "Asha".to_string(),
                    dob: "2015-02-01".to_string(),
                },
                ChildEntry::default(),
            ],
            ..RegistrantForm::default()
        };
        assert_eq!(form.to_payload().children.len(), 1);
    }

    #[test]
    fn from_payload_restores_edit_state() {
        let form = RegistrantForm {
            role: "member".to_string(),
            full_name: "Suresh Kumar".to_string(),
            gender: Some(Gender::Male),
            marital_status: Some(MaritalStatus::Yes),
            spouse_name: "Priya Kumar".to_string(),
            spouse_id: Some(12),
            city_code: "101".to_string(),
            mobile_no: "9876543210".to_string(),
            ..RegistrantForm::default()
        };
        let restored = RegistrantForm::from_payload(&form.to_payload());
        assert_eq!(restored.full_name, "Suresh Kumar");
        assert_eq!(restored.gender, Some(Gender::Male));
        assert_eq!(restored.marital_status, Some(MaritalStatus::Yes));
        assert_eq!(restored.spouse_name, "Priya Kumar");
        assert_eq!(restored.spouse_id, Some(12));
        assert_eq!(restored.city_code, "101");
        assert_eq!(restored.mobile_no, "9876543210");
    }

    #[test]
    fn person_record_gender_helper() {
        let record: PersonRecord = serde_json::from_str(
            r#"{"PR_ID":5,"PR_UNIQUE_ID":"FAM-100","PR_FULL_NAME":"Ram","PR_GENDER":"M"}"#,
        )
        .unwrap();
        assert_eq!(record.gender(), Some(Gender::Male));
    }
}
