//! Pure, side-effect-free validation for the registrant form.
//!
//! `validate_registrant` is the single gate the form screen runs before
//! submission: it takes the current form state and today's date, and returns
//! a typed error structure. Calling it twice on unchanged input returns an
//! identical result.

use chrono::NaiveDate;

use crate::{ChildEntry, MaritalStatus, RegistrantForm};

/// Minimum registrant age. The source carried two validator variants, one
/// with and one without this rule; the stricter one is enforced here.
pub const MIN_REGISTRANT_AGE: u32 = 18;

/// Indian mobile number: exactly 10 digits, first digit 6-9.
pub fn is_valid_mobile(mobile: &str) -> bool {
    let mobile = mobile.trim();
    mobile.len() == 10
        && mobile.chars().all(|c| c.is_ascii_digit())
        && matches!(mobile.as_bytes()[0], b'6'..=b'9')
}

/// Postal pincode: exactly 6 digits.
pub fn is_valid_pincode(pincode: &str) -> bool {
    let pincode = pincode.trim();
    pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit())
}

fn is_letters_and_spaces(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().all(|c| c.is_alphabetic() || c == ' ')
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Per-child validation errors; an all-`None` entry means the row is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildErrors {
    pub name: Option<String>,
    pub dob: Option<String>,
}

impl ChildErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.dob.is_none()
    }
}

/// Field-keyed validation errors for the registrant form.
///
/// One field per rule group; `None` means valid. `children` holds one entry
/// per form row so the row editor can show errors inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrantErrors {
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub language: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub spouse_name: Option<String>,
    pub spouse_id: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub mobile_no: Option<String>,
    pub hobby: Option<String>,
    pub marital_status: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub education: Option<String>,
    pub profession: Option<String>,
    pub profession_detail: Option<String>,
    pub business_stream: Option<String>,
    pub business_type: Option<String>,
    pub business_code: Option<String>,
    pub children: Vec<ChildErrors>,
}

impl RegistrantErrors {
    pub fn is_empty(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        let fields = [
            &self.role,
            &self.full_name,
            &self.language,
            &self.father_name,
            &self.mother_name,
            &self.spouse_name,
            &self.spouse_id,
            &self.dob,
            &self.gender,
            &self.mobile_no,
            &self.hobby,
            &self.marital_status,
            &self.address,
            &self.pincode,
            &self.city,
            &self.education,
            &self.profession,
            &self.profession_detail,
            &self.business_stream,
            &self.business_type,
            &self.business_code,
        ];
        let field_errors = fields.iter().filter(|f| f.is_some()).count();
        let child_errors = self
            .children
            .iter()
            .map(|c| c.name.is_some() as usize + c.dob.is_some() as usize)
            .sum::<usize>();
        field_errors + child_errors
    }

    /// One-line summary for the aggregate toast shown on a blocked submit.
    pub fn summary(&self) -> String {
        match self.error_count() {
            0 => String::new(),
            1 => "1 field needs attention before the record can be saved".to_string(),
            n => format!("{n} fields need attention before the record can be saved"),
        }
    }
}

fn required(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}

fn validate_child(
    child: &ChildEntry,
    registrant_dob: Option<NaiveDate>,
    registrant_name: &str,
    spouse_name: &str,
    today: NaiveDate,
) -> ChildErrors {
    let mut errors = ChildErrors::default();
    let name = child.name.trim();
    let dob_raw = child.dob.trim();

    // Name and DOB travel together; one without the other is an error.
    if name.is_empty() && !dob_raw.is_empty() {
        errors.name = Some("Child name is required when a date of birth is given".to_string());
    }
    if dob_raw.is_empty() && !name.is_empty() {
        errors.dob = Some("Child date of birth is required when a name is given".to_string());
    }

    if !name.is_empty() {
        if name.chars().count() < 2 {
            errors.name = Some("Child name must be at least 2 characters".to_string());
        } else if name.eq_ignore_ascii_case(registrant_name.trim())
            || (!spouse_name.trim().is_empty() && name.eq_ignore_ascii_case(spouse_name.trim()))
        {
            errors.name = Some("Child name cannot match a parent's name".to_string());
        }
    }

    if !dob_raw.is_empty() {
        match parse_date(dob_raw) {
            None => errors.dob = Some("Child date of birth must be a valid date".to_string()),
            Some(dob) => {
                if dob > today {
                    errors.dob = Some("Child date of birth cannot be in the future".to_string());
                } else if let Some(parent_dob) = registrant_dob {
                    if dob < parent_dob {
                        errors.dob = Some(
                            "Child date of birth cannot be before the registrant's".to_string(),
                        );
                    }
                }
            }
        }
    }

    errors
}

/// Compute the full error map for the registrant form. Pure and idempotent.
pub fn validate_registrant(form: &RegistrantForm, today: NaiveDate) -> RegistrantErrors {
    let mut errors = RegistrantErrors {
        role: required(&form.role, "Role is required"),
        full_name: required(&form.full_name, "Full name is required"),
        language: required(&form.language, "Language is required"),
        father_name: required(&form.father_name, "Father name is required"),
        mother_name: required(&form.mother_name, "Mother name is required"),
        address: required(&form.address, "Address is required"),
        education: required(&form.education, "Education is required"),
        hobby: required(&form.hobby, "Hobby is required"),
        ..RegistrantErrors::default()
    };

    if form.gender.is_none() {
        errors.gender = Some("Gender is required".to_string());
    }

    if form.marital_status.is_none() {
        errors.marital_status = Some("Marital status is required".to_string());
    }

    if !is_valid_mobile(&form.mobile_no) {
        errors.mobile_no = Some("Mobile number must be 10 digits starting with 6-9".to_string());
    }

    if !is_valid_pincode(&form.pincode) {
        errors.pincode = Some("Pincode must be exactly 6 digits".to_string());
    }

    if form.city_code.trim().is_empty()
        || form.district_code.trim().is_empty()
        || form.state_code.trim().is_empty()
    {
        errors.city = Some("City, district and state are required".to_string());
    }

    if form.profession_id.trim().is_empty() {
        errors.profession = Some("Profession is required".to_string());
    }
    if form.profession_detail.trim().chars().count() < 10 {
        errors.profession_detail =
            Some("Profession description must be at least 10 characters".to_string());
    }

    // Date of birth: required, in the past, and of age.
    let registrant_dob = match form.dob.trim() {
        "" => {
            errors.dob = Some("Date of birth is required".to_string());
            None
        }
        raw => match parse_date(raw) {
            None => {
                errors.dob = Some("Date of birth must be a valid date".to_string());
                None
            }
            Some(dob) => {
                if dob > today {
                    errors.dob = Some("Date of birth cannot be in the future".to_string());
                    None
                } else if today.years_since(dob).unwrap_or(0) < MIN_REGISTRANT_AGE {
                    errors.dob = Some(format!(
                        "Registrant must be at least {MIN_REGISTRANT_AGE} years old"
                    ));
                    Some(dob)
                } else {
                    Some(dob)
                }
            }
        },
    };

    if form.marital_status == Some(MaritalStatus::Yes) {
        let spouse = form.spouse_name.trim();
        if spouse.is_empty() {
            errors.spouse_name = Some("Spouse name is required when married".to_string());
        } else if spouse.chars().count() < 3 {
            errors.spouse_name = Some("Spouse name must be at least 3 characters".to_string());
        } else if !is_letters_and_spaces(spouse) {
            errors.spouse_name =
                Some("Spouse name may only contain letters and spaces".to_string());
        } else if spouse.eq_ignore_ascii_case(form.full_name.trim()) {
            errors.spouse_name =
                Some("Spouse name cannot match the registrant's own name".to_string());
        }

        // Defense-in-depth with the lookup-time check in `relative`.
        if let Some(spouse_id) = form.spouse_id {
            if form.father_id == Some(spouse_id) || form.mother_id == Some(spouse_id) {
                errors.spouse_id =
                    Some("Spouse cannot be the same person as a parent".to_string());
            }
        }
    }

    if form.business_interest == Some(MaritalStatus::Yes) {
        errors.business_stream = required(&form.business_stream, "Business stream is required");
        errors.business_type = required(&form.business_type, "Business type is required");
        errors.business_code = required(&form.business_code, "Business code is required");
    }

    errors.children = form
        .children
        .iter()
        .map(|child| {
            if child.is_blank() {
                ChildErrors::default()
            } else {
                validate_child(
                    child,
                    registrant_dob,
                    &form.full_name,
                    &form.spouse_name,
                    today,
                )
            }
        })
        .collect();

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn valid_form() -> RegistrantForm {
        RegistrantForm {
            role: "member".to_string(),
            full_name: "Suresh Kumar".to_string(),
            language: "en".to_string(),
            father_name: "Ramesh Kumar".to_string(),
            father_id: Some(10),
            mother_name: "Sita Kumar".to_string(),
            mother_id: Some(11),
            dob: "1990-05-14".to_string(),
            gender: Some(Gender::Male),
            mobile_no: "9876543210".to_string(),
            hobby: "Reading".to_string(),
            marital_status: Some(MaritalStatus::No),
            address: "12 Temple Road".to_string(),
            pincode: "400001".to_string(),
            city_code: "101".to_string(),
            district_code: "21".to_string(),
            state_code: "7".to_string(),
            area: "Fort".to_string(),
            education: "Graduate".to_string(),
            profession_id: "7".to_string(),
            profession_detail: "General physician in private practice".to_string(),
            business_interest: Some(MaritalStatus::No),
            ..RegistrantForm::default()
        }
    }

    #[test]
    fn valid_form_produces_no_errors() {
        let errors = validate_registrant(&valid_form(), today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn validator_is_idempotent() {
        let form = RegistrantForm {
            mobile_no: "12345".to_string(),
            ..valid_form()
        };
        let first = validate_registrant(&form, today());
        let second = validate_registrant(&form, today());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let errors = validate_registrant(&RegistrantForm::default(), today());
        assert!(errors.role.is_some());
        assert!(errors.full_name.is_some());
        assert!(errors.language.is_some());
        assert!(errors.father_name.is_some());
        assert!(errors.mother_name.is_some());
        assert!(errors.gender.is_some());
        assert!(errors.dob.is_some());
        assert!(errors.mobile_no.is_some());
        assert!(errors.marital_status.is_some());
        assert!(errors.address.is_some());
        assert!(errors.pincode.is_some());
        assert!(errors.city.is_some());
        assert!(errors.education.is_some());
        assert!(errors.profession.is_some());
        assert!(errors.profession_detail.is_some());
        assert!(errors.hobby.is_some());
        assert!(!errors.is_empty());
    }

    #[test]
    fn mobile_number_rule() {
        assert!(is_valid_mobile("9876543210"));
        assert!(is_valid_mobile("6000000000"));
        assert!(!is_valid_mobile("5876543210")); // first digit below 6
        assert!(!is_valid_mobile("987654321")); // 9 digits
        assert!(!is_valid_mobile("98765432101")); // 11 digits
        assert!(!is_valid_mobile("98765a3210"));
        assert!(!is_valid_mobile(""));
    }

    #[test]
    fn pincode_rule() {
        assert!(is_valid_pincode("400001"));
        assert!(!is_valid_pincode("4001"));
        assert!(!is_valid_pincode("40000a"));
        assert!(!is_valid_pincode("4000011"));
    }

    #[test]
    fn dob_cannot_be_in_the_future() {
        let form = RegistrantForm {
            dob: "2030-01-01".to_string(),
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert_eq!(
            errors.dob.as_deref(),
            Some("Date of birth cannot be in the future")
        );
    }

    #[test]
    fn registrant_must_be_an_adult() {
        let form = RegistrantForm {
            dob: "2015-01-01".to_string(),
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors
            .dob
            .as_deref()
            .unwrap()
            .contains("at least 18 years old"));
    }

    #[test]
    fn married_requires_spouse_name() {
        let form = RegistrantForm {
            marital_status: Some(MaritalStatus::Yes),
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert_eq!(
            errors.spouse_name.as_deref(),
            Some("Spouse name is required when married")
        );
    }

    #[test]
    fn spouse_name_rules() {
        let base = RegistrantForm {
            marital_status: Some(MaritalStatus::Yes),
            ..valid_form()
        };

        let short = RegistrantForm {
            spouse_name: "Jo".to_string(),
            ..base.clone()
        };
        assert!(validate_registrant(&short, today())
            .spouse_name
            .unwrap()
            .contains("at least 3 characters"));

        let digits = RegistrantForm {
            spouse_name: "Asha123".to_string(),
            ..base.clone()
        };
        assert!(validate_registrant(&digits, today())
            .spouse_name
            .unwrap()
            .contains("letters and spaces"));

        let own_name = RegistrantForm {
            spouse_name: "suresh kumar".to_string(),
            ..base.clone()
        };
        assert!(validate_registrant(&own_name, today())
            .spouse_name
            .unwrap()
            .contains("own name"));

        let ok = RegistrantForm {
            spouse_name: "Priya Kumar".to_string(),
            ..base
        };
        assert!(validate_registrant(&ok, today()).spouse_name.is_none());
    }

    #[test]
    fn spouse_id_cannot_match_a_parent() {
        let form = RegistrantForm {
            marital_status: Some(MaritalStatus::Yes),
            spouse_name: "Priya Kumar".to_string(),
            spouse_id: Some(10), // same as father_id in valid_form()
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors.spouse_id.is_some());
        assert!(!errors.is_empty());
    }

    #[test]
    fn business_fields_required_only_with_interest() {
        let interested = RegistrantForm {
            business_interest: Some(MaritalStatus::Yes),
            ..valid_form()
        };
        let errors = validate_registrant(&interested, today());
        assert!(errors.business_stream.is_some());
        assert!(errors.business_type.is_some());
        assert!(errors.business_code.is_some());

        let not_interested = valid_form();
        let errors = validate_registrant(&not_interested, today());
        assert!(errors.business_stream.is_none());
        assert!(errors.business_type.is_none());
        assert!(errors.business_code.is_none());
    }

    #[test]
    fn child_dob_before_registrant_dob_is_rejected() {
        let form = RegistrantForm {
            children: vec![ChildEntry {
                name: "Asha".to_string(),
                dob: "1980-01-01".to_string(), // before the 1990 registrant DOB
            }],
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors.children[0]
            .dob
            .as_deref()
            .unwrap()
            .contains("before the registrant's"));
    }

    #[test]
    fn child_dob_in_the_future_is_rejected() {
        let form = RegistrantForm {
            children: vec![ChildEntry {
                name: "Asha".to_string(),
                dob: "2030-01-01".to_string(),
            }],
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors.children[0].dob.as_deref().unwrap().contains("future"));
    }

    #[test]
    fn child_name_and_dob_travel_together() {
        let form = RegistrantForm {
            children: vec![
                ChildEntry {
                    name: "Asha".to_string(),
                    dob: String::new(),
                },
                ChildEntry {
                    name: String::new(),
                    dob: "2015-03-01".to_string(),
                },
            ],
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors.children[0].dob.is_some());
        assert!(errors.children[0].name.is_none());
        assert!(errors.children[1].name.is_some());
        assert!(errors.children[1].dob.is_none());
    }

    #[test]
    fn child_name_rules() {
        let form = RegistrantForm {
            children: vec![
                ChildEntry {
                    name: "A".to_string(),
                    dob: "2015-03-01".to_string(),
                },
                ChildEntry {
                    name: "Suresh Kumar".to_string(), // matches the registrant
                    dob: "2016-03-01".to_string(),
                },
            ],
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors.children[0]
            .name
            .as_deref()
            .unwrap()
            .contains("at least 2 characters"));
        assert!(errors.children[1]
            .name
            .as_deref()
            .unwrap()
            .contains("parent's name"));
    }

    #[test]
    fn blank_child_rows_are_ignored() {
        let form = RegistrantForm {
            children: vec![ChildEntry::default(), ChildEntry::default()],
            ..valid_form()
        };
        let errors = validate_registrant(&form, today());
        assert!(errors.is_empty());
        assert_eq!(errors.children.len(), 2);
    }

    #[test]
    fn summary_counts_errors() {
        let errors = validate_registrant(&RegistrantForm::default(), today());
        assert!(errors.summary().contains("need attention"));
        assert!(validate_registrant(&valid_form(), today())
            .summary()
            .is_empty());
    }
}
