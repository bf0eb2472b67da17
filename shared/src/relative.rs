//! Rules for linking a registrant to existing person records.
//!
//! The form lets the operator type a free-text unique id for the father,
//! mother, or spouse; the lookup result must pass these checks before the
//! resolved name and id are committed into the form.

use thiserror::Error;

use crate::{Gender, PersonRecord};

/// Which relationship field a unique id was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeRole {
    Father,
    Mother,
    Spouse,
}

impl RelativeRole {
    pub fn label(&self) -> &'static str {
        match self {
            RelativeRole::Father => "Father",
            RelativeRole::Mother => "Mother",
            RelativeRole::Spouse => "Spouse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelativeError {
    /// Father must be Male, mother must be Female.
    #[error("{0} must be {1}")]
    WrongGender(&'static str, &'static str),
    /// Spouse gender must be the opposite of the registrant's selection.
    #[error("Spouse must be {expected} for a {registrant} registrant")]
    SpouseGenderConflict {
        expected: &'static str,
        registrant: &'static str,
    },
    /// The spouse id matched the father's or mother's resolved id.
    #[error("Spouse cannot be the same person as the registrant's {0}")]
    SameAsParent(&'static str),
    /// The looked-up record carried a gender value the client cannot read.
    #[error("Record has an unrecognized gender value")]
    UnreadableGender,
}

/// Validate a resolved person record against the role it was typed into.
///
/// `registrant_gender` is only consulted for [`RelativeRole::Spouse`]; when it
/// is unset or `Other` the opposite-gender rule is skipped (the id-collision
/// rule still applies). `father_id`/`mother_id` are the already-committed
/// parent ids, used to reject a spouse that duplicates either parent.
pub fn check_resolution(
    role: RelativeRole,
    resolved: &PersonRecord,
    registrant_gender: Option<Gender>,
    father_id: Option<i64>,
    mother_id: Option<i64>,
) -> Result<(), RelativeError> {
    let resolved_gender = resolved.gender().ok_or(RelativeError::UnreadableGender)?;

    match role {
        RelativeRole::Father => {
            if resolved_gender != Gender::Male {
                return Err(RelativeError::WrongGender(role.label(), Gender::Male.as_str()));
            }
        }
        RelativeRole::Mother => {
            if resolved_gender != Gender::Female {
                return Err(RelativeError::WrongGender(
                    role.label(),
                    Gender::Female.as_str(),
                ));
            }
        }
        RelativeRole::Spouse => {
            if father_id == Some(resolved.id) {
                return Err(RelativeError::SameAsParent("father"));
            }
            if mother_id == Some(resolved.id) {
                return Err(RelativeError::SameAsParent("mother"));
            }
            if let Some(expected) = registrant_gender.and_then(|g| g.opposite()) {
                if resolved_gender != expected {
                    return Err(RelativeError::SpouseGenderConflict {
                        expected: expected.as_str(),
                        registrant: registrant_gender
                            .map(|g| g.as_str())
                            .unwrap_or("registered"),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, gender: &str) -> PersonRecord {
        PersonRecord {
            id,
            unique_id: format!("FAM-{id}"),
            full_name: "Test Person".to_string(),
            gender_raw: gender.to_string(),
            mobile_no: None,
            dob: None,
        }
    }

    #[test]
    fn father_must_be_male() {
        let err = check_resolution(RelativeRole::Father, &record(1, "F"), None, None, None)
            .unwrap_err();
        assert_eq!(err, RelativeError::WrongGender("Father", "Male"));
        assert_eq!(err.to_string(), "Father must be Male");

        assert!(check_resolution(RelativeRole::Father, &record(1, "Male"), None, None, None).is_ok());
    }

    #[test]
    fn mother_must_be_female() {
        let err = check_resolution(RelativeRole::Mother, &record(2, "M"), None, None, None)
            .unwrap_err();
        assert_eq!(err, RelativeError::WrongGender("Mother", "Female"));

        assert!(
            check_resolution(RelativeRole::Mother, &record(2, "female"), None, None, None).is_ok()
        );
    }

    #[test]
    fn spouse_must_be_opposite_gender() {
        let err = check_resolution(
            RelativeRole::Spouse,
            &record(3, "M"),
            Some(Gender::Male),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, RelativeError::SpouseGenderConflict { .. }));
        assert_eq!(
            err.to_string(),
            "Spouse must be Female for a Male registrant"
        );

        assert!(check_resolution(
            RelativeRole::Spouse,
            &record(3, "F"),
            Some(Gender::Male),
            None,
            None
        )
        .is_ok());
    }

    #[test]
    fn spouse_gender_rule_skipped_for_other_or_unset() {
        assert!(check_resolution(
            RelativeRole::Spouse,
            &record(3, "M"),
            Some(Gender::Other),
            None,
            None
        )
        .is_ok());
        assert!(check_resolution(RelativeRole::Spouse, &record(3, "M"), None, None, None).is_ok());
    }

    #[test]
    fn spouse_cannot_duplicate_a_parent() {
        let err = check_resolution(
            RelativeRole::Spouse,
            &record(10, "F"),
            Some(Gender::Male),
            Some(10),
            None,
        )
        .unwrap_err();
        assert_eq!(err, RelativeError::SameAsParent("father"));

        let err = check_resolution(
            RelativeRole::Spouse,
            &record(11, "F"),
            Some(Gender::Male),
            Some(10),
            Some(11),
        )
        .unwrap_err();
        assert_eq!(err, RelativeError::SameAsParent("mother"));
    }

    #[test]
    fn unreadable_gender_is_rejected() {
        let err =
            check_resolution(RelativeRole::Father, &record(4, "??"), None, None, None).unwrap_err();
        assert_eq!(err, RelativeError::UnreadableGender);
    }
}
