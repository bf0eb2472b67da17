use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::{relative, Gender, RelativeRole};

use crate::components::toast::ToastMessage;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// How long a unique-id field must be quiet before a lookup fires.
const DEBOUNCE_MS: u32 = 400;

/// A lookup request, snapshotted from the form at keystroke time.
#[derive(Clone, PartialEq)]
pub struct ResolveRequest {
    pub role: RelativeRole,
    pub unique_id: String,
    /// Registrant's currently selected gender; only the spouse rule reads it.
    pub registrant_gender: Option<Gender>,
    /// Already-committed parent ids, for the spouse collision rule.
    pub father_id: Option<i64>,
    pub mother_id: Option<i64>,
}

/// What the form should do with a finished lookup.
#[derive(Clone, PartialEq)]
pub enum ResolveOutcome {
    /// Empty input, or a failed resolution: clear the role's name and id.
    Cleared { role: RelativeRole },
    /// Commit the resolved display name and internal id.
    Resolved {
        role: RelativeRole,
        name: String,
        id: i64,
    },
}

/// Role-specific resolution errors, shown inline next to each id field.
#[derive(Clone, PartialEq, Default)]
pub struct RelativeErrors {
    pub father: Option<String>,
    pub mother: Option<String>,
    pub spouse: Option<String>,
}

impl RelativeErrors {
    pub fn get(&self, role: RelativeRole) -> Option<&String> {
        match role {
            RelativeRole::Father => self.father.as_ref(),
            RelativeRole::Mother => self.mother.as_ref(),
            RelativeRole::Spouse => self.spouse.as_ref(),
        }
    }

    fn set(&mut self, role: RelativeRole, error: Option<String>) {
        match role {
            RelativeRole::Father => self.father = error,
            RelativeRole::Mother => self.mother = error,
            RelativeRole::Spouse => self.spouse = error,
        }
    }
}

fn role_index(role: RelativeRole) -> usize {
    match role {
        RelativeRole::Father => 0,
        RelativeRole::Mother => 1,
        RelativeRole::Spouse => 2,
    }
}

/// Per-role debounce generations. Every keystroke bumps its role's counter;
/// a scheduled lookup only survives if its generation is still current, and
/// must stay current through both the quiet period and the network await.
#[derive(Default)]
struct LookupGenerations([u32; 3]);

impl LookupGenerations {
    fn bump(&mut self, role: RelativeRole) -> u32 {
        let slot = &mut self.0[role_index(role)];
        *slot = slot.wrapping_add(1);
        *slot
    }

    fn is_current(&self, role: RelativeRole, generation: u32) -> bool {
        self.0[role_index(role)] == generation
    }
}

pub struct UseRelativeLookupResult {
    pub errors: RelativeErrors,
    pub resolve: Callback<ResolveRequest>,
}

/// Debounced unique-id resolution for the father/mother/spouse fields.
///
/// Lookups are cancel-and-restart debounced per role: every keystroke bumps a
/// generation counter, and only the latest scheduled lookup survives the
/// quiet period. Outcomes are handed back through `on_outcome`; the form owns
/// committing the name/id into its state.
#[hook]
pub fn use_relative_lookup(
    api_client: &ApiClient,
    on_outcome: Callback<ResolveOutcome>,
    on_toast: Callback<ToastMessage>,
) -> UseRelativeLookupResult {
    let errors = use_state(RelativeErrors::default);
    let generations = use_mut_ref(LookupGenerations::default);

    let resolve = {
        let errors = errors.clone();
        let api_client = api_client.clone();
        Callback::from(move |request: ResolveRequest| {
            let role = request.role;
            let generation = generations.borrow_mut().bump(role);

            // Empty input clears the fields and the role error immediately;
            // this is a no-op success, not a failure.
            if request.unique_id.trim().is_empty() {
                let mut next = (*errors).clone();
                next.set(role, None);
                errors.set(next);
                on_outcome.emit(ResolveOutcome::Cleared { role });
                return;
            }

            let errors = errors.clone();
            let api_client = api_client.clone();
            let on_outcome = on_outcome.clone();
            let on_toast = on_toast.clone();
            let generations = generations.clone();
            spawn_local(async move {
                TimeoutFuture::new(DEBOUNCE_MS).await;
                if !generations.borrow().is_current(role, generation) {
                    // A newer keystroke superseded this lookup.
                    return;
                }

                let result = api_client.lookup_person(&request.unique_id).await;
                // Re-checked after the network await: a slow response for an
                // old id must not overwrite a newer lookup's outcome.
                if !generations.borrow().is_current(role, generation) {
                    Logger::debug_with_component(
                        "relative-lookup",
                        "stale lookup response discarded",
                    );
                    return;
                }

                match result {
                    Err(e) => {
                        Logger::error_with_component("relative-lookup", &e);
                        on_toast.emit(ToastMessage::error(e));
                    }
                    Ok(None) => {
                        // Not found is not a blocking error; required-field
                        // rules still gate submission.
                        let mut next = (*errors).clone();
                        next.set(role, None);
                        errors.set(next);
                        on_outcome.emit(ResolveOutcome::Cleared { role });
                        on_toast.emit(ToastMessage::info(format!(
                            "No user found for id \"{}\"",
                            request.unique_id.trim()
                        )));
                    }
                    Ok(Some(person)) => {
                        match relative::check_resolution(
                            role,
                            &person,
                            request.registrant_gender,
                            request.father_id,
                            request.mother_id,
                        ) {
                            Ok(()) => {
                                let mut next = (*errors).clone();
                                next.set(role, None);
                                errors.set(next);
                                on_outcome.emit(ResolveOutcome::Resolved {
                                    role,
                                    name: person.full_name.clone(),
                                    id: person.id,
                                });
                            }
                            Err(rule_error) => {
                                let message = rule_error.to_string();
                                let mut next = (*errors).clone();
                                next.set(role, Some(message.clone()));
                                errors.set(next);
                                on_outcome.emit(ResolveOutcome::Cleared { role });
                                on_toast.emit(ToastMessage::error(message));
                            }
                        }
                    }
                }
            });
        })
    };

    UseRelativeLookupResult {
        errors: (*errors).clone(),
        resolve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_keystroke_supersedes_pending_lookup() {
        let mut generations = LookupGenerations::default();
        let first = generations.bump(RelativeRole::Father);
        assert!(generations.is_current(RelativeRole::Father, first));

        // A second keystroke invalidates the first lookup for good; the
        // first generation must stay stale even after its network await.
        let second = generations.bump(RelativeRole::Father);
        assert!(!generations.is_current(RelativeRole::Father, first));
        assert!(generations.is_current(RelativeRole::Father, second));
    }

    #[test]
    fn roles_track_generations_independently() {
        let mut generations = LookupGenerations::default();
        let father = generations.bump(RelativeRole::Father);
        generations.bump(RelativeRole::Spouse);

        assert!(generations.is_current(RelativeRole::Father, father));
        assert!(!generations.is_current(RelativeRole::Mother, father));
    }
}
