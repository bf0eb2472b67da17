use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use shared::{
    validate_registrant, ChildEntry, Gender, MaritalStatus, OtpPhase, RegistrantErrors,
    RegistrantForm as RegistrantFormState, RelativeRole,
};

use crate::components::child_rows::ChildRows;
use crate::components::toast::{Toast, ToastMessage};
use crate::hooks::use_otp::{use_otp, VerifyArgs};
use crate::hooks::use_reference_data::use_reference_data;
use crate::hooks::use_relative_lookup::{use_relative_lookup, ResolveOutcome, ResolveRequest};
use crate::services::api::ApiClient;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct RegistrantFormProps {
    pub api_client: ApiClient,
    /// Edit an existing record when set; create otherwise.
    #[prop_or_default]
    pub person_id: Option<i64>,
}

/// Reducer wrapper so async outcomes (debounced lookups, record loads) apply
/// on top of the latest form state rather than a stale render snapshot.
struct FormState(RegistrantFormState);

impl Reducible for FormState {
    type Action = Box<dyn FnOnce(&mut RegistrantFormState)>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut form = self.0.clone();
        action(&mut form);
        Rc::new(FormState(form))
    }
}

#[function_component(RegistrantScreen)]
pub fn registrant_screen(props: &RegistrantFormProps) -> Html {
    let form = use_reducer(|| FormState(RegistrantFormState::default()));
    let errors = use_state(RegistrantErrors::default);
    let toast = use_state(|| Option::<ToastMessage>::None);
    let submitting = use_state(|| false);
    let otp_code = use_state(String::new);

    let reference = use_reference_data(&props.api_client);
    let otp = use_otp(&props.api_client);

    let on_toast = {
        let toast = toast.clone();
        Callback::from(move |message: ToastMessage| toast.set(Some(message)))
    };

    // Lookup outcomes commit (or clear) the resolved name/id for a role.
    let on_outcome = {
        let form = form.clone();
        Callback::from(move |outcome: ResolveOutcome| {
            form.dispatch(Box::new(move |f| match outcome {
                ResolveOutcome::Cleared { role } => match role {
                    RelativeRole::Father => {
                        f.father_name.clear();
                        f.father_id = None;
                    }
                    RelativeRole::Mother => {
                        f.mother_name.clear();
                        f.mother_id = None;
                    }
                    RelativeRole::Spouse => {
                        f.spouse_name.clear();
                        f.spouse_id = None;
                    }
                },
                ResolveOutcome::Resolved { role, name, id } => match role {
                    RelativeRole::Father => {
                        f.father_name = name;
                        f.father_id = Some(id);
                    }
                    RelativeRole::Mother => {
                        f.mother_name = name;
                        f.mother_id = Some(id);
                    }
                    RelativeRole::Spouse => {
                        f.spouse_name = name;
                        f.spouse_id = Some(id);
                    }
                },
            }));
        })
    };

    let lookup = use_relative_lookup(&props.api_client, on_outcome, on_toast.clone());

    // Load the record under edit.
    use_effect_with(props.person_id, {
        let form = form.clone();
        let api_client = props.api_client.clone();
        let toast = toast.clone();
        move |person_id| {
            if let Some(id) = *person_id {
                spawn_local(async move {
                    match api_client.get_person(id).await {
                        Ok(payload) => form.dispatch(Box::new(move |f| {
                            *f = RegistrantFormState::from_payload(&payload);
                        })),
                        Err(e) => toast.set(Some(ToastMessage::error(format!(
                            "Failed to load record: {}",
                            e
                        )))),
                    }
                });
            }
            || ()
        }
    });

    // --- input plumbing ---

    let text_field = {
        let form = form.clone();
        move |setter: fn(&mut RegistrantFormState, String)| {
            let form = form.clone();
            Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                form.dispatch(Box::new(move |f| setter(f, value)));
            })
        }
    };

    let select_field = {
        let form = form.clone();
        move |setter: fn(&mut RegistrantFormState, String)| {
            let form = form.clone();
            Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                form.dispatch(Box::new(move |f| setter(f, value)));
            })
        }
    };

    let on_address_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            form.dispatch(Box::new(move |f| f.address = value));
        })
    };

    // Mobile edits flow into both the form and the OTP session; the session
    // resets itself whenever the number actually changes.
    let on_mobile_change = {
        let form = form.clone();
        let set_mobile = otp.actions.set_mobile.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            set_mobile.emit(value.clone());
            form.dispatch(Box::new(move |f| f.mobile_no = value));
        })
    };

    // Pincode always resets the city fields before repopulating from the
    // first matching reference city.
    let on_pincode_change = {
        let form = form.clone();
        let reference = (*reference).clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let matched = reference
                .cities_for_pincode(&value)
                .first()
                .map(|c| (*c).clone());
            form.dispatch(Box::new(move |f| {
                f.pincode = value;
                f.city_code.clear();
                f.district_code.clear();
                f.state_code.clear();
                f.area.clear();
                if let Some(city) = matched {
                    f.city_code = city.id.to_string();
                    f.district_code = city.district_code;
                    f.state_code = city.state_code;
                    f.area = city.area;
                }
            }));
        })
    };

    // Fires per keystroke; the hook debounces the actual network lookup.
    let unique_id_field = {
        let form = form.clone();
        let resolve = lookup.resolve.clone();
        move |role: RelativeRole| {
            let form = form.clone();
            let resolve = resolve.clone();
            Callback::from(move |e: InputEvent| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                let snapshot = form.0.clone();
                resolve.emit(ResolveRequest {
                    role,
                    unique_id: value.clone(),
                    registrant_gender: snapshot.gender,
                    father_id: snapshot.father_id,
                    mother_id: snapshot.mother_id,
                });
                form.dispatch(Box::new(move |f| match role {
                    RelativeRole::Father => f.father_unique_id = value,
                    RelativeRole::Mother => f.mother_unique_id = value,
                    RelativeRole::Spouse => f.spouse_unique_id = value,
                }));
            })
        }
    };

    let on_gender_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            form.dispatch(Box::new(move |f| f.gender = Gender::parse(&value)));
        })
    };

    let on_marital_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            form.dispatch(Box::new(move |f| {
                f.marital_status = MaritalStatus::parse(&value)
            }));
        })
    };

    let on_business_interest_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            form.dispatch(Box::new(move |f| {
                f.business_interest = MaritalStatus::parse(&value)
            }));
        })
    };

    let on_child_change = {
        let form = form.clone();
        Callback::from(move |(index, entry): (usize, ChildEntry)| {
            form.dispatch(Box::new(move |f| {
                if let Some(slot) = f.children.get_mut(index) {
                    *slot = entry;
                }
            }));
        })
    };

    let on_child_add = {
        let form = form.clone();
        Callback::from(move |_| {
            form.dispatch(Box::new(|f| f.children.push(ChildEntry::default())));
        })
    };

    let on_child_remove = {
        let form = form.clone();
        Callback::from(move |index: usize| {
            form.dispatch(Box::new(move |f| {
                if index < f.children.len() {
                    f.children.remove(index);
                }
            }));
        })
    };

    // --- OTP actions ---

    let on_otp_code_change = {
        let otp_code = otp_code.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            otp_code.set(input.value());
        })
    };

    let on_send_otp = {
        let request_otp = otp.actions.request_otp.clone();
        Callback::from(move |_: MouseEvent| request_otp.emit(()))
    };

    let on_verify_otp = {
        let verify_otp = otp.actions.verify_otp.clone();
        let otp_code = otp_code.clone();
        let snapshot = form.0.clone();
        Callback::from(move |_: MouseEvent| {
            verify_otp.emit(VerifyArgs {
                code: (*otp_code).clone(),
                full_name: snapshot.full_name.clone(),
                dob: snapshot.dob.clone(),
                role: snapshot.role.clone(),
            });
        })
    };

    // --- submit ---

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let toast = toast.clone();
        let submitting = submitting.clone();
        let api_client = props.api_client.clone();
        let person_id = props.person_id;
        let otp_verified = otp.session.is_verified();
        let set_mobile = otp.actions.set_mobile.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let snapshot = form.0.clone();

            let current_errors = validate_registrant(&snapshot, date_utils::today());
            if !current_errors.is_empty() {
                toast.set(Some(ToastMessage::error(current_errors.summary())));
                errors.set(current_errors);
                return;
            }
            errors.set(RegistrantErrors::default());

            // New registrations are gated on mobile ownership.
            if person_id.is_none() && !otp_verified {
                toast.set(Some(ToastMessage::error(
                    "Verify the mobile number before submitting",
                )));
                return;
            }

            let form = form.clone();
            let toast = toast.clone();
            let submitting = submitting.clone();
            let api_client = api_client.clone();
            let set_mobile = set_mobile.clone();
            submitting.set(true);
            spawn_local(async move {
                let payload = snapshot.to_payload();
                let result = match person_id {
                    Some(id) => api_client.update_person(id, &payload).await,
                    None => api_client.create_person(&payload).await,
                };
                match result {
                    Ok(response) if response.success => {
                        toast.set(Some(ToastMessage::success(
                            response
                                .message
                                .unwrap_or_else(|| "Record saved".to_string()),
                        )));
                        if person_id.is_none() {
                            form.dispatch(Box::new(|f| *f = RegistrantFormState::default()));
                            set_mobile.emit(String::new());
                        }
                    }
                    Ok(response) => {
                        toast.set(Some(ToastMessage::error(
                            response
                                .message
                                .unwrap_or_else(|| "The server rejected the record".to_string()),
                        )));
                    }
                    Err(e) => toast.set(Some(ToastMessage::error(e))),
                }
                submitting.set(false);
            });
        })
    };

    // --- render ---

    let field_error = |error: &Option<String>| -> Html {
        match error {
            Some(message) => html! { <span class="field-error">{message}</span> },
            None => html! {},
        }
    };

    let state = &form.0;
    let busy = *submitting;
    let cooldown = otp.session.cooldown_secs;
    let otp_phase = otp.session.phase;

    let on_dismiss_toast = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(None))
    };

    html! {
        <section class="form-screen registrant-form">
            <h2>{if props.person_id.is_some() { "Edit Registrant" } else { "Add Registrant" }}</h2>
            <Toast toast={(*toast).clone()} on_dismiss={on_dismiss_toast} />

            {if reference.loading {
                html! { <div class="loading">{"Loading reference data..."}</div> }
            } else { html! {} }}

            <form onsubmit={on_submit}>
                <fieldset class="form-section">
                    <legend>{"Identity"}</legend>

                    <div class="form-group">
                        <label>{"Role"}</label>
                        <input type="text" value={state.role.clone()}
                            onchange={text_field(|f, v| f.role = v)} disabled={busy} />
                        {field_error(&errors.role)}
                    </div>

                    <div class="form-group">
                        <label>{"Full Name"}</label>
                        <input type="text" value={state.full_name.clone()}
                            onchange={text_field(|f, v| f.full_name = v)} disabled={busy} />
                        {field_error(&errors.full_name)}
                    </div>

                    <div class="form-group">
                        <label>{"Language"}</label>
                        <select onchange={select_field(|f, v| f.language = v)} disabled={busy}>
                            <option value="" selected={state.language.is_empty()}>{"Select..."}</option>
                            <option value="en" selected={state.language == "en"}>{"English"}</option>
                            <option value="hi" selected={state.language == "hi"}>{"Hindi"}</option>
                        </select>
                        {field_error(&errors.language)}
                    </div>

                    <div class="form-group">
                        <label>{"Date of Birth"}</label>
                        <input type="date" value={state.dob.clone()}
                            onchange={text_field(|f, v| f.dob = v)} disabled={busy} />
                        {field_error(&errors.dob)}
                    </div>

                    <div class="form-group">
                        <label>{"Gender"}</label>
                        <select onchange={on_gender_change} disabled={busy}>
                            <option value="" selected={state.gender.is_none()}>{"Select..."}</option>
                            <option value="Male" selected={state.gender == Some(Gender::Male)}>{"Male"}</option>
                            <option value="Female" selected={state.gender == Some(Gender::Female)}>{"Female"}</option>
                            <option value="Other" selected={state.gender == Some(Gender::Other)}>{"Other"}</option>
                        </select>
                        {field_error(&errors.gender)}
                    </div>

                    <div class="form-group">
                        <label>{"Hobby"}</label>
                        <select onchange={select_field(|f, v| f.hobby = v)} disabled={busy}>
                            <option value="" selected={state.hobby.is_empty()}>{"Select..."}</option>
                            {for reference.hobbies.iter().map(|hobby| html! {
                                <option value={hobby.name.clone()}
                                    selected={state.hobby == hobby.name}>
                                    {&hobby.name}
                                </option>
                            })}
                        </select>
                        {field_error(&errors.hobby)}
                    </div>
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Family"}</legend>

                    <div class="form-group">
                        <label>{"Father Unique ID"}</label>
                        <input type="text" value={state.father_unique_id.clone()}
                            oninput={unique_id_field(RelativeRole::Father)} disabled={busy} />
                        {if let Some(error) = lookup.errors.get(RelativeRole::Father) {
                            html! { <span class="field-error">{error}</span> }
                        } else { html! {} }}
                    </div>
                    <div class="form-group">
                        <label>{"Father Name"}</label>
                        <input type="text" value={state.father_name.clone()}
                            onchange={text_field(|f, v| f.father_name = v)} disabled={busy} />
                        {field_error(&errors.father_name)}
                    </div>

                    <div class="form-group">
                        <label>{"Mother Unique ID"}</label>
                        <input type="text" value={state.mother_unique_id.clone()}
                            oninput={unique_id_field(RelativeRole::Mother)} disabled={busy} />
                        {if let Some(error) = lookup.errors.get(RelativeRole::Mother) {
                            html! { <span class="field-error">{error}</span> }
                        } else { html! {} }}
                    </div>
                    <div class="form-group">
                        <label>{"Mother Name"}</label>
                        <input type="text" value={state.mother_name.clone()}
                            onchange={text_field(|f, v| f.mother_name = v)} disabled={busy} />
                        {field_error(&errors.mother_name)}
                    </div>

                    <div class="form-group">
                        <label>{"Marital Status"}</label>
                        <select onchange={on_marital_change} disabled={busy}>
                            <option value="" selected={state.marital_status.is_none()}>{"Select..."}</option>
                            <option value="Yes" selected={state.marital_status == Some(MaritalStatus::Yes)}>{"Married"}</option>
                            <option value="No" selected={state.marital_status == Some(MaritalStatus::No)}>{"Unmarried"}</option>
                        </select>
                        {field_error(&errors.marital_status)}
                    </div>

                    {if state.marital_status == Some(MaritalStatus::Yes) {
                        html! {
                            <>
                                <div class="form-group">
                                    <label>{"Spouse Unique ID"}</label>
                                    <input type="text" value={state.spouse_unique_id.clone()}
                                        oninput={unique_id_field(RelativeRole::Spouse)} disabled={busy} />
                                    {if let Some(error) = lookup.errors.get(RelativeRole::Spouse) {
                                        html! { <span class="field-error">{error}</span> }
                                    } else { html! {} }}
                                    {field_error(&errors.spouse_id)}
                                </div>
                                <div class="form-group">
                                    <label>{"Spouse Name"}</label>
                                    <input type="text" value={state.spouse_name.clone()}
                                        onchange={text_field(|f, v| f.spouse_name = v)} disabled={busy} />
                                    {field_error(&errors.spouse_name)}
                                </div>
                            </>
                        }
                    } else { html! {} }}
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Mobile Verification"}</legend>

                    <div class="form-group">
                        <label>{"Mobile Number"}</label>
                        <input type="tel" value={state.mobile_no.clone()}
                            onchange={on_mobile_change}
                            disabled={busy || otp.session.mobile_locked()} />
                        {field_error(&errors.mobile_no)}
                        {if otp.session.is_verified() {
                            html! { <span class="otp-verified">{"✓ Verified"}</span> }
                        } else { html! {} }}
                    </div>

                    {if !otp.session.is_verified() {
                        html! {
                            <div class="otp-controls">
                                <button type="button" class="btn btn-secondary"
                                    onclick={on_send_otp}
                                    disabled={busy || otp_phase != OtpPhase::Idle}>
                                    {if otp_phase == OtpPhase::Sent {
                                        format!("Resend in {}s", cooldown)
                                    } else {
                                        "Send OTP".to_string()
                                    }}
                                </button>
                                <input type="text" class="otp-code" placeholder="4-digit code"
                                    maxlength="4" value={(*otp_code).clone()}
                                    onchange={on_otp_code_change}
                                    disabled={busy || otp_phase == OtpPhase::Idle} />
                                <button type="button" class="btn btn-secondary"
                                    onclick={on_verify_otp}
                                    disabled={busy || otp_phase != OtpPhase::Sent}>
                                    {if otp_phase == OtpPhase::Verifying { "Verifying..." } else { "Verify" }}
                                </button>
                            </div>
                        }
                    } else { html! {} }}

                    {if let Some(error) = otp.session.error.as_ref() {
                        html! { <span class="field-error">{error}</span> }
                    } else { html! {} }}
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Address"}</legend>

                    <div class="form-group">
                        <label>{"Address"}</label>
                        <textarea rows="3" value={state.address.clone()}
                            onchange={on_address_change} disabled={busy} />
                        {field_error(&errors.address)}
                    </div>

                    <div class="form-group">
                        <label>{"Pincode"}</label>
                        <input type="text" maxlength="6" value={state.pincode.clone()}
                            onchange={on_pincode_change} disabled={busy} />
                        {field_error(&errors.pincode)}
                    </div>

                    <div class="form-group">
                        <label>{"City / District / State"}</label>
                        <div class="city-codes">
                            <input type="text" readonly=true placeholder="City"
                                value={state.city_code.clone()} />
                            <input type="text" readonly=true placeholder="District"
                                value={state.district_code.clone()} />
                            <input type="text" readonly=true placeholder="State"
                                value={state.state_code.clone()} />
                            <input type="text" readonly=true placeholder="Area"
                                value={state.area.clone()} />
                        </div>
                        {field_error(&errors.city)}
                    </div>
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Education & Profession"}</legend>

                    <div class="form-group">
                        <label>{"Education"}</label>
                        <select onchange={select_field(|f, v| f.education = v)} disabled={busy}>
                            <option value="" selected={state.education.is_empty()}>{"Select..."}</option>
                            {for reference.education_levels.iter().map(|level| html! {
                                <option value={level.name.clone()}
                                    selected={state.education == level.name}>
                                    {&level.name}
                                </option>
                            })}
                        </select>
                        {field_error(&errors.education)}
                    </div>

                    <div class="form-group">
                        <label>{"Profession"}</label>
                        <select onchange={select_field(|f, v| f.profession_id = v)} disabled={busy}>
                            <option value="" selected={state.profession_id.is_empty()}>{"Select..."}</option>
                            {for reference.professions.iter().map(|profession| {
                                let id = profession.id.to_string();
                                html! {
                                    <option value={id.clone()}
                                        selected={state.profession_id == id}>
                                        {&profession.name}
                                    </option>
                                }
                            })}
                        </select>
                        {field_error(&errors.profession)}
                    </div>

                    <div class="form-group">
                        <label>{"Profession Description"}</label>
                        <input type="text" value={state.profession_detail.clone()}
                            onchange={text_field(|f, v| f.profession_detail = v)} disabled={busy} />
                        {field_error(&errors.profession_detail)}
                    </div>
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Business"}</legend>

                    <div class="form-group">
                        <label>{"Interested in Business?"}</label>
                        <select onchange={on_business_interest_change} disabled={busy}>
                            <option value="" selected={state.business_interest.is_none()}>{"Select..."}</option>
                            <option value="Yes" selected={state.business_interest == Some(MaritalStatus::Yes)}>{"Yes"}</option>
                            <option value="No" selected={state.business_interest == Some(MaritalStatus::No)}>{"No"}</option>
                        </select>
                    </div>

                    {if state.business_interest == Some(MaritalStatus::Yes) {
                        html! {
                            <>
                                <div class="form-group">
                                    <label>{"Business Stream"}</label>
                                    <select onchange={select_field(|f, v| f.business_stream = v)} disabled={busy}>
                                        <option value="" selected={state.business_stream.is_empty()}>{"Select..."}</option>
                                        {for reference.business_streams.iter().map(|stream| html! {
                                            <option value={stream.name.clone()}
                                                selected={state.business_stream == stream.name}>
                                                {&stream.name}
                                            </option>
                                        })}
                                    </select>
                                    {field_error(&errors.business_stream)}
                                </div>
                                <div class="form-group">
                                    <label>{"Business Type"}</label>
                                    <input type="text" value={state.business_type.clone()}
                                        onchange={text_field(|f, v| f.business_type = v)} disabled={busy} />
                                    {field_error(&errors.business_type)}
                                </div>
                                <div class="form-group">
                                    <label>{"Business Code"}</label>
                                    <input type="text" value={state.business_code.clone()}
                                        onchange={text_field(|f, v| f.business_code = v)} disabled={busy} />
                                    {field_error(&errors.business_code)}
                                </div>
                            </>
                        }
                    } else { html! {} }}
                </fieldset>

                <ChildRows
                    entries={state.children.clone()}
                    errors={errors.children.clone()}
                    on_change={on_child_change}
                    on_add={on_child_add}
                    on_remove={on_child_remove}
                    disabled={busy}
                />

                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {if busy {
                        "Saving..."
                    } else if props.person_id.is_some() {
                        "Update Registrant"
                    } else {
                        "Register"
                    }}
                </button>
            </form>
        </section>
    }
}
