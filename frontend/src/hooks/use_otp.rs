use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::{OtpPhase, OtpSession, VerifyOtpRequest};

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Identity fields sent alongside the code for server-side cross-checking.
#[derive(Clone, PartialEq)]
pub struct VerifyArgs {
    pub code: String,
    pub full_name: String,
    pub dob: String,
    pub role: String,
}

pub struct UseOtpResult {
    pub session: OtpSession,
    pub actions: UseOtpActions,
}

#[derive(Clone, PartialEq)]
pub struct UseOtpActions {
    pub set_mobile: Callback<String>,
    pub request_otp: Callback<()>,
    pub verify_otp: Callback<VerifyArgs>,
}

/// Drives the OTP verification workflow for the registrant form.
///
/// The transition rules live in [`shared::OtpSession`]; this hook wires them
/// to the generate/verify endpoints and runs the one-second resend countdown,
/// which is cancelled whenever its dependencies change or the form unmounts.
#[hook]
pub fn use_otp(api_client: &ApiClient) -> UseOtpResult {
    let session = use_state(OtpSession::default);

    // Live mirror of the session for in-flight completions: the state handle
    // a spawned future captured only sees the render it was created in, so
    // stale generate/verify responses check the mirror's epoch before they
    // commit. `set_mobile` updates the mirror synchronously.
    let latest = use_mut_ref(OtpSession::default);
    *latest.borrow_mut() = (*session).clone();

    // One countdown step per render while in Sent; each tick re-renders and
    // schedules the next step.
    use_effect_with((session.phase, session.cooldown_secs), {
        let session = session.clone();
        move |(phase, cooldown): &(OtpPhase, u32)| {
            let cancelled = Rc::new(Cell::new(false));
            if *phase == OtpPhase::Sent && *cooldown > 0 {
                let session = session.clone();
                let cancelled = cancelled.clone();
                spawn_local(async move {
                    TimeoutFuture::new(1_000).await;
                    if cancelled.get() {
                        return;
                    }
                    let mut next = (*session).clone();
                    next.tick();
                    session.set(next);
                });
            }
            move || cancelled.set(true)
        }
    });

    let set_mobile = {
        let session = session.clone();
        let latest = latest.clone();
        Callback::from(move |mobile: String| {
            let mut next = (*session).clone();
            next.set_mobile(&mobile);
            *latest.borrow_mut() = next.clone();
            session.set(next);
        })
    };

    let request_otp = {
        let session = session.clone();
        let latest = latest.clone();
        let api_client = api_client.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            if let Err(e) = next.request_allowed() {
                next.error = Some(e.to_string());
                session.set(next);
                return;
            }

            let session = session.clone();
            let latest = latest.clone();
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.generate_otp(&next.mobile_no).await {
                    Ok(response) if response.success => {
                        next.mark_sent();
                    }
                    Ok(response) => {
                        next.request_failed(
                            response
                                .message
                                .unwrap_or_else(|| "Failed to send OTP".to_string()),
                        );
                    }
                    Err(e) => {
                        Logger::error_with_component("otp", &format!("generate failed: {}", e));
                        next.request_failed(e);
                    }
                }
                // The number may have changed while the request was in
                // flight; committing then would resurrect the old session.
                if latest.borrow().accepts_completion_of(&next) {
                    session.set(next);
                }
            });
        })
    };

    let verify_otp = {
        let session = session.clone();
        let latest = latest.clone();
        let api_client = api_client.clone();
        Callback::from(move |args: VerifyArgs| {
            let mut next = (*session).clone();
            if let Err(e) =
                next.precheck_verify(&args.code, &args.full_name, &args.dob, &args.role)
            {
                next.error = Some(e.to_string());
                session.set(next);
                return;
            }

            next.begin_verify();
            session.set(next.clone());

            let session = session.clone();
            let latest = latest.clone();
            let api_client = api_client.clone();
            spawn_local(async move {
                let request = VerifyOtpRequest {
                    mobile_no: next.mobile_no.clone(),
                    full_name: args.full_name.trim().to_string(),
                    dob: args.dob.trim().to_string(),
                    role: args.role.trim().to_string(),
                    otp: args.code.trim().to_string(),
                };
                match api_client.verify_otp(&request).await {
                    Ok(response) if response.success => {
                        next.verify_succeeded(response.person_id);
                    }
                    Ok(response) => {
                        next.verify_failed(
                            response
                                .message
                                .unwrap_or_else(|| "OTP verification failed".to_string()),
                        );
                    }
                    Err(e) => {
                        Logger::error_with_component("otp", &format!("verify failed: {}", e));
                        next.verify_failed(e);
                    }
                }
                if latest.borrow().accepts_completion_of(&next) {
                    session.set(next);
                }
            });
        })
    };

    UseOtpResult {
        session: (*session).clone(),
        actions: UseOtpActions {
            set_mobile,
            request_otp,
            verify_otp,
        },
    }
}
