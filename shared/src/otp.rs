//! OTP verification session state machine.
//!
//! Phases move `Idle → Sent → Verifying → Verified`; an error recorded from
//! `Sent` or `Verifying` leaves the phase where the failure found it. A
//! verified code is only valid for the exact mobile number it was verified
//! against, so any change to the number resets the whole session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::is_valid_mobile;

/// Seconds the operator must wait before requesting another code.
pub const RESEND_COOLDOWN_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpPhase {
    Idle,
    Sent,
    Verifying,
    Verified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("Mobile number must be 10 digits starting with 6-9")]
    InvalidMobile,
    #[error("An OTP was already sent; wait for the countdown to finish")]
    CooldownActive,
    #[error("Request an OTP before verifying")]
    NotSent,
    #[error("OTP must be a 4-digit code")]
    MalformedCode,
    #[error("Full name is required to verify OTP")]
    MissingFullName,
    #[error("Date of birth is required to verify OTP")]
    MissingDob,
    #[error("Role is required to verify OTP")]
    MissingRole,
}

/// One OTP verification session, bound to a single mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpSession {
    pub mobile_no: String,
    pub phase: OtpPhase,
    pub error: Option<String>,
    /// Remaining resend cooldown; only non-zero in `Sent`.
    pub cooldown_secs: u32,
    /// Server-assigned person id, set on successful verification.
    pub verified_person_id: Option<i64>,
    /// Bumped on every hard reset. In-flight request completions compare
    /// their snapshot's epoch against the live session before committing;
    /// a mismatch means the mobile number changed underneath them.
    pub epoch: u32,
}

impl Default for OtpSession {
    fn default() -> Self {
        Self {
            mobile_no: String::new(),
            phase: OtpPhase::Idle,
            error: None,
            cooldown_secs: 0,
            verified_person_id: None,
            epoch: 0,
        }
    }
}

impl OtpSession {
    pub fn for_mobile(mobile_no: &str) -> Self {
        Self {
            mobile_no: mobile_no.to_string(),
            ..Self::default()
        }
    }

    /// Whether a generate-OTP request may be issued right now.
    pub fn request_allowed(&self) -> Result<(), OtpError> {
        if !is_valid_mobile(&self.mobile_no) {
            return Err(OtpError::InvalidMobile);
        }
        match self.phase {
            OtpPhase::Idle => Ok(()),
            _ => Err(OtpError::CooldownActive),
        }
    }

    /// The server accepted the generate request; start the resend countdown.
    pub fn mark_sent(&mut self) {
        self.phase = OtpPhase::Sent;
        self.cooldown_secs = RESEND_COOLDOWN_SECS;
        self.error = None;
    }

    /// The generate request failed; stay in `Idle` with no countdown.
    pub fn request_failed(&mut self, message: String) {
        self.phase = OtpPhase::Idle;
        self.cooldown_secs = 0;
        self.error = Some(message);
    }

    /// Advance the one-second countdown. At zero the session returns to
    /// `Idle` so a fresh code can be requested.
    pub fn tick(&mut self) {
        if self.phase == OtpPhase::Sent && self.cooldown_secs > 0 {
            self.cooldown_secs -= 1;
            if self.cooldown_secs == 0 {
                self.phase = OtpPhase::Idle;
            }
        }
    }

    /// Local checks that must pass before the verify request is sent.
    /// The identity fields accompany the code for server-side cross-checking.
    pub fn precheck_verify(
        &self,
        code: &str,
        full_name: &str,
        dob: &str,
        role: &str,
    ) -> Result<(), OtpError> {
        if self.phase != OtpPhase::Sent {
            return Err(OtpError::NotSent);
        }
        let code = code.trim();
        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::MalformedCode);
        }
        if full_name.trim().is_empty() {
            return Err(OtpError::MissingFullName);
        }
        if dob.trim().is_empty() {
            return Err(OtpError::MissingDob);
        }
        if role.trim().is_empty() {
            return Err(OtpError::MissingRole);
        }
        Ok(())
    }

    pub fn begin_verify(&mut self) {
        self.phase = OtpPhase::Verifying;
        self.error = None;
    }

    pub fn verify_succeeded(&mut self, person_id: Option<i64>) {
        self.phase = OtpPhase::Verified;
        self.cooldown_secs = 0;
        self.error = None;
        self.verified_person_id = person_id;
    }

    /// Server rejected the code; drop back to `Sent` so the operator can
    /// retry with the countdown still running.
    pub fn verify_failed(&mut self, message: String) {
        self.phase = OtpPhase::Sent;
        self.error = Some(message);
    }

    /// Hard invariant: a changed mobile number invalidates the entire
    /// session, including a previously verified state.
    pub fn set_mobile(&mut self, mobile_no: &str) {
        if mobile_no != self.mobile_no {
            let epoch = self.epoch.wrapping_add(1);
            *self = Self::for_mobile(mobile_no);
            self.epoch = epoch;
        }
    }

    /// Whether a completion for a request started on `snapshot` may still
    /// commit onto this session. Changing the number and typing it back
    /// still invalidates the old request.
    pub fn accepts_completion_of(&self, snapshot: &OtpSession) -> bool {
        self.epoch == snapshot.epoch
    }

    pub fn is_verified(&self) -> bool {
        self.phase == OtpPhase::Verified
    }

    /// The mobile field locks once verification completes.
    pub fn mobile_locked(&self) -> bool {
        self.is_verified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mobile_never_reaches_sent() {
        for mobile in ["", "12345", "5876543210", "987654321", "98765432100", "abcdefghij"] {
            let session = OtpSession::for_mobile(mobile);
            assert_eq!(session.request_allowed(), Err(OtpError::InvalidMobile));
            assert_eq!(session.phase, OtpPhase::Idle);
        }
    }

    #[test]
    fn generate_starts_cooldown_at_60() {
        let mut session = OtpSession::for_mobile("9876543210");
        assert!(session.request_allowed().is_ok());
        session.mark_sent();
        assert_eq!(session.phase, OtpPhase::Sent);
        assert_eq!(session.cooldown_secs, 60);
        assert!(session.error.is_none());
    }

    #[test]
    fn generate_failure_stays_idle_without_countdown() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.request_failed("SMS gateway unavailable".to_string());
        assert_eq!(session.phase, OtpPhase::Idle);
        assert_eq!(session.cooldown_secs, 0);
        assert_eq!(session.error.as_deref(), Some("SMS gateway unavailable"));
    }

    #[test]
    fn cooldown_expiry_returns_to_idle() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        for _ in 0..59 {
            session.tick();
        }
        assert_eq!(session.phase, OtpPhase::Sent);
        assert_eq!(session.cooldown_secs, 1);
        session.tick();
        assert_eq!(session.phase, OtpPhase::Idle);
        assert!(session.request_allowed().is_ok());
    }

    #[test]
    fn verify_requires_identity_fields() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();

        // Spec scenario: code 1234 with an empty full name is rejected
        // locally and the phase stays at Sent.
        let err = session.precheck_verify("1234", "", "1990-05-14", "member");
        assert_eq!(err, Err(OtpError::MissingFullName));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Full name is required to verify OTP"
        );
        assert_eq!(session.phase, OtpPhase::Sent);

        assert_eq!(
            session.precheck_verify("1234", "Suresh", "", "member"),
            Err(OtpError::MissingDob)
        );
        assert_eq!(
            session.precheck_verify("1234", "Suresh", "1990-05-14", ""),
            Err(OtpError::MissingRole)
        );
        assert!(session
            .precheck_verify("1234", "Suresh", "1990-05-14", "member")
            .is_ok());
    }

    #[test]
    fn verify_rejects_malformed_codes() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        for code in ["", "12", "12345", "12a4"] {
            assert_eq!(
                session.precheck_verify(code, "Suresh", "1990-05-14", "member"),
                Err(OtpError::MalformedCode)
            );
        }
    }

    #[test]
    fn verify_before_send_is_rejected() {
        let session = OtpSession::for_mobile("9876543210");
        assert_eq!(
            session.precheck_verify("1234", "Suresh", "1990-05-14", "member"),
            Err(OtpError::NotSent)
        );
    }

    #[test]
    fn successful_verification_locks_the_mobile() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        session.begin_verify();
        assert_eq!(session.phase, OtpPhase::Verifying);
        session.verify_succeeded(Some(77));
        assert!(session.is_verified());
        assert!(session.mobile_locked());
        assert_eq!(session.verified_person_id, Some(77));
        assert_eq!(session.cooldown_secs, 0);
    }

    #[test]
    fn failed_verification_returns_to_sent() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        session.begin_verify();
        session.verify_failed("OTP incorrect".to_string());
        assert_eq!(session.phase, OtpPhase::Sent);
        assert_eq!(session.error.as_deref(), Some("OTP incorrect"));
        assert!(!session.is_verified());
    }

    #[test]
    fn mobile_change_resets_everything() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        session.begin_verify();
        session.verify_succeeded(Some(77));

        session.set_mobile("9876543211");
        assert_eq!(session.phase, OtpPhase::Idle);
        assert_eq!(session.cooldown_secs, 0);
        assert!(session.error.is_none());
        assert!(session.verified_person_id.is_none());
        assert!(!session.mobile_locked());
    }

    #[test]
    fn unchanged_mobile_keeps_the_session() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        session.set_mobile("9876543210");
        assert_eq!(session.phase, OtpPhase::Sent);
    }

    #[test]
    fn mobile_change_invalidates_inflight_completions() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        let snapshot = session.clone();

        // The generate request for the old number is still in flight when
        // the operator edits the field; its completion must not commit.
        session.set_mobile("9123456780");
        assert!(!session.accepts_completion_of(&snapshot));

        // Typing the original number back is a new session, not a revival
        // of the old request.
        session.set_mobile("9876543210");
        assert!(!session.accepts_completion_of(&snapshot));
    }

    #[test]
    fn unchanged_mobile_keeps_inflight_completions_valid() {
        let mut session = OtpSession::for_mobile("9876543210");
        session.mark_sent();
        let snapshot = session.clone();

        session.set_mobile("9876543210");
        assert!(session.accepts_completion_of(&snapshot));
    }
}
