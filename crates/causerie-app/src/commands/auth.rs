//! Mock phone/OTP authentication.
//!
//! The verification oracle is a local stand-in for a real SMS backend:
//! `request_code` pretends to dispatch a code after validating the phone
//! number, and `verify_code` accepts the fixed demo code.  Both simulate
//! network latency with a timer so the UI exercises its loading states.

use std::time::Duration;

use tracing::info;

use causerie_shared::constants::{
    DEMO_OTP_CODE, OTP_LENGTH, OTP_SEND_LATENCY_MS, OTP_VERIFY_LATENCY_MS, PHONE_MIN_DIGITS,
};
use causerie_shared::{ChatError, User, UserId};

use crate::state::App;

fn validate_phone(country_code: &str, phone: &str) -> Result<(), ChatError> {
    if !country_code.starts_with('+') || country_code.len() < 2 {
        return Err(ChatError::validation(
            "country_code",
            "Country code must look like +91",
        ));
    }

    if phone.len() < PHONE_MIN_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChatError::validation(
            "phone",
            format!("Phone number must be at least {PHONE_MIN_DIGITS} digits"),
        ));
    }

    Ok(())
}

fn validate_code_shape(code: &str) -> Result<(), ChatError> {
    if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChatError::validation(
            "otp",
            format!("OTP must be {OTP_LENGTH} digits"),
        ));
    }
    Ok(())
}

impl App {
    /// Validate the phone number and "dispatch" a one-time code.
    pub async fn request_code(&self, country_code: &str, phone: &str) -> Result<(), ChatError> {
        validate_phone(country_code, phone)?;

        {
            let mut state = self.state();
            state.pending_phone = Some((country_code.to_string(), phone.to_string()));
        }

        // Simulated SMS dispatch.
        tokio::time::sleep(Duration::from_millis(OTP_SEND_LATENCY_MS)).await;

        info!(country_code, "one-time code dispatched");
        Ok(())
    }

    /// Verify a one-time code against the oracle and sign the user in.
    ///
    /// Shape violations are [`ChatError::Validation`]; a well-formed but
    /// wrong code is [`ChatError::CodeRejected`].
    pub async fn verify_code(&self, code: &str) -> Result<User, ChatError> {
        validate_code_shape(code)?;

        let (country_code, phone) = self
            .state()
            .pending_phone
            .clone()
            .ok_or_else(|| ChatError::validation("otp", "Request a code first"))?;

        // Simulated verification round-trip.
        tokio::time::sleep(Duration::from_millis(OTP_VERIFY_LATENCY_MS)).await;

        if code != DEMO_OTP_CODE {
            return Err(ChatError::CodeRejected);
        }

        let user = User {
            id: UserId::new(),
            phone,
            country_code,
            name: Some("User".to_string()),
        };

        let mut state = self.state();
        state.user = Some(user.clone());
        state.pending_phone = None;

        info!(user = %user.id, "signed in");
        Ok(user)
    }

    /// Sign out.  Chat state is untouched.
    pub fn logout(&self) {
        let mut state = self.state();
        if state.user.take().is_some() {
            info!("signed out");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_full_login_flow_with_demo_code() {
        let app = App::new();

        app.request_code("+91", "9876543210").await.unwrap();
        let user = app.verify_code(DEMO_OTP_CODE).await.unwrap();

        assert_eq!(user.phone, "9876543210");
        assert_eq!(user.country_code, "+91");
        assert_eq!(app.current_user(), Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_phone_is_rejected() {
        let app = App::new();

        assert!(matches!(
            app.request_code("+1", "12345").await,
            Err(ChatError::Validation { field: "phone", .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_country_code_is_rejected() {
        let app = App::new();

        assert!(matches!(
            app.request_code("91", "9876543210").await,
            Err(ChatError::Validation {
                field: "country_code",
                ..
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_codes_fail_shape_validation() {
        let app = App::new();
        app.request_code("+91", "9876543210").await.unwrap();

        for bad in ["12345", "1234567", "12345a", ""] {
            assert!(matches!(
                app.verify_code(bad).await,
                Err(ChatError::Validation { field: "otp", .. })
            ));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_code_is_rejected_not_invalid() {
        let app = App::new();
        app.request_code("+91", "9876543210").await.unwrap();

        assert_eq!(
            app.verify_code("654321").await.unwrap_err(),
            ChatError::CodeRejected
        );
        assert!(app.current_user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_without_request_fails() {
        let app = App::new();

        assert!(matches!(
            app.verify_code(DEMO_OTP_CODE).await,
            Err(ChatError::Validation { field: "otp", .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_user_only() {
        let app = App::new();
        app.create_chatroom("kept").unwrap();
        app.request_code("+91", "9876543210").await.unwrap();
        app.verify_code(DEMO_OTP_CODE).await.unwrap();

        app.logout();

        assert!(app.current_user().is_none());
        assert_eq!(app.list_chatrooms().len(), 1);
    }
}
