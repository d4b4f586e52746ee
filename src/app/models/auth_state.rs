//! # Sign-in Flow State
//!
//! Process-wide state of the two-step sign-in flow. Only the sign-in
//! controller moves it between steps.

use crate::app::events::AuthStep;
use crate::app::utils::ValidatedEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlowState {
    step: AuthStep,
    email: String,
    is_registered: bool,
}

impl AuthFlowState {
    pub fn new() -> Self {
        Self {
            step: AuthStep::EmailEntry,
            email: String::new(),
            is_registered: false,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_registered(&self) -> bool {
        self.is_registered
    }

    /// Enter the credential step. Requiring a [`ValidatedEmail`] keeps step 2
    /// from ever holding an empty or unvalidated address.
    pub fn advance(&mut self, email: ValidatedEmail, is_registered: bool) {
        self.step = AuthStep::CredentialEntry;
        self.email = email.into_string();
        self.is_registered = is_registered;
    }

    /// Back to step 1, keeping the typed email
    pub fn return_to_email(&mut self) {
        self.step = AuthStep::EmailEntry;
        self.is_registered = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AuthFlowState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::utils::validate_email;

    #[test]
    fn new_state_should_start_at_email_entry() {
        let state = AuthFlowState::new();
        assert_eq!(state.step(), AuthStep::EmailEntry);
        assert_eq!(state.step().number(), 1);
        assert_eq!(state.email(), "");
        assert!(!state.is_registered());
    }

    #[test]
    fn advance_then_return_should_keep_email_and_clear_registration() {
        let mut state = AuthFlowState::new();
        state.advance(validate_email("user@qq.com").unwrap(), true);
        assert_eq!(state.step(), AuthStep::CredentialEntry);
        assert!(state.is_registered());

        state.return_to_email();
        assert_eq!(state.step(), AuthStep::EmailEntry);
        assert_eq!(state.email(), "user@qq.com");
        assert!(!state.is_registered());
    }

    #[test]
    fn reset_should_restore_initial_state() {
        let mut state = AuthFlowState::new();
        state.advance(validate_email("user@qq.com").unwrap(), false);
        state.reset();
        assert_eq!(state, AuthFlowState::new());
    }
}
