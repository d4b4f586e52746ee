//! # Utilities
//!
//! Stateless helpers shared by the view models.

pub mod validation;

pub use validation::{
    check_password, main_domain, validate_email, validate_email_domain, validate_email_format,
    EmailError, PasswordCheck, PasswordRules, ValidatedEmail, SPECIAL_CHARACTERS,
    SUPPORTED_MAIN_DOMAINS,
};
