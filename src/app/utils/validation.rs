//! # Validation Utilities
//!
//! Pure checks used by the sign-in flow: email syntax, the mail-provider
//! allow-list, and the five-rule password strength policy.

use bitflags::bitflags;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Main domains (last two labels) accepted for sign-in
pub const SUPPORTED_MAIN_DOMAINS: &[&str] = &[
    "qq.com",
    "gmail.com",
    "163.com",
    "126.com",
    "sina.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "foxmail.com",
    "139.com",
    "aliyun.com",
    // reserved documentation domain of the seeded demo account
    "example.com",
];

/// Characters that satisfy the "special character" password rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Why an email address was rejected. Display is the inline field message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("请输入邮箱")]
    Empty,
    #[error("请正确输入邮箱格式")]
    InvalidFormat,
    #[error("暂不支持该邮箱")]
    UnsupportedDomain,
}

/// An email that passed both format and domain validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmail(String);

impl ValidatedEmail {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Part before the `@`, used as the default nickname
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

pub fn validate_email_format(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}

/// Last two dot-separated labels of the domain part, or the whole domain if
/// it has a single label
pub fn main_domain(email: &str) -> Option<String> {
    let domain = email.split('@').nth(1)?;
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() >= 2 {
        Some(labels[labels.len() - 2..].join("."))
    } else {
        Some(domain.to_string())
    }
}

/// Exact match against the allow-list; `QQ.com` is not `qq.com`
pub fn validate_email_domain(email: &str) -> bool {
    main_domain(email)
        .map(|domain| SUPPORTED_MAIN_DOMAINS.contains(&domain.as_str()))
        .unwrap_or(false)
}

/// Format first, then domain; the domain check only runs on well-formed input
pub fn validate_email(email: &str) -> Result<ValidatedEmail, EmailError> {
    if email.is_empty() {
        return Err(EmailError::Empty);
    }
    if !validate_email_format(email) {
        return Err(EmailError::InvalidFormat);
    }
    if !validate_email_domain(email) {
        return Err(EmailError::UnsupportedDomain);
    }
    Ok(ValidatedEmail(email.to_string()))
}

bitflags! {
    /// The five independent password strength rules
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PasswordRules: u8 {
        /// At least eight characters
        const LENGTH  = 0b00001;
        /// Contains an uppercase ASCII letter
        const UPPER   = 0b00010;
        /// Contains a lowercase ASCII letter
        const LOWER   = 0b00100;
        /// Contains an ASCII digit
        const DIGIT   = 0b01000;
        /// Contains one of [`SPECIAL_CHARACTERS`]
        const SPECIAL = 0b10000;

        const ALL = Self::LENGTH.bits()
                  | Self::UPPER.bits()
                  | Self::LOWER.bits()
                  | Self::DIGIT.bits()
                  | Self::SPECIAL.bits();
    }
}

/// Result of evaluating a password against every rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordCheck {
    passed: PasswordRules,
}

impl PasswordCheck {
    pub fn passed(&self) -> PasswordRules {
        self.passed
    }

    pub fn satisfies(&self, rule: PasswordRules) -> bool {
        self.passed.contains(rule)
    }

    pub fn all_valid(&self) -> bool {
        self.passed.contains(PasswordRules::ALL)
    }

    pub fn failed(&self) -> PasswordRules {
        PasswordRules::ALL.difference(self.passed)
    }
}

pub fn check_password(password: &str) -> PasswordCheck {
    let mut passed = PasswordRules::empty();
    passed.set(PasswordRules::LENGTH, password.chars().count() >= 8);
    passed.set(
        PasswordRules::UPPER,
        password.chars().any(|c| c.is_ascii_uppercase()),
    );
    passed.set(
        PasswordRules::LOWER,
        password.chars().any(|c| c.is_ascii_lowercase()),
    );
    passed.set(
        PasswordRules::DIGIT,
        password.chars().any(|c| c.is_ascii_digit()),
    );
    passed.set(
        PasswordRules::SPECIAL,
        password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
    );
    PasswordCheck { passed }
}
