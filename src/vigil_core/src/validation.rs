//! Field rules shared by every user operation.
//!
//! Each rule is a pattern plus optional extra predicates. The payload keys
//! the rules apply to are the constants below.
//!
//! Applying a rule never fails: a missing value, a value of the wrong JSON type
//! and a value that does not satisfy the rule all come back as `None`. Callers
//! decide whether an absent field is an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

pub const PHONE_NUMBER_KEY: &str = "phoneNumber";
pub const EMAIL_KEY: &str = "email";
pub const FIRST_NAME_KEY: &str = "firstName";
pub const LAST_NAME_KEY: &str = "lastName";
pub const PASSWORD_KEY: &str = "password";
pub const TOS_AGREEMENT_KEY: &str = "tosAgreement";
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Symbols accepted (and one of which is required) in a new password.
pub const PASSWORD_SYMBOLS: &str = "$@!%*?&";

/// A single declarative validation rule.
pub struct FieldRule {
    pattern: Regex,
    predicates: &'static [fn(&str) -> bool],
}

impl FieldRule {
    fn new(pattern: &str, predicates: &'static [fn(&str) -> bool]) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("field rule patterns are valid"),
            predicates,
        }
    }

    /// Applies the rule to a raw JSON value.
    pub fn apply(&self, raw: Option<&Value>) -> Option<String> {
        self.apply_str(raw.and_then(Value::as_str))
    }

    /// Applies the rule to a raw string, returning the trimmed value on success.
    pub fn apply_str(&self, raw: Option<&str>) -> Option<String> {
        let value = raw?.trim();
        let valid =
            self.pattern.is_match(value) && self.predicates.iter().all(|check| check(value));

        valid.then(|| value.to_owned())
    }
}

fn has_lowercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
}

fn has_uppercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

fn has_symbol(value: &str) -> bool {
    value.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub static PHONE_NUMBER: LazyLock<FieldRule> =
    LazyLock::new(|| FieldRule::new(r"^\+?\d{9,15}$", &[]));

pub static EMAIL: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        r"^[a-zA-Z0-9.!#$%&’*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$",
        &[],
    )
});

pub static FIRST_NAME: LazyLock<FieldRule> =
    LazyLock::new(|| FieldRule::new(r"^[a-zA-Z]{2,15}$", &[]));

pub static LAST_NAME: LazyLock<FieldRule> =
    LazyLock::new(|| FieldRule::new(r"^[a-zA-Z]{3,15}$", &[]));

/// Strength policy applied when a user is created.
pub static NEW_PASSWORD: LazyLock<FieldRule> = LazyLock::new(|| {
    FieldRule::new(
        r"^[A-Za-z\d$@!%*?&]{8,20}$",
        &[has_lowercase, has_uppercase, has_digit, has_symbol],
    )
});

/// Looser shape accepted when a password is changed through an update.
pub static UPDATED_PASSWORD: LazyLock<FieldRule> =
    LazyLock::new(|| FieldRule::new(r"^[a-zA-Z]{8,20}$", &[]));

pub static AUTH_TOKEN: LazyLock<FieldRule> =
    LazyLock::new(|| FieldRule::new(r"^[a-zA-Z0-9]{20}$", &[]));

/// The terms of service only count as accepted when the flag is literally `true`.
pub fn tos_accepted(raw: Option<&Value>) -> bool {
    matches!(raw, Some(Value::Bool(true)))
}
