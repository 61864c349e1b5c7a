use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{
    check::CheckId, email::Email, name::Name, password::PasswordHash, phone_number::PhoneNumber,
};

/// A stored user record.
///
/// The password is only ever held as a hash. Values handed back to callers go
/// through [`User::profile`], which drops it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    phone_number: PhoneNumber,
    email: Email,
    first_name: Name,
    last_name: Name,
    password: PasswordHash,
    tos_agreement: bool,
    #[serde(default, deserialize_with = "lenient_check_ids")]
    checks: Vec<CheckId>,
}

impl User {
    /// Creates a user that has accepted the terms of service and owns no checks.
    pub fn new(
        phone_number: PhoneNumber,
        email: Email,
        first_name: Name,
        last_name: Name,
        password: PasswordHash,
    ) -> Self {
        Self {
            phone_number,
            email,
            first_name,
            last_name,
            password,
            tos_agreement: true,
            checks: Vec::new(),
        }
    }

    pub fn with_checks(mut self, checks: Vec<CheckId>) -> Self {
        self.checks = checks;
        self
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn first_name(&self) -> &Name {
        &self.first_name
    }

    pub fn last_name(&self) -> &Name {
        &self.last_name
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password
    }

    pub fn tos_agreement(&self) -> bool {
        self.tos_agreement
    }

    pub fn checks(&self) -> &[CheckId] {
        &self.checks
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn set_first_name(&mut self, first_name: Name) {
        self.first_name = first_name;
    }

    pub fn set_last_name(&mut self, last_name: Name) {
        self.last_name = last_name;
    }

    pub fn set_password(&mut self, password: PasswordHash) {
        self.password = password;
    }

    pub fn profile(&self) -> UserProfile {
        self.clone().into()
    }
}

/// The outward view of a user. Carries no password field at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub phone_number: PhoneNumber,
    pub email: Email,
    pub first_name: Name,
    pub last_name: Name,
    pub tos_agreement: bool,
    pub checks: Vec<CheckId>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            phone_number: user.phone_number,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            tos_agreement: user.tos_agreement,
            checks: user.checks,
        }
    }
}

// Anything other than a list of strings reads as "no checks".
fn lenient_check_ids<'de, D>(deserializer: D) -> Result<Vec<CheckId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let ids = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(CheckId::new(id)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(ids)
}
