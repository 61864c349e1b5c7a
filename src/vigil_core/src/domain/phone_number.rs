use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::PHONE_NUMBER;

/// A validated phone number, normalized to its digits.
///
/// The normalized form (leading `+` stripped) is the identity of a user and the
/// key of its record in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: Option<&Value>) -> Option<Self> {
        PHONE_NUMBER.apply(raw).map(Self::normalize)
    }

    fn normalize(valid: String) -> Self {
        Self(valid.trim_start_matches('+').to_owned())
    }

    pub fn as_key(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PHONE_NUMBER
            .apply_str(Some(&value))
            .map(Self::normalize)
            .ok_or_else(|| format!("Invalid phone number: {value}"))
    }
}

impl From<PhoneNumber> for String {
    fn from(phone_number: PhoneNumber) -> Self {
        phone_number.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
