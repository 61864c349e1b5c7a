use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{FIRST_NAME, LAST_NAME};

/// A first or last name. The two differ only in their minimum length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn parse_first(raw: Option<&Value>) -> Option<Self> {
        FIRST_NAME.apply(raw).map(Self)
    }

    pub fn parse_last(raw: Option<&Value>) -> Option<Self> {
        LAST_NAME.apply(raw).map(Self)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
