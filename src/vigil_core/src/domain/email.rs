use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::EMAIL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: Option<&Value>) -> Option<Self> {
        EMAIL.apply(raw).map(Self)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
