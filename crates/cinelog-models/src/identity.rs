use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque per-profile visitor identifier.
///
/// Only approximates "same visitor" for review deduplication. It is not an
/// account and carries no security guarantee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AnonymousIdentity(String);

impl AnonymousIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnonymousIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
