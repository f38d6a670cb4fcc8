//! Guardian identifier
//!
//! Guardian ids end up in file names, so the newtype refuses anything that
//! could address a path outside the target directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GuardianError;

/// Unique identifier of a guardian within one election
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuardianId(String);

impl GuardianId {
    /// Parse and validate a guardian id
    pub fn parse(s: &str) -> Result<Self, GuardianError> {
        if s.is_empty() {
            return Err(GuardianError::InvalidInput(
                "Guardian id cannot be empty".into(),
            ));
        }
        if s == "." || s == ".." || s.contains(|c: char| matches!(c, '/' | '\\' | '\0')) {
            return Err(GuardianError::InvalidInput(format!(
                "Guardian id '{}' is not usable as a file name",
                s.escape_debug()
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuardianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GuardianId {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GuardianId {
    type Error = GuardianError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<GuardianId> for String {
    fn from(id: GuardianId) -> Self {
        id.0
    }
}
