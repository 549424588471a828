// Name entity and the payload used to create one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Longest name accepted, counted in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// A stored name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Name {
    /// Builds a fresh record for an already validated name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /names`
#[derive(Debug, Deserialize)]
pub struct NewName {
    pub name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidName {
    #[error("name cannot be empty")]
    Empty,
    #[error("name cannot exceed {} characters", MAX_NAME_LENGTH)]
    TooLong,
    #[error("name cannot contain control characters")]
    ControlCharacters,
}

impl NewName {
    /// Trims the submitted name and checks it can be stored
    pub fn validate(&self) -> Result<String, InvalidName> {
        let name: &str = self.name.trim();

        if name.is_empty() {
            return Err(InvalidName::Empty);
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(InvalidName::TooLong);
        }

        if name.chars().any(char::is_control) {
            return Err(InvalidName::ControlCharacters);
        }

        Ok(name.to_string())
    }
}
