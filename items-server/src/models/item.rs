//! Item identifiers and write payloads
//!
//! Path ids and JSON bodies are parsed here, before anything reaches the
//! database.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::{ValidationError, WriteAction};

/// Validated item identifier.
///
/// Server-assigned ids come from a `SERIAL` column, so only positive
/// `i32` values can ever match a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(i32);

impl ItemId {
    /// Wrap an id, rejecting values a `SERIAL` column never produces.
    pub fn new(id: i32) -> Result<Self, ValidationError> {
        if id < 1 {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            });
        }
        Ok(Self(id))
    }

    /// Parse an id from a path segment.
    ///
    /// # Example
    /// ```
    /// use items_server::models::ItemId;
    ///
    /// assert_eq!(ItemId::parse("42").unwrap().get(), 42);
    /// assert!(ItemId::parse("abc").is_err());
    /// assert!(ItemId::parse("0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let id = s.parse::<i32>().map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        })?;
        Self::new(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw JSON body for create and update.
///
/// Both fields are optional at this layer so a missing field is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemPayload {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    /// Check that both fields are present and non-empty.
    pub fn validate(self, action: WriteAction) -> Result<ItemFields, ValidationError> {
        let name = required(self.name, "name", action)?;
        let description = required(self.description, "description", action)?;
        Ok(ItemFields { name, description })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    action: WriteAction,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Required { action, field }),
    }
}

/// Validated name/description pair, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    name: String,
    description: String,
}

impl ItemFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Consume and return `(name, description)`.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.description)
    }
}
