//! Validation error types

use std::fmt;

/// Which write a body was submitted for.
///
/// The client-facing message differs between create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
}

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required body field is absent, null, or empty
    Required {
        action: WriteAction,
        field: &'static str,
    },

    /// Path segment doesn't parse as the expected type
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field, .. } | Self::InvalidFormat { field, .. } => *field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required {
                action: WriteAction::Create,
                ..
            } => write!(f, "Name and description are required"),
            Self::Required {
                action: WriteAction::Update,
                ..
            } => write!(f, "Name and description are required for update"),
            Self::InvalidFormat { field, .. } if *field == "id" => write!(f, "Invalid item id"),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
