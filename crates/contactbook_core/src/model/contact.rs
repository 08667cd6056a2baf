//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted contact record (`name`, `number`, `email`).
//! - Provide the presence check applied when a contact is created.
//!
//! # Invariants
//! - Newly created contacts have all three fields non-empty.
//! - Deserialized contacts are accepted as stored and never re-validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One field of a contact record, used for validation reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Number,
    Email,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Email => "email",
        }
    }
}

/// Validation error for contact creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Required field is an empty string.
    MissingField(ContactField),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "contact {} must not be empty", field.as_str()),
        }
    }
}

impl Error for ContactValidationError {}

/// A personal contact entry.
///
/// Serialized field names are the snapshot wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    /// Phone number as free text; no format is enforced.
    pub number: String,
    pub email: String,
}

impl Contact {
    /// Creates a contact after checking that every field is present.
    ///
    /// Whitespace-only values count as present.
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        let contact = Self {
            name: name.into(),
            number: number.into(),
            email: email.into(),
        };
        contact.validate()?;
        Ok(contact)
    }

    /// Checks presence of all fields, reporting the first missing one in
    /// `name`, `number`, `email` order.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let fields = [
            (ContactField::Name, &self.name),
            (ContactField::Number, &self.number),
            (ContactField::Email, &self.email),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ContactValidationError::MissingField(*field)),
            None => Ok(()),
        }
    }
}
