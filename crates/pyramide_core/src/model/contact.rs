//! Contact/client directory record.
//!
//! # Responsibility
//! - Define the record shared by the contacts and clients directories.
//! - Provide field validation for create/update paths.
//!
//! # Invariants
//! - `name` and `email` are required and non-blank after trim.
//! - `email` must have a single `@` with non-empty local and domain parts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// One directory entry. Both directory entities (contacts and clients)
/// share this shape and the same persisted field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique id within one directory.
    pub id: String,
    /// Full display name. Required.
    pub name: String,
    /// Job title, free text.
    #[serde(default)]
    pub role: String,
    /// Company name, free text.
    #[serde(default)]
    pub company: String,
    /// Contact email. Required.
    pub email: String,
    /// Phone number, free text.
    #[serde(default)]
    pub phone: String,
    /// Postal address, free text.
    #[serde(default)]
    pub address: String,
}

/// Validation failures raised before any directory mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name` is empty or whitespace-only.
    BlankName,
    /// `email` is empty or whitespace-only.
    BlankEmail,
    /// `email` does not look like an address.
    MalformedEmail(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "contact name must not be blank"),
            Self::BlankEmail => write!(f, "contact email must not be blank"),
            Self::MalformedEmail(value) => write!(f, "contact email is malformed: `{value}`"),
        }
    }
}

impl Error for ContactValidationError {}

impl Contact {
    /// Creates a directory entry with a fresh `client-<uuid>` id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: format!("client-{}", Uuid::new_v4()),
            name: name.into(),
            role: String::new(),
            company: String::new(),
            email: email.into(),
            phone: String::new(),
            address: String::new(),
        }
    }

    /// Checks required fields and email shape.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::BlankName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ContactValidationError::BlankEmail);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ContactValidationError::MalformedEmail(email.to_string()));
        }
        Ok(())
    }
}
