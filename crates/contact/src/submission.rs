use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

/// The four inputs of the contact form, in the order they appear on the page.
#[derive(
    Deserialize,
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

/// A single contact form submission.
///
/// Only a JSON object keyed by [`Field`] names deserializes; arrays, unknown
/// keys and non-string values are rejected. Absent keys become empty strings
/// so that they surface as missing fields rather than as a malformed body.
/// `email` is only checked for presence, never for format.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(from = "BTreeMap<Field, String>")]
pub struct ContactSubmission {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

impl From<BTreeMap<Field, String>> for ContactSubmission {
    fn from(mut values: BTreeMap<Field, String>) -> Self {
        let mut submission = Self::default();
        for field in Field::VARIANTS {
            if let Some(value) = values.remove(field) {
                *submission.get_mut(*field) = value;
            }
        }

        submission
    }
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Server-side gate: every field must be non-empty.
    pub fn check(&self) -> crate::Result<()> {
        self.validate()?;

        Ok(())
    }

    /// Blank fields in form order, without going through the validator.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::VARIANTS
            .iter()
            .copied()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
