use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::domain::contact::Draft;
use crate::errors::AppError;

/// The three contact fields a validation failure can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    MissingField,
    InvalidFormat,
}

impl FieldError {
    /// Inline message shown next to the offending field.
    pub fn message(&self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, FieldError::MissingField) => "Name is required",
            // Name has no format rule; this arm only keeps the match exhaustive.
            (Field::Name, FieldError::InvalidFormat) => "Invalid name format",
            (Field::Phone, FieldError::MissingField) => "Phone number is required",
            (Field::Phone, FieldError::InvalidFormat) => "Invalid phone number format",
            (Field::Email, FieldError::MissingField) => "Email is required",
            (Field::Email, FieldError::InvalidFormat) => "Invalid email format",
        }
    }
}

/// Field-keyed validation failures for one draft.
///
/// Backed by a BTreeMap so iteration order is stable (name, phone, email).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    errors: BTreeMap<Field, FieldError>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Drops the entry for one field, used when the user edits that field.
    pub fn clear_field(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(field, err)| (*field, *err))
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, err) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, err.message(field))?;
            first = false;
        }
        Ok(())
    }
}

/// Compiled validation rules for a contact draft.
pub struct Validator {
    phone_re: Regex,
    email_re: Regex,
}

impl Validator {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            // Digits with optional leading +, spaces, hyphens, parentheses
            phone_re: Regex::new(r"^\+?[\d\s\-()]+$")?,
            // local@domain.tld shape, nothing stricter
            email_re: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
        })
    }

    /// Checks every field independently so the caller gets the complete
    /// error set in one pass. Pure: no state is touched.
    ///
    /// Format rules run against the trimmed values, since surrounding
    /// whitespace is stripped before a draft is stored.
    pub fn validate(&self, draft: &Draft) -> ErrorSet {
        let mut errors = ErrorSet::new();

        if draft.name.trim().is_empty() {
            errors.insert(Field::Name, FieldError::MissingField);
        }

        let phone = draft.phone.trim();
        if phone.is_empty() {
            errors.insert(Field::Phone, FieldError::MissingField);
        } else if !self.phone_re.is_match(phone) || !phone.chars().any(|c| c.is_ascii_digit()) {
            // The bare pattern admits digit-free strings like "---",
            // so at least one digit is required on top of it.
            errors.insert(Field::Phone, FieldError::InvalidFormat);
        }

        let email = draft.email.trim();
        if email.is_empty() {
            errors.insert(Field::Email, FieldError::MissingField);
        } else if !self.email_re.is_match(email) {
            errors.insert(Field::Email, FieldError::InvalidFormat);
        }

        errors
    }
}
