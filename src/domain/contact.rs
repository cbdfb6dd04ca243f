use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted contact record. The id is assigned once and never changes;
/// edits replace the three text fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: String, phone: String, email: String) -> Self {
        Contact {
            id: Uuid::new_v4(),
            name,
            phone,
            email,
        }
    }

    /// Substring match across the three fields, OR-combined.
    /// Name and email compare case-insensitively, phone literally.
    pub fn matches(&self, term: &str) -> bool {
        let term_lower = term.to_lowercase();

        self.name.to_lowercase().contains(&term_lower)
            || self.phone.contains(term)
            || self.email.to_lowercase().contains(&term_lower)
    }
}

/// In-progress form values. `editing` holds the id of the contact being
/// edited, or None when a new contact is being created. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub editing: Option<Uuid>,
}

impl Draft {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn clear(&mut self) {
        *self = Draft::default();
    }
}
