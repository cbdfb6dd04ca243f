use std::sync::{Arc, Mutex};

use super::ContactStore;
use crate::domain::contact::Contact;
use crate::errors::AppError;

/// In-memory store. Cloning shares the underlying data, so a test can keep
/// a handle and observe what the book saved.
#[derive(Clone, Default)]
pub struct MemStore {
    data: Arc<Mutex<Vec<Contact>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Result<Vec<Contact>, AppError> {
        Ok(self.data.lock()?.clone())
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        self.snapshot()
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let mut data = self.data.lock()?;
        *data = contacts.to_vec();
        Ok(())
    }
}
