use std::env;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

use super::{create_file_parent, ContactStore};
use crate::domain::contact::Contact;
use crate::errors::AppError;

pub const DEFAULT_STORAGE_PATH: &str = "./.instance/contacts.json";

/// Single JSON file holding the serialized contact list as an array of
/// `{id, name, phone, email}` records.
pub struct JsonStorage {
    pub path: String,
}

impl JsonStorage {
    pub fn new() -> Self {
        Self {
            path: env::var("JSON_STORAGE_PATH").unwrap_or(DEFAULT_STORAGE_PATH.to_string()),
        }
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore for JsonStorage {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        if !Path::new(&self.path).exists() {
            return Ok(Vec::new());
        }

        let mut file = OpenOptions::new().read(true).open(&self.path)?;

        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let json_contacts = serde_json::to_string(&contacts)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        file.write_all(json_contacts.as_bytes())?;
        Ok(())
    }
}
