pub mod json;
pub mod memory;

use std::fs;
use std::path::Path;

use dotenv::dotenv;

use crate::domain::contact::Contact;
use crate::errors::AppError;

/// Durable key-value boundary for the contact list. The book reads through
/// it exactly once at startup and writes through it after every mutation.
pub trait ContactStore {
    fn load(&self) -> Result<Vec<Contact>, AppError>;

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError>;
}

#[derive(Debug)]
pub enum StorageMedium {
    Json,
    Mem,
}

impl StorageMedium {
    pub fn from(str: &str) -> Result<Self, AppError> {
        match str {
            "json" => Ok(StorageMedium::Json),
            "mem" => Ok(StorageMedium::Mem),
            _ => Err(AppError::Validation(
                "Not a recognized storage medium".to_string(),
            )),
        }
    }
}

/// Picks the storage backend from the STORAGE_CHOICE env var (json default).
pub fn parse_storage_type() -> Result<Box<dyn ContactStore>, AppError> {
    dotenv().ok();

    let choice = std::env::var("STORAGE_CHOICE").unwrap_or("json".to_string());

    match StorageMedium::from(&choice.to_lowercase())? {
        StorageMedium::Json => Ok(Box::new(json::JsonStorage::new())),
        StorageMedium::Mem => Ok(Box::new(memory::MemStore::new())),
    }
}

pub fn create_file_parent(path: &str) -> Result<(), AppError> {
    let path = Path::new(path);

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
