pub use crate::cli::{command, run_app};
pub use crate::domain::{
    book::ContactBook,
    contact::{Contact, Draft},
};
pub use crate::errors::AppError;
pub use crate::store::{self, ContactStore, json::JsonStorage, memory::MemStore};
pub use crate::validation::{ErrorSet, Field, FieldError, Validator};
