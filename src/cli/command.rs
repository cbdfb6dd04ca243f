use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Single-user contact book")]
pub struct Cli {
    /// Storage choice (json, mem) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("json"))]
    pub storage_choice: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Contact email address
        #[arg(long)]
        email: String,
    },
    /// List all contacts with their identifiers
    List,
    /// Edit an existing contact by id
    /// Omitted fields keep their current value
    Edit {
        /// Identifier of the contact to edit
        #[arg(long)]
        id: Uuid,

        /// Update name
        #[arg(long)]
        name: Option<String>,

        /// Update phone number
        #[arg(long)]
        phone: Option<String>,

        /// Update email address
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a contact by id
    Delete {
        /// Identifier of the contact to delete
        #[arg(long)]
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search contacts by a substring of name, phone, or email
    Search {
        /// Search term
        term: String,
    },
}
