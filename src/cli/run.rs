use std::env;
use std::io::{self, BufRead, Write};

use clap::Parser;

use crate::cli::command::{Cli, Commands};
use crate::domain::book::ContactBook;
use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::store;

pub fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();

    env::set_var("STORAGE_CHOICE", &cli.storage_choice);

    let storage = store::parse_storage_type()?;
    let mut book = ContactBook::new(storage)?;

    match cli.command {
        Commands::Add { name, phone, email } => {
            book.set_name(name);
            book.set_phone(phone);
            book.set_email(email);

            match book.submit() {
                Ok(contact) => {
                    println!("Contact added successfully ({})", contact.id);
                    Ok(())
                }
                Err(errors) => Err(AppError::Validation(errors.to_string())),
            }
        }

        Commands::List => {
            if book.contacts().is_empty() {
                println!("No contacts yet. Add your first contact!");
                return Ok(());
            }

            for (i, contact) in book.contacts().iter().enumerate() {
                print_contact(i + 1, contact);
            }
            Ok(())
        }

        Commands::Edit {
            id,
            name,
            phone,
            email,
        } => {
            book.begin_edit(id);
            if !book.draft().is_editing() {
                return Err(AppError::NotFound("Contact".to_string()));
            }

            if let Some(name) = name {
                book.set_name(name);
            }
            if let Some(phone) = phone {
                book.set_phone(phone);
            }
            if let Some(email) = email {
                book.set_email(email);
            }

            match book.submit() {
                Ok(_) => {
                    println!("Contact updated successfully");
                    Ok(())
                }
                Err(errors) => Err(AppError::Validation(errors.to_string())),
            }
        }

        Commands::Delete { id, yes } => {
            let contact = match book.get(id) {
                Some(contact) => contact.clone(),
                None => {
                    eprintln!("Contact Not found");
                    return Ok(());
                }
            };

            if !yes && !confirm_delete(&contact)? {
                println!("Delete cancelled");
                return Ok(());
            }

            book.delete(id);
            println!("Contact deleted successfully");
            Ok(())
        }

        Commands::Search { term } => {
            book.set_search_term(term);
            let matches = book.filtered();

            if matches.is_empty() {
                println!("No contacts found matching your search.");
                return Ok(());
            }

            for (i, contact) in matches.iter().enumerate() {
                print_contact(i + 1, contact);
            }
            Ok(())
        }
    }
}

fn print_contact(i: usize, contact: &Contact) {
    println!(
        "{i:>3}. {:<20} {:<15} {:<30} {}",
        contact.name, contact.phone, contact.email, contact.id
    );
}

/// Asks for a y/n confirmation on stdout, reads the answer from stdin.
fn confirm_delete(contact: &Contact) -> Result<bool, AppError> {
    println!(
        "Are you sure you want to delete this contact? (y/n)\n  {} {} {}",
        contact.name, contact.phone, contact.email
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
