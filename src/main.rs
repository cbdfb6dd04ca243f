use std::process::exit;

use contact_book::cli::run_app;
use contact_book::logging;

fn main() {
    logging::init();

    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        exit(1);
    }
}
