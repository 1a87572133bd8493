//! Trolley command line

use std::{
    io::{self, Write},
    process::ExitCode,
};

use thiserror::Error;
use tracing::error;

use trolley::{
    items::NewCartLine,
    observability::init_subscriber,
    settings::{Settings, SettingsError},
    storage::{FileStore, KeyValueStore},
    store::{CartStore, CheckoutError},
    summary::{SummaryError, to_money, write_cart},
};

use crate::config::{CliConfig, Command};

mod config;

/// Errors surfaced to the command line user.
#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Trolley entry point
pub fn main() -> ExitCode {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            _ = err.print();

            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };

    if let Err(err) = init_subscriber(&config.log_level, config.log_format) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");

            ExitCode::FAILURE
        }
    }
}

fn run(config: CliConfig) -> Result<(), AppError> {
    let settings = match config.settings.as_deref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut store = CartStore::open(FileStore::new(&config.store_dir));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Add {
            id,
            name,
            price,
            image,
        } => {
            store.add_item(NewCartLine::new(id, name, price, image));
            write_status(&mut out, &store, &settings)?;
        }
        Command::Remove { id } => {
            store.remove_item(&id);
            write_status(&mut out, &store, &settings)?;
        }
        Command::SetQuantity { id, quantity } => {
            store.update_quantity(&id, quantity);
            write_status(&mut out, &store, &settings)?;
        }
        Command::Clear => {
            store.clear_cart();
            write_status(&mut out, &store, &settings)?;
        }
        Command::Show => write_cart(&mut out, store.cart(), settings.currency)?,
        Command::Checkout => {
            let cart = store.cart().clone();
            let summary = store.checkout(&settings)?;

            summary.write_to(&mut out, &cart)?;
            writeln!(out, "Order placed successfully!")?;
        }
    }

    Ok(())
}

fn write_status<S: KeyValueStore>(
    out: &mut impl Write,
    store: &CartStore<S>,
    settings: &Settings,
) -> Result<(), AppError> {
    let subtotal = to_money(store.total(), settings.currency)?;

    writeln!(out, "{} item(s) in cart, subtotal {subtotal}", store.item_count())?;

    Ok(())
}
