//! Command line configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use trolley::{observability::LogFormat, settings::parse_amount};

/// Trolley cart store command line
#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Trolley shopping cart store", long_about = None)]
pub struct CliConfig {
    /// Directory holding the stored cart
    #[arg(long, env = "TROLLEY_STORE_DIR", default_value = ".trolley")]
    pub store_dir: PathBuf,

    /// Pricing settings file (YAML)
    #[arg(long, env = "TROLLEY_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TROLLEY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "TROLLEY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Cart commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long, value_parser = parse_amount)]
        price: Decimal,

        /// Image reference
        #[arg(long, default_value = "")]
        image: String,
    },

    /// Remove a line from the cart
    Remove {
        /// Product id
        id: String,
    },

    /// Set the quantity of a line; zero or less removes it
    SetQuantity {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,

    /// Show the cart contents
    Show,

    /// Print the order summary and empty the cart
    Checkout,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
