pub mod catalog_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cart-sync")]
#[command(about = "Shopping cart that keeps a running total in sync with every change")]
pub struct CliConfig {
    /// Path to the TOML product catalog
    #[arg(long, default_value = "catalog.toml")]
    pub catalog: String,

    /// Gestures to replay, e.g. plus:shoes,minus:shoes,delete:socks,set:hat=3
    #[arg(long, value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Do not add every product once at startup
    #[arg(long)]
    pub no_preload: bool,

    /// Print the final cart as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}
