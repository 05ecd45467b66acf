pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::display::{LogDisplay, TotalDisplay};
pub use config::catalog_config::CatalogConfig;
pub use crate::core::{controls::Gesture, session::CartSession, Cart, CatalogEntry, Total};
pub use utils::error::{CartError, Result};
