pub mod controls;
pub mod scanner;
pub mod session;

pub use crate::domain::cart::{Cart, CartSnapshot, LineItem};
pub use crate::domain::model::{CatalogEntry, ProductId, RawPrice, RawProduct, Total};
pub use crate::domain::ports::{CartListener, CatalogSource};
pub use crate::utils::error::Result;
