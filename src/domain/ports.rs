use crate::domain::model::{RawProduct, Total};

/// Receives the new total after every cart mutation.
pub trait CartListener {
    fn on_cart_changed(&mut self, total: Total);
}

impl<F> CartListener for F
where
    F: FnMut(Total),
{
    fn on_cart_changed(&mut self, total: Total) {
        self(total)
    }
}

/// Anything that can list the products shown on a page.
pub trait CatalogSource {
    fn products(&self) -> &[RawProduct];
}

impl CatalogSource for Vec<RawProduct> {
    fn products(&self) -> &[RawProduct] {
        self
    }
}
