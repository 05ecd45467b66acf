use crate::core::controls::{Gesture, ProductControls};
use crate::core::scanner::{CatalogScanner, ScanReport};
use crate::domain::cart::Cart;
use crate::domain::model::CatalogEntry;
use crate::domain::ports::{CartListener, CatalogSource};
use crate::utils::error::{CartError, Result};
use std::sync::Arc;

/// One page session: owns the cart and one set of controls per product card.
#[derive(Debug)]
pub struct CartSession {
    cart: Cart,
    cards: Vec<ProductControls>,
}

impl CartSession {
    pub fn new(entries: Vec<Arc<CatalogEntry>>) -> Self {
        let cards = entries
            .into_iter()
            .map(|entry| ProductControls::new(entry, 0))
            .collect();
        Self {
            cart: Cart::new(),
            cards,
        }
    }

    /// Scans the source and builds a session from the accepted products.
    pub fn from_source<S: CatalogSource + ?Sized>(source: &S) -> (Self, ScanReport) {
        let mut report = CatalogScanner::scan(source);
        let session = Self::new(std::mem::take(&mut report.entries));
        (session, report)
    }

    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: CartListener + 'static,
    {
        self.cart.subscribe(listener);
    }

    /// 每個商品預設加入購物車一次，然後顯示初始總價
    pub fn preload(&mut self) {
        for card in self.cards.iter_mut().filter(|card| !card.is_removed()) {
            self.cart.add_item(card.entry());
            card.sync_field(self.cart.quantity_of(card.entry().id().as_str()));
        }
        self.cart.refresh();
        tracing::info!(
            "🛒 Preloaded {} products, total {}",
            self.cart.len(),
            self.cart.total()
        );
    }

    pub fn apply(&mut self, gesture: &Gesture) -> Result<bool> {
        let card = self
            .cards
            .iter_mut()
            .find(|card| card.entry().id().as_str() == gesture.product_id)
            .ok_or_else(|| CartError::UnknownProduct {
                id: gesture.product_id.clone(),
            })?;

        let forwarded = card.apply(&mut self.cart, gesture.action);
        tracing::debug!("{} -> total {}", gesture, self.cart.total());
        Ok(forwarded)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cards(&self) -> &[ProductControls] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&ProductControls> {
        self.cards.iter().find(|card| card.entry().id().as_str() == id)
    }
}
