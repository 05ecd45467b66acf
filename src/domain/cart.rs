use crate::domain::model::{CatalogEntry, ProductId, Total};
use crate::domain::ports::CartListener;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Line Item
// ============================================================================

#[derive(Debug, Clone)]
pub struct LineItem {
    entry: Arc<CatalogEntry>,
    // 不變量: quantity >= 1
    quantity: u32,
}

impl LineItem {
    fn new(entry: Arc<CatalogEntry>) -> Self {
        Self { entry, quantity: 1 }
    }

    pub fn entry(&self) -> &Arc<CatalogEntry> {
        &self.entry
    }

    pub fn id(&self) -> &ProductId {
        self.entry.id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unrounded `quantity × unit price`, saturating at `Decimal::MAX`.
    pub fn line_total(&self) -> Decimal {
        self.entry
            .unit_price()
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

// ============================================================================
// Cart
// ============================================================================

/// Ordered line items (first-add order), at most one per product id.
///
/// Every mutating call notifies each subscribed [`CartListener`] exactly once
/// with the new total before it returns, even when the call changed nothing.
#[derive(Default)]
pub struct Cart {
    items: Vec<LineItem>,
    listeners: Vec<Box<dyn CartListener>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: CartListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_item(&mut self, entry: &Arc<CatalogEntry>) {
        match self.position(entry.id().as_str()) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                tracing::debug!("Increased '{}' to {}", entry.id(), item.quantity);
            }
            None => {
                self.items.push(LineItem::new(Arc::clone(entry)));
                tracing::debug!("Added '{}' to cart", entry.id());
            }
        }
        self.notify();
    }

    /// Decrements the quantity, removing the line item instead of letting it reach zero.
    pub fn decrease_item(&mut self, entry: &CatalogEntry) {
        if let Some(index) = self.position(entry.id().as_str()) {
            if self.items[index].quantity > 1 {
                self.items[index].quantity -= 1;
                tracing::debug!("Decreased '{}' to {}", entry.id(), self.items[index].quantity);
            } else {
                self.items.remove(index);
                tracing::debug!("Removed '{}' after last unit", entry.id());
            }
        }
        self.notify();
    }

    pub fn remove_item(&mut self, id: &str) {
        if let Some(index) = self.position(id) {
            self.items.remove(index);
            tracing::debug!("Removed '{}' from cart", id);
        }
        self.notify();
    }

    /// Re-sends the current total to every listener without touching the items.
    pub fn refresh(&mut self) {
        self.notify();
    }

    pub fn total(&self) -> Total {
        Total::from_amount(saturating_sum(self.items.iter().map(LineItem::line_total)))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id().as_str() == id)
    }

    /// 0 when the product is not in the cart.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.get(id).map(LineItem::quantity).unwrap_or(0)
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self
                .items
                .iter()
                .map(|item| LineSnapshot {
                    id: item.id().clone(),
                    name: item.entry.name().to_string(),
                    unit_price: item.entry.unit_price(),
                    quantity: item.quantity,
                    line_total: Total::from_amount(item.line_total()),
                })
                .collect(),
            item_count: self.item_count(),
            total: self.total(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id().as_str() == id)
    }

    fn notify(&mut self) {
        let total = self.total();
        for listener in self.listeners.iter_mut() {
            listener.on_cart_changed(total);
        }
    }
}

// 溢位時停在 Decimal::MAX，再由 Total 截到可顯示的上限
fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!("Cart total overflowed; saturating");
            Decimal::MAX
        })
    })
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSnapshot {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Total,
}

/// Serializable view of the cart for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<LineSnapshot>,
    pub item_count: u64,
    pub total: Total,
}

// ============================================================================
// Unit Tests
// ============================================================================
