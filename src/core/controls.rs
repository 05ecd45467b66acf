use crate::domain::cart::Cart;
use crate::domain::model::CatalogEntry;
use crate::utils::error::{CartError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Largest quantity accepted through direct entry.
pub const MAX_DIRECT_QUANTITY: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Plus,
    Minus,
    Delete,
    /// 直接輸入數量
    Set(u32),
}

/// A user action aimed at one product card, e.g. `plus:sku-1` or `set:sku-1=3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    pub product_id: String,
    pub action: Action,
}

impl FromStr for Gesture {
    type Err = CartError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| CartError::InvalidGesture {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (verb, target) = input
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected '<action>:<product id>'"))?;

        let (product_id, action) = match verb.trim().to_ascii_lowercase().as_str() {
            "plus" | "add" => (target, Action::Plus),
            "minus" | "dec" => (target, Action::Minus),
            "delete" | "remove" => (target, Action::Delete),
            "set" => {
                let (id, quantity) = target
                    .split_once('=')
                    .ok_or_else(|| invalid("expected 'set:<product id>=<quantity>'"))?;
                let quantity = quantity
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| invalid("quantity must be a non-negative integer"))?;
                if quantity > MAX_DIRECT_QUANTITY {
                    return Err(invalid("quantity too large"));
                }
                (id, Action::Set(quantity))
            }
            _ => return Err(invalid("unknown action")),
        };

        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(invalid("missing product id"));
        }

        Ok(Gesture {
            product_id: product_id.to_string(),
            action,
        })
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Plus => write!(f, "plus:{}", self.product_id),
            Action::Minus => write!(f, "minus:{}", self.product_id),
            Action::Delete => write!(f, "delete:{}", self.product_id),
            Action::Set(n) => write!(f, "set:{}={}", self.product_id, n),
        }
    }
}

/// Controls of one product card: the quantity field plus the plus/minus/delete
/// buttons. The field gate on `Minus` is a UI affordance; the cart enforces
/// its own quantity rules regardless.
#[derive(Debug, Clone)]
pub struct ProductControls {
    entry: Arc<CatalogEntry>,
    field: u32,
    removed: bool,
}

impl ProductControls {
    pub fn new(entry: Arc<CatalogEntry>, field: u32) -> Self {
        Self {
            entry,
            field,
            removed: false,
        }
    }

    pub fn entry(&self) -> &Arc<CatalogEntry> {
        &self.entry
    }

    /// Quantity currently shown in the card's input field.
    pub fn field(&self) -> u32 {
        self.field
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub(crate) fn sync_field(&mut self, field: u32) {
        self.field = field;
    }

    /// Forwards the action to the cart. Returns `false` when the card ignored it.
    pub fn apply(&mut self, cart: &mut Cart, action: Action) -> bool {
        if self.removed {
            tracing::debug!("Card '{}' was deleted; ignoring {:?}", self.entry.id(), action);
            return false;
        }

        match action {
            Action::Plus => {
                self.field = self.field.saturating_add(1);
                cart.add_item(&self.entry);
            }
            Action::Minus => {
                if self.field <= 1 {
                    tracing::debug!("Minus on '{}' ignored at quantity {}", self.entry.id(), self.field);
                    return false;
                }
                self.field -= 1;
                cart.decrease_item(&self.entry);
            }
            Action::Delete => {
                cart.remove_item(self.entry.id().as_str());
                self.removed = true;
            }
            Action::Set(requested) => {
                // 直接建構的 Gesture 不經過解析，這裡同樣套用上限
                let target = requested.min(MAX_DIRECT_QUANTITY);
                if target != requested {
                    tracing::warn!(
                        "Quantity {} for '{}' capped at {}",
                        requested,
                        self.entry.id(),
                        MAX_DIRECT_QUANTITY
                    );
                }
                let id = self.entry.id().as_str();
                if target == 0 {
                    cart.remove_item(id);
                } else {
                    while cart.quantity_of(id) < target {
                        cart.add_item(&self.entry);
                    }
                    while cart.quantity_of(id) > target {
                        cart.decrease_item(&self.entry);
                    }
                }
                self.field = target;
            }
        }
        true
    }
}
