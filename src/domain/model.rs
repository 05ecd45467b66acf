use crate::utils::error::{CartError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_price};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Stable, externally supplied product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An immutable purchasable product. Two entries are the same product when
/// their ids match, whatever their other fields say.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    id: ProductId,
    name: String,
    unit_price: Decimal,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Decimal) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        validate_non_empty_string("id", &id).map_err(into_entry_error)?;
        validate_non_empty_string("name", &name).map_err(into_entry_error)?;
        validate_price("unit_price", unit_price).map_err(into_entry_error)?;

        Ok(Self {
            id: ProductId(id),
            name,
            unit_price,
        })
    }

    /// 從頁面上的價格文字建立 (例如 "9.99")
    pub fn parse(id: impl Into<String>, name: impl Into<String>, price_text: &str) -> Result<Self> {
        let trimmed = price_text.trim();
        let unit_price = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| {
                CartError::invalid_entry("unit_price", price_text, format!("Not a decimal number: {}", e))
            })?;
        Self::new(id, name, unit_price)
    }

    pub fn from_f64(id: impl Into<String>, name: impl Into<String>, price: f64) -> Result<Self> {
        if !price.is_finite() {
            return Err(CartError::invalid_entry(
                "unit_price",
                price.to_string(),
                "Price must be a finite number",
            ));
        }
        let unit_price = Decimal::try_from(price).map_err(|e| {
            CartError::invalid_entry("unit_price", price.to_string(), format!("Out of range: {}", e))
        })?;
        Self::new(id, name, unit_price)
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CatalogEntry {}

impl Hash for CatalogEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn into_entry_error(err: CartError) -> CartError {
    match err {
        CartError::InvalidConfigValueError { field, value, reason } => {
            CartError::InvalidEntry { field, value, reason }
        }
        other => other,
    }
}

/// Cart total: always carries exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Total(Decimal);

impl Total {
    pub fn zero() -> Self {
        Total::from_amount(Decimal::ZERO)
    }

    /// Largest total that still carries two decimal places (`10^26 - 0.01`).
    pub fn max_amount() -> Decimal {
        Decimal::from_i128_with_scale(10i128.pow(28) - 1, 2)
    }

    /// Rounds half-up (midpoint away from zero) to cents, saturating at
    /// [`Total::max_amount`].
    pub fn from_amount(amount: Decimal) -> Self {
        let clamped = amount.min(Self::max_amount());
        let mut rounded = clamped.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Total(rounded)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Total {
    fn default() -> Self {
        Total::zero()
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 商品價格的原始輸入，可以是文字或數字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(f64),
}

/// A product as discovered by a catalog source, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    pub price: RawPrice,
}

impl RawProduct {
    pub fn to_entry(&self) -> Result<CatalogEntry> {
        match &self.price {
            RawPrice::Text(text) => CatalogEntry::parse(self.id.as_str(), self.name.as_str(), text),
            RawPrice::Number(value) => {
                CatalogEntry::from_f64(self.id.as_str(), self.name.as_str(), *value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_entry_creation() {
        let entry = CatalogEntry::new("sku-1", "Sneakers", dec("9.99")).unwrap();
        assert_eq!(entry.id().as_str(), "sku-1");
        assert_eq!(entry.name(), "Sneakers");
        assert_eq!(entry.unit_price(), dec("9.99"));
    }

    #[test]
    fn test_entry_rejects_invalid_input() {
        assert!(matches!(
            CatalogEntry::new("", "Sneakers", dec("1")),
            Err(CartError::InvalidEntry { ref field, .. }) if field == "id"
        ));
        assert!(matches!(
            CatalogEntry::new("sku-1", "  ", dec("1")),
            Err(CartError::InvalidEntry { ref field, .. }) if field == "name"
        ));
        assert!(matches!(
            CatalogEntry::new("sku-1", "Sneakers", dec("-0.01")),
            Err(CartError::InvalidEntry { ref field, .. }) if field == "unit_price"
        ));
    }

    #[test]
    fn test_entry_rejects_non_finite_price() {
        assert!(CatalogEntry::from_f64("a", "A", f64::NAN).is_err());
        assert!(CatalogEntry::from_f64("a", "A", f64::INFINITY).is_err());
        assert!(CatalogEntry::from_f64("a", "A", f64::NEG_INFINITY).is_err());
        assert!(CatalogEntry::from_f64("a", "A", 0.0).is_ok());
    }

    #[test]
    fn test_entry_parse_price_text() {
        let entry = CatalogEntry::parse("a", "A", " 5.00 ").unwrap();
        assert_eq!(entry.unit_price(), dec("5"));
        assert!(CatalogEntry::parse("a", "A", "five").is_err());
        assert!(CatalogEntry::parse("a", "A", "NaN").is_err());
        assert!(CatalogEntry::parse("a", "A", "-3").is_err());
    }

    #[test]
    fn test_entry_equality_by_id() {
        let a = CatalogEntry::new("same", "First", dec("1")).unwrap();
        let b = CatalogEntry::new("same", "Second", dec("2")).unwrap();
        let c = CatalogEntry::new("other", "First", dec("1")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_total_rounding_half_up() {
        assert_eq!(Total::from_amount(dec("0.125")).to_string(), "0.13");
        assert_eq!(Total::from_amount(dec("0.124")).to_string(), "0.12");
        assert_eq!(Total::from_amount(dec("24.98")).to_string(), "24.98");
        assert_eq!(Total::from_amount(dec("5")).to_string(), "5.00");
        assert_eq!(Total::zero().to_string(), "0.00");
    }

    #[test]
    fn test_entry_rejects_oversized_price() {
        assert!(matches!(
            CatalogEntry::new("big", "Big", Decimal::MAX),
            Err(CartError::InvalidEntry { ref field, .. }) if field == "unit_price"
        ));
        assert!(CatalogEntry::parse("big", "Big", "10000000000000000000000000000").is_err());
        assert!(CatalogEntry::from_f64("big", "Big", 1e12).is_err());
        assert!(CatalogEntry::parse("big", "Big", "1000000000").is_ok());
    }

    #[test]
    fn test_total_saturates_with_two_decimals() {
        let total = Total::from_amount(Decimal::MAX);
        assert_eq!(total.amount(), Total::max_amount());
        assert_eq!(total.amount().scale(), 2);
        assert!(total.to_string().ends_with(".99"));
    }

    #[test]
    fn test_raw_product_to_entry() {
        let text = RawProduct {
            id: "a".to_string(),
            name: "A".to_string(),
            price: RawPrice::Text("9.99".to_string()),
        };
        assert_eq!(text.to_entry().unwrap().unit_price(), dec("9.99"));

        let nan = RawProduct {
            id: "b".to_string(),
            name: "B".to_string(),
            price: RawPrice::Number(f64::NAN),
        };
        assert!(matches!(nan.to_entry(), Err(CartError::InvalidEntry { .. })));
    }
}
