use anyhow::Result;
use cart_sync::core::controls::Action;
use cart_sync::utils::validation::Validate;
use cart_sync::{CartError, CartSession, CatalogConfig, Gesture, Total, TotalDisplay};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use tempfile::TempDir;

/// A writer that can still be read after the display has been moved into the cart.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.borrow().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write_catalog(dir: &TempDir, content: &str) -> Result<String> {
    let path = dir.path().join("catalog.toml");
    std::fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

const STOREFRONT: &str = r#"
[session]
name = "storefront"
description = "Three product cards"

[[products]]
id = "shoes"
name = "Running Shoes"
price = "9.99"

[[products]]
id = "socks"
name = "Socks"
price = "5.00"

[[products]]
id = "broken"
name = "Broken Listing"
price = "-4.00"
"#;

#[test]
fn test_page_session_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_catalog(&temp_dir, STOREFRONT)?;

    let catalog = CatalogConfig::from_file(&path)?;
    catalog.validate()?;

    let (mut session, scan) = CartSession::from_source(&catalog);
    assert_eq!(scan.rejected.len(), 1);
    assert!(matches!(scan.rejected[0], CartError::InvalidEntry { .. }));

    let screen = SharedBuffer::default();
    session.subscribe(TotalDisplay::new(screen.clone()));
    session.preload();

    for raw in ["plus:shoes", "plus:shoes", "minus:socks", "minus:shoes"] {
        session.apply(&raw.parse::<Gesture>()?)?;
    }

    assert_eq!(session.cart().quantity_of("shoes"), 2);
    assert_eq!(session.cart().quantity_of("socks"), 1);
    assert_eq!(session.cart().total().to_string(), "24.98");

    // minus:socks 在數量 1 時被介面擋下，不會通知
    assert_eq!(
        screen.lines(),
        vec![
            "Total: 9.99",
            "Total: 14.99",
            "Total: 14.99",
            "Total: 24.98",
            "Total: 34.97",
            "Total: 24.98",
        ]
    );
    Ok(())
}

#[test]
fn test_delete_card_then_total_excludes_product() -> Result<()> {
    let catalog = CatalogConfig::from_toml_str(STOREFRONT)?;
    let (mut session, _) = CartSession::from_source(&catalog);
    session.preload();

    session.apply(&"delete:shoes".parse()?)?;

    assert_eq!(session.cart().total().to_string(), "5.00");
    assert!(session.card("shoes").unwrap().is_removed());
    assert_eq!(session.cart().len(), 1);
    Ok(())
}

#[test]
fn test_session_without_preload_starts_empty() -> Result<()> {
    let catalog = CatalogConfig::from_toml_str(STOREFRONT)?;
    let (mut session, _) = CartSession::from_source(&catalog);

    let totals = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&totals);
    session.subscribe(move |total: Total| sink.borrow_mut().push(total));

    assert!(session.cart().is_empty());
    assert_eq!(session.cart().total().to_string(), "0.00");

    // 數量欄位為 0 時減少按鈕無效
    assert!(!session.apply(&"minus:socks".parse()?)?);
    session.apply(&"set:socks=3".parse()?)?;

    assert_eq!(session.cart().quantity_of("socks"), 3);
    assert_eq!(session.card("socks").unwrap().field(), 3);
    assert_eq!(totals.borrow().len(), 3);
    assert_eq!(totals.borrow().last().unwrap().to_string(), "15.00");
    Ok(())
}

#[test]
fn test_minus_stops_at_one_after_direct_entry() -> Result<()> {
    let catalog = CatalogConfig::from_toml_str(STOREFRONT)?;
    let (mut session, _) = CartSession::from_source(&catalog);
    session.preload();

    session.apply(&"set:socks=3".parse()?)?;
    let gesture = Gesture {
        product_id: "socks".to_string(),
        action: Action::Minus,
    };
    assert!(session.apply(&gesture)?);
    assert!(session.apply(&gesture)?);
    // 數量 1 時減少按鈕被擋下，商品留在購物車
    assert!(!session.apply(&gesture)?);

    assert_eq!(session.cart().quantity_of("socks"), 1);
    assert_eq!(session.card("socks").unwrap().field(), 1);
    Ok(())
}

#[test]
fn test_snapshot_json_output() -> Result<()> {
    let catalog = CatalogConfig::from_toml_str(STOREFRONT)?;
    let (mut session, _) = CartSession::from_source(&catalog);
    session.preload();
    session.apply(&"plus:shoes".parse()?)?;

    let json = serde_json::to_value(session.cart().snapshot())?;
    assert_eq!(json["total"], "24.98");
    assert_eq!(json["item_count"], 3);
    assert_eq!(json["items"][0]["id"], "shoes");
    assert_eq!(json["items"][0]["quantity"], 2);
    assert_eq!(json["items"][0]["line_total"], "19.98");
    Ok(())
}

#[test]
fn test_missing_catalog_file() {
    let result = CatalogConfig::from_file("/definitely/not/here/catalog.toml");
    assert!(matches!(result, Err(CartError::IoError(_))));
}

#[test]
fn test_oversized_price_is_skipped_and_cart_stays_two_decimal() -> Result<()> {
    let catalog = CatalogConfig::from_toml_str(
        r#"
[session]
name = "ceiling"

[[products]]
id = "huge"
name = "Huge"
price = "10000000000000000000000000000"

[[products]]
id = "top"
name = "Top"
price = "1000000000"
"#,
    )?;
    let (mut session, scan) = CartSession::from_source(&catalog);
    assert_eq!(scan.rejected.len(), 1);
    assert!(session.card("huge").is_none());

    session.preload();
    session.apply(&"set:top=999".parse()?)?;
    session.apply(&"plus:top".parse()?)?;

    assert_eq!(session.cart().total().to_string(), "1000000000000.00");
    assert!("set:top=4294967295".parse::<Gesture>().is_err());
    Ok(())
}
