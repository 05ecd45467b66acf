use crate::domain::model::CatalogEntry;
use crate::domain::ports::CatalogSource;
use crate::utils::error::CartError;
use std::collections::HashSet;
use std::sync::Arc;

/// Result of scanning a catalog: accepted entries in catalog order plus the
/// products that were skipped.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub entries: Vec<Arc<CatalogEntry>>,
    pub rejected: Vec<CartError>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct CatalogScanner;

impl CatalogScanner {
    /// 建立每個商品的 CatalogEntry，無效的商品會被跳過並記錄
    pub fn scan<S: CatalogSource + ?Sized>(source: &S) -> ScanReport {
        let mut report = ScanReport::default();
        let mut seen = HashSet::new();

        for (index, product) in source.products().iter().enumerate() {
            let entry = match product.to_entry() {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("⚠️ Skipping product #{} ('{}'): {}", index + 1, product.id, e);
                    report.rejected.push(e);
                    continue;
                }
            };

            if !seen.insert(entry.id().clone()) {
                let e = CartError::invalid_entry("id", entry.id().as_str(), "Duplicate product id");
                tracing::warn!("⚠️ Skipping product #{} ('{}'): {}", index + 1, product.id, e);
                report.rejected.push(e);
                continue;
            }

            report.entries.push(Arc::new(entry));
        }

        tracing::info!(
            "Scanned {} products ({} skipped)",
            report.entries.len(),
            report.rejected.len()
        );
        report
    }
}
