use crate::core::{CartListener, Total};
use std::io::Write;

/// Renders `Total: <amount>` on its writer after every cart change.
pub struct TotalDisplay<W: Write> {
    writer: W,
    label: String,
}

impl<W: Write> TotalDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self::with_label(writer, "Total")
    }

    pub fn with_label(writer: W, label: impl Into<String>) -> Self {
        Self {
            writer,
            label: label.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CartListener for TotalDisplay<W> {
    fn on_cart_changed(&mut self, total: Total) {
        // 顯示失敗不能影響購物車狀態
        if let Err(e) = writeln!(self.writer, "{}: {}", self.label, total) {
            tracing::warn!("Failed to render total {}: {}", total, e);
        }
    }
}

/// Reports every total through `tracing`.
#[derive(Debug, Default)]
pub struct LogDisplay {
    updates: u64,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartListener for LogDisplay {
    fn on_cart_changed(&mut self, total: Total) {
        self.updates += 1;
        tracing::info!(update = self.updates, total = %total, "💰 Cart total updated");
    }
}
