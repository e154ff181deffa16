use crate::domain::{LineItem, Notice, UnitSnapshot};
use crate::pricing::Totals;

/// Edits applied to a document. Each one is followed by a full recompute.
#[derive(Debug, Clone)]
pub enum DocumentAction {
    AddItem(LineItem),
    RemoveItem(usize),
    /// Raw quantity text as typed into the form
    SetItemQuantity { index: usize, raw: String },
    SelectUnit { index: usize, snapshot: UnitSnapshot },
    /// Raw discount text as typed into the form
    SetDiscount(String),
    Recompute,
}

/// Results from DocumentActions
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentActionResult {
    Updated(Totals),
    ItemRemoved { item: LineItem, totals: Totals },
    DiscountApplied { totals: Totals, notice: Option<Notice> },
}

impl DocumentActionResult {
    pub fn totals(&self) -> Totals {
        match self {
            DocumentActionResult::Updated(totals)
            | DocumentActionResult::ItemRemoved { totals, .. }
            | DocumentActionResult::DiscountApplied { totals, .. } => *totals,
        }
    }
}
