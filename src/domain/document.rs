use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DiscountMode, PricingPolicy, UnitSnapshot};

/// The three priced documents the back office produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Quotation,
    Proposal,
    Invoice,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotation",
            DocumentKind::Proposal => "proposal",
            DocumentKind::Invoice => "invoice",
        }
    }

    /// Status a freshly created document starts in.
    pub fn initial_status(&self) -> DocumentStatus {
        match self {
            DocumentKind::Quotation | DocumentKind::Proposal => DocumentStatus::Draft,
            DocumentKind::Invoice => DocumentStatus::Pending,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle tag. Only stored and forwarded; the backend owns the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Pending,
    Paid,
    Cancelled,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Sent => "sent",
            DocumentStatus::Accepted => "accepted",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Paid => "paid",
            DocumentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this tag belongs to the closed set of `kind`.
    pub fn is_valid_for(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Quotation | DocumentKind::Proposal => matches!(
                self,
                DocumentStatus::Draft
                    | DocumentStatus::Sent
                    | DocumentStatus::Accepted
                    | DocumentStatus::Rejected
            ),
            DocumentKind::Invoice => matches!(
                self,
                DocumentStatus::Pending | DocumentStatus::Paid | DocumentStatus::Cancelled
            ),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount as entered, after clamping to the document's policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discount {
    Percent(Decimal),
    Absolute(Decimal),
}

impl Discount {
    /// A zero discount in the given mode.
    pub fn none(mode: DiscountMode) -> Self {
        match mode {
            DiscountMode::Percent => Discount::Percent(Decimal::ZERO),
            DiscountMode::Absolute => Discount::Absolute(Decimal::ZERO),
        }
    }

    pub fn value(&self) -> Decimal {
        match self {
            Discount::Percent(value) | Discount::Absolute(value) => *value,
        }
    }
}

/// Informational message raised by a mutation. Never blocks the edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    DiscountClamped { requested: Decimal, applied: Decimal },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DiscountClamped { requested, applied } => write!(
                f,
                "Discount of {}% exceeds the allowed maximum; {}% applied",
                requested, applied
            ),
        }
    }
}

/// One priced row: a catalog unit, how many, at what snapshotted rate.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub unit_id: String,
    pub unit_name: String,
    pub quantity: u32,
    pub unit_rate: Decimal,
    /// Derived. Overwritten on every recompute.
    pub line_total: Decimal,
}

impl LineItem {
    pub fn from_snapshot(snapshot: &UnitSnapshot, quantity: u32) -> Self {
        Self {
            unit_id: snapshot.unit_id.clone(),
            unit_name: snapshot.name.clone(),
            quantity,
            unit_rate: snapshot.rate,
            line_total: Decimal::ZERO,
        }
    }
}

/// Quotation, proposal or invoice being edited.
///
/// `subtotal`, `applied_discount`, `final_amount` and every `line_total` are owned by
/// the calculator in [`crate::pricing`]; nothing else writes them.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingDocument {
    pub id: String,
    pub kind: DocumentKind,
    pub client_name: String,
    pub policy: PricingPolicy,
    pub items: Vec<LineItem>,
    pub discount: Discount,
    pub subtotal: Decimal,
    pub applied_discount: Decimal,
    pub final_amount: Decimal,
    pub status: DocumentStatus,
    pub notices: Vec<Notice>,
}

impl PricingDocument {
    /// An empty document in its kind's initial status.
    pub fn new(
        id: impl Into<String>,
        kind: DocumentKind,
        client_name: impl Into<String>,
        policy: PricingPolicy,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            client_name: client_name.into(),
            policy,
            items: Vec::new(),
            discount: Discount::none(policy.discount_mode),
            subtotal: Decimal::ZERO,
            applied_discount: Decimal::ZERO,
            final_amount: Decimal::ZERO,
            status: kind.initial_status(),
            notices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_sets_are_closed_per_kind() {
        assert!(DocumentStatus::Accepted.is_valid_for(DocumentKind::Proposal));
        assert!(!DocumentStatus::Paid.is_valid_for(DocumentKind::Quotation));
        assert!(DocumentStatus::Paid.is_valid_for(DocumentKind::Invoice));
        assert!(!DocumentStatus::Draft.is_valid_for(DocumentKind::Invoice));
    }

    #[test]
    fn test_new_document_is_empty() {
        let policy = PricingPolicy::for_kind(DocumentKind::Proposal, Decimal::from(20));
        let doc = PricingDocument::new("doc_1", DocumentKind::Proposal, "Acme School", policy);
        assert!(doc.items.is_empty());
        assert_eq!(doc.discount, Discount::Percent(Decimal::ZERO));
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.final_amount, Decimal::ZERO);
    }
}
