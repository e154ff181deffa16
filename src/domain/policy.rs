use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DocumentKind;

/// Highest percentage discount a proposal may carry unless settings say otherwise
pub const DEFAULT_MAX_DISCOUNT_PERCENT: u32 = 20;

/// How a document's discount field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    /// Percentage of the subtotal, capped by `max_discount_percent`
    Percent,
    /// Fixed amount, capped by the subtotal
    Absolute,
}

/// Where rounding to minor units happens when building the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtotalRounding {
    /// Sum the exact products, round the subtotal once
    SumThenRound,
    /// Sum line totals that were already rounded
    RoundLines,
}

/// Pricing rules fixed for a document when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    pub discount_mode: DiscountMode,
    pub subtotal_rounding: SubtotalRounding,
    pub max_discount_percent: Decimal,
}

impl PricingPolicy {
    /// Proposals discount by percentage; quotations and invoices by amount.
    /// Invoices carry pre-rounded line totals to match the billing backend.
    ///
    /// With `SumThenRound` the subtotal is the rounded sum of exact products, so it can
    /// differ by a minor unit from the sum of the rounded `line_total`s (two lines of
    /// 0.005 give a subtotal of 0.01, while each line itself shows 0.01).
    pub fn for_kind(kind: DocumentKind, max_discount_percent: Decimal) -> Self {
        let (discount_mode, subtotal_rounding) = match kind {
            DocumentKind::Quotation => (DiscountMode::Absolute, SubtotalRounding::SumThenRound),
            DocumentKind::Proposal => (DiscountMode::Percent, SubtotalRounding::SumThenRound),
            DocumentKind::Invoice => (DiscountMode::Absolute, SubtotalRounding::RoundLines),
        };
        Self {
            discount_mode,
            subtotal_rounding,
            max_discount_percent,
        }
    }
}

