//! Derived pricing calculator.
//!
//! Every mutation below ends with a full [`recompute`] over the document, so line totals,
//! subtotal, applied discount and final amount are never observed out of step with the
//! inputs. Raw form input is coerced here; malformed values keep the previous state.

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::domain::{
    round_money, Discount, DocumentKind, DocumentStatus, LineItem, Notice, PricingDocument,
    SubtotalRounding, UnitSnapshot,
};

/// Derived amounts produced by a recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Decimal,
    pub applied_discount: Decimal,
    pub final_amount: Decimal,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("Item index {index} out of range ({len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Unit rate must not be negative: {0}")]
    NegativeRate(Decimal),
    #[error("Status {status} is not valid for a {kind}")]
    InvalidStatus { status: DocumentStatus, kind: DocumentKind },
}

// =============================================================================
// INPUT COERCION
// =============================================================================

/// Parses a non-negative amount from form input. `None` means "keep what you had".
pub fn coerce_decimal(raw: &str) -> Option<Decimal> {
    let value = Decimal::from_str(raw.trim()).ok()?;
    Some(value.max(Decimal::ZERO))
}

/// Parses a quantity the way an integer form field does: fractional input is
/// truncated, anything below one is refused.
pub fn coerce_quantity(raw: &str) -> Option<u32> {
    let value = Decimal::from_str(raw.trim()).ok()?.trunc();
    value.to_u32().filter(|quantity| *quantity >= 1)
}

// =============================================================================
// RECOMPUTE
// =============================================================================

/// Full, idempotent pass over the document's derived fields.
pub fn recompute(doc: &mut PricingDocument) -> Totals {
    let mut exact = Decimal::ZERO;
    let mut rounded_lines = Decimal::ZERO;
    for item in doc.items.iter_mut() {
        let product = Decimal::from(item.quantity).saturating_mul(item.unit_rate);
        item.line_total = round_money(product);
        exact = exact.saturating_add(product);
        rounded_lines = rounded_lines.saturating_add(item.line_total);
    }

    let subtotal = match doc.policy.subtotal_rounding {
        SubtotalRounding::SumThenRound => round_money(exact),
        SubtotalRounding::RoundLines => rounded_lines,
    };

    // Re-clamp on every pass: removing items can pull the subtotal under an absolute discount
    let (discount, applied_discount) = match doc.discount {
        Discount::Percent(percent) => {
            let percent = percent.min(doc.policy.max_discount_percent).max(Decimal::ZERO);
            let amount = round_money(subtotal.saturating_mul(percent) / Decimal::ONE_HUNDRED);
            (Discount::Percent(percent), amount)
        }
        Discount::Absolute(amount) => {
            let amount = amount.min(subtotal).max(Decimal::ZERO);
            (Discount::Absolute(amount), amount)
        }
    };

    let final_amount = (subtotal - applied_discount).max(Decimal::ZERO);

    doc.discount = discount;
    doc.subtotal = subtotal;
    doc.applied_discount = applied_discount;
    doc.final_amount = final_amount;

    Totals {
        subtotal,
        applied_discount,
        final_amount,
    }
}

// =============================================================================
// MUTATIONS
// =============================================================================

fn check_rate(rate: Decimal) -> Result<(), PricingError> {
    if rate < Decimal::ZERO {
        return Err(PricingError::NegativeRate(rate));
    }
    Ok(())
}

fn check_index(doc: &PricingDocument, index: usize) -> Result<(), PricingError> {
    if index < doc.items.len() {
        Ok(())
    } else {
        Err(PricingError::ItemIndexOutOfRange { index, len: doc.items.len() })
    }
}

/// Appends an already-resolved line item.
pub fn add_item(doc: &mut PricingDocument, item: LineItem) -> Result<Totals, PricingError> {
    if item.quantity < 1 {
        return Err(PricingError::InvalidQuantity(item.quantity));
    }
    check_rate(item.unit_rate)?;
    doc.items.push(item);
    Ok(recompute(doc))
}

/// Removes and returns the item at `index`. Out of range leaves the document untouched.
pub fn remove_item(doc: &mut PricingDocument, index: usize) -> Result<(LineItem, Totals), PricingError> {
    check_index(doc, index)?;
    let item = doc.items.remove(index);
    Ok((item, recompute(doc)))
}

/// Applies a raw quantity edit. Unparseable or sub-one input keeps the previous quantity.
pub fn set_item_quantity(doc: &mut PricingDocument, index: usize, raw: &str) -> Result<Totals, PricingError> {
    check_index(doc, index)?;
    if let Some(quantity) = coerce_quantity(raw) {
        doc.items[index].quantity = quantity;
    }
    Ok(recompute(doc))
}

/// Points a line at another catalog unit, copying the unit's current fee.
pub fn select_unit(doc: &mut PricingDocument, index: usize, snapshot: &UnitSnapshot) -> Result<Totals, PricingError> {
    check_index(doc, index)?;
    check_rate(snapshot.rate)?;
    let item = &mut doc.items[index];
    item.unit_id = snapshot.unit_id.clone();
    item.unit_name = snapshot.name.clone();
    item.unit_rate = snapshot.rate;
    Ok(recompute(doc))
}

/// Applies a raw discount edit in the document's discount mode.
///
/// A percentage above the policy maximum is stored as the maximum and reported as a
/// [`Notice::DiscountClamped`]. Malformed input keeps the previous discount.
pub fn set_discount(doc: &mut PricingDocument, raw: &str) -> (Totals, Option<Notice>) {
    let mut notice = None;
    if let Some(requested) = coerce_decimal(raw) {
        doc.discount = match doc.discount {
            Discount::Percent(_) => {
                let max = doc.policy.max_discount_percent;
                if requested > max {
                    notice = Some(Notice::DiscountClamped { requested, applied: max });
                }
                Discount::Percent(requested.min(max))
            }
            Discount::Absolute(_) => Discount::Absolute(requested),
        };
    }
    (recompute(doc), notice)
}
