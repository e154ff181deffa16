//! Submission payloads handed to the backend when a document is saved.
//!
//! One payload type per document kind, tagged with `kind`. Amounts and quantities travel
//! as strings (`"1500.00"`, `"3"`) because that is what the backend's forms post.

use serde::Serialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::{money_string, Discount, DocumentKind, DocumentStatus, LineItem, PricingDocument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    #[error("Submission validation error: {0}")]
    Validation(String),
    #[error("Submission serialization error: {0}")]
    Serialization(String),
}

/// The checks a form performs before it will submit.
#[derive(Debug, Validate)]
struct SubmissionForm {
    #[validate(length(min = 1, message = "client name is required"))]
    client_name: String,
    #[validate(range(min = 1, message = "at least one item is required"))]
    item_count: usize,
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub unit_id: String,
    pub unit_name: String,
    pub quantity: String,
    pub unit_rate: String,
    pub line_total: String,
}

impl From<&LineItem> for LineItemPayload {
    fn from(item: &LineItem) -> Self {
        Self {
            unit_id: item.unit_id.clone(),
            unit_name: item.unit_name.clone(),
            quantity: item.quantity.to_string(),
            unit_rate: money_string(item.unit_rate),
            line_total: money_string(item.line_total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPayload {
    pub client_name: String,
    pub items: Vec<LineItemPayload>,
    pub total_amount: String,
    pub discount: String,
    pub final_amount: String,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalPayload {
    pub client_name: String,
    pub items: Vec<LineItemPayload>,
    pub total_amount: String,
    pub discount_percent: String,
    pub discount_amount: String,
    pub final_amount: String,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub client_name: String,
    pub items: Vec<LineItemPayload>,
    pub total_amount: String,
    pub discount: String,
    pub final_amount: String,
    pub status: DocumentStatus,
}

/// Body of the create/update request for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubmissionPayload {
    Quotation(QuotationPayload),
    Proposal(ProposalPayload),
    Invoice(InvoicePayload),
}

impl SubmissionPayload {
    /// Validates the document and snapshots it into the wire shape.
    ///
    /// The document must already be recomputed; its derived fields are copied as-is.
    pub fn from_document(doc: &PricingDocument) -> Result<Self, SubmissionError> {
        let form = SubmissionForm {
            client_name: doc.client_name.trim().to_string(),
            item_count: doc.items.len(),
        };
        form.validate()
            .map_err(|e| SubmissionError::Validation(describe(&e)))?;

        let items: Vec<LineItemPayload> = doc.items.iter().map(LineItemPayload::from).collect();
        let client_name = form.client_name;
        let total_amount = money_string(doc.subtotal);
        let final_amount = money_string(doc.final_amount);
        let discount = money_string(doc.applied_discount);

        Ok(match doc.kind {
            DocumentKind::Quotation => SubmissionPayload::Quotation(QuotationPayload {
                client_name,
                items,
                total_amount,
                discount,
                final_amount,
                status: doc.status,
            }),
            DocumentKind::Proposal => {
                let discount_percent = match doc.discount {
                    Discount::Percent(percent) => money_string(percent),
                    Discount::Absolute(_) => money_string(rust_decimal::Decimal::ZERO),
                };
                SubmissionPayload::Proposal(ProposalPayload {
                    client_name,
                    items,
                    total_amount,
                    discount_percent,
                    discount_amount: discount,
                    final_amount,
                    status: doc.status,
                })
            }
            DocumentKind::Invoice => SubmissionPayload::Invoice(InvoicePayload {
                client_name,
                items,
                total_amount,
                discount,
                final_amount,
                status: doc.status,
            }),
        })
    }

    pub fn to_json(&self) -> Result<String, SubmissionError> {
        serde_json::to_string(self).map_err(|e| SubmissionError::Serialization(e.to_string()))
    }
}
