use tracing::{debug, warn};

use crate::actor_framework::Entity;
use crate::domain::PricingDocument;
use crate::pricing::{self, PricingError};
use super::actions::{DocumentAction, DocumentActionResult};
use super::dtos::{DocumentCreate, DocumentPatch};

impl Entity for PricingDocument {
    type Id = String;
    type CreatePayload = DocumentCreate;
    type Patch = DocumentPatch;
    type Action = DocumentAction;
    type ActionResult = DocumentActionResult;
    type Error = PricingError;

    const KIND: &'static str = "document";

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: DocumentCreate) -> Result<Self, PricingError> {
        Ok(PricingDocument::new(id, payload.kind, payload.client_name, payload.policy))
    }

    fn on_create(&mut self) -> Result<(), PricingError> {
        pricing::recompute(self);
        Ok(())
    }

    /// Updates the client name and/or lifecycle status.
    ///
    /// # Errors
    /// Rejects a status outside the document kind's set.
    fn on_update(&mut self, patch: DocumentPatch) -> Result<(), PricingError> {
        if let Some(status) = patch.status {
            if !status.is_valid_for(self.kind) {
                return Err(PricingError::InvalidStatus { status, kind: self.kind });
            }
            self.status = status;
        }
        if let Some(client_name) = patch.client_name {
            self.client_name = client_name;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: DocumentAction) -> Result<DocumentActionResult, PricingError> {
        self.notices.clear();
        let result = match action {
            DocumentAction::AddItem(item) => {
                DocumentActionResult::Updated(pricing::add_item(self, item)?)
            }
            DocumentAction::RemoveItem(index) => {
                let (item, totals) = pricing::remove_item(self, index)?;
                DocumentActionResult::ItemRemoved { item, totals }
            }
            DocumentAction::SetItemQuantity { index, raw } => {
                DocumentActionResult::Updated(pricing::set_item_quantity(self, index, &raw)?)
            }
            DocumentAction::SelectUnit { index, snapshot } => {
                DocumentActionResult::Updated(pricing::select_unit(self, index, &snapshot)?)
            }
            DocumentAction::SetDiscount(raw) => {
                let (totals, notice) = pricing::set_discount(self, &raw);
                if let Some(notice) = &notice {
                    warn!(document_id = %self.id, %notice, "Discount clamped");
                    self.notices.push(notice.clone());
                }
                DocumentActionResult::DiscountApplied { totals, notice }
            }
            DocumentAction::Recompute => DocumentActionResult::Updated(pricing::recompute(self)),
        };
        debug!(
            document_id = %self.id,
            subtotal = %self.subtotal,
            final_amount = %self.final_amount,
            "Recomputed"
        );
        Ok(result)
    }
}
