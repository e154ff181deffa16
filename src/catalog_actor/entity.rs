use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{CatalogUnit, UnitSnapshot};
use super::actions::{CatalogAction, CatalogActionResult};
use super::dtos::{CatalogCreate, CatalogPatch};
use super::error::CatalogError;

fn validate_fee(fee: Decimal) -> Result<Decimal, CatalogError> {
    if fee < Decimal::ZERO {
        return Err(CatalogError::ValidationError(format!("Fee must not be negative: {}", fee)));
    }
    Ok(fee)
}

impl Entity for CatalogUnit {
    type Id = String;
    type CreatePayload = CatalogCreate;
    type Patch = CatalogPatch;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Error = CatalogError;

    const KIND: &'static str = "catalog unit";

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: CatalogCreate) -> Result<Self, CatalogError> {
        if payload.name.trim().is_empty() {
            return Err(CatalogError::ValidationError("Name required".to_string()));
        }
        Ok(CatalogUnit::new(id, payload.name, validate_fee(payload.fee)?))
    }

    fn on_update(&mut self, patch: CatalogPatch) -> Result<(), CatalogError> {
        if let Some(fee) = patch.fee {
            self.fee = validate_fee(fee)?;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CatalogAction) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::Snapshot => {
                if !self.active {
                    return Err(CatalogError::Inactive(self.id.clone()));
                }
                Ok(CatalogActionResult::Snapshot(UnitSnapshot::from(&*self)))
            }
        }
    }
}
