use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced entry of the institute's catalog (a course, a visa service, ...).
///
/// Owned by the backend; documents only ever copy its fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogUnit {
    pub id: String,
    pub name: String,
    pub fee: Decimal,
    pub active: bool,
}

impl CatalogUnit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, fee: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fee,
            active: true,
        }
    }
}

/// Point-in-time copy of a unit's name and fee, taken when the unit is selected
/// into a line item. Later fee changes never reach an existing snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSnapshot {
    pub unit_id: String,
    pub name: String,
    pub rate: Decimal,
}

impl From<&CatalogUnit> for UnitSnapshot {
    fn from(unit: &CatalogUnit) -> Self {
        Self {
            unit_id: unit.id.clone(),
            name: unit.name.clone(),
            rate: unit.fee,
        }
    }
}
