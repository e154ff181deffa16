use crate::domain::UnitSnapshot;

/// Custom actions for CatalogUnit entities.
#[derive(Debug, Clone)]
pub enum CatalogAction {
    /// Copies the unit's current name and fee for use in a line item.
    ///
    /// # Errors
    /// Fails for units that have been deactivated.
    Snapshot,
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone)]
pub enum CatalogActionResult {
    Snapshot(UnitSnapshot),
}
