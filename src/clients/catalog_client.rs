use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogCreate, CatalogError, CatalogPatch};
use crate::domain::{CatalogUnit, UnitSnapshot};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<CatalogUnit>,
}

impl_basic_client!(CatalogClient, CatalogUnit, CatalogError, unit);

impl CatalogClient {
    #[instrument(skip(self))]
    pub async fn create_unit(&self, name: &str, fee: Decimal) -> Result<String, CatalogError> {
        debug!("Sending request");
        let payload = CatalogCreate { name: name.to_string(), fee };
        self.inner.create(payload).await.map_err(CatalogError::from)
    }

    /// The session's catalog, sorted by name for display.
    #[instrument(skip(self))]
    pub async fn list_units(&self) -> Result<Vec<CatalogUnit>, CatalogError> {
        debug!("Sending request");
        let mut units = self.inner.list().await.map_err(CatalogError::from)?;
        units.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(units)
    }

    #[instrument(skip(self))]
    pub async fn update_fee(&self, id: String, fee: Decimal) -> Result<CatalogUnit, CatalogError> {
        debug!("Sending request");
        let patch = CatalogPatch { fee: Some(fee), ..Default::default() };
        self.inner.update(id, patch).await.map_err(CatalogError::from)
    }

    #[instrument(skip(self))]
    pub async fn set_active(&self, id: String, active: bool) -> Result<CatalogUnit, CatalogError> {
        debug!("Sending request");
        let patch = CatalogPatch { active: Some(active), ..Default::default() };
        self.inner.update(id, patch).await.map_err(CatalogError::from)
    }

    /// Current name and fee of an active unit, for copying into a line item.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, id: String) -> Result<UnitSnapshot, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CatalogAction::Snapshot).await {
            Ok(CatalogActionResult::Snapshot(snapshot)) => Ok(snapshot),
            Err(e) => Err(CatalogError::from(e)),
        }
    }
}
