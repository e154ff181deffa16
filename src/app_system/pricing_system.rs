use rust_decimal::Decimal;
use tracing::{error, info};

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::clients::{CatalogClient, DocumentClient};
use crate::domain::{CatalogUnit, PricingDocument};
use crate::settings::Settings;
use super::error::SystemError;

/// The application system that owns the catalog and document stores.
///
/// Clients are handed out by value; every caller works against the same stores
/// without any process-wide state.
pub struct PricingSystem {
    pub catalog_client: CatalogClient,
    pub document_client: DocumentClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PricingSystem {
    pub fn new(settings: &Settings) -> Self {
        info!(max_discount_percent = settings.max_discount_percent, "Starting pricing system");

        // 1. Catalog store
        let (catalog_actor, catalog_resource_client) =
            ResourceActor::<CatalogUnit>::new(settings.actor_buffer_size, sequential_ids("unit"));
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        // 2. Document store, resolving units through the catalog
        let (document_actor, document_resource_client) =
            ResourceActor::<PricingDocument>::new(settings.actor_buffer_size, sequential_ids("doc"));
        let document_client = DocumentClient::new(
            document_resource_client,
            catalog_client.clone(),
            settings.clone(),
        );
        let document_handle = tokio::spawn(document_actor.run());

        Self {
            catalog_client,
            document_client,
            handles: vec![catalog_handle, document_handle],
        }
    }

    /// Seeds the catalog, returning the new unit ids in input order.
    pub async fn seed_catalog(&self, units: &[(&str, Decimal)]) -> Result<Vec<String>, crate::catalog_actor::CatalogError> {
        let mut ids = Vec::with_capacity(units.len());
        for (name, fee) in units {
            ids.push(self.catalog_client.create_unit(name, *fee).await?);
        }
        info!(count = ids.len(), "Catalog seeded");
        Ok(ids)
    }

    /// Drops the clients, which closes the actors' mailboxes, then waits for the actors.
    ///
    /// Clones of the clients held elsewhere keep their actor running; drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.document_client);
        drop(self.catalog_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
