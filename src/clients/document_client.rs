use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::CatalogError;
use crate::clients::CatalogClient;
use crate::document_actor::{DocumentAction, DocumentActionResult, DocumentCreate, DocumentError, DocumentPatch};
use crate::domain::{DocumentKind, DocumentStatus, LineItem, Notice, PricingDocument, UnitSnapshot};
use crate::pricing::Totals;
use crate::settings::Settings;
use crate::submission::SubmissionPayload;

/// Client for editing pricing documents.
///
/// Resolves catalog units through the catalog actor before forwarding an edit, so a
/// line item is only ever added with a rate that was actually found.
#[derive(Clone)]
pub struct DocumentClient {
    inner: ResourceClient<PricingDocument>,
    catalog_client: CatalogClient,
    settings: Settings,
}

impl DocumentClient {
    pub fn new(
        inner: ResourceClient<PricingDocument>,
        catalog_client: CatalogClient,
        settings: Settings,
    ) -> Self {
        Self {
            inner,
            catalog_client,
            settings,
        }
    }

    async fn resolve_unit(&self, unit_id: String) -> Result<UnitSnapshot, DocumentError> {
        match self.catalog_client.snapshot(unit_id.clone()).await {
            Ok(snapshot) => {
                info!(unit_name = %snapshot.name, rate = %snapshot.rate, "Unit resolved");
                Ok(snapshot)
            }
            Err(CatalogError::NotFound(_)) | Err(CatalogError::Inactive(_)) => {
                warn!(unit_id = %unit_id, "Unit cannot be resolved to a rate");
                Err(DocumentError::UnitNotFound(unit_id))
            }
            Err(e) => {
                error!(error = %e, "Catalog lookup failed");
                Err(DocumentError::Catalog(e))
            }
        }
    }

    async fn act(&self, id: String, action: DocumentAction) -> Result<DocumentActionResult, DocumentError> {
        self.inner.perform_action(id, action).await.map_err(DocumentError::from)
    }

    #[instrument(skip(self))]
    pub async fn create_document(&self, kind: DocumentKind, client_name: &str) -> Result<String, DocumentError> {
        info!("Creating document");
        let payload = DocumentCreate {
            kind,
            client_name: client_name.to_string(),
            policy: self.settings.policy_for(kind),
        };
        self.inner.create(payload).await.map_err(DocumentError::from)
    }

    /// Appends a line for `unit_id`, snapshotting the unit's current fee.
    ///
    /// # Errors
    /// `UnitNotFound` when the unit does not exist or is inactive; the document is not touched.
    #[instrument(skip(self))]
    pub async fn add_item(&self, id: String, unit_id: String, quantity: u32) -> Result<Totals, DocumentError> {
        let snapshot = self.resolve_unit(unit_id).await?;
        let item = LineItem::from_snapshot(&snapshot, quantity);
        let totals = self.act(id, DocumentAction::AddItem(item)).await?.totals();
        info!(subtotal = %totals.subtotal, final_amount = %totals.final_amount, "Item added");
        Ok(totals)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: String, index: usize) -> Result<(LineItem, Totals), DocumentError> {
        match self.act(id, DocumentAction::RemoveItem(index)).await? {
            DocumentActionResult::ItemRemoved { item, totals } => Ok((item, totals)),
            other => Err(DocumentError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_item_quantity(&self, id: String, index: usize, raw: &str) -> Result<Totals, DocumentError> {
        let action = DocumentAction::SetItemQuantity { index, raw: raw.to_string() };
        Ok(self.act(id, action).await?.totals())
    }

    /// Re-points line `index` at another unit with that unit's current fee.
    #[instrument(skip(self))]
    pub async fn select_unit(&self, id: String, index: usize, unit_id: String) -> Result<Totals, DocumentError> {
        let snapshot = self.resolve_unit(unit_id).await?;
        Ok(self.act(id, DocumentAction::SelectUnit { index, snapshot }).await?.totals())
    }

    /// Applies a discount edit. A clamped percentage comes back as a notice, not an error.
    #[instrument(skip(self))]
    pub async fn set_discount(&self, id: String, raw: &str) -> Result<(Totals, Option<Notice>), DocumentError> {
        match self.act(id, DocumentAction::SetDiscount(raw.to_string())).await? {
            DocumentActionResult::DiscountApplied { totals, notice } => Ok((totals, notice)),
            other => Err(DocumentError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
        }
    }

    #[instrument(skip(self))]
    pub async fn recompute(&self, id: String) -> Result<Totals, DocumentError> {
        Ok(self.act(id, DocumentAction::Recompute).await?.totals())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: String, status: DocumentStatus) -> Result<PricingDocument, DocumentError> {
        let patch = DocumentPatch { status: Some(status), ..Default::default() };
        self.inner.update(id, patch).await.map_err(DocumentError::from)
    }

    #[instrument(skip(self))]
    pub async fn rename_client(&self, id: String, client_name: &str) -> Result<PricingDocument, DocumentError> {
        let patch = DocumentPatch { client_name: Some(client_name.to_string()), ..Default::default() };
        self.inner.update(id, patch).await.map_err(DocumentError::from)
    }

    /// Recomputes, validates and serializes the document for the backend.
    #[instrument(skip(self))]
    pub async fn submit(&self, id: String) -> Result<SubmissionPayload, DocumentError> {
        self.recompute(id.clone()).await?;
        let document = self
            .get_document(id.clone())
            .await?
            .ok_or_else(|| DocumentError::NotFound(id))?;

        match SubmissionPayload::from_document(&document) {
            Ok(payload) => {
                info!(kind = %document.kind, final_amount = %document.final_amount, "Document ready for submission");
                Ok(payload)
            }
            Err(e) => {
                warn!(error = %e, "Submission blocked");
                Err(e.into())
            }
        }
    }
}

impl_client_methods!(DocumentClient, PricingDocument, DocumentError, document);
