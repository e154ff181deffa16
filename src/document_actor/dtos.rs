use crate::domain::{DocumentKind, DocumentStatus, PricingPolicy};

// DTOs for PricingDocument
#[derive(Debug, Clone)]
pub struct DocumentCreate {
    pub kind: DocumentKind,
    pub client_name: String,
    pub policy: PricingPolicy,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub client_name: Option<String>,
    pub status: Option<DocumentStatus>,
}
