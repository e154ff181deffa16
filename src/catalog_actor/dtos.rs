use rust_decimal::Decimal;

// DTOs for CatalogUnit
#[derive(Debug, Clone)]
pub struct CatalogCreate {
    pub name: String,
    pub fee: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogPatch {
    pub name: Option<String>,
    pub fee: Option<Decimal>,
    pub active: Option<bool>,
}
