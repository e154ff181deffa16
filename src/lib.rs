//! Pricing engine for the institute's back office.
//!
//! Quotations, proposals and invoices share one calculator ([`pricing`]) that keeps
//! line totals, subtotal, discount and final amount consistent after every edit.
//! Documents and catalog units live in in-memory resource actors ([`actor_framework`])
//! reached through cloneable clients ([`clients`]) that [`app_system::PricingSystem`]
//! wires together. Finished documents leave as [`submission`] payloads; proposal PDFs
//! get their company-profile attachment through [`pdf_merge`].

pub mod actor_framework;
pub mod domain;
pub mod pricing;
pub mod settings;
pub mod catalog_actor;
pub mod document_actor;
pub mod clients;
pub mod submission;
pub mod pdf_merge;
pub mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
