use rust_decimal_macros::dec;
use tracing::{error, info, warn, Instrument};

use institute_pricing::app_system::{setup_tracing, PricingSystem};
use institute_pricing::domain::DocumentKind;
use institute_pricing::settings::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    setup_tracing(&settings.log_level);

    info!("Starting pricing demo");

    let system = PricingSystem::new(&settings);
    let units = system
        .seed_catalog(&[
            ("IELTS Preparation", dec!(500)),
            ("Student Visa Filing", dec!(1200)),
            ("Study Abroad Package", dec!(10000)),
        ])
        .await?;
    let docs = system.document_client.clone();

    // Quotation: two courses, fixed discount
    let span = tracing::info_span!("quotation");
    async {
        let id = docs.create_document(DocumentKind::Quotation, "Northwind Academy").await?;
        docs.add_item(id.clone(), units[0].clone(), 3).await?;
        docs.add_item(id.clone(), units[1].clone(), 1).await?;
        let (totals, _) = docs.set_discount(id.clone(), "300").await?;
        info!(subtotal = %totals.subtotal, discount = %totals.applied_discount, final_amount = %totals.final_amount, "Quotation priced");

        let payload = docs.submit(id).await?;
        info!(body = %payload.to_json()?, "Quotation payload");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    // Proposal: percentage discount above the allowed maximum
    let span = tracing::info_span!("proposal");
    let proposal = async {
        let id = docs.create_document(DocumentKind::Proposal, "Harbor High").await?;
        docs.add_item(id.clone(), units[2].clone(), 1).await?;
        let (totals, notice) = docs.set_discount(id.clone(), "25").await?;
        if let Some(notice) = notice {
            warn!(%notice, "Discount adjusted");
        }
        info!(discount = %totals.applied_discount, final_amount = %totals.final_amount, "Proposal priced");
        docs.submit(id).await
    }
    .instrument(span)
    .await;

    match proposal {
        Ok(payload) => info!(body = %payload.to_json()?, "Proposal payload"),
        Err(e) => error!(error = %e, "Proposal submission failed"),
    }

    drop(docs);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
