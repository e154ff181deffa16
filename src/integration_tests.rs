#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::actor_framework::FrameworkError;
    use crate::app_system::PricingSystem;
    use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError};
    use crate::clients::{CatalogClient, DocumentClient};
    use crate::document_actor::{DocumentAction, DocumentActionResult, DocumentError};
    use crate::domain::{CatalogUnit, DocumentKind, DocumentStatus, Notice, PricingDocument, UnitSnapshot};
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_update};
    use crate::pricing::{PricingError, Totals};
    use crate::settings::Settings;
    use crate::submission::{SubmissionError, SubmissionPayload};

    // --- Client orchestration against mocked actors ---

    #[tokio::test]
    async fn test_add_item_snapshots_unit_then_forwards() {
        let (catalog_inner, mut catalog_rx) = create_mock_client::<CatalogUnit>(10);
        let (document_inner, mut document_rx) = create_mock_client::<PricingDocument>(10);
        let client = DocumentClient::new(document_inner, CatalogClient::new(catalog_inner), Settings::default());

        let task = tokio::spawn(async move {
            client.add_item("doc_1".to_string(), "unit_1".to_string(), 3).await
        });

        let (unit_id, action, responder) = expect_action(&mut catalog_rx).await.expect("Expected catalog snapshot");
        assert_eq!(unit_id, "unit_1");
        assert!(matches!(action, CatalogAction::Snapshot));
        let snapshot = UnitSnapshot { unit_id: "unit_1".into(), name: "IELTS Prep".into(), rate: dec!(500) };
        responder.send(Ok(CatalogActionResult::Snapshot(snapshot))).unwrap();

        let (doc_id, action, responder) = expect_action(&mut document_rx).await.expect("Expected document action");
        assert_eq!(doc_id, "doc_1");
        match action {
            DocumentAction::AddItem(item) => {
                assert_eq!(item.quantity, 3);
                assert_eq!(item.unit_rate, dec!(500));
                assert_eq!(item.unit_name, "IELTS Prep");
            }
            other => panic!("Unexpected action: {:?}", other),
        }
        let totals = Totals { subtotal: dec!(1500), applied_discount: Decimal::ZERO, final_amount: dec!(1500) };
        responder.send(Ok(DocumentActionResult::Updated(totals))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(totals));
    }

    #[tokio::test]
    async fn test_unresolvable_unit_never_reaches_document() {
        let (catalog_inner, mut catalog_rx) = create_mock_client::<CatalogUnit>(10);
        let (document_inner, mut document_rx) = create_mock_client::<PricingDocument>(10);
        let client = DocumentClient::new(document_inner, CatalogClient::new(catalog_inner), Settings::default());

        let task = tokio::spawn(async move {
            client.add_item("doc_1".to_string(), "unit_404".to_string(), 1).await
        });

        let (_, _, responder) = expect_action(&mut catalog_rx).await.expect("Expected catalog snapshot");
        responder
            .send(Err(FrameworkError::NotFound { kind: "catalog unit", id: "unit_404".into() }))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(DocumentError::UnitNotFound("unit_404".into())));
        // The client is gone and sent nothing to the document actor
        assert!(document_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_create_document_uses_kind_policy() {
        let (catalog_inner, _catalog_rx) = create_mock_client::<CatalogUnit>(10);
        let (document_inner, mut document_rx) = create_mock_client::<PricingDocument>(10);
        let settings = Settings { max_discount_percent: 10, ..Settings::default() };
        let client = DocumentClient::new(document_inner, CatalogClient::new(catalog_inner), settings);

        let task = tokio::spawn(async move {
            client.create_document(DocumentKind::Proposal, "Lakeside College").await
        });

        let (payload, responder) = expect_create(&mut document_rx).await.expect("Expected Create request");
        assert_eq!(payload.kind, DocumentKind::Proposal);
        assert_eq!(payload.policy.max_discount_percent, dec!(10));
        responder.send(Ok("doc_7".to_string())).unwrap();

        assert_eq!(task.await.unwrap(), Ok("doc_7".to_string()));
    }

    #[tokio::test]
    async fn test_update_fee_sends_patch() {
        let (catalog_inner, mut catalog_rx) = create_mock_client::<CatalogUnit>(10);
        let client = CatalogClient::new(catalog_inner);

        let task = tokio::spawn(async move { client.update_fee("unit_1".to_string(), dec!(-5)).await });

        let (_, patch, responder) = expect_update(&mut catalog_rx).await.expect("Expected Update request");
        assert_eq!(patch.fee, Some(dec!(-5)));
        responder
            .send(Err(FrameworkError::Entity(CatalogError::ValidationError("negative".into()))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(CatalogError::ValidationError("negative".into())));
    }

    // --- Full system ---

    #[tokio::test]
    async fn test_quotation_flow() {
        let system = PricingSystem::new(&Settings::default());
        let units = system
            .seed_catalog(&[("IELTS Prep", dec!(500)), ("Visa Filing", dec!(1200))])
            .await
            .unwrap();
        let docs = system.document_client.clone();

        let id = docs.create_document(DocumentKind::Quotation, "Northwind Academy").await.unwrap();
        docs.add_item(id.clone(), units[0].clone(), 3).await.unwrap();
        docs.add_item(id.clone(), units[1].clone(), 1).await.unwrap();
        let (totals, notice) = docs.set_discount(id.clone(), "300").await.unwrap();

        assert_eq!(notice, None);
        assert_eq!(totals.subtotal, dec!(2700));
        assert_eq!(totals.applied_discount, dec!(300));
        assert_eq!(totals.final_amount, dec!(2400));

        let payload = docs.submit(id).await.unwrap();
        assert!(matches!(payload, SubmissionPayload::Quotation(ref q) if q.final_amount == "2400.00"));

        drop(docs);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_proposal_flow_clamps_discount() {
        let system = PricingSystem::new(&Settings::default());
        let units = system.seed_catalog(&[("Study Abroad Package", dec!(10000))]).await.unwrap();
        let docs = system.document_client.clone();

        let id = docs.create_document(DocumentKind::Proposal, "Harbor High").await.unwrap();
        docs.add_item(id.clone(), units[0].clone(), 1).await.unwrap();
        let (totals, notice) = docs.set_discount(id.clone(), "25").await.unwrap();

        assert_eq!(notice, Some(Notice::DiscountClamped { requested: dec!(25), applied: dec!(20) }));
        assert_eq!(totals.applied_discount, dec!(2000));
        assert_eq!(totals.final_amount, dec!(8000));

        let document = docs.get_document(id).await.unwrap().unwrap();
        assert_eq!(document.discount.value(), dec!(20));
        assert_eq!(document.notices.len(), 1);

        drop(docs);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_catalog_fee_change_does_not_reach_existing_items() {
        let system = PricingSystem::new(&Settings::default());
        let units = system.seed_catalog(&[("TOEFL Prep", dec!(400))]).await.unwrap();
        let docs = system.document_client.clone();

        let id = docs.create_document(DocumentKind::Invoice, "Riverside Institute").await.unwrap();
        docs.add_item(id.clone(), units[0].clone(), 2).await.unwrap();
        system.catalog_client.update_fee(units[0].clone(), dec!(650)).await.unwrap();
        let totals = docs.recompute(id.clone()).await.unwrap();

        let document = docs.get_document(id.clone()).await.unwrap().unwrap();
        assert_eq!(document.items[0].unit_rate, dec!(400));
        assert_eq!(totals.subtotal, dec!(800));

        // Re-selecting the unit is what picks up the new fee
        let totals = docs.select_unit(id, 0, units[0].clone()).await.unwrap();
        assert_eq!(totals.subtotal, dec!(1300));

        drop(docs);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_removing_last_item_blocks_submission() {
        let system = PricingSystem::new(&Settings::default());
        let units = system.seed_catalog(&[("Counselling Session", dec!(150))]).await.unwrap();
        let docs = system.document_client.clone();

        let id = docs.create_document(DocumentKind::Quotation, "Elm Street School").await.unwrap();
        docs.add_item(id.clone(), units[0].clone(), 1).await.unwrap();
        let (removed, totals) = docs.remove_item(id.clone(), 0).await.unwrap();

        assert_eq!(removed.unit_id, units[0]);
        assert_eq!(totals, Totals::default());
        let err = docs.submit(id).await.unwrap_err();
        assert!(matches!(err, DocumentError::Submission(SubmissionError::Validation(_))));

        drop(docs);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_edits_leave_document_intact() {
        let system = PricingSystem::new(&Settings::default());
        let units = system.seed_catalog(&[("IELTS Prep", dec!(500))]).await.unwrap();
        system.catalog_client.set_active(units[0].clone(), false).await.unwrap();
        let docs = system.document_client.clone();

        let id = docs.create_document(DocumentKind::Quotation, "Northwind Academy").await.unwrap();
        let err = docs.add_item(id.clone(), units[0].clone(), 1).await.unwrap_err();
        assert_eq!(err, DocumentError::UnitNotFound(units[0].clone()));

        let err = docs.remove_item(id.clone(), 0).await.unwrap_err();
        assert_eq!(err, DocumentError::Pricing(PricingError::ItemIndexOutOfRange { index: 0, len: 0 }));

        let err = docs.set_status(id.clone(), DocumentStatus::Paid).await.unwrap_err();
        assert!(matches!(err, DocumentError::Pricing(PricingError::InvalidStatus { .. })));

        let document = docs.get_document(id.clone()).await.unwrap().unwrap();
        assert!(document.items.is_empty());
        assert_eq!(document.status, DocumentStatus::Draft);

        let document = docs.set_status(id.clone(), DocumentStatus::Sent).await.unwrap();
        assert_eq!(document.status, DocumentStatus::Sent);

        let document = docs.rename_client(id, "Riverside College").await.unwrap();
        assert_eq!(document.client_name, "Riverside College");
        assert_eq!(document.status, DocumentStatus::Sent);

        let err = docs.recompute("doc_404".to_string()).await.unwrap_err();
        assert_eq!(err, DocumentError::NotFound("doc_404".into()));

        drop(docs);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_quantity_edits_through_client() {
        let system = PricingSystem::new(&Settings::default());
        let units = system.seed_catalog(&[("GRE Prep", dec!(250))]).await.unwrap();
        let docs = system.document_client.clone();

        let id = docs.create_document(DocumentKind::Quotation, "Oak Academy").await.unwrap();
        docs.add_item(id.clone(), units[0].clone(), 2).await.unwrap();

        let totals = docs.set_item_quantity(id.clone(), 0, "not a number").await.unwrap();
        assert_eq!(totals.subtotal, dec!(500));
        let totals = docs.set_item_quantity(id.clone(), 0, "4").await.unwrap();
        assert_eq!(totals.subtotal, dec!(1000));

        let listed = system.catalog_client.list_units().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "GRE Prep");

        drop(docs);
        system.shutdown().await.unwrap();
    }
}
