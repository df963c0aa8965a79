mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use common::TestApp;
use loomtrack_api::entities::{payment, saree_entry, warp, warp_color, weft, weft_color};
use loomtrack_api::errors::ServiceError;
use loomtrack_api::services::looms::{
    ColorConfigRequest, CreateLoomRequest, LoomService, WarpConfigRequest, WeftConfigRequest,
};
use loomtrack_api::services::payments::{PaymentService, RecordPaymentRequest};
use loomtrack_api::services::production::{CreateSareeEntryRequest, ProductionService};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

fn loom_request(loom_no: i32) -> CreateLoomRequest {
    CreateLoomRequest {
        loom_no,
        loom_type: "Handloom".to_string(),
        num_sarees: 5,
        date: None,
        saree_type: None,
        saree_name: None,
        weaver_id: None,
        user_id: None,
    }
}

#[tokio::test]
async fn deleting_a_loom_removes_every_sub_record() {
    let app = TestApp::new().await;
    let owner = app.seed_user(1, "owner", "owner").await;
    let db = app.state.db.clone();

    let looms = LoomService::new(db.clone());
    let production = ProductionService::new(db.clone());
    let payments = PaymentService::new(db.clone());

    let doomed = looms
        .create_loom(&owner, loom_request(1))
        .await
        .expect("create loom");
    let survivor = looms
        .create_loom(&owner, loom_request(2))
        .await
        .expect("create second loom");

    for loom_id in [doomed.id, survivor.id] {
        looms
            .add_warp(&owner, loom_id, WarpConfigRequest::default())
            .await
            .expect("add warp");
        looms
            .add_weft(&owner, loom_id, WeftConfigRequest::default())
            .await
            .expect("add weft");
        looms
            .add_warp_color(
                &owner,
                loom_id,
                ColorConfigRequest {
                    border_color: Some("#FF0000".to_string()),
                    body_color: Some("#0000FF".to_string()),
                },
            )
            .await
            .expect("add warp color");
        looms
            .add_weft_color(&owner, loom_id, ColorConfigRequest::default())
            .await
            .expect("add weft color");
        production
            .add_saree_entry(&owner, loom_id, CreateSareeEntryRequest::default())
            .await
            .expect("add entry");
        payments
            .record_payment(
                &owner,
                RecordPaymentRequest {
                    date: NaiveDate::from_ymd_opt(2024, 6, 1),
                    amount: dec!(250),
                    payment_type: "credit".to_string(),
                    loom_id: Some(loom_id),
                    ..Default::default()
                },
            )
            .await
            .expect("record payment");
    }

    looms
        .delete_loom(&owner, doomed.id)
        .await
        .expect("delete loom");

    // every child row of the deleted loom is gone
    for (count, table) in [
        (
            warp::Entity::find()
                .filter(warp::Column::LoomId.eq(doomed.id))
                .count(&*db)
                .await
                .expect("count warps"),
            "warps",
        ),
        (
            weft::Entity::find()
                .filter(weft::Column::LoomId.eq(doomed.id))
                .count(&*db)
                .await
                .expect("count wefts"),
            "wefts",
        ),
        (
            warp_color::Entity::find()
                .filter(warp_color::Column::LoomId.eq(doomed.id))
                .count(&*db)
                .await
                .expect("count warp colors"),
            "warp_colors",
        ),
        (
            weft_color::Entity::find()
                .filter(weft_color::Column::LoomId.eq(doomed.id))
                .count(&*db)
                .await
                .expect("count weft colors"),
            "weft_colors",
        ),
        (
            saree_entry::Entity::find()
                .filter(saree_entry::Column::LoomId.eq(doomed.id))
                .count(&*db)
                .await
                .expect("count entries"),
            "saree_entries",
        ),
        (
            payment::Entity::find()
                .filter(payment::Column::LoomId.eq(doomed.id))
                .count(&*db)
                .await
                .expect("count payments"),
            "payments",
        ),
    ] {
        assert_eq!(count, 0, "expected no surviving rows in {}", table);
    }

    // the loom itself is unreachable afterwards
    assert_matches!(
        looms.get_loom(&owner, doomed.id).await,
        Err(ServiceError::NotFound(_))
    );

    // the other loom's sub-records are untouched
    assert_eq!(
        saree_entry::Entity::find()
            .filter(saree_entry::Column::LoomId.eq(survivor.id))
            .count(&*db)
            .await
            .expect("count survivor entries"),
        1
    );
    assert_eq!(
        payment::Entity::find()
            .filter(payment::Column::LoomId.eq(survivor.id))
            .count(&*db)
            .await
            .expect("count survivor payments"),
        1
    );
    assert!(looms.get_loom(&owner, survivor.id).await.is_ok());
}

#[tokio::test]
async fn delete_is_scoped_before_it_cascades() {
    let app = TestApp::new().await;
    let owner = app.seed_user(1, "owner", "owner").await;
    let factory = app.seed_user(2, "factory", "handloom_factory").await;

    let looms = LoomService::new(app.state.db.clone());
    let loom = looms
        .create_loom(&owner, loom_request(1))
        .await
        .expect("create loom");

    assert_matches!(
        looms.delete_loom(&factory, loom.id).await,
        Err(ServiceError::NotFound(_))
    );
    // still present for the owner
    assert!(looms.get_loom(&owner, loom.id).await.is_ok());
}
