mod common;

use assert_matches::assert_matches;
use common::TestApp;
use loomtrack_api::auth::Caller;
use loomtrack_api::errors::ServiceError;
use loomtrack_api::services::dashboard::DashboardService;
use loomtrack_api::services::looms::{CreateLoomRequest, LoomService};
use loomtrack_api::services::payments::PaymentService;
use loomtrack_api::services::weavers::{CreateWeaverRequest, WeaverService};

fn loom_request(loom_no: i32, loom_type: &str, user_id: Option<i32>) -> CreateLoomRequest {
    CreateLoomRequest {
        loom_no,
        loom_type: loom_type.to_string(),
        num_sarees: 5,
        date: None,
        saree_type: None,
        saree_name: None,
        weaver_id: None,
        user_id,
    }
}

#[tokio::test]
async fn unrecognized_role_is_denied_on_every_scoped_operation() {
    let app = TestApp::new().await;
    app.seed_user(1, "owner", "owner").await;
    let broken = Caller::new(1, "superadmin");

    let looms = LoomService::new(app.state.db.clone());
    let payments = PaymentService::new(app.state.db.clone());
    let weavers = WeaverService::new(app.state.db.clone());
    let dashboard = DashboardService::new(app.state.db.clone());

    assert_matches!(
        looms.list_looms(&broken).await,
        Err(ServiceError::AuthorizationError(_))
    );
    assert_matches!(
        looms.get_loom(&broken, 1).await,
        Err(ServiceError::AuthorizationError(_))
    );
    assert_matches!(
        payments.list_payment_dates(&broken).await,
        Err(ServiceError::AuthorizationError(_))
    );
    assert_matches!(
        weavers.list_weavers(&broken).await,
        Err(ServiceError::AuthorizationError(_))
    );
    assert_matches!(
        dashboard.summary(&broken).await,
        Err(ServiceError::AuthorizationError(_))
    );
}

#[tokio::test]
async fn non_owner_gets_not_found_for_foreign_records() {
    let app = TestApp::new().await;
    let owner = app.seed_user(1, "owner", "owner").await;
    let factory = app.seed_user(2, "factory", "handloom_factory").await;

    let looms = LoomService::new(app.state.db.clone());
    let weavers = WeaverService::new(app.state.db.clone());

    let owners_loom = looms
        .create_loom(&owner, loom_request(1, "Handloom", None))
        .await
        .expect("owner loom");
    let owners_weaver = weavers
        .create_weaver(
            &owner,
            CreateWeaverRequest {
                name: "Ravi".to_string(),
                phone: "9876500002".to_string(),
                address: None,
                skills: None,
                account_number: None,
                ifsc_code: None,
                account_type: None,
                name_in_bank: None,
                aadhaar_document: None,
            },
        )
        .await
        .expect("owner weaver");

    // existence is not revealed: same NotFound as a missing id
    assert_matches!(
        looms.get_loom(&factory, owners_loom.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(
        looms.get_loom(&factory, 9_999).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(
        weavers.get_weaver(&factory, owners_weaver.id).await,
        Err(ServiceError::NotFound(_))
    );

    // the owner role bypasses ownership checks
    assert!(looms.get_loom(&owner, owners_loom.id).await.is_ok());
    assert!(weavers.get_weaver(&owner, owners_weaver.id).await.is_ok());
}

#[tokio::test]
async fn own_loom_outside_role_category_is_invisible() {
    let app = TestApp::new().await;
    let owner = app.seed_user(1, "owner", "owner").await;
    let factory = app.seed_user(2, "factory", "handloom_factory").await;

    let looms = LoomService::new(app.state.db.clone());

    // assigned to the factory user, but a powerloom
    let powerloom = looms
        .create_loom(&owner, loom_request(1, "Powerloom", Some(2)))
        .await
        .expect("powerloom");
    let handloom = looms
        .create_loom(&owner, loom_request(2, "Handloom", Some(2)))
        .await
        .expect("handloom");

    assert_matches!(
        looms.get_loom(&factory, powerloom.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert!(looms.get_loom(&factory, handloom.id).await.is_ok());

    let listed = looms.list_looms(&factory).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, handloom.id);
}

#[tokio::test]
async fn non_owner_cannot_assign_looms_to_others() {
    let app = TestApp::new().await;
    app.seed_user(1, "owner", "owner").await;
    let factory = app.seed_user(2, "factory", "handloom_factory").await;

    let looms = LoomService::new(app.state.db.clone());

    let err = looms
        .create_loom(&factory, loom_request(1, "Handloom", Some(1)))
        .await
        .expect_err("assignment to another user must be denied");
    assert_matches!(err, ServiceError::AuthorizationError(_));
}

#[tokio::test]
async fn dashboard_counts_are_scoped_per_role() {
    let app = TestApp::new().await;
    let owner = app.seed_user(1, "owner", "owner").await;
    let factory = app.seed_user(2, "factory", "handloom_factory").await;

    let looms = LoomService::new(app.state.db.clone());
    let weavers = WeaverService::new(app.state.db.clone());
    let dashboard = DashboardService::new(app.state.db.clone());

    looms
        .create_loom(&owner, loom_request(1, "Handloom", None))
        .await
        .expect("owner handloom");
    looms
        .create_loom(&owner, loom_request(2, "Handloom", Some(2)))
        .await
        .expect("factory handloom");
    looms
        .create_loom(&owner, loom_request(3, "OutsidePowerloom", None))
        .await
        .expect("owner outside powerloom");
    weavers
        .create_weaver(
            &owner,
            CreateWeaverRequest {
                name: "Sita".to_string(),
                phone: "9876500003".to_string(),
                address: None,
                skills: None,
                account_number: None,
                ifsc_code: None,
                account_type: None,
                name_in_bank: None,
                aadhaar_document: None,
            },
        )
        .await
        .expect("owner weaver");

    let owner_summary = dashboard.summary(&owner).await.expect("owner summary");
    assert_eq!(owner_summary.handlooms, 2);
    assert_eq!(owner_summary.outside_powerlooms, 1);
    assert_eq!(owner_summary.weavers, 1);

    let factory_summary = dashboard.summary(&factory).await.expect("factory summary");
    assert_eq!(factory_summary.handlooms, 1);
    assert_eq!(factory_summary.outside_powerlooms, 0);
    assert_eq!(factory_summary.weavers, 0);
}
