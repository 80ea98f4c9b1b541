//! Integration tests for single and multi-config deletes.

use courier_acl::FilterBy;
use courier_core::action::DeleteConfigRequest;
use courier_core::{ConfigId, Error, RestStatus};

use crate::common::{admin, alice, bob, slack, TestHarness};

#[tokio::test]
async fn test_delete_single() {
    let harness = TestHarness::new();
    harness.seed("a", slack("a"), Some(&alice())).await;

    let response = harness
        .manager
        .delete(&DeleteConfigRequest::single("a"), Some(&alice()))
        .await
        .unwrap();

    assert_eq!(
        response.config_id_to_status.get(&ConfigId::new("a")),
        Some(&RestStatus::Ok)
    );
    assert!(!harness.exists("a").await);
}

#[tokio::test]
async fn test_delete_single_missing_is_not_found() {
    let harness = TestHarness::new();
    let err = harness
        .manager
        .delete(&DeleteConfigRequest::single("nope"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_single_denied_is_forbidden() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a", slack("a"), Some(&alice())).await;

    let err = harness
        .manager
        .delete(&DeleteConfigRequest::single("a"), Some(&bob()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    assert!(harness.exists("a").await);
}

#[tokio::test]
async fn test_delete_single_store_failure_is_request_timeout() {
    let harness = TestHarness::new();
    harness.seed("a", slack("a"), None).await;
    harness.store.fail_deletes();

    let err = harness
        .manager
        .delete(&DeleteConfigRequest::single("a"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RequestTimeout { .. }));
    assert_eq!(err.message(), "NotificationConfig a delete failed");
    assert!(harness.exists("a").await);
}

#[tokio::test]
async fn test_delete_many() {
    let harness = TestHarness::new();
    for id in ["a", "b", "c"] {
        harness.seed(id, slack(id), None).await;
    }

    let response = harness
        .manager
        .delete(&DeleteConfigRequest::many(["a", "b"]), None)
        .await
        .unwrap();

    assert_eq!(response.config_id_to_status.len(), 2);
    assert!(response
        .config_id_to_status
        .values()
        .all(|status| *status == RestStatus::Ok));
    assert!(!harness.exists("a").await);
    assert!(!harness.exists("b").await);
    assert!(harness.exists("c").await);
}

#[tokio::test]
async fn test_delete_many_with_missing_id_deletes_nothing() {
    let harness = TestHarness::new();
    harness.seed("a", slack("a"), None).await;
    harness.seed("b", slack("b"), None).await;

    let err = harness
        .manager
        .delete(&DeleteConfigRequest::many(["a", "b", "zzz"]), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.message(), "NotificationConfig [zzz] not found");
    assert!(harness.exists("a").await);
    assert!(harness.exists("b").await);
}

#[tokio::test]
async fn test_delete_many_with_one_denied_deletes_nothing() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a", slack("a"), Some(&alice())).await;
    harness.seed("b", slack("b"), Some(&bob())).await;

    let err = harness
        .manager
        .delete(&DeleteConfigRequest::many(["a", "b"]), Some(&alice()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Forbidden { .. }));
    assert_eq!(err.message(), "Permission denied for NotificationConfig b");
    assert!(harness.exists("a").await);
    assert!(harness.exists("b").await);
}

#[tokio::test]
async fn test_admin_deletes_across_owners() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a", slack("a"), Some(&alice())).await;
    harness.seed("b", slack("b"), Some(&bob())).await;

    harness
        .manager
        .delete(&DeleteConfigRequest::many(["a", "b"]), Some(&admin()))
        .await
        .unwrap();
    assert!(harness.store.inner.is_empty().await);
}

#[tokio::test]
async fn test_delete_many_passes_store_statuses_through() {
    let harness = TestHarness::new();
    harness.seed("a", slack("a"), None).await;
    harness.seed("b", slack("b"), None).await;
    harness.store.fail_deletes();

    let response = harness
        .manager
        .delete(&DeleteConfigRequest::many(["a", "b"]), None)
        .await
        .unwrap();

    assert_eq!(
        response.config_id_to_status.get(&ConfigId::new("a")),
        Some(&RestStatus::RequestTimeout)
    );
    assert_eq!(
        response.config_id_to_status.get(&ConfigId::new("b")),
        Some(&RestStatus::RequestTimeout)
    );
}

#[tokio::test]
async fn test_delete_empty_set_is_bad_request() {
    let harness = TestHarness::new();
    let request = DeleteConfigRequest::many(Vec::<String>::new());

    let err = harness.manager.delete(&request, None).await.unwrap_err();
    assert!(matches!(err, Error::BadRequest { .. }));
    assert_eq!(harness.store.lookups(), 0);
}

#[tokio::test]
async fn test_delete_rejects_invalid_user() {
    let harness = TestHarness::with_filter(FilterBy::BackendRoles);
    harness.seed("a", slack("a"), Some(&alice())).await;
    let lookups = harness.store.lookups();

    let err = harness
        .manager
        .delete(&DeleteConfigRequest::single("a"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    assert_eq!(harness.store.lookups(), lookups);
}

#[tokio::test]
async fn test_delete_empty_set_validates_user_first() {
    let harness = TestHarness::with_filter(FilterBy::User);
    let request = DeleteConfigRequest::many(Vec::<String>::new());

    let err = harness.manager.delete(&request, None).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));

    let err = harness
        .manager
        .delete(&request, Some(&alice()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest { .. }));
}
