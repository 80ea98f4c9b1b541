//! Integration tests for config updates.

use courier_acl::FilterBy;
use courier_core::action::{GetConfigRequest, UpdateConfigRequest};
use courier_core::{AccessTag, ConfigData, ConfigId, Error, NotificationConfig};
use courier_storage::ConfigStore;

use crate::common::{alice, bob, slack, user, TestHarness};

#[tokio::test]
async fn test_update_replaces_config_and_keeps_ownership() {
    let harness = TestHarness::with_filter(FilterBy::User);
    let owner = alice();
    harness.seed("a", slack("before"), Some(&owner)).await;
    let before = harness
        .store
        .inner
        .get_notification_config(&ConfigId::new("a"))
        .await
        .unwrap();

    let response = harness
        .manager
        .update(UpdateConfigRequest::new("a", slack("after")), Some(&owner))
        .await
        .unwrap();
    assert_eq!(response.config_id, ConfigId::new("a"));

    let after = harness
        .store
        .inner
        .get_notification_config(&ConfigId::new("a"))
        .await
        .unwrap();
    let (old, new) = (before.document.metadata, after.document.metadata);
    assert_eq!(after.document.config, slack("after"));
    assert_eq!(new.tenant, old.tenant);
    assert_eq!(new.access, old.access);
    assert_eq!(new.created_time, old.created_time);
    assert!(new.last_update_time >= old.last_update_time);
}

#[tokio::test]
async fn test_update_by_other_user_does_not_restamp_access() {
    let harness = TestHarness::with_filter(FilterBy::Roles);
    harness.seed("a", slack("before"), Some(&alice())).await;

    // Shares the `ops` role with alice
    let colleague = user("dave", "ops", "team_c");
    harness
        .manager
        .update(UpdateConfigRequest::new("a", slack("after")), Some(&colleague))
        .await
        .unwrap();

    let stored = harness
        .store
        .inner
        .get_notification_config(&ConfigId::new("a"))
        .await
        .unwrap();
    let access = &stored.document.metadata.access;
    assert!(access.contains(&AccessTag::user("alice")));
    assert!(!access.contains(&AccessTag::user("dave")));

    let visible = harness
        .manager
        .get(&GetConfigRequest::by_id("a"), Some(&alice()))
        .await
        .unwrap();
    assert_eq!(visible.search_result.config_list[0].config, slack("after"));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let harness = TestHarness::new();
    let err = harness
        .manager
        .update(UpdateConfigRequest::new("nope", slack("x")), Some(&alice()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.message(), "NotificationConfig nope not found");
}

#[tokio::test]
async fn test_update_denied_leaves_config_unchanged() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a", slack("before"), Some(&alice())).await;

    let err = harness
        .manager
        .update(UpdateConfigRequest::new("a", slack("after")), Some(&bob()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));

    let stored = harness
        .store
        .inner
        .get_notification_config(&ConfigId::new("a"))
        .await
        .unwrap();
    assert_eq!(stored.document.config, slack("before"));
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let harness = TestHarness::new();
    harness.seed("a", slack("before"), None).await;
    let lookups = harness.store.lookups();

    let config = NotificationConfig::new("nothing", ConfigData::None);
    let err = harness
        .manager
        .update(UpdateConfigRequest::new("a", config), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotAcceptable { .. }));
    assert_eq!(harness.store.lookups(), lookups);
}

#[tokio::test]
async fn test_update_store_failure_is_internal_error() {
    let harness = TestHarness::new();
    harness.seed("a", slack("before"), None).await;
    harness.store.fail_writes();

    let err = harness
        .manager
        .update(UpdateConfigRequest::new("a", slack("after")), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Internal { .. }));
    assert_eq!(err.message(), "NotificationConfig Update failed");
}
