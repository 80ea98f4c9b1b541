//! Integration tests for config lookup and listing.

use courier_acl::{FilterBy, PRIVATE_TENANT};
use courier_core::action::{GetConfigRequest, SortOrder};
use courier_core::Error;

use crate::common::{admin, alice, bob, slack, TestHarness};

fn listed(response: &courier_core::action::GetConfigResponse) -> Vec<&str> {
    response
        .search_result
        .config_list
        .iter()
        .map(|info| info.config_id.as_str())
        .collect()
}

#[tokio::test]
async fn test_get_is_idempotent() {
    let harness = TestHarness::with_filter(FilterBy::User);
    let user = alice();
    harness.seed("a", slack("ops"), Some(&user)).await;

    let request = GetConfigRequest::by_id("a");
    let first = harness.manager.get(&request, Some(&user)).await.unwrap();
    let second = harness.manager.get(&request, Some(&user)).await.unwrap();
    assert_eq!(first, second);

    let listing = GetConfigRequest::all();
    let first = harness.manager.get(&listing, Some(&user)).await.unwrap();
    let second = harness.manager.get(&listing, Some(&user)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let harness = TestHarness::new();
    let err = harness
        .manager
        .get(&GetConfigRequest::by_id("nope"), Some(&alice()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.message(), "NotificationConfig nope not found");
}

#[tokio::test]
async fn test_get_other_users_config_is_forbidden_under_user_filter() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a", slack("ops"), Some(&alice())).await;

    let err = harness
        .manager
        .get(&GetConfigRequest::by_id("a"), Some(&bob()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    assert_eq!(err.message(), "Permission denied for NotificationConfig a");
}

#[tokio::test]
async fn test_get_other_users_config_is_allowed_without_filter() {
    let harness = TestHarness::new();
    harness.seed("a", slack("ops"), Some(&alice())).await;

    let response = harness
        .manager
        .get(&GetConfigRequest::by_id("a"), Some(&bob()))
        .await
        .unwrap();
    assert_eq!(listed(&response), vec!["a"]);
}

#[tokio::test]
async fn test_get_across_tenants_is_forbidden() {
    let harness = TestHarness::new();
    harness
        .seed("a", slack("ops"), Some(&alice().with_tenant("team")))
        .await;

    let err = harness
        .manager
        .get(&GetConfigRequest::by_id("a"), Some(&alice()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}

#[tokio::test]
async fn test_list_is_filtered_by_user() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a1", slack("a1"), Some(&alice())).await;
    harness.seed("a2", slack("a2"), Some(&alice())).await;
    harness.seed("b1", slack("b1"), Some(&bob())).await;

    let all = GetConfigRequest::all();
    let response = harness.manager.get(&all, Some(&alice())).await.unwrap();
    assert_eq!(listed(&response), vec!["a1", "a2"]);

    let response = harness.manager.get(&all, Some(&bob())).await.unwrap();
    assert_eq!(listed(&response), vec!["b1"]);
}

#[tokio::test]
async fn test_list_is_filtered_by_backend_role() {
    let harness = TestHarness::with_filter(FilterBy::BackendRoles);
    harness.seed("a1", slack("a1"), Some(&alice())).await;
    harness.seed("b1", slack("b1"), Some(&bob())).await;

    let teammate = crate::common::user("carol", "qa", "team_a");
    let response = harness
        .manager
        .get(&GetConfigRequest::all(), Some(&teammate))
        .await
        .unwrap();
    assert_eq!(listed(&response), vec!["a1"]);
}

#[tokio::test]
async fn test_admin_lists_everything_in_tenant() {
    let harness = TestHarness::with_filter(FilterBy::User);
    harness.seed("a1", slack("a1"), Some(&alice())).await;
    harness.seed("b1", slack("b1"), Some(&bob())).await;
    harness
        .seed("t1", slack("t1"), Some(&alice().with_tenant("team")))
        .await;

    let response = harness
        .manager
        .get(&GetConfigRequest::all(), Some(&admin()))
        .await
        .unwrap();
    assert_eq!(listed(&response), vec!["a1", "b1"]);
}

#[tokio::test]
async fn test_private_tenant_lists_own_configs_only() {
    let harness = TestHarness::new();
    let private_alice = alice().with_tenant(PRIVATE_TENANT);
    let private_bob = bob().with_tenant(PRIVATE_TENANT);
    harness.seed("a1", slack("a1"), Some(&private_alice)).await;
    harness.seed("b1", slack("b1"), Some(&private_bob)).await;

    let response = harness
        .manager
        .get(&GetConfigRequest::all(), Some(&private_alice))
        .await
        .unwrap();
    assert_eq!(listed(&response), vec!["a1"]);
}

#[tokio::test]
async fn test_empty_id_lists() {
    let harness = TestHarness::new();
    harness.seed("a1", slack("a1"), None).await;

    let response = harness
        .manager
        .get(&GetConfigRequest::by_id(""), None)
        .await
        .unwrap();
    assert_eq!(response.search_result.total_hits, 1);
}

#[tokio::test]
async fn test_list_passes_paging_and_sorting_to_store() {
    let harness = TestHarness::new();
    for name in ["charlie", "alpha", "bravo"] {
        harness.seed(name, slack(name), None).await;
    }

    let request = GetConfigRequest::all()
        .sorted_by("name", SortOrder::Desc)
        .page(0, 2);
    let response = harness.manager.get(&request, None).await.unwrap();
    assert_eq!(listed(&response), vec!["charlie", "bravo"]);
    assert_eq!(response.search_result.total_hits, 3);
}
