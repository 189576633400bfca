//! Policy evaluation truth tables.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use routegate_core::policy::{role_set, Policy};
use routegate_core::RouteGateError;

#[test]
fn all_allows_superset() {
    let policy = Policy::all(["admin", "editor"]).unwrap();
    let decision = policy.evaluate(&role_set(["admin", "editor", "viewer"]));
    assert!(decision.allow);
    assert!(decision.reason.is_empty());
}

#[test]
fn all_denies_and_names_every_missing_role() {
    let policy = Policy::all(["admin", "owner"]).unwrap();
    let decision = policy.evaluate(&role_set(["admin", "editor"]));
    assert!(!decision.allow);
    assert!(decision.reason.contains("owner"));
    assert!(!decision.reason.contains("admin"));
}

#[test]
fn all_deny_reason_lists_multiple_missing() {
    let policy = Policy::all(["a", "b", "c"]).unwrap();
    let decision = policy.evaluate(&role_set(["c"]));
    assert_eq!(decision.reason, "lacks required role(s) a and b");
}

#[test]
fn any_allows_on_single_overlap() {
    let policy = Policy::any(["admin", "viewer"]).unwrap();
    assert!(policy.evaluate(&role_set(["viewer"])).allow);
}

#[test]
fn any_denies_listing_all_alternatives() {
    let policy = Policy::any(["admin", "owner"]).unwrap();
    let decision = policy.evaluate(&role_set(["viewer"]));
    assert!(!decision.allow);
    assert_eq!(
        decision.reason,
        "has none of the sufficient role(s) admin or owner"
    );
}

#[test]
fn none_allows_on_empty_intersection() {
    let policy = Policy::none(["banned"]).unwrap();
    assert!(policy.evaluate(&role_set(["viewer"])).allow);
}

#[test]
fn none_denies_listing_offending_intersection() {
    let policy = Policy::none(["banned", "suspended"]).unwrap();
    let decision = policy.evaluate(&role_set(["banned", "viewer"]));
    assert!(!decision.allow);
    assert_eq!(decision.reason, "has forbidden role(s) banned");
}

#[test]
fn evaluation_is_deterministic() {
    let policy = Policy::all(["z", "a", "m"]).unwrap();
    let held = role_set(["q"]);
    let first = policy.evaluate(&held);
    for _ in 0..8 {
        assert_eq!(policy.evaluate(&held), first);
    }
    // BTreeSet ordering: reason lists roles alphabetically regardless of
    // construction order.
    assert_eq!(first.reason, "lacks required role(s) a and m and z");
}

#[test]
fn empty_role_set_is_a_configuration_error() {
    let err = Policy::all(Vec::<String>::new()).expect_err("must fail");
    assert!(matches!(err, RouteGateError::Configuration(_)));
    assert_eq!(err.client_code().as_str(), "CONFIGURATION");
}

#[test]
fn display_names_kind_and_roles() {
    let policy = Policy::any(["b", "a"]).unwrap();
    assert_eq!(policy.to_string(), "(authorize any: a,b)");
}
