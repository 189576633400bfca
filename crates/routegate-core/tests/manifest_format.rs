//! Manifest parsing vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use routegate_core::{PluginManifest, RouteGateError};

const FULL: &str = "\
PluginClass=reports::plugin
RoutingMethods=register_reports,register_exports
Routings=/reports,/exports
";

#[test]
fn parse_full_manifest() {
    let m = PluginManifest::parse("reports", FULL).unwrap();
    assert_eq!(m.name, "reports");
    assert_eq!(m.entry_class, "reports::plugin");
    assert_eq!(m.routing_methods, ["register_reports", "register_exports"]);
    assert_eq!(m.routings, ["/reports", "/exports"]);
}

#[test]
fn blank_and_separator_less_lines_are_ignored() {
    let text = "\n# not a pair\nPluginClass=p::entry\n\nnoise without equals\nRoutingMethods=reg\nRoutings=/p\n";
    let m = PluginManifest::parse("p", text).unwrap();
    assert_eq!(m.entry_class, "p::entry");
    assert_eq!(m.routing_methods, ["reg"]);
}

#[test]
fn values_are_trimmed_and_empty_list_entries_dropped() {
    let text = "PluginClass = p::entry \nRoutingMethods= reg_a , ,reg_b\nRoutings=/a, /b,\n";
    let m = PluginManifest::parse("p", text).unwrap();
    assert_eq!(m.routing_methods, ["reg_a", "reg_b"]);
    assert_eq!(m.routings, ["/a", "/b"]);
}

#[test]
fn missing_plugin_class_fails() {
    let text = "RoutingMethods=reg\nRoutings=/p\n";
    let err = PluginManifest::parse("p", text).expect_err("must fail");
    assert!(matches!(err, RouteGateError::InvalidManifest(_)));
    assert!(err.to_string().contains("PluginClass"));
}

#[test]
fn missing_routings_fails() {
    let text = "PluginClass=p::entry\nRoutingMethods=reg\n";
    let err = PluginManifest::parse("p", text).expect_err("must fail");
    assert!(matches!(err, RouteGateError::InvalidManifest(_)));
    assert!(err.to_string().contains("Routings"));
}

#[test]
fn empty_value_counts_as_missing() {
    let text = "PluginClass=p::entry\nRoutingMethods=\nRoutings=/p\n";
    let err = PluginManifest::parse("p", text).expect_err("must fail");
    assert!(err.to_string().contains("RoutingMethods"));
}

#[test]
fn render_produces_parseable_text() {
    let m = PluginManifest::parse("reports", FULL).unwrap();
    let again = PluginManifest::parse("reports", &m.render()).unwrap();
    assert_eq!(again, m);
}
