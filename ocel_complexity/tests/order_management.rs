//! End-to-end analysis of the bundled order management log.

use std::collections::BTreeMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use ocel_complexity::pipeline::compare_analyses;
use ocel_complexity::{
    analyze_ocel, ComplexityConfig, Exportable, Importable, MetricName, MetricScope, OCEL,
};

fn order_management_log() -> OCEL {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join("ocel")
        .join("order-management-mini.json");
    OCEL::import_from_path(path).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn relation_counts() {
    let ocel = order_management_log();
    let analysis = analyze_ocel(&ocel, &ComplexityConfig::default()).unwrap();
    let counts = analysis.relation_counts;

    assert_eq!(counts.total, 16);
    assert_eq!(
        counts.per_object_type,
        BTreeMap::from([
            ("customers".to_string(), 4),
            ("items".to_string(), 6),
            ("orders".to_string(), 6),
        ])
    );
    // Orders occur at every event except the three item picks
    assert_eq!(counts.per_perspective["orders"], 13);
    assert_eq!(counts.per_perspective["customers"], 11);
    assert_eq!(counts.per_perspective["items"], 10);
}

#[test]
fn discovered_models() {
    let ocel = order_management_log();
    let analysis = analyze_ocel(&ocel, &ComplexityConfig::default()).unwrap();

    let orders = analysis.models.get("orders").unwrap();
    assert_eq!(orders.df_relation_frequency(("place order", "confirm order")), 2);
    // "pay order" of the second order is listed last, but ordered by its timestamp
    assert_eq!(orders.df_relation_frequency(("confirm order", "pay order")), 2);
    assert_eq!(orders.edge_count(), 2);

    let customers = analysis.models.get("customers").unwrap();
    assert!(customers.contains_df_relation(("place order", "place order")));
    assert!(customers.contains_df_relation(("pay order", "pay order")));
    assert_eq!(customers.edge_count(), 3);
}

#[test]
fn complexity_metrics() {
    let ocel = order_management_log();
    let metrics = analyze_ocel(&ocel, &ComplexityConfig::default())
        .unwrap()
        .metrics;

    // All instances of a type follow the same path
    for ot in ["orders", "items", "customers"] {
        assert_eq!(metrics.for_object_type(ot, MetricName::IntraObject), Some(0.0));
    }

    let structural = |ot| metrics.for_object_type(ot, MetricName::Structural).unwrap();
    // Relations plus density
    assert!(close(structural("orders"), 2.0 + 2.0 / 9.0));
    assert!(close(structural("items"), 1.25));
    assert!(close(structural("customers"), 3.75));
    assert!(close(
        metrics.global(MetricName::Structural).unwrap(),
        (2.0 + 2.0 / 9.0 + 1.25 + 3.75) / 3.0
    ));

    // Two events with all three types (3 pairs each), two with orders and customers
    assert!(close(metrics.global(MetricName::InterObject).unwrap(), 8.0 / 9.0));
    assert!(close(
        metrics
            .get(&MetricScope::type_pair("orders", "customers"), MetricName::InterObject)
            .unwrap(),
        4.0 / 9.0
    ));
}

#[test]
fn export_and_compare() {
    let ocel = order_management_log();
    let config = ComplexityConfig::default();
    let analysis = analyze_ocel(&ocel, &config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("metrics.csv");
    analysis.metrics.export_to_path(&csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("scope,object_types,metric,value"));
    assert_eq!(csv.lines().count(), analysis.metrics.len() + 1);

    let mut reduced = ocel.clone();
    reduced.events.retain(|ev| ev.event_type != "pay order");
    let report = compare_analyses([
        ("full".to_string(), analysis),
        ("unpaid".to_string(), analyze_ocel(&reduced, &config).unwrap()),
    ])
    .unwrap();
    assert_eq!(report.coverage.shared.len(), 3);

    let key = ocel_complexity::MetricKey::new(
        MetricScope::object_type("customers"),
        MetricName::Structural,
    );
    let comparison = report.metric(&key).unwrap();
    assert_eq!(comparison.ranking[0].log, "full");
}
