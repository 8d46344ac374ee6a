//! Property-based tests for relation extraction, discovery and complexity metrics.

use proptest::prelude::*;

use ocel_complexity::analysis::object_centric::complexity::structural::structural_profile;
use ocel_complexity::config::MetricsConfig;
use ocel_complexity::core::chrono::{TimeDelta, TimeZone, Utc};
use ocel_complexity::core::event_data::object_centric::{
    OCELEvent, OCELObject, OCELRelationship, OCELType,
};
use ocel_complexity::{
    compute_metrics, discover_oc_dfg, extract_relations, DirectlyFollowsGraph, Exportable, OCEL,
};

const OBJECT_TYPES: [&str; 3] = ["order", "item", "package"];
const ACTIVITIES: [&str; 5] = ["create", "check", "pick", "pack", "ship"];
const OBJECTS_PER_TYPE: usize = 3;

/// (activity, minute offset, related objects as (type index, object index))
type EventSpec = (usize, i64, Vec<(usize, usize)>);

fn event_spec() -> impl Strategy<Value = EventSpec> {
    (
        0..ACTIVITIES.len(),
        0i64..20,
        prop::collection::vec((0..OBJECT_TYPES.len(), 0..OBJECTS_PER_TYPE), 0..5),
    )
}

fn build_log(events: &[EventSpec]) -> OCEL {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let mut ocel = OCEL {
        object_types: OBJECT_TYPES.iter().map(|ot| OCELType::new(*ot)).collect(),
        event_types: ACTIVITIES.iter().map(|a| OCELType::new(*a)).collect(),
        ..Default::default()
    };
    for (t, ot) in OBJECT_TYPES.iter().enumerate() {
        for o in 0..OBJECTS_PER_TYPE {
            ocel.objects
                .push(OCELObject::new(format!("{ot}-{t}{o}"), *ot));
        }
    }
    for (i, (activity, minute, related)) in events.iter().enumerate() {
        ocel.events.push(OCELEvent::new(
            format!("e{i}"),
            ACTIVITIES[*activity],
            start + TimeDelta::minutes(*minute),
            vec![],
            related
                .iter()
                .map(|(t, o)| {
                    OCELRelationship::new(format!("{}-{t}{o}", OBJECT_TYPES[*t]), "")
                })
                .collect(),
        ));
    }
    ocel
}

proptest! {
    #[test]
    fn sub_relations_partition_the_universal_relation(
        events in prop::collection::vec(event_spec(), 0..30)
    ) {
        let ocel = build_log(&events);
        let extraction = extract_relations(&ocel).unwrap();
        prop_assert!(extraction.is_complete());

        let total: usize = extraction.sub_relations().values().map(|s| s.len()).sum();
        prop_assert_eq!(total, extraction.universal().len());
        prop_assert_eq!(extraction.sub_relations().len(), OBJECT_TYPES.len());
        for (ot, sub) in extraction.sub_relations() {
            prop_assert!(sub.iter().all(|p| p.object_type == *ot));
        }
    }

    #[test]
    fn events_are_ordered_by_time_then_position(
        events in prop::collection::vec(event_spec(), 0..30)
    ) {
        let ocel = build_log(&events);
        let extraction = extract_relations(&ocel).unwrap();
        let keys: Vec<_> = extraction
            .universal()
            .iter()
            .map(|p| (p.time, p.event_position))
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn metrics_are_deterministic_and_finite(
        events in prop::collection::vec(event_spec(), 0..30),
        parallel in any::<bool>(),
    ) {
        let ocel = build_log(&events);
        let config = MetricsConfig::default();

        let first = {
            let extraction = extract_relations(&ocel).unwrap();
            let models = discover_oc_dfg(&extraction, parallel);
            compute_metrics(&extraction, &models, &config).unwrap()
        };
        let second = {
            let extraction = extract_relations(&ocel).unwrap();
            let models = discover_oc_dfg(&extraction, !parallel);
            compute_metrics(&extraction, &models, &config).unwrap()
        };

        prop_assert!(first.records().all(|r| r.value.is_finite() && r.value >= 0.0));
        prop_assert_eq!(
            first.export_to_bytes("json").unwrap(),
            second.export_to_bytes("json").unwrap()
        );
    }

    #[test]
    fn adding_an_edge_never_decreases_structural_complexity(
        node_count in 2usize..8,
        edges in prop::collection::btree_set((0usize..8, 0usize..8), 0..12),
        new_edge in (0usize..10, 0usize..10),
    ) {
        // Indices beyond the existing activities stand for activities added with the edge
        let names: Vec<String> = (0..10).map(|i| format!("a{i}")).collect();
        let mut dfg = DirectlyFollowsGraph::new();
        for name in &names[..node_count] {
            dfg.add_activity(name.as_str(), 1);
        }
        for (from, to) in edges {
            dfg.add_df_relation(
                names[from % node_count].as_str(),
                names[to % node_count].as_str(),
                1,
            );
        }
        let (from, to) = (names[new_edge.0].as_str(), names[new_edge.1].as_str());
        prop_assume!(!dfg.contains_df_relation((from, to)));
        let between_existing = dfg.contains_activity(from) && dfg.contains_activity(to);

        let before = structural_profile(&dfg).unwrap().complexity;
        for activity in [from, to] {
            if !dfg.contains_activity(activity) {
                dfg.add_activity(activity, 1);
            }
        }
        dfg.add_df_relation(from, to, 1);
        let after = structural_profile(&dfg).unwrap().complexity;
        prop_assert!(after >= before);
        if between_existing {
            prop_assert!(after > before);
        }
    }
}
