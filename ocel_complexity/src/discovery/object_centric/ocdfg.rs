//! Object-wise discovery of directly-follows graphs
//!
//! Each object type is discovered on its own [`SubRelation`], so the flow of one object type is
//! never mixed with the ordering of events of other object types.
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::core::event_data::object_centric::relations::{
    ObjectTypePerspective, RelationExtraction, SubRelation,
};
use crate::core::process_models::object_centric::ocdfg::{
    dfg_struct::DirectlyFollowsGraph, object_centric_dfg_struct::OCDirectlyFollowsGraph,
};

///
/// Discover the [`DirectlyFollowsGraph`] of a single object type
///
/// For every object instance, its events are traversed in order (timestamp, then original event
/// position). Each pair of consecutive events adds one to the frequency of the directly-follows
/// relation between their activities. Objects with a single event only contribute their activity.
///
/// An empty [`SubRelation`] results in an empty graph.
///
pub fn discover_dfg_from_sub_relation<'a>(sub_relation: &SubRelation<'a>) -> DirectlyFollowsGraph<'a> {
    let mut result = DirectlyFollowsGraph::new();
    for trace in sub_relation.object_traces().values() {
        let mut last_activity: Option<&'a str> = None;
        for pair in trace {
            result.add_activity(pair.activity, 1);
            match last_activity {
                Some(prev) => result.add_df_relation(prev, pair.activity, 1),
                None => result.add_start_activity(pair.activity),
            }
            last_activity = Some(pair.activity);
        }
        if let Some(last) = last_activity {
            result.add_end_activity(last);
        }
    }
    result
}

fn discover_all<'a>(
    sub_relations: &BTreeMap<&'a str, SubRelation<'a>>,
    parallel: bool,
) -> OCDirectlyFollowsGraph<'a> {
    let object_type_to_dfg: BTreeMap<String, DirectlyFollowsGraph<'a>> = if parallel {
        sub_relations
            .par_iter()
            .map(|(ot, sub)| (ot.to_string(), discover_dfg_from_sub_relation(sub)))
            .collect()
    } else {
        sub_relations
            .iter()
            .map(|(ot, sub)| (ot.to_string(), discover_dfg_from_sub_relation(sub)))
            .collect()
    };
    OCDirectlyFollowsGraph { object_type_to_dfg }
}

///
/// Discover an [`OCDirectlyFollowsGraph`]: one [`DirectlyFollowsGraph`] per object type
///
/// Object types without events get an empty graph. With `parallel` set, object types are
/// discovered concurrently (sub-relations are independent and read-only); the result is identical
/// either way.
///
pub fn discover_oc_dfg<'a>(
    extraction: &RelationExtraction<'a>,
    parallel: bool,
) -> OCDirectlyFollowsGraph<'a> {
    let result = discover_all(extraction.sub_relations(), parallel);
    for (ot, dfg) in &result.object_type_to_dfg {
        tracing::debug!(
            object_type = ot.as_str(),
            activities = dfg.node_count(),
            relations = dfg.edge_count(),
            "discovered directly-follows graph"
        );
    }
    result
}

///
/// Discover the [`OCDirectlyFollowsGraph`] of an [`ObjectTypePerspective`]
///
/// Only the events involving the perspective's object type are considered, but all object types
/// related to those events get their own [`DirectlyFollowsGraph`].
///
pub fn discover_perspective_dfg<'a>(
    perspective: &ObjectTypePerspective<'a>,
) -> OCDirectlyFollowsGraph<'a> {
    tracing::debug!(
        object_type = perspective.object_type(),
        pairs = perspective.len(),
        "discovering object type perspective"
    );
    discover_all(&perspective.relation().split_by_object_type(), false)
}
