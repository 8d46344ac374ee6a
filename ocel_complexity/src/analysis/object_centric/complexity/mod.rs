//! Complexity metrics of object-centric event logs and their discovered models
//!
//! Three primary metrics are computed:
//! * **inter-object**: how entangled object types are through shared events
//!   ([`inter_object`]),
//! * **intra-object**: how much the instances of one object type differ in behavior
//!   ([`intra_object`]),
//! * **structural**: how large and connected a discovered model is ([`structural`]).
//!
//! All values are collected in a [`MetricTable`].
use crate::config::MetricsConfig;
use crate::core::event_data::object_centric::relations::{
    RelationExtraction, SubRelation, UniversalRelation,
};
use crate::core::process_models::object_centric::ocdfg::{
    dfg_struct::{DirectlyFollowsGraph, InvalidModelError},
    object_centric_dfg_struct::OCDirectlyFollowsGraph,
};

use self::{
    inter_object::entanglement_profile,
    intra_object::variability_profile,
    metric_table::{MetricName, MetricScope, MetricTable},
    structural::structural_profile,
};

/// Inter-object complexity
pub mod inter_object;
/// Intra-object complexity
pub mod intra_object;
/// [`MetricTable`] and its keys
pub mod metric_table;
/// Structural complexity of directly-follows graphs
pub mod structural;

///
/// Compute the metrics of a single object type, scoped [`MetricScope::ObjectType`]
///
/// `dfg` must be the model discovered from `sub_relation`. Fails if `dfg` has directly-follows
/// relations between unknown activities.
///
pub fn compute_object_type_metrics(
    dfg: &DirectlyFollowsGraph<'_>,
    sub_relation: &SubRelation<'_>,
) -> Result<MetricTable, InvalidModelError> {
    let structural = structural_profile(dfg)?;
    let variability = variability_profile(sub_relation);
    let scope = MetricScope::object_type(sub_relation.object_type());

    let mut table = MetricTable::new();
    let mut put = |metric, value| table.insert(scope.clone(), metric, value);
    put(MetricName::Structural, structural.complexity);
    put(MetricName::IntraObject, variability.complexity);
    put(MetricName::NodeCount, structural.node_count as f64);
    put(MetricName::EdgeCount, structural.edge_count as f64);
    put(MetricName::AverageDegree, structural.average_degree);
    put(MetricName::Density, structural.density);
    put(MetricName::CyclomaticNumber, structural.cyclomatic_number);
    put(MetricName::InstanceCount, variability.instance_count as f64);
    put(MetricName::VariantCount, variability.variant_count as f64);
    put(MetricName::RelationCount, sub_relation.len() as f64);
    Ok(table)
}

///
/// Compute the log-wide metrics: [`MetricScope::Global`] values, the inter-object complexity of
/// every object type and of every co-occurring pair of object types
///
/// * The global structural complexity is the mean over all non-empty models.
/// * The global intra-object complexity is the mean of the per-type values, weighted by the
///   number of instances of each type.
///
/// Every model is validated before anything is computed.
///
pub fn compute_global_metrics(
    oc_dfg: &OCDirectlyFollowsGraph<'_>,
    relation: &UniversalRelation<'_>,
) -> Result<MetricTable, InvalidModelError> {
    oc_dfg.validate()?;

    let entanglement = entanglement_profile(relation);
    let mut table = MetricTable::new();

    table.insert(MetricScope::Global, MetricName::InterObject, entanglement.complexity);
    for ot in oc_dfg.object_types() {
        let value = entanglement.per_object_type.get(ot).copied().unwrap_or(0.0);
        table.insert(MetricScope::object_type(ot), MetricName::InterObject, value);
    }
    for ((a, b), value) in entanglement.per_type_pair {
        table.insert(MetricScope::type_pair(a, b), MetricName::InterObject, value);
    }

    let mut structural_sum = 0.0;
    let mut non_empty_models = 0;
    for dfg in oc_dfg.object_type_to_dfg.values() {
        if !dfg.is_empty() {
            structural_sum += structural_profile(dfg)?.complexity;
            non_empty_models += 1;
        }
    }
    let structural = if non_empty_models > 0 {
        structural_sum / non_empty_models as f64
    } else {
        0.0
    };
    table.insert(MetricScope::Global, MetricName::Structural, structural);

    let mut weighted_intra = 0.0;
    let mut instances = 0;
    for sub_relation in relation.split_by_object_type().values() {
        let variability = variability_profile(sub_relation);
        weighted_intra += variability.complexity * variability.instance_count as f64;
        instances += variability.instance_count;
    }
    let intra = if instances > 0 {
        weighted_intra / instances as f64
    } else {
        0.0
    };
    table.insert(MetricScope::Global, MetricName::IntraObject, intra);
    table.insert(MetricScope::Global, MetricName::InstanceCount, instances as f64);
    table.insert(MetricScope::Global, MetricName::RelationCount, relation.len() as f64);

    Ok(table)
}

///
/// Compute the full [`MetricTable`] of a log: the metrics of every object type and the global
/// metrics
///
/// Object types without a model in `oc_dfg` are treated as having an empty model. Auxiliary and
/// type pair metrics are dropped if disabled in `config`.
///
pub fn compute_metrics(
    extraction: &RelationExtraction<'_>,
    oc_dfg: &OCDirectlyFollowsGraph<'_>,
    config: &MetricsConfig,
) -> Result<MetricTable, InvalidModelError> {
    let empty = DirectlyFollowsGraph::new();
    let mut table = MetricTable::new();
    for (ot, sub_relation) in extraction.sub_relations() {
        let dfg = oc_dfg.get(ot).unwrap_or(&empty);
        table.merge(compute_object_type_metrics(dfg, sub_relation)?);
    }
    table.merge(compute_global_metrics(oc_dfg, extraction.universal())?);

    if !config.include_auxiliary {
        table.retain(|k| !k.metric.is_auxiliary());
    }
    if !config.include_type_pairs {
        table.retain(|k| !matches!(k.scope, MetricScope::TypePair(_, _)));
    }

    tracing::info!(
        values = table.len(),
        inter_object = table.global(MetricName::InterObject),
        intra_object = table.global(MetricName::IntraObject),
        structural = table.global(MetricName::Structural),
        "computed complexity metrics"
    );
    Ok(table)
}
