//! Extract, discover and measure in one run.
use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::analysis::object_centric::{
    comparison::{compare, ComparisonError, ComparisonReport},
    complexity::{compute_metrics, metric_table::MetricTable},
};
use crate::config::ComplexityConfig;
use crate::core::event_data::object_centric::relations::{
    extract_relations, MalformedLogError, RelationCounts,
};
use crate::core::process_models::object_centric::ocdfg::{
    dfg_struct::InvalidModelError, object_centric_dfg_struct::OCDirectlyFollowsGraph,
};
use crate::core::OCEL;
use crate::discovery::object_centric::ocdfg::discover_oc_dfg;

/// Error of any stage of an analysis run
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The log failed validation during relation extraction
    #[error(transparent)]
    MalformedLog(#[from] MalformedLogError),
    /// A discovered model is inconsistent
    #[error(transparent)]
    InvalidModel(#[from] InvalidModelError),
    /// The analyses cannot be compared
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

/// Everything computed for a single log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityAnalysis<'a> {
    /// Number of (event, object) pairs in total, per object type and per perspective
    pub relation_counts: RelationCounts,
    /// Discovered directly-follows graph per object type
    pub models: OCDirectlyFollowsGraph<'a>,
    /// Complexity metrics
    pub metrics: MetricTable,
}

///
/// Analyze an [`OCEL`]: extract the object-wise relations, discover one directly-follows graph
/// per object type and compute all complexity metrics
///
/// The first failing stage aborts the run.
///
pub fn analyze_ocel<'a>(
    ocel: &'a OCEL,
    config: &ComplexityConfig,
) -> Result<ComplexityAnalysis<'a>, AnalysisError> {
    let extraction = extract_relations(ocel)?;
    let models = discover_oc_dfg(&extraction, config.discovery.parallel);
    let metrics = compute_metrics(&extraction, &models, &config.metrics)?;
    Ok(ComplexityAnalysis {
        relation_counts: extraction.relation_counts(),
        models,
        metrics,
    })
}

/// Compare the metrics of several analyses, keyed by log ID
pub fn compare_analyses<'a, I>(analyses: I) -> Result<ComparisonReport, AnalysisError>
where
    I: IntoIterator<Item = (String, ComplexityAnalysis<'a>)>,
{
    let tables: BTreeMap<String, MetricTable> = analyses
        .into_iter()
        .map(|(log, analysis)| (log, analysis.metrics))
        .collect();
    Ok(compare(tables)?)
}
