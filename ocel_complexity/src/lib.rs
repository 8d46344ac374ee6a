#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

/// Core data structures: object-centric event data, process models and IO traits
pub mod core;

///
/// Discovery algorithms
///
pub mod discovery {
    /// Object-centric discovery (object-wise directly-follows graphs)
    pub mod object_centric;
}

///
/// Analysis of discovered models: complexity metrics and cross-log comparison
///
pub mod analysis {
    /// Object-centric analysis
    pub mod object_centric;
}

/// Layered configuration ([`ComplexityConfig`])
pub mod config;

/// End-to-end pipeline: extract, discover, measure
pub mod pipeline;

/// Util module with smaller helper functions
pub mod utils;

#[doc(inline)]
pub use crate::core::io::{Exportable, Importable};

#[doc(inline)]
pub use crate::core::event_data::object_centric::ocel_struct::OCEL;

#[doc(inline)]
pub use crate::core::event_data::object_centric::relations::{
    extract_relations, MalformedLogError, RelationExtraction, SubRelation, UniversalRelation,
};

#[doc(inline)]
pub use crate::core::process_models::object_centric::ocdfg::{
    dfg_struct::{DirectlyFollowsGraph, InvalidModelError},
    object_centric_dfg_struct::OCDirectlyFollowsGraph,
};

#[doc(inline)]
pub use crate::discovery::object_centric::ocdfg::{
    discover_dfg_from_sub_relation, discover_oc_dfg, discover_perspective_dfg,
};

#[doc(inline)]
pub use crate::analysis::object_centric::complexity::{
    compute_global_metrics, compute_metrics, compute_object_type_metrics,
    metric_table::{MetricKey, MetricName, MetricRecord, MetricScope, MetricTable},
};

#[doc(inline)]
pub use crate::analysis::object_centric::comparison::{compare, ComparisonError, ComparisonReport};

#[doc(inline)]
pub use crate::config::ComplexityConfig;

#[doc(inline)]
pub use crate::pipeline::{analyze_ocel, AnalysisError, ComplexityAnalysis};
