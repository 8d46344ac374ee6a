use std::collections::HashMap;

use petgraph::{algo::connected_components, graph::DiGraph};
use serde::{Deserialize, Serialize};

use crate::core::process_models::object_centric::ocdfg::dfg_struct::{
    DirectlyFollowsGraph, InvalidModelError,
};

/// Structural figures of a [`DirectlyFollowsGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralProfile {
    /// Number of activities
    pub node_count: usize,
    /// Number of directly-follows relations
    pub edge_count: usize,
    /// `2 * edges / nodes`: every relation adds one out- and one in-degree
    pub average_degree: f64,
    /// `edges / nodes²` (self-loops count as possible relations)
    pub density: f64,
    /// `edges - nodes + weakly connected components`
    pub cyclomatic_number: f64,
    /// Structural complexity: `edges + density`
    pub complexity: f64,
}

///
/// Compute the [`StructuralProfile`] of a [`DirectlyFollowsGraph`]
///
/// Models with at most one activity have a density and complexity of 0. Otherwise the complexity
/// is the number of directly-follows relations plus the density. The density is at most 1, so
/// adding a relation never decreases the complexity, even if it introduces new activities. For a
/// fixed set of activities it strictly increases the complexity.
///
pub fn structural_profile(dfg: &DirectlyFollowsGraph<'_>) -> Result<StructuralProfile, InvalidModelError> {
    dfg.validate()?;

    let node_count = dfg.node_count();
    let edge_count = dfg.edge_count();
    if node_count == 0 {
        return Ok(StructuralProfile::default());
    }

    let n = node_count as f64;
    let m = edge_count as f64;
    let average_degree = 2.0 * m / n;
    let (density, complexity) = if node_count > 1 {
        let density = m / (n * n);
        (density, m + density)
    } else {
        (0.0, 0.0)
    };

    Ok(StructuralProfile {
        node_count,
        edge_count,
        average_degree,
        density,
        cyclomatic_number: m - n + weakly_connected_components(dfg) as f64,
        complexity,
    })
}

fn weakly_connected_components(dfg: &DirectlyFollowsGraph<'_>) -> usize {
    let mut graph: DiGraph<&str, u32> = DiGraph::with_capacity(dfg.node_count(), dfg.edge_count());
    let indices: HashMap<&str, _> = dfg
        .activities
        .keys()
        .map(|a| (&**a, graph.add_node(&**a)))
        .collect();
    for ((from, to), freq) in &dfg.directly_follows_relations {
        // Endpoints exist, the graph was validated before
        if let (Some(&a), Some(&b)) = (indices.get(&**from), indices.get(&**to)) {
            graph.add_edge(a, b, *freq);
        }
    }
    connected_components(&graph)
}
