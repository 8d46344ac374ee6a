use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::event_data::object_centric::relations::SubRelation;

/// Behavioral variability among the instances of one object type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VariabilityProfile {
    /// Objects with at least one event
    pub instance_count: usize,
    /// Distinct activity sequences among those objects
    pub variant_count: usize,
    /// `(variants - 1) / (instances - 1)`, 0 for at most one instance
    pub complexity: f64,
}

///
/// Compute the [`VariabilityProfile`] of a [`SubRelation`]
///
/// A variant is the sequence of activities an object goes through. If all objects share one
/// variant the complexity is 0, if every object has its own variant it is 1.
///
pub fn variability_profile(sub_relation: &SubRelation<'_>) -> VariabilityProfile {
    let traces = sub_relation.object_traces();
    let variants: BTreeSet<Vec<&str>> = traces
        .values()
        .map(|trace| trace.iter().map(|p| p.activity).collect())
        .collect();

    let instance_count = traces.len();
    let variant_count = variants.len();
    let complexity = if instance_count > 1 {
        (variant_count - 1) as f64 / (instance_count - 1) as f64
    } else {
        0.0
    };
    VariabilityProfile {
        instance_count,
        variant_count,
        complexity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_data::object_centric::relations::extract_relations;
    use crate::ocel;

    #[test]
    fn single_path_is_zero() {
        let ocel = ocel![
            events:
            ("A", ["x:1"]),
            ("A", ["x:2"]),
            ("B", ["x:1"]),
            ("B", ["x:2"]),
            o2o:
        ];
        let extraction = extract_relations(&ocel).unwrap();
        let profile = variability_profile(extraction.sub_relation("x").unwrap());
        assert_eq!(profile.instance_count, 2);
        assert_eq!(profile.variant_count, 1);
        assert_eq!(profile.complexity, 0.0);
    }

    #[test]
    fn all_different_is_one() {
        let ocel = ocel![
            events:
            ("A", ["x:1"]),
            ("B", ["x:2"]),
            ("A", ["x:3"]),
            ("C", ["x:3"]),
            o2o:
        ];
        let extraction = extract_relations(&ocel).unwrap();
        let profile = variability_profile(extraction.sub_relation("x").unwrap());
        assert_eq!(profile.variant_count, 3);
        assert_eq!(profile.complexity, 1.0);
    }

    #[test]
    fn partial_variability() {
        let ocel = ocel![
            events:
            ("A", ["x:1", "x:2", "x:3"]),
            ("B", ["x:1", "x:2"]),
            ("C", ["x:3"]),
            o2o:
        ];
        let extraction = extract_relations(&ocel).unwrap();
        let profile = variability_profile(extraction.sub_relation("x").unwrap());
        assert_eq!(profile.instance_count, 3);
        assert_eq!(profile.variant_count, 2);
        assert_eq!(profile.complexity, 0.5);
    }

    #[test]
    fn one_or_no_instances() {
        let mut ocel = ocel![
            events:
            ("A", ["y:1"]),
            o2o:
        ];
        ocel.object_types
            .push(crate::core::event_data::object_centric::OCELType::new("z"));
        let extraction = extract_relations(&ocel).unwrap();
        assert_eq!(
            variability_profile(extraction.sub_relation("y").unwrap()).complexity,
            0.0
        );
        assert_eq!(
            variability_profile(extraction.sub_relation("z").unwrap()),
            VariabilityProfile::default()
        );
    }
}
