use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::core::event_data::object_centric::relations::UniversalRelation;

///
/// Entanglement of object types through shared events
///
/// Only distinct object types at an event matter: relating more objects of a type that is
/// already present does not change any of the values.
///
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntanglementProfile {
    /// Events of the log, including events without related objects
    pub event_count: usize,
    /// Number of distinct type pairs co-occurring at an event, summed over all events
    pub type_pair_occurrences: usize,
    /// `type_pair_occurrences / event_count`
    pub complexity: f64,
    /// Per object type: average number of other object types at its events
    pub per_object_type: BTreeMap<String, f64>,
    /// Per (sorted) pair of object types: share of all events of the log involving both
    #[serde_as(as = "Vec<(_, _)>")]
    pub per_type_pair: BTreeMap<(String, String), f64>,
}

///
/// Compute the [`EntanglementProfile`] of a [`UniversalRelation`]
///
/// The global and the type pair values are relative to all events of the log
/// ([`UniversalRelation::event_count`]), so events without related objects dilute them. A log
/// without events results in a profile of zeros.
///
pub fn entanglement_profile(relation: &UniversalRelation<'_>) -> EntanglementProfile {
    let mut related_events = 0;
    let mut type_pair_occurrences = 0;
    // Per type: (events of the type, other types seen at those events)
    let mut type_totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    let mut pair_events: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for event in relation.events() {
        related_events += 1;
        let types: BTreeSet<&str> = event.iter().map(|p| p.object_type).collect();
        let k = types.len();
        type_pair_occurrences += k * (k - 1) / 2;
        for &ot in &types {
            let totals = type_totals.entry(ot).or_default();
            totals.0 += 1;
            totals.1 += k - 1;
        }
        // BTreeSet iteration is sorted, so every pair comes out as (smaller, larger)
        for (a, b) in types.iter().copied().tuple_combinations() {
            *pair_events.entry((a, b)).or_default() += 1;
        }
    }

    let event_count = relation.event_count().max(related_events);
    if event_count == 0 {
        return EntanglementProfile::default();
    }

    let events = event_count as f64;
    EntanglementProfile {
        event_count,
        type_pair_occurrences,
        complexity: type_pair_occurrences as f64 / events,
        per_object_type: type_totals
            .into_iter()
            .map(|(ot, (own, others))| (ot.to_string(), others as f64 / own as f64))
            .collect(),
        per_type_pair: pair_events
            .into_iter()
            .map(|((a, b), n)| ((a.to_string(), b.to_string()), n as f64 / events))
            .collect(),
    }
}
