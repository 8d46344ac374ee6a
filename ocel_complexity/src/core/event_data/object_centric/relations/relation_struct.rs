use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// A single (event, object) pair of an OCEL
///
/// Borrows all labels from the underlying [`OCEL`](crate::core::OCEL), so relations are cheap to
/// copy and regroup.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EventObjectRelation<'a> {
    /// ID of the event
    pub event_id: &'a str,
    /// Activity label (event type) of the event
    pub activity: &'a str,
    /// Timestamp of the event
    pub time: DateTime<Utc>,
    /// Position of the event in the original event sequence of the log
    pub event_position: usize,
    /// ID of the related object
    pub object_id: &'a str,
    /// Type of the related object
    pub object_type: &'a str,
    /// Qualifier of the e2o relationship
    pub qualifier: &'a str,
}

///
/// All (event, object) pairs of a log
///
/// Pairs are ordered by event timestamp (ties keep the original event order); the pairs of one
/// event are adjacent and keep the order in which the event lists its relationships.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversalRelation<'a> {
    pairs: Vec<EventObjectRelation<'a>>,
    event_count: usize,
}

impl<'a> UniversalRelation<'a> {
    /// Pairs must already be grouped per event and ordered
    pub(crate) fn new(pairs: Vec<EventObjectRelation<'a>>, event_count: usize) -> Self {
        Self { pairs, event_count }
    }

    /// All pairs in order
    pub fn pairs(&self) -> &[EventObjectRelation<'a>] {
        &self.pairs
    }

    /// Iterate over all pairs in order
    pub fn iter(&self) -> std::slice::Iter<'_, EventObjectRelation<'a>> {
        self.pairs.iter()
    }

    /// Number of (event, object) pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs at all
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of events of the log the relation was extracted from
    ///
    /// Includes events without any related object.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// The pairs grouped per event, in event order
    ///
    /// Events without related objects do not appear.
    pub fn events(&self) -> impl Iterator<Item = &[EventObjectRelation<'a>]> {
        self.pairs
            .chunk_by(|a, b| a.event_position == b.event_position)
    }

    /// All object types occurring in the relation
    pub fn object_types(&self) -> BTreeSet<&'a str> {
        self.pairs.iter().map(|p| p.object_type).collect()
    }

    /// Split into one [`SubRelation`] per object type occurring in the relation
    ///
    /// Every pair ends up in exactly one [`SubRelation`] and the order of pairs is retained.
    pub fn split_by_object_type(&self) -> BTreeMap<&'a str, SubRelation<'a>> {
        let mut buckets: BTreeMap<&'a str, Vec<EventObjectRelation<'a>>> = BTreeMap::new();
        for pair in &self.pairs {
            buckets.entry(pair.object_type).or_default().push(*pair);
        }
        buckets
            .into_iter()
            .map(|(ot, pairs)| (ot, SubRelation::new(ot, pairs)))
            .collect()
    }
}

impl<'r, 'a> IntoIterator for &'r UniversalRelation<'a> {
    type Item = &'r EventObjectRelation<'a>;
    type IntoIter = std::slice::Iter<'r, EventObjectRelation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

///
/// The (event, object) pairs of a single object type
///
/// Retains the event ordering of the [`UniversalRelation`] it was split from.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubRelation<'a> {
    object_type: &'a str,
    pairs: Vec<EventObjectRelation<'a>>,
}

impl<'a> SubRelation<'a> {
    pub(crate) fn new(object_type: &'a str, pairs: Vec<EventObjectRelation<'a>>) -> Self {
        Self { object_type, pairs }
    }

    /// Object type all pairs belong to
    pub fn object_type(&self) -> &'a str {
        self.object_type
    }

    /// All pairs in order
    pub fn pairs(&self) -> &[EventObjectRelation<'a>] {
        &self.pairs
    }

    /// Iterate over all pairs in order
    pub fn iter(&self) -> std::slice::Iter<'_, EventObjectRelation<'a>> {
        self.pairs.iter()
    }

    /// Number of (event, object) pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the object type has no events
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The ordered pairs of every object instance, keyed by object ID
    ///
    /// Each trace is ordered by event timestamp, ties broken by the original event position.
    pub fn object_traces(&self) -> BTreeMap<&'a str, Vec<&EventObjectRelation<'a>>> {
        let mut traces: BTreeMap<&'a str, Vec<&EventObjectRelation<'a>>> = BTreeMap::new();
        for pair in &self.pairs {
            traces.entry(pair.object_id).or_default().push(pair);
        }
        traces
    }

    /// Number of distinct objects with at least one event
    pub fn instance_count(&self) -> usize {
        self.pairs
            .iter()
            .map(|p| p.object_id)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

///
/// The view of one object type on the whole log
///
/// Contains every pair (of any object type) of the events that involve the object type.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectTypePerspective<'a> {
    object_type: &'a str,
    relation: UniversalRelation<'a>,
}

impl<'a> ObjectTypePerspective<'a> {
    /// Object type this perspective is focused on
    pub fn object_type(&self) -> &'a str {
        self.object_type
    }

    /// All pairs of the events involving the focus object type
    pub fn relation(&self) -> &UniversalRelation<'a> {
        &self.relation
    }

    /// Number of pairs in this perspective
    pub fn len(&self) -> usize {
        self.relation.len()
    }

    /// Returns `true` if the focus object type has no events
    pub fn is_empty(&self) -> bool {
        self.relation.is_empty()
    }
}

///
/// Result of relation extraction: the [`UniversalRelation`] and one [`SubRelation`] per
/// object type declared in the log
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationExtraction<'a> {
    universal: UniversalRelation<'a>,
    sub_relations: BTreeMap<&'a str, SubRelation<'a>>,
}

impl<'a> RelationExtraction<'a> {
    pub(crate) fn new(
        universal: UniversalRelation<'a>,
        sub_relations: BTreeMap<&'a str, SubRelation<'a>>,
    ) -> Self {
        Self {
            universal,
            sub_relations,
        }
    }

    /// The universal relation
    pub fn universal(&self) -> &UniversalRelation<'a> {
        &self.universal
    }

    /// All sub-relations, keyed by object type
    pub fn sub_relations(&self) -> &BTreeMap<&'a str, SubRelation<'a>> {
        &self.sub_relations
    }

    /// The sub-relation of one object type
    pub fn sub_relation(&self, object_type: &str) -> Option<&SubRelation<'a>> {
        self.sub_relations.get(object_type)
    }

    /// All object types (sorted), including types without events
    pub fn object_types(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.sub_relations.keys().copied()
    }

    /// Check that the sub-relations partition the universal relation
    ///
    /// Each sub-relation must equal the universal relation restricted to its object type
    /// (same pairs, same order) and no pair may belong to a type without a sub-relation.
    pub fn is_complete(&self) -> bool {
        let total: usize = self.sub_relations.values().map(SubRelation::len).sum();
        if total != self.universal.len() {
            return false;
        }
        self.sub_relations.iter().all(|(ot, sub)| {
            self.universal
                .iter()
                .filter(|p| p.object_type == *ot)
                .eq(sub.iter())
        })
    }

    /// Build the [`ObjectTypePerspective`] of an object type
    ///
    /// Returns `None` if the object type is unknown.
    pub fn perspective(&self, object_type: &str) -> Option<ObjectTypePerspective<'a>> {
        let (&ot, _) = self.sub_relations.get_key_value(object_type)?;
        let event_groups: Vec<&[EventObjectRelation<'a>]> = self
            .universal
            .events()
            .filter(|ev| ev.iter().any(|p| p.object_type == ot))
            .collect();
        let event_count = event_groups.len();
        let pairs = event_groups.into_iter().flatten().copied().collect();
        Some(ObjectTypePerspective {
            object_type: ot,
            relation: UniversalRelation::new(pairs, event_count),
        })
    }

    /// Count the pairs per object type, per object type perspective and in total
    pub fn relation_counts(&self) -> RelationCounts {
        RelationCounts {
            total: self.universal.len(),
            per_object_type: self
                .sub_relations
                .iter()
                .map(|(ot, sub)| (ot.to_string(), sub.len()))
                .collect(),
            per_perspective: self
                .object_types()
                .filter_map(|ot| self.perspective(ot).map(|p| (ot.to_string(), p.len())))
                .collect(),
        }
    }
}

///
/// Number of (event, object) pairs of a log
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RelationCounts {
    /// Size of the universal relation
    pub total: usize,
    /// Size of the sub-relation of each object type
    pub per_object_type: BTreeMap<String, usize>,
    /// Size of the perspective of each object type (pairs of all types at its events)
    pub per_perspective: BTreeMap<String, usize>,
}
