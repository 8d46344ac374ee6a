use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use super::relation_struct::{EventObjectRelation, RelationExtraction, SubRelation, UniversalRelation};
use crate::core::event_data::object_centric::ocel_struct::{OCELObject, OCEL};

/// The log misses required fields or references undefined objects/object types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedLogError {
    /// An event relates to an object ID not present in the object table
    #[error("event '{event_id}' references unknown object '{object_id}'")]
    UnknownObject {
        /// Referencing event
        event_id: String,
        /// Missing object
        object_id: String,
    },
    /// An object has a type that is not declared among the object types of the log
    #[error("object '{object_id}' has undeclared object type '{object_type}'")]
    UndeclaredObjectType {
        /// Object with the undeclared type
        object_id: String,
        /// The undeclared type
        object_type: String,
    },
    /// Two events share the same ID
    #[error("duplicate event id '{0}'")]
    DuplicateEventId(String),
    /// Two objects share the same ID
    #[error("duplicate object id '{0}'")]
    DuplicateObjectId(String),
    /// An event has no activity label
    #[error("event '{event_id}' has no activity label")]
    MissingActivity {
        /// Event without activity
        event_id: String,
    },
}

///
/// Extract the [`UniversalRelation`] of an [`OCEL`] and split it into one [`SubRelation`] per
/// object type
///
/// No event, object or relationship is filtered out. Events are ordered by timestamp; events with
/// equal timestamps keep their original order. An (event, object) pair listed several times
/// (e.g., with different qualifiers) is recorded once, with its first qualifier.
///
/// Every declared object type gets a [`SubRelation`], which is empty if the type has no events.
///
pub fn extract_relations(ocel: &OCEL) -> Result<RelationExtraction<'_>, MalformedLogError> {
    let declared_types: HashSet<&str> = ocel.object_type_names().collect();

    let mut objects: HashMap<&str, &OCELObject> = HashMap::with_capacity(ocel.objects.len());
    for ob in &ocel.objects {
        if !declared_types.contains(ob.object_type.as_str()) {
            return Err(MalformedLogError::UndeclaredObjectType {
                object_id: ob.id.clone(),
                object_type: ob.object_type.clone(),
            });
        }
        if objects.insert(ob.id.as_str(), ob).is_some() {
            return Err(MalformedLogError::DuplicateObjectId(ob.id.clone()));
        }
    }

    let mut event_ids: HashSet<&str> = HashSet::with_capacity(ocel.events.len());
    for ev in &ocel.events {
        if !event_ids.insert(ev.id.as_str()) {
            return Err(MalformedLogError::DuplicateEventId(ev.id.clone()));
        }
        if ev.event_type.is_empty() {
            return Err(MalformedLogError::MissingActivity {
                event_id: ev.id.clone(),
            });
        }
    }

    // Stable sort: equal timestamps keep their original position
    let mut order: Vec<usize> = (0..ocel.events.len()).collect();
    order.sort_by_key(|&i| ocel.events[i].time);

    let mut pairs = Vec::new();
    for position in order {
        let ev = &ocel.events[position];
        let mut seen: HashSet<&str> = HashSet::with_capacity(ev.relationships.len());
        for rel in &ev.relationships {
            let ob: &OCELObject = objects.get(rel.object_id.as_str()).copied().ok_or_else(|| {
                MalformedLogError::UnknownObject {
                    event_id: ev.id.clone(),
                    object_id: rel.object_id.clone(),
                }
            })?;
            if !seen.insert(ob.id.as_str()) {
                continue;
            }
            pairs.push(EventObjectRelation {
                event_id: &ev.id,
                activity: &ev.event_type,
                time: ev.time,
                event_position: position,
                object_id: &ob.id,
                object_type: &ob.object_type,
                qualifier: &rel.qualifier,
            });
        }
    }

    let universal = UniversalRelation::new(pairs, ocel.events.len());
    tracing::info!(
        pairs = universal.len(),
        events = universal.event_count(),
        "extracted universal event-object relation"
    );

    let mut sub_relations: BTreeMap<&str, SubRelation<'_>> = universal.split_by_object_type();
    for ot in ocel.object_type_names() {
        sub_relations
            .entry(ot)
            .or_insert_with(|| SubRelation::new(ot, Vec::new()));
    }
    for (ot, sub) in &sub_relations {
        tracing::debug!(object_type = *ot, pairs = sub.len(), "object type sub-relation");
    }

    Ok(RelationExtraction::new(universal, sub_relations))
}
