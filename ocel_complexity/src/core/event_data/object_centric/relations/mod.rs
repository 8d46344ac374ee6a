//! Event-to-object relations of an [`OCEL`]
//!
//! The [`UniversalRelation`] holds every (event, object) pair of a log, ordered by event
//! timestamp. It is split, without filtering anything, into one [`SubRelation`] per object type.
//!
//! [`OCEL`]: crate::core::OCEL

/// Extraction of the universal relation and its object-type-wise split
pub mod extract;
/// [`UniversalRelation`], [`SubRelation`] and related structs
pub mod relation_struct;

#[doc(inline)]
pub use extract::{extract_relations, MalformedLogError};

#[doc(inline)]
pub use relation_struct::{
    EventObjectRelation, ObjectTypePerspective, RelationCounts, RelationExtraction, SubRelation,
    UniversalRelation,
};
