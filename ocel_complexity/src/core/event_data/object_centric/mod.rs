//! OCEL 2.0 data structures, import and event-to-object relations

/// IO implementations for [`OCEL`]
pub mod io;
/// Macros for the creation of [`OCEL`]
pub mod macros;
/// OCEL 2.0 struct and sub-structs
pub mod ocel_struct;
/// Universal and object-type-wise event-to-object relations
pub mod relations;

#[doc(inline)]
pub use ocel_struct::{
    OCELAttributeValue, OCELEvent, OCELEventAttribute, OCELObject, OCELObjectAttribute,
    OCELRelationship, OCELType, OCELTypeAttribute, OCEL,
};
