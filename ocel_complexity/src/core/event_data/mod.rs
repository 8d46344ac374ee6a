/// Object-centric event data (OCEL 2.0) and its event-to-object relations
pub mod object_centric;
