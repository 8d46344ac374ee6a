//! Core modules for object-centric complexity analysis

pub use chrono;
/// Event data structs
pub mod event_data;

/// IO Traits
pub mod io;

/// Process model structs
pub mod process_models;

pub use event_data::object_centric::OCEL;
