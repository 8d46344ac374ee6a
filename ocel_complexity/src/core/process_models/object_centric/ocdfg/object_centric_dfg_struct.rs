use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::dfg_struct::{DirectlyFollowsGraph, InvalidModelError};
use crate::core::io::{ExportError, Exportable};

///
/// An object-centric directly-follows graph containing a [`DirectlyFollowsGraph`] for each object
/// type involved.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OCDirectlyFollowsGraph<'a> {
    /// The DFG per object type
    pub object_type_to_dfg: BTreeMap<String, DirectlyFollowsGraph<'a>>,
}

impl<'a> OCDirectlyFollowsGraph<'a> {
    ///
    /// Create new [`OCDirectlyFollowsGraph`] with no object types and no [`DirectlyFollowsGraph`]s.
    ///
    pub fn new() -> Self {
        Self {
            object_type_to_dfg: BTreeMap::new(),
        }
    }

    /// The [`DirectlyFollowsGraph`] of an object type
    pub fn get(&self, object_type: &str) -> Option<&DirectlyFollowsGraph<'a>> {
        self.object_type_to_dfg.get(object_type)
    }

    /// Object types with a [`DirectlyFollowsGraph`] (sorted)
    pub fn object_types(&self) -> impl Iterator<Item = &str> {
        self.object_type_to_dfg.keys().map(String::as_str)
    }

    /// Check every per-type [`DirectlyFollowsGraph`] for dangling directly-follows relations
    pub fn validate(&self) -> Result<(), InvalidModelError> {
        self.object_type_to_dfg
            .values()
            .try_for_each(DirectlyFollowsGraph::validate)
    }

    ///
    /// Serialize to JSON string.
    ///
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Exportable for OCDirectlyFollowsGraph<'_> {
    type Error = ExportError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        match format {
            "json" => Ok(serde_json::to_writer_pretty(writer, self)?),
            _ => Err(ExportError::UnsupportedFormat(format.to_string())),
        }
    }
}
