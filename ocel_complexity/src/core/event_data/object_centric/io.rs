//! IO implementations for OCEL
//!
//! Only the OCEL 2.0 JSON shape is supported; other encodings are left to dedicated importers.

use std::io::{Read, Write};

use thiserror::Error;

use crate::core::event_data::object_centric::OCEL;
use crate::core::io::{Exportable, Importable};

/// Error type for OCEL IO operations
#[derive(Debug, Error)]
pub enum OCELIOError {
    /// IO Error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON Parsing Error (including missing or malformed timestamps)
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// Unsupported Format
    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

fn is_json_format(format: &str) -> bool {
    format == "json" || format.ends_with(".json") || format.ends_with("jsonocel")
}

impl Importable for OCEL {
    type Error = OCELIOError;

    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error> {
        if is_json_format(format) {
            let reader = std::io::BufReader::new(reader);
            let ocel: OCEL = serde_json::from_reader(reader)?;
            tracing::debug!(
                events = ocel.events.len(),
                objects = ocel.objects.len(),
                "imported OCEL"
            );
            Ok(ocel)
        } else {
            Err(OCELIOError::UnsupportedFormat(format.to_string()))
        }
    }
}

impl Exportable for OCEL {
    type Error = OCELIOError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        if is_json_format(format) {
            serde_json::to_writer(writer, self)?;
            Ok(())
        } else {
            Err(OCELIOError::UnsupportedFormat(format.to_string()))
        }
    }
}
