use crate::collection::Document;
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Options applied when a snapshot is written out.
///
/// `indent` only changes how the JSON text is laid out: `None` writes the
/// whole collection on one line, `Some(n)` pretty-prints with `n` spaces per
/// level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub indent: Option<usize>,
}

impl SaveOptions {
    pub fn new() -> Self {
        SaveOptions::default()
    }

    pub fn with_indent(indent: usize) -> Self {
        SaveOptions {
            indent: Some(indent),
        }
    }
}

/// Serializes the collection as one JSON array.
pub(crate) fn encode(documents: &[Document], options: &SaveOptions) -> JsonDbResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let result = match options.indent {
        None => serde_json::to_writer(&mut buffer, documents),
        Some(width) => {
            let indent = " ".repeat(width);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            documents.serialize(&mut serializer)
        }
    };

    result.map_err(|e| {
        log::error!("Failed to encode documents: {}", e);
        JsonDbError::new(
            &format!("Failed to encode documents: {}", e),
            ErrorKind::EncodingError,
        )
    })?;
    Ok(buffer)
}

/// Parses a JSON array of mappings.
pub(crate) fn decode(content: &[u8]) -> JsonDbResult<Vec<Document>> {
    serde_json::from_slice::<Vec<Document>>(content).map_err(|e| {
        log::error!("Backing content is not a sequence of documents: {}", e);
        JsonDbError::new_with_cause(
            "Backing content is not a sequence of documents",
            ErrorKind::Corrupt,
            e.into(),
        )
    })
}

/// True when the content holds nothing but whitespace.
#[inline]
pub(crate) fn is_blank(content: &[u8]) -> bool {
    content.iter().all(u8::is_ascii_whitespace)
}
