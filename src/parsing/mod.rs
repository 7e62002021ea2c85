//! Parser for HTML documents

use std::path::Path;
use tracing::debug;

use crate::language::{Document, LoadingError};

pub mod parser;
mod scope;

pub use parser::ParseError;

/// Read a file and return an owned String. We pass that ownership back to the
/// main function so that the Document object created by parse() below can
/// have the same lifetime.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                std::io::ErrorKind::InvalidData => Err(LoadingError {
                    problem: "Not UTF-8 text".to_string(),
                    details: "the file could not be decoded as UTF-8".to_string(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a Document. Malformed markup is recovered from; the
/// error case is reserved for input that cannot be treated as markup at all.
pub fn parse(content: &str) -> Result<Document<'_>, ParseError> {
    let result = parser::parse_document(content);

    match result {
        Ok(document) => {
            debug!(
                "Found {} node{} ({} at top level)",
                document.count,
                if document.count == 1 { "" } else { "s" },
                document
                    .children
                    .len()
            );
            Ok(document)
        }
        Err(error) => {
            debug!(?error);
            Err(error)
        }
    }
}
