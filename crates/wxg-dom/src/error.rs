//! Error types for document reading.

use thiserror::Error;

/// Errors raised while turning XML text into a [`crate::Document`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML syntax error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Invalid UTF-8 in element or attribute name: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Closing tag </{found}> does not match open element <{expected}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("Closing tag </{0}> without a matching open element")]
    UnexpectedEnd(String),

    #[error("Element <{0}> is never closed")]
    Unclosed(String),

    #[error("Element <{0}> follows the root element")]
    MultipleRoots(String),

    #[error("Document has no root element")]
    Empty,
}
