//! Read-only element tree for wxGlade documents.
//!
//! This crate provides the small query surface the code generator needs:
//! - Parsing XML text into an arena-backed [`Document`]
//! - Child element iteration by tag name
//! - Element text and attribute lookup
//! - Path-addressed search (`../tabs/tab`) relative to a node

mod error;
mod reader;
mod tree;

pub use error::DocumentError;
pub use tree::{Document, Node, NodeId};

/// Parse a document from XML source text.
///
/// # Example
///
/// ```
/// let doc = wxg_dom::parse_document(r#"<application><object name="frame"/></application>"#)?;
/// let app = doc.root().child_elements("application").next().unwrap();
/// assert_eq!(app.child_elements("object").count(), 1);
/// # Ok::<(), wxg_dom::DocumentError>(())
/// ```
pub fn parse_document(source: &str) -> Result<Document, DocumentError> {
    reader::read(source)
}
