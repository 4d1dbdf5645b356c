//! Build a [`Document`] from a `quick-xml` event stream.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocumentError;
use crate::tree::{Document, NodeId, NodeKind};

pub(crate) fn read(source: &str) -> Result<Document, DocumentError> {
    let mut reader = Reader::from_str(source);
    let mut doc = Document::new();
    // Open elements, innermost last. The document node is never popped.
    let mut stack: Vec<(NodeId, String)> = vec![(doc.root_id(), String::new())];

    loop {
        let event = reader.read_event().map_err(|source| DocumentError::Xml {
            position: reader.error_position(),
            source,
        })?;
        let parent = stack.last().map(|(id, _)| *id).unwrap_or_else(|| doc.root_id());

        match event {
            Event::Start(start) => {
                let (name, attributes) = element_parts(&start, reader.buffer_position())?;
                check_single_root(&doc, stack.len(), &name)?;
                let id = doc.append(
                    parent,
                    NodeKind::Element {
                        name: name.clone(),
                        attributes,
                    },
                );
                stack.push((id, name));
            }
            Event::Empty(start) => {
                let (name, attributes) = element_parts(&start, reader.buffer_position())?;
                check_single_root(&doc, stack.len(), &name)?;
                doc.append(parent, NodeKind::Element { name, attributes });
            }
            Event::End(end) => {
                let found = std::str::from_utf8(end.name().as_ref())?.to_string();
                if stack.len() == 1 {
                    return Err(DocumentError::UnexpectedEnd(found));
                }
                if let Some((_, expected)) = stack.pop() {
                    if expected != found {
                        return Err(DocumentError::MismatchedEnd { expected, found });
                    }
                }
            }
            Event::Text(text) => {
                // Whitespace between top-level markup has no element to belong to.
                if stack.len() > 1 {
                    let text = text.unescape().map_err(|source| DocumentError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    doc.append(parent, NodeKind::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                if stack.len() > 1 {
                    let text = std::str::from_utf8(&data)?.to_string();
                    doc.append(parent, NodeKind::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((_, name)) = stack.get(1) {
        return Err(DocumentError::Unclosed(name.clone()));
    }
    if doc.root_element().is_none() {
        return Err(DocumentError::Empty);
    }
    Ok(doc)
}

/// Only one element may open at document level.
fn check_single_root(doc: &Document, depth: usize, name: &str) -> Result<(), DocumentError> {
    if depth == 1 && doc.root_element().is_some() {
        return Err(DocumentError::MultipleRoots(name.to_string()));
    }
    Ok(())
}

fn element_parts(
    start: &BytesStart<'_>,
    position: u64,
) -> Result<(String, Vec<(String, String)>), DocumentError> {
    let xml_error = |source: quick_xml::Error| DocumentError::Xml { position, source };

    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| xml_error(quick_xml::Error::InvalidAttr(err)))?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value().map_err(xml_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}
