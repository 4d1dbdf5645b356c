//! Arena-backed element tree and the query interface used by the generator.

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    /// The document itself; parent of the root element.
    Root,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed document. Nodes are stored in document order.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// The document node. Its only element child is the root element.
    pub fn root(&self) -> Node<'_> {
        Node {
            doc: self,
            id: self.root_id(),
        }
    }

    /// The outermost element, if the document has one.
    pub fn root_element(&self) -> Option<Node<'_>> {
        self.root().elements().next()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { doc: self, id }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A borrowed handle to one node of a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name for elements, `None` for the document and text nodes.
    pub fn tag_name(&self) -> Option<&'a str> {
        match &self.doc.data(self.id).kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.tag_name().is_some()
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.doc.data(self.id).parent.map(|id| self.doc.node(id))
    }

    /// Value of an attribute; `None` when absent.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        match &self.doc.data(self.id).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// All direct child nodes, text included.
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id).children.iter().map(move |&id| doc.node(id))
    }

    /// Direct child elements of any name.
    pub fn elements(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.children().filter(|node| node.is_element())
    }

    /// Direct child elements with the given tag name, in document order.
    pub fn child_elements<'t>(&self, tag: &'t str) -> impl Iterator<Item = Node<'a>> + 't
    where
        'a: 't,
    {
        self.children().filter(move |node| node.tag_name() == Some(tag))
    }

    /// Concatenated text of this node's direct text children.
    pub fn text(&self) -> String {
        self.children()
            .filter_map(|node| match &node.doc.data(node.id).kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text of every direct child element named `tag`, concatenated.
    ///
    /// Returns `None` when no such element exists, so callers can tell an
    /// absent element from an empty one.
    pub fn child_element_text(&self, tag: &str) -> Option<String> {
        let mut found = false;
        let mut text = String::new();
        for element in self.child_elements(tag) {
            found = true;
            text.push_str(&element.text());
        }
        found.then_some(text)
    }

    /// Elements reached by following a slash-separated path from this node.
    ///
    /// Each segment selects direct child elements by name; `..` steps to the
    /// parent and `.` stays in place. Empty segments are ignored.
    pub fn descendants_by_path(&self, path: &str) -> Vec<Node<'a>> {
        let mut current = vec![*self];
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            current = match segment {
                "." => current,
                ".." => current.iter().filter_map(|node| node.parent()).collect(),
                name => current
                    .iter()
                    .flat_map(|node| {
                        node.children()
                            .filter(|child| child.tag_name() == Some(name))
                            .collect::<Vec<_>>()
                    })
                    .collect(),
            };
        }
        current
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.doc.data(self.id).kind {
            NodeKind::Root => write!(f, "Document"),
            NodeKind::Element { name, attributes } => {
                write!(f, "<{}", name)?;
                for (key, value) in attributes {
                    write!(f, " {}={:?}", key, value)?;
                }
                write!(f, ">")
            }
            NodeKind::Text(text) => write!(f, "Text({:?})", text),
        }
    }
}
