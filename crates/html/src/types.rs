pub type NodeId = u32;

/// Arena index of a node within its [`Document`]. `Id(0)` is the document node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const DOCUMENT: Id = Id(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document {
        doctype: Option<String>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: Id,
    pub parent: Option<Id>,
    pub children: Vec<Id>,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn element_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[(String, Option<String>)] {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Value of the first attribute named `name` (ASCII case-insensitive).
    /// Bare attributes (`<input disabled>`) read as the empty string.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }
}

/// Arena-backed DOM with parent links.
///
/// Invariants:
/// - `nodes[i].id == Id(i)`; node 0 is the document and never has a parent.
/// - A node appears in exactly one parent's `children`, in document order.
/// - Only document and element nodes have children.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: Id::DOCUMENT,
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document { doctype: None },
            }],
        }
    }

    pub fn root(&self) -> Id {
        Id::DOCUMENT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// # Panics
    /// If `id` does not belong to this document.
    pub fn node(&self, id: Id) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.nodes[0].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    pub fn set_doctype(&mut self, value: String) {
        if let NodeKind::Document { doctype } = &mut self.nodes[0].kind {
            *doctype = Some(value);
        }
    }

    fn push(&mut self, parent: Id, kind: NodeKind) -> Id {
        debug_assert!(
            matches!(
                self.node(parent).kind,
                NodeKind::Document { .. } | NodeKind::Element { .. }
            ),
            "only document and element nodes can have children"
        );
        let id = Id(self.nodes.len() as NodeId);
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Appends an element; `name` is stored ASCII-lowercased.
    pub fn append_element(
        &mut self,
        parent: Id,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
    ) -> Id {
        self.push(
            parent,
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes,
            },
        )
    }

    pub fn append_text(&mut self, parent: Id, text: &str) -> Id {
        self.push(
            parent,
            NodeKind::Text {
                text: text.to_string(),
            },
        )
    }

    pub fn append_comment(&mut self, parent: Id, text: &str) -> Id {
        self.push(
            parent,
            NodeKind::Comment {
                text: text.to_string(),
            },
        )
    }

    pub fn is_element(&self, id: Id) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    pub fn element_name(&self, id: Id) -> Option<&str> {
        self.get(id).and_then(Node::element_name)
    }

    pub fn attribute(&self, id: Id, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.attribute(name))
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Parent if it is an element; `None` for the document element.
    pub fn parent_element(&self, id: Id) -> Option<Id> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// First element child of the document (normally `html`).
    pub fn document_element(&self) -> Option<Id> {
        self.element_children(Id::DOCUMENT).next()
    }

    /// 1-based position among element siblings.
    pub fn child_index(&self, id: Id) -> Option<usize> {
        let parent = self.parent(id)?;
        self.element_children(parent)
            .position(|c| c == id)
            .map(|i| i + 1)
    }

    /// 1-based position among element siblings with the same name.
    pub fn type_index(&self, id: Id) -> Option<usize> {
        let parent = self.parent(id)?;
        let name = self.element_name(id)?;
        self.element_children(parent)
            .filter(|&c| self.element_name(c) == Some(name))
            .position(|c| c == id)
            .map(|i| i + 1)
    }
}
