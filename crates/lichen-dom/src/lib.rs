//! Offset-annotated document tree for source-faithful rewriting.
//!
//! Every node in the tree carries the exact byte span it occupies in the
//! original source text, so a consumer can slice the source with any node's
//! span and splice replacements back in without disturbing a single byte of
//! the surrounding document.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships. The parent link on a node is a plain index into the arena,
//! never an owning reference, so the child/parent cycle that a naive pointer
//! translation would create simply does not exist here.
//!
//! Nodes are built once by a parser and are not meant to be mutated
//! afterwards; the only deferred field is an element's close-tag span, set
//! once through [`DomTree::complete_element`] while the element's subtree is
//! being parsed.

pub mod edit;
pub mod visit;

pub use edit::{EditSet, SpanEdit};
pub use visit::DomVisitor;

/// A half-open `(start, end)` byte range into the original source text.
///
/// `end` is exclusive. For every span handed out by the tree,
/// `0 <= start <= end <= source.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first byte of the construct.
    pub start: usize,
    /// Byte offset one past the last byte of the construct.
    pub end: usize,
}

impl Span {
    /// Create a span from a start and an exclusive end offset.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Slice the original source text with this span.
    ///
    /// # Panics
    ///
    /// Panics if the span does not lie within `source` on character
    /// boundaries, which only happens when the span came from a different
    /// source text than the one passed in.
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}

/// A type-safe index into the document tree arena.
///
/// `NodeId` provides O(1) access to any node without borrowing issues; all
/// parent/child relationships are expressed through these indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A single node in the tree: its variant data plus its arena links.
#[derive(Debug, Clone)]
pub struct Node {
    /// Which kind of node this is, with the kind-specific data.
    pub kind: NodeKind,
    /// Non-owning back-reference to the parent node, `None` for the document.
    pub parent: Option<NodeId>,
    /// Children in source order; sibling spans are non-overlapping and
    /// monotonically increasing in start offset.
    pub children: Vec<NodeId>,
}

/// The closed set of node variants.
///
/// Comments, doctypes, and preambles are lexed but never become tree nodes;
/// attributes hang off their owning element rather than appearing here.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document root. Owns the top-level elements and text runs.
    Document,
    /// An element with its tag, attributes, and child list.
    Element(ElementData),
    /// A raw text run between tags.
    Text(TextData),
}

/// Element-specific data, all offsets pointing into the original source.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The tag name exactly as written in the open tag.
    pub tag_name: String,
    /// Span of the open tag's `<` token.
    pub open_span: Span,
    /// Span of the tag name inside the open tag.
    pub name_span: Span,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Span of the token that closed the open tag: `>` or `/>`.
    pub close_span: Span,
    /// Span of the matching `</name>` close tag, set once during parsing.
    /// `None` for void and self-closing elements.
    pub close_tag_span: Option<Span>,
}

impl ElementData {
    /// The full span of the element: open tag through close tag, or through
    /// the open tag's own closing token when there is no close tag.
    #[must_use]
    pub fn span(&self) -> Span {
        let end = self
            .close_tag_span
            .map_or(self.close_span.end, |close_tag| close_tag.end);
        Span::new(self.open_span.start, end)
    }

    /// Look up an attribute value by name, in source order.
    ///
    /// Returns `None` when the attribute is absent or has no value
    /// (boolean-attribute form).
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .and_then(Attribute::value)
    }
}

/// A raw text run with its exact source span.
#[derive(Debug, Clone)]
pub struct TextData {
    /// The text exactly as it appears in the source, whitespace included.
    pub text: String,
    /// Byte span of the run.
    pub span: Span,
}

impl TextData {
    /// A whitespace-trimmed view of the text. The stored text and span are
    /// left untouched.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// An attribute on an element: a name and an optional quoted value.
///
/// Attributes are enumerated from their owning element; they are not tree
/// nodes and carry no parent link.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// The attribute name exactly as written.
    pub name: String,
    /// Byte span of the name.
    pub name_span: Span,
    /// The raw value including both surrounding quote characters, or `None`
    /// for a valueless attribute.
    pub raw_value: Option<String>,
    /// Byte span of the raw value, quotes included.
    pub value_span: Option<Span>,
}

impl Attribute {
    /// The attribute value with the surrounding quotes stripped, or `None`
    /// for a valueless attribute.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.raw_value.as_deref().map(|raw| &raw[1..raw.len() - 1])
    }

    /// The span from the start of the name through the end of the value, or
    /// just the name for a valueless attribute.
    #[must_use]
    pub fn span(&self) -> Span {
        let end = self.value_span.map_or(self.name_span.end, |value| value.end);
        Span::new(self.name_span.start, end)
    }
}

/// Arena-based document tree with O(1) node access.
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]; the document
/// node is always at index 0. A parser allocates nodes with [`DomTree::alloc`]
/// and wires them up with [`DomTree::append_child`]; consumers treat the
/// finished tree as read-only.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing just the document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        DomTree {
            nodes: vec![document],
        }
    }

    /// The root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree, the document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is created with the tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID. The node is not yet attached
    /// to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`, setting the child's
    /// parent back-reference.
    ///
    /// # Panics
    ///
    /// Panics if either ID was not allocated from this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Record an element's close-tag span. This is the second step of the
    /// element's two-phase construction and is called exactly once by the
    /// parser after the element's subtree has been parsed.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to an element node.
    pub fn complete_element(&mut self, id: NodeId, close_tag: Span) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(data) => data.close_tag_span = Some(close_tag),
            _ => panic!("complete_element called on a non-element node"),
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Get the parent of a node when that parent is an element; `None` for
    /// document-level nodes, whose parent is the document itself.
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.as_element(parent).map(|_| parent)
    }

    /// All children of a node, in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Only the element children of a node, in source order.
    #[must_use]
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.as_element(child).is_some())
            .collect()
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|node| match &node.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text data if this node is a text run.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&TextData> {
        self.get(id).and_then(|node| match &node.kind {
            NodeKind::Text(data) => Some(data),
            _ => None,
        })
    }

    /// The tag name if this node is an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|data| data.tag_name.as_str())
    }

    /// Look up an attribute value on an element by name.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|data| data.attribute(name))
    }

    /// The trimmed content of an element whose only child is a text run.
    ///
    /// Returns `None` when the node has no children, more than one child, or
    /// a sole child that is not text.
    #[must_use]
    pub fn trimmed_text(&self, id: NodeId) -> Option<&str> {
        match self.children(id) {
            [only] => self.as_text(*only).map(TextData::trimmed),
            _ => None,
        }
    }

    /// The byte span a node occupies in the original source.
    ///
    /// For the document node the span is derived from its first and last
    /// children, so an empty document has no span and this returns `None`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Option<Span> {
        match &self.get(id)?.kind {
            NodeKind::Document => {
                let children = self.children(id);
                let first = self.span(*children.first()?)?;
                let last = self.span(*children.last()?)?;
                Some(Span::new(first.start, last.end))
            }
            NodeKind::Element(data) => Some(data.span()),
            NodeKind::Text(data) => Some(data.span),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
