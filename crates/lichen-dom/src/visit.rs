//! Pre-order traversal of the document tree.
//!
//! A consumer implements [`DomVisitor`] and overrides only the hooks it
//! needs; each hook is a no-op by default. Traversal is synchronous,
//! single-threaded, and read-only: a visitor that wants to change the
//! source text records span edits (see [`crate::edit`]) during the walk and
//! applies them afterwards.

use crate::{Attribute, DomTree, ElementData, NodeId, NodeKind, TextData};

/// The hooks a tree consumer can implement.
///
/// Dispatch order for an element: the element itself, then its attributes in
/// source order, then its children recursively. The document node itself is
/// never reported, only its children.
pub trait DomVisitor {
    /// Called for every element, before its attributes and children.
    fn visit_element(&mut self, _tree: &DomTree, _id: NodeId, _data: &ElementData) {}

    /// Called for every text run.
    fn visit_text(&mut self, _tree: &DomTree, _id: NodeId, _data: &TextData) {}

    /// Called for every attribute, right after its owning element.
    fn visit_attribute(&mut self, _tree: &DomTree, _owner: NodeId, _attribute: &Attribute) {}
}

impl DomTree {
    /// Walk the whole tree in pre-order, dispatching to the visitor's hooks.
    pub fn accept<V: DomVisitor + ?Sized>(&self, visitor: &mut V) {
        for &child in self.children(self.root()) {
            self.accept_node(child, visitor);
        }
    }

    fn accept_node<V: DomVisitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Document => {
                for &child in &node.children {
                    self.accept_node(child, visitor);
                }
            }
            NodeKind::Element(data) => {
                visitor.visit_element(self, id, data);
                for attribute in &data.attributes {
                    visitor.visit_attribute(self, id, attribute);
                }
                for &child in &node.children {
                    self.accept_node(child, visitor);
                }
            }
            NodeKind::Text(data) => visitor.visit_text(self, id, data),
        }
    }
}
