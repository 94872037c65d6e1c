//! Tests for the arena tree, spans, and span edits.

use lichen_dom::{
    Attribute, DomTree, EditSet, ElementData, NodeId, NodeKind, Span, TextData,
};

/// Builds the tree for `<a>hi</a>` by hand, with real offsets.
fn small_tree() -> (&'static str, DomTree, NodeId, NodeId) {
    let source = "<a>hi</a>";
    let mut tree = DomTree::new();
    let a = tree.alloc(NodeKind::Element(ElementData {
        tag_name: "a".to_string(),
        open_span: Span::new(0, 1),
        name_span: Span::new(1, 2),
        attributes: Vec::new(),
        close_span: Span::new(2, 3),
        close_tag_span: None,
    }));
    tree.append_child(NodeId::ROOT, a);
    let text = tree.alloc(NodeKind::Text(TextData {
        text: "hi".to_string(),
        span: Span::new(3, 5),
    }));
    tree.append_child(a, text);
    tree.complete_element(a, Span::new(5, 9));
    (source, tree, a, text)
}

#[test]
fn test_span_helpers() {
    let span = Span::new(3, 5);
    assert_eq!(span.len(), 2);
    assert!(!span.is_empty());
    assert_eq!(span.slice("<a>hi</a>"), "hi");
    assert!(Span::new(4, 4).is_empty());
}

#[test]
fn test_two_phase_element_completion() {
    let (source, tree, a, _) = small_tree();
    let element = tree.as_element(a).expect("element");
    // Before completion the span would end at the open tag's `>`; the close
    // tag recorded afterwards extends it over the whole construct.
    assert_eq!(element.close_tag_span, Some(Span::new(5, 9)));
    assert_eq!(element.span().slice(source), source);
}

#[test]
fn test_parent_and_children_links() {
    let (_, tree, a, text) = small_tree();
    assert_eq!(tree.parent(a), Some(NodeId::ROOT));
    assert_eq!(tree.parent_element(a), None);
    assert_eq!(tree.parent_element(text), Some(a));
    assert_eq!(tree.children(a), &[text]);
    assert_eq!(tree.child_elements(NodeId::ROOT), vec![a]);
    assert!(tree.child_elements(a).is_empty());
}

#[test]
fn test_trimmed_text() {
    let (_, tree, a, _) = small_tree();
    assert_eq!(tree.trimmed_text(a), Some("hi"));
    // The document's only child is an element, not text: no content.
    assert_eq!(tree.trimmed_text(NodeId::ROOT), None);

    let mut tree = DomTree::new();
    let text_a = tree.alloc(NodeKind::Text(TextData {
        text: "x".to_string(),
        span: Span::new(0, 1),
    }));
    let text_b = tree.alloc(NodeKind::Text(TextData {
        text: "y".to_string(),
        span: Span::new(1, 2),
    }));
    tree.append_child(NodeId::ROOT, text_a);
    tree.append_child(NodeId::ROOT, text_b);
    assert_eq!(tree.trimmed_text(NodeId::ROOT), None);
}

#[test]
fn test_empty_document_has_no_span() {
    let tree = DomTree::new();
    assert_eq!(tree.span(NodeId::ROOT), None);
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
}

#[test]
fn test_attribute_value_strips_quotes() {
    let attribute = Attribute {
        name: "x".to_string(),
        name_span: Span::new(3, 4),
        raw_value: Some("\"123\"".to_string()),
        value_span: Some(Span::new(5, 10)),
    };
    assert_eq!(attribute.value(), Some("123"));
    assert_eq!(attribute.span(), Span::new(3, 10));

    let bare = Attribute {
        name: "hidden".to_string(),
        name_span: Span::new(3, 9),
        raw_value: None,
        value_span: None,
    };
    assert_eq!(bare.value(), None);
    assert_eq!(bare.span(), Span::new(3, 9));
}

#[test]
fn test_edit_set_applies_descending() {
    let source = "abcdef";
    let mut edits = EditSet::new();
    assert!(edits.is_empty());
    // Pushed in ascending order; apply sorts descending so both spans stay
    // valid against the original offsets.
    edits.replace(Span::new(0, 2), "X");
    edits.replace(Span::new(4, 6), "YZQ");
    assert_eq!(edits.apply(source), "XcdYZQ");
}

#[test]
fn test_empty_edit_set_is_identity() {
    let source = "unchanged <x/>";
    assert_eq!(EditSet::new().apply(source), source);
}
