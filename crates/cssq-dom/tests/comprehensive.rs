//! Comprehensive tests for cssq-dom
//!
//! Tree building, navigation and misuse.

use cssq_dom::{DomError, DomTree, NodeId};

#[test]
fn test_build_and_walk() {
    let mut dom = DomTree::new();
    let root = dom.root();
    let ul = dom.append_element(root, "ul", &[("id", "menu")]).unwrap();
    let a = dom.append_element(ul, "li", &[("class", "first")]).unwrap();
    dom.append_text(ul, "\n").unwrap();
    let b = dom.append_element(ul, "li", &[]).unwrap();
    dom.append_text(b, "Two").unwrap();

    assert_eq!(dom.tag_name(ul), Some("ul"));
    assert_eq!(dom.get_attribute(ul, "id"), Some("menu"));
    assert_eq!(dom.get_attribute(a, "class"), Some("first"));
    assert_eq!(dom.get_attribute(a, "never-seen"), None);

    assert_eq!(dom.children(ul).count(), 3);
    assert_eq!(dom.element_children(ul).collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(dom.next_element_sibling(a), Some(b));
    assert_eq!(dom.prev_element_sibling(b), Some(a));
    assert_eq!(dom.first_element_child(root), Some(ul));
    assert_eq!(dom.text_content(ul), "\nTwo");
}

#[test]
fn test_set_attribute_replaces() {
    let mut dom = DomTree::new();
    let el = dom.create_element("item").unwrap();
    dom.set_attribute(el, "class", "a").unwrap();
    dom.set_attribute(el, "class", "b").unwrap();
    assert_eq!(dom.get_attribute(el, "class"), Some("b"));
    assert_eq!(dom.get(el).and_then(|n| n.as_element()).map(|e| e.attrs.len()), Some(1));
}

#[test]
fn test_namespaced_element() {
    let mut dom = DomTree::new();
    let rect = dom.create_element_ns("http://www.w3.org/2000/svg", "rect").unwrap();
    assert_eq!(dom.tag_name(rect), Some("rect"));
    assert_eq!(dom.namespace(rect), Some("http://www.w3.org/2000/svg"));
    let plain = dom.create_element("rect").unwrap();
    assert_eq!(dom.namespace(plain), None);
}

#[test]
fn test_misuse_is_reported() {
    let mut dom = DomTree::new();
    let root = dom.root();
    let parent = dom.append_element(root, "p", &[]).unwrap();
    let text = dom.append_text(parent, "x").unwrap();
    let orphan = dom.create_element("q").unwrap();

    assert_eq!(
        dom.append_child(text, orphan),
        Err(DomError::InvalidNodeType("append_child parent"))
    );
    assert!(matches!(
        dom.append_child(root, parent),
        Err(DomError::HierarchyRequest(_))
    ));
    assert!(matches!(
        dom.append_child(parent, root),
        Err(DomError::HierarchyRequest(_))
    ));
    assert!(matches!(
        dom.set_attribute(text, "id", "t"),
        Err(DomError::InvalidNodeType(_))
    ));

    let missing = NodeId::NONE;
    assert_eq!(dom.append_child(missing, orphan), Err(DomError::NotFound(missing)));
}

#[test]
fn test_cycles_are_rejected() {
    let mut dom = DomTree::new();
    let outer = dom.create_element("outer").unwrap();
    let inner = dom.create_element("inner").unwrap();
    dom.append_child(outer, inner).unwrap();
    assert!(matches!(
        dom.append_child(inner, outer),
        Err(DomError::HierarchyRequest(_))
    ));
}
