use std::rc::Rc;

use domtree::{Document, DomError, Element, PropertyDescriptor};

// ============================================================================
// Live tree mutation
// ============================================================================

#[test]
fn test_query_result_is_a_snapshot() {
    let doc = Document::new();
    for _ in 0..3 {
        doc.append_child(&Element::div().class("foo")).unwrap();
    }

    let found = doc.query_selector_all(".foo").unwrap();
    assert_eq!(found.len(), 3);

    // Mutating while iterating the snapshot must not disturb the iteration.
    let mut visited = 0;
    for element in &found {
        visited += 1;
        doc.append_child(&Element::div().class("foo")).unwrap();
        element.remove();
    }
    assert_eq!(visited, 3);
    assert_eq!(doc.query_selector_all(".foo").unwrap().len(), 3);
}

#[test]
fn test_descendants_pre_order() {
    let root = Element::div()
        .id("a")
        .child(Element::div().id("b").child(Element::div().id("c")))
        .child(Element::div().id("d"));
    let order: Vec<_> = root
        .descendants()
        .iter()
        .filter_map(Element::get_id)
        .collect();
    assert_eq!(order, vec!["b", "c", "d"]);
}

#[test]
fn test_remove_detaches_from_document() {
    let doc = Document::new();
    let el = Element::div().id("gone");
    doc.append_child(&el).unwrap();
    assert!(doc.contains(&el));
    el.remove();
    assert!(!doc.contains(&el));
    assert!(el.parent().is_none());
    assert!(doc.get_element_by_id("gone").is_none());
}

// ============================================================================
// Upgrade marker accessors
// ============================================================================

#[test]
fn test_marker_tracks_instances() {
    let el = Element::div();
    assert!(el.upgraded_names().is_empty());

    assert!(el.begin_upgrade("Foo"));
    assert!(!el.is_upgraded("Foo"), "upgrading is not upgraded yet");
    el.complete_upgrade("Foo", Rc::new(String::from("foo instance")));

    assert!(el.is_upgraded("Foo"));
    assert_eq!(el.upgraded_names(), vec!["Foo"]);
    assert_eq!(
        el.instance_as::<String>("Foo").as_deref().map(String::as_str),
        Some("foo instance")
    );
    assert!(el.instance_as::<u32>("Foo").is_none());
    assert_eq!(el.marker().to_attribute_value(), ",Foo");
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_non_configurable_property_is_locked() {
    let el = Element::div();
    el.define_property(
        "locked",
        PropertyDescriptor::data(Rc::new(1i32)).configurable(false),
    )
    .unwrap();

    assert_eq!(
        el.define_property("locked", PropertyDescriptor::data(Rc::new(2i32))),
        Err(DomError::NotConfigurable("locked".into()))
    );
    assert_eq!(
        el.delete_property("locked"),
        Err(DomError::NotConfigurable("locked".into()))
    );
    // Still writable, though.
    el.set_property("locked", Rc::new(3i32)).unwrap();
    assert_eq!(el.property_as::<i32>("locked").as_deref(), Some(&3));
}

#[test]
fn test_delete_and_undefined_properties() {
    let el = Element::div();
    assert_eq!(el.delete_property("missing"), Ok(false));
    assert_eq!(
        el.set_property("missing", Rc::new(())),
        Err(DomError::Undefined("missing".into()))
    );
    el.define_property("x", PropertyDescriptor::hidden(Rc::new(()))).unwrap();
    assert_eq!(el.delete_property("x"), Ok(true));
    assert!(!el.has_property("x"));
}
