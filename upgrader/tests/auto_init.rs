use std::cell::{Cell, RefCell};
use std::rc::Rc;

use domtree::{Document, Element};
use upgrader::{
    AutoInit, AutoInitConfig, Component, ComponentError, ComponentHandler, Registration,
    UpgradeError, constructor_of,
};

thread_local! {
    static ATTACHED: Cell<usize> = const { Cell::new(0) };
}

struct Ripple {
    unbounded: bool,
}

impl Component for Ripple {
    fn attach_to(element: &Element) -> Result<Self, ComponentError> {
        ATTACHED.with(|n| n.set(n.get() + 1));
        Ok(Self {
            unbounded: element.has_attribute("data-mdc-ripple-is-unbounded"),
        })
    }
}

fn attached() -> usize {
    ATTACHED.with(Cell::get)
}

fn page(markers: &[&str]) -> (Document, Vec<Element>) {
    let doc = Document::new();
    let elements: Vec<Element> = markers
        .iter()
        .map(|marker| Element::div().attr("data-mdc-auto-init", *marker))
        .collect();
    for el in &elements {
        doc.append_child(el).unwrap();
    }
    (doc, elements)
}

fn collecting_warn() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str)) {
    let warnings = Rc::new(RefCell::new(Vec::new()));
    let sink = warnings.clone();
    (warnings, move |message: &str| sink.borrow_mut().push(message.to_string()))
}

// ============================================================================
// Discovery and exposure
// ============================================================================

#[test]
fn test_auto_init_exposes_hidden_property() {
    let (doc, elements) = page(&["MDCRipple"]);
    elements[0].set_attribute("data-mdc-ripple-is-unbounded", "");
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");

    let report = auto_init.auto_init(doc.root(), None).unwrap();

    assert_eq!(report.created_count(), 1);
    let el = &elements[0];
    let ripple = el.property_as::<Ripple>("MDCRipple").unwrap();
    assert!(ripple.unbounded);

    let descriptor = el.property_descriptor("MDCRipple").unwrap();
    assert!(!descriptor.enumerable);
    assert!(!descriptor.writable);
    assert!(descriptor.configurable);
    assert!(el.property_names().is_empty());
}

#[test]
fn test_auto_init_ignores_unmarked_elements() {
    let (doc, _) = page(&["MDCRipple"]);
    doc.append_child(&Element::div().class("mdc-ripple")).unwrap();
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");

    let report = auto_init.auto_init(doc.root(), None).unwrap();
    assert_eq!(report.created_count(), 1);
}

#[test]
fn test_custom_marker_attribute() {
    let doc = Document::new();
    let el = Element::div().attr("data-auto", "MDCRipple");
    doc.append_child(&el).unwrap();
    let auto_init = AutoInit::with_config(AutoInitConfig::new().marker_attribute("data-auto"));
    auto_init.register_component::<Ripple>("MDCRipple");

    auto_init.auto_init(doc.root(), None).unwrap();
    assert!(el.has_property("MDCRipple"));
}

// ============================================================================
// Double initialization
// ============================================================================

#[test]
fn test_second_pass_warns_instead_of_reinitializing() {
    let (doc, elements) = page(&["MDCRipple", "MDCRipple"]);
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");
    let (warnings, warn) = collecting_warn();
    let before = attached();

    let first = auto_init.auto_init(doc.root(), Some(&warn)).unwrap();
    let second = auto_init.auto_init(doc.root(), Some(&warn)).unwrap();

    assert_eq!(first.created_count(), 2);
    assert_eq!(second.created_count(), 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(attached() - before, 2);

    let warnings = warnings.borrow();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.contains("already initialized")));
    assert!(warnings[0].contains(&elements[0].to_string()));
}

#[test]
fn test_configured_warn_channel_is_the_default() {
    let (doc, _) = page(&["MDCRipple"]);
    let (warnings, warn) = collecting_warn();
    let auto_init = AutoInit::new().with_warn(warn);
    auto_init.register_component::<Ripple>("MDCRipple");

    auto_init.auto_init(doc.root(), None).unwrap();
    auto_init.auto_init(doc.root(), None).unwrap();
    assert_eq!(warnings.borrow().len(), 1);
}

#[test]
fn test_handler_widget_property_counts_as_initialized() {
    let (doc, elements) = page(&["MDCRipple"]);
    elements[0].add_class("mdc-ripple");
    let handler = ComponentHandler::new(doc.clone());
    handler
        .register(Registration::new("MDCRipple", constructor_of::<Ripple>()).selector(".mdc-ripple"))
        .unwrap();

    let (warnings, warn) = collecting_warn();
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");
    let before = attached();

    let report = auto_init.auto_init(doc.root(), Some(&warn)).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(attached(), before);
    assert_eq!(warnings.borrow().len(), 1);
    assert!(elements[0].property_names().contains(&"MDCRipple".to_string()));
}

#[test]
fn test_handler_without_widget_leaves_auto_init_alone() {
    let (doc, elements) = page(&["MDCRipple"]);
    elements[0].add_class("mdc-ripple");
    let handler = ComponentHandler::new(doc.clone());
    handler
        .register(
            Registration::new("MDCRipple", constructor_of::<Ripple>())
                .selector(".mdc-ripple")
                .widget(false),
        )
        .unwrap();
    assert!(elements[0].is_upgraded("MDCRipple"));

    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");
    let report = auto_init.auto_init(doc.root(), None).unwrap();
    assert_eq!(report.created_count(), 1);
    assert!(elements[0].property_names().is_empty());
}

// ============================================================================
// Fatal configuration errors
// ============================================================================

#[test]
fn test_empty_marker_aborts_the_pass() {
    let (doc, elements) = page(&[""]);
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");
    let before = attached();

    let err = auto_init.auto_init(doc.root(), None).unwrap_err();
    assert_eq!(attached(), before);

    assert!(matches!(err, UpgradeError::MissingConstructorName { .. }));
    assert_eq!(err.to_string(), "(auto-init) Constructor name must be given.");
    assert!(elements[0].property_names().is_empty());
    assert!(!elements[0].has_property(""));
}

#[test]
fn test_unknown_name_aborts_after_earlier_elements() {
    let (doc, elements) = page(&["MDCRipple", "MDCTextField", "MDCRipple"]);
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");

    let err = auto_init.auto_init(doc.root(), None).unwrap_err();

    assert!(matches!(&err, UpgradeError::ConstructorNotFound { name } if name == "MDCTextField"));
    assert_eq!(
        err.to_string(),
        "(auto-init) Could not find constructor in registry for MDCTextField"
    );
    assert!(elements[0].has_property("MDCRipple"));
    assert!(!elements[2].has_property("MDCRipple"));
}

#[test]
fn test_constructor_failure_propagates() {
    struct Broken;

    impl Component for Broken {
        fn attach_to(_element: &Element) -> Result<Self, ComponentError> {
            Err(ComponentError::new("no surface"))
        }
    }

    let (doc, elements) = page(&["Broken"]);
    let auto_init = AutoInit::new();
    auto_init.register_component::<Broken>("Broken");

    let err = auto_init.auto_init(doc.root(), None).unwrap_err();
    assert!(matches!(err, UpgradeError::Constructor(_)));
    assert!(!elements[0].has_property("Broken"));
}

// ============================================================================
// Registry management
// ============================================================================

#[test]
fn test_deregister_keeps_existing_instances() {
    let (doc, elements) = page(&["MDCRipple"]);
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("MDCRipple");
    auto_init.auto_init(doc.root(), None).unwrap();

    assert!(auto_init.deregister("MDCRipple"));
    assert!(!auto_init.deregister("MDCRipple"));
    assert!(!auto_init.is_registered("MDCRipple"));
    assert!(elements[0].has_property("MDCRipple"));

    let err = auto_init.auto_init(doc.root(), None).unwrap_err();
    assert!(matches!(err, UpgradeError::ConstructorNotFound { .. }));
}

#[test]
fn test_deregister_all() {
    let auto_init = AutoInit::new();
    auto_init.register_component::<Ripple>("A");
    auto_init.register_component::<Ripple>("B");
    auto_init.deregister_all();
    assert!(!auto_init.is_registered("A"));
    assert!(!auto_init.is_registered("B"));
}

#[test]
fn test_override_is_warned() {
    let (warnings, warn) = collecting_warn();
    let auto_init = AutoInit::new().with_warn(warn);
    auto_init.register_component::<Ripple>("MDCRipple");
    assert!(warnings.borrow().is_empty());
    auto_init.register_component::<Ripple>("MDCRipple");
    assert_eq!(
        *warnings.borrow(),
        vec!["(auto-init) Overriding registration for MDCRipple"]
    );
}
