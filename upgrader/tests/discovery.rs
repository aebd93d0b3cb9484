use domtree::{Document, Element};
use upgrader::{
    AutoInit, Component, ComponentError, ComponentHandler, InventoryScope, component,
    registered_components,
};

#[component(selector = ".mdl-js-button")]
struct MaterialButton {
    disabled: bool,
}

impl Component for MaterialButton {
    fn attach_to(element: &Element) -> Result<Self, ComponentError> {
        Ok(Self {
            disabled: element.has_attribute("disabled"),
        })
    }
}

#[component(name = "MaterialRipple", selector = ".mdl-js-ripple-effect", widget = false)]
struct Ripple;

impl Component for Ripple {
    fn attach_to(_element: &Element) -> Result<Self, ComponentError> {
        Ok(Self)
    }
}

#[component(name = "MDCSwitch")]
struct Switch;

impl Component for Switch {
    fn attach_to(element: &Element) -> Result<Self, ComponentError> {
        element.add_class("mdc-switch--upgraded");
        Ok(Self)
    }
}

// ============================================================================
// Static registration
// ============================================================================

#[test]
fn test_components_are_submitted() {
    let names: Vec<_> = registered_components().map(|r| r.name).collect();
    assert!(names.contains(&"MaterialButton"));
    assert!(names.contains(&"MaterialRipple"));
    assert!(names.contains(&"MDCSwitch"));

    let ripple = registered_components()
        .find(|r| r.name == "MaterialRipple")
        .unwrap();
    assert_eq!(ripple.selector, Some(".mdl-js-ripple-effect"));
    assert!(!ripple.widget);
}

#[test]
fn test_register_discovered_upgrades_existing_markup() {
    let doc = Document::new();
    let button = Element::button()
        .class("mdl-js-button mdl-js-ripple-effect")
        .attr("disabled", "");
    doc.append_child(&button).unwrap();

    let handler = ComponentHandler::new(doc.clone());
    let report = handler.register_discovered().unwrap();

    assert_eq!(report.upgraded_count(), 2);
    assert!(button.instance_as::<MaterialButton>("MaterialButton").unwrap().disabled);
    assert!(button.is_upgraded("MaterialRipple"));
    assert!(button.has_property("MaterialButton"));
    assert!(!button.has_property("MaterialRipple"));

    let mut marked = button.upgraded_names();
    marked.sort();
    assert_eq!(marked, vec!["MaterialButton", "MaterialRipple"]);
}

#[test]
fn test_inventory_scope_catches_unregistered_components() {
    let doc = Document::new();
    let el = Element::div();
    doc.append_child(&el).unwrap();

    let handler = ComponentHandler::new(doc.clone());
    assert!(handler.upgrade_one(&el, "MDCSwitch").unwrap().instance().is_none());

    handler.set_fallback_scope(InventoryScope);
    assert!(handler.upgrade_one(&el, "MDCSwitch").unwrap().is_upgraded());
    assert!(el.has_class("mdc-switch--upgraded"));
}

#[test]
fn test_auto_init_uses_discovered_components() {
    let doc = Document::new();
    let el = Element::div().attr("data-mdc-auto-init", "MDCSwitch");
    doc.append_child(&el).unwrap();

    let auto_init = AutoInit::new();
    auto_init.register_discovered();
    assert!(auto_init.is_registered("MaterialButton"));

    auto_init.auto_init(doc.root(), None).unwrap();
    assert!(el.property_as::<Switch>("MDCSwitch").is_some());
}
