use std::cell::Cell;

use simplelog::{Config, LevelFilter, SimpleLogger};
use upgrader::prelude::*;

/// Adds a ripple container to its host.
#[component(name = "MaterialRipple", selector = ".mdl-js-ripple-effect", widget = false)]
struct Ripple {
    container: Element,
}

impl Component for Ripple {
    fn attach_to(element: &Element) -> Result<Self, ComponentError> {
        let container = Element::span().class("mdl-button__ripple-container");
        element
            .append_child(&container)
            .map_err(|e| ComponentError::with_source("cannot add ripple container", e))?;
        Ok(Self { container })
    }

    fn destroy(&self) {
        self.container.remove();
    }
}

#[component(selector = ".mdl-js-button")]
struct MaterialButton {
    element: WeakElement,
    clicks: Cell<u32>,
}

impl MaterialButton {
    fn click(&self) {
        let Some(element) = self.element.upgrade() else {
            return;
        };
        if element.has_attribute("disabled") {
            return;
        }
        self.clicks.set(self.clicks.get() + 1);
    }
}

impl Component for MaterialButton {
    fn attach_to(element: &Element) -> Result<Self, ComponentError> {
        element.add_class("is-upgraded");
        Ok(Self {
            element: element.downgrade(),
            clicks: Cell::new(0),
        })
    }
}

/// Auto-init only: no selector, discovered through `data-mdc-auto-init`.
#[component(name = "MDCTextField")]
struct TextField {
    label: Option<String>,
}

impl Component for TextField {
    fn attach_to(element: &Element) -> Result<Self, ComponentError> {
        let label = element
            .query_selector("label")
            .map_err(|e| ComponentError::with_source("bad selector", e))?
            .and_then(|label| label.attribute("for"));
        Ok(Self { label })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let doc = Document::new();
    doc.append_child(
        &Element::div()
            .id("toolbar")
            .child(Element::button().id("save").class("mdl-js-button mdl-js-ripple-effect"))
            .child(
                Element::button()
                    .id("delete")
                    .class("mdl-js-button")
                    .attr("disabled", ""),
            ),
    )?;

    // Module load: every linked component registers and catches up on markup.
    let handler = ComponentHandler::new(doc.clone());
    let report = handler.register_discovered()?;
    println!("initial pass upgraded {} component(s)", report.upgraded_count());

    // Markup inserted later is upgraded on request.
    let late = Element::button().id("late").class("mdl-js-button");
    doc.append_child(&late)?;
    handler.upgrade_element(&late, None)?;

    for id in ["save", "delete", "late"] {
        let Some(button) = doc.get_element_by_id(id) else {
            continue;
        };
        if let Some(material) = button.instance_as::<MaterialButton>("MaterialButton") {
            material.click();
            println!(
                "{button} upgraded as [{}], clicks = {}",
                button.upgraded_names().join(", "),
                material.clicks.get()
            );
        }
    }

    // Attribute-driven discovery.
    let field = Element::div()
        .attr("data-mdc-auto-init", "MDCTextField")
        .child(Element::new("label").attr("for", "email"));
    doc.append_child(&field)?;

    let auto_init = AutoInit::new();
    auto_init.register_discovered();
    auto_init.auto_init(doc.root(), None)?;
    auto_init.auto_init(doc.root(), None)?;

    if let Some(text_field) = field.property_as::<TextField>("MDCTextField") {
        println!("text field for {:?}", text_field.label);
    }

    if let Some(ripple) = doc
        .get_element_by_id("save")
        .and_then(|save| save.instance_as::<Ripple>("MaterialRipple"))
    {
        ripple.destroy();
    }

    Ok(())
}
