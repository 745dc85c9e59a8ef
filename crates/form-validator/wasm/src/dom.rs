//! Browser DOM implementation of the validator environment

use std::cell::RefCell;
use std::rc::Rc;

use form_validator_core::{EventListener, FieldElement, FieldEvent, FormEnvironment, FormHandle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement};

/// `document.forms`
pub struct DomEnvironment {
    document: Document,
}

impl DomEnvironment {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl FormEnvironment for DomEnvironment {
    type Form = DomForm;

    fn find_form(&self, name: &str) -> Option<DomForm> {
        self.document
            .forms()
            .named_item(name)?
            .dyn_into::<HtmlFormElement>()
            .ok()
            .map(|form| DomForm { form })
    }
}

pub struct DomForm {
    form: HtmlFormElement,
}

impl FormHandle for DomForm {
    type Element = DomElement;

    fn elements(&self) -> Vec<DomElement> {
        let controls = self.form.elements();
        (0..controls.length())
            .filter_map(|index| controls.item(index))
            .map(DomElement::new)
            .collect()
    }

    fn reset(&self) {
        self.form.reset();
    }
}

/// Handle to a form control.
///
/// Owns the JS closures registered through [`FieldElement::listen`]; they are
/// unregistered when the last handle is dropped.
#[derive(Clone)]
pub struct DomElement {
    element: Element,
    listeners: Rc<Listeners>,
}

struct Listeners {
    target: Element,
    closures: RefCell<Vec<(&'static str, Closure<dyn Fn()>)>>,
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (event_name, closure) in self.closures.get_mut().drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
        }
    }
}

impl DomElement {
    pub fn new(element: Element) -> Self {
        Self {
            listeners: Rc::new(Listeners {
                target: element.clone(),
                closures: RefCell::new(Vec::new()),
            }),
            element,
        }
    }

    // name/type/value live on the concrete control interfaces
    fn property(&self, key: &str) -> String {
        js_sys::Reflect::get(&self.element, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }
}

impl FieldElement for DomElement {
    fn name(&self) -> String {
        self.property("name")
    }

    fn control_type(&self) -> String {
        self.property("type")
    }

    fn value(&self) -> String {
        self.property("value")
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.element.class_list().add_1(class) {
            web_sys::console::warn_2(&JsValue::from_str("failed to add class"), &err);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.element.class_list().remove_1(class) {
            web_sys::console::warn_2(&JsValue::from_str("failed to remove class"), &err);
        }
    }

    fn listen(&self, listener: EventListener) {
        for (event_name, event) in [("focus", FieldEvent::Focus), ("blur", FieldEvent::Blur)] {
            let listener = listener.clone();
            let closure = Closure::<dyn Fn()>::new(move || listener(event));
            match self
                .element
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            {
                Ok(()) => self.listeners.closures.borrow_mut().push((event_name, closure)),
                Err(err) => {
                    web_sys::console::warn_2(&JsValue::from_str("failed to bind listener"), &err)
                }
            }
        }
    }
}
