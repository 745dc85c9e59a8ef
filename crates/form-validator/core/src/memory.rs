//! In-memory environment
//!
//! A headless implementation of the [`environment`](crate::environment)
//! traits. Forms and controls live in plain Rust structures; `focus()` and
//! `blur()` dispatch notifications to registered listeners the way a browser
//! would. Useful for tests and for validating submitted values on the server
//! with the same rules the page uses.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::environment::{EventListener, FieldElement, FieldEvent, FormEnvironment, FormHandle};

/// Registry of in-memory forms
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    forms: Rc<RefCell<IndexMap<String, MemoryForm>>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a form under a name, replacing any previous one
    pub fn add_form(&self, name: impl Into<String>, form: MemoryForm) {
        self.forms.borrow_mut().insert(name.into(), form);
    }

    pub fn form(&self, name: &str) -> Option<MemoryForm> {
        self.forms.borrow().get(name).cloned()
    }
}

impl FormEnvironment for MemoryEnvironment {
    type Form = MemoryForm;

    fn find_form(&self, name: &str) -> Option<MemoryForm> {
        self.form(name)
    }
}

/// A form: an ordered list of controls
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    elements: Rc<RefCell<Vec<MemoryElement>>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(self, element: MemoryElement) -> Self {
        self.elements.borrow_mut().push(element);
        self
    }

    /// First control with the given name
    pub fn element(&self, name: &str) -> Option<MemoryElement> {
        self.elements
            .borrow()
            .iter()
            .find(|element| element.name() == name)
            .cloned()
    }
}

impl FormHandle for MemoryForm {
    type Element = MemoryElement;

    fn elements(&self) -> Vec<MemoryElement> {
        self.elements.borrow().clone()
    }

    fn reset(&self) {
        for element in self.elements.borrow().iter() {
            element.restore_default();
        }
    }
}

struct ElementState {
    name: String,
    control_type: RefCell<String>,
    value: RefCell<String>,
    default_value: RefCell<String>,
    attributes: RefCell<HashMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    listeners: RefCell<Vec<EventListener>>,
}

/// A form control. Clones share state, like DOM node handles.
#[derive(Clone)]
pub struct MemoryElement {
    state: Rc<ElementState>,
}

impl MemoryElement {
    /// A text control with an empty value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: Rc::new(ElementState {
                name: name.into(),
                control_type: RefCell::new("text".to_string()),
                value: RefCell::new(String::new()),
                default_value: RefCell::new(String::new()),
                attributes: RefCell::new(HashMap::new()),
                classes: RefCell::new(BTreeSet::new()),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn with_type(self, control_type: impl Into<String>) -> Self {
        *self.state.control_type.borrow_mut() = control_type.into();
        self
    }

    /// Set both the current and the default (reset) value
    pub fn with_value(self, value: impl Into<String>) -> Self {
        let value = value.into();
        *self.state.default_value.borrow_mut() = value.clone();
        *self.state.value.borrow_mut() = value;
        self
    }

    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Shorthand for the `data-validate` attribute
    pub fn with_rules(self, rules: impl Into<String>) -> Self {
        self.with_attribute("data-validate", rules)
    }

    /// Shorthand for the `data-same` attribute
    pub fn with_same(self, field: impl Into<String>) -> Self {
        self.with_attribute("data-same", field)
    }

    /// Simulate user input (the default value is unchanged)
    pub fn set_value(&self, value: impl Into<String>) {
        *self.state.value.borrow_mut() = value.into();
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.state
            .attributes
            .borrow_mut()
            .insert(name.into(), value.into());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.state.attributes.borrow_mut().remove(name);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.classes.borrow().contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.state.classes.borrow().iter().cloned().collect()
    }

    pub fn focus(&self) {
        self.dispatch(FieldEvent::Focus);
    }

    pub fn blur(&self) {
        self.dispatch(FieldEvent::Blur);
    }

    fn dispatch(&self, event: FieldEvent) {
        // Listeners may touch this element, so release the borrow first
        let listeners = self.state.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }

    fn restore_default(&self) {
        let default_value = self.state.default_value.borrow().clone();
        *self.state.value.borrow_mut() = default_value;
    }
}

impl FieldElement for MemoryElement {
    fn name(&self) -> String {
        self.state.name.clone()
    }

    fn control_type(&self) -> String {
        self.state.control_type.borrow().clone()
    }

    fn value(&self) -> String {
        self.state.value.borrow().clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.attributes.borrow().get(name).cloned()
    }

    fn add_class(&self, class: &str) {
        self.state.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.state.classes.borrow_mut().remove(class);
    }

    fn listen(&self, listener: EventListener) {
        self.state.listeners.borrow_mut().push(listener);
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("name", &self.state.name)
            .field("type", &self.state.control_type.borrow())
            .field("value", &self.state.value.borrow())
            .field("classes", &self.state.classes.borrow())
            .field("listeners", &self.state.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_clones_share_state() {
        let element = MemoryElement::new("email");
        let handle = element.clone();
        handle.set_value("changed");
        handle.add_class("error");
        assert_eq!(element.value(), "changed");
        assert!(element.has_class("error"));
    }

    #[test]
    fn test_reset_restores_default_values() {
        let form = MemoryForm::new()
            .with_element(MemoryElement::new("a").with_value("initial"))
            .with_element(MemoryElement::new("b"));
        form.element("a").unwrap().set_value("typed");
        form.element("b").unwrap().set_value("typed");

        form.reset();

        assert_eq!(form.element("a").unwrap().value(), "initial");
        assert_eq!(form.element("b").unwrap().value(), "");
    }

    #[test]
    fn test_focus_and_blur_reach_listeners() {
        let element = MemoryElement::new("a");
        let blurs = Rc::new(Cell::new(0));
        let focuses = Rc::new(Cell::new(0));
        let (b, f) = (blurs.clone(), focuses.clone());
        element.listen(Rc::new(move |event: FieldEvent| match event {
            FieldEvent::Blur => b.set(b.get() + 1),
            FieldEvent::Focus => f.set(f.get() + 1),
        }));

        element.focus();
        element.blur();
        element.blur();

        assert_eq!(focuses.get(), 1);
        assert_eq!(blurs.get(), 2);
    }

    #[test]
    fn test_environment_lookup() {
        let env = MemoryEnvironment::new();
        env.add_form("signup", MemoryForm::new());
        assert!(env.find_form("signup").is_some());
        assert!(env.find_form("login").is_none());
    }
}
