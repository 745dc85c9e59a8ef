// File: crates/form-validator/core/src/environment.rs
// Purpose: Contract between the validator and the host that owns the form elements

use std::rc::Rc;

/// Focus notifications delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Blur,
}

/// Visual markers written to an element after a check.
///
/// At most one of them is present on an element at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Error,
    Okay,
}

/// Callback registered on an element; invoked for every focus/blur.
pub type EventListener = Rc<dyn Fn(FieldEvent)>;

/// Registry of forms, looked up by name.
pub trait FormEnvironment {
    type Form: FormHandle;

    fn find_form(&self, name: &str) -> Option<Self::Form>;
}

/// A live form.
pub trait FormHandle: 'static {
    type Element: FieldElement + 'static;

    /// All controls of the form, in document order
    fn elements(&self) -> Vec<Self::Element>;

    /// Native reset: restores every control to its default value
    fn reset(&self);
}

/// A single form control.
///
/// Implementations are cheap handles; the validator keeps one per field and
/// reads through it on every check.
pub trait FieldElement {
    fn name(&self) -> String;

    /// The control's `type` ("text", "email", "submit", ...)
    fn control_type(&self) -> String;

    fn value(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Subscribe to focus and blur notifications for this control
    fn listen(&self, listener: EventListener);
}
