//! Form Validator Core
//!
//! Attaches declarative validation rules (`data-validate="required,email"`) to
//! form elements and tracks per-field and whole-form validity and dirtiness.
//!
//! The host environment (a browser DOM, or the in-memory [`memory`] backend)
//! is reached through the traits in [`environment`]; everything else is plain
//! Rust and runs synchronously on the thread that owns the controller.
//!
//! ```
//! use form_validator_core::memory::{MemoryElement, MemoryEnvironment, MemoryForm};
//! use form_validator_core::FormController;
//!
//! let env = MemoryEnvironment::new();
//! env.add_form(
//!     "signup",
//!     MemoryForm::new()
//!         .with_element(MemoryElement::new("email").with_rules("required,email").with_value("x@y.com"))
//!         .with_element(MemoryElement::new("confirmEmail").with_same("email").with_value("x@y.com")),
//! );
//!
//! let form = FormController::new(&env, "signup").unwrap();
//! form.validate();
//! assert!(form.valid());
//! ```

pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod password;
pub mod rules;
pub mod store;

pub use config::{UnknownRulePolicy, ValidatorConfig};
pub use controller::FormController;
pub use environment::{EventListener, FieldElement, FieldEvent, FormEnvironment, FormHandle, Marker};
pub use error::{Result, ValidatorError};
pub use evaluator::{parse_rule_expression, FieldInput, RuleEvaluator};
pub use password::PasswordStrength;
pub use rules::{Rule, RuleSet};
pub use store::{FieldDescriptor, FieldStateStore};
