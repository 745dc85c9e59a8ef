// File: crates/form-validator/core/src/controller.rs
// Purpose: Public validator surface; reacts to focus/blur and aggregates field state

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::config::ValidatorConfig;
use crate::environment::{FieldElement, FieldEvent, FormEnvironment, FormHandle, Marker};
use crate::error::{Result, ValidatorError};
use crate::evaluator::{FieldInput, RuleEvaluator};
use crate::rules::RuleSet;
use crate::store::FieldStateStore;

/// Validator bound to one live form.
///
/// All state lives on the thread that created the controller. Event listeners
/// hold a weak reference, so dropping the controller turns them into no-ops.
pub struct FormController<F: FormHandle> {
    state: Rc<RefCell<ControllerState<F>>>,
}

struct ControllerState<F: FormHandle> {
    form_name: String,
    form: F,
    store: FieldStateStore<F::Element>,
    evaluator: RuleEvaluator,
    config: ValidatorConfig,
}

impl<F: FormHandle> FormController<F> {
    /// Bind to `form_name` with the default configuration and built-in rules
    pub fn new<Env>(env: &Env, form_name: &str) -> Result<Self>
    where
        Env: FormEnvironment<Form = F>,
    {
        Self::with_config(env, form_name, ValidatorConfig::default())
    }

    pub fn with_config<Env>(env: &Env, form_name: &str, config: ValidatorConfig) -> Result<Self>
    where
        Env: FormEnvironment<Form = F>,
    {
        let rules = RuleSet::builtin(config.password);
        Self::with_rules(env, form_name, rules, config)
    }

    /// Bind with a caller-supplied rule set
    pub fn with_rules<Env>(
        env: &Env,
        form_name: &str,
        rules: RuleSet,
        config: ValidatorConfig,
    ) -> Result<Self>
    where
        Env: FormEnvironment<Form = F>,
    {
        let form = env
            .find_form(form_name)
            .ok_or_else(|| ValidatorError::FormNotFound(form_name.to_string()))?;

        let store = FieldStateStore::from_elements(form.elements(), &config)?;
        tracing::debug!(form = form_name, fields = store.len(), "validator attached");

        let controller = Self {
            state: Rc::new(RefCell::new(ControllerState {
                form_name: form_name.to_string(),
                form,
                evaluator: RuleEvaluator::new(rules, config.unknown_rules),
                store,
                config,
            })),
        };
        controller.bind_events();
        Ok(controller)
    }

    fn bind_events(&self) {
        let state = self.state.borrow();
        for field in state.store.iter() {
            let weak = Rc::downgrade(&self.state);
            let name = field.name().to_string();
            field
                .element()
                .listen(Rc::new(move |event: FieldEvent| dispatch_event(&weak, &name, event)));
        }
    }

    /// Check one field, or the whole form when no name is given.
    ///
    /// With a name this behaves like the field losing focus and returns its
    /// verdict. Without one it is [`validate`](Self::validate) and returns `None`.
    pub fn check(&self, name: Option<&str>) -> Result<Option<bool>> {
        match name {
            Some(name) => self.check_field(name).map(Some),
            None => {
                self.validate();
                Ok(None)
            }
        }
    }

    /// Evaluate a single field, update its validity and markers
    pub fn check_field(&self, name: &str) -> Result<bool> {
        self.state.borrow_mut().blur(name)
    }

    /// Whole-form validity as of the last checks
    pub fn valid(&self) -> bool {
        self.state.borrow().store.all_valid()
    }

    /// Mark every field dirty and check each one, in form order
    pub fn validate(&self) {
        self.state.borrow_mut().validate_all();
    }

    /// True only once every field is dirty
    pub fn is_dirty(&self) -> bool {
        self.state.borrow().store.all_dirty()
    }

    /// Trimmed value of every field, keyed by name. Clears dirtiness.
    pub fn data(&self) -> IndexMap<String, String> {
        let mut state = self.state.borrow_mut();
        state
            .store
            .iter_mut()
            .map(|field| {
                let value = field.refresh_value().trim().to_string();
                field.is_dirty = false;
                (field.name().to_string(), value)
            })
            .collect()
    }

    /// Remove markers and reset the form's values.
    ///
    /// Validity and dirtiness flags are left as they are until the next check.
    pub fn reset(&self) {
        let state = self.state.borrow();
        for field in state.store.iter() {
            state.clear_markers(field.element());
        }
        state.form.reset();
        tracing::debug!(form = %state.form_name, "form reset");
    }
}

fn dispatch_event<F: FormHandle>(
    state: &Weak<RefCell<ControllerState<F>>>,
    name: &str,
    event: FieldEvent,
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Ok(mut state) = state.try_borrow_mut() else {
        tracing::warn!(field = name, ?event, "notification received while busy, ignored");
        return;
    };
    state.handle_event(name, event);
}

impl<F: FormHandle> ControllerState<F> {
    fn handle_event(&mut self, name: &str, event: FieldEvent) {
        let result = match event {
            FieldEvent::Focus => self.focus(name),
            FieldEvent::Blur => self.blur(name).map(|_| ()),
        };
        if let Err(err) = result {
            tracing::warn!(field = name, %err, "failed to handle field event");
        }
    }

    fn focus(&self, name: &str) -> Result<()> {
        let field = self.store.resolve(name)?;
        self.clear_markers(field.element());
        Ok(())
    }

    fn touch(&mut self, name: &str) -> Result<()> {
        self.store.resolve_mut(name)?.is_dirty = true;
        Ok(())
    }

    /// Evaluate, record validity, and show exactly one marker
    fn blur(&mut self, name: &str) -> Result<bool> {
        let is_valid = self.evaluate(name)?;
        let field = self.store.resolve_mut(name)?;
        field.is_valid = is_valid;

        let (add, remove) = if is_valid {
            (Marker::Okay, Marker::Error)
        } else {
            (Marker::Error, Marker::Okay)
        };
        let element = field.element();
        element.remove_class(self.config.marker_class(remove));
        element.add_class(self.config.marker_class(add));

        tracing::debug!(form = %self.form_name, field = name, valid = is_valid, "field checked");
        Ok(is_valid)
    }

    fn evaluate(&mut self, name: &str) -> Result<bool> {
        let field = self.store.resolve_mut(name)?;
        let value = field.refresh_value().to_string();
        let rule_expression = field.element().attribute(&self.config.rules_attribute);
        let match_field = field.match_field().map(str::to_string);

        let match_value = match match_field {
            Some(target) => Some(self.store.resolve(&target)?.element().value()),
            None => None,
        };

        Ok(self.evaluator.evaluate(&FieldInput {
            value: &value,
            rule_expression: rule_expression.as_deref(),
            match_value: match_value.as_deref(),
        }))
    }

    fn validate_all(&mut self) {
        let names: Vec<String> = self.store.names().map(str::to_string).collect();
        for name in names {
            let result = self.touch(&name).and_then(|()| self.blur(&name));
            if let Err(err) = result {
                tracing::warn!(field = %name, %err, "failed to check field");
            }
        }
    }

    fn clear_markers(&self, element: &F::Element) {
        element.remove_class(self.config.marker_class(Marker::Error));
        element.remove_class(self.config.marker_class(Marker::Okay));
    }
}
