// File: crates/form-validator/core/src/store.rs
// Purpose: Per-field state (value, validity, dirtiness) keyed by field name

use indexmap::IndexMap;

use crate::config::ValidatorConfig;
use crate::environment::FieldElement;
use crate::error::{Result, ValidatorError};

/// State tracked for one form control
#[derive(Debug, Clone)]
pub struct FieldDescriptor<E> {
    name: String,
    match_field: Option<String>,
    pub(crate) current_value: String,
    pub(crate) is_valid: bool,
    pub(crate) is_dirty: bool,
    element: E,
}

impl<E: FieldElement> FieldDescriptor<E> {
    fn from_element(name: String, element: E, config: &ValidatorConfig) -> Self {
        let match_field = element
            .attribute(&config.match_attribute)
            .map(|target| target.trim().to_string())
            .filter(|target| !target.is_empty());

        Self {
            name,
            match_field,
            current_value: element.value(),
            is_valid: false,
            is_dirty: false,
            element,
        }
    }

    /// Re-read the value from the element
    pub(crate) fn refresh_value(&mut self) -> &str {
        self.current_value = self.element.value();
        &self.current_value
    }
}

impl<E> FieldDescriptor<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the field whose value this one must equal
    pub fn match_field(&self) -> Option<&str> {
        self.match_field.as_deref()
    }

    /// Value as of the last check or data extraction
    pub fn current_value(&self) -> &str {
        &self.current_value
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn element(&self) -> &E {
        &self.element
    }
}

/// All tracked fields, in the order the form reported them
#[derive(Debug, Clone)]
pub struct FieldStateStore<E> {
    fields: IndexMap<String, FieldDescriptor<E>>,
}

impl<E: FieldElement> FieldStateStore<E> {
    /// Build one descriptor per eligible element and resolve match references
    pub fn from_elements(elements: Vec<E>, config: &ValidatorConfig) -> Result<Self> {
        let mut fields = IndexMap::new();

        for element in elements {
            if config.is_ignored_type(&element.control_type()) {
                continue;
            }

            let name = element.name();
            if name.is_empty() {
                tracing::debug!("skipping form control without a name");
                continue;
            }

            let descriptor = FieldDescriptor::from_element(name.clone(), element, config);
            if fields.insert(name.clone(), descriptor).is_some() {
                tracing::warn!(field = %name, "duplicate field name, keeping the last control");
            }
        }

        let store = Self { fields };
        store.check_match_references()?;
        Ok(store)
    }

    fn check_match_references(&self) -> Result<()> {
        for field in self.fields.values() {
            if let Some(target) = field.match_field() {
                if !self.fields.contains_key(target) {
                    return Err(ValidatorError::UnknownMatchField {
                        field: field.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<E> FieldStateStore<E> {
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor<E>> {
        self.fields.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FieldDescriptor<E>> {
        self.fields.get_mut(name)
    }

    /// Lookup that reports a missing name as [`ValidatorError::UnknownField`]
    pub fn resolve(&self, name: &str) -> Result<&FieldDescriptor<E>> {
        self.get(name)
            .ok_or_else(|| ValidatorError::UnknownField(name.to_string()))
    }

    pub(crate) fn resolve_mut(&mut self, name: &str) -> Result<&mut FieldDescriptor<E>> {
        self.get_mut(name)
            .ok_or_else(|| ValidatorError::UnknownField(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<E>> {
        self.fields.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldDescriptor<E>> {
        self.fields.values_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every field passed its last check
    pub fn all_valid(&self) -> bool {
        self.fields.values().all(|field| field.is_valid)
    }

    /// True only once every field has been marked dirty
    pub fn all_dirty(&self) -> bool {
        self.fields.values().all(|field| field.is_dirty)
    }
}
