//! Form Validator WASM
//!
//! WebAssembly bindings that attach the validator to a live `<form>`.
//!
//! ```javascript
//! const form = new Validator('signup');
//! form.check('email');   // validate one field
//! form.validate();       // validate every field
//! form.valid();          // whole-form validity
//! form.isDirty();        // every field validated?
//! form.data();           // { name: trimmedValue, ... }
//! form.reset();          // clear markers, native reset
//! ```

use form_validator_core::{FormController, ValidatorConfig, ValidatorError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod dom;

use dom::{DomEnvironment, DomForm};

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(err: ValidatorError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Validator bound to one form of the current document
#[wasm_bindgen]
pub struct Validator {
    controller: FormController<DomForm>,
}

#[wasm_bindgen]
impl Validator {
    /// Attach to `document.forms[form]`.
    ///
    /// `config` is optional; keys follow the core configuration in camelCase
    /// (`errorClass`, `okayClass`, `unknownRules`, `password`, ...).
    /// Throws when the form does not exist.
    #[wasm_bindgen(constructor)]
    pub fn new(form: &str, config: JsValue) -> Result<Validator, JsValue> {
        let config: ValidatorConfig = if config.is_undefined() || config.is_null() {
            ValidatorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let env = DomEnvironment::from_window()
            .ok_or_else(|| JsValue::from_str("Document is not available"))?;
        let controller = FormController::with_config(&env, form, config).map_err(to_js_error)?;

        Ok(Validator { controller })
    }

    /// Check one field (returns its validity) or, without a name, the whole form
    pub fn check(&self, name: Option<String>) -> Result<JsValue, JsValue> {
        let outcome = self
            .controller
            .check(name.as_deref())
            .map_err(to_js_error)?;
        Ok(outcome.map(JsValue::from_bool).unwrap_or(JsValue::UNDEFINED))
    }

    pub fn valid(&self) -> bool {
        self.controller.valid()
    }

    pub fn validate(&self) {
        self.controller.validate();
    }

    #[wasm_bindgen(js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.controller.is_dirty()
    }

    /// Plain object of trimmed values keyed by field name
    pub fn data(&self) -> Result<JsValue, JsValue> {
        let data = self.controller.data();
        Ok(data.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
    }

    pub fn reset(&self) {
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        container.set_inner_html(html);
        document.body().unwrap().append_child(&container).unwrap();
        container
    }

    fn control(container: &web_sys::Element, name: &str) -> web_sys::Element {
        container
            .query_selector(&format!("[name='{}']", name))
            .unwrap()
            .unwrap()
    }

    fn fire(element: &web_sys::Element, event: &str) {
        let event = web_sys::Event::new(event).unwrap();
        element
            .unchecked_ref::<web_sys::EventTarget>()
            .dispatch_event(&event)
            .unwrap();
    }

    #[wasm_bindgen_test]
    fn test_missing_form_throws() {
        assert!(Validator::new("no-such-form", JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_checks_live_form() {
        let container = mount(
            r#"<form name="wasm-signup">
                 <input name="email" data-validate="required,email" value="x@y.com">
                 <input name="confirmEmail" data-same="email" value="x@y.com">
                 <input type="submit" value="Send">
               </form>"#,
        );
        let form = Validator::new("wasm-signup", JsValue::UNDEFINED).unwrap();

        assert_eq!(form.check(Some("email".into())).unwrap(), JsValue::TRUE);
        assert_eq!(form.check(Some("confirmEmail".into())).unwrap(), JsValue::TRUE);
        assert!(form.valid());
        assert!(form.check(Some("send".into())).is_err());

        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_blur_and_focus_drive_markers() {
        let container = mount(
            r#"<form name="wasm-markers">
                 <input name="name" data-validate="required">
               </form>"#,
        );
        let form = Validator::new("wasm-markers", JsValue::UNDEFINED).unwrap();
        let input = control(&container, "name");

        fire(&input, "blur");
        assert!(input.class_list().contains("error"));
        assert!(!input.class_list().contains("okay"));
        assert!(!form.is_dirty());

        fire(&input, "focus");
        assert!(!input.class_list().contains("error"));

        container.remove();
    }
}
