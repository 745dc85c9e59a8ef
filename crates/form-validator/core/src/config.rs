// File: crates/form-validator/core/src/config.rs
// Purpose: Validator configuration (marker classes, attribute names, rule policies)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::environment::Marker;
use crate::password::PasswordStrength;

/// What to do with a rule name that is not in the rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRulePolicy {
    /// Silently pass
    Ignore,
    /// Pass, but log a warning
    #[default]
    Warn,
    /// Treat the rule as failing
    Reject,
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Class added to an element that failed its last check (default: "error")
    #[serde(default = "default_error_class", alias = "error_class")]
    pub error_class: String,

    /// Class added to an element that passed its last check (default: "okay")
    #[serde(default = "default_okay_class", alias = "okay_class")]
    pub okay_class: String,

    /// Attribute holding the comma-separated rule list
    #[serde(default = "default_rules_attribute", alias = "rules_attribute")]
    pub rules_attribute: String,

    /// Attribute naming the field this one must equal
    #[serde(default = "default_match_attribute", alias = "match_attribute")]
    pub match_attribute: String,

    /// Control types that are never tracked
    #[serde(default = "default_ignored_types", alias = "ignored_types")]
    pub ignored_types: Vec<String>,

    #[serde(default, alias = "unknown_rules")]
    pub unknown_rules: UnknownRulePolicy,

    /// Strength required by the `password` rule
    #[serde(default)]
    pub password: PasswordStrength,
}

fn default_error_class() -> String {
    "error".to_string()
}

fn default_okay_class() -> String {
    "okay".to_string()
}

fn default_rules_attribute() -> String {
    "data-validate".to_string()
}

fn default_match_attribute() -> String {
    "data-same".to_string()
}

fn default_ignored_types() -> Vec<String> {
    vec!["submit".to_string(), "reset".to_string()]
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            error_class: default_error_class(),
            okay_class: default_okay_class(),
            rules_attribute: default_rules_attribute(),
            match_attribute: default_match_attribute(),
            ignored_types: default_ignored_types(),
            unknown_rules: UnknownRulePolicy::default(),
            password: PasswordStrength::default(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from TOML text; empty text yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ValidatorConfig =
            toml::from_str(content).context("Invalid validator configuration")?;
        Ok(config)
    }

    /// Class name written for a marker
    pub fn marker_class(&self, marker: Marker) -> &str {
        match marker {
            Marker::Error => &self.error_class,
            Marker::Okay => &self.okay_class,
        }
    }

    /// Whether elements of this control type are skipped
    pub fn is_ignored_type(&self, control_type: &str) -> bool {
        self.ignored_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(control_type))
    }
}
