// File: crates/form-validator/core/src/rules.rs
// Purpose: Catalog of named validators (regex patterns and predicates)

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::password::PasswordStrength;

// Email: local part, '@', domain label, 2-10 char top-level label, optional secondary label
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-z0-9][a-z0-9_.\-]*@[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?\.[a-z0-9]{2,10}(?:\.[a-z]{2,10})?$",
    )
    .expect("email pattern compiles")
});

static ALPHABET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z ]+$").expect("alphabet pattern compiles"));

// Only the first character is checked.
static ALPHANUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]").expect("alphanumeric pattern compiles"));

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&url_pattern()).expect("url pattern compiles"));

/// HTTP(S) URL grammar with internationalized host and path characters.
fn url_pattern() -> String {
    // letter-like ranges accepted alongside ASCII
    let intl = r"\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}";
    let unreserved = format!(r"[a-z0-9\-._~{intl}]");
    let alnum = format!(r"[a-z0-9{intl}]");
    let alpha = format!(r"[a-z{intl}]");
    let pct = r"%[0-9a-f]{2}";
    let sub_delims = r"[!$&'()*+,;=]";
    let pchar = format!(r"(?:{unreserved}|{pct}|{sub_delims}|:|@)");

    let octet = r"(?:[0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";
    let ipv4 = format!(r"{octet}\.{octet}\.{octet}\.{octet}");
    let domain_label = format!(r"(?:{alnum}|{alnum}{unreserved}*{alnum})");
    let top_label = format!(r"(?:{alpha}|{alpha}{unreserved}*{alpha})");
    let host = format!(r"(?:{ipv4}|(?:{domain_label}\.)*{top_label}\.?)");

    let userinfo = format!(r"(?:(?:{unreserved}|{pct}|{sub_delims}|:)*@)?");
    let port = r"(?::[0-9]*)?";
    let path = format!(r"(?:/(?:{pchar}+(?:/{pchar}*)*)?)?");
    let query = format!(r"(?:\?(?:{pchar}|[\x{{E000}}-\x{{F8FF}}]|/|\?)*)?");
    let fragment = format!(r"(?:#(?:{pchar}|/|\?)*)?");

    format!(r"^https?://{userinfo}{host}{port}{path}{query}{fragment}$")
}

/// A single named validator.
pub enum Rule {
    /// Passes when the pattern matches the trimmed value.
    Pattern(Regex),
    /// Passes when the predicate returns true for the trimmed value.
    Predicate(Box<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Rule {
    /// Compile a pattern rule
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Rule::Pattern)
    }

    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Rule::Predicate(Box::new(check))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Rule::Pattern(regex) => regex.is_match(value),
            Rule::Predicate(check) => check(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Rule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Mapping from rule name to validator.
///
/// Built once and handed to a controller; read-only afterwards.
#[derive(Debug)]
pub struct RuleSet {
    rules: HashMap<String, Rule>,
}

impl RuleSet {
    /// A rule set with no entries (only `required` and `allow-blank` apply)
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The built-in catalog: `email`, `password`, `alphabet`, `alphanumeric`, `url`
    pub fn builtin(password: PasswordStrength) -> Self {
        Self::empty()
            .with_rule("email", Rule::Pattern(EMAIL_REGEX.clone()))
            .with_rule(
                "password",
                Rule::predicate(move |value| password.is_satisfied_by(value)),
            )
            .with_rule("alphabet", Rule::Pattern(ALPHABET_REGEX.clone()))
            .with_rule("alphanumeric", Rule::Pattern(ALPHANUMERIC_REGEX.clone()))
            .with_rule("url", Rule::Pattern(URL_REGEX.clone()))
    }

    /// Register (or replace) a rule
    pub fn with_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin(PasswordStrength::default())
    }
}
