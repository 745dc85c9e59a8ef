// File: crates/form-validator/core/src/evaluator.rs
// Purpose: Evaluate a field's rule expression and match constraint to a single verdict

use crate::config::UnknownRulePolicy;
use crate::rules::RuleSet;

/// Rule name that fails on a blank value.
pub const REQUIRED: &str = "required";
/// Rule name that accepts a blank value. It never overrides an earlier failure.
pub const ALLOW_BLANK: &str = "allow-blank";

/// Everything the evaluator needs to judge one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldInput<'a> {
    /// Current value as read from the element (untrimmed)
    pub value: &'a str,
    /// Raw rule expression, e.g. `"required,email"`
    pub rule_expression: Option<&'a str>,
    /// Current value of the field this one must equal
    pub match_value: Option<&'a str>,
}

/// Split a rule expression into trimmed, non-empty rule names.
///
/// ```
/// use form_validator_core::parse_rule_expression;
/// assert_eq!(parse_rule_expression(" required , email,"), vec!["required", "email"]);
/// assert!(parse_rule_expression("").is_empty());
/// ```
pub fn parse_rule_expression(expression: &str) -> Vec<&str> {
    expression
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

#[derive(Debug)]
pub struct RuleEvaluator {
    rules: RuleSet,
    unknown_rules: UnknownRulePolicy,
}

impl RuleEvaluator {
    pub fn new(rules: RuleSet, unknown_rules: UnknownRulePolicy) -> Self {
        Self {
            rules,
            unknown_rules,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate every rule token, then the match constraint.
    ///
    /// The verdict starts valid and can only be turned invalid.
    pub fn evaluate(&self, field: &FieldInput<'_>) -> bool {
        let value = field.value.trim();
        let mut is_valid = true;

        for token in parse_rule_expression(field.rule_expression.unwrap_or_default()) {
            let passed = self.evaluate_token(token, value);
            tracing::trace!(rule = token, passed, "rule evaluated");
            if !passed {
                is_valid = false;
            }
        }

        if let Some(other) = field.match_value {
            if value != other.trim() {
                tracing::trace!("match constraint failed");
                is_valid = false;
            }
        }

        is_valid
    }

    fn evaluate_token(&self, token: &str, value: &str) -> bool {
        if let Some(rule) = self.rules.get(token) {
            return rule.matches(value);
        }

        match token {
            REQUIRED => !value.is_empty(),
            ALLOW_BLANK => true,
            unknown => match self.unknown_rules {
                UnknownRulePolicy::Ignore => true,
                UnknownRulePolicy::Warn => {
                    tracing::warn!(rule = unknown, "unknown validation rule ignored");
                    true
                }
                UnknownRulePolicy::Reject => {
                    tracing::warn!(rule = unknown, "unknown validation rule rejected");
                    false
                }
            },
        }
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new(RuleSet::default(), UnknownRulePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use rstest::rstest;

    fn eval(rules: &str, value: &str) -> bool {
        RuleEvaluator::default().evaluate(&FieldInput {
            value,
            rule_expression: Some(rules),
            match_value: None,
        })
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("anything at all")]
    fn test_no_rules_always_valid(#[case] value: &str) {
        assert!(eval("", value));
        assert!(RuleEvaluator::default().evaluate(&FieldInput {
            value,
            ..Default::default()
        }));
    }

    #[rstest]
    #[case("", false)]
    #[case("  \t ", false)]
    #[case("x", true)]
    #[case("  padded  ", true)]
    fn test_required(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(eval("required", value), expected);
    }

    #[test]
    fn test_values_are_trimmed_before_matching() {
        assert!(eval("email", "  user@example.com  "));
    }

    #[test]
    fn test_allow_blank_does_not_override_failure() {
        // blank value: email fails, allow-blank cannot restore validity
        assert!(!eval("email,allow-blank", ""));
        assert!(!eval("allow-blank,email", ""));
        // later failing rule on a non-blank value
        assert!(!eval("allow-blank,email", "not-an-email"));
        assert!(eval("allow-blank", ""));
    }

    #[test]
    fn test_all_rules_must_pass() {
        assert!(eval("required,email", "user@example.com"));
        assert!(!eval("required,email", ""));
        assert!(!eval("required,alphabet", "abc1"));
    }

    #[test]
    fn test_tokens_are_trimmed() {
        assert!(!eval(" required , email ", "nope"));
        assert!(eval(" required , email ", "user@example.com"));
    }

    #[test]
    fn test_unknown_rules_by_policy() {
        let input = FieldInput {
            value: "hello",
            rule_expression: Some("required,emial"),
            match_value: None,
        };
        let ignore = RuleEvaluator::new(RuleSet::default(), UnknownRulePolicy::Ignore);
        let warn = RuleEvaluator::new(RuleSet::default(), UnknownRulePolicy::Warn);
        let reject = RuleEvaluator::new(RuleSet::default(), UnknownRulePolicy::Reject);
        assert!(ignore.evaluate(&input));
        assert!(warn.evaluate(&input));
        assert!(!reject.evaluate(&input));
    }

    #[test]
    fn test_registered_rule_takes_precedence_over_keywords() {
        let rules = RuleSet::empty().with_rule("required", Rule::predicate(|v| v == "yes"));
        let evaluator = RuleEvaluator::new(rules, UnknownRulePolicy::Warn);
        for (value, expected) in [("yes", true), ("no", false)] {
            let input = FieldInput {
                value,
                rule_expression: Some("required"),
                match_value: None,
            };
            assert_eq!(evaluator.evaluate(&input), expected);
        }
    }

    #[rstest]
    #[case("secret", Some("secret"), true)]
    #[case("secret", Some("  secret "), true)]
    #[case(" secret", Some("secret"), true)]
    #[case("secret", Some("Secret"), false)]
    #[case("secret", Some(""), false)]
    fn test_match_constraint(
        #[case] value: &str,
        #[case] other: Option<&str>,
        #[case] expected: bool,
    ) {
        let evaluator = RuleEvaluator::default();
        let input = FieldInput {
            value,
            rule_expression: None,
            match_value: other,
        };
        assert_eq!(evaluator.evaluate(&input), expected);
    }

    #[test]
    fn test_match_constraint_combines_with_rules() {
        let evaluator = RuleEvaluator::default();
        let input = FieldInput {
            value: "",
            rule_expression: Some("required"),
            match_value: Some(""),
        };
        assert!(!evaluator.evaluate(&input));
    }
}
