//! Password strength policy behind the `password` rule

use serde::{Deserialize, Serialize};

/// Special characters accepted by [`PasswordStrength::Strong`].
const SPECIAL_CHARS: &[char] = &[
    '@', '$', '!', '%', '*', '?', '&', '#', '-', '_', '+', '=', '.', ',',
];

/// Password strength levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    /// 6+ characters minimum
    Basic,
    /// 8+ chars with uppercase, lowercase, and digit
    #[default]
    Medium,
    /// 8+ chars with uppercase, lowercase, digit, and special character
    Strong,
}

impl PasswordStrength {
    /// Checks a password, returning the first unmet requirement
    pub fn check(&self, password: &str) -> Result<(), String> {
        match self {
            Self::Basic => check_length(password, 6),
            Self::Medium => {
                check_length(password, 8)?;
                check_classes(password)
            }
            Self::Strong => {
                check_length(password, 8)?;
                check_classes(password)?;
                if !password.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
                    return Err(
                        "Password must contain at least one special character (@$!%*?&#-_+=.,)"
                            .to_string(),
                    );
                }
                Ok(())
            }
        }
    }

    pub fn is_satisfied_by(&self, password: &str) -> bool {
        self.check(password).is_ok()
    }
}

fn check_length(password: &str, min: usize) -> Result<(), String> {
    if password.chars().count() >= min {
        Ok(())
    } else {
        Err(format!("Password must be at least {} characters", min))
    }
}

fn check_classes(password: &str) -> Result<(), String> {
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_password() {
        assert!(PasswordStrength::Basic.is_satisfied_by("simple"));
        assert!(PasswordStrength::Basic.is_satisfied_by("123456"));
        assert!(!PasswordStrength::Basic.is_satisfied_by("short"));
    }

    #[test]
    fn test_medium_password() {
        assert!(PasswordStrength::Medium.is_satisfied_by("Password123"));
        assert!(PasswordStrength::Medium.is_satisfied_by("Test1234"));
        assert!(!PasswordStrength::Medium.is_satisfied_by("lowercase1"));
        assert!(!PasswordStrength::Medium.is_satisfied_by("UPPERCASE1"));
        assert!(!PasswordStrength::Medium.is_satisfied_by("NoDigits"));
        assert!(!PasswordStrength::Medium.is_satisfied_by("Short1A"));
    }

    #[test]
    fn test_strong_password() {
        assert!(PasswordStrength::Strong.is_satisfied_by("Password123!"));
        assert!(PasswordStrength::Strong.is_satisfied_by("Secure@Pass1"));
        assert!(!PasswordStrength::Strong.is_satisfied_by("NoSpecial123"));
        assert!(!PasswordStrength::Strong.is_satisfied_by("nouppercas!1"));
        assert!(!PasswordStrength::Strong.is_satisfied_by("NOLOWERCASE!1"));
        assert!(!PasswordStrength::Strong.is_satisfied_by("NoDigits!Aa"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // five two-byte characters
        assert!(!PasswordStrength::Basic.is_satisfied_by("ééééé"));
        assert!(PasswordStrength::Basic.is_satisfied_by("éééééé"));
    }

    #[test]
    fn test_first_failure_is_reported() {
        assert_eq!(
            PasswordStrength::Medium.check("short"),
            Err("Password must be at least 8 characters".to_string())
        );
        assert_eq!(
            PasswordStrength::Medium.check("alllowercase1"),
            Err("Password must contain at least one uppercase letter".to_string())
        );
    }
}
