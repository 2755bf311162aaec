//! Secret detection and masking.
//!
//! Variables are classified by name, not value: anything whose name
//! mentions a password, token, key or credential is treated as
//! secret-bearing. Resolved secret values are replaced with `[hidden]`
//! before profile text is printed, and presence checks never echo them.

use regex::Regex;

/// Replacement text for masked values.
pub const MASK: &str = "[hidden]";

/// Name fragments that mark a variable as secret-bearing.
const SECRET_NAME_PATTERNS: &[&str] = &[
    r"(?i)password",
    r"(?i)passwd",
    r"(?i)secret",
    r"(?i)token",
    r"(?i)api[_-]?key",
    r"(?i)private[_-]?key",
    r"(?i)credential",
];

/// Matches variable names that should never have their values echoed.
#[derive(Debug)]
pub struct SecretMatcher {
    patterns: Vec<Regex>,
}

impl SecretMatcher {
    pub fn new() -> Self {
        let patterns = SECRET_NAME_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        Self { patterns }
    }

    /// Whether a variable name marks its value as secret.
    pub fn is_secret_name(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    /// Mask the values of secret-named variables inside rendered text.
    ///
    /// `resolved` pairs each variable name with the value that was
    /// substituted for it; only non-empty values of secret-named variables
    /// are replaced.
    pub fn mask_resolved(&self, text: &str, resolved: &[(String, String)]) -> String {
        let mut out = text.to_string();
        for (name, value) in resolved {
            if !value.is_empty() && self.is_secret_name(name) {
                out = out.replace(value.as_str(), MASK);
            }
        }
        out
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::new()
    }
}
