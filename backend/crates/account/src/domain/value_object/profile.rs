//! Profile Value Object
//!
//! Display name and occupation shown on campaigns.

use unicode_normalization::UnicodeNormalization;

/// Maximum length (in characters) of each profile field
pub const PROFILE_FIELD_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    occupation: String,
}

impl Profile {
    /// Validate both fields, collecting one message per failing field
    pub fn new(name: &str, occupation: &str) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let name = normalize_field("name", name, &mut errors);
        let occupation = normalize_field("occupation", occupation, &mut errors);

        if errors.is_empty() {
            Ok(Self { name, occupation })
        } else {
            Err(errors)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn occupation(&self) -> &str {
        &self.occupation
    }
}

fn normalize_field(field: &str, raw: &str, errors: &mut Vec<String>) -> String {
    let value: String = raw.nfkc().collect::<String>().trim().to_string();
    let chars = value.chars().count();

    if chars == 0 {
        errors.push(format!("{field} is required"));
    } else if chars > PROFILE_FIELD_MAX_CHARS {
        errors.push(format!(
            "{field} must be at most {PROFILE_FIELD_MAX_CHARS} characters"
        ));
    } else if value.chars().any(char::is_control) {
        errors.push(format!("{field} contains invalid characters"));
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_trims() {
        let profile = Profile::new("  Budi ", " Engineer").unwrap();
        assert_eq!(profile.name(), "Budi");
        assert_eq!(profile.occupation(), "Engineer");
    }

    #[test]
    fn test_profile_collects_every_field_error() {
        let errors = Profile::new("", &"x".repeat(101)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("name"));
        assert!(errors[1].starts_with("occupation"));
    }

    #[test]
    fn test_profile_boundary() {
        assert!(Profile::new(&"a".repeat(100), "b").is_ok());
        assert!(Profile::new("a\u{0007}b", "b").is_err());
    }
}
