//! Editable campaign fields, validated together

/// Maximum length of name and short description
pub const TITLE_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetails {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub perks: String,
    pub goal_amount: i64,
}

impl CampaignDetails {
    /// Trim and validate, collecting one message per failing field
    pub fn new(
        name: &str,
        short_description: &str,
        description: &str,
        perks: &str,
        goal_amount: i64,
    ) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let name = bounded("name", name, &mut errors);
        let short_description = bounded("short_description", short_description, &mut errors);

        let description = description.trim().to_string();
        if description.is_empty() {
            errors.push("description is required".to_string());
        }

        if goal_amount <= 0 {
            errors.push("goal_amount must be greater than 0".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name,
            short_description,
            description,
            perks: perks.trim().to_string(),
            goal_amount,
        })
    }
}

fn bounded(field: &str, raw: &str, errors: &mut Vec<String>) -> String {
    let value = raw.trim().to_string();
    let chars = value.chars().count();

    if chars == 0 {
        errors.push(format!("{field} is required"));
    } else if chars > TITLE_MAX_CHARS {
        errors.push(format!("{field} must be at most {TITLE_MAX_CHARS} characters"));
    }

    value
}
