//! Submitted HTML forms
//!
//! Every field defaults to empty so a missing input surfaces as a field
//! message instead of a rejected request.

use account::application::{CreateUserInput, UpdateUserInput};
use account::{User, UserRole};
use campaign::Campaign;
use campaign::application::CampaignInput;
use kernel::id::UserId;
use serde::Deserialize;

use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub email: String,
    /// Only on the create form
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            occupation: user.occupation.clone(),
            email: user.email.to_string(),
            password: String::new(),
            role: user.role.code().to_string(),
        }
    }

    fn role(&self) -> AdminResult<UserRole> {
        if self.role.trim().is_empty() {
            return Ok(UserRole::User);
        }
        UserRole::from_code(&self.role).ok_or_else(|| AdminError::invalid("role is invalid"))
    }

    pub fn create_input(&self) -> AdminResult<CreateUserInput> {
        Ok(CreateUserInput {
            name: self.name.clone(),
            occupation: self.occupation.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role()?,
        })
    }

    pub fn update_input(&self) -> AdminResult<UpdateUserInput> {
        Ok(UpdateUserInput {
            name: self.name.clone(),
            occupation: self.occupation.clone(),
            email: self.email.clone(),
            role: self.role()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignForm {
    /// Owner; only on the create form
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goal_amount: String,
    #[serde(default)]
    pub perks: String,
}

impl CampaignForm {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            user_id: campaign.user_id.to_string(),
            name: campaign.name.clone(),
            short_description: campaign.short_description.clone(),
            description: campaign.description.clone(),
            goal_amount: campaign.goal_amount.to_string(),
            perks: campaign.perks.clone(),
        }
    }

    pub fn owner(&self) -> AdminResult<UserId> {
        self.user_id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(UserId::from_raw)
            .ok_or_else(|| AdminError::invalid("campaign owner is required"))
    }

    /// A blank or non-numeric goal reads as 0 and fails campaign validation
    pub fn input(&self) -> CampaignInput {
        CampaignInput {
            name: self.name.clone(),
            short_description: self.short_description.clone(),
            description: self.description.clone(),
            perks: self.perks.clone(),
            goal_amount: self.goal_amount.trim().parse().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_user_and_rejects_unknown() {
        let mut form = UserForm::default();
        assert_eq!(form.create_input().unwrap().role, UserRole::User);

        form.role = "admin".into();
        assert_eq!(form.update_input().unwrap().role, UserRole::Admin);

        form.role = "root".into();
        assert!(matches!(form.create_input(), Err(AdminError::Validation(_))));
    }

    #[test]
    fn test_campaign_form_parsing() {
        let form = CampaignForm {
            user_id: " 3 ".into(),
            goal_amount: "abc".into(),
            ..CampaignForm::default()
        };
        assert_eq!(form.owner().unwrap(), UserId::from_raw(3));
        assert_eq!(form.input().goal_amount, 0);

        let blank = CampaignForm::default();
        assert!(blank.owner().is_err());
    }
}
