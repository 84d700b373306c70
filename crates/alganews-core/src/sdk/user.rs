//! User models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Editor,
    Assistant,
    Manager,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Editor => "EDITOR",
            Role::Assistant => "ASSISTANT",
            Role::Manager => "MANAGER",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarUrls {
    pub default: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_urls: Option<AvatarUrls>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankAccountType {
    Checking,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub bank_code: String,
    pub agency: String,
    pub number: String,
    pub digit: String,
    #[serde(rename = "type")]
    pub account_type: BankAccountType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailed {
    #[serde(flatten)]
    pub summary: UserSummary,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub taxpayer_id: Option<String>,
    #[serde(default)]
    pub price_per_word: Option<f64>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub bank_account: Option<BankAccount>,
}

/// Body of user creation and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxpayer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_word: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserInput {
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            role,
            bio: None,
            phone: None,
            birthdate: None,
            taxpayer_id: None,
            price_per_word: None,
            location: None,
            skills: Vec::new(),
            bank_account: None,
            avatar_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detailed_flattens_summary() {
        let json = r#"{
            "id": 7,
            "name": "Ana",
            "email": "ana@alganews.com",
            "role": "EDITOR",
            "active": true,
            "createdAt": "2021-06-30T12:00:00Z",
            "birthdate": "1990-02-01",
            "skills": [{"name": "Rust", "percentage": 90}]
        }"#;
        let user: UserDetailed = serde_json::from_str(json).unwrap();

        assert_eq!(user.summary.id, 7);
        assert_eq!(user.summary.role, Role::Editor);
        assert_eq!(user.birthdate, NaiveDate::from_ymd_opt(1990, 2, 1));
        assert_eq!(user.skills.len(), 1);
        assert!(user.bank_account.is_none());
    }

    #[test]
    fn test_input_skips_empty_optionals() {
        let input = UserInput::new("Ana", "ana@alganews.com", Role::Assistant);
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"name": "Ana", "email": "ana@alganews.com", "role": "ASSISTANT"})
        );
    }
}
