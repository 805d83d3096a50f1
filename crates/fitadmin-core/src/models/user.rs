use serde::{Deserialize, Serialize};

use super::de::deserialize_count;
use super::status::AccountStatus;

/// A platform user. The signed-in principal returned by `/auth/user` uses
/// the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// `_id` is authoritative; a virtual `id` copy is ignored
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_type: Option<String>,
    pub account_status: Option<AccountStatus>,
    #[serde(default)]
    pub is_admin: bool,
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub age: Option<u32>,
    pub fitness_level: Option<String>,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub preferred_workouts: Vec<String>,
    pub profile_image: Option<String>,
    pub location: Option<Location>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Location {
    pub fn display_address(&self) -> Option<&str> {
        self.formatted_address
            .as_deref()
            .or(self.address.as_deref())
            .filter(|a| !a.is_empty())
    }
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self.account_status, Some(AccountStatus::Suspended))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_principal() {
        let json = r#"{"_id":"6500aa","name":"Ana Ortiz","email":"ana@example.com","userType":"admin","isAdmin":true,"accountStatus":"active","fitnessGoals":["strength"],"location":{"type":"Point","coordinates":[-73.9,40.7],"address":"New York, NY"},"createdAt":"2024-02-01T10:00:00.000Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, "6500aa");
        assert!(user.is_admin);
        assert_eq!(user.account_status, Some(AccountStatus::Active));
        assert_eq!(user.fitness_goals, vec!["strength".to_string()]);
        assert_eq!(
            user.location.as_ref().and_then(Location::display_address),
            Some("New York, NY")
        );
        assert_eq!(user.display_name(), "Ana Ortiz");
    }

    #[test]
    fn test_virtual_id_and_float_numbers_are_tolerated() {
        let json = r#"{"_id":"6500aa","id":"6500aa","name":"Ana","age":31.0,"location":{"address":"NY","formattedAddress":"New York, NY"}}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, "6500aa");
        assert_eq!(user.age, Some(31));
        assert_eq!(
            user.location.as_ref().and_then(Location::display_address),
            Some("New York, NY")
        );
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = User {
            email: Some("x@example.com".to_string()),
            ..User::default()
        };
        assert_eq!(user.display_name(), "x@example.com");
        assert_eq!(User::default().display_name(), "Unknown");
    }
}
