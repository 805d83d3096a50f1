//! Instructors and gyms: the providers staff verify.

use serde::{Deserialize, Serialize};

use super::de::deserialize_count;
use super::reference::Ref;
use super::user::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user: Option<Ref<User>>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub experience: Option<u32>,
    pub hourly_rate: Option<f64>,
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub certificates: Vec<serde_json::Value>,
}

impl Instructor {
    pub fn name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(Ref::populated)
            .map(User::display_name)
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: Option<String>,
    pub address: Option<GymAddress>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Gym addresses arrive either as a single line or as a geocoded object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GymAddress {
    Line(String),
    #[serde(rename_all = "camelCase")]
    Structured {
        formatted_address: Option<String>,
        street: Option<String>,
        city: Option<String>,
        state: Option<String>,
        zip_code: Option<String>,
    },
}

impl Gym {
    /// Format the address as a single line.
    pub fn formatted_address(&self) -> Option<String> {
        let mut parts = Vec::new();
        match &self.address {
            Some(GymAddress::Line(line)) if !line.is_empty() => parts.push(line.clone()),
            Some(GymAddress::Structured {
                formatted_address: Some(formatted),
                ..
            }) if !formatted.is_empty() => return Some(formatted.clone()),
            Some(GymAddress::Structured { street: Some(street), .. }) if !street.is_empty() => {
                parts.push(street.clone())
            }
            _ => {}
        }
        for part in [&self.city, &self.state, &self.zip_code].into_iter().flatten() {
            if !part.is_empty() {
                parts.push(part.clone());
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
