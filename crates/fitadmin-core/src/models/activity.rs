//! Consultations, matches and workouts.
//!
//! These records are read-mostly from the console; only consultation status
//! is mutated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::deserialize_count;
use super::provider::Instructor;
use super::reference::Ref;
use super::status::{ConsultationStatus, MatchStatus};
use super::user::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user: Option<Ref<User>>,
    pub instructor: Option<Ref<Instructor>>,
    pub status: Option<ConsultationStatus>,
    pub consultation_type: Option<String>,
    pub start_time: Option<String>,
    /// Minutes
    #[serde(default, deserialize_with = "deserialize_count")]
    pub duration: Option<u32>,
    pub price: Option<f64>,
    pub location: Option<Value>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user: Option<Ref<User>>,
    pub instructor: Option<Ref<Instructor>>,
    #[serde(default)]
    pub users: Vec<Ref<User>>,
    pub match_type: Option<String>,
    pub status: Option<MatchStatus>,
    pub scheduled_time: Option<String>,
    pub location: Option<Value>,
    pub notes: Option<String>,
    #[serde(default)]
    pub messages: Vec<Value>,
    pub created_at: Option<String>,
}

impl Match {
    pub fn kind_display(&self) -> &str {
        self.match_type.as_deref().unwrap_or("Workout")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user: Option<Ref<User>>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    /// Minutes
    #[serde(default, deserialize_with = "deserialize_count")]
    pub duration: Option<u32>,
    pub calories: Option<f64>,
    pub heart_rate: Option<HeartRate>,
    pub cardio: Option<Cardio>,
    #[serde(default)]
    pub exercises: Vec<Value>,
    pub location: Option<Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeartRate {
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cardio {
    pub distance: Option<f64>,
    pub distance_unit: Option<String>,
    pub pace: Option<f64>,
    pub elevation_gain: Option<f64>,
}

impl Cardio {
    pub fn distance_display(&self) -> Option<String> {
        self.distance.map(|d| {
            format!("{:.2} {}", d, self.distance_unit.as_deref().unwrap_or("km"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_consultation() {
        let json = r#"{"_id":"c1","user":{"_id":"u1","name":"Kim"},"instructor":"i9","status":"pending","consultationType":"virtual","startTime":"2024-05-01T09:00:00Z","duration":45,"price":60}"#;
        let consultation: Consultation = serde_json::from_str(json).unwrap();
        assert_eq!(consultation.status, Some(ConsultationStatus::Pending));
        assert!(matches!(consultation.instructor, Some(Ref::Id(ref id)) if id == "i9"));
        assert_eq!(consultation.duration, Some(45));
    }

    #[test]
    fn test_parse_workout() {
        let json = r#"{"_id":"w1","name":"Morning run","type":"cardio","calories":420.5,"heartRate":{"avg":142,"max":171},"cardio":{"distance":8.25,"distanceUnit":"mi"},"exercises":[]}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.kind.as_deref(), Some("cardio"));
        assert_eq!(workout.heart_rate.as_ref().and_then(|h| h.avg), Some(142.0));
        assert_eq!(
            workout.cardio.as_ref().and_then(Cardio::distance_display).as_deref(),
            Some("8.25 mi")
        );
    }

    #[test]
    fn test_list_page_survives_virtual_ids_and_float_durations() {
        use crate::models::{ListQuery, Page};

        let envelope = serde_json::json!({
            "consultations": [
                { "_id": "c1", "id": "c1", "duration": 45.0, "status": "confirmed" },
                { "_id": "c2", "id": "c2", "duration": 30 }
            ],
            "pagination": { "total": 2 }
        });
        let page: Page<Consultation> =
            Page::from_envelope(envelope, "consultations", &ListQuery::default()).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "c1");
        assert_eq!(page.items[0].duration, Some(45));
        assert_eq!(page.items[1].duration, Some(30));
    }

    #[test]
    fn test_match_defaults() {
        let m: Match = serde_json::from_str(r#"{"_id":"m1","status":"active"}"#).unwrap();
        assert_eq!(m.kind_display(), "Workout");
        assert_eq!(m.status, Some(MatchStatus::Active));
        assert!(m.messages.is_empty());
    }
}
