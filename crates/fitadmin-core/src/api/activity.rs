//! Consultation, match, workout and dashboard endpoints.

use serde_json::{json, Value};

use crate::models::{
    Consultation, ConsultationStatus, DashboardStats, ListQuery, Match, Page, Workout,
};

use super::{ApiClient, ApiError, RequestDescriptor};

impl ApiClient {
    pub async fn fetch_dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.fetch(RequestDescriptor::get("/admin/dashboard")).await
    }

    // ===== Consultations =====

    pub async fn fetch_consultations(
        &self,
        query: &ListQuery,
    ) -> Result<Page<Consultation>, ApiError> {
        self.fetch_page("/admin/consultations", "consultations", query)
            .await
    }

    pub async fn fetch_consultation(&self, id: &str) -> Result<Consultation, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/consultations/{}", id)))
            .await
    }

    pub async fn update_consultation_status(
        &self,
        id: &str,
        status: &ConsultationStatus,
    ) -> Result<Value, ApiError> {
        let descriptor = RequestDescriptor::put(format!("/consultations/{}/status", id))
            .json(&json!({ "status": status }))?;
        self.fetch(descriptor).await
    }

    // ===== Matches =====

    pub async fn fetch_matches(&self, query: &ListQuery) -> Result<Page<Match>, ApiError> {
        self.fetch_page("/admin/matches", "matches", query).await
    }

    pub async fn fetch_match(&self, id: &str) -> Result<Match, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/matches/{}", id)))
            .await
    }

    pub async fn fetch_active_matches(&self) -> Result<Vec<Match>, ApiError> {
        self.fetch(RequestDescriptor::get("/matches/active")).await
    }

    pub async fn fetch_pending_matches(&self) -> Result<Vec<Match>, ApiError> {
        self.fetch(RequestDescriptor::get("/matches/pending")).await
    }

    // ===== Workouts =====

    pub async fn fetch_workouts(&self, query: &ListQuery) -> Result<Page<Workout>, ApiError> {
        self.fetch_page("/admin/workouts", "workouts", query).await
    }

    pub async fn fetch_workout(&self, id: &str) -> Result<Workout, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/workouts/{}", id)))
            .await
    }

    /// AI analysis of a workout; the shape is owned by the analysis service
    pub async fn analyze_workout(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/ai/workouts/{}/analyze", id)))
            .await
    }
}
