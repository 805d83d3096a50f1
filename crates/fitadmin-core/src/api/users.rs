//! User administration endpoints.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::models::{AccountStatus, ListQuery, Page, User};

use super::{ApiClient, ApiError, RequestDescriptor};

/// Payload for creating another staff account
#[derive(Debug, Clone, Serialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiClient {
    /// Fetch one page of users
    pub async fn fetch_users(&self, query: &ListQuery) -> Result<Page<User>, ApiError> {
        self.fetch_page("/admin/users", "users", query).await
    }

    pub async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/admin/users/{}", id)))
            .await
    }

    /// Suspend, reactivate or deactivate an account
    pub async fn update_user_status(
        &self,
        id: &str,
        status: &AccountStatus,
    ) -> Result<Value, ApiError> {
        let descriptor = RequestDescriptor::put(format!("/admin/users/{}/status", id))
            .json(&json!({ "status": status }))?;
        self.fetch(descriptor).await
    }

    pub async fn create_admin_user(&self, admin: &NewAdmin) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::post("/admin/users/admin").json(admin)?)
            .await
    }

    pub async fn fetch_nearby_users(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.fetch(
            RequestDescriptor::get("/users/nearby/users").query_pairs(params.iter().copied()),
        )
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.execute_empty(RequestDescriptor::delete(format!("/users/{}", id)))
            .await
    }

    /// Fetch a collection page and unwrap its list envelope
    pub(crate) async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        query: &ListQuery,
    ) -> Result<Page<T>, ApiError> {
        let descriptor = RequestDescriptor::get(path).query_pairs(query.to_pairs());
        let envelope: Value = self.fetch(descriptor).await?;
        Page::from_envelope(envelope, key, query)
    }
}
