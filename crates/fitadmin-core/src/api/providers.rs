//! Instructor and gym endpoints, including verification.

use serde_json::Value;

use crate::models::{Gym, Instructor, ListQuery, Page};

use super::{ApiClient, ApiError, RequestDescriptor};

impl ApiClient {
    // ===== Instructors =====

    pub async fn fetch_instructors(&self, query: &ListQuery) -> Result<Page<Instructor>, ApiError> {
        self.fetch_page("/admin/instructors", "instructors", query)
            .await
    }

    /// Instructors still waiting for verification
    pub async fn fetch_pending_instructors(&self) -> Result<Page<Instructor>, ApiError> {
        self.fetch_instructors(&ListQuery::default().verified(false))
            .await
    }

    pub async fn fetch_instructor(&self, id: &str) -> Result<Instructor, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/instructors/{}", id)))
            .await
    }

    pub async fn verify_instructor(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::put(format!("/admin/instructors/{}/verify", id)))
            .await
    }

    pub async fn fetch_nearby_instructors(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.fetch(
            RequestDescriptor::get("/users/nearby/instructors").query_pairs(params.iter().copied()),
        )
        .await
    }

    // ===== Gyms =====

    pub async fn fetch_gyms(&self, query: &ListQuery) -> Result<Page<Gym>, ApiError> {
        self.fetch_page("/admin/gyms", "gyms", query).await
    }

    pub async fn fetch_pending_gyms(&self) -> Result<Page<Gym>, ApiError> {
        self.fetch_gyms(&ListQuery::default().verified(false)).await
    }

    pub async fn fetch_gym(&self, id: &str) -> Result<Gym, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/gyms/{}", id)))
            .await
    }

    pub async fn verify_gym(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::put(format!("/admin/gyms/{}/verify", id)))
            .await
    }

    pub async fn fetch_nearby_gyms(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::get("/gyms/nearby").query_pairs(params.iter().copied()))
            .await
    }

    pub async fn search_gyms(&self, query: &str) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::get("/gyms/search").query("query", query))
            .await
    }

    pub async fn fetch_gym_instructors(&self, gym_id: &str) -> Result<Value, ApiError> {
        self.fetch(RequestDescriptor::get(format!("/gyms/{}/instructors", gym_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::CREDENTIAL_HEADER;
    use crate::storage::MemoryStorage;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_pending_instructors_filter() {
        let server = MockServer::start();
        let list = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/instructors")
                .query_param("verified", "false");
            then.status(200).json_body(json!({
                "instructors": [{
                    "_id": "i1",
                    "isVerified": false,
                    "user": { "_id": "u1", "name": "Lee" }
                }],
                "pagination": { "total": 1 }
            }));
        });

        let client = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        let page = client.fetch_pending_instructors().await.unwrap();

        list.assert_calls(1);
        assert_eq!(page.items[0].name(), "Lee");
    }

    #[tokio::test]
    async fn test_verify_gym_carries_credential() {
        let server = MockServer::start();
        let verify = server.mock(|when, then| {
            when.method(PUT)
                .path("/admin/gyms/g42/verify")
                .header(CREDENTIAL_HEADER, "tok");
            then.status(200).json_body(json!({ "message": "Gym verified" }));
        });

        let client = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        client.set_token(Some("tok"));
        let body = client.verify_gym("g42").await.unwrap();

        verify.assert_calls(1);
        assert_eq!(body["message"], "Gym verified");
    }

    #[tokio::test]
    async fn test_search_gyms_query() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(GET).path("/gyms/search").query_param("query", "iron");
            then.status(200).json_body(json!([]));
        });

        let client = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        client.search_gyms("iron").await.unwrap();
        search.assert_calls(1);
    }
}
