//! Authentication endpoints.
//!
//! Login and the password-recovery calls run before a session exists, so
//! they bypass the refresh-and-replay path: a 401 there means the supplied
//! credentials are wrong.

use serde::Serialize;
use serde_json::json;

use crate::models::User;

use super::client::TokenResponse;
use super::{ApiClient, ApiError, RequestDescriptor};

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

impl ApiClient {
    /// Regular user login; returns the issued credential
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String, ApiError> {
        self.issue_token(RequestDescriptor::post("/auth/login").json(credentials)?)
            .await
    }

    /// Staff login used by the console; returns the issued credential
    pub async fn admin_login(&self, credentials: &LoginCredentials) -> Result<String, ApiError> {
        self.issue_token(RequestDescriptor::post("/auth/admin/login").json(credentials)?)
            .await
    }

    async fn issue_token(&self, descriptor: RequestDescriptor) -> Result<String, ApiError> {
        let response = self.request_once(descriptor).await?;
        let TokenResponse { token } = Self::decode(response).await?;
        Ok(token)
    }

    /// Fetch the principal behind the current credential
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(RequestDescriptor::get("/auth/user")).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.execute_empty(RequestDescriptor::put("/auth/password").json(change)?)
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let descriptor =
            RequestDescriptor::post("/auth/forgot-password").json(&json!({ "email": email }))?;
        self.request_once(descriptor).await?;
        Ok(())
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        let descriptor = RequestDescriptor::post("/auth/reset-password").json(reset)?;
        self.request_once(descriptor).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::REFRESH_PATH;
    use crate::storage::MemoryStorage;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_admin_login_returns_token() {
        let server = MockServer::start();
        let login = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/admin/login")
                .json_body(json!({ "email": "ops@example.com", "password": "hunter2" }));
            then.status(200).json_body(json!({ "token": "abc.def.ghi" }));
        });

        let client = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        let token = client
            .admin_login(&LoginCredentials::new("ops@example.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(token, "abc.def.ghi");
        login.assert_calls(1);
    }

    #[tokio::test]
    async fn test_forgot_password_does_not_refresh() {
        let server = MockServer::start();
        let forgot = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/forgot-password")
                .json_body(json!({ "email": "nobody@example.com" }));
            then.status(404).json_body(json!({ "message": "No account with that email" }));
        });
        let refresh = server.mock(|when, then| {
            when.method(POST).path(REFRESH_PATH);
            then.status(200).json_body(json!({ "token": "x" }));
        });

        let client = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        let err = client.forgot_password("nobody@example.com").await.unwrap_err();

        assert_eq!(err.server_message(), Some("No account with that email"));
        forgot.assert_calls(1);
        refresh.assert_calls(0);
    }

    #[tokio::test]
    async fn test_change_password_sends_camel_case() {
        let server = MockServer::start();
        let change = server.mock(|when, then| {
            when.method(PUT)
                .path("/auth/password")
                .json_body(json!({ "currentPassword": "old", "newPassword": "new" }));
            then.status(200).json_body(json!({ "message": "Password updated" }));
        });

        let client = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        client.set_token(Some("tok"));
        client
            .change_password(&PasswordChange {
                current_password: "old".to_string(),
                new_password: "new".to_string(),
            })
            .await
            .unwrap();

        change.assert_calls(1);
    }
}
