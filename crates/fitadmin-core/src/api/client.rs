//! API client for the fitness-matching platform's admin REST API.
//!
//! Every outbound call goes through `ApiClient::request`, which attaches the
//! current credential and recovers once from a 401 by refreshing the
//! credential and replaying the original request.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::storage::{SharedStorage, TOKEN_KEY};

use super::request::{PendingRequest, RequestDescriptor};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Header carrying the credential on every authenticated request
pub const CREDENTIAL_HEADER: &str = "x-auth-token";

/// Endpoint exchanging the current credential for a fresh one
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Capacity of the client event channel. Events are rare; a lagging
/// subscriber only needs to learn that *a* login is required.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Notifications the client raises for whoever drives the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Refresh failed; the credential was discarded and the user has to
    /// sign in again.
    LoginRequired,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// API client for the admin backend.
/// Clone is cheap and clones share the connection pool, the default
/// credential header and the event channel.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
    token: Arc<RwLock<Option<String>>>,
    storage: SharedStorage,
    events: broadcast::Sender<ClientEvent>,
}

impl ApiClient {
    /// Create a client with the default request timeout
    pub fn new(base_url: &str, storage: SharedStorage) -> Result<Self, ApiError> {
        Self::with_timeout(
            base_url,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage,
        )
    }

    pub fn from_config(config: &Config, storage: SharedStorage) -> Result<Self, ApiError> {
        Self::with_timeout(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
            storage,
        )
    }

    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
        storage: SharedStorage,
    ) -> Result<Self, ApiError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: Arc::new(RwLock::new(None)),
            storage,
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    // ===== Default credential header =====

    /// Set or clear the default credential header used by every
    /// subsequently dispatched request.
    pub fn set_token(&self, token: Option<&str>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = token.map(str::to_string);
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Persist a freshly issued credential and make it the default header.
    pub fn store_credential(&self, token: &str) {
        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            warn!(error = %e, "Failed to persist credential");
        }
        self.set_token(Some(token));
    }

    /// Forget the credential both in storage and in the default header.
    pub fn clear_credential(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove persisted credential");
        }
        self.set_token(None);
    }

    /// Read the persisted credential slot.
    pub fn persisted_credential(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted credential");
                None
            }
        }
    }

    // ===== Dispatch =====

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send a single attempt with the credential configured at this moment.
    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<Response, ApiError> {
        self.dispatch_with(descriptor, self.token()).await
    }

    /// Send a single attempt carrying `credential`, if any.
    async fn dispatch_with(
        &self,
        descriptor: &RequestDescriptor,
        credential: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = self.url(&descriptor.path);
        let mut builder = self.client.request(descriptor.method.clone(), &url);

        if !descriptor.query.is_empty() {
            builder = builder.query(&descriptor.query);
        }
        if let Some(token) = credential {
            builder = builder.header(CREDENTIAL_HEADER, token);
        }
        for (name, value) in &descriptor.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = descriptor.body {
            builder = builder.json(body);
        }

        debug!(method = %descriptor.method, url = %url, "Dispatching request");
        let response = builder.send().await?;
        Self::check_response(response).await
    }

    /// Dispatch a request, recovering once from an expired credential.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Response, ApiError> {
        self.execute(PendingRequest::new(descriptor)).await
    }

    /// Dispatch a request without the refresh-and-replay path. Used for
    /// calls made before a session exists (login, password reset), where a
    /// 401 means "wrong credentials" rather than "expired credential".
    pub async fn request_once(&self, descriptor: RequestDescriptor) -> Result<Response, ApiError> {
        self.execute(PendingRequest::new(descriptor).mark_retried()).await
    }

    async fn execute(&self, mut pending: PendingRequest) -> Result<Response, ApiError> {
        // The replay carries the refreshed credential even if the shared
        // slot changes before it is dispatched.
        let mut pinned: Option<String> = None;
        loop {
            let credential = pinned.take().or_else(|| self.token());
            match self.dispatch_with(&pending.descriptor, credential).await {
                Err(err) if err.is_unauthorized() && pending.can_refresh() => {
                    pending = pending.mark_retried();
                    debug!(path = %pending.descriptor.path, "Credential rejected, refreshing");

                    match self.refresh_credential().await {
                        Ok(token) => pinned = Some(token),
                        Err(refresh_err) => {
                            warn!(
                                error = %refresh_err,
                                "Credential refresh failed, session expired"
                            );
                            self.expire_session();
                            return Err(err);
                        }
                    }

                    debug!(
                        path = %pending.descriptor.path,
                        "Replaying request with refreshed credential"
                    );
                }
                result => return result,
            }
        }
    }

    /// Exchange the current credential for a new one, persist it and make
    /// it the default header. The refresh call is never itself refreshed.
    pub async fn refresh_credential(&self) -> Result<String, ApiError> {
        let descriptor = RequestDescriptor::post(REFRESH_PATH);
        let response = self.dispatch(&descriptor).await?;
        let TokenResponse { token } = Self::decode(response).await?;

        self.store_credential(&token);
        info!("Credential refreshed");
        Ok(token)
    }

    fn expire_session(&self) {
        self.clear_credential();
        // No subscribers simply means nobody is listening for redirects
        let _ = self.events.send(ClientEvent::LoginRequired);
    }

    // ===== Typed helpers =====

    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        // Mutation endpoints may answer with an empty body
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }

    /// Dispatch and decode a JSON response body
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        let response = self.request(descriptor).await?;
        Self::decode(response).await
    }

    /// Dispatch and discard whatever body the server returns
    pub async fn execute_empty(&self, descriptor: RequestDescriptor) -> Result<(), ApiError> {
        self.request(descriptor).await?;
        Ok(())
    }
}
