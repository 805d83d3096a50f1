//! Outbound request descriptors.
//!
//! A `RequestDescriptor` is built once by the typed endpoint helpers and may
//! be dispatched twice at most: the original attempt and a single replay
//! after a credential refresh. The replay bookkeeping lives in
//! `PendingRequest` instead of a hidden flag on the descriptor.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;

#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a JSON body. Serialization happens here so a replay sends
    /// exactly the same bytes as the first attempt.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A descriptor travelling through the dispatch pipeline.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub descriptor: RequestDescriptor,
    pub retried: bool,
}

impl PendingRequest {
    pub fn new(descriptor: RequestDescriptor) -> Self {
        Self {
            descriptor,
            retried: false,
        }
    }

    pub fn mark_retried(self) -> Self {
        Self {
            retried: true,
            ..self
        }
    }

    /// Whether a 401 on this attempt may still be recovered by a refresh.
    pub fn can_refresh(&self) -> bool {
        !self.retried
    }
}
