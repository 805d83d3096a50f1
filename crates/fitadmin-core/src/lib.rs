//! Core library for the fitness-matching platform's admin console.
//!
//! This crate holds everything that is not presentation:
//!
//! - `api`: the authenticated HTTP client with one-shot credential refresh,
//!   and typed helpers for every admin collection
//! - `auth`: the session store and credential decoding
//! - `models`: documents returned by the backend
//! - `storage`: persisted client-local slots (credential, theme)
//! - `config`: backend URL, timeouts, storage backend

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;
pub mod theme;

pub use api::{ApiClient, ApiError, ClientEvent};
pub use auth::{AuthState, SessionStore};
pub use config::Config;
