//! REST API client module for the admin backend.
//!
//! This module provides the `ApiClient`, which attaches the `x-auth-token`
//! credential to every request and transparently refreshes it once when
//! the server answers 401, plus typed helpers for each admin collection.

pub mod activity;
pub mod auth;
pub mod client;
pub mod error;
pub mod providers;
pub mod request;
pub mod users;

pub use auth::{LoginCredentials, PasswordChange, PasswordReset};
pub use client::{ApiClient, ClientEvent, CREDENTIAL_HEADER, REFRESH_PATH};
pub use error::ApiError;
pub use request::{PendingRequest, RequestDescriptor};
pub use users::NewAdmin;
