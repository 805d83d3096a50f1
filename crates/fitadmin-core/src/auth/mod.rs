//! Authentication module for the console session.
//!
//! This module provides:
//! - `SessionStore`: the session lifecycle (init, login, logout, refresh)
//! - `Credential`: local decoding of the bearer token's expiry
//!
//! The credential itself is persisted through `crate::storage`.

pub mod session;
pub mod token;

pub use session::{AuthFailure, AuthState, SessionStore, SESSION_EXPIRED_MESSAGE};
pub use token::{Claims, Credential, TokenError};
