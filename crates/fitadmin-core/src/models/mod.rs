//! Data models for the admin console.
//!
//! This module contains the documents the backend returns:
//!
//! - `User`: the signed-in principal and user rows in admin lists
//! - `Instructor`, `Gym`: verifiable providers
//! - `Consultation`, `Match`, `Workout`: activity records
//! - `DashboardStats`: aggregate counters for the dashboard
//! - `Page`, `ListQuery`: pagination envelope and filters
//!
//! Documents use camelCase keys and Mongo-style `_id` identifiers.

pub mod activity;
pub mod dashboard;
mod de;
pub mod pagination;
pub mod provider;
pub mod reference;
pub mod status;
pub mod user;

pub use activity::{Cardio, Consultation, HeartRate, Match, Workout};
pub use dashboard::{DashboardStats, StatBlock, Trend};
pub use pagination::{ListQuery, Page, DEFAULT_LIMIT};
pub use provider::{Gym, GymAddress, Instructor};
pub use reference::Ref;
pub use status::{AccountStatus, ConsultationStatus, MatchStatus};
pub use user::{Location, User};
