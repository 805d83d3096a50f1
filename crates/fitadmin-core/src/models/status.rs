//! Status values shared by list filters and status-mutation endpoints.
//!
//! Unknown strings from the server are kept in `Other` instead of failing
//! the whole document.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
    Other(String),
}

impl AccountStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Other(s) => s,
        }
    }
}

impl From<String> for AccountStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => AccountStatus::Active,
            "inactive" => AccountStatus::Inactive,
            "suspended" => AccountStatus::Suspended,
            _ => AccountStatus::Other(s),
        }
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsultationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Other(String),
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Confirmed => "confirmed",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Cancelled => "cancelled",
            ConsultationStatus::Other(s) => s,
        }
    }
}

impl From<String> for ConsultationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => ConsultationStatus::Pending,
            "confirmed" => ConsultationStatus::Confirmed,
            "completed" => ConsultationStatus::Completed,
            "cancelled" => ConsultationStatus::Cancelled,
            _ => ConsultationStatus::Other(s),
        }
    }
}

impl From<ConsultationStatus> for String {
    fn from(status: ConsultationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
    Other(String),
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Active => "active",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
            MatchStatus::Other(s) => s,
        }
    }
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => MatchStatus::Pending,
            "active" => MatchStatus::Active,
            "completed" => MatchStatus::Completed,
            "cancelled" => MatchStatus::Cancelled,
            _ => MatchStatus::Other(s),
        }
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
