// src/domain/account.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Tenant,
    Landlord,
    Manager,
    Admin,
    #[default]
    Guest,
}

impl Role {
    /// Anything the backend says that we don't recognise is a guest.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "tenant" => Role::Tenant,
            "landlord" => Role::Landlord,
            "manager" => Role::Manager,
            "admin" => Role::Admin,
            _ => Role::Guest,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Role::Tenant => "tenant",
            Role::Landlord => "landlord",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }

    pub fn can_extend_leases(self) -> bool {
        self == Role::Tenant
    }
}

/// Backend user returned by a successful password sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub expires_in: i64,
}

/// One row of `get_activity_feed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}
