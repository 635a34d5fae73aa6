// src/domain/lease.rs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// An active lease (`room_tenants` row) as returned by `get_tenant_active_leases`.
/// Read-only on this side; the backend owns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lease {
    pub id: String,
    pub tenant_id: String,
    pub room_id: String,
    #[serde(default)]
    pub room_name: Option<String>,
    pub property_id: String,
    #[serde(default)]
    pub property_name: Option<String>,
    /// Monthly rent in whole currency units (RWF).
    #[serde(deserialize_with = "whole_amount")]
    pub rent_amount: i64,
    pub move_in_date: NaiveDate,
    /// Current end of the paid period. Extensions are computed from here.
    pub next_due_date: NaiveDate,
}

impl Lease {
    /// "Property · Room" label for lists, falling back to ids.
    pub fn label(&self) -> String {
        let property = self.property_name.as_deref().unwrap_or(&self.property_id);
        match self.room_name.as_deref() {
            Some(room) => format!("{property} · {room}"),
            None => property.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// What the backend hands back after `create_extension_request`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtensionReceipt {
    pub id: String,
    pub status: ApprovalStatus,
    pub payment_status: PaymentStatus,
}

/// Postgres `numeric` comes back as either `100000` or `100000.00`.
pub(crate) fn whole_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    value
        .as_f64()
        // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
        .ok_or_else(|| serde::de::Error::custom(format!("not a whole amount: {value}")))
}
