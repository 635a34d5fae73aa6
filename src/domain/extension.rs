// src/domain/extension.rs

use crate::domain::lease::Lease;
use crate::domain::payment::PaymentMethod;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionError {
    #[error("requested end date {requested} is not after current end date {current}")]
    NotAfterCurrentEnd {
        current: NaiveDate,
        requested: NaiveDate,
    },

    #[error("extension must cover at least one calendar month (got {0})")]
    NonPositiveMonths(i32),

    #[error("extension amount overflows ({months} x {monthly_rent})")]
    AmountOverflow { months: i32, monthly_rent: i64 },
}

/// Calendar-month difference between two dates.
///
/// Only year and month are compared, so 2024-01-31 -> 2024-02-01 is one
/// month while 2024-01-01 -> 2024-01-31 is zero.
pub fn extension_months(current_end: NaiveDate, candidate_end: NaiveDate) -> i32 {
    (candidate_end.year() - current_end.year()) * 12
        + (candidate_end.month() as i32 - current_end.month() as i32)
}

/// A validated price for extending a lease to `requested_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionQuote {
    pub current_end: NaiveDate,
    pub requested_end: NaiveDate,
    pub months: i32,
    pub monthly_rent: i64,
    pub total: i64,
}

pub fn quote(
    current_end: NaiveDate,
    requested_end: NaiveDate,
    monthly_rent: i64,
) -> Result<ExtensionQuote, ExtensionError> {
    if requested_end <= current_end {
        return Err(ExtensionError::NotAfterCurrentEnd {
            current: current_end,
            requested: requested_end,
        });
    }

    let months = extension_months(current_end, requested_end);
    if months <= 0 {
        return Err(ExtensionError::NonPositiveMonths(months));
    }

    let total = i64::from(months)
        .checked_mul(monthly_rent)
        .ok_or(ExtensionError::AmountOverflow {
            months,
            monthly_rent,
        })?;

    Ok(ExtensionQuote {
        current_end,
        requested_end,
        months,
        monthly_rent,
        total,
    })
}

pub fn quote_for_lease(
    lease: &Lease,
    requested_end: NaiveDate,
) -> Result<ExtensionQuote, ExtensionError> {
    quote(lease.next_due_date, requested_end, lease.rent_amount)
}

/// Parameters of the `create_extension_request` RPC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExtensionRequest {
    #[serde(rename = "p_tenant_id")]
    pub tenant_id: String,
    #[serde(rename = "p_lease_id")]
    pub lease_id: String,
    #[serde(rename = "p_current_end_date")]
    pub current_end_date: NaiveDate,
    #[serde(rename = "p_requested_end_date")]
    pub requested_end_date: NaiveDate,
    #[serde(rename = "p_extension_months")]
    pub extension_months: i32,
    #[serde(rename = "p_total_amount")]
    pub total_amount: i64,
    #[serde(rename = "p_notes")]
    pub notes: String,
    #[serde(rename = "p_payment_method")]
    pub payment_method: Option<PaymentMethod>,
}

impl NewExtensionRequest {
    pub fn new(
        lease: &Lease,
        quote: &ExtensionQuote,
        notes: &str,
        payment_method: Option<PaymentMethod>,
    ) -> Self {
        Self {
            tenant_id: lease.tenant_id.clone(),
            lease_id: lease.id.clone(),
            current_end_date: quote.current_end,
            requested_end_date: quote.requested_end,
            extension_months: quote.months,
            total_amount: quote.total,
            notes: notes.trim().to_string(),
            payment_method,
        }
    }
}
