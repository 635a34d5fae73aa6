// src/domain/payment.rs

use serde::Serialize;

/// Mobile-money providers the backend can settle through.
/// The client only records the choice; settlement happens server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MtnMomo,
    AirtelMoney,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::MtnMomo, PaymentMethod::AirtelMoney];

    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::MtnMomo => "mtn_momo",
            PaymentMethod::AirtelMoney => "airtel_money",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::MtnMomo => "MTN Mobile Money",
            PaymentMethod::AirtelMoney => "Airtel Money",
        }
    }
}
