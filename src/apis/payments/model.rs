use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Status of a payment, used to filter lookups.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    All,
    Ready,
    Paid,
    Cancelled,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::All => "all",
            PaymentStatus::Ready => "ready",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order of payment listings. Iamport defaults to [`Sorting::StartedDesc`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Sorting {
    #[serde(rename = "-started")]
    StartedDesc,
    #[serde(rename = "started")]
    StartedAsc,
    #[serde(rename = "-paid")]
    PaidDesc,
    #[serde(rename = "paid")]
    PaidAsc,
    #[serde(rename = "-updated")]
    UpdatedDesc,
    #[serde(rename = "updated")]
    UpdatedAsc,
}

/// Filters for [`PaymentsApi::list_by_status`](crate::apis::payments::PaymentsApi).
///
/// The search window spans at most 90 days. Without `from`/`to`, Iamport searches
/// the last 90 days.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct PaymentStatusQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Payments per page, up to 100.
    pub limit: Option<u32>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub to: Option<DateTime<Utc>>,
    pub sorting: Option<Sorting>,
}

/// Full or partial cancellation of a payment.
///
/// Either `imp_uid` or `merchant_uid` identifies the payment. When both are set,
/// only `imp_uid` is sent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct CancelPaymentRequest {
    pub imp_uid: Option<String>,
    pub merchant_uid: Option<String>,
    /// Amount to cancel. The whole remaining amount if not set.
    pub amount: Option<u64>,
    pub tax_free: Option<u64>,
    /// Cancellable amount the caller expects, checked by Iamport before cancelling.
    pub checksum: Option<u64>,
    pub reason: Option<String>,
    /// Refund account holder, for virtual account payments.
    pub refund_holder: Option<String>,
    pub refund_bank: Option<String>,
    pub refund_account: Option<String>,
}
