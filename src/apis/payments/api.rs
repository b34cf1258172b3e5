use crate::{
    apis::{
        build_params, path_segment,
        payments::{CancelPaymentRequest, PaymentStatus, PaymentStatusQuery, Sorting},
        to_params, EndpointClient, Namespace, Params,
    },
    response::ResponseEnvelope,
    Error,
};
use serde_json::json;

/// Namespace of the payments APIs.
#[derive(Debug, Clone, Copy)]
pub enum Payments {}

impl Namespace for Payments {
    const NAMESPACE: &'static str = "payments";
}

/// Iamport payments APIs client.
pub type PaymentsApi = EndpointClient<Payments>;

impl EndpointClient<Payments> {
    /// Gets the amount breakdown per payment method of a payment.
    ///
    /// Iamport only supports this for PAYCO payments.
    #[tracing::instrument(name = "Get Payment Balance", skip(self))]
    pub async fn get_balance(&self, imp_uid: &str) -> Result<ResponseEnvelope, Error> {
        self.get(
            &format!("/{}/balance", path_segment(imp_uid)),
            &Params::new(),
        )
        .await
    }

    /// Gets a payment by its Iamport id.
    #[tracing::instrument(name = "Get Payment by imp_uid", skip(self))]
    pub async fn get_by_imp_uid(&self, imp_uid: &str) -> Result<ResponseEnvelope, Error> {
        self.get(&format!("/{}", path_segment(imp_uid)), &Params::new())
            .await
    }

    /// Gets a payment by the id assigned by the merchant.
    ///
    /// If several payments share the same `merchant_uid`, the first one according to `sorting` is returned.
    #[tracing::instrument(name = "Find Payment by merchant_uid", skip(self))]
    pub async fn find_by_merchant_uid(
        &self,
        merchant_uid: &str,
        payment_status: Option<PaymentStatus>,
        sorting: Option<Sorting>,
    ) -> Result<ResponseEnvelope, Error> {
        self.get(
            &format!(
                "/find/{}{}",
                path_segment(merchant_uid),
                status_suffix(payment_status)
            ),
            &build_params([("sorting", json!(sorting))]),
        )
        .await
    }

    /// Lists all the payments sharing the same `merchant_uid`.
    #[tracing::instrument(name = "Find All Payments by merchant_uid", skip(self))]
    pub async fn find_all_by_merchant_uid(
        &self,
        merchant_uid: &str,
        payment_status: Option<PaymentStatus>,
        page: Option<u32>,
        sorting: Option<Sorting>,
    ) -> Result<ResponseEnvelope, Error> {
        self.get(
            &format!(
                "/findAll/{}{}",
                path_segment(merchant_uid),
                status_suffix(payment_status)
            ),
            &build_params([("page", json!(page)), ("sorting", json!(sorting))]),
        )
        .await
    }

    /// Lists payments in a given status, 20 per page by default.
    #[tracing::instrument(name = "List Payments by Status", skip(self, query))]
    pub async fn list_by_status(
        &self,
        payment_status: PaymentStatus,
        query: &PaymentStatusQuery,
    ) -> Result<ResponseEnvelope, Error> {
        self.get(&format!("/status/{}", payment_status), &to_params(query)?)
            .await
    }

    /// Cancels a payment, fully or partially.
    #[tracing::instrument(
        name = "Cancel Payment",
        skip(self, request),
        fields(
            imp_uid = ?request.imp_uid,
            merchant_uid = ?request.merchant_uid,
            amount = ?request.amount,
        )
    )]
    pub async fn cancel(&self, request: &CancelPaymentRequest) -> Result<ResponseEnvelope, Error> {
        self.post("/cancel", &to_params(request)?).await
    }

    /// Registers the expected amount of a payment before it is started.
    ///
    /// Iamport rejects the payment if the amount paid differs.
    #[tracing::instrument(name = "Prepare Payment", skip(self))]
    pub async fn prepare(&self, merchant_uid: &str, amount: u64) -> Result<ResponseEnvelope, Error> {
        self.post(
            "/prepare",
            &build_params([
                ("merchant_uid", json!(merchant_uid)),
                ("amount", json!(amount)),
            ]),
        )
        .await
    }

    /// Gets the amount registered with [`prepare`](Self::prepare).
    #[tracing::instrument(name = "Get Prepared Payment", skip(self))]
    pub async fn get_prepared(&self, merchant_uid: &str) -> Result<ResponseEnvelope, Error> {
        self.get(
            &format!("/prepare/{}", path_segment(merchant_uid)),
            &Params::new(),
        )
        .await
    }
}

fn status_suffix(payment_status: Option<PaymentStatus>) -> String {
    payment_status
        .map(|s| format!("/{}", s))
        .unwrap_or_default()
}
