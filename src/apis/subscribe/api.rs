use crate::{
    apis::{
        build_params, path_segment,
        subscribe::{AgainPaymentRequest, IssueBillkeyRequest, OnetimePaymentRequest},
        to_params, EndpointClient, Namespace, Params,
    },
    response::ResponseEnvelope,
    Error,
};
use serde_json::json;

/// Namespace of the billing key APIs.
#[derive(Debug, Clone, Copy)]
pub enum SubscribeCustomers {}

impl Namespace for SubscribeCustomers {
    const NAMESPACE: &'static str = "subscribe/customers";
}

/// Namespace of the recurring payments APIs.
#[derive(Debug, Clone, Copy)]
pub enum SubscribePayments {}

impl Namespace for SubscribePayments {
    const NAMESPACE: &'static str = "subscribe/payments";
}

/// Iamport billing key APIs client.
pub type SubscribeCustomersApi = EndpointClient<SubscribeCustomers>;

/// Iamport recurring payments APIs client.
pub type SubscribePaymentsApi = EndpointClient<SubscribePayments>;

impl EndpointClient<SubscribeCustomers> {
    /// Gets the billing key stored under `customer_uid`.
    #[tracing::instrument(name = "Get Billing Key", skip(self))]
    pub async fn get_billkey(&self, customer_uid: &str) -> Result<ResponseEnvelope, Error> {
        self.get(&format!("/{}", path_segment(customer_uid)), &Params::new())
            .await
    }

    /// Issues a billing key for a card and stores it under `customer_uid`.
    #[tracing::instrument(name = "Issue Billing Key", skip(self, request), fields(pg = ?request.pg))]
    pub async fn issue_billkey(
        &self,
        customer_uid: &str,
        request: &IssueBillkeyRequest,
    ) -> Result<ResponseEnvelope, Error> {
        self.post(
            &format!("/{}", path_segment(customer_uid)),
            &to_params(request)?,
        )
        .await
    }

    /// Deletes the billing key stored under `customer_uid`.
    #[tracing::instrument(name = "Delete Billing Key", skip(self))]
    pub async fn delete_billkey(&self, customer_uid: &str) -> Result<ResponseEnvelope, Error> {
        self.delete(&format!("/{}", path_segment(customer_uid)))
            .await
    }
}

impl EndpointClient<SubscribePayments> {
    /// Pays once with card details, without any prior authentication of the card holder.
    #[tracing::instrument(
        name = "Onetime Payment",
        skip(self, request),
        fields(merchant_uid = %request.merchant_uid, amount = request.amount)
    )]
    pub async fn onetime(
        &self,
        request: &OnetimePaymentRequest,
    ) -> Result<ResponseEnvelope, Error> {
        self.post("/onetime", &to_params(request)?).await
    }

    /// Charges a stored billing key.
    #[tracing::instrument(
        name = "Again Payment",
        skip(self, request),
        fields(
            customer_uid = %request.customer_uid,
            merchant_uid = %request.merchant_uid,
            amount = request.amount,
        )
    )]
    pub async fn again(&self, request: &AgainPaymentRequest) -> Result<ResponseEnvelope, Error> {
        self.post("/again", &to_params(request)?).await
    }

    /// Cancels scheduled payments of a billing key.
    ///
    /// Cancels every scheduled payment of `customer_uid` if `merchant_uid` is `None`.
    #[tracing::instrument(name = "Unschedule Payments", skip(self))]
    pub async fn unschedule(
        &self,
        customer_uid: &str,
        merchant_uid: Option<&str>,
    ) -> Result<ResponseEnvelope, Error> {
        self.post(
            "/unschedule",
            &build_params([
                ("customer_uid", json!(customer_uid)),
                ("merchant_uid", json!(merchant_uid)),
            ]),
        )
        .await
    }
}
