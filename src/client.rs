//! Module containing the main Iamport API client.

use crate::{
    apis::{
        auth::Credentials,
        banks::BanksApi,
        cards::CardsApi,
        payments::{CancelPaymentRequest, PaymentsApi},
        subscribe::{
            AgainPaymentRequest, Buyer, CardDetails, IssueBillkeyRequest, OnetimePaymentRequest,
            SubscribeCustomersApi, SubscribePaymentsApi,
        },
        EndpointClient,
    },
    authenticator::{IamportAuth, RequestSigner},
    common::DEFAULT_API_URL,
    error::{ApiError, Error},
    middlewares::{
        inject_user_agent::InjectUserAgentMiddleware,
        retry::{DynRetryPolicy, RetryMiddleware},
    },
    response::ResponseEnvelope,
};
use derive_builder::Builder;
use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryPolicy};
use reqwest_tracing::TracingMiddleware;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Authentication used to build an [`Iamporter`](crate::client::Iamporter).
#[derive(Debug, Clone)]
pub enum ClientAuth {
    /// API key and secret, exchanged for an access token when the client is built.
    Credentials(Credentials),
    /// An already authenticated provider, shared as is.
    Provider(IamportAuth),
}

impl From<Credentials> for ClientAuth {
    fn from(credentials: Credentials) -> Self {
        ClientAuth::Credentials(credentials)
    }
}

impl From<IamportAuth> for ClientAuth {
    fn from(auth: IamportAuth) -> Self {
        ClientAuth::Provider(auth)
    }
}

/// Client for the Iamport REST APIs.
///
/// All the API clients share one access token and one connection pool.
/// Requests using idempotent methods are retried on transient failures, while `POST` requests
/// are retried only when the connection could not be established.
///
/// The facade methods of this client unwrap the response envelope: they return the `response`
/// payload on success and fail with [`Error::ApiError`](crate::Error::ApiError) otherwise.
/// The per-namespace clients in the public fields return the raw
/// [`ResponseEnvelope`](crate::response::ResponseEnvelope) instead.
#[derive(Debug, Clone)]
pub struct Iamporter {
    /// Payments APIs client.
    pub payments: PaymentsApi,
    /// Billing keys APIs client.
    pub subscribe_customers: SubscribeCustomersApi,
    /// Recurring payments APIs client.
    pub subscribe_payments: SubscribePaymentsApi,
    /// Card issuers APIs client.
    pub cards: CardsApi,
    /// Banks APIs client.
    pub banks: BanksApi,
    auth: Arc<IamportAuth>,
}

impl Iamporter {
    /// Builds a new [`Iamporter`](crate::client::Iamporter) with the default configuration.
    pub async fn new(auth: impl Into<ClientAuth>) -> Result<Iamporter, Error> {
        IamporterBuilder::new(auth).build().await
    }

    /// Returns a new builder to configure a new [`Iamporter`](crate::client::Iamporter).
    pub fn builder(auth: impl Into<ClientAuth>) -> IamporterBuilder {
        IamporterBuilder::new(auth)
    }

    /// Authentication provider signing every request of this client.
    pub fn auth(&self) -> &IamportAuth {
        &self.auth
    }

    /// Looks up a payment by its Iamport id or, failing that, by the id assigned by the merchant.
    ///
    /// `imp_uid` wins when both are given.
    #[tracing::instrument(name = "Find Payment", skip(self))]
    pub async fn find_payment(
        &self,
        imp_uid: Option<&str>,
        merchant_uid: Option<&str>,
    ) -> Result<Value, Error> {
        let envelope = match (present(imp_uid), present(merchant_uid)) {
            (Some(imp_uid), _) => self.payments.get_by_imp_uid(imp_uid).await?,
            (None, Some(merchant_uid)) => {
                self.payments
                    .find_by_merchant_uid(merchant_uid, None, None)
                    .await?
            }
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "Either imp_uid or merchant_uid must be given".to_string(),
                ))
            }
        };

        process_response(envelope)
    }

    /// Cancels a payment, fully or partially.
    ///
    /// When both `imp_uid` and `merchant_uid` are set, only `imp_uid` is sent.
    #[tracing::instrument(
        name = "Cancel Payment (facade)",
        skip(self, request),
        fields(imp_uid = ?request.imp_uid, merchant_uid = ?request.merchant_uid)
    )]
    pub async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<Value, Error> {
        let mut request = request.clone();
        request.imp_uid = request.imp_uid.filter(|s| !s.is_empty());
        request.merchant_uid = request.merchant_uid.filter(|s| !s.is_empty());

        if request.imp_uid.is_none() && request.merchant_uid.is_none() {
            return Err(Error::InvalidArgument(
                "Either imp_uid or merchant_uid must be given".to_string(),
            ));
        }
        if request.imp_uid.is_some() {
            request.merchant_uid = None;
        }

        process_response(self.payments.cancel(&request).await?)
    }

    /// Issues a billing key for a card and stores it under `customer_uid`.
    #[tracing::instrument(
        name = "Create Billing Key",
        skip(self, request),
        fields(customer_uid = %request.customer_uid)
    )]
    pub async fn create_billkey(&self, request: &CreateBillkeyRequest) -> Result<Value, Error> {
        require(&[
            ("customer_uid", request.customer_uid.as_str()),
            ("card_number", request.card_number.as_str()),
            ("expiry", request.expiry.as_str()),
            ("birth", request.birth.as_str()),
        ])?;

        let issue_request = IssueBillkeyRequest {
            card: CardDetails {
                card_number: request.card_number.clone(),
                expiry: request.expiry.clone(),
                birth: request.birth.clone(),
                pwd_2digit: request.pwd_2digit.clone(),
            },
            pg: request.pg.clone(),
            customer_name: request.customer_name.clone(),
            customer_tel: request.customer_tel.clone(),
            customer_email: request.customer_email.clone(),
            customer_addr: request.customer_addr.clone(),
            customer_postcode: request.customer_postcode.clone(),
        };

        process_response(
            self.subscribe_customers
                .issue_billkey(&request.customer_uid, &issue_request)
                .await?,
        )
    }

    /// Gets the billing key stored under `customer_uid`.
    #[tracing::instrument(name = "Find Billing Key", skip(self))]
    pub async fn find_billkey(&self, customer_uid: &str) -> Result<Value, Error> {
        require(&[("customer_uid", customer_uid)])?;

        process_response(self.subscribe_customers.get_billkey(customer_uid).await?)
    }

    /// Deletes the billing key stored under `customer_uid`.
    #[tracing::instrument(name = "Delete Billing Key (facade)", skip(self))]
    pub async fn delete_billkey(&self, customer_uid: &str) -> Result<Value, Error> {
        require(&[("customer_uid", customer_uid)])?;

        process_response(self.subscribe_customers.delete_billkey(customer_uid).await?)
    }

    /// Charges a card or a stored billing key.
    ///
    /// - With card details (`card_number`, `expiry` and `birth`, all or none), pays once
    ///   with the card. If `customer_uid` is also set, Iamport stores the card under it.
    /// - Without card details, charges the billing key stored under `customer_uid`.
    #[tracing::instrument(
        name = "Create Payment",
        skip(self, request),
        fields(merchant_uid = %request.merchant_uid, amount = request.amount)
    )]
    pub async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Value, Error> {
        require(&[
            ("merchant_uid", request.merchant_uid.as_str()),
            ("name", request.name.as_str()),
        ])?;

        let card_fields = [
            ("card_number", present(request.card_number.as_deref())),
            ("expiry", present(request.expiry.as_deref())),
            ("birth", present(request.birth.as_deref())),
        ];
        let customer_uid = present(request.customer_uid.as_deref());

        let envelope = match card_fields {
            [(_, Some(card_number)), (_, Some(expiry)), (_, Some(birth))] => {
                let onetime_request = OnetimePaymentRequest {
                    merchant_uid: request.merchant_uid.clone(),
                    amount: request.amount,
                    tax_free: request.tax_free,
                    name: Some(request.name.clone()),
                    card: CardDetails {
                        card_number: card_number.to_string(),
                        expiry: expiry.to_string(),
                        birth: birth.to_string(),
                        pwd_2digit: request.pwd_2digit.clone(),
                    },
                    customer_uid: customer_uid.map(str::to_string),
                    pg: request.pg.clone(),
                    buyer: request.buyer.clone(),
                    card_quota: request.card_quota,
                    custom_data: request.custom_data.clone(),
                    notice_url: request.notice_url.clone(),
                };

                self.subscribe_payments.onetime(&onetime_request).await?
            }
            [(_, None), (_, None), (_, None)] => {
                let customer_uid = customer_uid.ok_or_else(|| {
                    Error::InvalidArgument(
                        "customer_uid is required when no card details are given".to_string(),
                    )
                })?;

                let again_request = AgainPaymentRequest {
                    customer_uid: customer_uid.to_string(),
                    merchant_uid: request.merchant_uid.clone(),
                    amount: request.amount,
                    tax_free: request.tax_free,
                    name: request.name.clone(),
                    buyer: request.buyer.clone(),
                    card_quota: request.card_quota,
                    custom_data: request.custom_data.clone(),
                    notice_url: request.notice_url.clone(),
                };

                self.subscribe_payments.again(&again_request).await?
            }
            partial => {
                let missing: Vec<&str> = partial
                    .iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| *name)
                    .collect();
                return Err(Error::InvalidArgument(format!(
                    "Incomplete card details, missing: {}",
                    missing.join(", ")
                )));
            }
        };

        process_response(envelope)
    }
}

/// Builder for an [`Iamporter`](crate::client::Iamporter).
#[derive(Debug)]
pub struct IamporterBuilder {
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    api_url: Url,
    auth: ClientAuth,
}

impl IamporterBuilder {
    /// Creates a new builder to configure an [`Iamporter`](crate::client::Iamporter).
    pub fn new(auth: impl Into<ClientAuth>) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: Some(DynRetryPolicy(Arc::new(default_retry_policy()))),
            api_url: Url::parse(DEFAULT_API_URL).unwrap(),
            auth: auth.into(),
        }
    }

    /// Consumes the builder and builds a new [`Iamporter`](crate::client::Iamporter).
    ///
    /// When built from [`Credentials`](crate::apis::auth::Credentials), the token exchange
    /// happens here, through the same HTTP client used by every API.
    pub async fn build(self) -> Result<Iamporter, Error> {
        let client = build_client_with_middleware(self.client, self.retry_policy);

        let auth = match self.auth {
            ClientAuth::Provider(auth) => auth,
            ClientAuth::Credentials(credentials) => {
                if credentials.is_empty() {
                    return Err(Error::Unauthorized(Some(
                        "Credentials were not provided".to_string(),
                    )));
                }

                IamportAuth::authenticate(&credentials, Some(&client), &self.api_url).await?
            }
        };

        let auth = Arc::new(auth);
        let signer: Arc<dyn RequestSigner> = auth.clone();
        let client = Some(client);

        Ok(Iamporter {
            payments: EndpointClient::new(signer.clone(), client.clone(), self.api_url.clone()),
            subscribe_customers: EndpointClient::new(
                signer.clone(),
                client.clone(),
                self.api_url.clone(),
            ),
            subscribe_payments: EndpointClient::new(
                signer.clone(),
                client.clone(),
                self.api_url.clone(),
            ),
            cards: EndpointClient::new(signer.clone(), client.clone(), self.api_url.clone()),
            banks: EndpointClient::new(signer, client, self.api_url),
            auth,
        })
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a specific [`RetryPolicy`](retry_policies::RetryPolicy) to use when retrying transient failures.
    ///
    /// To disable automatic retrying of failed requests, use `None`.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(DynRetryPolicy);
        self
    }

    /// Sets the base URL of the Iamport APIs.
    ///
    /// Defaults to: `https://api.iamport.kr/`
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}

/// Card or billing key payment, see [`Iamporter::create_payment`](crate::client::Iamporter::create_payment).
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct CreatePaymentRequest {
    #[builder(setter(into))]
    pub merchant_uid: String,
    #[builder(setter(into))]
    pub name: String,
    pub amount: u64,
    #[builder(default, setter(strip_option))]
    pub tax_free: Option<u64>,
    #[builder(default, setter(into, strip_option))]
    pub card_number: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub expiry: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub birth: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub pwd_2digit: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_uid: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub pg: Option<String>,
    #[serde(flatten)]
    #[builder(default)]
    pub buyer: Buyer,
    #[builder(default, setter(strip_option))]
    pub card_quota: Option<u32>,
    #[builder(default, setter(into, strip_option))]
    pub custom_data: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub notice_url: Option<String>,
}

/// Billing key issuance, see [`Iamporter::create_billkey`](crate::client::Iamporter::create_billkey).
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct CreateBillkeyRequest {
    #[builder(setter(into))]
    pub customer_uid: String,
    #[builder(setter(into))]
    pub card_number: String,
    #[builder(setter(into))]
    pub expiry: String,
    #[builder(setter(into))]
    pub birth: String,
    #[builder(default, setter(into, strip_option))]
    pub pwd_2digit: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub pg: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_tel: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_email: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_addr: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_postcode: Option<String>,
}

/// Retries after the first attempt, for every request the policy applies to.
const DEFAULT_MAX_RETRIES: u32 = 3;

fn default_retry_policy() -> ExponentialBackoff {
    ExponentialBackoff::builder().build_with_max_retries(DEFAULT_MAX_RETRIES)
}

fn build_client_with_middleware(
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(InjectUserAgentMiddleware::new());

    if let Some(retry_policy) = retry_policy {
        builder = builder.with(RetryMiddleware::new(retry_policy));
    }

    builder.build()
}

/// Turns an envelope into its payload, or into the matching error.
fn process_response(envelope: ResponseEnvelope) -> Result<Value, Error> {
    if envelope.status() == StatusCode::UNAUTHORIZED.as_u16() {
        return Err(Error::Unauthorized(envelope.message().map(str::to_string)));
    }

    if !envelope.is_succeed() {
        return Err(ApiError::from(envelope).into());
    }

    Ok(envelope.into_data())
}

/// Empty strings count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn require(fields: &[(&str, &str)]) -> Result<(), Error> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "Missing required arguments: {}",
            missing.join(", ")
        )))
    }
}
