//! Clients for the various Iamport APIs.
//!
//! Every API binds an [`EndpointClient`] to one URL namespace.
//! The operations of each namespace are implemented on `EndpointClient<Namespace>`.

use crate::{
    authenticator::RequestSigner, common::build_url, response::ResponseEnvelope, Error,
};
use reqwest::{Method, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fmt::{Debug, Formatter},
    marker::PhantomData,
    sync::Arc,
};

pub mod auth;
pub mod banks;
pub mod cards;
pub mod payments;
pub mod subscribe;
#[cfg(test)]
mod test_helpers;

/// Query string or form parameters of a request.
pub type Params = BTreeMap<String, Value>;

/// URL prefix shared by all the endpoints of an API.
pub trait Namespace {
    const NAMESPACE: &'static str;
}

/// Generic client for the endpoints living under the namespace `N`.
///
/// Requests are signed with the configured [`RequestSigner`](crate::authenticator::RequestSigner)
/// and their responses are returned as a [`ResponseEnvelope`](crate::response::ResponseEnvelope).
/// No method of this client fails because of an unsuccessful envelope.
pub struct EndpointClient<N> {
    signer: Arc<dyn RequestSigner>,
    client: Option<ClientWithMiddleware>,
    api_url: Url,
    _namespace: PhantomData<fn() -> N>,
}

impl<N: Namespace> EndpointClient<N> {
    /// Creates a new client.
    ///
    /// If `client` is `None`, every request goes through a new one-off HTTP client.
    pub fn new(
        signer: Arc<dyn RequestSigner>,
        client: Option<ClientWithMiddleware>,
        api_url: Url,
    ) -> Self {
        Self {
            signer,
            client,
            api_url,
            _namespace: PhantomData,
        }
    }

    /// Full URL of an endpoint of this namespace.
    pub fn build_url(&self, endpoint: &str) -> String {
        build_url(
            self.api_url.as_str(),
            &format!("{}{}", N::NAMESPACE, endpoint),
        )
    }

    /// Sends a `GET` request with `params` in the query string.
    pub async fn get(&self, endpoint: &str, params: &Params) -> Result<ResponseEnvelope, Error> {
        self.send(Method::GET, endpoint, |r| r.query(params)).await
    }

    /// Sends a `POST` request with `params` as a form-encoded body.
    pub async fn post(&self, endpoint: &str, params: &Params) -> Result<ResponseEnvelope, Error> {
        self.send(Method::POST, endpoint, |r| r.form(params)).await
    }

    /// Sends a `DELETE` request.
    pub async fn delete(&self, endpoint: &str) -> Result<ResponseEnvelope, Error> {
        self.send(Method::DELETE, endpoint, |r| r).await
    }

    async fn send<F>(
        &self,
        method: Method,
        endpoint: &str,
        with_params: F,
    ) -> Result<ResponseEnvelope, Error>
    where
        F: FnOnce(reqwest_middleware::RequestBuilder) -> reqwest_middleware::RequestBuilder,
    {
        let client = self
            .client
            .clone()
            .unwrap_or_else(|| reqwest::Client::new().into());

        let request = with_params(client.request(method, self.build_url(endpoint)));
        let response = self.signer.sign(request)?.send().await?;
        let envelope = ResponseEnvelope::from_response(response).await?;

        if !envelope.is_succeed() {
            tracing::debug!(
                status = envelope.status(),
                code = ?envelope.code(),
                message = ?envelope.message(),
                "Unsuccessful Iamport response"
            );
        }

        Ok(envelope)
    }
}

impl<N> Clone for EndpointClient<N> {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            client: self.client.clone(),
            api_url: self.api_url.clone(),
            _namespace: PhantomData,
        }
    }
}

impl<N: Namespace> Debug for EndpointClient<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointClient")
            .field("namespace", &N::NAMESPACE)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Keeps only the parameters whose value is not `null`.
///
/// Iamport treats an absent field differently from an empty one,
/// so optional parameters must never be sent as `null`.
pub fn build_params<I, K>(params: I) -> Params
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    params
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.into(), v))
        .collect()
}

/// Serializes a request model into [`Params`], dropping the fields set to `None`.
pub(crate) fn to_params<T: Serialize>(request: &T) -> Result<Params, Error> {
    match serde_json::to_value(request).map_err(|e| Error::Other(e.into()))? {
        Value::Object(map) => Ok(build_params(map)),
        other => Err(Error::Other(anyhow::anyhow!(
            "Request parameters must serialize to an object, got: {}",
            other
        ))),
    }
}

/// Percent-encodes a value interpolated into an endpoint path.
pub(crate) fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
