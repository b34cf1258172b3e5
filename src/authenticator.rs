//! Token exchange and request signing.

use crate::{
    apis::auth::{AccessToken, Credentials},
    common::{build_url, DEFAULT_API_URL, GET_TOKEN_ENDPOINT},
    error::Error,
    response::ResponseEnvelope,
};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Url,
};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use std::fmt::Debug;

/// Attaches credentials to outgoing requests.
///
/// Every endpoint client holds a signer and runs each request through it before sending.
pub trait RequestSigner: Debug + Send + Sync {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder, Error>;
}

/// Holds the access token obtained from Iamport.
///
/// Building an `IamportAuth` performs the token exchange right away,
/// so an existing instance always carries a token.
#[derive(Debug, Clone)]
pub struct IamportAuth {
    access_token: AccessToken,
}

impl IamportAuth {
    /// Exchanges an API key and secret for an access token against the production API.
    pub async fn new(
        imp_key: impl Into<String>,
        imp_secret: impl Into<String>,
    ) -> Result<Self, Error> {
        Self::authenticate(
            &Credentials::new(imp_key, imp_secret),
            None,
            &Url::parse(DEFAULT_API_URL).unwrap(),
        )
        .await
    }

    /// Exchanges the given credentials for an access token.
    ///
    /// Uses `client` if provided, otherwise a one-off HTTP client.
    #[tracing::instrument(
        name = "Get Access Token",
        level = "debug",
        skip(credentials, client),
        fields(imp_key = %credentials.imp_key)
    )]
    pub async fn authenticate(
        credentials: &Credentials,
        client: Option<&ClientWithMiddleware>,
        api_url: &Url,
    ) -> Result<Self, Error> {
        let client = client
            .cloned()
            .unwrap_or_else(|| reqwest::Client::new().into());

        let response = client
            .post(build_url(api_url.as_str(), GET_TOKEN_ENDPOINT))
            .form(credentials)
            .send()
            .await?;
        let envelope = ResponseEnvelope::from_response(response).await?;

        if !envelope.is_succeed() {
            tracing::debug!(
                status = envelope.status(),
                code = ?envelope.code(),
                "Token exchange rejected"
            );
            return Err(Error::Unauthorized(envelope.message().map(str::to_string)));
        }

        let res: RawAuthenticationResponse = envelope.data_as().unwrap_or_default();
        let token = match res.access_token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(Error::Unauthorized(envelope.message().map(str::to_string))),
        };

        tracing::info!("Got new access token");

        Ok(Self {
            access_token: AccessToken {
                token: token.into(),
                issued_at: res.now.and_then(from_unix_timestamp),
                expires_at: res.expired_at.and_then(from_unix_timestamp),
            },
        })
    }

    /// Returns the [`AccessToken`](crate::apis::auth::AccessToken) attached to every request.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

impl RequestSigner for IamportAuth {
    /// Sets the `Authorization` header to the bare token. Iamport does not expect a `Bearer ` prefix.
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        let mut header_value = HeaderValue::from_str(self.access_token.expose_secret())
            .map_err(|e| Error::Other(e.into()))?;
        header_value.set_sensitive(true);

        Ok(request.header(AUTHORIZATION, header_value))
    }
}

fn from_unix_timestamp(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Payload of a successful `users/getToken` response.
#[derive(serde::Deserialize, Default)]
struct RawAuthenticationResponse {
    access_token: Option<String>,
    now: Option<i64>,
    expired_at: Option<i64>,
}
