use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// REST API key and secret issued by the Iamport admin console.
///
/// Serialized as the form body of the token exchange.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub imp_key: String,
    pub imp_secret: Token,
}

impl Credentials {
    pub fn new(imp_key: impl Into<String>, imp_secret: impl Into<Token>) -> Self {
        Self {
            imp_key: imp_key.into(),
            imp_secret: imp_secret.into(),
        }
    }

    /// Returns `true` if either the key or the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.imp_key.is_empty() || self.imp_secret.expose_secret().is_empty()
    }
}

/// Opaque access token used to authenticate to the Iamport APIs.
///
/// Iamport issues tokens with a fixed lifetime. The client never refreshes them:
/// once `expired_at` has passed, calls fail with [`Error::Unauthorized`](crate::Error::Unauthorized).
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub(crate) token: Token,
    pub(crate) issued_at: Option<DateTime<Utc>>,
    pub(crate) expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Actual token contents held by this `AccessToken` instance.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Server time at which the token was issued, if Iamport returned it.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    /// Expiration date of the token, if Iamport returned it.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl Deref for AccessToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        self.token()
    }
}

/// Wrapper for a secret string that makes it harder to accidentally expose secrets
/// and ensures the backing memory is wiped on drop.
///
/// It is a wrapper around a [`secrecy::Secret`](secrecy::Secret).
///
/// ```rust
/// # use iamport_rust::apis::auth::Token;
/// let token = Token::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", token).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`...
/// assert_eq!(token.expose_secret(), "supersecret");
///
/// // ... Or if serialized with Serde
/// let serialized = serde_json::to_string(&token).unwrap();
/// assert!(serialized.contains("supersecret"));
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Token(#[serde(serialize_with = "serialize_secret")] Secret<String>);

impl Token {
    /// Wraps a secret string in a new `Token`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl<T> From<T> for Token
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        Token::new(s)
    }
}

fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    secret.expose_secret().serialize(serializer)
}
