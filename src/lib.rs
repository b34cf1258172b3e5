//! Rust client for the [Iamport](https://www.iamport.kr) REST APIs.
//!
//! Check out also the official Iamport [API documentation](https://api.iamport.kr).
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Sign up on the [Iamport admin console](https://admin.iamport.kr) and copy your REST API key
//! and secret from the system settings page.
//!
//! ## Initialize a new `Iamporter`
//!
//! Create a new [`Iamporter`](crate::client::Iamporter) from your API key and secret.
//! The access token is requested right away, so invalid credentials fail here.
//!
//! ```rust,no_run
//! # use iamport_rust::{Iamporter, Error, apis::auth::Credentials};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let iamporter = Iamporter::new(Credentials::new("imp_key", "imp_secret")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! An already authenticated [`IamportAuth`](crate::authenticator::IamportAuth) can be shared
//! between several clients instead:
//!
//! ```rust,no_run
//! # use iamport_rust::{Iamporter, IamportAuth, Error};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let auth = IamportAuth::new("imp_key", "imp_secret").await?;
//! let iamporter = Iamporter::new(auth).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The token is never refreshed. Build a new client before
//! [`expires_at`](crate::apis::auth::AccessToken::expires_at) if it has to live longer.
//!
//! ## Find a payment
//!
//! ```rust,no_run
//! # use iamport_rust::{Iamporter, Error};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let iamporter: Iamporter = unreachable!();
//! #
//! let payment = iamporter.find_payment(Some("imp_448280090638"), None).await?;
//!
//! println!("Payment status: {}", payment["status"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Charge a billing key
//!
//! ```rust,no_run
//! # use iamport_rust::{Iamporter, Error, client::CreatePaymentRequestBuilder};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let iamporter: Iamporter = unreachable!();
//! #
//! let request = CreatePaymentRequestBuilder::default()
//!     .merchant_uid("order-1234")
//!     .name("Monthly plan")
//!     .amount(9900)
//!     .customer_uid("customer-1234")
//!     .build()
//!     .unwrap();
//! let payment = iamporter.create_payment(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Lower level APIs
//!
//! Every Iamport namespace has its own client, exposed as a field of
//! [`Iamporter`](crate::client::Iamporter). These return the whole
//! [`ResponseEnvelope`](crate::response::ResponseEnvelope) and never fail on an unsuccessful one.
//!
//! ```rust,no_run
//! # use iamport_rust::{Iamporter, Error, apis::payments::PaymentStatus};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let iamporter: Iamporter = unreachable!();
//! #
//! let envelope = iamporter
//!     .payments
//!     .find_all_by_merchant_uid("order-1234", Some(PaymentStatus::Paid), None, None)
//!     .await?;
//!
//! if envelope.is_succeed() {
//!     tracing::info!("Payments: {}", envelope.data());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! To run a demo, use `cargo run` like this:
//!
//! ```shell
//! cargo run --example find_payment
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod authenticator;
pub mod client;
mod common;
pub mod error;
mod middlewares;
pub mod response;

pub use authenticator::{IamportAuth, RequestSigner};
pub use client::Iamporter;
pub use error::Error;
pub use response::ResponseEnvelope;
