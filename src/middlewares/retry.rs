use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, Request, Response};
use reqwest_middleware::{Middleware, Next};
use reqwest_retry::RetryTransientMiddleware;
use retry_policies::{RetryDecision, RetryPolicy};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};
use task_local_extensions::Extensions;

/// Middleware that retries failed requests according to a retry policy.
///
/// - Idempotent requests (`GET`, `HEAD`, `OPTIONS`, `TRACE`, `PUT` or `DELETE`) are retried
///   on any transient failure: connection errors, timeouts, `408`, `429` and `5xx` responses.
/// - Any other request is retried only when the connection could not be established,
///   since Iamport offers no idempotency key to deduplicate a `POST` that reached the server.
pub struct RetryMiddleware {
    inner: RetryTransientMiddleware<DynRetryPolicy>,
    retry_policy: DynRetryPolicy,
}

impl RetryMiddleware {
    pub fn new(retry_policy: DynRetryPolicy) -> Self {
        Self {
            inner: RetryTransientMiddleware::new_with_policy(retry_policy.clone()),
            retry_policy,
        }
    }

    async fn retry_connection_errors(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let mut n_past_retries = 0;
        loop {
            let duplicate = req.try_clone().ok_or_else(|| {
                reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                    "Request object is not clonable. Are you passing a streaming body?"
                ))
            })?;

            match next.clone().run(duplicate, extensions).await {
                Err(reqwest_middleware::Error::Reqwest(e)) if e.is_connect() => {
                    match self.retry_policy.should_retry(n_past_retries) {
                        RetryDecision::Retry { execute_after } => {
                            let wait = (execute_after - Utc::now()).to_std().unwrap_or_default();
                            tracing::warn!(
                                "Connection failed: {}. Retry attempt #{}. Sleeping {:?} before the next attempt",
                                e,
                                n_past_retries + 1,
                                wait
                            );
                            tokio::time::sleep(wait).await;
                            n_past_retries += 1;
                        }
                        RetryDecision::DoNotRetry => return Err(e.into()),
                    }
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl Middleware for RetryMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let is_idempotent = matches!(
            *req.method(),
            Method::GET
                | Method::HEAD
                | Method::OPTIONS
                | Method::TRACE
                | Method::PUT
                | Method::DELETE
        );

        if is_idempotent {
            self.inner.handle(req, extensions, next).await
        } else {
            self.retry_connection_errors(req, extensions, next).await
        }
    }
}

/// Wrapper type around a retry policy because `dyn RetryPolicy` does not implement `RetryPolicy`.
#[derive(Clone)]
pub struct DynRetryPolicy(pub Arc<dyn RetryPolicy + Send + Sync + 'static>);

impl RetryPolicy for DynRetryPolicy {
    fn should_retry(&self, n_past_retries: u32) -> RetryDecision {
        self.0.should_retry(n_past_retries)
    }
}

impl Debug for DynRetryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRetryPolicy").finish_non_exhaustive()
    }
}
