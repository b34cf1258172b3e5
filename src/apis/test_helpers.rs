//! Shared fixtures for the endpoint clients unit tests.

use crate::{
    apis::{EndpointClient, Namespace},
    authenticator::RequestSigner,
    Error,
};
use reqwest::Url;
use reqwest_middleware::RequestBuilder;
use serde_json::json;
use std::{collections::BTreeMap, sync::Arc};
use wiremock::{matchers::any, Mock, MockServer, Request, ResponseTemplate};

#[derive(Debug)]
pub struct NoopSigner;

impl RequestSigner for NoopSigner {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(request)
    }
}

/// Starts a mock server answering every request with an empty successful envelope.
pub async fn mock_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": null,
            "response": {}
        })))
        .mount(&mock_server)
        .await;
    mock_server
}

pub fn api<N: Namespace>(mock_server: &MockServer) -> EndpointClient<N> {
    EndpointClient::new(
        Arc::new(NoopSigner),
        None,
        Url::parse(&mock_server.uri()).unwrap(),
    )
}

pub async fn last_request(mock_server: &MockServer) -> Request {
    mock_server
        .received_requests()
        .await
        .unwrap()
        .pop()
        .unwrap()
}

pub fn parse_form(body: &[u8]) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(body).into_owned().collect()
}
