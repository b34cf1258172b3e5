use iamport_rust::{
    client::{CreateBillkeyRequest, CreateBillkeyRequestBuilder},
    Error,
};
use uuid::Uuid;

pub static MOCK_CARD_NUMBER: &str = "4092-0230-1234-1234";
pub static MOCK_EXPIRY: &str = "2030-12";
pub static MOCK_BIRTH: &str = "960714";

pub fn new_uid(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

pub fn billkey_request(customer_uid: &str) -> CreateBillkeyRequest {
    CreateBillkeyRequestBuilder::default()
        .customer_uid(customer_uid)
        .card_number(MOCK_CARD_NUMBER)
        .expiry(MOCK_EXPIRY)
        .birth(MOCK_BIRTH)
        .pwd_2digit("12")
        .build()
        .unwrap()
}

/// Asserts the error is an unsuccessful envelope and returns the vendor message.
pub fn api_error_message(err: Error) -> String {
    match err {
        Error::ApiError(e) => e.message().unwrap_or_default().to_string(),
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}
