use crate::{
    common::test_context::TestContext,
    integration_tests::helpers::{api_error_message, billkey_request, new_uid},
};
use iamport_rust::Error;

#[tokio::test]
async fn create_find_and_delete_billkey() {
    let ctx = TestContext::start().await;
    let customer_uid = new_uid("customer");

    // Create
    let billkey = ctx
        .client
        .create_billkey(&billkey_request(&customer_uid))
        .await
        .unwrap();
    assert_eq!(billkey["customer_uid"], customer_uid.as_str());

    // Find
    let billkey = ctx.client.find_billkey(&customer_uid).await.unwrap();
    assert_eq!(billkey["customer_uid"], customer_uid.as_str());

    // Delete
    let billkey = ctx.client.delete_billkey(&customer_uid).await.unwrap();
    assert_eq!(billkey["customer_uid"], customer_uid.as_str());

    // It's gone
    let err = ctx
        .client
        .find_billkey(&customer_uid)
        .await
        .expect_err("Expected error");
    assert!(matches!(err, Error::ApiError(_)));
}

#[tokio::test]
async fn create_billkey_with_invalid_card_number() {
    let ctx = TestContext::start().await;

    let mut request = billkey_request(&new_uid("customer"));
    request.card_number = "1234-1234".to_string();

    let err = ctx
        .client
        .create_billkey(&request)
        .await
        .expect_err("Expected error");

    assert_eq!(
        api_error_message(err),
        "유효하지않은 카드번호를 입력하셨습니다."
    );
}

#[tokio::test]
async fn create_billkey_with_missing_fields() {
    let ctx = TestContext::start().await;
    let calls_before = ctx.api_calls();

    let mut request = billkey_request(&new_uid("customer"));
    request.expiry = String::new();
    request.birth = String::new();

    let err = ctx
        .client
        .create_billkey(&request)
        .await
        .expect_err("Expected error");

    assert!(
        matches!(err, Error::InvalidArgument(m) if m.contains("expiry") && m.contains("birth"))
    );
    assert_eq!(ctx.api_calls(), calls_before);
}

#[tokio::test]
async fn find_unknown_billkey() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .find_billkey("invalid-uid")
        .await
        .expect_err("Expected error");

    assert_eq!(
        api_error_message(err),
        "요청하신 customer_uid(invalid-uid)로 등록된 정보를 찾을 수 없습니다."
    );
}

#[tokio::test]
async fn billkey_operations_without_customer_uid() {
    let ctx = TestContext::start().await;
    let calls_before = ctx.api_calls();

    let err = ctx.client.find_billkey("").await.expect_err("Expected error");
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = ctx
        .client
        .delete_billkey("")
        .await
        .expect_err("Expected error");
    assert!(matches!(err, Error::InvalidArgument(_)));

    assert_eq!(ctx.api_calls(), calls_before);
}
