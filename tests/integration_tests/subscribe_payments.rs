use crate::{
    common::test_context::TestContext,
    integration_tests::helpers::{
        api_error_message, billkey_request, new_uid, MOCK_BIRTH, MOCK_CARD_NUMBER, MOCK_EXPIRY,
    },
};
use iamport_rust::{
    client::{CreatePaymentRequest, CreatePaymentRequestBuilder},
    Error,
};

fn payment_request() -> CreatePaymentRequestBuilder {
    let mut builder = CreatePaymentRequestBuilder::default();
    builder
        .merchant_uid(new_uid("order"))
        .name("Monthly plan")
        .amount(1000);
    builder
}

fn build(builder: &CreatePaymentRequestBuilder) -> CreatePaymentRequest {
    builder.build().unwrap()
}

#[tokio::test]
async fn again_payment_with_stored_billkey() {
    let ctx = TestContext::start().await;
    let customer_uid = new_uid("customer");

    ctx.client
        .create_billkey(&billkey_request(&customer_uid))
        .await
        .unwrap();

    let payment = ctx
        .client
        .create_payment(&build(payment_request().customer_uid(customer_uid.clone())))
        .await
        .unwrap();

    assert_eq!(payment["status"], "paid");
    assert_eq!(payment["amount"], 1000);
    assert_eq!(payment["customer_uid"], customer_uid.as_str());
}

#[tokio::test]
async fn again_payment_with_unknown_customer() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .create_payment(&build(payment_request().customer_uid(new_uid("customer"))))
        .await
        .expect_err("Expected error");

    assert_eq!(api_error_message(err), "등록되지 않은 구매자입니다.");
}

#[cfg(not(feature = "acceptance-tests"))]
#[tokio::test]
async fn onetime_payment_with_customer_uid_stores_the_card() {
    let ctx = TestContext::start().await;
    let customer_uid = new_uid("customer");

    // Full card details go through onetime, even with a customer_uid
    let payment = ctx
        .client
        .create_payment(&build(
            payment_request()
                .card_number(MOCK_CARD_NUMBER)
                .expiry(MOCK_EXPIRY)
                .birth(MOCK_BIRTH)
                .pwd_2digit("12")
                .customer_uid(customer_uid.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(payment["status"], "paid");

    // The customer can now be charged again without card details
    ctx.client.find_billkey(&customer_uid).await.unwrap();
    ctx.client
        .create_payment(&build(payment_request().customer_uid(customer_uid)))
        .await
        .unwrap();
}

#[tokio::test]
async fn onetime_payment_with_invalid_card_number() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .create_payment(&build(
            payment_request()
                .card_number("0000")
                .expiry(MOCK_EXPIRY)
                .birth(MOCK_BIRTH),
        ))
        .await
        .expect_err("Expected error");

    assert_eq!(
        api_error_message(err),
        "유효하지않은 카드번호를 입력하셨습니다."
    );
}

#[tokio::test]
async fn invalid_argument_combinations() {
    let ctx = TestContext::start().await;
    let calls_before = ctx.api_calls();

    let requests = [
        // Partial card details
        build(payment_request().card_number(MOCK_CARD_NUMBER)),
        build(
            payment_request()
                .card_number(MOCK_CARD_NUMBER)
                .expiry(MOCK_EXPIRY)
                .customer_uid(new_uid("customer")),
        ),
        // Neither card details nor customer_uid
        build(&payment_request()),
        build(payment_request().customer_uid("")),
        // Missing required fields
        build(payment_request().merchant_uid("").customer_uid(new_uid("customer"))),
        build(payment_request().name("").customer_uid(new_uid("customer"))),
    ];

    for request in &requests {
        let err = ctx
            .client
            .create_payment(request)
            .await
            .expect_err("Expected error");
        assert!(
            matches!(err, Error::InvalidArgument(_)),
            "Unexpected error for {:?}: {:?}",
            request,
            err
        );
    }

    assert_eq!(ctx.api_calls(), calls_before);
}
