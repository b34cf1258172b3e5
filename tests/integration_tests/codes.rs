use crate::common::test_context::TestContext;

#[tokio::test]
async fn list_cards() {
    let ctx = TestContext::start().await;

    let envelope = ctx.client.cards.list().await.unwrap();

    assert!(envelope.is_succeed());
    assert!(!envelope.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_banks() {
    let ctx = TestContext::start().await;

    let envelope = ctx.client.banks.list().await.unwrap();

    assert!(envelope.is_succeed());
    let banks = envelope.data().as_array().unwrap();
    assert!(banks.iter().all(|b| b["code"].is_string()));
}
