
use actix_web::{web, App, HttpServer};
use chrono::Utc;
use reqwest::Url;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tokio::sync::oneshot;
use uuid::Uuid;

static MOCK_PAID_AMOUNT: u64 = 1000;

#[derive(Clone)]
struct MockServerConfiguration {
    imp_key: String,
    imp_secret: String,
    access_token: String,
}

#[derive(Clone, Default)]
struct MockServerStorageInner {
    /// Payments by `imp_uid`.
    payments: HashMap<String, Value>,
    /// Billing keys by `customer_uid`.
    billkeys: HashMap<String, Value>,
    /// Number of authenticated API calls received.
    api_calls: usize,
}

impl MockServerStorageInner {
    fn find_by_merchant_uid(&self, merchant_uid: &str) -> Option<&Value> {
        self.payments
            .values()
            .find(|p| p["merchant_uid"] == merchant_uid)
    }

    fn insert_paid_payment(
        &mut self,
        merchant_uid: &str,
        amount: u64,
        name: Option<&str>,
        customer_uid: Option<&str>,
    ) -> Value {
        let imp_uid = format!("imp_{}", &Uuid::new_v4().simple().to_string()[..12]);
        let payment = json!({
            "imp_uid": imp_uid,
            "merchant_uid": merchant_uid,
            "pay_method": "card",
            "name": name,
            "amount": amount,
            "cancel_amount": 0,
            "status": "paid",
            "customer_uid": customer_uid,
            "paid_at": Utc::now().timestamp(),
            "cancelled_at": 0
        });

        self.payments.insert(imp_uid, payment.clone());
        payment
    }
}

/// In-memory storage for payments and billing keys created on the mock server.
type MockServerStorage = Arc<RwLock<MockServerStorageInner>>;

/// Simple mock server for the Iamport APIs used in local integration tests.
pub struct IamportMockServer {
    url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    storage: MockServerStorage,
    paid_payment: Value,
}

impl IamportMockServer {
    pub async fn start(imp_key: &str, imp_secret: &str) -> Self {
        let configuration = MockServerConfiguration {
            imp_key: imp_key.to_string(),
            imp_secret: imp_secret.to_string(),
            access_token: Uuid::new_v4().to_string(),
        };

        // Seed the storage with one paid payment
        let storage = MockServerStorage::default();
        let paid_payment = storage.write().unwrap().insert_paid_payment(
            &format!("order-{}", Uuid::new_v4()),
            MOCK_PAID_AMOUNT,
            Some("Mock order"),
            None,
        );
        let storage_clone = storage.clone();

        // Setup the mock HTTP server and bind it to a random port
        let http_server_factory = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(configuration.clone()))
                .app_data(web::Data::new(storage.clone()))
                .service(web::resource("/users/getToken").route(web::post().to(routes::get_token)))
                .service(
                    web::resource("/payments/cancel").route(web::post().to(routes::cancel_payment)),
                )
                .service(
                    web::resource("/payments/find/{merchant_uid}")
                        .route(web::get().to(routes::find_payment_by_merchant_uid)),
                )
                .service(
                    web::resource("/payments/{imp_uid}")
                        .route(web::get().to(routes::get_payment_by_imp_uid)),
                )
                .service(
                    web::resource("/subscribe/customers/{customer_uid}")
                        .route(web::get().to(routes::get_billkey))
                        .route(web::post().to(routes::issue_billkey))
                        .route(web::delete().to(routes::delete_billkey)),
                )
                .service(
                    web::resource("/subscribe/payments/onetime")
                        .route(web::post().to(routes::onetime_payment)),
                )
                .service(
                    web::resource("/subscribe/payments/again")
                        .route(web::post().to(routes::again_payment)),
                )
                .service(web::resource("/cards").route(web::get().to(routes::list_cards)))
                .service(web::resource("/banks").route(web::get().to(routes::list_banks)))
        })
        .workers(1)
        .bind("127.0.0.1:0")
        .unwrap();

        // Retrieve the address and port the server was bound to
        let addr = http_server_factory.addrs().first().cloned().unwrap();

        // Prepare a oneshot channel to kill the HTTP server when this struct is dropped
        let (shutdown_sender, shutdown_recv) = oneshot::channel();

        // Start the server in another task
        let http_server = http_server_factory.run();
        tokio::spawn(async move {
            tokio::select! {
                _ = http_server => panic!("HTTP server crashed"),
                _ = shutdown_recv => { /* Intentional shutdown */ }
            }
        });

        Self {
            url: Url::parse(&format!("http://{}", addr)).unwrap(),
            shutdown: Some(shutdown_sender),
            storage: storage_clone,
            paid_payment,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn paid_payment(&self) -> &Value {
        &self.paid_payment
    }

    pub fn api_calls(&self) -> usize {
        self.storage.read().unwrap().api_calls
    }
}

impl Drop for IamportMockServer {
    fn drop(&mut self) {
        // Send a shutdown signal to the actix server on drop
        let _ = self.shutdown.take().unwrap().send(());
    }
}
