use iamport_rust::{apis::auth::Credentials, Iamporter};
use reqwest::Url;

static IAMPORT_API_URL: &str = "https://api.iamport.kr/";

pub struct TestContext {
    pub client: Iamporter,
    pub paid_imp_uid: String,
    pub paid_merchant_uid: String,
}

impl TestContext {
    pub async fn start() -> Self {
        // Take the required credentials from the env
        let imp_key = std::env::var("IAMPORT_IMP_KEY").unwrap();
        let imp_secret = std::env::var("IAMPORT_IMP_SECRET").unwrap();
        let paid_imp_uid = std::env::var("IAMPORT_PAID_IMP_UID").unwrap();
        let paid_merchant_uid = std::env::var("IAMPORT_PAID_MERCHANT_UID").unwrap();

        let client = Iamporter::new(Credentials::new(imp_key, imp_secret))
            .await
            .unwrap();

        Self {
            client,
            paid_imp_uid,
            paid_merchant_uid,
        }
    }

    pub fn api_url(&self) -> Url {
        Url::parse(IAMPORT_API_URL).unwrap()
    }

    /// The real API does not expose how many calls it received.
    pub fn api_calls(&self) -> Option<usize> {
        None
    }
}
