use anyhow::Context;
use iamport_rust::{apis::auth::Credentials, Iamporter};

#[derive(serde::Deserialize, Debug)]
struct Config {
    imp_key: String,
    imp_secret: String,
}

impl Config {
    /// Reads `config.toml` (or any format `config` supports) and `IAMPORT_*` env vars.
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("IAMPORT"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;
    let imp_uid = std::env::args()
        .nth(1)
        .context("Usage: find_payment <imp_uid>")?;

    // Setup Iamport client
    let iamporter = Iamporter::new(Credentials::new(config.imp_key, config.imp_secret)).await?;
    tracing::info!(
        expires_at = ?iamporter.auth().access_token().expires_at(),
        "Authenticated"
    );

    let payment = iamporter.find_payment(Some(imp_uid.as_str()), None).await?;

    println!("{}", serde_json::to_string_pretty(&payment)?);

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        eprintln!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
