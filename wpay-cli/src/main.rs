//! Wallet Pay store API command line tool
//!
//! Creates and previews orders and checks webhook signatures from a shell.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::ConfigLoader;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wpay_sdk::client::{Client, verify_webhook};
use wpay_sdk::objects::{CurrencyCode, MoneyAmount, OrderRequest};

/// Wallet Pay store API client
#[derive(Parser, Debug)]
#[command(name = "wpay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./wpay.toml")]
    config: PathBuf,

    /// Store API key, overrides the one in the configuration file
    #[arg(long, env = "WPAY_STORE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an order and print its preview
    CreateOrder(CreateOrderArgs),
    /// Print the current preview of an order
    Preview {
        /// Gateway order id
        #[arg(long)]
        id: String,
    },
    /// Check a webhook signature and print the parsed events
    VerifyWebhook {
        #[arg(long, default_value = "POST")]
        method: String,
        /// URI path the webhook was delivered to
        #[arg(long)]
        path: String,
        /// Value of the WalletPay-Timestamp header
        #[arg(long)]
        timestamp: String,
        /// Value of the WalletPay-Signature header
        #[arg(long)]
        signature: String,
        /// File holding the raw request body
        #[arg(long)]
        body_file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct CreateOrderArgs {
    /// Decimal amount, e.g. 1.50
    #[arg(long)]
    amount: String,
    #[arg(long)]
    currency: CurrencyCode,
    #[arg(long)]
    description: String,
    /// Order id in the merchant system
    #[arg(long)]
    external_id: String,
    #[arg(long, default_value_t = 3600)]
    timeout_seconds: u32,
    #[arg(long)]
    customer_telegram_id: i64,
    #[arg(long)]
    return_url: Option<String>,
    #[arg(long)]
    fail_return_url: Option<String>,
    #[arg(long)]
    custom_data: Option<String>,
}

impl CreateOrderArgs {
    fn into_request(self) -> OrderRequest {
        let mut request = OrderRequest::new(
            MoneyAmount::new(self.currency, self.amount),
            self.description,
            self.external_id,
            self.timeout_seconds,
            self.customer_telegram_id,
        );
        if let Some(url) = self.return_url {
            request = request.with_return_url(url);
        }
        if let Some(url) = self.fail_return_url {
            request = request.with_fail_return_url(url);
        }
        if let Some(data) = self.custom_data {
            request = request.with_custom_data(data);
        }
        request
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let options = ConfigLoader::new(&args.config, args.api_key)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;

    match args.command {
        Command::CreateOrder(create) => {
            let client = Client::new(options)?;
            let request = create.into_request();

            let preview = client.create_order(&request).await.map_err(|e| {
                tracing::error!(external_id = %request.external_id, "Failed to create order: {}", e);
                e
            })?;
            tracing::info!(order_id = %preview.id, status = %preview.status, "Order ready");
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        Command::Preview { id } => {
            let client = Client::new(options)?;
            let preview = client.get_preview_order(&id).await.map_err(|e| {
                tracing::error!(order_id = %id, "Failed to preview order: {}", e);
                e
            })?;
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        Command::VerifyWebhook {
            method,
            path,
            timestamp,
            signature,
            body_file,
        } => {
            let body = std::fs::read(&body_file)
                .with_context(|| format!("failed to read {}", body_file.display()))?;
            let events = verify_webhook(
                &method,
                &path,
                &timestamp,
                &body,
                &signature,
                options.api_key.as_bytes(),
            )?;
            tracing::info!(count = events.len(), "Webhook signature valid");
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
