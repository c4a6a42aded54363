//! Collpay CLI
//!
//! Command-line interface for the Collpay payment API.

mod ipn;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use collpay_client::{CollpayClient, Config, Environment, TransactionInput};
use collpay_types::Amount;

#[derive(Parser)]
#[command(name = "collpay")]
#[command(author, version, about = "Collpay API CLI client", long_about = None)]
struct Cli {
    /// Merchant public key
    #[arg(long, env = "COLLPAY_PUBLIC_KEY", hide_env_values = true, default_value = "")]
    public_key: String,

    /// Target environment (sandbox or production)
    #[arg(long = "env", env = "COLLPAY_ENV", default_value = "production")]
    environment: String,

    /// API version
    #[arg(long, env = "COLLPAY_API_VERSION", default_value = "v1")]
    api_version: String,

    /// Alternate API host, e.g. http://127.0.0.1:8000/api (overrides --env)
    #[arg(long, env = "COLLPAY_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "COLLPAY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the exchange rate between two currencies
    Rate {
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. BTC
        to: String,
    },
    /// Transaction operations
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// Instant payment notification tools
    Ipn {
        #[command(subcommand)]
        action: IpnCommands,
    },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Create a payment transaction
    Create {
        /// Currency the order is priced in
        #[arg(long)]
        order_currency: String,
        /// Order amount, sent as written
        #[arg(long)]
        amount: String,
        /// Currency the payer pays in
        #[arg(long)]
        payment_currency: String,
        #[arg(long, default_value = "")]
        payer_name: String,
        #[arg(long, default_value = "")]
        payer_email: String,
        #[arg(long, default_value = "")]
        payer_phone: String,
        #[arg(long, default_value = "")]
        payer_address: String,
        #[arg(long, default_value = "")]
        ipn_url: String,
        #[arg(long, default_value = "")]
        ipn_secret: String,
        #[arg(long, default_value = "")]
        success_url: String,
        #[arg(long, default_value = "")]
        cancel_url: String,
        #[arg(long, default_value = "")]
        cart: String,
        #[arg(long, default_value = "")]
        webhook_data: String,
    },
    /// Get transaction details
    Get {
        /// Transaction ID
        id: String,
    },
}

#[derive(Subcommand)]
enum IpnCommands {
    /// Start a local listener that prints incoming notifications
    Listen {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

fn build_client(cli: &Cli) -> Result<CollpayClient> {
    let config = match &cli.api_url {
        Some(host) => Config::with_host(&cli.public_key, host, &cli.api_version)?,
        None => Config::configure(
            &cli.public_key,
            Environment::from(cli.environment.as_str()),
            &cli.api_version,
        )?,
    };
    tracing::debug!(?config, "Configured Collpay client");

    let mut client = CollpayClient::new(config);
    if let Some(secs) = cli.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs));
    }
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,collpay_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Rate { from, to } => {
            let client = build_client(&cli)?;
            let rate = client.get_exchange_rate(from, to).await?;
            println!("{}", serde_json::to_string_pretty(&rate)?);
            if !rate.success {
                std::process::exit(1);
            }
        }

        Commands::Transaction { action } => {
            let client = build_client(&cli)?;
            let tx = match action {
                TransactionCommands::Create {
                    order_currency,
                    amount,
                    payment_currency,
                    payer_name,
                    payer_email,
                    payer_phone,
                    payer_address,
                    ipn_url,
                    ipn_secret,
                    success_url,
                    cancel_url,
                    cart,
                    webhook_data,
                } => {
                    let input = TransactionInput::new(
                        order_currency.as_str(),
                        Amount::from(amount.as_str()),
                        payment_currency.as_str(),
                    )
                    .with_payer_name(payer_name.as_str())
                    .with_payer_email(payer_email.as_str())
                    .with_payer_phone(payer_phone.as_str())
                    .with_payer_address(payer_address.as_str())
                    .with_ipn(ipn_url.as_str(), ipn_secret.as_str())
                    .with_success_url(success_url.as_str())
                    .with_cancel_url(cancel_url.as_str())
                    .with_cart(cart.as_str())
                    .with_webhook_data(webhook_data.as_str());
                    client.create_transaction(&input).await?
                }
                TransactionCommands::Get { id } => client.get_transaction(id).await?,
            };
            println!("{}", serde_json::to_string_pretty(&tx)?);
            if !tx.success {
                std::process::exit(1);
            }
        }

        Commands::Ipn { action } => match action {
            IpnCommands::Listen { port } => ipn::listen(*port).await?,
        },
    }

    Ok(())
}
