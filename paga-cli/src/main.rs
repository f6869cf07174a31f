//! Command-line diagnostics for the Paga Business REST API.
//!
//! # Usage
//!
//! ```bash
//! # Query the account balance
//! paga balance
//!
//! # List funding sources for a customer account
//! paga funding-sources --account-principal 0801234xxxx
//!
//! # List banks
//! paga banks
//! ```
//!
//! # Environment Variables
//!
//! - `PAGA_BASE_URL` — API endpoint root (e.g. `https://beta.mypaga.com`)
//! - `PAGA_PRINCIPAL` — business account identifier
//! - `PAGA_CREDENTIALS` — account secret
//! - `PAGA_HASH_KEY` — shared signing secret
//! - `PAGA_LOCALE` — response locale (default: `en`)
//! - `RUST_LOG` — log level filter (default: `info`)
//!
//! Variables may also be supplied through a `.env` file in the working
//! directory. Credentials are never read from anywhere else.

use clap::{Args, Parser, Subcommand};
use paga::credentials::{Credentials, Environment};
use paga::envelope::OperationFields;
use paga_http::client::BusinessClient;
use paga_http::error::ClientError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "paga", version, about = "Diagnostics for the Paga Business REST API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query the account balance.
    Balance(FieldArgs),
    /// List funding sources available to an account.
    FundingSources(FieldArgs),
    /// List the banks known to the provider.
    Banks {
        /// Response locale.
        #[arg(long, env = "PAGA_LOCALE", default_value = "en")]
        locale: String,
    },
}

/// Operation-specific body fields shared by the account commands.
#[derive(Debug, Args)]
struct FieldArgs {
    /// Account principal sent in the request body (may be empty).
    #[arg(long, env = "PAGA_ACCOUNT_PRINCIPAL", default_value = "")]
    account_principal: String,

    /// Account credentials sent in the request body (may be empty).
    #[arg(long, env = "PAGA_ACCOUNT_CREDENTIALS", default_value = "")]
    account_credentials: String,

    /// Source of funds for balance inquiries (e.g. `PAGA`; may be empty).
    #[arg(long, env = "PAGA_SOURCE_OF_FUNDS", default_value = "")]
    source_of_funds: String,

    /// Response locale.
    #[arg(long, env = "PAGA_LOCALE", default_value = "en")]
    locale: String,
}

impl FieldArgs {
    fn fields(&self) -> OperationFields {
        OperationFields::new()
            .with_account_principal(&self.account_principal)
            .with_account_credentials(&self.account_credentials)
            .with_source_of_funds(&self.source_of_funds)
            .with_locale(&self.locale)
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("command failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let credentials = Credentials::from_env()?;
    match credentials.environment() {
        Environment::Live => {
            tracing::warn!("using the LIVE environment: real money transactions")
        }
        environment => {
            tracing::info!(base_url = credentials.base_url(), %environment, "loaded configuration")
        }
    }

    let client = BusinessClient::new(credentials);
    let outcome = dispatch(&client, cli.command).await;

    if let Err(err) = outcome {
        // Keep the provider's own words visible: print the preserved
        // payload/body before the error line the caller will log.
        match &err {
            ClientError::Business(business) => eprintln!("{:#}", business.payload),
            ClientError::Protocol(protocol) if !protocol.body.is_empty() => {
                eprintln!("{}", protocol.body);
            }
            _ => {}
        }
        return Err(err.into());
    }
    Ok(())
}

async fn dispatch(client: &BusinessClient, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Balance(args) => {
            let response = client.account_balance(&args.fields()).await?;
            println!("Message:           {}", response.message.as_deref().unwrap_or("-"));
            println!("Total Balance:     {}", render(response.total_balance));
            println!("Available Balance: {}", render(response.available_balance));
            println!("Currency:          {}", response.currency.as_deref().unwrap_or("-"));
            println!(
                "As Of (UTC):       {}",
                response.balance_date_time_utc.as_deref().unwrap_or("-")
            );
        }
        Command::FundingSources(args) => {
            let response = client.funding_sources(&args.fields()).await?;
            let sources = response.sources.unwrap_or(serde_json::Value::Null);
            println!("{sources:#}");
        }
        Command::Banks { locale } => {
            let fields = OperationFields::new().with_locale(locale);
            let response = client.banks(&fields).await?;
            for bank in &response.banks {
                println!("{}  {}", bank.uuid, bank.name);
            }
            tracing::info!(count = response.banks.len(), "banks listed");
        }
    }
    Ok(())
}

fn render(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}
