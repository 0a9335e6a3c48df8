//! Entry point for the feedback Lambda and its operator tooling.
//!
//! Started without arguments (as the Lambda runtime does) it serves
//! `POST /feedback`. Subcommands run the lookups, the token exchange and the
//! identity extractor by hand against the configured AWS account.

use agent_glue::api::{CorsPolicy, FeedbackApi};
use agent_glue::config::{self, Settings};
use agent_glue::feedback::FeedbackService;
use agent_glue::fetch::BasicClient;
use agent_glue::identity::extract_user_id_from_verified_token;
use agent_glue::infra::AwsClients;
use agent_glue::infra::keys::{ParameterStore, SecretStore};
use agent_glue::token::TokenExchange;
use anyhow::Result;
use clap::{Parser, Subcommand};
use http::{HeaderMap, HeaderValue};
use lambda_http::{Request, service_fn};
use std::ffi::OsStr;
use std::io::{IsTerminal, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "agent_glue")]
#[command(about = "Feedback API handler and agent auth utilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve POST /feedback on the Lambda runtime (default)
    Serve,
    /// Run the client-credentials exchange for $STACK_NAME and log a token prefix
    Token,
    /// Fetch a parameter from SSM Parameter Store (only its length is logged)
    Parameter {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Fetch a secret from Secrets Manager (only its length is logged)
    Secret {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Print the subject of an already-verified bearer token
    Whoami {
        /// Authorization header value, e.g. "Bearer eyJ..."
        #[arg(short, long)]
        authorization: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: human-readable stderr + JSON to stdout or a rolling log file
    let json_writer: Box<dyn Write + Send> = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("agent_glue.log"));
            Box::new(tracing_appender::rolling::daily(log_dir, log_file_name))
        }
        Err(_) => Box::new(std::io::stdout()),
    };
    let (non_blocking_json, _json_guard) = tracing_appender::non_blocking(json_writer);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_json)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let region = config::resolve_region(|key| std::env::var(key).ok());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await?,
        Commands::Token => {
            let clients = AwsClients::load(&region).await;
            let exchange =
                TokenExchange::from_env(clients.parameters, clients.secrets, BasicClient::new()?)?;
            let token = exchange.get_access_token().await?;
            info!(length = token.len(), "Access token obtained");
        }
        Commands::Parameter { name } => {
            let clients = AwsClients::load(&region).await;
            let value = clients.parameters.get_parameter(&name).await?;
            info!(name = %name, length = value.len(), "Parameter resolved");
        }
        Commands::Secret { name } => {
            let clients = AwsClients::load(&region).await;
            let value = clients.secrets.get_secret(&name).await?;
            info!(name = %name, length = value.len(), "Secret resolved");
        }
        Commands::Whoami { authorization } => {
            let mut headers = HeaderMap::new();
            headers.insert(http::header::AUTHORIZATION, HeaderValue::from_str(&authorization)?);
            let user_id = extract_user_id_from_verified_token(Some(&headers))?;
            info!(user_id = %user_id, "Token subject");
        }
    }

    Ok(())
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Runs the feedback handler on the Lambda runtime. AWS clients are created
/// once here and shared by every invocation.
async fn serve() -> Result<()> {
    let settings = Settings::from_env()?;
    let clients = AwsClients::load(&settings.region).await;

    let cors = CorsPolicy::parse(&settings.cors_allowed_origins);
    info!(
        table = %settings.table_name,
        region = %settings.region,
        primary_origin = cors.primary_origin(),
        extra_origins = cors.extra_origins().len(),
        "Starting feedback handler"
    );

    let api = FeedbackApi::new(
        FeedbackService::new(clients.feedback_store(&settings.table_name)),
        cors,
    );
    let api = &api;

    lambda_http::run(service_fn(|event: Request| async move { api.handle(event).await }))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
