use std::path::PathBuf;
use std::process::ExitCode;

use article_client::account::{AccountError, AccountStore, Credentials};
use article_client::api::article;
use article_client::config::{ClientConfig, ConfigError};
use article_client::storage::FileStorage;
use article_client::transport::{ApiError, HttpTransport, Payload};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("--data must be a JSON object: {0}")]
    InvalidData(String),
    #[error("output encoding failed: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "article-cli", about = "Article backend client")]
struct Cli {
    /// Overrides `ARTICLE_API_BASE_URL` from the environment.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "ARTICLE_SESSION_FILE", default_value = ".article-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "ARTICLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the role for the stored token.
    Whoami,
    /// Log out and clear the session file.
    Logout,
    Articles(ArticlesCommand),
}

#[derive(Args, Debug)]
struct ArticlesCommand {
    #[command(subcommand)]
    command: ArticlesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ArticlesSubcommand {
    List {
        #[arg(long, default_value = "{}")]
        data: String,
    },
    Detail {
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    tracing::debug!(base_url = %config.base_url, session_file = %cli.session_file.display(), "starting");

    let transport = HttpTransport::new(&config)?;
    let mut store = AccountStore::init(transport, FileStorage::new(cli.session_file))?;

    match cli.command {
        Command::Login { username, password } => {
            store.login(Credentials::new(username, password)).await?;
            println!("logged in");
        }
        Command::Whoami => {
            store.get_user_info().await?;
            println!("{}", store.role());
        }
        Command::Logout => {
            store.logout().await?;
            println!("logged out");
        }
        Command::Articles(articles) => {
            let body = match articles.command {
                ArticlesSubcommand::List { data } => article::get_list(store.transport(), parse_data(&data)?).await?,
                ArticlesSubcommand::Detail { data } => {
                    article::get_detail(store.transport(), parse_data(&data)?).await?
                }
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

fn parse_data(raw: &str) -> Result<Payload, CliError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::InvalidData(format!("got {other}"))),
        Err(e) => Err(CliError::InvalidData(e.to_string())),
    }
}
