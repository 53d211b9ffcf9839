//! graphlink CLI
//!
//! Application root: loads configuration, builds the GraphQL client once and
//! hands it to the command being run.
//! - Fetch the authenticated user
//! - Run arbitrary operations
//! - Manage the stored bearer token
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use graphlink::credentials::{default_storage_path, LocalStorage, DEFAULT_TOKEN_KEY};
use graphlink::{
    generate_default_config, Client, ClientBuilder, ClientError, Config, CredentialsConfig,
    LoggingConfig, Operation, User,
};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser)]
#[command(name = "graphlink")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GraphQL client with bearer auth and error reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the authenticated user (GetUserQuery)
    User,

    /// Run a GraphQL document
    Query {
        /// File containing the document, or "-" for stdin
        document: PathBuf,
        /// Variables in key=value format (values parsed as JSON when possible)
        #[arg(short, long)]
        var: Vec<String>,
        /// Operation name to send
        #[arg(short = 'n', long)]
        operation_name: Option<String>,
    },

    /// Manage the stored bearer token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// Store a token
    Set { token: String },
    /// Print the stored token
    Show,
    /// Remove the stored token
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Config loading logs through default settings until the configured ones are known
    let mut config = {
        let _bootstrap = log_subscriber(&LoggingConfig::default()).set_default();
        match &cli.config {
            Some(path) => Config::load_with_env(path)?,
            None => Config::load_default(),
        }
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    log_subscriber(&config.logging).init();

    match cli.command {
        Commands::User => {
            let client = ClientBuilder::from_config(&config).build()?;
            run_user(&client, &cli.format).await
        }

        Commands::Query {
            document,
            var,
            operation_name,
        } => {
            let client = ClientBuilder::from_config(&config).build()?;
            let operation = build_operation(&document, &var, operation_name)?;
            run_query(&client, &operation).await
        }

        Commands::Token { action } => {
            let (storage, key) = token_storage(&config);
            match action {
                TokenAction::Set { token } => {
                    storage
                        .set_item(&key, &token)
                        .with_context(|| format!("writing {:?}", storage.path()))?;
                    eprintln!("Token stored in {:?}", storage.path());
                }
                TokenAction::Show => match storage.get_item(&key)? {
                    Some(token) => println!("{}", token),
                    None => eprintln!("No token stored"),
                },
                TokenAction::Clear => {
                    if storage.remove_item(&key)? {
                        eprintln!("Token removed");
                    } else {
                        eprintln!("No token stored");
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    eprintln!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn log_subscriber(logging: &LoggingConfig) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("graphlink={}", logging.level).into());

    // Logs go to stderr; stdout carries command output
    let fmt_layer = if logging.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

async fn run_user(client: &Client, format: &str) -> anyhow::Result<ExitCode> {
    let user = match client.get_user().await {
        Ok(user) => user,
        // Already reported by the error link
        Err(ClientError::Link(_)) => return Ok(ExitCode::FAILURE),
        Err(e) => return Err(e.into()),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&user)?),
        _ => print_user_table(&user),
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_query(client: &Client, operation: &Operation) -> anyhow::Result<ExitCode> {
    match client.execute(operation).await {
        Ok(response) => {
            let data = response.data.unwrap_or(Value::Null);
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn print_user_table(user: &User) {
    let fields = user.fields();
    let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    for (name, value) in fields {
        println!("{:<width$}  {}", name, value.unwrap_or("-"), width = width);
    }
}

fn build_operation(
    document: &Path,
    vars: &[String],
    operation_name: Option<String>,
) -> anyhow::Result<Operation> {
    let text = if document.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(document).with_context(|| format!("reading {:?}", document))?
    };

    let mut operation = Operation::new(text).variables(parse_vars(vars)?);
    if let Some(name) = operation_name {
        operation = operation.named(name);
    }
    Ok(operation)
}

/// Parse `key=value` pairs; values that are not valid JSON become strings
fn parse_vars(vars: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut map = Map::new();
    for var in vars {
        let (key, raw) = var
            .split_once('=')
            .with_context(|| format!("invalid variable {:?}, expected key=value", var))?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

/// Storage file and key used by the token commands
fn token_storage(config: &Config) -> (LocalStorage, String) {
    match &config.credentials {
        CredentialsConfig::Storage { path, key } => (
            LocalStorage::new(path.clone().unwrap_or_else(default_storage_path)),
            key.clone(),
        ),
        other => {
            tracing::warn!(
                "Configured credential source is {}; stored token will not be used",
                source_name(other)
            );
            (
                LocalStorage::new(default_storage_path()),
                DEFAULT_TOKEN_KEY.to_string(),
            )
        }
    }
}

fn source_name(credentials: &CredentialsConfig) -> &'static str {
    match credentials {
        CredentialsConfig::Static { .. } => "static",
        CredentialsConfig::Storage { .. } => "storage",
        CredentialsConfig::Env { .. } => "env",
        CredentialsConfig::Anonymous => "none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_vars() {
        let vars = vec![
            "id=42".to_string(),
            "name=Asha".to_string(),
            "filter={\"active\":true}".to_string(),
            "empty=".to_string(),
        ];
        let map = parse_vars(&vars).unwrap();

        assert_eq!(map["id"], json!(42));
        assert_eq!(map["name"], json!("Asha"));
        assert_eq!(map["filter"], json!({ "active": true }));
        assert_eq!(map["empty"], json!(""));
    }

    #[test]
    fn test_log_subscriber_installs_for_each_format() {
        for format in ["pretty", "json"] {
            let logging = LoggingConfig {
                level: "debug".into(),
                format: format.into(),
            };
            let _guard = log_subscriber(&logging).set_default();
            tracing::info!(format, "subscriber installed");
        }
    }

    #[test]
    fn test_parse_vars_rejects_missing_equals() {
        assert!(parse_vars(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_query_command() {
        let cli = Cli::parse_from([
            "graphlink",
            "--base-url",
            "https://api.example.com",
            "query",
            "-",
            "--var",
            "id=1",
            "-n",
            "Node",
        ]);

        assert_eq!(cli.base_url.as_deref(), Some("https://api.example.com"));
        match cli.command {
            Commands::Query {
                document,
                var,
                operation_name,
            } => {
                assert_eq!(document, PathBuf::from("-"));
                assert_eq!(var, vec!["id=1"]);
                assert_eq!(operation_name.as_deref(), Some("Node"));
            }
            _ => panic!("expected query command"),
        }
    }
}
