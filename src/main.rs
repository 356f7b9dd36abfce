// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use gsv_provider::{
    config::ProviderConfig,
    contract::{DataSource, ReadOutcome, Resource},
    models::{DomainKeyModel, SiteVerificationModel},
    provider::{Clients, Provider},
    resources::site_verification::plan,
    schema::Schema,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Manage Google Site Verification and the DNS records that prove it.
#[derive(Debug, Parser)]
#[command(name = "gsv-provider", version, about)]
struct Cli {
    #[command(flatten)]
    provider: ProviderArgs,

    #[command(subcommand)]
    command: Command,
}

/// Provider-level configuration flags.
#[derive(Debug, Args)]
struct ProviderArgs {
    /// YAML or JSON provider configuration file
    #[arg(long, global = true, env = "GSV_PROVIDER_CONFIG")]
    config: Option<PathBuf>,

    /// Project to manage DNS records in (defaults to the ambient project)
    #[arg(long, global = true, env = "GOOGLE_PROJECT")]
    project: Option<String>,

    /// Service account email to impersonate
    #[arg(long, global = true, env = "GOOGLE_IMPERSONATE_SERVICE_ACCOUNT")]
    impersonate_service_account: Option<String>,

    /// Lifetime in seconds of the impersonated token
    #[arg(long, global = true)]
    token_duration: Option<i64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the provider, data source and resource schemas as JSON
    Schema,
    /// Look up a verification token (domain_key data source)
    DomainKey {
        /// Data source configuration as JSON; `-` reads stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },
    /// Create a site verification from planned state
    Create {
        /// Planned state as JSON; `-` reads stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },
    /// Refresh a site verification; prints `null` if it no longer exists
    Read {
        /// Current state as JSON; `-` reads stdin
        #[arg(long, default_value = "-")]
        state: PathBuf,
    },
    /// Update owners and token of a site verification in place
    Update {
        /// Prior state as JSON
        #[arg(long)]
        prior: PathBuf,
        /// Planned state as JSON
        #[arg(long)]
        planned: PathBuf,
    },
    /// Delete a site verification and its DNS record
    Delete {
        /// Current state as JSON; `-` reads stdin
        #[arg(long, default_value = "-")]
        state: PathBuf,
    },
    /// Import an existing site verification by its ID
    Import {
        /// Remote ID, e.g. `dns://example.com` (escaped or not)
        id: String,
    },
    /// Compare planned state with prior state and report the required action
    Plan {
        /// Prior state as JSON; omit for a new resource
        #[arg(long)]
        prior: Option<PathBuf>,
        /// Planned state as JSON; `-` reads stdin
        #[arg(long, default_value = "-")]
        planned: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

impl ProviderArgs {
    fn provider_config(&self) -> Result<ProviderConfig> {
        let base = match &self.config {
            Some(path) => ProviderConfig::from_file(path)?,
            None => ProviderConfig::default(),
        };
        Ok(base.merged_with(ProviderConfig {
            project: self.project.clone(),
            impersonate_service_account: self.impersonate_service_account.clone(),
            token_duration: self.token_duration,
            endpoints: None,
        }))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("gsv-provider")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

fn init_logging() {
    // Logs go to stderr; stdout carries only state JSON.
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=gsv_provider=trace gsv-provider read --state state.json
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json gsv-provider schema
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(false)
                .compact()
                .init();
        }
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    init_logging();
    debug!(command = ?cli.command, "Logging initialized");

    let provider = Provider::new(env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Schema => {
            let data_sources: BTreeMap<String, Schema> =
                provider.data_source_schemas().into_iter().collect();
            let resources: BTreeMap<String, Schema> =
                provider.resource_schemas().into_iter().collect();
            print_json(&json!({
                "provider": {
                    "type_name": provider.type_name(),
                    "version": provider.version(),
                    "schema": provider.schema(),
                },
                "data_sources": data_sources,
                "resources": resources,
            }))
        }
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "gsv-provider",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Command::Plan { prior, planned } => {
            let prior: Option<SiteVerificationModel> = match prior {
                Some(path) => Some(read_json(&path).await?),
                None => None,
            };
            let planned: SiteVerificationModel = read_json(&planned).await?;
            print_json(&plan(prior.as_ref(), planned)?)
        }
        Command::DomainKey { input } => {
            let config: DomainKeyModel = read_json(&input).await?;
            let clients = configure(&provider, &cli.provider).await?;
            let state = provider.domain_key(clients).read(config).await?;
            print_json(&state)
        }
        Command::Create { input } => {
            let planned: SiteVerificationModel = read_json(&input).await?;
            let clients = configure(&provider, &cli.provider).await?;
            let state = provider.site_verification(clients).create(planned).await?;
            print_json(&state)
        }
        Command::Read { state } => {
            let state: SiteVerificationModel = read_json(&state).await?;
            let clients = configure(&provider, &cli.provider).await?;
            match provider.site_verification(clients).read(state).await? {
                ReadOutcome::Present(state) => print_json(&state),
                ReadOutcome::Removed => print_json(&serde_json::Value::Null),
            }
        }
        Command::Update { prior, planned } => {
            let prior: SiteVerificationModel = read_json(&prior).await?;
            let planned: SiteVerificationModel = read_json(&planned).await?;
            let clients = configure(&provider, &cli.provider).await?;
            let state = provider
                .site_verification(clients)
                .update(prior, planned)
                .await?;
            print_json(&state)
        }
        Command::Delete { state } => {
            let state: SiteVerificationModel = read_json(&state).await?;
            let clients = configure(&provider, &cli.provider).await?;
            provider.site_verification(clients).delete(state).await?;
            info!("Site verification deleted");
            Ok(())
        }
        Command::Import { id } => {
            let clients = configure(&provider, &cli.provider).await?;
            let resource = provider.site_verification(clients);
            let state = resource.import_state(&id)?;
            let state = resource
                .read(state)
                .await?
                .into_present()
                .with_context(|| format!("Cannot import non-existent remote object '{id}'"))?;
            print_json(&state)
        }
    }
}

async fn configure(provider: &Provider, args: &ProviderArgs) -> Result<Arc<Clients>> {
    let config = args.provider_config()?;
    provider
        .configure(&config)
        .await
        .context("Failed to configure provider")
}

/// Read a JSON document from a file, or from stdin when the path is `-`.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
