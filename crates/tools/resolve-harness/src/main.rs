//! CLI harness for the name resolver
//!
//! This tool allows:
//! - Resolving names against the default or a pinned provider
//! - Inspecting normalization and namehash output
//! - Listing the effective provider list

use clap::{Parser, Subcommand};
use ens_core::{labelhash, namehash, normalize};
use ens_resolution::{CancelToken, ResolveRequest, Resolver, ResolverConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "resolve-harness")]
#[command(about = "Registry name resolution harness", long_about = None)]
struct Cli {
    /// JSON config file (defaults to the built-in provider list)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a name to an address
    Resolve {
        /// Name to resolve
        name: String,

        /// Use only this endpoint
        #[arg(short, long)]
        provider: Option<String>,

        /// Per-read timeout in milliseconds
        #[arg(short, long)]
        timeout_ms: Option<u64>,

        /// Retries per read
        #[arg(short, long)]
        retries: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the namehash of a name
    Namehash {
        /// Name to hash
        name: String,
    },

    /// Print the normalized form of a name
    Normalize {
        /// Name to normalize
        name: String,
    },

    /// List the providers a resolution would try
    Providers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Resolve {
            name,
            provider,
            timeout_ms,
            retries,
            json,
        } => {
            run_resolve(config, name, provider, timeout_ms, retries, json).await?;
        }
        Commands::Namehash { name } => {
            let normalized = normalize(&name)?;
            println!("{}", namehash(&normalized));
            for label in normalized.labels() {
                println!("  {:<24} 0x{}", label, hex::encode(labelhash(label)));
            }
        }
        Commands::Normalize { name } => {
            println!("{}", normalize(&name)?);
        }
        Commands::Providers => {
            for (index, provider) in config.providers().iter().enumerate() {
                println!(
                    "{}. {} {} (timeout {:?}, retries {})",
                    index + 1,
                    provider.name,
                    provider.url,
                    provider.timeout,
                    provider.retries
                );
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ResolverConfig> {
    let config = match path {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };
    Ok(config.with_env_overrides())
}

async fn run_resolve(
    mut config: ResolverConfig,
    name: String,
    provider: Option<String>,
    timeout_ms: Option<u64>,
    retries: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(timeout_ms) = timeout_ms {
        config.default_timeout_ms = timeout_ms;
    }
    if let Some(retries) = retries {
        config.default_retries = retries;
    }
    config.validate()?;

    let resolver = Resolver::with_http(config)?;
    let mut request = ResolveRequest::new(name);
    if let Some(url) = provider {
        request = request.with_provider_override(url);
    }

    // Ctrl-C abandons the in-flight read and stops the provider loop
    let cancel = CancelToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling resolution");
            on_signal.cancel();
        }
    });

    info!("Resolving {}", request.name);
    let resolution = resolver.resolve_with_cancel(&request, &cancel).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.address);
    }

    for failure in &resolution.failures {
        warn!("Skipped {}", failure);
    }

    Ok(())
}
