//! Gateway server command

use crate::error::CliResult;
use crate::utils::ColoredOutput;
use clap::Args;
use comicgate_core::config::{
    ENV_BASE_URL, ENV_PRIVATE_KEY, ENV_PUBLIC_KEY, ENV_UPSTREAM_TIMEOUT_MS,
};
use comicgate_core::GatewayConfig;
use comicgate_server::AppState;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host and port to bind to
    #[arg(long, env = "COMICGATE_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// Upstream API base URL
    #[arg(long, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Upstream public key
    #[arg(long, env = ENV_PUBLIC_KEY, hide_env_values = true)]
    pub public_key: Option<String>,

    /// Upstream private key
    #[arg(long, env = ENV_PRIVATE_KEY, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Deadline for each upstream call in milliseconds
    #[arg(long, env = ENV_UPSTREAM_TIMEOUT_MS)]
    pub timeout_ms: Option<String>,
}

impl ServeArgs {
    /// Resolve the gateway configuration, falling back to defaults for unset values
    pub fn gateway_config(&self) -> CliResult<GatewayConfig> {
        let config = GatewayConfig::from_lookup(|key| match key {
            ENV_BASE_URL => self.base_url.clone(),
            ENV_PUBLIC_KEY => self.public_key.clone(),
            ENV_PRIVATE_KEY => self.private_key.clone(),
            ENV_UPSTREAM_TIMEOUT_MS => self.timeout_ms.clone(),
            _ => None,
        })?;
        Ok(config)
    }
}

/// Execute the serve command
pub async fn execute(args: ServeArgs) -> CliResult<()> {
    let config = args.gateway_config()?;

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(
            "Missing upstream credentials ({}); upstream calls will fail authentication",
            missing.join(", ")
        );
        eprintln!(
            "{} missing {}",
            ColoredOutput::warning("Warning:"),
            missing.join(", ")
        );
    }

    tracing::info!("Upstream: {}", config.base_url);
    tracing::info!("Upstream deadline: {}ms", config.deadline.as_millis());

    let app_state = AppState::from_config(&config)?;
    comicgate_server::serve_rest(app_state, &args.addr).await?;

    Ok(())
}
