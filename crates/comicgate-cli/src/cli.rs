//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "comicgate",
    about = "Comicgate - signed gateway and cached client for the comics catalog API",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway REST API
    Serve {
        #[command(flatten)]
        args: crate::commands::ServeArgs,
    },

    /// Look up a single character by id
    Character {
        /// Character id (e.g. 1009368)
        id: String,

        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// List characters
    Characters {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// List comics featuring a character
    Comics {
        /// Character id
        character_id: String,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// List series featuring a character
    Series {
        /// Character id
        character_id: String,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        gateway: GatewayArgs,
    },
}

/// Where the lookup commands find the gateway
#[derive(Debug, Args)]
pub struct GatewayArgs {
    /// Gateway origin
    #[arg(
        long,
        env = "COMICGATE_GATEWAY_URL",
        default_value = comicgate_client::config::DEFAULT_GATEWAY_URL
    )]
    pub gateway_url: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = comicgate_client::config::DEFAULT_REQUEST_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Query filter as key=value (repeatable, order is kept)
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}
