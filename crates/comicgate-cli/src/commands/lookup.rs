//! One-shot lookups through the data-access facade

use crate::cli::GatewayArgs;
use crate::error::CliResult;
use crate::utils::parse_params;
use comicgate_client::{ClientConfig, ComicsClient};
use comicgate_core::QueryParams;
use std::time::Duration;
use tracing::debug;

/// Which facade operation to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Character { id: String },
    Characters { params: QueryParams },
    Comics { character_id: String, params: QueryParams },
    Series { character_id: String, params: QueryParams },
}

impl Lookup {
    pub fn characters(raw_params: &[String]) -> CliResult<Self> {
        Ok(Self::Characters { params: parse_params(raw_params)? })
    }

    pub fn comics(character_id: String, raw_params: &[String]) -> CliResult<Self> {
        Ok(Self::Comics { character_id, params: parse_params(raw_params)? })
    }

    pub fn series(character_id: String, raw_params: &[String]) -> CliResult<Self> {
        Ok(Self::Series { character_id, params: parse_params(raw_params)? })
    }
}

pub struct LookupCommand;

impl LookupCommand {
    /// Run a lookup and print the JSON body to stdout.
    ///
    /// A process-per-call CLI has no session to keep a cache in, so the
    /// facade runs uncached.
    pub async fn run(gateway: GatewayArgs, lookup: Lookup) -> CliResult<()> {
        let config = ClientConfig::new(gateway.gateway_url)
            .with_request_timeout(Duration::from_millis(gateway.timeout_ms));
        let client = ComicsClient::new(config)?;

        debug!("Running lookup: {:?}", lookup);
        let body = match &lookup {
            Lookup::Character { id } => client.get_character(id).await?,
            Lookup::Characters { params } => client.get_characters(params).await?,
            Lookup::Comics { character_id, params } => {
                client.get_comics(character_id, params).await?
            }
            Lookup::Series { character_id, params } => {
                client.get_series(character_id, params).await?
            }
        };

        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }
}
