//! HTTP player source
//!
//! One GET against the configured endpoint. Non-2xx statuses are fatal;
//! the request carries a bounded timeout since the upstream has none.

use std::time::Duration;

use contracts::{ContractError, PlayerSource, RawPlayer, SourceConfig};
use metrics::counter;
use tracing::{info, instrument};

/// Subscription header the sports API expects
pub const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// HTTP-backed player source
pub struct HttpPlayerSource {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpPlayerSource {
    /// Build the source from config
    ///
    /// # Errors
    /// Returns `ContractError::ConfigValidation` when no API key is present,
    /// `ContractError::Fetch` when the HTTP client cannot be constructed.
    pub fn new(config: &SourceConfig) -> Result<Self, ContractError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ContractError::config_validation("source.api_key", "no API key configured")
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContractError::fetch(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }
}

impl PlayerSource for HttpPlayerSource {
    fn name(&self) -> &str {
        &self.endpoint
    }

    #[instrument(name = "http_fetch_players", skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_players(&self) -> Result<Vec<RawPlayer>, ContractError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                counter!("nba_lake_fetch_failures_total").increment(1);
                ContractError::fetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            counter!("nba_lake_fetch_failures_total").increment(1);
            return Err(ContractError::Upstream {
                status: status.as_u16(),
            });
        }

        let players: Vec<RawPlayer> = response.json().await.map_err(|e| {
            counter!("nba_lake_fetch_failures_total").increment(1);
            ContractError::fetch(format!("failed to decode payload: {e}"))
        })?;

        counter!("nba_lake_players_fetched_total").increment(players.len() as u64);
        info!(players = players.len(), "Fetched player payload");
        Ok(players)
    }
}
