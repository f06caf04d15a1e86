use crate::config::Config;
use crate::core::blocks::ChainDocument;
use crate::utils::error::WalletError;
use anyhow::Result;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ChainClient {
    http: reqwest::Client,
    node_url: String,
}

impl ChainClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| WalletError::ConfigError(e.to_string()))?;

        Ok(Self {
            http,
            node_url: config.node_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn chain_url(&self) -> String {
        format!("{}/chain", self.node_url)
    }

    pub async fn fetch_chain(&self) -> Result<ChainDocument> {
        let url = self.chain_url();
        info!(
            event = "fetching_chain",
            message = "Requesting full chain from node",
            url = %url
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    event = "chain_fetch_error",
                    message = "Failed to reach node",
                    url = %url,
                    error = %e
                );
                return Err(WalletError::FetchError(e.to_string()).into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(
                event = "chain_fetch_error",
                message = "Node returned an error status",
                url = %url,
                status = status.as_u16()
            );
            return Err(WalletError::FetchError(format!("node returned {status}")).into());
        }

        let document: ChainDocument = response.json().await.map_err(|e| {
            error!(
                event = "chain_decode_error",
                message = "Node response is not a chain document",
                url = %url,
                error = %e
            );
            WalletError::FetchError(format!("invalid chain document: {e}"))
        })?;

        if let Some(length) = document.length {
            if length != document.chain.len() {
                warn!(
                    event = "chain_length_mismatch",
                    message = "Reported chain length differs from block count",
                    reported = length,
                    blocks = document.chain.len()
                );
            }
        }

        info!(
            event = "chain_fetched",
            message = "Fetched chain from node",
            blocks = document.chain.len(),
            tx_count = document.transaction_count()
        );

        Ok(document)
    }
}
