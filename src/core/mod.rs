pub mod api;
pub mod blocks;
mod chain_client;
pub mod ledger;
mod metrics;
pub mod render;
mod storage;

use crate::config::Config;
use crate::utils::error::WalletError;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{error, info};

pub use chain_client::ChainClient;
pub use ledger::{Direction, FilteredEntry, FilteredLedger, LedgerFilter};
pub use self::metrics::MetricsCollector;
pub use storage::IdentityStore;

/// Filtered ledger of one identifier, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletView {
    pub id: String,
    #[serde(flatten)]
    pub ledger: FilteredLedger,
}

impl WalletView {
    pub fn render(&self) -> String {
        render::render(&self.id, &self.ledger)
    }
}

pub struct Wallet {
    chain_client: ChainClient,
    identity: Arc<Mutex<IdentityStore>>,
    metrics_collector: MetricsCollector,
    config: Config,
}

impl Wallet {
    pub fn new(config: Config) -> Result<Self> {
        let metrics_collector = MetricsCollector::new(config.metrics_port)?;
        let store = IdentityStore::open(&config.data_dir)?;
        info!(
            event = "identity_store_opened",
            message = "Opened wallet identity store",
            path = %store.path().display(),
            has_identity = store.user_id().is_some()
        );
        let identity = Arc::new(Mutex::new(store));
        let chain_client = ChainClient::new(&config)?;

        Ok(Self {
            chain_client,
            identity,
            metrics_collector,
            config,
        })
    }

    pub async fn identity(&self) -> Option<String> {
        self.identity.lock().await.user_id().map(str::to_string)
    }

    pub async fn set_identity(&self, id: &str) -> Result<()> {
        self.identity.lock().await.set_user_id(id)
    }

    pub async fn clear_identity(&self) -> Result<()> {
        self.identity.lock().await.clear_user_id()
    }

    pub async fn view(&self, id: &str) -> Result<WalletView> {
        let start_time = Instant::now();
        let document = match self.chain_client.fetch_chain().await {
            Ok(document) => document,
            Err(e) => {
                self.metrics_collector.record_error("fetch");
                return Err(e);
            }
        };
        self.metrics_collector.record_fetch_time(start_time);
        self.metrics_collector.record_chain(&document);

        let ledger = match LedgerFilter::new(id).filter_and_tally(&document.chain) {
            Ok(ledger) => ledger,
            Err(e) => {
                self.metrics_collector.record_error("invalid_amount");
                error!(
                    event = "ledger_filter_error",
                    message = "Chain contains an unusable transaction",
                    id = id,
                    error = %e
                );
                return Err(e.into());
            }
        };
        self.metrics_collector.record_ledger(&ledger);

        info!(
            event = "wallet_view_built",
            message = "Filtered chain for wallet",
            id = id,
            entries = ledger.entries.len(),
            balance = ledger.balance
        );

        Ok(WalletView {
            id: id.to_string(),
            ledger,
        })
    }

    /// View for the stored identifier, read once up front.
    pub async fn stored_view(&self) -> Result<WalletView> {
        let id = self.identity().await.ok_or(WalletError::MissingIdentity)?;
        self.view(&id).await
    }

    /// Rebuilds the stored wallet's view and returns its rendering when it
    /// differs from `last`. Failures are logged and leave `last` untouched.
    pub async fn refresh(&self, last: &mut Option<WalletView>) -> Option<String> {
        match self.stored_view().await {
            Ok(view) if last.as_ref() == Some(&view) => None,
            Ok(view) => {
                let rendered = view.render();
                *last = Some(view);
                Some(rendered)
            }
            Err(e) => {
                error!(
                    event = "watch_refresh_error",
                    message = "Failed to refresh wallet view",
                    error = %e
                );
                None
            }
        }
    }

    /// Re-renders the stored wallet whenever the chain changes, until Ctrl-C.
    pub async fn watch(&self) -> Result<()> {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        let mut last: Option<WalletView> = None;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        info!(
            event = "watch_started",
            message = "Watching chain for wallet updates",
            node_url = %self.config.node_url,
            poll_interval_secs = self.config.poll_interval_secs
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut ctrl_c => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = &mut ctrl_c => break,
                rendered = self.refresh(&mut last) => {
                    if let Some(rendered) = rendered {
                        print!("{rendered}");
                    }
                }
            }
        }

        info!(event = "watch_stopped", message = "Interrupted, stopping watch");
        Ok(())
    }

    pub async fn serve(self: Arc<Self>) -> Result<()> {
        let port = self.config.listen_port;
        info!(
            event = "api_started",
            message = "Serving wallet API",
            port = port,
            metrics_port = ?self.metrics_collector.port()
        );

        warp::serve(api::routes(self)).run(([0, 0, 0, 0], port)).await;
        Ok(())
    }
}
