use crate::core::blocks::ChainDocument;
use crate::core::ledger::FilteredLedger;
use anyhow::Result;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct MetricsCollector {
    port: Option<u16>,
}

impl MetricsCollector {
    /// Installs the Prometheus exporter when a port is given. Without one the
    /// recording calls are no-ops.
    pub fn new(port: Option<u16>) -> Result<Self> {
        if let Some(port) = port {
            PrometheusBuilder::new()
                .with_http_listener(([0, 0, 0, 0], port))
                .install()?;
        }

        Ok(Self { port })
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn record_chain(&self, document: &ChainDocument) {
        counter!("chains_fetched_total").increment(1);
        counter!("transactions_scanned_total").increment(document.transaction_count() as u64);
        gauge!("chain_length").set(document.chain.len() as f64);
    }

    pub fn record_ledger(&self, ledger: &FilteredLedger) {
        counter!("wallet_entries_matched_total").increment(ledger.entries.len() as u64);
        gauge!("wallet_balance").set(ledger.balance);
    }

    pub fn record_fetch_time(&self, start_time: Instant) {
        let duration = start_time.elapsed();
        histogram!("chain_fetch_time_seconds").record(duration.as_secs_f64());
    }

    pub fn record_error(&self, kind: &'static str) {
        counter!("wallet_errors_total", "kind" => kind).increment(1);
    }
}
