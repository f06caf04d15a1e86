#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;
use wallet_ledger::config::Config;

pub fn test_config(node_url: &str, data_dir: &Path) -> Config {
    Config {
        node_url: node_url.to_string(),
        data_dir: data_dir.to_path_buf(),
        listen_port: 0,
        metrics_port: None,
        poll_interval_secs: 1,
        request_timeout_secs: 5,
    }
}

/// Two blocks: A pays B 10, then B pays A 4.
pub fn sample_chain() -> Value {
    json!({
        "length": 2,
        "chain": [
            {
                "index": 1,
                "timestamp": 1700000000.0,
                "transactions": [{"sender": "A", "recipient": "B", "amount": 10}],
                "proof": 100,
                "previous_hash": 1
            },
            {
                "index": 2,
                "timestamp": 1700000060.0,
                "transactions": [{"sender": "B", "recipient": "A", "amount": 4}],
                "proof": 35293,
                "previous_hash": "8a1f"
            }
        ]
    })
}

pub async fn mock_chain(server: &mut mockito::ServerGuard, body: &Value) -> mockito::Mock {
    server
        .mock("GET", "/chain")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}
