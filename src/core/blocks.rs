use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a node's `GET /chain` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDocument {
    #[serde(default)]
    pub length: Option<usize>,
    pub chain: Vec<Block>,
}

impl ChainDocument {
    pub fn transaction_count(&self) -> usize {
        self.chain.iter().map(|block| block.transactions.len()).sum()
    }
}

/// A block as served by the node. Only `transactions` matters to the wallet;
/// the rest is carried through so documents round-trip intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<Value>,
}

impl Block {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ..Self::default()
        }
    }
}

/// Raw transaction record. Fields are kept as untyped JSON because entries
/// written by older node versions may lack them or carry other types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub sender: Option<Value>,
    #[serde(default)]
    pub recipient: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl Transaction {
    pub fn new(sender: &str, recipient: &str, amount: f64) -> Self {
        Self {
            sender: Some(Value::from(sender)),
            recipient: Some(Value::from(recipient)),
            amount: Some(Value::from(amount)),
        }
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_ref().and_then(Value::as_str)
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_ref().and_then(Value::as_str)
    }

    /// The amount as a non-negative number, or `None` when it is missing,
    /// not a JSON number, or negative.
    pub fn amount(&self) -> Option<f64> {
        self.amount
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|amount| amount.is_finite() && *amount >= 0.0)
    }

    pub fn raw_amount(&self) -> String {
        match &self.amount {
            Some(value) => value.to_string(),
            None => "missing".to_string(),
        }
    }
}
