use crate::utils::error::WalletError;
use anyhow::Result;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

const STORE_FILE: &str = "wallet.json";
const ID_KEY: &str = "id";

/// File-backed key-value store for wallet settings, persisted as a single
/// JSON object in the data directory.
#[derive(Debug)]
pub struct IdentityStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl IdentityStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).map_err(|e| storage_error(data_dir, e))?;
        let path = data_dir.join(STORE_FILE);

        let entries: BTreeMap<String, String> = if path.exists() {
            let raw = fs::read(&path).map_err(|e| storage_error(&path, e))?;
            serde_json::from_slice(&raw).map_err(|e| storage_error(&path, e))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        self.commit(entries)
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<String>> {
        if !self.entries.contains_key(key) {
            return Ok(None);
        }
        let mut entries = self.entries.clone();
        let previous = entries.remove(key);
        self.commit(entries)?;
        Ok(previous)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get(ID_KEY)
    }

    pub fn set_user_id(&mut self, id: &str) -> Result<()> {
        self.set(ID_KEY, id)?;
        info!(
            event = "identity_saved",
            message = "Saved wallet identifier",
            id = id,
        );
        Ok(())
    }

    pub fn clear_user_id(&mut self) -> Result<()> {
        self.remove(ID_KEY)?;
        Ok(())
    }

    /// Memory only takes `entries` once they are on disk.
    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(&entries)?;

        fs::write(&tmp, body)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| storage_error(&self.path, e))?;

        self.entries = entries;
        Ok(())
    }
}

fn storage_error(path: &Path, e: impl std::fmt::Display) -> WalletError {
    WalletError::StorageError(format!("{}: {}", path.display(), e))
}
