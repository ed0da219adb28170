//! Backing stores for the balance map.
//!
//! The ledger keeps its own cache and hands the full map to the store on
//! every mutation, so a store only has to load and replace a snapshot.

use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::errors::LedgerResult;
use crate::game::Chips;

/// Balance map as persisted: account id string to chip count.
pub type Balances = BTreeMap<String, Chips>;

/// Trait for balance persistence
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Load every balance. A store that has never been written is empty.
    async fn load(&self) -> LedgerResult<Balances>;

    /// Replace the stored map with `balances`.
    async fn save(&self, balances: &Balances) -> LedgerResult<()>;
}

/// Flat JSON object on disk, e.g. `{"42": 10000}`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("balances");
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl BalanceStore for JsonFileStore {
    async fn load(&self) -> LedgerResult<Balances> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Balances::new()),
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Balances::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    async fn save(&self, balances: &Balances) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(balances)?;
        let tmp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&tmp_path, data).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-process store for tests and ephemeral servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    balances: Mutex<Balances>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances(balances: Balances) -> Self {
        Self {
            balances: Mutex::new(balances),
            ..Self::default()
        }
    }

    /// Make every following `save` fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Balances {
        self.balances.lock().await.clone()
    }
}

#[async_trait]
impl BalanceStore for MemoryStore {
    async fn load(&self) -> LedgerResult<Balances> {
        Ok(self.balances.lock().await.clone())
    }

    async fn save(&self, balances: &Balances) -> LedgerResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("balance store rejected the write").into());
        }
        *self.balances.lock().await = balances.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
