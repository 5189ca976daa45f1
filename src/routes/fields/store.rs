use super::models::FieldRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

/// Repository over per-user field records, so the flat file can be swapped
/// for a real datastore without touching the calculator or the views.
#[async_trait]
pub trait FieldStore: Send + Sync {
    /// Ordered list of records for a user; unknown users yield an empty list.
    async fn records_for_user(&self, user: &str) -> Result<Vec<FieldRecord>>;
    async fn append_record(&self, user: &str, record: FieldRecord) -> Result<()>;
}

type RecordsByUser = BTreeMap<String, Vec<FieldRecord>>;

/// Flat-file store: one JSON document mapping username to an ordered list
/// of field records. A missing file reads as an empty store.
pub struct JsonFileStore {
    path: PathBuf,
    // Serialises read-modify-write cycles on the document
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<RecordsByUser> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("corrupt record store at {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RecordsByUser::new()),
            Err(e) => {
                Err(e).with_context(|| format!("cannot read record store at {}", self.path.display()))
            }
        }
    }

    async fn save(&self, records: &RecordsByUser) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("cannot create record store directory {}", parent.display())
            })?;
        }
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("cannot write record store at {}", self.path.display()))
    }
}

#[async_trait]
impl FieldStore for JsonFileStore {
    async fn records_for_user(&self, user: &str) -> Result<Vec<FieldRecord>> {
        let mut records = self.load().await?;
        Ok(records.remove(user).unwrap_or_default())
    }

    async fn append_record(&self, user: &str, record: FieldRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.entry(user.to_string()).or_default().push(record);
        self.save(&records).await?;
        debug!(user, path = %self.path.display(), "Field record appended");
        Ok(())
    }
}
