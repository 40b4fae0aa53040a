use crate::errors::StoreError;
use crate::models::{VisitLog, VisitRecord};
use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::Mutex};

/// The visit log file plus a lock that serializes writers in this process.
///
/// The file is re-read on every call, so edits made by an operator between
/// requests are picked up. Writes go through a sibling temp file and a rename,
/// so readers only ever see a complete document. Another process writing the
/// same file is not coordinated with and can still overwrite a concurrent
/// increment (last writer wins).
#[derive(Debug, Clone)]
pub struct VisitStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl VisitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current log, or an empty one when the file does not exist.
    pub async fn read_visit_log(&self) -> Result<VisitLog, StoreError> {
        load_log(&self.path).await
    }

    /// Loads the log, counts `record`, trims the history and writes the whole
    /// document back. Returns the updated total.
    pub async fn record_visit(&self, record: VisitRecord) -> Result<u64, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut log = load_log(&self.path).await?;
        log.record(record);
        persist_log(&self.path, &log).await?;
        Ok(log.total_visits)
    }
}

pub async fn load_log(path: &Path) -> Result<VisitLog, StoreError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Parse),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(VisitLog::default()),
        Err(err) => Err(err.into()),
    }
}

/// Replaces the document atomically: the new contents are written to a
/// sibling temp file which is then renamed over `path`.
pub async fn persist_log(path: &Path, log: &VisitLog) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(log).map_err(StoreError::Serialize)?;
    let tmp = temp_path(path);
    fs::write(&tmp, payload).await?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
