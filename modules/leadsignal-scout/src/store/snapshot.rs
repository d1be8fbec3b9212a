use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use leadsignal_common::{LeadSignalError, Snapshot};

/// The local JSON snapshot of the latest run.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the snapshot. Writes a sibling temp file and renames it over
    /// the target, so readers see either the old or the new snapshot.
    pub async fn write(&self, snapshot: &Snapshot) -> Result<(), LeadSignalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create snapshot dir", parent, e))?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| LeadSignalError::Storage(format!("serialize snapshot: {e}")))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| storage_error("write snapshot", &tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| storage_error("replace snapshot", &self.path, e))?;

        info!(path = %self.path.display(), total = snapshot.total, "Snapshot written");
        Ok(())
    }

    /// The last written snapshot, or `NotFound` if none exists yet.
    pub async fn read(&self) -> Result<Snapshot, LeadSignalError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LeadSignalError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(storage_error("read snapshot", &self.path, e)),
        };

        serde_json::from_str(&json).map_err(|e| {
            LeadSignalError::Storage(format!("parse snapshot {}: {e}", self.path.display()))
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> LeadSignalError {
    LeadSignalError::Storage(format!("{action} {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::testing::sample_signal;

    #[tokio::test]
    async fn read_before_write_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("signals_today.json"));
        assert!(matches!(file.read().await, Err(LeadSignalError::NotFound(_))));
    }

    #[tokio::test]
    async fn write_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("app").join("signals_today.json"));
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();

        file.write(&Snapshot::new(vec![sample_signal(1)], at)).await.unwrap();

        assert!(file.path().exists());
        assert!(!file.tmp_path().exists());
    }

    #[tokio::test]
    async fn second_write_overwrites_first() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("signals_today.json"));
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();

        file.write(&Snapshot::new(vec![sample_signal(1), sample_signal(2)], at))
            .await
            .unwrap();
        file.write(&Snapshot::new(vec![sample_signal(3)], at)).await.unwrap();

        let read = file.read().await.unwrap();
        assert_eq!(read.total, 1);
        assert_eq!(read.signals[0].id, sample_signal(3).id);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals_today.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = SnapshotFile::new(path).read().await.unwrap_err();
        assert!(matches!(err, LeadSignalError::Storage(_)));
    }
}
