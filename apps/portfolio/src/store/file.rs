use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::models::cv::CvDocument;
use crate::models::draft::CvDraft;
use crate::store::{apply_draft, profile_key, CvStore, MergeReport};

/// On-disk layout: `{"profiles": {"<name>": <CvDocument>, ...}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileBook {
    #[serde(default)]
    pub profiles: BTreeMap<String, CvDocument>,
}

/// Profiles kept in a single JSON file, rewritten atomically on every merge.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the book. A missing file is an empty book; an unreadable or
    /// malformed one is an error.
    async fn read_strict(&self) -> Result<ProfileBook> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProfileBook::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        serde_json::from_str(&raw)
            .with_context(|| format!("Malformed profile book at {}", self.path.display()))
    }

    /// Reads the book for serving. Parse failures degrade to the empty book.
    async fn read_lenient(&self) -> Result<ProfileBook> {
        match self.read_strict().await {
            Ok(book) => Ok(book),
            Err(e) if e.downcast_ref::<serde_json::Error>().is_some() => {
                error!("{e:#}");
                Ok(ProfileBook::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn write_atomic(&self, book: &ProfileBook) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let body = serde_json::to_vec_pretty(book).context("Failed to serialize profile book")?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl CvStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn list_profiles(&self) -> Result<Vec<String>> {
        Ok(self.read_lenient().await?.profiles.into_keys().collect())
    }

    async fn load_profile(&self, name: &str) -> Result<Option<CvDocument>> {
        let name = profile_key(name);
        let mut book = self.read_lenient().await?;
        Ok(book.profiles.remove(name).map(|mut doc| {
            if doc.name.is_empty() {
                doc.name = name.to_string();
            }
            doc.normalized()
        }))
    }

    async fn merge_draft(&self, draft: &CvDraft) -> Result<MergeReport> {
        let _guard = self.write_lock.lock().await;

        let mut book = self.read_strict().await?;
        let name = draft.profile_name().to_string();
        let (document, report) = apply_draft(book.profiles.remove(&name), draft);
        book.profiles.insert(name, document);

        self.write_atomic(&book).await?;
        info!(
            "Stored draft for '{}' ({:?}, {} entries)",
            report.profile, report.outcome, report.entries_added
        );
        if report.entries_added == 0 {
            warn!("Draft for '{}' carried no entries", report.profile);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::draft::{PersonalInfo, ProjectRecord};
    use crate::store::MergeOutcome;

    fn draft(name: &str, project: &str) -> CvDraft {
        CvDraft {
            personal: PersonalInfo {
                full_name: name.to_string(),
                ..Default::default()
            },
            projects: vec![ProjectRecord {
                title: project.to_string(),
                project_type: "Web".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("resume.json"));
        assert!(store.list_profiles().await.unwrap().is_empty());
        assert!(store.load_profile("Ada").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_creates_then_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data/resume.json"));

        let first = store.merge_draft(&draft("Ada", "Engine")).await.unwrap();
        assert_eq!(first.outcome, MergeOutcome::Created);
        assert_eq!(first.entries_added, 1);

        let second = store.merge_draft(&draft("Ada", "Loom")).await.unwrap();
        assert_eq!(second.outcome, MergeOutcome::Merged);

        let doc = store.load_profile("Ada").await.unwrap().unwrap();
        assert_eq!(doc.project.len(), 2);
        assert_eq!(doc.project_class.len(), 1);
        assert_eq!(store.list_profiles().await.unwrap(), vec!["Ada"]);
        assert!(!dir.path().join("data/resume.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_profile_keys_are_trimmed_and_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("resume.json"));

        store.merge_draft(&draft(" Ada ", "Engine")).await.unwrap();
        store.merge_draft(&draft("ada", "Loom")).await.unwrap();

        assert_eq!(store.list_profiles().await.unwrap(), vec!["Ada", "ada"]);
        assert_eq!(store.load_profile(" Ada").await.unwrap().unwrap().project.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_file_reads_empty_but_blocks_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        tokio::fs::write(&path, "{ broken").await.unwrap();
        let store = JsonFileStore::new(&path);

        assert!(store.list_profiles().await.unwrap().is_empty());
        assert!(store.merge_draft(&draft("Ada", "Engine")).await.is_err());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "{ broken");
    }

    #[tokio::test]
    async fn test_loaded_documents_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        let raw = r#"{"profiles": {"Lname Fname": {
            "Category": [{"main": "URN://cv.resume/software"}],
            "Project": [{"projectTitle": ["Site"], "category": ["URN://cv.resume/software"]}]
        }}}"#;
        tokio::fs::write(&path, raw).await.unwrap();
        let store = JsonFileStore::new(&path);

        let doc = store.load_profile("Lname Fname").await.unwrap().unwrap();
        assert_eq!(doc.name, "Lname Fname");
        assert_eq!(doc.category[0].main, "software");
        assert_eq!(doc.project[0].category, vec!["software"]);
    }
}
