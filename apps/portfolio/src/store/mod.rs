//! CV profile storage.
//!
//! `AppState` carries a `CvStore` as `Arc<dyn CvStore>`. The JSON file store
//! is the default; `PgStore` is selected when `DATABASE_URL` is set.

pub mod file;
pub mod merge;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::models::cv::CvDocument;
use crate::models::draft::CvDraft;

pub use file::JsonFileStore;
pub use postgres::PgStore;

/// The key a profile is stored and locked under: the trimmed name, case kept.
pub fn profile_key(name: &str) -> &str {
    name.trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    Created,
    Merged,
}

/// What a stored draft did to the profile book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub outcome: MergeOutcome,
    pub profile: String,
    pub entries_added: usize,
}

#[async_trait]
pub trait CvStore: Send + Sync {
    /// Backend name, reported by the health probe.
    fn backend(&self) -> &'static str;

    /// Stored profile names, sorted.
    async fn list_profiles(&self) -> Result<Vec<String>>;

    /// The stored document for `name`, normalized. A stored document that
    /// cannot be parsed is logged and served as the empty document.
    async fn load_profile(&self, name: &str) -> Result<Option<CvDocument>>;

    /// Converts `draft` and merges it into the profile of the same name,
    /// creating the profile when absent.
    async fn merge_draft(&self, draft: &CvDraft) -> Result<MergeReport>;
}

/// Loads `name` with `NameList` filled from the store's profile list.
pub async fn load_for_page(store: &dyn CvStore, name: &str) -> Result<Option<CvDocument>> {
    let Some(mut doc) = store.load_profile(name).await? else {
        return Ok(None);
    };
    doc.name_list = store.list_profiles().await?;
    Ok(Some(doc))
}

/// Applies a draft to an optional existing document.
pub(crate) fn apply_draft(existing: Option<CvDocument>, draft: &CvDraft) -> (CvDocument, MergeReport) {
    let incoming = merge::draft_to_document(draft);
    let report = MergeReport {
        outcome: if existing.is_some() {
            MergeOutcome::Merged
        } else {
            MergeOutcome::Created
        },
        profile: incoming.name.clone(),
        entries_added: draft.entry_count(),
    };
    let document = match existing {
        Some(doc) => merge::merge_documents(doc, incoming),
        None => incoming,
    };
    (document, report)
}
