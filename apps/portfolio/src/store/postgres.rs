use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::models::cv::CvDocument;
use crate::models::draft::CvDraft;
use crate::models::records::ProfileRow;
use crate::store::{apply_draft, profile_key, CvStore, MergeOutcome, MergeReport};

const CREATE_PROFILES: &str = r#"
    CREATE TABLE IF NOT EXISTS cv_profiles (
        name        TEXT PRIMARY KEY,
        document    JSONB NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_RECORDS: &str = r#"
    CREATE TABLE IF NOT EXISTS cv_records (
        id            UUID PRIMARY KEY,
        profile_name  TEXT NOT NULL,
        draft         JSONB NOT NULL,
        outcome       TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Profiles as JSONB rows. Every accepted draft is also appended to
/// `cv_records`; those rows are never updated.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and ensures the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        info!("PostgreSQL connection pool established");

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Creates the tables if they do not exist.
    pub async fn migrate(&self) -> Result<()> {
        for statement in [CREATE_PROFILES, CREATE_RECORDS] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to create CV tables")?;
        }
        info!("CV tables ready");
        Ok(())
    }
}

fn outcome_label(outcome: MergeOutcome) -> &'static str {
    match outcome {
        MergeOutcome::Created => "created",
        MergeOutcome::Merged => "merged",
    }
}

#[async_trait]
impl CvStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_profiles(&self) -> Result<Vec<String>> {
        Ok(
            sqlx::query_scalar::<_, String>("SELECT name FROM cv_profiles ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn load_profile(&self, name: &str) -> Result<Option<CvDocument>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT name, document, updated_at FROM cv_profiles WHERE name = $1",
        )
        .bind(profile_key(name))
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        debug!("Loaded profile '{}' (updated {})", row.name, row.updated_at);

        let mut doc = match serde_json::from_value::<CvDocument>(row.document) {
            Ok(doc) => doc.normalized(),
            Err(e) => {
                error!("Stored document for '{}' is malformed: {e}", row.name);
                CvDocument::default()
            }
        };
        if doc.name.is_empty() {
            doc.name = row.name;
        }
        Ok(Some(doc))
    }

    async fn merge_draft(&self, draft: &CvDraft) -> Result<MergeReport> {
        let name = draft.profile_name().to_string();
        let mut tx = self.pool.begin().await?;

        let existing: Option<Value> =
            sqlx::query_scalar("SELECT document FROM cv_profiles WHERE name = $1 FOR UPDATE")
                .bind(&name)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing
            .map(serde_json::from_value::<CvDocument>)
            .transpose()
            .with_context(|| format!("Stored document for '{name}' is malformed"))?;

        let (document, report) = apply_draft(existing, draft);
        let document = serde_json::to_value(&document).context("Failed to serialize profile")?;
        let draft_value = serde_json::to_value(draft).context("Failed to serialize draft")?;

        sqlx::query(
            r#"
            INSERT INTO cv_profiles (name, document, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (name) DO UPDATE
                SET document = EXCLUDED.document, updated_at = now()
            "#,
        )
        .bind(&name)
        .bind(&document)
        .execute(&mut *tx)
        .await?;

        // Append-only history of accepted drafts.
        sqlx::query(
            "INSERT INTO cv_records (id, profile_name, draft, outcome) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(&name)
        .bind(&draft_value)
        .bind(outcome_label(report.outcome))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(
            "Stored draft for '{}' ({}, {} entries)",
            name,
            outcome_label(report.outcome),
            report.entries_added
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(MergeOutcome::Created), "created");
        assert_eq!(outcome_label(MergeOutcome::Merged), "merged");
    }

    #[test]
    fn test_schema_statements_are_idempotent() {
        for statement in [CREATE_PROFILES, CREATE_RECORDS] {
            assert!(statement.contains("IF NOT EXISTS"));
        }
    }
}
