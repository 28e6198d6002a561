use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::builder::{ContainerState, EntryBlock, EntryContainer, EntryKind};
use crate::filter::{FilterState, VisibilityReport};
use crate::session::{PageSession, SubmitStatus};

#[derive(Debug, Clone, Serialize)]
pub struct ContainerView {
    pub kind: EntryKind,
    pub container_id: String,
    pub state: ContainerState,
    pub blocks: Vec<EntryBlock>,
}

impl From<&EntryContainer> for ContainerView {
    fn from(container: &EntryContainer) -> Self {
        Self {
            kind: container.kind(),
            container_id: container.kind().container_id(),
            state: container.state(),
            blocks: container.blocks().to_vec(),
        }
    }
}

/// JSON view of a session returned by every builder endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub profile: Option<String>,
    pub filter: FilterState,
    /// Visibility of the bound profile's items under `filter`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityReport>,
    pub personal: BTreeMap<String, String>,
    pub containers: Vec<ContainerView>,
    pub ready: bool,
    pub missing_required: Vec<String>,
    pub submitting: bool,
    pub last_status: Option<SubmitStatus>,
    pub created_at: DateTime<Utc>,
}

impl SessionView {
    pub fn build(session: &PageSession, visibility: Option<VisibilityReport>) -> Self {
        let missing_required = session.builder.missing_required();
        Self {
            id: session.id,
            profile: session.profile.clone(),
            filter: session.filter.clone(),
            visibility,
            personal: session.builder.personal().clone(),
            containers: session.builder.containers().map(Into::into).collect(),
            ready: missing_required.is_empty(),
            missing_required,
            submitting: session.submitting,
            last_status: session.last_status.clone(),
            created_at: session.created_at,
        }
    }
}
