use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::templates::EntryKind;
use crate::builder::BuilderError;

/// One repeatable block of the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryBlock {
    /// Stable identity; survives re-indexing.
    pub id: Uuid,
    /// 0-based position, always equal to the block's place in its container.
    pub index: usize,
    pub label: String,
    /// Field name → entered value, one key per template field.
    pub values: BTreeMap<String, String>,
}

impl EntryBlock {
    /// The template `T(index)` for a kind: every field present and empty.
    pub fn from_template(kind: EntryKind, index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            index,
            label: kind.label(index),
            values: kind
                .fields()
                .iter()
                .map(|f| (f.name.to_string(), String::new()))
                .collect(),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }
}

/// Identifies a block for removal or editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRef {
    Index(usize),
    Id(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerState {
    Empty,
    NonEmpty(usize),
}

/// A plain record of one block's trimmed field values.
pub type EntryRecord = BTreeMap<String, String>;

/// The ordered blocks of one entry kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryContainer {
    kind: EntryKind,
    blocks: Vec<EntryBlock>,
}

impl EntryContainer {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn blocks(&self) -> &[EntryBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn state(&self) -> ContainerState {
        if self.is_empty() {
            ContainerState::Empty
        } else {
            ContainerState::NonEmpty(self.len())
        }
    }

    fn position(&self, block: BlockRef) -> Option<usize> {
        match block {
            BlockRef::Index(i) if i < self.blocks.len() => Some(i),
            BlockRef::Index(_) => None,
            BlockRef::Id(id) => self.blocks.iter().position(|b| b.id == id),
        }
    }

    /// Appends `T(len)` and returns it. Other blocks keep their values.
    pub fn add_entry(&mut self) -> &EntryBlock {
        let index = self.blocks.len();
        self.blocks.push(EntryBlock::from_template(self.kind, index));
        self.relabel();
        &self.blocks[index]
    }

    /// Removes the referenced block and re-indexes the rest. An unknown
    /// reference (including any on an empty container) is a no-op.
    pub fn remove_entry(&mut self, block: BlockRef) -> Option<EntryBlock> {
        let position = self.position(block)?;
        let removed = self.blocks.remove(position);
        self.relabel();
        Some(removed)
    }

    pub fn set_field(&mut self, block: BlockRef, field: &str, value: String) -> Result<(), BuilderError> {
        let kind = self.kind;
        if kind.field(field).is_none() {
            return Err(BuilderError::UnknownField {
                section: kind.as_str().to_string(),
                field: field.to_string(),
            });
        }
        let position = self.position(block).ok_or(BuilderError::UnknownBlock {
            kind: kind.as_str().to_string(),
            block,
        })?;
        self.blocks[position].values.insert(field.to_string(), value);
        Ok(())
    }

    /// Required fields left blank, as `kind[index].field` paths.
    pub fn missing_required(&self) -> Vec<String> {
        let required: Vec<_> = self.kind.fields().iter().filter(|f| f.required).collect();
        self.blocks
            .iter()
            .flat_map(|block| {
                required
                    .iter()
                    .filter(|f| block.value(f.name).trim().is_empty())
                    .map(move |f| format!("{}[{}].{}", self.kind.as_str(), block.index, f.name))
            })
            .collect()
    }

    /// Extracts every block's trimmed values, in block order.
    pub fn collect(&self) -> Vec<EntryRecord> {
        self.blocks
            .iter()
            .map(|block| {
                block
                    .values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.trim().to_string()))
                    .collect()
            })
            .collect()
    }

    /// Empties every value but keeps the blocks.
    pub fn clear_values(&mut self) {
        for block in &mut self.blocks {
            for value in block.values.values_mut() {
                value.clear();
            }
        }
    }

    fn relabel(&mut self) {
        let kind = self.kind;
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.index = index;
            block.label = kind.label(index);
        }
    }
}
