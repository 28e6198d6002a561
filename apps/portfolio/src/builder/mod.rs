// Dynamic Form Builder: repeatable entry blocks per kind, save readiness and
// draft collection for the "create CV" form.

pub mod container;
pub mod dates;
pub mod form;
pub mod templates;

use thiserror::Error;

pub use container::{BlockRef, ContainerState, EntryBlock, EntryContainer};
pub use form::FormBuilder;
pub use templates::{EntryKind, FieldSpec, InputKind, PERSONAL_FIELDS};

#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    #[error("Unknown field '{field}' in {section}")]
    UnknownField { section: String, field: String },

    #[error("No {kind} block matches {block:?}")]
    UnknownBlock { kind: String, block: BlockRef },
}
