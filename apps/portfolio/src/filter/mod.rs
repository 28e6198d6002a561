// Filter Engine: project-type / category visibility over rendered item metadata.

pub mod engine;
pub mod items;
pub mod report;

pub use engine::FilterState;
pub use report::{compute_visibility, VisibilityReport, DEFAULT_FILTERED_SKILL_GROUP};
