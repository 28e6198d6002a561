//! The command dispatch table. Each command is a pure transition on a
//! `PageSession`; rendering happens afterwards in the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::builder::{BlockRef, BuilderError, EntryKind, FormBuilder};
use crate::filter::FilterState;
use crate::session::PageSession;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    SelectProjectType {
        project_type: String,
    },
    ApplyCategories {
        #[serde(default)]
        categories: Vec<String>,
    },
    AddEntry {
        kind: EntryKind,
    },
    RemoveEntry {
        kind: EntryKind,
        block: BlockRef,
    },
    EditField {
        kind: EntryKind,
        block: BlockRef,
        field: String,
        value: String,
    },
    EditPersonal {
        field: String,
        value: String,
    },
    Reset,
}

/// What a command changed, so the caller knows which view to refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    FilterChanged,
    FormChanged { ready: bool },
    Unchanged,
    Reset,
}

pub fn dispatch(session: &mut PageSession, command: Command) -> Result<Effect, BuilderError> {
    let form_changed = |form: &FormBuilder| Effect::FormChanged {
        ready: form.is_ready(),
    };

    match command {
        Command::SelectProjectType { project_type } => {
            session.filter = session.filter.clone().with_project_type(&project_type);
            Ok(Effect::FilterChanged)
        }
        Command::ApplyCategories { categories } => {
            session.filter = session.filter.clone().with_categories(categories);
            Ok(Effect::FilterChanged)
        }
        Command::AddEntry { kind } => {
            session.builder.add_entry(kind);
            Ok(form_changed(&session.builder))
        }
        Command::RemoveEntry { kind, block } => match session.builder.remove_entry(kind, block) {
            Some(_) => Ok(form_changed(&session.builder)),
            None => Ok(Effect::Unchanged),
        },
        Command::EditField {
            kind,
            block,
            field,
            value,
        } => {
            session.builder.set_field(kind, block, &field, value)?;
            Ok(form_changed(&session.builder))
        }
        Command::EditPersonal { field, value } => {
            session.builder.set_personal(&field, value)?;
            Ok(form_changed(&session.builder))
        }
        Command::Reset => {
            session.filter = FilterState::default();
            session.builder = FormBuilder::default();
            session.last_status = None;
            Ok(Effect::Reset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Command {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_commands_deserialize_from_tagged_json() {
        assert_eq!(
            parse(r#"{"command": "add_entry", "kind": "work"}"#),
            Command::AddEntry {
                kind: EntryKind::Work
            }
        );
        assert_eq!(
            parse(r#"{"command": "remove_entry", "kind": "skill", "block": {"index": 2}}"#),
            Command::RemoveEntry {
                kind: EntryKind::Skill,
                block: BlockRef::Index(2)
            }
        );
        assert_eq!(
            parse(r#"{"command": "apply_categories"}"#),
            Command::ApplyCategories { categories: vec![] }
        );
        assert_eq!(parse(r#"{"command": "reset"}"#), Command::Reset);
    }

    #[test]
    fn test_filter_commands() {
        let mut session = PageSession::new(None);
        let effect = dispatch(
            &mut session,
            Command::SelectProjectType {
                project_type: " Web ".into(),
            },
        )
        .unwrap();
        assert_eq!(effect, Effect::FilterChanged);
        assert_eq!(session.filter.active_project_type, "web");

        dispatch(
            &mut session,
            Command::ApplyCategories {
                categories: vec!["Software".into(), "all".into()],
            },
        )
        .unwrap();
        assert!(session.filter.shows_all_categories());
        assert_eq!(session.filter.selected_categories.len(), 1);
    }

    #[test]
    fn test_form_commands_report_readiness() {
        let mut session = PageSession::new(None);
        for (field, value) in [("fullName", "Ada"), ("function", "Engineer"), ("email", "a@b.c")] {
            dispatch(
                &mut session,
                Command::EditPersonal {
                    field: field.into(),
                    value: value.into(),
                },
            )
            .unwrap();
        }

        let effect = dispatch(&mut session, Command::AddEntry { kind: EntryKind::Project }).unwrap();
        assert_eq!(effect, Effect::FormChanged { ready: false });

        let effect = dispatch(
            &mut session,
            Command::RemoveEntry {
                kind: EntryKind::Project,
                block: BlockRef::Index(0),
            },
        )
        .unwrap();
        assert_eq!(effect, Effect::FormChanged { ready: true });
    }

    #[test]
    fn test_remove_from_empty_is_unchanged() {
        let mut session = PageSession::new(None);
        let effect = dispatch(
            &mut session,
            Command::RemoveEntry {
                kind: EntryKind::Work,
                block: BlockRef::Index(0),
            },
        )
        .unwrap();
        assert_eq!(effect, Effect::Unchanged);
    }

    #[test]
    fn test_edit_unknown_field_is_rejected_without_change() {
        let mut session = PageSession::new(None);
        dispatch(&mut session, Command::AddEntry { kind: EntryKind::Work }).unwrap();
        let before = session.builder.clone();
        let err = dispatch(
            &mut session,
            Command::EditField {
                kind: EntryKind::Work,
                block: BlockRef::Index(0),
                field: "skill-name".into(),
                value: "x".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, BuilderError::UnknownField { .. }));
        assert_eq!(session.builder, before);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = PageSession::new(Some("Ada".into()));
        dispatch(&mut session, Command::AddEntry { kind: EntryKind::Work }).unwrap();
        dispatch(
            &mut session,
            Command::SelectProjectType {
                project_type: "cli".into(),
            },
        )
        .unwrap();
        assert_eq!(dispatch(&mut session, Command::Reset).unwrap(), Effect::Reset);
        assert!(session.builder.container(EntryKind::Work).unwrap().is_empty());
        assert_eq!(session.filter, FilterState::default());
        assert_eq!(session.profile.as_deref(), Some("Ada"));
    }
}
