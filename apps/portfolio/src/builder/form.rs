use std::collections::BTreeMap;

use crate::builder::container::{BlockRef, EntryBlock, EntryContainer, EntryRecord};
use crate::builder::dates::normalize_date;
use crate::builder::templates::{personal_field, EntryKind, PERSONAL_FIELDS};
use crate::builder::BuilderError;
use crate::models::draft::{
    CvDraft, EducationRecord, FunctionRecord, PersonalInfo, ProjectRecord, SkillRecord,
    WorkRecord,
};

/// The whole "create CV" form: personal fields plus one container per kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FormBuilder {
    personal: BTreeMap<String, String>,
    containers: BTreeMap<EntryKind, EntryContainer>,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self {
            personal: PERSONAL_FIELDS
                .iter()
                .map(|f| (f.name.to_string(), String::new()))
                .collect(),
            containers: EntryKind::ALL
                .into_iter()
                .map(|kind| (kind, EntryContainer::new(kind)))
                .collect(),
        }
    }
}

impl FormBuilder {
    pub fn personal(&self) -> &BTreeMap<String, String> {
        &self.personal
    }

    /// Containers in form order.
    pub fn containers(&self) -> impl Iterator<Item = &EntryContainer> {
        self.containers.values()
    }

    pub fn container(&self, kind: EntryKind) -> Option<&EntryContainer> {
        self.containers.get(&kind)
    }

    fn container_mut(&mut self, kind: EntryKind) -> &mut EntryContainer {
        self.containers
            .entry(kind)
            .or_insert_with(|| EntryContainer::new(kind))
    }

    pub fn add_entry(&mut self, kind: EntryKind) -> &EntryBlock {
        self.container_mut(kind).add_entry()
    }

    pub fn remove_entry(&mut self, kind: EntryKind, block: BlockRef) -> Option<EntryBlock> {
        self.container_mut(kind).remove_entry(block)
    }

    pub fn set_field(
        &mut self,
        kind: EntryKind,
        block: BlockRef,
        field: &str,
        value: String,
    ) -> Result<(), BuilderError> {
        self.container_mut(kind).set_field(block, field, value)
    }

    pub fn set_personal(&mut self, field: &str, value: String) -> Result<(), BuilderError> {
        if personal_field(field).is_none() {
            return Err(BuilderError::UnknownField {
                section: "personal".to_string(),
                field: field.to_string(),
            });
        }
        self.personal.insert(field.to_string(), value);
        Ok(())
    }

    /// Every blank required field across the form, personal section first.
    pub fn missing_required(&self) -> Vec<String> {
        let personal = PERSONAL_FIELDS
            .iter()
            .filter(|f| f.required)
            .filter(|f| {
                self.personal
                    .get(f.name)
                    .map(|v| v.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|f| format!("personal.{}", f.name));

        personal
            .chain(self.containers.values().flat_map(|c| c.missing_required()))
            .collect()
    }

    /// Save readiness: every rendered required field is filled.
    pub fn is_ready(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Clears every tracked input. Blocks stay in place.
    pub fn clear_inputs(&mut self) {
        for value in self.personal.values_mut() {
            value.clear();
        }
        for container in self.containers.values_mut() {
            container.clear_values();
        }
    }

    /// Walks all containers in order and assembles the draft.
    pub fn collect(&self) -> CvDraft {
        let get = |field: &str| {
            self.personal
                .get(field)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        CvDraft {
            personal: PersonalInfo {
                full_name: get("fullName"),
                function: get("function"),
                email: get("email"),
                phone: get("phone"),
                birthday: iso(&get("birthday")),
                location: get("location"),
                about_me: get("aboutMe"),
            },
            professional_profile: self
                .records(EntryKind::Function)
                .map(|r| FunctionRecord {
                    title: take(&r, "actTitle"),
                    description: take(&r, "professionalProfile"),
                })
                .collect(),
            work_experience: self
                .records(EntryKind::Work)
                .map(|r| WorkRecord {
                    title: take(&r, "workTitle"),
                    company: take(&r, "workCompany"),
                    city: take(&r, "workCity"),
                    country: take(&r, "workCountry"),
                    start_date: iso(&take(&r, "workStart")),
                    end_date: iso(&take(&r, "workEnd")),
                    duty: take(&r, "workDesc"),
                })
                .collect(),
            education: self
                .records(EntryKind::Education)
                .map(|r| EducationRecord {
                    degree: take(&r, "eduDegree"),
                    institution: take(&r, "eduInstitution"),
                    city: take(&r, "eduCity"),
                    country: take(&r, "eduCountry"),
                    start_date: iso(&take(&r, "eduYear")),
                    end_date: iso(&take(&r, "eduYearEnd")),
                })
                .collect(),
            projects: self
                .records(EntryKind::Project)
                .map(|r| ProjectRecord {
                    title: take(&r, "project-name"),
                    project_type: take(&r, "project-type"),
                    description: take(&r, "project-skill"),
                })
                .collect(),
            skills: self
                .records(EntryKind::Skill)
                .map(|r| SkillRecord {
                    title: take(&r, "skill-name"),
                    description: take(&r, "skill-tool"),
                    skill_type: take(&r, "skill-type"),
                    status: take(&r, "skill-level"),
                })
                .collect(),
        }
    }

    fn records(&self, kind: EntryKind) -> impl Iterator<Item = EntryRecord> {
        self.container(kind)
            .map(EntryContainer::collect)
            .unwrap_or_default()
            .into_iter()
    }
}

fn take(record: &EntryRecord, field: &str) -> String {
    record.get(field).cloned().unwrap_or_default()
}

fn iso(value: &str) -> String {
    normalize_date(value).unwrap_or_default()
}
