//! Field templates for every repeatable entry kind and the personal section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Date,
    TextArea,
}

/// One named input of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Form field name; also the key used when collecting.
    pub name: &'static str,
    /// Element id stem. Entry fields get `-{index}` appended.
    pub id: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

const fn field(
    name: &'static str,
    id: &'static str,
    label: &'static str,
    input: InputKind,
    required: bool,
) -> FieldSpec {
    FieldSpec {
        name,
        id,
        label,
        input,
        required,
        placeholder: None,
    }
}

const fn hinted(spec: FieldSpec, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        placeholder: Some(placeholder),
        ..spec
    }
}

pub const PERSONAL_FIELDS: &[FieldSpec] = &[
    field("fullName", "full-name", "Full Name *", InputKind::Text, true),
    field("function", "function", "Function / Role *", InputKind::Text, true),
    field("email", "email", "Email *", InputKind::Email, true),
    field("phone", "phone", "Phone (Optional)", InputKind::Tel, false),
    hinted(
        field("birthday", "birthday", "Birthday (DD.MM.YYYY)", InputKind::Text, false),
        "e.g., 15.06.1990",
    ),
    field("location", "location", "Location (Optional)", InputKind::Text, false),
    field("aboutMe", "about-me", "About Me (Optional)", InputKind::TextArea, false),
];

const FUNCTION_FIELDS: &[FieldSpec] = &[
    hinted(
        field("actTitle", "act-title", "Activity Title *", InputKind::Text, true),
        "e.g., Software Development, Data Science, ...",
    ),
    field(
        "professionalProfile",
        "professionalProfile",
        "Professional Profile Text (Optional)",
        InputKind::TextArea,
        false,
    ),
];

const WORK_FIELDS: &[FieldSpec] = &[
    field("workTitle", "work-title", "Job Title *", InputKind::Text, true),
    field("workCompany", "work-company", "Company Name *", InputKind::Text, true),
    field("workCity", "work-city", "City (Optional)", InputKind::Text, false),
    field("workCountry", "work-country", "Country (Optional)", InputKind::Text, false),
    field("workStart", "work-start", "Start Date (DD.MM.YYYY) *", InputKind::Date, true),
    field("workEnd", "work-end", "End Date (DD.MM.YYYY) *", InputKind::Date, true),
    field(
        "workDesc",
        "work-desc",
        "Key Responsibilities (Optional)",
        InputKind::TextArea,
        false,
    ),
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    hinted(
        field("eduDegree", "edu-degree", "Degree/Certification *", InputKind::Text, true),
        "e.g, Bachelor of Science in Computer Science",
    ),
    field("eduInstitution", "edu-institution", "Institution Name *", InputKind::Text, true),
    field("eduCity", "edu-city", "City (Optional)", InputKind::Text, false),
    field("eduCountry", "edu-country", "Country (Optional)", InputKind::Text, false),
    field("eduYear", "edu-year", "Admission Date (DD.MM.YYYY) *", InputKind::Date, true),
    field("eduYearEnd", "edu-year-end", "Graduation Date (DD.MM.YYYY) *", InputKind::Date, true),
];

const SKILL_FIELDS: &[FieldSpec] = &[
    hinted(
        field("skill-name", "skill-name", "Core Skill *", InputKind::Text, true),
        "e.g., Software Development",
    ),
    hinted(
        field("skill-tool", "skill-tool", "Tools Used *", InputKind::Text, true),
        "e.g., Python, React, RDF, SPARQL",
    ),
    field("skill-type", "skill-type", "Skill Type (Optional)", InputKind::Text, false),
    hinted(
        field("skill-level", "skill-level", "Knowledge Level(in percentage) *", InputKind::Text, true),
        "e.g., 80%",
    ),
];

const PROJECT_FIELDS: &[FieldSpec] = &[
    field("project-name", "project-name", "Project Name *", InputKind::Text, true),
    field("project-type", "project-type", "Project Type (Optional)", InputKind::Text, false),
    field("project-skill", "project-skill", "Skills Acquired *", InputKind::TextArea, true),
];

/// The repeatable entry kinds of the "create CV" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Function,
    Work,
    Education,
    Skill,
    Project,
}

impl EntryKind {
    /// Form order of the containers.
    pub const ALL: [EntryKind; 5] = [
        EntryKind::Function,
        EntryKind::Work,
        EntryKind::Education,
        EntryKind::Skill,
        EntryKind::Project,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Function => "function",
            EntryKind::Work => "work",
            EntryKind::Education => "education",
            EntryKind::Skill => "skill",
            EntryKind::Project => "project",
        }
    }

    /// Capitalized kind name used in block titles.
    pub fn title(&self) -> &'static str {
        match self {
            EntryKind::Function => "Function",
            EntryKind::Work => "Work",
            EntryKind::Education => "Education",
            EntryKind::Skill => "Skill",
            EntryKind::Project => "Project",
        }
    }

    pub fn container_id(&self) -> String {
        format!("{}-container", self.as_str())
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            EntryKind::Function => FUNCTION_FIELDS,
            EntryKind::Work => WORK_FIELDS,
            EntryKind::Education => EDUCATION_FIELDS,
            EntryKind::Skill => SKILL_FIELDS,
            EntryKind::Project => PROJECT_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Ordinal label shown on the block at `index`.
    pub fn label(&self, index: usize) -> String {
        format!("{} Entry #{}", self.title(), index + 1)
    }
}

pub fn personal_field(name: &str) -> Option<&'static FieldSpec> {
    PERSONAL_FIELDS.iter().find(|f| f.name == name)
}
