use serde::{Deserialize, Serialize};

use crate::store::profile_key;

/// The aggregate record produced by the "create CV" form and accepted by
/// `POST /record`. Dates are ISO `YYYY-MM-DD`, or empty when the entered
/// value did not normalize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDraft {
    pub personal: PersonalInfo,
    pub professional_profile: Vec<FunctionRecord>,
    pub work_experience: Vec<WorkRecord>,
    pub education: Vec<EducationRecord>,
    pub projects: Vec<ProjectRecord>,
    pub skills: Vec<SkillRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub function: String,
    pub email: String,
    pub phone: String,
    pub birthday: String,
    pub location: String,
    pub about_me: String,
}

/// One "what I do" entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FunctionRecord {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkRecord {
    pub title: String,
    pub company: String,
    pub city: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    pub duty: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationRecord {
    pub degree: String,
    pub institution: String,
    pub city: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkillRecord {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub skill_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub description: String,
}

impl CvDraft {
    /// The profile name the draft is stored under.
    pub fn profile_name(&self) -> &str {
        profile_key(&self.personal.full_name)
    }

    pub fn entry_count(&self) -> usize {
        self.professional_profile.len()
            + self.work_experience.len()
            + self.education.len()
            + self.projects.len()
            + self.skills.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_form_payload() {
        let raw = r#"{
            "personal": {"fullName": " Ada Lovelace ", "birthday": "1990-06-15"},
            "workExperience": [{"title": "Engineer", "startDate": "2020-01-01", "endDate": ""}],
            "skills": [{"title": "Rust", "type": "Digital Skill", "status": "80%"}],
            "projects": [{"title": "Engine", "type": "Web"}]
        }"#;
        let draft: CvDraft = serde_json::from_str(raw).unwrap();
        assert_eq!(draft.profile_name(), "Ada Lovelace");
        assert_eq!(draft.skills[0].skill_type, "Digital Skill");
        assert_eq!(draft.projects[0].project_type, "Web");
        assert_eq!(draft.entry_count(), 3);
        assert!(draft.education.is_empty());
    }
}
