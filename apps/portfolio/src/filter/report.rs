use serde::Serialize;

use crate::filter::engine::{apply_state, is_visible, Criteria, FilterState};
use crate::filter::items::{category_attr, project_type_attr, CvItem};
use crate::models::cv::CvDocument;

/// Skill group whose items take part in category filtering by default.
pub const DEFAULT_FILTERED_SKILL_GROUP: &str = "Digital Skill";

/// Per-section visibility, index-aligned with the document's collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityReport {
    pub projects: Vec<bool>,
    pub certifications: Vec<bool>,
    pub experience: Vec<bool>,
    /// Skills outside the filtered group are always visible.
    pub skills: Vec<bool>,
}

fn run(mut items: Vec<CvItem>, state: &FilterState, criteria: Criteria) -> Vec<bool> {
    apply_state(&mut items, state, criteria);
    items.into_iter().map(|i| i.visible).collect()
}

/// Computes item visibility for every filter surface of a document.
pub fn compute_visibility(
    doc: &CvDocument,
    state: &FilterState,
    filtered_skill_group: &str,
) -> VisibilityReport {
    let projects = doc
        .project
        .iter()
        .map(|p| {
            CvItem::from_attributes(
                Some(&category_attr(&p.category)),
                Some(&project_type_attr(&p.project_class)),
            )
        })
        .collect();

    let certifications = doc
        .certificate
        .iter()
        .map(|c| CvItem::from_attributes(Some(&category_attr(&c.category)), None))
        .collect();

    let experience = doc
        .work_experience
        .iter()
        .map(|w| CvItem::from_attributes(Some(&category_attr(&w.category)), None))
        .collect();

    let skills = doc
        .skills
        .iter()
        .map(|s| {
            let item = CvItem::from_attributes(Some(&category_attr(&s.category)), None);
            s.typename.join(",") != filtered_skill_group
                || is_visible(&item, state, Criteria::CategoryOnly)
        })
        .collect();

    VisibilityReport {
        projects: run(projects, state, Criteria::TypeAndCategory),
        certifications: run(certifications, state, Criteria::CategoryOnly),
        experience: run(experience, state, Criteria::CategoryOnly),
        skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{Certificate, Project, Skill, WorkExperience};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_doc() -> CvDocument {
        CvDocument {
            project: vec![
                Project {
                    project_title: "Graph explorer".into(),
                    project_class: strings(&["Web"]),
                    category: strings(&["software", "research"]),
                    ..Default::default()
                },
                Project {
                    project_title: "Warehouse".into(),
                    project_class: strings(&["Data"]),
                    category: strings(&["database"]),
                    ..Default::default()
                },
            ],
            certificate: vec![Certificate {
                cert_title: "SQL".into(),
                category: strings(&["database"]),
                ..Default::default()
            }],
            work_experience: vec![WorkExperience {
                work_title: "Researcher".into(),
                category: strings(&["research"]),
                ..Default::default()
            }],
            skills: vec![
                Skill {
                    skill_title: "Rust".into(),
                    typename: strings(&["Digital Skill"]),
                    category: strings(&["software"]),
                    ..Default::default()
                },
                Skill {
                    skill_title: "German".into(),
                    typename: strings(&["Language"]),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_state_everything_visible() {
        let report = compute_visibility(
            &sample_doc(),
            &FilterState::default(),
            DEFAULT_FILTERED_SKILL_GROUP,
        );
        assert_eq!(report.projects, vec![true, true]);
        assert_eq!(report.certifications, vec![true]);
        assert_eq!(report.experience, vec![true]);
        assert_eq!(report.skills, vec![true, true]);
    }

    #[test]
    fn test_category_selection_spans_sections() {
        let state = FilterState::default().with_categories(["database"]);
        let report = compute_visibility(&sample_doc(), &state, DEFAULT_FILTERED_SKILL_GROUP);
        assert_eq!(report.projects, vec![false, true]);
        assert_eq!(report.certifications, vec![true]);
        assert_eq!(report.experience, vec![false]);
        // Only the filtered skill group is affected.
        assert_eq!(report.skills, vec![false, true]);
    }

    #[test]
    fn test_project_type_only_touches_projects() {
        let state = FilterState::default().with_project_type("web");
        let report = compute_visibility(&sample_doc(), &state, DEFAULT_FILTERED_SKILL_GROUP);
        assert_eq!(report.projects, vec![true, false]);
        assert_eq!(report.certifications, vec![true]);
        assert_eq!(report.experience, vec![true]);
    }

    #[test]
    fn test_empty_project_list_gives_empty_report() {
        let doc = CvDocument::parse_embedded(r#"{"Project": []}"#);
        let state = FilterState::default().with_project_type("web");
        let report = compute_visibility(&doc, &state, DEFAULT_FILTERED_SKILL_GROUP);
        assert!(report.projects.is_empty());
    }
}
