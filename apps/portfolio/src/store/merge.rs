//! Draft → profile conversion and profile merging.

use uuid::Uuid;

use crate::models::cv::{
    CvDocument, Education, PersonDetails, Project, Service, Skill, Tag, WorkExperience,
};
use crate::models::draft::CvDraft;
use crate::render::dates::{format_date, format_end_date, DateStyle};

/// Photo assigned to profiles created from a draft.
pub const DRAFT_PHOTO: &str = "assets/avatar-1.png";

fn resource_id(kind: &str) -> String {
    format!("{kind}_{}", Uuid::new_v4())
}

fn non_empty(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

/// Adds a tag for `value` unless one with the same text exists. Blank is skipped.
fn push_unique(tags: &mut Vec<Tag>, value: &str) {
    if !value.is_empty() && !tags.iter().any(|t| t.main == value) {
        tags.push(Tag::new(value));
    }
}

/// Builds a CV document named after the draft's `fullName`.
///
/// Dates arrive as ISO `YYYY-MM-DD` and are stored in display form.
pub fn draft_to_document(draft: &CvDraft) -> CvDocument {
    let personal = &draft.personal;

    let details = PersonDetails {
        person_uri: resource_id("Person"),
        dob: format_date(&personal.birthday, DateStyle::DayMonthYear),
        address: personal.location.clone(),
        email_address: personal.email.clone(),
        phone_number: personal.phone.clone(),
        role_title: personal.function.clone(),
        about_me: personal.about_me.clone(),
        photo: DRAFT_PHOTO.to_string(),
    };

    let service = draft
        .professional_profile
        .iter()
        .map(|f| Service {
            main: resource_id("Expertise"),
            service_title: f.title.clone(),
            service_text: f.description.clone(),
            service_image: String::new(),
        })
        .collect();

    let work_experience = draft
        .work_experience
        .iter()
        .map(|w| WorkExperience {
            main: resource_id("Employment"),
            work_title: w.title.clone(),
            industry_name: w.company.clone(),
            city: w.city.clone(),
            country: w.country.clone(),
            start_date: format_date(&w.start_date, DateStyle::Year),
            end_date: format_end_date(&w.end_date, DateStyle::Year),
            duty_description: non_empty(&w.duty),
            category: Vec::new(),
        })
        .collect();

    let education = draft
        .education
        .iter()
        .map(|e| Education {
            main: resource_id("Education"),
            school_name: e.institution.clone(),
            degree_title: e.degree.clone(),
            city: e.city.clone(),
            country: e.country.clone(),
            start_date: format_date(&e.start_date, DateStyle::MonthYear),
            end_date: format_end_date(&e.end_date, DateStyle::MonthYear),
            ..Default::default()
        })
        .collect();

    let mut skill_type = Vec::new();
    let skills = draft
        .skills
        .iter()
        .map(|s| {
            push_unique(&mut skill_type, &s.skill_type);
            Skill {
                main: resource_id("Skill"),
                skill_title: s.title.clone(),
                category: Vec::new(),
                typename: non_empty(&s.skill_type),
                percentage_score: s.status.clone(),
                percentage: s.status.trim_end_matches('%').trim().to_string(),
                skill_description: s.description.clone(),
            }
        })
        .collect();

    let mut project_class = Vec::new();
    let project = draft
        .projects
        .iter()
        .map(|p| {
            push_unique(&mut project_class, &p.project_type);
            Project {
                main: resource_id("Project"),
                project_title: p.title.clone(),
                project_class: non_empty(&p.project_type),
                project_description: p.description.clone(),
                ..Default::default()
            }
        })
        .collect();

    CvDocument {
        name: draft.profile_name().to_string(),
        details: vec![details],
        service,
        work_experience,
        education,
        skills,
        skill_type,
        project,
        project_class,
        ..Default::default()
    }
}

/// Appends `incoming` entries onto `existing` and unions the tag lists.
/// The existing name and details record win when present.
pub fn merge_documents(mut existing: CvDocument, incoming: CvDocument) -> CvDocument {
    if existing.details.is_empty() {
        existing.details = incoming.details;
    }
    existing.social.extend(incoming.social);
    existing.service.extend(incoming.service);
    existing.education.extend(incoming.education);
    existing.work_experience.extend(incoming.work_experience);
    existing.skills.extend(incoming.skills);
    existing.certificate.extend(incoming.certificate);
    existing.project.extend(incoming.project);

    for tag in &incoming.category {
        push_unique(&mut existing.category, &tag.main);
    }
    for tag in &incoming.skill_type {
        push_unique(&mut existing.skill_type, &tag.main);
    }
    for tag in &incoming.project_class {
        push_unique(&mut existing.project_class, &tag.main);
    }
    existing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::draft::{
        EducationRecord, FunctionRecord, PersonalInfo, ProjectRecord, SkillRecord, WorkRecord,
    };

    fn draft() -> CvDraft {
        CvDraft {
            personal: PersonalInfo {
                full_name: "Ada Lovelace".into(),
                function: "Engineer".into(),
                email: "ada@example.org".into(),
                birthday: "1990-06-15".into(),
                ..Default::default()
            },
            professional_profile: vec![FunctionRecord {
                title: "Data".into(),
                description: "Numbers".into(),
            }],
            work_experience: vec![WorkRecord {
                title: "Engineer".into(),
                company: "Engines Ltd".into(),
                start_date: "2015-03-01".into(),
                duty: "Built engines".into(),
                ..Default::default()
            }],
            education: vec![EducationRecord {
                degree: "BSc".into(),
                institution: "University".into(),
                start_date: "2010-09-01".into(),
                end_date: "bogus".into(),
                ..Default::default()
            }],
            skills: vec![
                SkillRecord {
                    title: "Rust".into(),
                    skill_type: "Digital Skill".into(),
                    status: "80%".into(),
                    ..Default::default()
                },
                SkillRecord {
                    title: "Go".into(),
                    skill_type: "Digital Skill".into(),
                    ..Default::default()
                },
            ],
            projects: vec![ProjectRecord {
                title: "Engine".into(),
                project_type: "Web".into(),
                description: "A site".into(),
            }],
        }
    }

    #[test]
    fn test_draft_becomes_document() {
        let doc = draft_to_document(&draft());
        assert_eq!(doc.name, "Ada Lovelace");

        let details = &doc.details[0];
        assert_eq!(details.dob, "15 June, 1990");
        assert_eq!(details.photo, DRAFT_PHOTO);
        assert_eq!(details.role_title, "Engineer");
        assert!(details.person_uri.starts_with("Person_"));

        let work = &doc.work_experience[0];
        assert!(work.main.starts_with("Employment_"));
        assert_eq!(work.start_date, "2015");
        assert_eq!(work.end_date, "Present");
        assert_eq!(work.duty_description, vec!["Built engines"]);

        let edu = &doc.education[0];
        assert_eq!(edu.start_date, "September, 2010");
        assert_eq!(edu.end_date, "Invalid Date Format");

        assert_eq!(doc.skill_type, vec![Tag::new("Digital Skill")]);
        assert_eq!(doc.skills[0].percentage, "80");
        assert_eq!(doc.project_class, vec![Tag::new("Web")]);
        assert_eq!(doc.service[0].service_title, "Data");
    }

    #[test]
    fn test_empty_optional_values_produce_no_tags() {
        let mut d = draft();
        d.projects[0].project_type.clear();
        let doc = draft_to_document(&d);
        assert!(doc.project_class.is_empty());
        assert!(doc.project[0].project_class.is_empty());
    }

    #[test]
    fn test_merge_appends_and_unions() {
        let existing = CvDocument {
            name: "Ada Lovelace".into(),
            details: vec![PersonDetails {
                role_title: "Original".into(),
                ..Default::default()
            }],
            skill_type: vec![Tag::new("Digital Skill"), Tag::new("Language")],
            project: vec![Project::default()],
            ..Default::default()
        };
        let merged = merge_documents(existing, draft_to_document(&draft()));

        assert_eq!(merged.details.len(), 1);
        assert_eq!(merged.details[0].role_title, "Original");
        assert_eq!(merged.project.len(), 2);
        assert_eq!(
            merged.skill_type,
            vec![Tag::new("Digital Skill"), Tag::new("Language")]
        );
        assert_eq!(merged.project_class, vec![Tag::new("Web")]);
    }

    #[test]
    fn test_merge_adopts_details_when_missing() {
        let merged = merge_documents(CvDocument::default(), draft_to_document(&draft()));
        assert_eq!(merged.details[0].email_address, "ada@example.org");
    }
}
