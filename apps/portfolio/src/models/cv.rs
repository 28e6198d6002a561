use serde::{Deserialize, Serialize};

use crate::models::de;

/// Namespace prefix of stored resource identifiers. Values carrying it are
/// reduced to their last path segment when a document is loaded.
pub const RESOURCE_NAMESPACE: &str = "URN://cv.resume/";

/// The full CV document served to the page and returned by `POST /`.
///
/// Keys follow the wire shape `{NameList, Category, Name, Details, ...}`.
/// Every collection tolerates a missing or `null` value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CvDocument {
    #[serde(default, deserialize_with = "de::nullable", skip_serializing_if = "Vec::is_empty")]
    pub name_list: Vec<String>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub category: Vec<Tag>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::nullable")]
    pub details: Vec<PersonDetails>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub social: Vec<Social>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub service: Vec<Service>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub skill_type: Vec<Tag>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub certificate: Vec<Certificate>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub project_class: Vec<Tag>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub project: Vec<Project>,
}

/// A named grouping value: a category, skill type or project class.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
}

impl Tag {
    pub fn new(main: impl Into<String>) -> Self {
        Self { main: main.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    #[serde(rename = "personURI", default, deserialize_with = "de::text")]
    pub person_uri: String,
    #[serde(default, deserialize_with = "de::text")]
    pub dob: String,
    #[serde(default, deserialize_with = "de::text")]
    pub address: String,
    #[serde(default, deserialize_with = "de::text")]
    pub email_address: String,
    #[serde(default, deserialize_with = "de::text")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "de::text")]
    pub role_title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub about_me: String,
    #[serde(default, deserialize_with = "de::text")]
    pub photo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::list")]
    pub social_type: Vec<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub social_link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::text")]
    pub service_title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub service_text: String,
    #[serde(default, deserialize_with = "de::text")]
    pub service_image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::text")]
    pub school_name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub degree_title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub city: String,
    #[serde(default, deserialize_with = "de::text")]
    pub country: String,
    #[serde(default, deserialize_with = "de::text")]
    pub grade: String,
    #[serde(default, deserialize_with = "de::text")]
    pub grade_val: String,
    #[serde(default, deserialize_with = "de::text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "de::text")]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::text")]
    pub work_title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub industry_name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub city: String,
    #[serde(default, deserialize_with = "de::text")]
    pub country: String,
    #[serde(default, deserialize_with = "de::text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "de::text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "de::list")]
    pub duty_description: Vec<String>,
    #[serde(default, deserialize_with = "de::list")]
    pub category: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::text")]
    pub skill_title: String,
    #[serde(default, deserialize_with = "de::list")]
    pub category: Vec<String>,
    #[serde(default, deserialize_with = "de::list")]
    pub typename: Vec<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub percentage_score: String,
    #[serde(default, deserialize_with = "de::text")]
    pub percentage: String,
    #[serde(default, deserialize_with = "de::text")]
    pub skill_description: String,
}

impl Skill {
    /// The skill group this skill is listed under (its first type name).
    pub fn group(&self) -> Option<&str> {
        self.typename.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::text")]
    pub cert_title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "de::text")]
    pub link: String,
    #[serde(default, deserialize_with = "de::list")]
    pub category: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "de::text")]
    pub main: String,
    #[serde(default, deserialize_with = "de::text")]
    pub project_title: String,
    #[serde(default, deserialize_with = "de::list")]
    pub project_class: Vec<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub project_description: String,
    #[serde(default, deserialize_with = "de::text")]
    pub project_link: String,
    #[serde(default, deserialize_with = "de::list")]
    pub category: Vec<String>,
}

impl CvDocument {
    /// The primary details record, if the profile has one.
    pub fn primary_details(&self) -> Option<&PersonDetails> {
        self.details.first()
    }

    /// Strips resource namespaces from category, place and social-type values.
    pub fn normalized(mut self) -> Self {
        for tag in &mut self.category {
            tag.main = strip_resource_namespace(&tag.main);
        }
        for social in &mut self.social {
            strip_all(&mut social.social_type);
        }
        for edu in &mut self.education {
            edu.city = strip_resource_namespace(&edu.city);
            edu.country = strip_resource_namespace(&edu.country);
        }
        for work in &mut self.work_experience {
            work.city = strip_resource_namespace(&work.city);
            work.country = strip_resource_namespace(&work.country);
            strip_all(&mut work.category);
        }
        for skill in &mut self.skills {
            strip_all(&mut skill.category);
        }
        for cert in &mut self.certificate {
            strip_all(&mut cert.category);
        }
        for project in &mut self.project {
            strip_all(&mut project.category);
        }
        self
    }
}

fn strip_all(values: &mut [String]) {
    for value in values.iter_mut() {
        *value = strip_resource_namespace(value);
    }
}

/// `URN://cv.resume/software` → `software`. Anything else is returned as is.
pub fn strip_resource_namespace(value: &str) -> String {
    if value.contains(RESOURCE_NAMESPACE) {
        value.rsplit('/').next().unwrap_or(value).to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
impl CvDocument {
    /// Parses an embedded document. Malformed input degrades to the empty
    /// document so the page still renders its "no data" placeholders.
    pub fn parse_embedded(raw: &str) -> Self {
        match serde_json::from_str::<CvDocument>(raw) {
            Ok(doc) => doc.normalized(),
            Err(e) => {
                tracing::error!("Failed to parse CV document: {e}");
                tracing::error!("Raw document ({} bytes) discarded", raw.len());
                CvDocument::default()
            }
        }
    }
}
