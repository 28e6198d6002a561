//! Section renderers. Each returns the children of one page container.
//!
//! Items that take part in filtering carry their metadata as attributes
//! (`data-category`, `data-clas`, `data-skill-group`) and get the `active`
//! class when the current filter state shows them.

use tracing::warn;

use crate::filter::engine::FilterState;
use crate::filter::items::{category_attr, project_type_attr};
use crate::filter::VisibilityReport;
use crate::models::cv::{CvDocument, PersonDetails, Tag};
use crate::render::node::{el, Element, Node};

pub const NO_EDUCATION: &str = "No education data available.";
pub const NO_SERVICE: &str = "No service data available.";
pub const NO_EXPERIENCE: &str = "No experience data available.";
pub const NO_SKILL: &str = "No skill data available.";
pub const NO_TRAINING: &str = "No training data available.";
pub const NO_PROJECT: &str = "No project data available.";

pub const DEFAULT_AVATAR: &str = "assets/avatar-5.png";
pub const NO_ABOUT_ME: &str = "Please, consider writing an AboutMe post.";

fn placeholder(message: &str) -> Vec<Node> {
    vec![el("p").text(message).into()]
}

fn visible(flags: &[bool], index: usize) -> bool {
    flags.get(index).copied().unwrap_or(true)
}

fn item_class(base: &str, active: bool) -> String {
    if active {
        format!("{base} active")
    } else {
        base.to_string()
    }
}

fn static_path(path: &str) -> String {
    format!("/static/{path}")
}

/// `div.category` holding one tag per non-empty category, or `None`.
fn category_block(categories: &[String]) -> Option<Element> {
    let tags: Vec<Node> = categories
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| el("div").class(format!("category-tag {c}")).text(c.as_str()).into())
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(el("div").class("category").children(tags))
    }
}

fn with_categories(element: Element, categories: &[String]) -> Element {
    match category_block(categories) {
        Some(block) => element.child(block),
        None => element,
    }
}

/// `<option>` per stored profile; the current one is preselected.
pub fn profiles(names: &[String], current: &str) -> Vec<Node> {
    names
        .iter()
        .map(|name| {
            el("option")
                .attr("value", name.as_str())
                .flag_if("selected", name == current)
                .text(name.as_str())
                .into()
        })
        .collect()
}

/// Category checkboxes with a leading "All". Empty when there are no tags.
pub fn categories(tags: &[Tag], state: &FilterState) -> Vec<Node> {
    let tags: Vec<&Tag> = tags.iter().filter(|t| !t.main.trim().is_empty()).collect();
    if tags.is_empty() {
        return Vec::new();
    }

    let checkbox = |value: String, label: &str, checked: bool| -> Node {
        el("label")
            .class("category-item")
            .child(
                el("input")
                    .attr("name", "cat-elem")
                    .attr("type", "checkbox")
                    .attr("data-value", value)
                    .flag_if("checked", checked),
            )
            .child(el("span").text(label))
            .into()
    };

    let mut nodes = vec![checkbox(
        "all".to_string(),
        "All",
        state.shows_all_categories(),
    )];
    for tag in tags {
        let value = tag.main.to_lowercase();
        let checked = !state.shows_all_categories() && state.selected_categories.contains(&value);
        nodes.push(checkbox(value, &tag.main, checked));
    }
    nodes
}

/// The four personal-detail containers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsSection {
    pub name_role: Vec<Node>,
    pub image: Vec<Node>,
    pub about: Vec<Node>,
    pub contacts: Vec<Node>,
}

/// Renders the personal details, or `None` when the profile has no
/// details record.
pub fn details(doc: &CvDocument) -> Option<DetailsSection> {
    let Some(person) = doc.primary_details() else {
        warn!("Profile '{}' has no details record, skipping details", doc.name);
        return None;
    };

    let name_role = vec![
        el("h1")
            .class("name")
            .attr("title", doc.name.as_str())
            .text(doc.name.as_str())
            .into(),
        el("p").class("title").text(person.role_title.as_str()).into(),
    ];

    let photo = if person.photo.trim().is_empty() {
        DEFAULT_AVATAR
    } else {
        person.photo.as_str()
    };
    let image = vec![el("figure")
        .class("avatar-box")
        .child(
            el("img")
                .attr("src", static_path(photo))
                .attr("alt", doc.name.as_str())
                .attr("width", "80"),
        )
        .into()];

    let about_text = if person.about_me.trim().is_empty() {
        NO_ABOUT_ME
    } else {
        person.about_me.as_str()
    };
    let about = vec![el("p").text(about_text).into()];

    Some(DetailsSection {
        name_role,
        image,
        about,
        contacts: contacts(person),
    })
}

fn contacts(person: &PersonDetails) -> Vec<Node> {
    let item = |icon: &str, title: &str, info: Node| -> Node {
        el("li")
            .class("contact-item")
            .child(
                el("div")
                    .class("icon-box")
                    .child(el("ion-icon").attr("name", icon)),
            )
            .child(
                el("div")
                    .class("contact-info")
                    .child(el("p").class("contact-title").text(title))
                    .child(info),
            )
            .into()
    };

    let mut nodes = Vec::new();
    if !person.email_address.is_empty() {
        let link = el("a")
            .attr("href", format!("mailto:{}", person.email_address))
            .class("contact-link")
            .text(person.email_address.as_str());
        nodes.push(item("mail-outline", "Email", link.into()));
    }
    if !person.phone_number.is_empty() {
        let link = el("a")
            .attr("href", format!("tel:{}", person.phone_number))
            .class("contact-link")
            .text(person.phone_number.as_str());
        nodes.push(item("phone-portrait-outline", "Phone", link.into()));
    }
    if !person.dob.is_empty() {
        let time = el("time")
            .attr("datetime", person.dob.as_str())
            .text(person.dob.as_str());
        nodes.push(item("calendar-outline", "Birthday", time.into()));
    }
    if !person.address.is_empty() {
        let address = el("address").text(person.address.as_str());
        nodes.push(item("location-outline", "Location", address.into()));
    }
    nodes
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Stored links are emitted only when relative or on an allowed scheme;
/// anything else becomes `#`. Whitespace and control characters are ignored
/// when reading the scheme, as browsers do.
fn safe_href(url: &str) -> &str {
    let url = url.trim();
    let compact: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    match compact.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(end) if compact[end..].starts_with(':') => {
            let scheme = compact[..end].to_ascii_lowercase();
            if LINK_SCHEMES.contains(&scheme.as_str()) {
                url
            } else {
                "#"
            }
        }
        _ => url,
    }
}

pub fn socials(doc: &CvDocument) -> Vec<Node> {
    doc.social
        .iter()
        .map(|social| {
            let icon = social
                .social_type
                .first()
                .map(|t| t.to_lowercase())
                .unwrap_or_else(|| "link".to_string());
            el("li")
                .class("social-item")
                .child(
                    el("a")
                        .attr("href", safe_href(&social.social_link))
                        .class("social-link")
                        .child(
                            el("ion-icon")
                                .class("socials-icons")
                                .attr("name", format!("logo-{icon}")),
                        ),
                )
                .into()
        })
        .collect()
}

pub fn services(doc: &CvDocument) -> Vec<Node> {
    if doc.service.is_empty() {
        return placeholder(NO_SERVICE);
    }
    doc.service
        .iter()
        .map(|service| {
            el("li")
                .class("service-item")
                .child(
                    el("div").class("service-icon-box").child(
                        el("img")
                            .attr("src", static_path(&service.service_image))
                            .attr("alt", service.service_title.as_str())
                            .attr("width", "40"),
                    ),
                )
                .child(
                    el("div")
                        .class("service-content-box")
                        .child(
                            el("h4")
                                .class("h4 service-item-title")
                                .text(service.service_title.as_str()),
                        )
                        .child(
                            el("p")
                                .class("service-item-text")
                                .text(service.service_text.as_str()),
                        ),
                )
                .into()
        })
        .collect()
}

fn degree_detail(icon: &str, value: String) -> Element {
    el("div")
        .class("degree-detail")
        .child(
            el("ion-icon")
                .class("socials-icons")
                .attr("name", icon),
        )
        .child(el("p").class("timeline-text").text(value))
}

pub fn education(doc: &CvDocument) -> Vec<Node> {
    if doc.education.is_empty() {
        return placeholder(NO_EDUCATION);
    }
    doc.education
        .iter()
        .map(|edu| {
            el("li")
                .class("timeline-item")
                .child(
                    el("div")
                        .class("degree-header")
                        .child(
                            el("h4")
                                .class("h4 timeline-item-title")
                                .text(edu.school_name.as_str()),
                        )
                        .child(el("span").text(format!("{} — {}", edu.start_date, edu.end_date))),
                )
                .child(el("p").class("timeline-text").text(edu.degree_title.as_str()))
                .child(degree_detail(
                    "location-outline",
                    format!("{}, {}", edu.city, edu.country),
                ))
                .child(degree_detail(
                    "school-outline",
                    format!("{} ({})", edu.grade, edu.grade_val),
                ))
                .into()
        })
        .collect()
}

pub fn experience(doc: &CvDocument, report: &VisibilityReport) -> Vec<Node> {
    if doc.work_experience.is_empty() {
        return placeholder(NO_EXPERIENCE);
    }
    doc.work_experience
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let header = el("div")
                .class("degree-header")
                .child(
                    el("h4")
                        .class("h4 timeline-item-title")
                        .text(job.work_title.as_str()),
                )
                .child(el("span").text(format!("{} — {}", job.start_date, job.end_date)));

            let item = el("li")
                .class(item_class("exp-timeline-item", visible(&report.experience, i)))
                .attr("data-category", category_attr(&job.category))
                .child(header)
                .child(el("p").class("timeline-text").text(format!(
                    "{} - {}, {}",
                    job.industry_name, job.city, job.country
                )));

            let duties = job
                .duty_description
                .iter()
                .map(|duty| el("li").child(el("p").class("timeline-text").text(duty.as_str())));

            with_categories(item, &job.category)
                .child(el("ul").class("work-text").children(duties))
                .into()
        })
        .collect()
}

/// Skills grouped under their skill-type headings.
pub fn skills(doc: &CvDocument, report: &VisibilityReport) -> Vec<Node> {
    if doc.skill_type.is_empty() {
        return placeholder(NO_SKILL);
    }

    let mut nodes = Vec::new();
    for group in &doc.skill_type {
        nodes.push(el("h4").class("h4 skills-title").text(group.main.as_str()).into());

        let items = doc
            .skills
            .iter()
            .enumerate()
            .filter(|(_, skill)| skill.group() == Some(group.main.as_str()))
            .map(|(i, skill)| {
                let item = el("li")
                    .class(item_class("skills-item", visible(&report.skills, i)))
                    .attr("data-category", category_attr(&skill.category))
                    .attr("data-skill-group", skill.typename.join(","))
                    .child(
                        el("div")
                            .class("title-wrapper")
                            .child(el("h5").class("h5").text(skill.skill_title.as_str()))
                            .child(
                                el("data")
                                    .attr("value", skill.percentage.as_str())
                                    .text(skill.percentage_score.as_str()),
                            ),
                    )
                    .child(
                        el("p")
                            .class("skill-text")
                            .text(skill.skill_description.as_str()),
                    );

                with_categories(item, &skill.category).child(
                    el("div").class("skill-progress-bg").child(
                        el("div")
                            .class("skill-progress-fill")
                            .attr("style", format!("width: {}", skill.percentage_score)),
                    ),
                )
            });

        nodes.push(el("ul").class("skills-list content-card").children(items).into());
    }
    nodes
}

pub fn certifications(doc: &CvDocument, report: &VisibilityReport) -> Vec<Node> {
    if doc.certificate.is_empty() {
        return placeholder(NO_TRAINING);
    }
    doc.certificate
        .iter()
        .enumerate()
        .map(|(i, cert)| {
            let categories = category_attr(&cert.category);
            let item = el("div")
                .class(item_class("certification-item", visible(&report.certifications, i)))
                .attr("data-category", categories.as_str())
                .id(format!("cert-{categories}"))
                .child(
                    el("h4")
                        .class("h4 timeline-item-title")
                        .text(cert.cert_title.as_str()),
                )
                .child(el("span").class("timeline-text").text(cert.end_date.as_str()))
                .child(
                    el("div").class("link").child(
                        el("a")
                            .attr("href", safe_href(&cert.link))
                            .attr("target", "_blank")
                            .text("View Certification Link"),
                    ),
                );
            with_categories(item, &cert.category).into()
        })
        .collect()
}

/// Project-class filter buttons and select items, each led by "All".
/// The active project type is marked on the filter buttons.
pub fn project_classes(classes: &[Tag], state: &FilterState) -> (Vec<Node>, Vec<Node>) {
    let button = |label: &str, active: bool| -> Node {
        let b = el("button").flag("data-filter-btn").text(label);
        let b = if active { b.class("active") } else { b };
        el("li").class("filter-item").child(b).into()
    };
    let select = |label: &str| -> Node {
        el("li")
            .class("select-item")
            .child(el("button").flag("data-select-item").text(label))
            .into()
    };

    let mut filters = vec![button("All", state.shows_all_project_types())];
    let mut selects = vec![select("All")];
    for class in classes.iter().filter(|c| !c.main.trim().is_empty()) {
        let active = class.main.to_lowercase() == state.active_project_type;
        filters.push(button(&class.main, active));
        selects.push(select(&class.main));
    }
    (filters, selects)
}

pub fn projects(doc: &CvDocument, report: &VisibilityReport) -> Vec<Node> {
    if doc.project.is_empty() {
        return placeholder(NO_PROJECT);
    }
    doc.project
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let link = el("a")
                .attr("href", safe_href(&project.project_link))
                .child(
                    el("h3")
                        .class("project-title")
                        .text(project.project_title.as_str()),
                )
                .child(
                    el("p")
                        .class("project-category")
                        .text(project.project_class.join(",")),
                )
                .child(
                    el("p")
                        .class("port-text")
                        .text(project.project_description.as_str()),
                );

            el("li")
                .class(item_class("project-item", visible(&report.projects, i)))
                .flag("data-filter-item")
                .attr("data-clas", project_type_attr(&project.project_class))
                .attr("data-category", category_attr(&project.category))
                .child(with_categories(link, &project.category))
                .into()
        })
        .collect()
}
