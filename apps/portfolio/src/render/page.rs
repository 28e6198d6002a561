use anyhow::{Context, Result};

use crate::builder::FormBuilder;
use crate::filter::{compute_visibility, FilterState};
use crate::models::cv::CvDocument;
use crate::render::form::render_form;
use crate::render::node::{el, Element, Node};
use crate::render::sections;

/// Everything the page needs besides the document itself.
pub struct PageContext<'a> {
    pub profiles: &'a [String],
    pub current_profile: &'a str,
    pub state: &'a FilterState,
    pub filtered_skill_group: &'a str,
}

/// Serializes the document for the `all-data-container` script block.
/// `<`, `>` and `&` are escaped so the payload cannot close the element.
pub fn embed_json(doc: &CvDocument) -> Result<String> {
    let raw = serde_json::to_string(doc).context("Failed to serialize CV document")?;
    Ok(raw
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn container(tag: &'static str, id: &'static str, children: Vec<Node>) -> Element {
    el(tag).id(id).children(children)
}

pub fn render_page(doc: &CvDocument, ctx: &PageContext<'_>) -> Result<String> {
    let report = compute_visibility(doc, ctx.state, ctx.filtered_skill_group);
    let details = sections::details(doc).unwrap_or_default();
    let (filters, selects) = sections::project_classes(&doc.project_class, ctx.state);

    let sidebar = el("aside")
        .class("sidebar")
        .flag("data-sidebar")
        .child(
            el("div")
                .class("sidebar-info")
                .child(container("div", "image-data", details.image))
                .child(container("div", "nameRole-data", details.name_role)),
        )
        .child(
            el("div")
                .class("sidebar-info_more")
                .child(container("ul", "detail-data", details.contacts).class("contacts-list"))
                .child(container("ul", "socials-list", sections::socials(doc)).class("social-list"))
                .child(
                    el("form")
                        .attr("method", "get")
                        .attr("action", "/")
                        .child(
                            container(
                                "select",
                                "profile-select",
                                sections::profiles(ctx.profiles, ctx.current_profile),
                            )
                            .attr("name", "profile"),
                        )
                        .child(
                            el("button")
                                .id("change-profile-btn")
                                .attr("type", "submit")
                                .text("Change Profile"),
                        ),
                )
                .child(
                    el("div")
                        .class("category-filter")
                        .child(container(
                            "div",
                            "cat-options-list",
                            sections::categories(&doc.category, ctx.state),
                        ))
                        .child(
                            el("button")
                                .id("apply-filter-btn")
                                .attr("type", "button")
                                .text("Apply Filter"),
                        ),
                ),
        );

    let about = el("article")
        .class("about active")
        .attr("data-page", "about")
        .child(el("h2").class("h2 article-title").text("About me"))
        .child(container("section", "about-data", details.about).class("about-text"))
        .child(container("ul", "services-list", sections::services(doc)).class("service-list"));

    let resume = el("article")
        .class("resume")
        .attr("data-page", "resume")
        .child(el("h2").class("h2 article-title").text("Resume"))
        .child(container("ol", "education-list", sections::education(doc)).class("timeline-list"))
        .child(
            container("ol", "experience-list", sections::experience(doc, &report))
                .class("timeline-list"),
        )
        .child(container("div", "skill-list", sections::skills(doc, &report)).class("skill"))
        .child(
            container("div", "certification-list", sections::certifications(doc, &report))
                .class("certification"),
        );

    let portfolio = el("article")
        .class("portfolio")
        .attr("data-page", "portfolio")
        .child(el("h2").class("h2 article-title").text("Portfolio"))
        .child(container("ul", "project-filter-list", filters).class("filter-list"))
        .child(container("ul", "project-select-list", selects).class("select-list"))
        .child(container("ul", "projects-list", sections::projects(doc, &report)).class("project-list"));

    let builder = el("article")
        .class("create-cv")
        .attr("data-page", "create cv")
        .child(el("h2").class("h2 article-title").text("Create CV"))
        .child(render_form(&FormBuilder::default()));

    let data = el("script")
        .attr("type", "application/json")
        .id("all-data-container")
        .child(Node::Raw(embed_json(doc)?));

    let head = el("head")
        .child(el("meta").attr("charset", "UTF-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(el("title").text(doc.name.as_str()))
        .child(
            el("link")
                .attr("rel", "stylesheet")
                .attr("href", "/static/css/style.css"),
        );

    let body = el("body").child(
        el("main")
            .child(sidebar)
            .child(
                el("div")
                    .class("main-content")
                    .child(about)
                    .child(resume)
                    .child(portfolio)
                    .child(builder),
            )
            .child(data),
    );

    let html: Node = el("html").attr("lang", "en").child(head).child(body).into();
    Ok(format!("<!DOCTYPE html>{}", html.to_html()))
}
