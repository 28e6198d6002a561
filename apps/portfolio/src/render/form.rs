//! HTML for the "create CV" form, rendered from builder state.

use crate::builder::{EntryBlock, EntryContainer, FieldSpec, FormBuilder, InputKind, PERSONAL_FIELDS};
use crate::render::node::{el, Element};

const DATE_HINT: &str = "DD.MM.YYYY";

fn input(spec: &FieldSpec, id: String, data_type: Option<&str>, value: &str) -> Element {
    let base = match spec.input {
        InputKind::TextArea => el("textarea").attr("rows", "3"),
        InputKind::Text | InputKind::Date => el("input").attr("type", "text"),
        InputKind::Email => el("input").attr("type", "email"),
        InputKind::Tel => el("input").attr("type", "tel"),
    };

    let mut element = base
        .id(id)
        .attr("name", spec.name)
        .flag("createcvinput")
        .class("form-input");
    if let Some(kind) = data_type {
        element = element.attr("data-type", kind);
    }
    element = element.flag_if("required", spec.required);

    let placeholder = match (spec.placeholder, spec.input) {
        (Some(hint), _) => Some(hint),
        (None, InputKind::Date) => Some(DATE_HINT),
        (None, _) => None,
    };
    if let Some(hint) = placeholder {
        element = element.attr("placeholder", hint);
    }

    match spec.input {
        InputKind::TextArea => element.text(value),
        _ => element.attr("value", value),
    }
}

fn form_group(spec: &FieldSpec, id: String, data_type: Option<&str>, value: &str) -> Element {
    el("div")
        .class("form-group")
        .child(
            el("label")
                .attr("for", id.as_str())
                .class("creator-label")
                .text(spec.label),
        )
        .child(input(spec, id, data_type, value))
}

fn render_block(container: &EntryContainer, block: &EntryBlock) -> Element {
    let kind = container.kind();
    let header = el("div")
        .class("degree-header")
        .child(el("h4").class("creator-title").text(block.label.as_str()))
        .child(
            el("button")
                .attr("type", "button")
                .class("remove-entry primary-btn")
                .attr("data-kind", kind.as_str())
                .attr("data-block", block.id.to_string())
                .text("×"),
        );

    let fields = kind.fields().iter().map(|spec| {
        form_group(
            spec,
            format!("{}-{}", spec.id, block.index),
            Some(kind.as_str()),
            block.value(spec.name),
        )
    });

    el("div")
        .class("entry-block")
        .attr("data-index", block.index.to_string())
        .attr("data-block", block.id.to_string())
        .child(header)
        .children(fields)
}

fn render_container(container: &EntryContainer) -> Element {
    let kind = container.kind();
    el("section")
        .class("creator-section")
        .child(el("h3").class("h3 creator-heading").text(kind.title()))
        .child(
            el("div")
                .id(kind.container_id())
                .children(container.blocks().iter().map(|b| render_block(container, b))),
        )
        .child(
            el("button")
                .attr("type", "button")
                .id(format!("add-{}", kind.as_str()))
                .class("add-entry primary-btn")
                .attr("data-kind", kind.as_str())
                .text(format!("Add {}", kind.title())),
        )
}

/// The whole form. The save button is enabled only when the form is ready.
pub fn render_form(form: &FormBuilder) -> Element {
    let personal = PERSONAL_FIELDS.iter().map(|spec| {
        let value = form.personal().get(spec.name).map(String::as_str).unwrap_or_default();
        form_group(spec, spec.id.to_string(), None, value)
    });

    el("form")
        .id("cv-form")
        .flag("novalidate")
        .child(
            el("section")
                .class("creator-section")
                .child(el("h3").class("h3 creator-heading").text("Personal"))
                .children(personal),
        )
        .children(form.containers().map(render_container))
        .child(
            el("button")
                .attr("type", "submit")
                .class("form-btn")
                .flag("saveCVbutton")
                .flag_if("disabled", !form.is_ready())
                .text("Save CV"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BlockRef, EntryKind};
    use crate::render::node::Node;

    fn html(form: &FormBuilder) -> String {
        Node::from(render_form(form)).to_html()
    }

    #[test]
    fn test_empty_form_has_containers_and_disabled_save() {
        let out = html(&FormBuilder::default());
        for kind in EntryKind::ALL {
            assert!(out.contains(&format!(r#"<div id="{}"></div>"#, kind.container_id())));
            assert!(out.contains(&format!(r#"id="add-{}""#, kind.as_str())));
        }
        assert!(out.contains(r#"saveCVbutton="" disabled="""#));
    }

    #[test]
    fn test_blocks_render_index_label_and_suffixed_ids() {
        let mut form = FormBuilder::default();
        form.add_entry(EntryKind::Work);
        form.add_entry(EntryKind::Work);
        form.set_field(EntryKind::Work, BlockRef::Index(1), "workTitle", "Engineer".into())
            .unwrap();

        let out = html(&form);
        assert!(out.contains(r#"data-index="0""#));
        assert!(out.contains(r#"data-index="1""#));
        assert!(out.contains("Work Entry #2</h4>"));
        assert!(out.contains(r#"<label for="work-title-1" class="creator-label">Job Title *</label>"#));
        assert!(out.contains(r#"id="work-title-1" name="workTitle""#));
        assert!(out.contains(r#"value="Engineer""#));
        assert!(out.contains(r#"placeholder="DD.MM.YYYY""#));
    }

    #[test]
    fn test_labels_follow_reindexing() {
        let mut form = FormBuilder::default();
        for _ in 0..3 {
            form.add_entry(EntryKind::Skill);
        }
        form.remove_entry(EntryKind::Skill, BlockRef::Index(0));
        let out = html(&form);
        assert!(out.contains("Skill Entry #1</h4>"));
        assert!(out.contains("Skill Entry #2</h4>"));
        assert!(!out.contains("Skill Entry #3"));
        assert!(out.contains(r#"id="skill-name-1""#));
        assert!(!out.contains(r#"id="skill-name-2""#));
    }

    #[test]
    fn test_save_enabled_when_ready() {
        let mut form = FormBuilder::default();
        form.set_personal("fullName", "Ada".into()).unwrap();
        form.set_personal("function", "Engineer".into()).unwrap();
        form.set_personal("email", "ada@example.org".into()).unwrap();
        let out = html(&form);
        assert!(out.contains(r#"saveCVbutton="">Save CV"#));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut form = FormBuilder::default();
        form.set_personal("aboutMe", "</textarea><script>".into()).unwrap();
        let out = html(&form);
        assert!(out.contains("&lt;/textarea&gt;&lt;script&gt;"));
    }
}
