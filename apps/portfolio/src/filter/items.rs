use serde::Serialize;

/// Filter metadata of one rendered list item.
///
/// Built from the same attribute strings the renderer writes into
/// `data-category` / `data-clas`, so the engine only ever sees what the page
/// shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CvItem {
    /// Lowercase category tags, in attribute order. May be empty.
    pub categories: Vec<String>,
    /// Lowercase project class. Only project items carry one.
    pub project_type: Option<String>,
    pub visible: bool,
}

impl CvItem {
    /// Parses the comma-separated category attribute and the optional type
    /// attribute. A missing attribute reads as empty.
    pub fn from_attributes(category_attr: Option<&str>, project_type_attr: Option<&str>) -> Self {
        let categories = category_attr
            .unwrap_or_default()
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        let project_type = project_type_attr
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        Self {
            categories,
            project_type,
            visible: true,
        }
    }
}

/// Value of the `data-category` attribute for a list of tags.
pub fn category_attr(categories: &[String]) -> String {
    categories.join(",")
}

/// Value of the `data-clas` attribute: the first project class, lowercased.
pub fn project_type_attr(classes: &[String]) -> String {
    classes
        .first()
        .map(|c| c.trim().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_parsing_trims_and_lowercases() {
        let item = CvItem::from_attributes(Some(" Software , RESEARCH,"), Some(" Web "));
        assert_eq!(item.categories, vec!["software", "research"]);
        assert_eq!(item.project_type.as_deref(), Some("web"));
        assert!(item.visible);
    }

    #[test]
    fn test_attribute_round_trip_through_renderer_values() {
        let tags = vec!["Database".to_string(), "software".to_string()];
        let classes = vec!["Data".to_string(), "Web".to_string()];
        let attr = category_attr(&tags);
        let item = CvItem::from_attributes(Some(&attr), Some(&project_type_attr(&classes)));
        assert_eq!(item.categories, vec!["database", "software"]);
        assert_eq!(item.project_type.as_deref(), Some("data"));
    }

    #[test]
    fn test_blank_type_is_none() {
        let item = CvItem::from_attributes(Some("a"), Some(""));
        assert!(item.project_type.is_none());
        assert!(project_type_attr(&[]).is_empty());
    }
}
