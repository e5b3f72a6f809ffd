use folio_core::CategoryKey;
use folio_core::ProjectRecord;

/// Text content of one project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub year: String,
    pub kind: String,
    pub category: CategoryKey,
    pub name: String,
    pub address: String,
    pub tags: String,
    pub link: String,
}

impl CardView {
    pub fn from_project(project: &ProjectRecord) -> Self {
        Self {
            year: project.year.to_string(),
            kind: project.kind.trim().to_string(),
            category: project.category(),
            name: project.name.clone(),
            address: project.address.clone(),
            tags: project.tags.join(", "),
            link: project.detail_href(),
        }
    }

    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} · {} [{}]", self.year, self.kind, self.category.as_str()),
            self.name.clone(),
        ];
        if !self.address.is_empty() {
            lines.push(self.address.clone());
        }
        if !self.tags.is_empty() {
            lines.push(format!("Scope of work: {}", self.tags));
        }
        lines.push(format!("-> {}", self.link));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(tags: Vec<&str>, address: &str) -> ProjectRecord {
        ProjectRecord {
            id: "42".to_string(),
            name: "Lake House".to_string(),
            kind: " Комфорт ".to_string(),
            year: 2021,
            tags: tags.into_iter().map(str::to_string).collect(),
            image: "lake.jpg".to_string(),
            address: address.to_string(),
        }
    }

    #[test]
    fn full_card_lists_every_field() {
        let card = CardView::from_project(&record(vec!["Facade", "Roof"], "7 Shore Ln"));
        assert_eq!(
            card.plain_lines(),
            vec![
                "2021 · Комфорт [comfort]",
                "Lake House",
                "7 Shore Ln",
                "Scope of work: Facade, Roof",
                "-> projects-42",
            ]
        );
    }

    #[test]
    fn empty_optional_fields_are_skipped() {
        let card = CardView::from_project(&record(Vec::new(), ""));
        assert_eq!(card.plain_lines().len(), 3);
    }
}
