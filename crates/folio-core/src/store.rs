use std::fmt;

use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use tracing::debug;
use tracing::error;

use super::category::normalize_type;
use super::category::ActiveFilter;
use super::category::CategoryKey;
use super::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub year: u16,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "img", default)]
    pub image: String,
    #[serde(alias = "adress", default)]
    pub address: String,
}

impl ProjectRecord {
    pub fn category(&self) -> CategoryKey {
        normalize_type(Some(self.kind.as_str()))
    }

    /// Relative link to the project detail page.
    pub fn detail_href(&self) -> String {
        format!("projects-{}", self.id)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or integer id")
        }

        fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Parses a project feed body.
pub fn decode_projects(body: &[u8]) -> Result<Vec<ProjectRecord>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

pub trait ProjectSource {
    /// Performs exactly one fetch attempt.
    fn fetch(&self) -> Result<Vec<ProjectRecord>, FetchError>;

    fn describe(&self) -> String;
}

/// In-memory source, used by hosts that already hold the feed and by tests.
#[derive(Debug, Clone)]
pub struct StaticProjectSource {
    outcome: Result<Vec<ProjectRecord>, FetchError>,
}

impl StaticProjectSource {
    pub fn ok(projects: Vec<ProjectRecord>) -> Self {
        Self {
            outcome: Ok(projects),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self { outcome: Err(err) }
    }
}

impl ProjectSource for StaticProjectSource {
    fn fetch(&self) -> Result<Vec<ProjectRecord>, FetchError> {
        self.outcome.clone()
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<ProjectRecord>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<ProjectRecord>) -> Self {
        Self { projects }
    }

    /// Single fetch attempt. On failure the store is left empty.
    pub fn load(&mut self, source: &dyn ProjectSource) -> Result<&[ProjectRecord], FetchError> {
        debug!(source = %source.describe(), "fetching projects");
        match source.fetch() {
            Ok(projects) => {
                debug!(count = projects.len(), "projects loaded");
                self.projects = projects;
                Ok(&self.projects)
            }
            Err(err) => {
                error!(source = %source.describe(), error = %err, "failed to load projects");
                self.projects.clear();
                Err(err)
            }
        }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn filtered_by(&self, filter: ActiveFilter) -> Vec<&ProjectRecord> {
        self.projects
            .iter()
            .filter(|project| filter.matches(project.category()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ProjectRecord;

    pub(crate) fn project(id: &str, kind: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: format!("Project {id}"),
            kind: kind.to_string(),
            year: 2023,
            tags: vec!["Design".to_string(), "Build".to_string()],
            image: format!("img/{id}.jpg"),
            address: format!("{id} Main St."),
        }
    }

    /// Seven projects, three of them business.
    pub(crate) fn seven_projects() -> Vec<ProjectRecord> {
        vec![
            project("1", "Бізнес"),
            project("2", "Комфорт"),
            project("3", " Бізнес "),
            project("4", "Premium"),
            project("5", "Comfort"),
            project("6", "Бізнес"),
            project("7", "Преміум"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::project;
    use super::fixtures::seven_projects;
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(records: &[&ProjectRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.clone()).collect()
    }

    #[test]
    fn all_filter_returns_everything_in_order() {
        let store = ProjectStore::with_projects(seven_projects());
        let all = store.filtered_by(ActiveFilter::All);
        assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn category_filter_is_an_ordered_subsequence() {
        let store = ProjectStore::with_projects(seven_projects());
        for key in [
            CategoryKey::Business,
            CategoryKey::Comfort,
            CategoryKey::Premium,
            CategoryKey::Unknown,
        ] {
            let filtered = store.filtered_by(ActiveFilter::Category(key));
            assert!(filtered.iter().all(|record| record.category() == key));
            let expected: Vec<String> = store
                .projects()
                .iter()
                .filter(|record| record.category() == key)
                .map(|record| record.id.clone())
                .collect();
            assert_eq!(ids(&filtered), expected);
        }
        assert_eq!(
            ids(&store.filtered_by(ActiveFilter::Category(CategoryKey::Business))),
            vec!["1", "3", "6"]
        );
    }

    #[test]
    fn unknown_types_only_surface_under_unknown() {
        let store = ProjectStore::with_projects(vec![project("a", "Economy"), project("b", "")]);
        assert!(store
            .filtered_by(ActiveFilter::Category(CategoryKey::Business))
            .is_empty());
        assert_eq!(
            ids(&store.filtered_by(ActiveFilter::Category(CategoryKey::Unknown))),
            vec!["a", "b"]
        );
    }

    #[test]
    fn failed_load_leaves_store_empty() {
        let mut store = ProjectStore::with_projects(seven_projects());
        let err = store
            .load(&StaticProjectSource::failing(FetchError::Status(500)))
            .unwrap_err();
        assert_eq!(err, FetchError::Status(500));
        assert!(store.is_empty());
        assert!(store.filtered_by(ActiveFilter::All).is_empty());
    }

    #[test]
    fn successful_load_replaces_contents() {
        let mut store = ProjectStore::new();
        let loaded = store
            .load(&StaticProjectSource::ok(seven_projects()))
            .expect("load")
            .len();
        assert_eq!(loaded, 7);
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn feed_spellings_are_accepted() {
        let body = r#"[
            {"id": 12, "name": "River Park", "type": "Комфорт", "year": 2021,
             "tags": ["Facade"], "img": "river.jpg", "adress": "1 River Rd"},
            {"id": "x-9", "name": "Loft", "type": "Premium", "year": 2024}
        ]"#;
        let projects = decode_projects(body.as_bytes()).expect("decode");
        assert_eq!(projects[0].id, "12");
        assert_eq!(projects[0].image, "river.jpg");
        assert_eq!(projects[0].address, "1 River Rd");
        assert_eq!(projects[0].category(), CategoryKey::Comfort);
        assert_eq!(projects[1].id, "x-9");
        assert!(projects[1].tags.is_empty());
        assert_eq!(projects[1].detail_href(), "projects-x-9");
    }

    #[test]
    fn non_array_bodies_fail_to_decode() {
        assert!(matches!(
            decode_projects(br#"{"projects": []}"#),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(decode_projects(b"<html>"), Err(FetchError::Decode(_))));
    }
}
