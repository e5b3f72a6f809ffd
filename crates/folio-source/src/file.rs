use std::path::Path;
use std::path::PathBuf;

use folio_core::decode_projects;
use folio_core::FetchError;
use folio_core::ProjectRecord;
use folio_core::ProjectSource;
use tracing::debug;

/// Reads the project feed from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileProjectSource {
    path: PathBuf,
}

impl FileProjectSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProjectSource for FileProjectSource {
    fn fetch(&self) -> Result<Vec<ProjectRecord>, FetchError> {
        debug!(path = %self.path.display(), "reading project feed");
        let bytes = std::fs::read(&self.path)?;
        decode_projects(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_a_feed_file() {
        let dir = TempDir::new().expect("tmpdir");
        let path = dir.path().join("projects.json");
        std::fs::write(
            &path,
            r#"[{"id": "a", "name": "Garden", "type": "Комфорт", "year": 2020}]"#,
        )
        .expect("write");

        let projects = FileProjectSource::new(&path).fetch().expect("fetch");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "a");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("tmpdir");
        let source = FileProjectSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch(), Err(FetchError::Io(_))));
    }
}
