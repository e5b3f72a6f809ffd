use folio_core::config::SourceConfig;
use folio_core::FetchError;
use folio_core::ProjectSource;

use crate::file::FileProjectSource;
use crate::http::HttpProjectSource;

/// Picks the configured source: a local file when set, the URL otherwise.
pub fn source_for(config: &SourceConfig) -> Result<Box<dyn ProjectSource>, FetchError> {
    match config.file.as_deref() {
        Some(path) => Ok(Box::new(FileProjectSource::new(path))),
        None => Ok(Box::new(HttpProjectSource::new(config.url.clone())?)),
    }
}
