use serde::Deserialize;
use serde::Serialize;

use super::category::ActiveFilter;
use super::category::ALL_TAB;
use super::error::InitError;
use super::error::DEFAULT_FETCH_ERROR_MESSAGE;
use super::navigation::LookupChain;
use super::navigation::DEFAULT_QUERY_PARAM;
use super::navigation::DEFAULT_SESSION_KEY;
use super::pagination::DEFAULT_BATCH_SIZE;

pub const DEFAULT_SOURCE_URL: &str = "https://test.smarto.agency/smarto_complexes_list.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GalleryConfig {
    pub source: SourceConfig,
    pub batch_size: usize,
    pub query_param: String,
    pub session_key: String,
    pub default_tab: String,
    pub error_message: String,
    pub tabs: Vec<TabConfig>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            default_tab: ALL_TAB.to_string(),
            error_message: DEFAULT_FETCH_ERROR_MESSAGE.to_string(),
            tabs: vec![
                TabConfig::new("all", "All"),
                TabConfig::new("business", "Business"),
                TabConfig::new("comfort", "Comfort"),
                TabConfig::new("premium", "Premium"),
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// Local JSON feed; takes precedence over `url` when set.
    pub file: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TabConfig {
    pub id: String,
    pub label: String,
}

impl TabConfig {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), InitError> {
        if self.tabs.is_empty() {
            return Err(InitError::MissingElement("tabs"));
        }
        if self.batch_size == 0 {
            return Err(InitError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        for tab in &self.tabs {
            if ActiveFilter::from_tab(&tab.id).is_none() {
                return Err(InitError::InvalidConfig(format!(
                    "tab {:?} is neither \"all\" nor a category key",
                    tab.id
                )));
            }
        }
        if ActiveFilter::from_tab(&self.default_tab).is_none() {
            return Err(InitError::InvalidConfig(format!(
                "default tab {:?} is neither \"all\" nor a category key",
                self.default_tab
            )));
        }
        Ok(())
    }

    pub fn lookup_chain(&self) -> LookupChain {
        LookupChain::standard(&self.query_param, &self.session_key, &self.default_tab)
    }
}
