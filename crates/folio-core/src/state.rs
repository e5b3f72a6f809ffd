use super::category::ActiveFilter;
use super::config::GalleryConfig;
use super::error::FetchError;
use super::error::InitError;
use super::pagination::Paginator;
use super::store::ProjectRecord;
use super::store::ProjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Pending,
    Loaded,
    Failed,
}

impl LoadPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Loading",
            Self::Loaded => "Loaded",
            Self::Failed => "Failed",
        }
    }

    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub id: String,
    pub label: String,
    pub filter: ActiveFilter,
}

/// The fixed set of tabs the page offers, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabRegistry {
    tabs: Vec<TabEntry>,
}

impl TabRegistry {
    pub fn from_config(config: &GalleryConfig) -> Result<Self, InitError> {
        config.validate()?;
        let tabs = config
            .tabs
            .iter()
            .filter_map(|tab| {
                ActiveFilter::from_tab(&tab.id).map(|filter| TabEntry {
                    id: tab.id.clone(),
                    label: tab.label.clone(),
                    filter,
                })
            })
            .collect();
        Ok(Self { tabs })
    }

    pub fn find(&self, tab_id: &str) -> Option<&TabEntry> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == tab_id)
    }

    pub fn get(&self, index: usize) -> Option<&TabEntry> {
        self.tabs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabEntry> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub active_filter: ActiveFilter,
    pub step: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_filter: ActiveFilter::All,
            step: 1,
        }
    }
}

impl FilterState {
    /// Switching filters, even to the current one, starts over at the first batch.
    pub fn select(&mut self, filter: ActiveFilter) {
        self.active_filter = filter;
        self.step = 1;
    }

    pub fn advance(&mut self) {
        self.step = self.step.saturating_add(1);
    }
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    pub store: ProjectStore,
    pub paginator: Paginator,
    pub tabs: TabRegistry,
    pub filter: FilterState,
    /// `None` until a tab has been activated.
    pub active_tab: Option<String>,
    pub phase: LoadPhase,
    pub last_error: Option<FetchError>,
    pub error_message: String,
    pub load_more_enabled: bool,
    pub load_more_visible: bool,
}

impl GalleryState {
    pub fn new(config: &GalleryConfig) -> Result<Self, InitError> {
        Ok(Self {
            store: ProjectStore::new(),
            paginator: Paginator::new(config.batch_size),
            tabs: TabRegistry::from_config(config)?,
            filter: FilterState::default(),
            active_tab: None,
            phase: LoadPhase::Pending,
            last_error: None,
            error_message: config.error_message.clone(),
            load_more_enabled: true,
            load_more_visible: false,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.phase.is_settled()
    }

    pub fn filtered(&self) -> Vec<&ProjectRecord> {
        self.store.filtered_by(self.filter.active_filter)
    }

    /// Everything currently revealed for the active filter.
    pub fn visible(&self) -> Vec<&ProjectRecord> {
        let filtered = self.filtered();
        self.paginator
            .slice_for_reset(&filtered, self.filter.step)
            .to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.paginator
            .has_more(self.filtered().len(), self.filter.step)
    }

    pub fn active_tab_label(&self) -> Option<&str> {
        self.active_tab
            .as_deref()
            .and_then(|id| self.tabs.find(id))
            .map(|tab| tab.label.as_str())
    }
}
