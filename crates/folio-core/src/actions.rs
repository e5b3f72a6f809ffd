use super::error::FetchError;

#[derive(Debug, Clone)]
pub enum GalleryAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Tab button pressed (`sync_history = true`) or a tab restored from
    /// the address bar (`sync_history = false`).
    SelectTab { path: String, sync_history: bool },
    LoadMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAction {
    /// The store holds the fetched projects.
    FetchCompleted { count: usize },
    FetchFailed(FetchError),
    SetLoadMoreControl(bool),
}

impl GalleryAction {
    pub fn select_tab(path: impl Into<String>, sync_history: bool) -> Self {
        Self::User(UserAction::SelectTab {
            path: path.into(),
            sync_history,
        })
    }

    pub fn load_more() -> Self {
        Self::User(UserAction::LoadMore)
    }
}
