use super::actions::GalleryAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::category::ActiveFilter;
use super::error::GalleryWarning;
use super::state::GalleryState;
use super::state::LoadPhase;
use super::store::ProjectRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEffect {
    /// Draw `items`; `append` keeps what is already on screen.
    Render {
        items: Vec<ProjectRecord>,
        append: bool,
    },
    SetLoadMoreVisible(bool),
    PushHistory(String),
    ShowFetchError(String),
    Warn(GalleryWarning),
}

pub fn reduce(state: &mut GalleryState, action: GalleryAction) -> Vec<GalleryEffect> {
    match action {
        GalleryAction::User(user) => reduce_user(state, user),
        GalleryAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut GalleryState, action: UserAction) -> Vec<GalleryEffect> {
    match action {
        UserAction::SelectTab { path, sync_history } => activate(state, path, sync_history),
        UserAction::LoadMore => {
            if !state.is_ready() || !state.load_more_enabled || !state.has_more() {
                return Vec::new();
            }
            state.filter.advance();
            let filtered = state.filtered();
            let items = owned(state.paginator.slice_for_append(&filtered, state.filter.step));
            let has_more = state.paginator.has_more(filtered.len(), state.filter.step);
            state.load_more_visible = has_more;
            vec![
                GalleryEffect::Render {
                    items,
                    append: true,
                },
                GalleryEffect::SetLoadMoreVisible(has_more),
            ]
        }
    }
}

fn reduce_runtime(state: &mut GalleryState, action: RuntimeAction) -> Vec<GalleryEffect> {
    match action {
        RuntimeAction::FetchCompleted { .. } => {
            state.phase = LoadPhase::Loaded;
            state.last_error = None;
            show_all(state)
        }
        RuntimeAction::FetchFailed(err) => {
            state.phase = LoadPhase::Failed;
            state.last_error = Some(err);
            let mut effects = vec![GalleryEffect::ShowFetchError(state.error_message.clone())];
            effects.extend(show_all(state));
            effects
        }
        RuntimeAction::SetLoadMoreControl(enabled) => {
            state.load_more_enabled = enabled;
            if enabled {
                return Vec::new();
            }
            state.load_more_visible = false;
            vec![GalleryEffect::Warn(GalleryWarning::LoadMoreDisabled)]
        }
    }
}

/// First draw after the fetch settles: everything, first batch, no tab highlighted.
fn show_all(state: &mut GalleryState) -> Vec<GalleryEffect> {
    state.filter.select(ActiveFilter::All);
    render_reset(state)
}

fn activate(state: &mut GalleryState, path: String, sync_history: bool) -> Vec<GalleryEffect> {
    if !state.is_ready() {
        return vec![GalleryEffect::Warn(GalleryWarning::NotReady { path })];
    }
    let Some(filter) = state.tabs.find(&path).map(|tab| tab.filter) else {
        return vec![GalleryEffect::Warn(GalleryWarning::UnknownTab { path })];
    };

    state.filter.select(filter);
    let mut effects = render_reset(state);
    if sync_history {
        effects.push(GalleryEffect::PushHistory(path.clone()));
    }
    state.active_tab = Some(path);
    effects
}

fn render_reset(state: &mut GalleryState) -> Vec<GalleryEffect> {
    let filtered = state.filtered();
    let items = owned(state.paginator.slice_for_reset(&filtered, state.filter.step));
    let has_more = state.paginator.has_more(filtered.len(), state.filter.step);
    state.load_more_visible = has_more && state.load_more_enabled;
    vec![
        GalleryEffect::Render {
            items,
            append: false,
        },
        GalleryEffect::SetLoadMoreVisible(state.load_more_visible),
    ]
}

fn owned(slice: &[&ProjectRecord]) -> Vec<ProjectRecord> {
    slice.iter().map(|record| (*record).clone()).collect()
}

#[cfg(test)]
mod tests;
