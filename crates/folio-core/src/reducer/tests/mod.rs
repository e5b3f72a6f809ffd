use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::GalleryEffect;
pub(super) use crate::actions::GalleryAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::category::ActiveFilter;
pub(super) use crate::category::CategoryKey;
pub(super) use crate::config::GalleryConfig;
pub(super) use crate::error::FetchError;
pub(super) use crate::error::GalleryWarning;
pub(super) use crate::state::FilterState;
pub(super) use crate::state::GalleryState;
pub(super) use crate::state::LoadPhase;
pub(super) use crate::store::fixtures::project;
pub(super) use crate::store::fixtures::seven_projects;
pub(super) use crate::store::ProjectRecord;
pub(super) use crate::store::ProjectStore;


fn state() -> GalleryState {
    GalleryState::new(&GalleryConfig::default()).expect("default config is valid")
}

/// A state whose fetch already completed with `projects`.
fn loaded_state(projects: Vec<ProjectRecord>) -> GalleryState {
    let mut state = state();
    let count = projects.len();
    state.store = ProjectStore::with_projects(projects);
    let effects = reduce(
        &mut state,
        GalleryAction::Runtime(RuntimeAction::FetchCompleted { count }),
    );
    assert_eq!(effects.len(), 2);
    state
}

fn select(state: &mut GalleryState, path: &str) -> Vec<GalleryEffect> {
    reduce(state, GalleryAction::select_tab(path, false))
}

fn load_more(state: &mut GalleryState) -> Vec<GalleryEffect> {
    reduce(state, GalleryAction::load_more())
}

fn rendered(effects: &[GalleryEffect]) -> (Vec<String>, bool) {
    effects
        .iter()
        .find_map(|effect| match effect {
            GalleryEffect::Render { items, append } => Some((
                items.iter().map(|item| item.id.clone()).collect(),
                *append,
            )),
            _ => None,
        })
        .expect("a render effect")
}

fn load_more_visibility(effects: &[GalleryEffect]) -> Option<bool> {
    effects.iter().find_map(|effect| match effect {
        GalleryEffect::SetLoadMoreVisible(visible) => Some(*visible),
        _ => None,
    })
}

fn warnings(effects: &[GalleryEffect]) -> Vec<&GalleryWarning> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            GalleryEffect::Warn(warning) => Some(warning),
            _ => None,
        })
        .collect()
}
