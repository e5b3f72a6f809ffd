use tracing::debug;
use tracing::info;
use tracing::warn;

use super::actions::GalleryAction;
use super::actions::RuntimeAction;
use super::config::GalleryConfig;
use super::error::GalleryWarning;
use super::error::InitError;
use super::navigation::BrowserNavigation;
use super::navigation::LookupChain;
use super::navigation::ResolvedTab;
use super::navigation::SessionStore;
use super::reducer::reduce;
use super::reducer::GalleryEffect;
use super::state::GalleryState;
use super::store::ProjectRecord;
use super::store::ProjectSource;

/// Presentation side of the gallery. Receives computed slices only.
pub trait GalleryRenderer {
    /// `append == false` replaces the current cards, `true` adds below them.
    fn render(&mut self, items: &[ProjectRecord], append: bool);
    fn set_load_more_visible(&mut self, visible: bool);
    fn show_fetch_error(&mut self, message: &str);
    fn has_load_more_control(&self) -> bool {
        true
    }
}

/// Keeps the cards it was asked to draw. Used by plain-text hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingRenderer {
    pub items: Vec<ProjectRecord>,
    pub load_more_visible: bool,
    pub error: Option<String>,
    pub render_calls: usize,
    pub load_more_control: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            load_more_control: true,
            ..Self::default()
        }
    }

    pub fn without_load_more() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

impl GalleryRenderer for RecordingRenderer {
    fn render(&mut self, items: &[ProjectRecord], append: bool) {
        if !append {
            self.items.clear();
        }
        self.items.extend_from_slice(items);
        self.render_calls += 1;
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = visible;
    }

    fn show_fetch_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn has_load_more_control(&self) -> bool {
        self.load_more_control
    }
}

/// Single owner of the gallery state for a page session.
pub struct GalleryController<R, N, S> {
    state: GalleryState,
    chain: LookupChain,
    renderer: R,
    navigation: N,
    session: S,
}

impl<R, N, S> GalleryController<R, N, S>
where
    R: GalleryRenderer,
    N: BrowserNavigation,
    S: SessionStore,
{
    pub fn new(
        config: &GalleryConfig,
        renderer: R,
        navigation: N,
        session: S,
    ) -> Result<Self, InitError> {
        let state = GalleryState::new(config)?;
        let mut controller = Self {
            state,
            chain: config.lookup_chain(),
            renderer,
            navigation,
            session,
        };
        if !controller.renderer.has_load_more_control() {
            controller.dispatch(GalleryAction::Runtime(RuntimeAction::SetLoadMoreControl(false)));
        }
        Ok(controller)
    }

    /// Fetches once, draws the unfiltered gallery, then activates the tab
    /// resolved from the address bar or session. A failed fetch is shown
    /// to the user and leaves an empty but working gallery.
    pub fn bootstrap(&mut self, source: &dyn ProjectSource) -> ResolvedTab {
        let outcome = self.state.store.load(source).map(<[ProjectRecord]>::len);
        let action = match outcome {
            Ok(count) => {
                info!(count, "gallery loaded");
                RuntimeAction::FetchCompleted { count }
            }
            Err(err) => RuntimeAction::FetchFailed(err),
        };
        self.dispatch(GalleryAction::Runtime(action));

        let resolved = self.resolve_initial_tab();
        self.activate(&resolved.tab_id, false);
        resolved
    }

    pub fn resolve_initial_tab(&mut self) -> ResolvedTab {
        self.chain.resolve(&self.navigation, &mut self.session)
    }

    /// Returns `false` when the tab was not activated.
    pub fn activate(&mut self, tab_id: &str, sync_history: bool) -> bool {
        debug!(tab = tab_id, sync_history, "activate tab");
        self.dispatch(GalleryAction::select_tab(tab_id, sync_history))
            .is_empty()
    }

    /// Returns `true` when another batch was revealed.
    pub fn load_more(&mut self) -> bool {
        let step = self.state.filter.step;
        self.dispatch(GalleryAction::load_more());
        self.state.filter.step > step
    }

    /// Back/forward: the session entry was consumed at startup, so only
    /// the fragment and query are consulted.
    pub fn on_history_navigation(&mut self) -> ResolvedTab {
        let resolved = self
            .chain
            .without_session()
            .resolve(&self.navigation, &mut self.session);
        self.activate(&resolved.tab_id, false);
        resolved
    }

    /// Applies an action and returns the warnings it produced.
    pub fn dispatch(&mut self, action: GalleryAction) -> Vec<GalleryWarning> {
        let effects = reduce(&mut self.state, action);
        self.apply(effects)
    }

    fn apply(&mut self, effects: Vec<GalleryEffect>) -> Vec<GalleryWarning> {
        let mut warnings = Vec::new();
        for effect in effects {
            match effect {
                GalleryEffect::Render { items, append } => self.renderer.render(&items, append),
                GalleryEffect::SetLoadMoreVisible(visible) => {
                    self.renderer.set_load_more_visible(visible)
                }
                GalleryEffect::PushHistory(tab_id) => self.navigation.push_tab(&tab_id),
                GalleryEffect::ShowFetchError(message) => self.renderer.show_fetch_error(&message),
                GalleryEffect::Warn(warning) => {
                    warn!("{warning}");
                    warnings.push(warning);
                }
            }
        }
        warnings
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}
