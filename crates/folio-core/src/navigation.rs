use std::collections::HashMap;

use tracing::debug;
use tracing::warn;

use super::category::ALL_TAB;

pub const DEFAULT_QUERY_PARAM: &str = "tab";
pub const DEFAULT_SESSION_KEY: &str = "tab";

/// Address-bar state the gallery reads and writes.
pub trait BrowserNavigation {
    /// Fragment without the leading `#`, if any.
    fn fragment(&self) -> Option<String>;
    fn query_param(&self, name: &str) -> Option<String>;
    /// Records `#tab_id` as a new history entry without reloading.
    fn push_tab(&mut self, tab_id: &str);
}

/// Session-scoped key/value store living outside the gallery.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()>;
    fn remove(&mut self, key: &str) -> std::io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabLookup {
    Fragment,
    QueryParam(String),
    Session(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOrigin {
    Fragment,
    QueryParam,
    Session,
    Default,
}

impl TabOrigin {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::QueryParam => "query",
            Self::Session => "session",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTab {
    pub tab_id: String,
    pub origin: TabOrigin,
}

impl TabLookup {
    fn origin(&self) -> TabOrigin {
        match self {
            Self::Fragment => TabOrigin::Fragment,
            Self::QueryParam(_) => TabOrigin::QueryParam,
            Self::Session(_) => TabOrigin::Session,
        }
    }

    fn lookup(
        &self,
        navigation: &dyn BrowserNavigation,
        session: &dyn SessionStore,
    ) -> Option<String> {
        let value = match self {
            Self::Fragment => navigation.fragment(),
            Self::QueryParam(name) => navigation.query_param(name),
            Self::Session(key) => session.get(key),
        };
        value.filter(|value| !value.is_empty())
    }
}

/// Ordered tab sources; the first one holding a non-empty value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupChain {
    steps: Vec<TabLookup>,
    default_tab: String,
}

impl Default for LookupChain {
    fn default() -> Self {
        Self::standard(DEFAULT_QUERY_PARAM, DEFAULT_SESSION_KEY, ALL_TAB)
    }
}

impl LookupChain {
    pub fn new(steps: Vec<TabLookup>, default_tab: impl Into<String>) -> Self {
        Self {
            steps,
            default_tab: default_tab.into(),
        }
    }

    /// Fragment, then query parameter, then session entry.
    pub fn standard(query_param: &str, session_key: &str, default_tab: &str) -> Self {
        Self::new(
            vec![
                TabLookup::Fragment,
                TabLookup::QueryParam(query_param.to_string()),
                TabLookup::Session(session_key.to_string()),
            ],
            default_tab,
        )
    }

    /// Same chain minus session sources, for back/forward navigation.
    pub fn without_session(&self) -> Self {
        Self {
            steps: self
                .steps
                .iter()
                .filter(|step| !matches!(step, TabLookup::Session(_)))
                .cloned()
                .collect(),
            default_tab: self.default_tab.clone(),
        }
    }

    pub fn steps(&self) -> &[TabLookup] {
        &self.steps
    }

    pub fn default_tab(&self) -> &str {
        &self.default_tab
    }

    /// Resolves the tab to show. A value taken from the session store is
    /// erased right after it is read; sources after the winner are not read.
    pub fn resolve(
        &self,
        navigation: &dyn BrowserNavigation,
        session: &mut dyn SessionStore,
    ) -> ResolvedTab {
        for step in &self.steps {
            let Some(tab_id) = step.lookup(navigation, session) else {
                continue;
            };
            if let TabLookup::Session(key) = step {
                if let Err(err) = session.remove(key) {
                    warn!(key = %key, error = %err, "could not clear stored tab");
                }
            }
            debug!(tab = %tab_id, origin = step.origin().label(), "resolved tab");
            return ResolvedTab {
                tab_id,
                origin: step.origin(),
            };
        }
        ResolvedTab {
            tab_id: self.default_tab.clone(),
            origin: TabOrigin::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Location {
    query: String,
    fragment: String,
}

impl Location {
    /// Accepts a full URL or any tail of one (`?tab=x#y`, `#y`).
    fn parse(input: &str) -> Self {
        let (before_fragment, fragment) = match input.split_once('#') {
            Some((head, fragment)) => (head, fragment.to_string()),
            None => (input, String::new()),
        };
        let query = before_fragment
            .split_once('?')
            .map(|(_, query)| query.to_string())
            .unwrap_or_default();
        Self { query, fragment }
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.replace('+', " "))
    }

    fn render(&self) -> String {
        let mut out = String::new();
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

/// History stack with a cursor, standing in for the browser address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNavigation {
    entries: Vec<Location>,
    cursor: usize,
}

impl Default for MemoryNavigation {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryNavigation {
    pub fn new(location: &str) -> Self {
        Self {
            entries: vec![Location::parse(location)],
            cursor: 0,
        }
    }

    fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    pub fn location(&self) -> String {
        self.current().render()
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Returns `true` when the cursor moved; the host then replays navigation.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl BrowserNavigation for MemoryNavigation {
    fn fragment(&self) -> Option<String> {
        let fragment = &self.current().fragment;
        (!fragment.is_empty()).then(|| fragment.clone())
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.current().query_param(name)
    }

    fn push_tab(&mut self, tab_id: &str) {
        let next = Location {
            query: self.current().query.clone(),
            fragment: tab_id.to_string(),
        };
        self.entries.truncate(self.cursor + 1);
        self.entries.push(next);
        self.cursor = self.entries.len() - 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
