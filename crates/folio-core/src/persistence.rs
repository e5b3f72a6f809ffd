use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use super::navigation::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSessionEntry {
    pub value: String,
    pub stored_at_ms: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub version: u8,
    #[serde(default)]
    pub entries: BTreeMap<String, PersistedSessionEntry>,
}

/// Session store backed by a JSON file, so a value stashed by one process
/// can be consumed by the next. Every call re-reads the file.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> std::io::Result<PersistedSession> {
        if !self.path.exists() {
            return Ok(PersistedSession {
                version: 1,
                entries: BTreeMap::new(),
            });
        }
        let bytes = std::fs::read(&self.path)?;
        serde_json::from_slice::<PersistedSession>(&bytes)
            .map_err(|err| std::io::Error::other(format!("parse session: {err}")))
    }

    fn save(&self, session: &PersistedSession) -> std::io::Result<()> {
        let encoded = serde_json::to_vec_pretty(session)
            .map_err(|err| std::io::Error::other(format!("serialize session: {err}")))?;
        std::fs::write(&self.path, encoded)
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut session) => session.entries.remove(key).map(|entry| entry.value),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable session file");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        let mut session = self.load().unwrap_or_default();
        session.version = 1;
        session.entries.insert(
            key.to_string(),
            PersistedSessionEntry {
                value: value.to_string(),
                stored_at_ms: chrono::Utc::now().timestamp_millis(),
            },
        );
        self.save(&session)
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        let mut session = self.load()?;
        if session.entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&session)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::JsonFileSessionStore;
    use crate::navigation::LookupChain;
    use crate::navigation::MemoryNavigation;
    use crate::navigation::SessionStore;
    use crate::navigation::TabOrigin;
    use pretty_assertions::assert_eq;

    #[test]
    fn values_survive_reopening() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("nested/session.json");
        let mut writer = JsonFileSessionStore::open(&path).expect("open");
        writer.set("tab", "premium").expect("set");

        let reader = JsonFileSessionStore::open(&path).expect("reopen");
        assert_eq!(reader.get("tab").as_deref(), Some("premium"));
        let session = reader.load().expect("load");
        assert_eq!(session.version, 1);
        assert!(session.entries["tab"].stored_at_ms > 0);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().expect("tmpdir");
        let mut store = JsonFileSessionStore::open(dir.path().join("session.json")).expect("open");
        assert_eq!(store.get("tab"), None);
        store.remove("tab").expect("remove on missing file");
        assert!(!store.path().exists());
    }

    #[test]
    fn stashed_tab_is_consumed_by_the_next_resolution_only() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("session.json");
        JsonFileSessionStore::open(&path)
            .expect("open")
            .set("tab", "comfort")
            .expect("stash");

        let navigation = MemoryNavigation::new("/portfolio");
        let chain = LookupChain::default();

        let mut first_run = JsonFileSessionStore::open(&path).expect("open");
        let resolved = chain.resolve(&navigation, &mut first_run);
        assert_eq!(resolved.tab_id, "comfort");
        assert_eq!(resolved.origin, TabOrigin::Session);

        let mut second_run = JsonFileSessionStore::open(&path).expect("open");
        let resolved = chain.resolve(&navigation, &mut second_run);
        assert_eq!(resolved.origin, TabOrigin::Default);
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").expect("write");
        let store = JsonFileSessionStore::open(&path).expect("open");
        assert_eq!(store.get("tab"), None);
        assert!(store.load().is_err());
    }
}
