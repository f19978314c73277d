//! Host collaborator interfaces
//!
//! The hosting application owns file storage, settings persistence, user
//! notices, and change notifications. They are injected as trait objects at
//! plugin start so the core logic runs and tests without any host present.

pub mod events;
pub mod vault;

use std::rc::Rc;

use anyhow::Result;

pub use events::{EventBus, SubscriptionId, WorkspaceEvent};
pub use vault::{DirVault, JsonSettingsStore};

/// File storage as exposed by the hosting application
pub trait FileStore {
    /// Names of all stored image files, per the extension allow-list
    fn list_images(&self) -> Vec<String>;

    /// Raw bytes of a stored file, for bitmap decoding
    fn read_binary(&self, name: &str) -> Result<Vec<u8>>;

    /// Full text of the active document
    fn read_document(&self) -> Result<String>;

    /// Insert text at a byte position of the active document
    ///
    /// Positions past the end append; positions inside a multi-byte
    /// character snap back to the nearest boundary.
    fn insert_text(&self, position: usize, text: &str) -> Result<()>;
}

/// Transient user-visible notices
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Persisted plugin preferences, stored as an opaque JSON payload
pub trait SettingsStore {
    /// Stored payload, `None` when nothing has been saved yet
    fn load(&self) -> Option<String>;

    fn save(&self, payload: &str) -> Result<()>;
}

/// Notifier that only logs, for hosts without a toast surface
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        log::info!("{message}");
    }
}

/// Collaborators handed to the plugin at start
#[derive(Clone)]
pub struct HostContext {
    pub files: Rc<dyn FileStore>,
    pub notices: Rc<dyn Notifier>,
    pub settings: Rc<dyn SettingsStore>,
    pub events: Rc<EventBus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_context_from_fs_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("note.md"), "").unwrap();

        let context = HostContext {
            files: Rc::new(DirVault::new(dir.path(), "note.md")),
            notices: Rc::new(LogNotifier),
            settings: Rc::new(JsonSettingsStore::at(dir.path().join("config.json"))),
            events: Rc::new(EventBus::new()),
        };
        context.notices.notice("plugin ready");
        assert!(context.files.list_images().is_empty());
        assert_eq!(context.files.read_document().unwrap(), "");
    }
}
