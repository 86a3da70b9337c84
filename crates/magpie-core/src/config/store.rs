use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ConfigPaths;

/// Fixed keys understood by the settings store. All values are ordered
/// lists of strings.
pub mod keys {
    pub const LEFT_BOX_ORDER: &str = "left-box-order";
    pub const CENTER_BOX_ORDER: &str = "center-box-order";
    pub const RIGHT_BOX_ORDER: &str = "right-box-order";
    pub const ITEMS_TO_HIDE: &str = "hide";
    pub const ITEMS_TO_SHOW: &str = "show";
    pub const WORKSPACE_NAMES: &str = "workspace-names";
}

/// Persisted settings values (settings.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsData {
    #[serde(default, rename = "left-box-order")]
    pub left_box_order: Vec<CompactString>,
    #[serde(default, rename = "center-box-order")]
    pub center_box_order: Vec<CompactString>,
    #[serde(default, rename = "right-box-order")]
    pub right_box_order: Vec<CompactString>,
    #[serde(default, rename = "hide")]
    pub items_to_hide: Vec<CompactString>,
    #[serde(default, rename = "show")]
    pub items_to_show: Vec<CompactString>,
    #[serde(default, rename = "workspace-names")]
    pub workspace_names: Vec<CompactString>,
}

impl SettingsData {
    fn list(&self, key: &str) -> Option<&Vec<CompactString>> {
        match key {
            keys::LEFT_BOX_ORDER => Some(&self.left_box_order),
            keys::CENTER_BOX_ORDER => Some(&self.center_box_order),
            keys::RIGHT_BOX_ORDER => Some(&self.right_box_order),
            keys::ITEMS_TO_HIDE => Some(&self.items_to_hide),
            keys::ITEMS_TO_SHOW => Some(&self.items_to_show),
            keys::WORKSPACE_NAMES => Some(&self.workspace_names),
            _ => None,
        }
    }

    fn list_mut(&mut self, key: &str) -> Option<&mut Vec<CompactString>> {
        match key {
            keys::LEFT_BOX_ORDER => Some(&mut self.left_box_order),
            keys::CENTER_BOX_ORDER => Some(&mut self.center_box_order),
            keys::RIGHT_BOX_ORDER => Some(&mut self.right_box_order),
            keys::ITEMS_TO_HIDE => Some(&mut self.items_to_hide),
            keys::ITEMS_TO_SHOW => Some(&mut self.items_to_show),
            keys::WORKSPACE_NAMES => Some(&mut self.workspace_names),
            _ => None,
        }
    }
}

/// Persistence behind the settings store
pub trait SettingsBackend {
    fn load(&self) -> SettingsData;
    fn store(&self, data: &SettingsData) -> anyhow::Result<()>;
}

/// JSON file persistence, matching the shell's other config files
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_path() -> Self {
        Self::new(ConfigPaths::new().settings)
    }
}

impl SettingsBackend for JsonFileBackend {
    fn load(&self) -> SettingsData {
        std::fs::read(&self.path)
            .ok()
            .and_then(|data| serde_json::from_slice(&data).ok())
            .unwrap_or_default()
    }

    fn store(&self, data: &SettingsData) -> anyhow::Result<()> {
        let dir = self.path.parent().context("settings path has no parent")?;
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

pub type SubscriptionId = u64;

type ChangedCallback = Rc<dyn Fn(&str)>;

/// Key/value settings store with synchronous change notification.
///
/// Values live in memory and are flushed to the backend on every write.
/// Subscribers run on the caller's stack, after the write has landed.
pub struct Settings {
    backend: Box<dyn SettingsBackend>,
    data: RefCell<SettingsData>,
    subscribers: RefCell<Vec<(SubscriptionId, Option<CompactString>, ChangedCallback)>>,
    next_subscription: Cell<SubscriptionId>,
}

impl Settings {
    pub fn new(backend: Box<dyn SettingsBackend>) -> Rc<Self> {
        let data = backend.load();
        Rc::new(Self {
            backend,
            data: RefCell::new(data),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(1),
        })
    }

    /// Read the list stored under `key`. Unknown keys yield an empty list.
    pub fn strv(&self, key: &str) -> Vec<CompactString> {
        self.data.borrow().list(key).cloned().unwrap_or_default()
    }

    /// Replace the list stored under `key`, flush it to the backend and
    /// notify subscribers.
    pub fn set_strv(&self, key: &str, values: &[CompactString]) {
        {
            let mut data = self.data.borrow_mut();
            let Some(list) = data.list_mut(key) else {
                warn!(key, "ignoring write to unknown settings key");
                return;
            };
            *list = values.to_vec();
            debug!(key, count = values.len(), "settings key written");
            if let Err(e) = self.backend.store(&data) {
                warn!("failed to persist settings: {e:#}");
            }
        }
        self.notify(key);
    }

    /// Register a change callback, optionally filtered to a single key.
    /// Returns a handle for [`Settings::disconnect`].
    pub fn connect_changed(
        &self,
        key: Option<&str>,
        callback: impl Fn(&str) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, key.map(CompactString::from), Rc::new(callback)));
        id
    }

    /// Release a change subscription. Unknown handles are ignored.
    pub fn disconnect(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub, _, _)| *sub != id);
    }

    fn notify(&self, key: &str) {
        // Clone the matching callbacks out first so one of them may connect
        // or disconnect subscribers without hitting a borrow conflict.
        let callbacks: Vec<ChangedCallback> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|(_, filter, _)| filter.as_deref().map_or(true, |f| f == key))
            .map(|(_, _, cb)| cb.clone())
            .collect();

        for callback in callbacks {
            callback(key);
        }
    }
}
