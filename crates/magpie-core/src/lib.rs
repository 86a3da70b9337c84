pub mod config;
pub mod error;
pub mod messages;
pub mod panel;

pub use config::{ConfigPaths, JsonFileBackend, Settings, SettingsBackend, SettingsData};
pub use error::ResolveError;
pub use messages::PanelEvent;
pub use panel::{ContainerId, PanelHost, PanelRegion, ReadyHandlerId, WorkspaceHost};
