mod paths;
mod store;

pub use paths::ConfigPaths;
pub use store::{keys, JsonFileBackend, Settings, SettingsBackend, SettingsData, SubscriptionId};
