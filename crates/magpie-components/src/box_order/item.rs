use compact_str::CompactString;

/// Settings-id prefix for AppIndicator/KStatusNotifierItem items
pub const INDICATOR_SETTINGS_ID_PREFIX: &str = "appindicator-kstatusnotifieritem-";

/// Role prefix the host assigns to AppIndicator items
pub const INDICATOR_ROLE_PREFIX: &str = "appindicator-";

/// Forced visibility of a resolved item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Forcefully hidden
    Hide,
    /// Forcefully shown
    Show,
    /// Left as the item wants to be
    Default,
}

/// A box order entry resolved to a concrete role
///
/// Derived, never persisted. For ordinary items the role equals the
/// settings id; indicator items fan out to one of these per live role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBoxOrderItem {
    pub settings_id: CompactString,
    pub role: CompactString,
    pub hide: Visibility,
}

/// Derive the settings identifier for an indicator application id.
///
/// The Dropbox client appends its PID to the id; drop the PID and the
/// hyphen before it so the identifier stays stable across restarts.
pub fn indicator_settings_id(application: &str) -> CompactString {
    let application = if application.starts_with("dropbox-client-") {
        "dropbox-client"
    } else {
        application
    };
    format!("{INDICATOR_SETTINGS_ID_PREFIX}{application}").into()
}

pub fn is_indicator_settings_id(id: &str) -> bool {
    id.starts_with(INDICATOR_SETTINGS_ID_PREFIX)
}

pub fn is_indicator_role(role: &str) -> bool {
    role.starts_with(INDICATOR_ROLE_PREFIX)
}
