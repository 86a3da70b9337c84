use ahash::AHashMap;
use compact_str::CompactString;
use smallvec::SmallVec;

/// Roles currently associated with one indicator settings identifier.
/// Two slots inline: duplicate indicator instances are rare.
type Roles = SmallVec<[CompactString; 2]>;

/// Process-local settings-id to roles mapping for indicator items
///
/// Populated lazily as indicators are observed. Rebuilt from live
/// discovery every session, never persisted.
#[derive(Debug, Default)]
pub struct AppIndicatorRoleRegistry {
    roles_by_id: AHashMap<CompactString, Roles>,
}

impl AppIndicatorRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `role` with `settings_id`, keeping registration order.
    /// A role already recorded for the id is not added twice.
    pub fn associate(&mut self, settings_id: &str, role: &str) {
        let roles = self
            .roles_by_id
            .entry(CompactString::from(settings_id))
            .or_default();
        if !roles.iter().any(|r| r == role) {
            roles.push(CompactString::from(role));
        }
    }

    /// Roles recorded for `settings_id`, in registration order
    pub fn roles(&self, settings_id: &str) -> Option<&[CompactString]> {
        self.roles_by_id.get(settings_id).map(|roles| roles.as_slice())
    }
}
