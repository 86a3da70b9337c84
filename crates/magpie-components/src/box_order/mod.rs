mod item;
mod manager;
mod registry;

pub use item::{
    indicator_settings_id, is_indicator_role, is_indicator_settings_id, ResolvedBoxOrderItem,
    Visibility, INDICATOR_ROLE_PREFIX, INDICATOR_SETTINGS_ID_PREFIX,
};
pub use manager::BoxOrderManager;
pub use registry::AppIndicatorRoleRegistry;
