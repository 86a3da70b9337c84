mod host;
mod region;

pub use host::{ContainerId, PanelHost, ReadyHandlerId, WorkspaceHost};
pub use region::PanelRegion;
