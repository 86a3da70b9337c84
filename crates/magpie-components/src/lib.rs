pub mod box_order;
pub mod common;
pub mod workspace_bar;

pub use box_order::{BoxOrderManager, ResolvedBoxOrderItem, Visibility};
pub use common::{Callbacks, Component};
pub use workspace_bar::{WorkspaceBar, WorkspaceBarView, WorkspaceEntry};
