use compact_str::CompactString;

use super::PanelRegion;

/// Opaque handle for a panel child widget, assigned by the host toolkit
pub type ContainerId = u64;

/// Handle for a one-shot indicator readiness subscription
pub type ReadyHandlerId = u64;

/// Read-only view of the host panel's live registries, plus the indicator
/// readiness subscription capability.
///
/// Implemented by the host binding. This crate never mutates the panel
/// through it; the only stateful calls are the subscription pair.
pub trait PanelHost {
    /// Roles of every item currently registered in the status area
    fn status_area_roles(&self) -> Vec<CompactString>;

    /// Container of the item registered under `role`, if any
    fn container_for_role(&self, role: &str) -> Option<ContainerId>;

    /// Children of `region`, in the host's stacking order
    fn box_children(&self, region: PanelRegion) -> Vec<ContainerId>;

    /// Application id reported by the indicator inside `container`, or
    /// `None` if it has not announced one yet
    fn indicator_application(&self, container: ContainerId) -> Option<CompactString>;

    /// Subscribe to the readiness signal of the indicator inside
    /// `container`. The callback fires at most once per readiness; the
    /// subscription stays registered until disconnected.
    fn connect_indicator_ready(
        &self,
        container: ContainerId,
        callback: Box<dyn Fn()>,
    ) -> ReadyHandlerId;

    /// Release a readiness subscription. Unknown handles are ignored.
    fn disconnect_indicator_ready(&self, handler: ReadyHandlerId);

    /// Current session mode ("user", "lock-screen", ...)
    fn session_mode(&self) -> CompactString;

    /// Parent of the current session mode, if it has one
    fn parent_session_mode(&self) -> Option<CompactString>;
}

/// Live workspace state and actions, as exposed by the window manager
pub trait WorkspaceHost {
    fn workspace_count(&self) -> usize;

    fn active_index(&self) -> usize;

    /// Number of windows on the workspace at `index`
    fn window_count(&self, index: usize) -> usize;

    /// Make the workspace at `index` the active one
    fn activate(&self, index: usize);

    /// Toggle the overview
    fn toggle_overview(&self);

    /// Show or hide the stock Activities button
    fn set_activities_visible(&self, visible: bool);

    /// Whether the session is currently locked
    fn is_locked(&self) -> bool;
}
