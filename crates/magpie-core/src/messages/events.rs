/// Host notifications delivered to panel components
///
/// All events arrive synchronously on the host's main loop; components
/// react by re-reading live state and pushing a view update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    // =========== Workspace Events ===========

    /// The number of workspaces changed
    WorkspacesChanged,

    /// A different workspace became active
    ActiveWorkspaceChanged,

    /// Windows were restacked
    Restacked,

    /// The window tracker picked up or lost a window
    TrackedWindowsChanged,

    // =========== Status Area Events ===========

    /// An item appeared in or vanished from a panel region
    StatusAreaChanged,

    /// A pending indicator announced its identity; resolution can be retried
    IndicatorReady,
}
