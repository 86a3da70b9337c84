use magpie_core::PanelEvent;

/// Trait that all panel components implement
///
/// Note: components are not Send; they live on the host main loop.
pub trait Component {
    /// Handle an event from the host event loop
    fn handle_event(&self, event: &PanelEvent);

    /// Cleanup before disposal. Releases every subscription the component
    /// created, exactly once; safe to call more than once.
    fn shutdown(&self);
}
