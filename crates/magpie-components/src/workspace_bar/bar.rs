use std::cell::Cell;
use std::rc::{Rc, Weak};

use compact_str::CompactString;
use tracing::debug;

use magpie_core::config::{keys, Settings, SubscriptionId};
use magpie_core::{PanelEvent, WorkspaceHost};

use super::WorkspaceEntry;
use crate::common::Component;

/// Rendering seam for the workspace bar. The host binding owns the actual
/// widgets; the controller only ever asks for a full rebuild.
pub trait WorkspaceBarView {
    /// Throw away all current labels and recreate one per entry
    fn rebuild(&self, entries: &[WorkspaceEntry]);
}

/// Controller for the row of per-workspace labels
///
/// Reacts to workspace, window and naming changes with a full rebuild.
/// Correctness over efficiency: workspace counts are single digits to low
/// tens, so no diffing is done.
pub struct WorkspaceBar {
    host: Rc<dyn WorkspaceHost>,
    view: Rc<dyn WorkspaceBarView>,
    settings: Rc<Settings>,
    names_subscription: Cell<Option<SubscriptionId>>,
}

impl WorkspaceBar {
    /// Create the bar, hide the stock Activities button and render the
    /// initial state.
    pub fn new(
        host: Rc<dyn WorkspaceHost>,
        view: Rc<dyn WorkspaceBarView>,
        settings: Rc<Settings>,
    ) -> Rc<Self> {
        let bar = Rc::new(Self {
            host,
            view,
            settings: settings.clone(),
            names_subscription: Cell::new(None),
        });

        // Custom names live in settings; re-render whenever they change.
        let weak: Weak<WorkspaceBar> = Rc::downgrade(&bar);
        let subscription = settings.connect_changed(Some(keys::WORKSPACE_NAMES), move |_| {
            if let Some(bar) = weak.upgrade() {
                bar.refresh();
            }
        });
        bar.names_subscription.set(Some(subscription));

        bar.host.set_activities_visible(false);
        bar.refresh();
        bar
    }

    /// Derive the entry list from live host state and the configured names
    pub fn entries(&self) -> Vec<WorkspaceEntry> {
        let names = self.settings.strv(keys::WORKSPACE_NAMES);
        let count = self.host.workspace_count();
        let active = self.host.active_index();

        (0..count)
            .map(|index| WorkspaceEntry {
                index,
                name: names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| CompactString::from((index + 1).to_string())),
                active: index == active,
                empty: self.host.window_count(index) == 0,
            })
            .collect()
    }

    /// Destroy-all-then-recreate rebuild through the view
    pub fn refresh(&self) {
        let entries = self.entries();
        debug!(count = entries.len(), "rebuilding workspace bar");
        self.view.rebuild(&entries);
    }

    /// Click on the active workspace toggles the overview; a click on any
    /// other workspace activates it.
    pub fn handle_click(&self, index: usize) {
        if index == self.host.active_index() {
            self.host.toggle_overview();
        } else {
            self.host.activate(index);
        }
    }
}

impl Component for WorkspaceBar {
    fn handle_event(&self, event: &PanelEvent) {
        match event {
            PanelEvent::WorkspacesChanged
            | PanelEvent::ActiveWorkspaceChanged
            | PanelEvent::Restacked
            | PanelEvent::TrackedWindowsChanged => self.refresh(),
            _ => {}
        }
    }

    fn shutdown(&self) {
        if let Some(subscription) = self.names_subscription.take() {
            self.settings.disconnect(subscription);
        }
        // Restore the Activities button, except on the lock screen where it
        // stays hidden.
        if !self.host.is_locked() {
            self.host.set_activities_visible(true);
        }
        self.view.rebuild(&[]);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use magpie_core::{SettingsBackend, SettingsData};

    use super::*;

    struct FakeWorkspaces {
        count: Cell<usize>,
        active: Cell<usize>,
        windows: RefCell<Vec<usize>>,
        activated: RefCell<Vec<usize>>,
        overview_toggles: Cell<usize>,
        activities_visible: Cell<bool>,
        locked: Cell<bool>,
    }

    impl FakeWorkspaces {
        fn new(count: usize, active: usize, windows: &[usize]) -> Rc<Self> {
            Rc::new(Self {
                count: Cell::new(count),
                active: Cell::new(active),
                windows: RefCell::new(windows.to_vec()),
                activated: RefCell::new(Vec::new()),
                overview_toggles: Cell::new(0),
                activities_visible: Cell::new(true),
                locked: Cell::new(false),
            })
        }
    }

    impl WorkspaceHost for FakeWorkspaces {
        fn workspace_count(&self) -> usize {
            self.count.get()
        }

        fn active_index(&self) -> usize {
            self.active.get()
        }

        fn window_count(&self, index: usize) -> usize {
            self.windows.borrow().get(index).copied().unwrap_or(0)
        }

        fn activate(&self, index: usize) {
            self.activated.borrow_mut().push(index);
        }

        fn toggle_overview(&self) {
            self.overview_toggles.set(self.overview_toggles.get() + 1);
        }

        fn set_activities_visible(&self, visible: bool) {
            self.activities_visible.set(visible);
        }

        fn is_locked(&self) -> bool {
            self.locked.get()
        }
    }

    #[derive(Default)]
    struct RecordingView {
        rebuilds: Cell<usize>,
        last: RefCell<Vec<WorkspaceEntry>>,
    }

    impl WorkspaceBarView for RecordingView {
        fn rebuild(&self, entries: &[WorkspaceEntry]) {
            self.rebuilds.set(self.rebuilds.get() + 1);
            *self.last.borrow_mut() = entries.to_vec();
        }
    }

    struct MemoryBackend;

    impl SettingsBackend for MemoryBackend {
        fn load(&self) -> SettingsData {
            SettingsData::default()
        }

        fn store(&self, _data: &SettingsData) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn settings() -> Rc<Settings> {
        Settings::new(Box::new(MemoryBackend))
    }

    fn names(values: &[&str]) -> Vec<CompactString> {
        values.iter().map(|s| CompactString::from(*s)).collect()
    }

    #[test]
    fn test_one_entry_per_workspace_exactly_one_active() {
        for count in 1..=12 {
            for active in 0..count {
                let host = FakeWorkspaces::new(count, active, &vec![1; count]);
                let view = Rc::new(RecordingView::default());
                let bar = WorkspaceBar::new(host, view, settings());

                let entries = bar.entries();
                assert_eq!(entries.len(), count);
                assert_eq!(entries.iter().filter(|e| e.active).count(), 1);
                assert!(entries[active].active);
            }
        }
    }

    #[test]
    fn test_empty_flag_follows_window_counts() {
        let host = FakeWorkspaces::new(3, 0, &[2, 0, 1]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host, view, settings());

        let entries = bar.entries();
        assert!(!entries[0].empty);
        assert!(entries[1].empty);
        assert!(!entries[2].empty);
    }

    #[test]
    fn test_names_fall_back_to_one_based_position() {
        let store = settings();
        store.set_strv(keys::WORKSPACE_NAMES, &names(&["web", "code"]));

        let host = FakeWorkspaces::new(3, 0, &[0, 0, 0]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host, view, store);

        let entries = bar.entries();
        assert_eq!(entries[0].name, "web");
        assert_eq!(entries[1].name, "code");
        assert_eq!(entries[2].name, "3");
    }

    #[test]
    fn test_click_on_active_toggles_overview() {
        let host = FakeWorkspaces::new(3, 1, &[0, 0, 0]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host.clone(), view, settings());

        bar.handle_click(1);
        assert_eq!(host.overview_toggles.get(), 1);
        assert!(host.activated.borrow().is_empty());

        bar.handle_click(2);
        assert_eq!(host.overview_toggles.get(), 1);
        assert_eq!(*host.activated.borrow(), vec![2]);
    }

    #[test]
    fn test_workspace_events_trigger_full_rebuild() {
        let host = FakeWorkspaces::new(2, 0, &[0, 0]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host.clone(), view.clone(), settings());

        let after_init = view.rebuilds.get();
        assert_eq!(after_init, 1);

        host.count.set(3);
        bar.handle_event(&PanelEvent::WorkspacesChanged);
        assert_eq!(view.rebuilds.get(), after_init + 1);
        assert_eq!(view.last.borrow().len(), 3);

        bar.handle_event(&PanelEvent::ActiveWorkspaceChanged);
        bar.handle_event(&PanelEvent::Restacked);
        bar.handle_event(&PanelEvent::TrackedWindowsChanged);
        assert_eq!(view.rebuilds.get(), after_init + 4);

        // Status area churn is not the bar's business.
        bar.handle_event(&PanelEvent::StatusAreaChanged);
        assert_eq!(view.rebuilds.get(), after_init + 4);
    }

    #[test]
    fn test_name_change_triggers_rebuild_via_subscription() {
        let store = settings();
        let host = FakeWorkspaces::new(2, 0, &[0, 0]);
        let view = Rc::new(RecordingView::default());
        let _bar = WorkspaceBar::new(host, view.clone(), store.clone());

        store.set_strv(keys::WORKSPACE_NAMES, &names(&["mail"]));

        assert_eq!(view.rebuilds.get(), 2);
        assert_eq!(view.last.borrow()[0].name, "mail");
    }

    #[test]
    fn test_activities_button_hidden_while_enabled() {
        let host = FakeWorkspaces::new(1, 0, &[0]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host.clone(), view, settings());

        assert!(!host.activities_visible.get());

        bar.shutdown();
        assert!(host.activities_visible.get());
    }

    #[test]
    fn test_activities_button_stays_hidden_on_lock_screen() {
        let host = FakeWorkspaces::new(1, 0, &[0]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host.clone(), view, settings());

        host.locked.set(true);
        bar.shutdown();
        assert!(!host.activities_visible.get());
    }

    #[test]
    fn test_shutdown_is_idempotent_and_releases_subscription() {
        let store = settings();
        let host = FakeWorkspaces::new(2, 0, &[0, 0]);
        let view = Rc::new(RecordingView::default());
        let bar = WorkspaceBar::new(host, view.clone(), store.clone());

        bar.shutdown();
        bar.shutdown();

        let rebuilds = view.rebuilds.get();
        store.set_strv(keys::WORKSPACE_NAMES, &names(&["x"]));
        assert_eq!(view.rebuilds.get(), rebuilds);
    }
}
