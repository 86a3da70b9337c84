use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use tracing::{debug, error};

use magpie_core::config::{keys, Settings};
use magpie_core::{ContainerId, PanelEvent, PanelHost, PanelRegion, ReadyHandlerId, ResolveError};

use super::registry::AppIndicatorRoleRegistry;
use super::{
    indicator_settings_id, is_indicator_role, is_indicator_settings_id, ResolvedBoxOrderItem,
    Visibility,
};
use crate::common::{Callbacks, Component};

/// Interface to the box orders stored in settings
///
/// Takes care of AppIndicator/KStatusNotifierItem items and of resolving
/// the persisted item settings identifiers to live roles, and reconciles
/// the persisted orders with the items actually present in the panel.
pub struct BoxOrderManager {
    host: Rc<dyn PanelHost>,
    settings: Rc<Settings>,
    registry: RefCell<AppIndicatorRoleRegistry>,
    /// Pending one-shot readiness subscriptions, by handler id
    ready_handlers: RefCell<AHashMap<ReadyHandlerId, ContainerId>>,
    /// Fired when a previously unresolvable indicator becomes ready
    ready: Callbacks<()>,
    /// Cleared by `disconnect_signals`; no new subscriptions afterwards
    accepting_subscriptions: Cell<bool>,
    weak_self: Weak<Self>,
}

impl BoxOrderManager {
    pub fn new(host: Rc<dyn PanelHost>, settings: Rc<Settings>) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            host,
            settings,
            registry: RefCell::new(AppIndicatorRoleRegistry::new()),
            ready_handlers: RefCell::new(AHashMap::new()),
            ready: Callbacks::new(),
            accepting_subscriptions: Cell::new(true),
            weak_self: weak_self.clone(),
        })
    }

    /// Register a callback for the manager's readiness notification, fired
    /// when an indicator that previously failed to resolve announces its
    /// identity. Callers typically re-run [`Self::save_new_top_bar_items`].
    pub fn connect_ready(&self, callback: impl Fn() + 'static) {
        self.ready.register(move |_| callback());
    }

    /// The persisted box order for `region`. A pure read, no validation.
    pub fn box_order(&self, region: PanelRegion) -> Vec<CompactString> {
        self.settings.strv(region.box_order_key())
    }

    /// Persist `order` for `region`, but only if it differs from the
    /// stored value. Writing an identical list would re-trigger
    /// settings-change notifications and risk an update loop.
    pub fn save_box_order(&self, region: PanelRegion, order: &[CompactString]) {
        if self.box_order(region) != order {
            debug!(
                key = region.box_order_key(),
                items = order.len(),
                "saving box order"
            );
            self.settings.set_strv(region.box_order_key(), order);
        }
    }

    /// Resolve an AppIndicator item to its settings identifier and record
    /// the role association.
    ///
    /// If the indicator has not announced its application id yet, this
    /// fails with [`ResolveError::NotYetResolvable`] after registering a
    /// one-shot readiness subscription: once the indicator is ready the
    /// manager's own ready notification fires and the subscription removes
    /// itself, so the caller can retry the whole pass.
    pub fn resolve_indicator_item(
        &self,
        container: ContainerId,
        role: &str,
    ) -> Result<CompactString, ResolveError> {
        let Some(application) = self.host.indicator_application(container) else {
            if self.accepting_subscriptions.get() {
                self.subscribe_indicator_ready(container);
            }
            return Err(ResolveError::NotYetResolvable);
        };

        let settings_id = indicator_settings_id(&application);
        self.registry.borrow_mut().associate(&settings_id, role);
        Ok(settings_id)
    }

    fn subscribe_indicator_ready(&self, container: ContainerId) {
        let weak = self.weak_self.clone();
        let handler_slot = Rc::new(Cell::new(0));
        let slot = handler_slot.clone();
        let handler = self.host.connect_indicator_ready(
            container,
            Box::new(move || {
                let Some(manager) = weak.upgrade() else { return };
                manager.ready.notify(&());
                let handler = slot.get();
                manager.host.disconnect_indicator_ready(handler);
                manager.ready_handlers.borrow_mut().remove(&handler);
            }),
        );
        handler_slot.set(handler);
        self.ready_handlers.borrow_mut().insert(handler, container);
        debug!(container, "indicator not ready yet, waiting for readiness");
    }

    /// The box order for `region` with indicator items fanned out to their
    /// registered roles.
    ///
    /// Indicator ids with no role recorded yet are dropped, not an error;
    /// fan-out items appear contiguously at the id's position, in role
    /// registration order.
    pub fn resolved_box_order(&self, region: PanelRegion) -> Vec<ResolvedBoxOrderItem> {
        let items_to_hide = self.settings.strv(keys::ITEMS_TO_HIDE);
        let items_to_show = self.settings.strv(keys::ITEMS_TO_SHOW);
        let registry = self.registry.borrow();

        let mut resolved = Vec::new();
        for settings_id in self.box_order(region) {
            let hide = if items_to_hide.contains(&settings_id) {
                Visibility::Hide
            } else if items_to_show.contains(&settings_id) {
                Visibility::Show
            } else {
                Visibility::Default
            };

            if !is_indicator_settings_id(&settings_id) {
                resolved.push(ResolvedBoxOrderItem {
                    role: settings_id.clone(),
                    settings_id,
                    hide,
                });
                continue;
            }

            let Some(roles) = registry.roles(&settings_id) else {
                continue;
            };
            for role in roles {
                resolved.push(ResolvedBoxOrderItem {
                    settings_id: settings_id.clone(),
                    role: role.clone(),
                    hide,
                });
            }
        }

        resolved
    }

    /// The resolved box order for `region`, filtered to items whose role
    /// maps to a container that is currently a child of one of the three
    /// panel regions. Guards against stale persisted entries.
    pub fn valid_box_order(&self, region: PanelRegion) -> Vec<ResolvedBoxOrderItem> {
        let live: AHashSet<ContainerId> = PanelRegion::ALL
            .iter()
            .flat_map(|&r| self.host.box_children(r))
            .collect();

        self.resolved_box_order(region)
            .into_iter()
            .filter(|item| {
                self.host
                    .container_for_role(&item.role)
                    .is_some_and(|container| live.contains(&container))
            })
            .collect()
    }

    /// Reconcile the persisted box orders with the items currently present
    /// in the panel: every new item is added to the region it appeared in,
    /// preserving visual order, and the result is persisted per region
    /// (write suppression applies).
    ///
    /// Indicators that cannot be resolved yet are skipped; the pending
    /// readiness notification retries them. Any other resolution error
    /// aborts the pass.
    pub fn save_new_top_bar_items(&self) -> anyhow::Result<()> {
        // Skip restricted modes (lock screen, unlock dialog).
        let mode = self.host.session_mode();
        if mode != "user" && self.host.parent_session_mode().as_deref() != Some("user") {
            debug!(%mode, "restricted session mode, skipping reconciliation");
            return Ok(());
        }

        let mut orders: [Vec<CompactString>; 3] = [
            self.box_order(PanelRegion::Left),
            self.box_order(PanelRegion::Center),
            self.box_order(PanelRegion::Right),
        ];

        // Index live roles by their container.
        let mut role_by_container: AHashMap<ContainerId, CompactString> = AHashMap::new();
        for role in self.host.status_area_roles() {
            if let Some(container) = self.host.container_for_role(&role) {
                role_by_container.insert(container, role);
            }
        }

        for (slot, region) in PanelRegion::ALL.into_iter().enumerate() {
            let mut children = self.host.box_children(region);
            // Left and center are logically LTR while right is RTL;
            // reversing the right box normalizes all three to one append
            // direction.
            if region.is_reversed() {
                children.reverse();
            }

            for container in children {
                let Some(role) = role_by_container.get(&container) else {
                    // Not a tracked status-area item.
                    continue;
                };

                let settings_id = if is_indicator_role(role) {
                    match self.resolve_indicator_item(container, role) {
                        Ok(settings_id) => settings_id,
                        Err(ResolveError::NotYetResolvable) => continue,
                        Err(ResolveError::Unexpected(e)) => return Err(e),
                    }
                } else {
                    role.clone()
                };

                // De-duplicate across all three regions: an id already
                // ordered anywhere stays where it is.
                if orders.iter().any(|order| order.contains(&settings_id)) {
                    continue;
                }

                if region.is_reversed() {
                    // Compensate for the reversal so the item lands at the
                    // correct visual position once the host re-reverses.
                    orders[slot].insert(0, settings_id);
                } else {
                    orders[slot].push(settings_id);
                }
            }
        }

        for (slot, region) in PanelRegion::ALL.into_iter().enumerate() {
            self.save_box_order(region, &orders[slot]);
        }

        Ok(())
    }

    /// Release all pending readiness subscriptions and stop accepting new
    /// ones. Safe to call more than once.
    pub fn disconnect_signals(&self) {
        self.accepting_subscriptions.set(false);
        for (handler, _) in self.ready_handlers.borrow_mut().drain() {
            self.host.disconnect_indicator_ready(handler);
        }
    }
}

impl Component for BoxOrderManager {
    fn handle_event(&self, event: &PanelEvent) {
        match event {
            PanelEvent::StatusAreaChanged | PanelEvent::IndicatorReady => {
                if let Err(e) = self.save_new_top_bar_items() {
                    error!("failed to reconcile top bar items: {e:#}");
                }
            }
            _ => {}
        }
    }

    fn shutdown(&self) {
        self.disconnect_signals();
    }
}
