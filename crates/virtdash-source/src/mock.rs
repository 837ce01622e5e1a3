//! In-memory data source for tests.
//!
//! Starting a resource flips it to `running`/`active`, stopping to
//! `shut off`/`inactive`, so a refresh after an action shows the new state.

use virtdash_core::types::{
    ACTIVE_LABEL, Collection, INACTIVE_LABEL, LifecycleAction, ResourceItem, ResourceKind, VmState,
};
use virtdash_core::{DashError, Result};

use crate::DataSource;

/// One recorded call to [`DataSource::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAction {
    pub kind: ResourceKind,
    pub action: LifecycleAction,
    pub name: String,
}

/// Data source holding its collections in memory.
#[derive(Debug, Default)]
pub struct MockSource {
    collections: [Collection; 3],
    actions: Vec<RecordedAction>,
    list_calls: usize,
    fail_list: bool,
    fail_actions: bool,
    next_id: u64,
}

impl MockSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Replace the items of one kind.
    pub fn with_items(mut self, kind: ResourceKind, items: Collection) -> Self {
        self.set_items(kind, items);
        self
    }

    /// Replace the items of one kind.
    pub fn set_items(&mut self, kind: ResourceKind, items: Collection) {
        self.collections[kind.index()] = items;
    }

    /// Current items of one kind.
    pub fn items(&self, kind: ResourceKind) -> &[ResourceItem] {
        &self.collections[kind.index()]
    }

    /// Make every subsequent `list` fail (or succeed again).
    pub fn set_fail_list(&mut self, fail: bool) {
        self.fail_list = fail;
    }

    /// Make every subsequent action fail (or succeed again).
    pub fn set_fail_actions(&mut self, fail: bool) {
        self.fail_actions = fail;
    }

    /// Every action applied so far, in order.
    pub fn actions(&self) -> &[RecordedAction] {
        &self.actions
    }

    /// Number of `list` calls made so far, failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls
    }

    fn find_mut(&mut self, kind: ResourceKind, name: &str) -> Option<&mut ResourceItem> {
        self.collections[kind.index()]
            .iter_mut()
            .find(|item| item.name == name)
    }
}

impl DataSource for MockSource {
    fn list(&mut self, kind: ResourceKind) -> Result<Collection> {
        self.list_calls += 1;
        if self.fail_list {
            return Err(DashError::source_unavailable("mock source is offline"));
        }
        Ok(self.collections[kind.index()].clone())
    }

    fn apply(&mut self, kind: ResourceKind, action: LifecycleAction, item: &ResourceItem) -> Result<()> {
        self.actions.push(RecordedAction {
            kind,
            action,
            name: item.name.clone(),
        });
        if self.fail_actions {
            return Err(DashError::action_failed(action.verb(), kind, &item.name, "permission denied"));
        }

        let id = self.next_id;
        let Some(target) = self.find_mut(kind, &item.name) else {
            return Err(DashError::action_failed(action.verb(), kind, &item.name, "no such resource"));
        };

        match (kind, action) {
            (ResourceKind::Vm, LifecycleAction::Start) => {
                if target.state_label == VmState::Running.label() {
                    return Err(DashError::action_failed("start", kind, &item.name, "domain is already active"));
                }
                target.state_label = VmState::Running.label().to_string();
                target.identifier = Some(id.to_string());
                self.next_id += 1;
            }
            (ResourceKind::Vm, LifecycleAction::Stop) => {
                target.state_label = VmState::ShutOff.label().to_string();
                target.identifier = None;
            }
            (_, LifecycleAction::Start) => target.state_label = ACTIVE_LABEL.to_string(),
            (_, LifecycleAction::Stop) => target.state_label = INACTIVE_LABEL.to_string(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut source = MockSource::new().with_items(
            ResourceKind::Network,
            vec![ResourceItem::new("b", "inactive"), ResourceItem::new("a", "active")],
        );
        let nets = source.list(ResourceKind::Network).unwrap();
        assert_eq!(nets[0].name, "b");
        assert_eq!(nets[1].name, "a");
        assert_eq!(source.list_calls(), 1);
    }

    #[test]
    fn test_start_vm_assigns_id() {
        let vm = ResourceItem::new("vm1", "shut off");
        let mut source = MockSource::new().with_items(ResourceKind::Vm, vec![vm.clone()]);

        source.start(ResourceKind::Vm, &vm).unwrap();
        let vms = source.list(ResourceKind::Vm).unwrap();
        assert_eq!(vms[0].state_label, "running");
        assert_eq!(vms[0].identifier.as_deref(), Some("1"));

        assert!(source.start(ResourceKind::Vm, &vm).is_err());
        assert_eq!(source.actions().len(), 2);
    }

    #[test]
    fn test_stop_pool() {
        let pool = ResourceItem::new("images", "active");
        let mut source = MockSource::new().with_items(ResourceKind::Pool, vec![pool.clone()]);
        source.stop(ResourceKind::Pool, &pool).unwrap();
        assert_eq!(source.items(ResourceKind::Pool)[0].state_label, "inactive");
        assert_eq!(
            source.actions()[0],
            RecordedAction {
                kind: ResourceKind::Pool,
                action: LifecycleAction::Stop,
                name: "images".into(),
            }
        );
    }

    #[test]
    fn test_failures() {
        let mut source = MockSource::new();
        source.set_fail_list(true);
        assert!(source.list(ResourceKind::Vm).unwrap_err().is_source_error());

        source.set_fail_actions(true);
        let ghost = ResourceItem::new("ghost", "shut off");
        assert!(source.start(ResourceKind::Vm, &ghost).is_err());
        assert_eq!(source.actions().len(), 1);
    }
}
