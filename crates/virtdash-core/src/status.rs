//! Status classification for listed resources.
//!
//! The same notion of "healthy" drives row graying in the TUI and the
//! sort order of every collection.

use std::cmp::Ordering;

use crate::types::{ACTIVE_LABEL, ResourceItem, ResourceKind, VmState};

/// Checkbox-style glyph for a boolean flag.
pub fn bool_glyph(value: bool) -> char {
    if value { 'X' } else { ' ' }
}

/// Returns true if the item is in its nominal "up" state.
///
/// A VM is healthy when running; networks and pools when active.
pub fn is_healthy(kind: ResourceKind, item: &ResourceItem) -> bool {
    match kind {
        ResourceKind::Vm => item.state_label == VmState::Running.label(),
        ResourceKind::Network | ResourceKind::Pool => item.state_label == ACTIVE_LABEL,
    }
}

/// Total display order of two items of the same kind.
///
/// VMs group by [`VmState`] precedence, then by numeric id (VMs without an
/// id first), then by name. Networks and pools put active items first, then
/// order by name.
pub fn compare(kind: ResourceKind, a: &ResourceItem, b: &ResourceItem) -> Ordering {
    match kind {
        ResourceKind::Vm => {
            let state_a = VmState::from_label(&a.state_label);
            let state_b = VmState::from_label(&b.state_label);
            state_a
                .priority()
                .cmp(&state_b.priority())
                .then_with(|| a.numeric_identifier().cmp(&b.numeric_identifier()))
                .then_with(|| a.name.cmp(&b.name))
        }
        ResourceKind::Network | ResourceKind::Pool => {
            let rank = |item: &ResourceItem| u8::from(item.state_label != ACTIVE_LABEL);
            rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
        }
    }
}

/// Sort a freshly listed collection into display order.
pub fn sort_collection(kind: ResourceKind, items: &mut [ResourceItem]) {
    items.sort_by(|a, b| compare(kind, a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[ResourceItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_bool_glyph() {
        assert_eq!(bool_glyph(true), 'X');
        assert_eq!(bool_glyph(false), ' ');
    }

    #[test]
    fn test_healthy_predicates() {
        assert!(is_healthy(ResourceKind::Vm, &ResourceItem::new("a", "running")));
        assert!(!is_healthy(ResourceKind::Vm, &ResourceItem::new("a", "paused")));
        assert!(!is_healthy(ResourceKind::Vm, &ResourceItem::new("a", "active")));
        assert!(is_healthy(ResourceKind::Network, &ResourceItem::new("n", "active")));
        assert!(!is_healthy(ResourceKind::Network, &ResourceItem::new("n", "inactive")));
        assert!(is_healthy(ResourceKind::Pool, &ResourceItem::new("p", "active")));
        assert!(!is_healthy(ResourceKind::Pool, &ResourceItem::new("p", "degraded")));
    }

    #[test]
    fn test_vm_sort_by_state_precedence() {
        let mut vms = vec![
            ResourceItem::new("off", "shut off"),
            ResourceItem::new("nostate", "no state"),
            ResourceItem::new("paused", "paused").with_identifier("4"),
            ResourceItem::new("blocked", "blocked").with_identifier("3"),
            ResourceItem::new("running", "running").with_identifier("2"),
            ResourceItem::new("crashed", "crashed"),
            ResourceItem::new("suspended", "suspended").with_identifier("5"),
            ResourceItem::new("down", "shut down").with_identifier("6"),
        ];
        sort_collection(ResourceKind::Vm, &mut vms);
        assert_eq!(
            names(&vms),
            vec!["crashed", "running", "blocked", "paused", "suspended", "down", "off", "nostate"]
        );
    }

    #[test]
    fn test_vm_sort_ties_by_identifier() {
        let mut vms = vec![
            ResourceItem::new("c", "running").with_identifier("10"),
            ResourceItem::new("a", "running").with_identifier("9"),
            ResourceItem::new("b", "running").with_identifier("2"),
        ];
        sort_collection(ResourceKind::Vm, &mut vms);
        // numeric, not lexical: 2 < 9 < 10
        assert_eq!(names(&vms), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_net_sort_active_first_then_name() {
        let mut nets = vec![
            ResourceItem::new("zeta", "inactive"),
            ResourceItem::new("beta", "active"),
            ResourceItem::new("alpha", "inactive"),
            ResourceItem::new("default", "active"),
        ];
        sort_collection(ResourceKind::Network, &mut nets);
        assert_eq!(names(&nets), vec!["beta", "default", "alpha", "zeta"]);
    }

    #[test]
    fn test_sort_empty_collection() {
        let mut pools: Vec<ResourceItem> = Vec::new();
        sort_collection(ResourceKind::Pool, &mut pools);
        assert!(pools.is_empty());
    }
}
