//! Shared type definitions used across virtdash crates.
//!
//! A refresh produces one [`Collection`] per [`ResourceKind`]; items are
//! never mutated after they are listed, each refresh replaces them wholesale.

use std::fmt;

/// The three kinds of resources shown on the dashboard, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceKind {
    /// Virtual machine (libvirt domain)
    #[default]
    Vm,
    /// Virtual network
    Network,
    /// Storage pool
    Pool,
}

impl ResourceKind {
    /// All kinds in panel order (for Tab cycling).
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Vm, ResourceKind::Network, ResourceKind::Pool];

    /// Position of this kind's panel, `0..3`.
    pub fn index(&self) -> usize {
        match self {
            ResourceKind::Vm => 0,
            ResourceKind::Network => 1,
            ResourceKind::Pool => 2,
        }
    }

    /// The kind whose panel comes next in the cycle.
    pub fn next(&self) -> ResourceKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Lower-case noun used in log messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Vm => "vm",
            ResourceKind::Network => "network",
            ResourceKind::Pool => "pool",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.noun())
    }
}

/// Run state of a virtual machine.
///
/// Variants are declared in display sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VmState {
    Crashed,
    Running,
    Blocked,
    Paused,
    Suspended,
    ShutDown,
    ShutOff,
    NoState,
}

impl VmState {
    /// Canonical label shown in the STATUS column.
    pub fn label(&self) -> &'static str {
        match self {
            VmState::Crashed => "crashed",
            VmState::Running => "running",
            VmState::Blocked => "blocked",
            VmState::Paused => "paused",
            VmState::Suspended => "suspended",
            VmState::ShutDown => "shut down",
            VmState::ShutOff => "shut off",
            VmState::NoState => "no state",
        }
    }

    /// Parse a state label.
    ///
    /// Accepts both the canonical labels and the spellings `virsh list`
    /// prints (`idle`, `in shutdown`, `pmsuspended`). Anything unknown is
    /// [`VmState::NoState`].
    pub fn from_label(label: &str) -> VmState {
        match label.trim().to_ascii_lowercase().as_str() {
            "crashed" => VmState::Crashed,
            "running" => VmState::Running,
            "blocked" | "idle" => VmState::Blocked,
            "paused" => VmState::Paused,
            "suspended" | "pmsuspended" => VmState::Suspended,
            "shut down" | "in shutdown" | "shutdown" => VmState::ShutDown,
            "shut off" | "shutoff" => VmState::ShutOff,
            _ => VmState::NoState,
        }
    }

    /// Sort precedence, lower sorts first.
    pub fn priority(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for VmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle action an operator can apply to the selected resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    Start,
    Stop,
}

impl LifecycleAction {
    /// Verb used in log messages and errors.
    pub fn verb(&self) -> &'static str {
        match self {
            LifecycleAction::Start => "start",
            LifecycleAction::Stop => "stop",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb())
    }
}

/// Label of a started network or pool.
pub const ACTIVE_LABEL: &str = "active";

/// Label of a stopped network or pool.
pub const INACTIVE_LABEL: &str = "inactive";

/// One row of a panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceItem {
    /// Numeric domain id; absent for VMs that are not running and for
    /// networks and pools.
    pub identifier: Option<String>,
    /// Name, unique within its collection
    pub name: String,
    /// Run state, e.g. "running", "shut off", "active", "inactive"
    pub state_label: String,
    /// Whether the resource starts with the host
    pub autostart: bool,
    /// Whether the resource has a persistent definition (networks only)
    pub persistent: bool,
}

impl ResourceItem {
    /// Create an item with the given name and state and no flags set.
    pub fn new(name: impl Into<String>, state_label: impl Into<String>) -> Self {
        Self {
            identifier: None,
            name: name.into(),
            state_label: state_label.into(),
            autostart: false,
            persistent: false,
        }
    }

    /// Set the domain id.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the autostart flag.
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Set the persistent flag.
    pub fn with_persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Identifier as displayed in the ID column (`-` when absent).
    pub fn display_identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or("-")
    }

    /// Numeric value of the identifier, if it has one.
    pub fn numeric_identifier(&self) -> Option<u64> {
        self.identifier.as_deref().and_then(|id| id.parse().ok())
    }
}

/// Ordered items of one kind.
pub type Collection = Vec<ResourceItem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cycle() {
        assert_eq!(ResourceKind::Vm.next(), ResourceKind::Network);
        assert_eq!(ResourceKind::Network.next(), ResourceKind::Pool);
        assert_eq!(ResourceKind::Pool.next(), ResourceKind::Vm);
    }

    #[test]
    fn test_vm_state_labels() {
        assert_eq!(VmState::from_label("idle"), VmState::Blocked);
        assert_eq!(VmState::from_label("in shutdown"), VmState::ShutDown);
        assert_eq!(VmState::from_label("pmsuspended"), VmState::Suspended);
        assert_eq!(VmState::from_label("Shut Off"), VmState::ShutOff);
        assert_eq!(VmState::from_label("bogus"), VmState::NoState);

        for state in [VmState::Crashed, VmState::Running, VmState::ShutOff, VmState::NoState] {
            assert_eq!(VmState::from_label(state.label()), state);
        }
    }

    #[test]
    fn test_vm_state_priority_order() {
        let order = [
            VmState::Crashed,
            VmState::Running,
            VmState::Blocked,
            VmState::Paused,
            VmState::Suspended,
            VmState::ShutDown,
            VmState::ShutOff,
            VmState::NoState,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].priority() < pair[1].priority());
        }
    }

    #[test]
    fn test_item_identifier() {
        let item = ResourceItem::new("vm1", "shut off");
        assert_eq!(item.display_identifier(), "-");
        assert_eq!(item.numeric_identifier(), None);

        let item = item.with_identifier("12");
        assert_eq!(item.display_identifier(), "12");
        assert_eq!(item.numeric_identifier(), Some(12));
    }
}
