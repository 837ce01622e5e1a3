//! Resource listing and lifecycle actions for virtdash.
//!
//! The dashboard only ever talks to a [`DataSource`]: three listings and
//! two actions. Two realizations live here:
//!
//! - [`VirshSource`] shells out to `virsh` and parses its tables
//! - [`MockSource`] keeps collections in memory and records every call
//!
//! # Example
//!
//! ```no_run
//! use virtdash_core::ResourceKind;
//! use virtdash_source::{DataSource, VirshSource};
//!
//! fn main() -> virtdash_core::Result<()> {
//!     let mut source = VirshSource::open("virsh", Some("qemu:///system".into()))?;
//!     let vms = source.list(ResourceKind::Vm)?;
//!     if let Some(vm) = vms.first() {
//!         source.stop(ResourceKind::Vm, vm)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod mock;
pub mod table;
pub mod virsh;

use virtdash_core::Result;
use virtdash_core::types::{Collection, LifecycleAction, ResourceItem, ResourceKind};

pub use mock::MockSource;
pub use virsh::VirshSource;

/// Boundary to whatever enumerates and controls resources.
///
/// Calls are synchronous and block the caller for their duration.
pub trait DataSource {
    /// List every resource of a kind, in the order the backend reports them.
    ///
    /// Fails with `SourceUnavailable` when the hypervisor cannot be reached.
    fn list(&mut self, kind: ResourceKind) -> Result<Collection>;

    /// Apply a lifecycle action to one resource.
    fn apply(&mut self, kind: ResourceKind, action: LifecycleAction, item: &ResourceItem) -> Result<()>;

    /// Start a resource.
    fn start(&mut self, kind: ResourceKind, item: &ResourceItem) -> Result<()> {
        self.apply(kind, LifecycleAction::Start, item)
    }

    /// Stop (destroy) a resource.
    fn stop(&mut self, kind: ResourceKind, item: &ResourceItem) -> Result<()> {
        self.apply(kind, LifecycleAction::Stop, item)
    }
}
