//! `virsh` shell-out data source.
//!
//! Every call runs the management CLI synchronously with `LC_ALL=C` so
//! labels are stable, and parses its table output.

use std::process::{Command, Output};

use tracing::{debug, instrument};
use virtdash_core::types::{Collection, LifecycleAction, ResourceItem, ResourceKind, VmState};
use virtdash_core::{DashError, Result};

use crate::DataSource;
use crate::table::{parse_flag, parse_rows};

/// Data source backed by the `virsh` command line tool.
#[derive(Debug, Clone)]
pub struct VirshSource {
    binary: String,
    uri: Option<String>,
}

impl VirshSource {
    /// Create a source without checking the connection.
    pub fn new(binary: impl Into<String>, uri: Option<String>) -> Self {
        Self {
            binary: binary.into(),
            uri,
        }
    }

    /// Create a source and verify the hypervisor is reachable.
    ///
    /// Fails with [`DashError::SourceUnavailable`] when `virsh` is missing
    /// or cannot connect.
    #[instrument(level = "debug", skip_all, fields(uri = ?uri))]
    pub fn open(binary: impl Into<String>, uri: Option<String>) -> Result<Self> {
        let source = Self::new(binary, uri);
        let stdout = source.query(&["uri"])?;
        debug!(connected = %stdout.trim(), "hypervisor connection verified");
        Ok(source)
    }

    /// Arguments for one invocation, with the connection prefix.
    fn args<'a>(&'a self, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(uri) = &self.uri {
            full.push("--connect");
            full.push(uri.as_str());
        }
        full.extend_from_slice(args);
        full
    }

    fn execute(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(&self.binary)
            .args(self.args(args))
            .env("LC_ALL", "C")
            .output()
    }

    /// Run a read-only command and return its stdout.
    fn query(&self, args: &[&str]) -> Result<String> {
        let output = self.execute(args).map_err(|e| {
            DashError::source_unavailable(format!("failed to run {}: {}", self.binary, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DashError::source_unavailable(format!(
                "{} {} failed: {}",
                self.binary,
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Subcommand implementing an action on a kind.
pub fn action_command(kind: ResourceKind, action: LifecycleAction) -> &'static str {
    match (kind, action) {
        (ResourceKind::Vm, LifecycleAction::Start) => "start",
        (ResourceKind::Vm, LifecycleAction::Stop) => "destroy",
        (ResourceKind::Network, LifecycleAction::Start) => "net-start",
        (ResourceKind::Network, LifecycleAction::Stop) => "net-destroy",
        (ResourceKind::Pool, LifecycleAction::Start) => "pool-start",
        (ResourceKind::Pool, LifecycleAction::Stop) => "pool-destroy",
    }
}

/// Subcommand listing a kind.
pub fn list_command(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Vm => "list",
        ResourceKind::Network => "net-list",
        ResourceKind::Pool => "pool-list",
    }
}

fn short_row(context: &str, row: &[String], expected: usize) -> DashError {
    DashError::parse(
        context,
        format!("expected {} columns, got {}: {:?}", expected, row.len(), row),
    )
}

/// Parse `virsh list --all`, keeping listing order.
///
/// State labels are normalised to the canonical [`VmState`] labels and an
/// id of `-` becomes an absent identifier. The table carries no autostart
/// column, and the VM panel shows none, so `autostart` stays false.
pub fn parse_vm_list(output: &str) -> Result<Collection> {
    let mut vms = Vec::new();
    for row in parse_rows(output) {
        let [id, name, state] = row.as_slice() else {
            return Err(short_row("list", &row, 3));
        };
        let mut item = ResourceItem::new(name.clone(), VmState::from_label(state).label());
        if id != "-" {
            item = item.with_identifier(id.clone());
        }
        vms.push(item);
    }
    Ok(vms)
}

/// Parse `virsh net-list --all`.
pub fn parse_net_list(output: &str) -> Result<Collection> {
    let mut nets = Vec::new();
    for row in parse_rows(output) {
        let [name, state, autostart, persistent] = row.as_slice() else {
            return Err(short_row("net-list", &row, 4));
        };
        nets.push(
            ResourceItem::new(name.clone(), state.clone())
                .with_autostart(parse_flag(autostart))
                .with_persistent(parse_flag(persistent)),
        );
    }
    Ok(nets)
}

/// Parse `virsh pool-list --all`.
pub fn parse_pool_list(output: &str) -> Result<Collection> {
    let mut pools = Vec::new();
    for row in parse_rows(output) {
        let [name, state, autostart] = row.as_slice() else {
            return Err(short_row("pool-list", &row, 3));
        };
        pools.push(ResourceItem::new(name.clone(), state.clone()).with_autostart(parse_flag(autostart)));
    }
    Ok(pools)
}

impl DataSource for VirshSource {
    #[instrument(level = "debug", skip(self))]
    fn list(&mut self, kind: ResourceKind) -> Result<Collection> {
        let output = self.query(&[list_command(kind), "--all"])?;
        match kind {
            ResourceKind::Vm => parse_vm_list(&output),
            ResourceKind::Network => parse_net_list(&output),
            ResourceKind::Pool => parse_pool_list(&output),
        }
    }

    #[instrument(level = "debug", skip(self, item), fields(name = %item.name))]
    fn apply(&mut self, kind: ResourceKind, action: LifecycleAction, item: &ResourceItem) -> Result<()> {
        let subcommand = action_command(kind, action);
        let output = self
            .execute(&[subcommand, item.name.as_str()])
            .map_err(|e| DashError::action_failed(action.verb(), kind, &item.name, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DashError::action_failed(
                action.verb(),
                kind,
                &item.name,
                stderr.trim(),
            ));
        }

        debug!(subcommand, "action completed");
        Ok(())
    }
}
