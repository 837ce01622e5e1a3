//! Panel placement for the current frame.
//!
//! The VM panel takes the left side. The network panel and, two rows
//! below its last row, the pool panel share a right-hand column just wide
//! enough for the longer of their name columns. All quantities are signed
//! because a narrow terminal drives them below zero; drawing clips.

use virtdash_core::ResourceKind;

/// Extra width of the pool name column over the network name column.
pub const POOL_NAME_EXTRA: i32 = 2;

/// Width of a STATUS column plus its padding.
pub const STATUS_BLOCK: i32 = 9;

/// Borders and margins around the right-hand column.
pub const MARGIN: i32 = 3;

/// Separator and gutter between the VM panel and the right-hand column.
const VM_GUTTER: i32 = 1 + 2;

/// Rows between the last network row and the pool header.
pub const PANEL_GAP: i32 = 2;

/// Computed positions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashLayout {
    /// Width of the network name column; the pool name column is
    /// [`POOL_NAME_EXTRA`] wider
    pub shared_name_width: i32,
    /// Left edge of the network and pool panels
    pub network_x: i32,
    /// Width budget of the VM panel
    pub vm_width: i32,
    /// Top row of the pool panel
    pub pool_y: i32,
}

fn longest(names: &[&str]) -> i32 {
    names
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .try_into()
        .unwrap_or(i32::MAX)
}

impl DashLayout {
    /// Compute the layout for a terminal width and the names currently
    /// listed in the network and pool panels. Height plays no part; rows
    /// past the bottom are clipped when drawing.
    pub fn compute(width: u16, network_names: &[&str], pool_names: &[&str]) -> Self {
        let width = i32::from(width);
        let longest_net = longest(network_names);
        let longest_pool = longest(pool_names);
        let shared_name_width = longest_net.max(longest_pool - POOL_NAME_EXTRA);

        let network_x = width - shared_name_width - STATUS_BLOCK - POOL_NAME_EXTRA - MARGIN;
        let vm_width = network_x - MARGIN - STATUS_BLOCK - VM_GUTTER;
        let network_rows: i32 = network_names.len().try_into().unwrap_or(i32::MAX - PANEL_GAP);

        Self {
            shared_name_width,
            network_x,
            vm_width,
            pool_y: network_rows + PANEL_GAP,
        }
    }

    /// Top-left corner of a panel's header row.
    pub fn origin(&self, kind: ResourceKind) -> (i32, i32) {
        match kind {
            ResourceKind::Vm => (0, 0),
            ResourceKind::Network => (self.network_x, 0),
            ResourceKind::Pool => (self.network_x, self.pool_y),
        }
    }

    /// Resolve a column width against this layout.
    pub fn resolve(&self, width: ColumnWidth) -> i32 {
        match width {
            ColumnWidth::Fixed(n) => n,
            ColumnWidth::VmName => self.vm_width - 1,
            ColumnWidth::SharedName { extra } => self.shared_name_width + extra,
        }
    }
}

/// How wide a column is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Always this many cells
    Fixed(i32),
    /// Whatever is left on the VM panel
    VmName,
    /// The shared network/pool name width plus `extra`
    SharedName { extra: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_layout() {
        let layout = DashLayout::compute(120, &["default"], &["images"]);
        assert_eq!(layout.shared_name_width, 7);
        assert_eq!(layout.network_x, 120 - 7 - 14);
        assert_eq!(layout.vm_width, layout.network_x - 15);
        assert_eq!(layout.pool_y, 3);
        assert_eq!(layout.origin(ResourceKind::Pool), (layout.network_x, 3));
    }

    #[test]
    fn test_empty_collections_default_to_zero() {
        let layout = DashLayout::compute(80, &[], &[]);
        assert_eq!(layout.shared_name_width, 0);
        assert_eq!(layout.network_x, 66);
        assert_eq!(layout.pool_y, PANEL_GAP);
    }

    #[test]
    fn test_long_pool_name_widens_shared_column() {
        let layout = DashLayout::compute(100, &["a"], &["longpoolname"]);
        assert_eq!(layout.shared_name_width, 10);
        assert_eq!(layout.resolve(ColumnWidth::SharedName { extra: 0 }), 10);
        assert_eq!(layout.resolve(ColumnWidth::SharedName { extra: POOL_NAME_EXTRA }), 12);
    }

    #[test]
    fn test_growing_names_shift_panel_left_exactly() {
        let base = DashLayout::compute(150, &["net"], &[]);
        for k in 1..20usize {
            let name = "n".repeat(3 + k);
            let grown = DashLayout::compute(150, &[name.as_str()], &[]);
            assert_eq!(grown.network_x, base.network_x - k as i32);
        }
    }

    #[test]
    fn test_growing_pool_names_shift_panel_left_exactly() {
        // pool names only matter once they exceed the network names by POOL_NAME_EXTRA
        let nets = ["network"];
        let base = DashLayout::compute(150, &nets, &["pool"]);
        let threshold = DashLayout::compute(150, &nets, &["n".repeat(7 + 2).as_str()]);
        assert_eq!(threshold.network_x, base.network_x);
        assert_eq!(threshold.shared_name_width, 7);

        for k in 1..20usize {
            let name = "n".repeat(7 + 2 + k);
            let grown = DashLayout::compute(150, &nets, &[name.as_str()]);
            assert_eq!(grown.shared_name_width, 7 + k as i32);
            assert_eq!(grown.network_x, base.network_x - k as i32);
            assert_eq!(grown.vm_width, base.vm_width - k as i32);
        }
    }

    #[test]
    fn test_panels_fit_terminal_width() {
        for width in [60u16, 80, 120, 200] {
            let layout = DashLayout::compute(width, &["default", "isolated"], &["images"]);

            // VM panel: ID, name, STATUS, each followed by a separator
            let vm_extent = (3 + 1) + (layout.resolve(ColumnWidth::VmName) + 1) + (9 + 1);
            assert!(vm_extent < layout.network_x);

            // network panel: NET, STATUS, A, P
            let net_extent = (layout.shared_name_width + 1) + (8 + 1) + (1 + 1) + (1 + 1);
            assert!(layout.network_x + net_extent <= i32::from(width));

            // pool panel: POOL, STATUS, A
            let pool_extent = (layout.shared_name_width + POOL_NAME_EXTRA + 1) + (8 + 1) + (1 + 1);
            assert!(layout.network_x + pool_extent <= i32::from(width));
        }
    }

    #[test]
    fn test_degenerate_terminal_goes_negative() {
        let layout = DashLayout::compute(5, &["default"], &[]);
        assert!(layout.network_x < 0);
        assert!(layout.vm_width < 0);
    }
}
