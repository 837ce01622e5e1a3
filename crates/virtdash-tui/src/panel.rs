//! Per-kind panel descriptions and the table widget that draws them.
//!
//! A panel is a header row followed by one row per item. Positions come
//! from [`DashLayout`] and may lie partly or wholly off screen; every write
//! is clipped to the area handed to the widget.

use std::cmp::Ordering;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use virtdash_core::status::{self, bool_glyph};
use virtdash_core::{ResourceItem, ResourceKind};

use crate::layout::{ColumnWidth, DashLayout, POOL_NAME_EXTRA};
use crate::theme::{CellTone, Palette};

/// One column of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Header text
    pub title: &'static str,
    /// Width, resolved per frame
    pub width: ColumnWidth,
    /// Whether the cell dims when its row is unhealthy
    pub grayable: bool,
}

/// Static description of one kind's panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelSpec {
    pub kind: ResourceKind,
    pub columns: &'static [ColumnDef],
    /// Row is drawn normally when true, grayed when false
    pub healthy: fn(&ResourceItem) -> bool,
    /// Cell texts, one per column
    pub cells: fn(&ResourceItem) -> Vec<String>,
    /// Display order
    pub order: fn(&ResourceItem, &ResourceItem) -> Ordering,
}

const VM_COLUMNS: &[ColumnDef] = &[
    ColumnDef { title: "ID", width: ColumnWidth::Fixed(3), grayable: false },
    ColumnDef { title: "VM", width: ColumnWidth::VmName, grayable: true },
    ColumnDef { title: "STATUS", width: ColumnWidth::Fixed(9), grayable: false },
];

const NETWORK_COLUMNS: &[ColumnDef] = &[
    ColumnDef { title: "NET", width: ColumnWidth::SharedName { extra: 0 }, grayable: true },
    ColumnDef { title: "STATUS", width: ColumnWidth::Fixed(8), grayable: false },
    ColumnDef { title: "A", width: ColumnWidth::Fixed(1), grayable: false },
    ColumnDef { title: "P", width: ColumnWidth::Fixed(1), grayable: false },
];

const POOL_COLUMNS: &[ColumnDef] = &[
    ColumnDef { title: "POOL", width: ColumnWidth::SharedName { extra: POOL_NAME_EXTRA }, grayable: true },
    ColumnDef { title: "STATUS", width: ColumnWidth::Fixed(8), grayable: false },
    ColumnDef { title: "A", width: ColumnWidth::Fixed(1), grayable: false },
];

fn vm_healthy(item: &ResourceItem) -> bool {
    status::is_healthy(ResourceKind::Vm, item)
}

fn network_healthy(item: &ResourceItem) -> bool {
    status::is_healthy(ResourceKind::Network, item)
}

fn pool_healthy(item: &ResourceItem) -> bool {
    status::is_healthy(ResourceKind::Pool, item)
}

fn vm_cells(item: &ResourceItem) -> Vec<String> {
    vec![
        item.display_identifier().to_string(),
        item.name.clone(),
        item.state_label.clone(),
    ]
}

fn network_cells(item: &ResourceItem) -> Vec<String> {
    vec![
        item.name.clone(),
        item.state_label.clone(),
        bool_glyph(item.autostart).to_string(),
        bool_glyph(item.persistent).to_string(),
    ]
}

fn pool_cells(item: &ResourceItem) -> Vec<String> {
    vec![
        item.name.clone(),
        item.state_label.clone(),
        bool_glyph(item.autostart).to_string(),
    ]
}

fn vm_order(a: &ResourceItem, b: &ResourceItem) -> Ordering {
    status::compare(ResourceKind::Vm, a, b)
}

fn network_order(a: &ResourceItem, b: &ResourceItem) -> Ordering {
    status::compare(ResourceKind::Network, a, b)
}

fn pool_order(a: &ResourceItem, b: &ResourceItem) -> Ordering {
    status::compare(ResourceKind::Pool, a, b)
}

/// The VM panel.
pub const VM_PANEL: PanelSpec = PanelSpec {
    kind: ResourceKind::Vm,
    columns: VM_COLUMNS,
    healthy: vm_healthy,
    cells: vm_cells,
    order: vm_order,
};

/// The network panel.
pub const NETWORK_PANEL: PanelSpec = PanelSpec {
    kind: ResourceKind::Network,
    columns: NETWORK_COLUMNS,
    healthy: network_healthy,
    cells: network_cells,
    order: network_order,
};

/// The storage pool panel.
pub const POOL_PANEL: PanelSpec = PanelSpec {
    kind: ResourceKind::Pool,
    columns: POOL_COLUMNS,
    healthy: pool_healthy,
    cells: pool_cells,
    order: pool_order,
};

impl PanelSpec {
    /// The panel description for a kind.
    pub fn for_kind(kind: ResourceKind) -> &'static PanelSpec {
        match kind {
            ResourceKind::Vm => &VM_PANEL,
            ResourceKind::Network => &NETWORK_PANEL,
            ResourceKind::Pool => &POOL_PANEL,
        }
    }

    /// Sort a collection into display order.
    pub fn sort(&self, items: &mut [ResourceItem]) {
        items.sort_by(self.order);
    }

    /// Column widths for this frame, negative widths clamped to zero.
    pub fn widths(&self, layout: &DashLayout) -> Vec<i32> {
        self.columns
            .iter()
            .map(|col| layout.resolve(col.width).max(0))
            .collect()
    }
}

/// Write `text` at (`x`, `y`), at most `width` cells, clipped to `area`.
pub(crate) fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, width: i32, style: Style) {
    let (left, top) = (i32::from(area.left()), i32::from(area.top()));
    let (right, bottom) = (i32::from(area.right()), i32::from(area.bottom()));
    if width <= 0 || y < top || y >= bottom || x >= right || x + width <= left {
        return;
    }

    let skip = (left - x).max(0);
    let x = x + skip;
    let width = (width - skip).min(right - x);
    let text: String = text.chars().skip(skip as usize).collect();

    // Coordinates are inside `area` here, so they fit in u16.
    buf.set_stringn(x as u16, y as u16, text, width as usize, style);
}

/// Fill `width` cells at (`x`, `y`) with the background of `style`.
pub(crate) fn fill(buf: &mut Buffer, area: Rect, x: i32, y: i32, width: i32, style: Style) {
    if width > 0 {
        put(buf, area, x, y, &" ".repeat(width as usize), width, style);
    }
}

/// Table widget for one panel.
pub struct TablePanel<'a> {
    spec: &'a PanelSpec,
    layout: &'a DashLayout,
    items: &'a [ResourceItem],
    palette: &'a Palette,
    selected: Option<usize>,
}

impl<'a> TablePanel<'a> {
    /// Create a panel with no selected row.
    pub fn new(
        spec: &'a PanelSpec,
        layout: &'a DashLayout,
        items: &'a [ResourceItem],
        palette: &'a Palette,
    ) -> Self {
        Self {
            spec,
            layout,
            items,
            palette,
            selected: None,
        }
    }

    /// Set the highlighted row.
    pub fn selected(mut self, row: Option<usize>) -> Self {
        self.selected = row;
        self
    }
}

impl Widget for TablePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (x, y) = self.layout.origin(self.spec.kind);
        let widths = self.spec.widths(self.layout);
        let total: i32 = widths.iter().map(|w| w + 1).sum();

        let header = self.palette.header();
        fill(buf, area, x, y, total, header);
        let mut offset = 0;
        for (col, width) in self.spec.columns.iter().zip(&widths) {
            // Titles may spill into the column gap but not past the panel.
            let room = (total - offset).min(col.title.len() as i32);
            put(buf, area, x + offset, y, col.title, room, header);
            offset += width + 1;
        }

        for (i, item) in self.items.iter().enumerate() {
            let row_y = y + 1 + i as i32;
            if row_y >= i32::from(area.bottom()) {
                break;
            }
            let selected = self.selected == Some(i);
            if selected {
                fill(buf, area, x, row_y, total, self.palette.cell(CellTone::Selected));
            }

            let grayed_row = !(self.spec.healthy)(item);
            let cells = (self.spec.cells)(item);
            let mut offset = 0;
            for ((col, width), text) in self.spec.columns.iter().zip(&widths).zip(&cells) {
                let tone = CellTone::from_flags(grayed_row && col.grayable, selected);
                put(buf, area, x + offset, row_y, text, *width, self.palette.cell(tone));
                offset += width + 1;
            }
        }
    }
}

/// Hotkeys and labels on the help bar, left to right.
pub const HELP_ENTRIES: [(&str, &str); 4] = [("TAB", "Next"), ("F1", "Start"), ("F2", "Stop"), ("F10", "Quit")];

/// Bottom-row key legend, with an optional stale-data notice on the right.
pub struct HelpBar<'a> {
    palette: &'a Palette,
    notice: Option<&'a str>,
}

impl<'a> HelpBar<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette, notice: None }
    }

    /// Show a right-aligned notice.
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let y = i32::from(area.bottom()) - 1;
        let left = i32::from(area.left());
        let width = i32::from(area.width);
        fill(buf, area, left, y, width, self.palette.help_bar());

        let step = HELP_ENTRIES.iter().map(|(_, label)| label.len()).max().unwrap_or(0) as i32 + 1;
        let mut offset = left;
        for (key, label) in HELP_ENTRIES {
            let key_len = key.len() as i32;
            put(buf, area, offset, y, key, key_len, self.palette.help_key());
            put(buf, area, offset + key_len, y, label, label.len() as i32, self.palette.help_bar());
            offset += key_len + step;
        }

        if let Some(notice) = self.notice {
            let len = notice.chars().count() as i32;
            let x = (i32::from(area.right()) - len).max(offset);
            put(buf, area, x, y, notice, len, self.palette.warning());
        }
    }
}
