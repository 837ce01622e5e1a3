//! Color palette for the dashboard.
//!
//! A table cell is in one of four tones depending on whether its row is
//! selected and whether it is grayed out. Each tone maps to a fixed
//! foreground/background pair through [`Palette::cell`].

use ratatui::style::{Color, Style};

/// Display tone of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellTone {
    /// Healthy, not selected
    Default,
    /// Unhealthy row in a grayable column
    Grayed,
    /// Row under the cursor
    Selected,
    /// Both of the above
    GrayedSelected,
}

impl CellTone {
    /// Tone for a (grayed, selected) pair.
    pub fn from_flags(grayed: bool, selected: bool) -> Self {
        match (grayed, selected) {
            (false, false) => CellTone::Default,
            (true, false) => CellTone::Grayed,
            (false, true) => CellTone::Selected,
            (true, true) => CellTone::GrayedSelected,
        }
    }
}

/// Colors used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Text on header and selection backgrounds
    pub ink: Color,
    /// Dimmed text of unhealthy rows
    pub gray: Color,
    /// Background of the selected row and of the help bar
    pub select_bg: Color,
    /// Background of header rows
    pub header_bg: Color,
    /// Background of the stale-data indicator
    pub warning_bg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ink: Color::Black,
            gray: Color::DarkGray,
            select_bg: Color::Cyan,
            header_bg: Color::Green,
            warning_bg: Color::Yellow,
        }
    }
}

impl Palette {
    /// Style of a table cell in the given tone.
    pub fn cell(&self, tone: CellTone) -> Style {
        match tone {
            CellTone::Default => Style::default(),
            CellTone::Grayed => Style::default().fg(self.gray),
            CellTone::Selected => Style::default().fg(self.ink).bg(self.select_bg),
            CellTone::GrayedSelected => Style::default().fg(self.gray).bg(self.select_bg),
        }
    }

    /// Style of a header row.
    pub fn header(&self) -> Style {
        Style::default().fg(self.ink).bg(self.header_bg)
    }

    /// Style of the help bar labels and background.
    pub fn help_bar(&self) -> Style {
        self.cell(CellTone::Selected)
    }

    /// Style of the hotkey names on the help bar.
    pub fn help_key(&self) -> Style {
        Style::default().fg(Color::Reset).bg(Color::Reset)
    }

    /// Style of the stale-data indicator.
    pub fn warning(&self) -> Style {
        Style::default().fg(self.ink).bg(self.warning_bg)
    }
}
