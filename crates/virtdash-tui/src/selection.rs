//! Active panel and cursor row.
//!
//! The cursor is kept inside `[0, max(0, size - 1)]` of the active panel's
//! collection after every key and every refresh. An empty collection leaves
//! the cursor at 0 with no row selected.

use virtdash_core::{LifecycleAction, ResourceKind};

use crate::event::AppEvent;

/// Collection sizes indexed by [`ResourceKind::index`].
pub type PanelSizes = [usize; 3];

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing beyond redrawing
    None,
    /// Apply an action to row `row` of a panel
    Dispatch {
        action: LifecycleAction,
        kind: ResourceKind,
        row: usize,
    },
    /// Leave the loop
    Halt,
}

/// Cursor state, persisted across refreshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    panel: ResourceKind,
    row: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel with the cursor.
    pub fn panel(&self) -> ResourceKind {
        self.panel
    }

    /// Cursor row, meaningful only when the active collection is non-empty.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Pull the cursor back inside the active collection.
    pub fn clamp(&mut self, sizes: PanelSizes) {
        let size = sizes[self.panel.index()];
        self.row = self.row.min(size.saturating_sub(1));
    }

    /// The highlighted row of `kind`, if any.
    pub fn selected_row(&self, kind: ResourceKind, sizes: PanelSizes) -> Option<usize> {
        (kind == self.panel && self.row < sizes[kind.index()]).then_some(self.row)
    }

    /// Apply one event.
    pub fn handle(&mut self, event: AppEvent, sizes: PanelSizes) -> Transition {
        match event {
            AppEvent::NextPanel => {
                self.panel = self.panel.next();
                self.clamp(sizes);
                Transition::None
            }
            AppEvent::NavigateUp => {
                self.row = self.row.saturating_sub(1);
                self.clamp(sizes);
                Transition::None
            }
            AppEvent::NavigateDown => {
                self.row = self.row.saturating_add(1);
                self.clamp(sizes);
                Transition::None
            }
            AppEvent::Start => self.dispatch(LifecycleAction::Start, sizes),
            AppEvent::Stop => self.dispatch(LifecycleAction::Stop, sizes),
            AppEvent::Quit => Transition::Halt,
            AppEvent::None => Transition::None,
        }
    }

    fn dispatch(&self, action: LifecycleAction, sizes: PanelSizes) -> Transition {
        match self.selected_row(self.panel, sizes) {
            Some(row) => Transition::Dispatch {
                action,
                kind: self.panel,
                row,
            },
            None => Transition::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_vm_panel() {
        let selection = Selection::new();
        assert_eq!(selection.panel(), ResourceKind::Vm);
        assert_eq!(selection.row(), 0);
    }

    #[test]
    fn test_tab_cycles_all_panels() {
        let sizes = [2, 2, 2];
        for start in 0..3 {
            let mut selection = Selection::new();
            for _ in 0..start {
                selection.handle(AppEvent::NextPanel, sizes);
            }
            let origin = selection.panel();

            let mut seen = Vec::new();
            for _ in 0..3 {
                selection.handle(AppEvent::NextPanel, sizes);
                seen.push(selection.panel().index());
            }
            assert_eq!(selection.panel(), origin);
            seen.sort_unstable();
            assert_eq!(seen, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_tab_reclamps_row() {
        let mut selection = Selection::new();
        let sizes = [5, 2, 0];
        for _ in 0..4 {
            selection.handle(AppEvent::NavigateDown, sizes);
        }
        assert_eq!(selection.row(), 4);

        selection.handle(AppEvent::NextPanel, sizes);
        assert_eq!(selection.row(), 1);
        selection.handle(AppEvent::NextPanel, sizes);
        assert_eq!(selection.row(), 0);
        assert_eq!(selection.selected_row(ResourceKind::Pool, sizes), None);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        for size in 0..6usize {
            let sizes = [size, 0, 0];
            let mut selection = Selection::new();
            let moves = [
                AppEvent::NavigateUp,
                AppEvent::NavigateDown,
                AppEvent::NavigateDown,
                AppEvent::NavigateDown,
                AppEvent::NavigateDown,
                AppEvent::NavigateDown,
                AppEvent::NavigateDown,
                AppEvent::NavigateUp,
                AppEvent::NavigateUp,
                AppEvent::NavigateUp,
                AppEvent::NavigateUp,
                AppEvent::NavigateUp,
                AppEvent::NavigateUp,
                AppEvent::NavigateUp,
            ];
            for event in moves {
                selection.handle(event, sizes);
                assert!(selection.row() <= size.saturating_sub(1));
            }
            assert_eq!(selection.row(), 0);
        }
    }

    #[test]
    fn test_down_stops_at_last_row() {
        let mut selection = Selection::new();
        let sizes = [3, 0, 0];
        for _ in 0..10 {
            selection.handle(AppEvent::NavigateDown, sizes);
        }
        assert_eq!(selection.row(), 2);
        assert_eq!(selection.selected_row(ResourceKind::Vm, sizes), Some(2));
    }

    #[test]
    fn test_clamp_after_collection_shrinks() {
        let mut selection = Selection::new();
        for _ in 0..3 {
            selection.handle(AppEvent::NavigateDown, [4, 0, 0]);
        }
        assert_eq!(selection.row(), 3);

        selection.clamp([2, 0, 0]);
        assert_eq!(selection.row(), 1);
        selection.clamp([0, 0, 0]);
        assert_eq!(selection.row(), 0);
    }

    #[test]
    fn test_selected_row_only_on_active_panel() {
        let selection = Selection::new();
        let sizes = [1, 1, 1];
        assert_eq!(selection.selected_row(ResourceKind::Vm, sizes), Some(0));
        assert_eq!(selection.selected_row(ResourceKind::Network, sizes), None);
        assert_eq!(selection.selected_row(ResourceKind::Pool, sizes), None);
    }

    #[test]
    fn test_actions_dispatch_selected_row() {
        let mut selection = Selection::new();
        let sizes = [3, 0, 0];
        selection.handle(AppEvent::NavigateDown, sizes);

        assert_eq!(
            selection.handle(AppEvent::Start, sizes),
            Transition::Dispatch {
                action: LifecycleAction::Start,
                kind: ResourceKind::Vm,
                row: 1
            }
        );
        assert_eq!(
            selection.handle(AppEvent::Stop, sizes),
            Transition::Dispatch {
                action: LifecycleAction::Stop,
                kind: ResourceKind::Vm,
                row: 1
            }
        );
        assert_eq!(selection.row(), 1);
    }

    #[test]
    fn test_actions_on_empty_panel_do_nothing() {
        let mut selection = Selection::new();
        let sizes = [0, 2, 2];
        assert_eq!(selection.handle(AppEvent::Start, sizes), Transition::None);
        assert_eq!(selection.handle(AppEvent::Stop, sizes), Transition::None);
    }

    #[test]
    fn test_quit_halts() {
        let mut selection = Selection::new();
        assert_eq!(selection.handle(AppEvent::Quit, [0, 0, 0]), Transition::Halt);
        assert_eq!(selection.handle(AppEvent::None, [0, 0, 0]), Transition::None);
    }
}
