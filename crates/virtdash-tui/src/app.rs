//! Main application state and event loop for the dashboard.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use tracing::{debug, info, warn};
use virtdash_core::{Collection, DashError, LifecycleAction, ResourceItem, ResourceKind, Result, log_resource_event};
use virtdash_source::DataSource;

use crate::event::{AppEvent, InputHandler};
use crate::layout::DashLayout;
use crate::panel::{HelpBar, PanelSpec, TablePanel};
use crate::selection::{PanelSizes, Selection, Transition};
use crate::theme::Palette;

/// Default wait for a key before refreshing.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

fn terminal_error(e: io::Error) -> DashError {
    DashError::TerminalInit {
        message: e.to_string(),
    }
}

/// Run the terminal setup steps that follow raw mode. If any of them
/// fails, `undo` runs before the error is returned.
fn setup_or_undo<T>(setup: impl FnOnce() -> io::Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().map_err(|e| {
        undo();
        terminal_error(e)
    })
}

/// Best-effort return to cooked mode and the main screen.
fn leave_raw_mode() {
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    );
}

/// Fetch and sort all three collections. Any failure discards the lot.
fn fetch_snapshot<S: DataSource>(source: &mut S) -> Result<[Collection; 3]> {
    let mut snapshot: [Collection; 3] = Default::default();
    for kind in ResourceKind::ALL {
        let mut items = source.list(kind)?;
        PanelSpec::for_kind(kind).sort(&mut items);
        snapshot[kind.index()] = items;
    }
    Ok(snapshot)
}

/// Main application state.
pub struct App<S: DataSource> {
    source: S,
    /// Last good listing per kind, in display order
    snapshot: [Collection; 3],
    selection: Selection,
    input_handler: InputHandler,
    palette: Palette,
    poll_interval: Duration,
    /// Local time of the last good listing
    last_refresh: DateTime<Local>,
    /// Error of the failing refresh, while the snapshot is out of date
    stale: Option<String>,
    should_quit: bool,
}

impl<S: DataSource> App<S> {
    /// Create the app and take the first snapshot.
    ///
    /// Unlike later refreshes, a failure here is returned to the caller.
    pub fn initialize(mut source: S, poll_interval: Duration) -> Result<Self> {
        let snapshot = fetch_snapshot(&mut source)?;
        info!(
            vms = snapshot[0].len(),
            networks = snapshot[1].len(),
            pools = snapshot[2].len(),
            "initial snapshot loaded"
        );

        let mut app = Self {
            source,
            snapshot,
            selection: Selection::new(),
            input_handler: InputHandler::new(),
            palette: Palette::default(),
            poll_interval,
            last_refresh: Local::now(),
            stale: None,
            should_quit: false,
        };
        app.selection.clamp(app.sizes());
        Ok(app)
    }

    /// Number of items per panel.
    pub fn sizes(&self) -> PanelSizes {
        [
            self.snapshot[0].len(),
            self.snapshot[1].len(),
            self.snapshot[2].len(),
        ]
    }

    /// Items of one panel, in display order.
    pub fn items(&self, kind: ResourceKind) -> &[ResourceItem] {
        &self.snapshot[kind.index()]
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns true while the shown data is older than the last poll.
    pub fn is_stale(&self) -> bool {
        self.stale.is_some()
    }

    /// Re-fetch all collections.
    ///
    /// On failure the previous snapshot stays on screen and the app is
    /// marked stale. Returns whether the fetch succeeded.
    pub fn refresh(&mut self) -> bool {
        match fetch_snapshot(&mut self.source) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.selection.clamp(self.sizes());
                self.last_refresh = Local::now();
                if let Some(error) = self.stale.take() {
                    info!(previous_error = %error, "data source recovered");
                }
                true
            }
            Err(e) => {
                if self.stale.is_none() {
                    warn!(error = %e, "refresh failed, keeping previous snapshot");
                } else {
                    debug!(error = %e, "refresh still failing");
                }
                self.stale = Some(e.to_string());
                false
            }
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: crossterm::event::KeyEvent) {
        let event = self.input_handler.handle_key(key);
        self.step(event);
    }

    /// One loop iteration after input: apply the event, then refresh
    /// unless the operator quit.
    pub fn step(&mut self, event: AppEvent) {
        self.handle_app_event(event);
        if !self.should_quit {
            self.refresh();
        }
    }

    /// Apply an event to the selection and dispatch any resulting action.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match self.selection.handle(event, self.sizes()) {
            Transition::None => {}
            Transition::Dispatch { action, kind, row } => self.dispatch(action, kind, row),
            Transition::Halt => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Run an action against the source. Failures are logged, never raised.
    fn dispatch(&mut self, action: LifecycleAction, kind: ResourceKind, row: usize) {
        let Some(item) = self.snapshot[kind.index()].get(row).cloned() else {
            return;
        };

        match self.source.apply(kind, action, &item) {
            Ok(()) => log_resource_event!(kind.noun(), item.name.as_str(), action.verb()),
            Err(e) => {
                warn!(kind = kind.noun(), name = %item.name, action = action.verb(), error = %e, "action failed");
            }
        }
    }

    /// Text of the stale indicator, if shown.
    pub fn stale_notice(&self) -> Option<String> {
        self.stale
            .as_ref()
            .map(|_| format!("STALE since {}", self.last_refresh.format("%H:%M:%S")))
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let panels = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        let network_names: Vec<&str> = self.snapshot[1].iter().map(|i| i.name.as_str()).collect();
        let pool_names: Vec<&str> = self.snapshot[2].iter().map(|i| i.name.as_str()).collect();
        let layout = DashLayout::compute(area.width, &network_names, &pool_names);
        let sizes = self.sizes();

        for kind in ResourceKind::ALL {
            let panel = TablePanel::new(
                PanelSpec::for_kind(kind),
                &layout,
                &self.snapshot[kind.index()],
                &self.palette,
            )
            .selected(self.selection.selected_row(kind, sizes));
            frame.render_widget(panel, panels);
        }

        let notice = self.stale_notice();
        frame.render_widget(HelpBar::new(&self.palette).notice(notice.as_deref()), area);
    }

    /// Run the main application loop.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode().map_err(terminal_error)?;
        let mut terminal = setup_or_undo(
            || {
                let mut stdout = io::stdout();
                crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
                let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
                terminal.hide_cursor()?;
                Ok(terminal)
            },
            leave_raw_mode,
        )?;

        // Main loop
        let result = self.run_loop(&mut terminal);

        // Restore terminal
        crossterm::terminal::disable_raw_mode().map_err(terminal_error)?;
        crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)
            .map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;

        result
    }

    /// Draw, wait for a key or the poll interval, apply it, refresh.
    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame)).map_err(terminal_error)?;
            let event = self.wait_for_input()?;
            self.step(event);
        }
        Ok(())
    }

    /// Block for at most one poll interval. Timeouts and non-key events
    /// come back as [`AppEvent::None`].
    fn wait_for_input(&mut self) -> Result<AppEvent> {
        if !event::poll(self.poll_interval).map_err(terminal_error)? {
            return Ok(AppEvent::None);
        }
        match event::read().map_err(terminal_error)? {
            Event::Key(key) => Ok(self.input_handler.handle_key(key)),
            _ => Ok(AppEvent::None),
        }
    }
}
