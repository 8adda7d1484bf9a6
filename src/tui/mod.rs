//! Interactive terminal chart of the demand table.
//!
//! Feature-gated behind `tui`. The CLI opens it after a run unless
//! `--no-plot` is given or stdout is not a terminal.

mod controls;
mod layout;
mod style;
/// Chart window and series visibility state.
pub mod viewer;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::table::DemandTable;
use viewer::PlotViewer;

/// Input poll interval.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Shows every column of `table` and blocks until the user quits.
///
/// Sets up the terminal (raw mode, alternate screen), runs the event loop,
/// and restores the terminal on exit, also when drawing fails.
///
/// # Errors
///
/// Returns an `io::Error` if the terminal cannot be set up or drawn to.
pub fn show(table: &DemandTable) -> io::Result<()> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e);
        }
    };

    let mut viewer = PlotViewer::new(table);
    let result = event_loop(&mut terminal, &mut viewer);

    // Teardown: always restore terminal state
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

/// Core event loop: draw, then wait for input.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    viewer: &mut PlotViewer,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, viewer))?;

        if viewer.quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(viewer, key);
            }
        }
    }
}
