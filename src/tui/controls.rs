//! Keyboard input handling for the chart.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::viewer::PlotViewer;

/// Maps a key event to a viewer action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(viewer: &mut PlotViewer, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => viewer.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => viewer.quit = true,
        KeyCode::Left | KeyCode::Char('h') => viewer.pan_left(),
        KeyCode::Right | KeyCode::Char('l') => viewer.pan_right(),
        KeyCode::Char('+' | '=') | KeyCode::Up => viewer.zoom_in(),
        KeyCode::Char('-') | KeyCode::Down => viewer.zoom_out(),
        KeyCode::Home => viewer.reset(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(i) = c.to_digit(10) {
                viewer.toggle_series(i as usize - 1);
            }
        }
        _ => {}
    }
}
