//! Event handling for the ratatui TUI
//!
//! Maps crossterm keyboard and mouse events to backend-neutral [`UiEvent`]s.

use crate::ui::types::UiEvent;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Map a key press to a UI event
#[must_use]
pub fn map_key(key: KeyEvent) -> UiEvent {
    // Windows terminals also report releases
    if key.kind == KeyEventKind::Release {
        return UiEvent::Other;
    }

    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _)
        | (KeyCode::Char('c' | 'q'), KeyModifiers::CONTROL)
        | (KeyCode::Char('q'), KeyModifiers::NONE) => UiEvent::Quit,

        (KeyCode::Enter | KeyCode::Char(' '), _) => UiEvent::Confirm,

        // Navigation
        (KeyCode::Up | KeyCode::Left | KeyCode::Char('k'), _) => UiEvent::MovePrevious,
        (KeyCode::Down | KeyCode::Right | KeyCode::Char('j'), _) => UiEvent::MoveNext,

        _ => UiEvent::Other,
    }
}

/// Map mouse events; only the wheel moves the selection
#[must_use]
pub fn map_mouse(mouse: MouseEvent) -> UiEvent {
    match mouse.kind {
        MouseEventKind::ScrollUp => UiEvent::MovePrevious,
        MouseEventKind::ScrollDown => UiEvent::MoveNext,
        _ => UiEvent::Other,
    }
}

/// Map any terminal event
#[must_use]
pub fn map_event(event: Event) -> UiEvent {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => UiEvent::Other,
    }
}

/// Read one pending terminal event without blocking
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_pending() -> std::io::Result<Option<UiEvent>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    Ok(Some(map_event(event::read()?)))
}
