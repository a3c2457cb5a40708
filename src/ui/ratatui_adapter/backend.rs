//! Ratatui implementation of [`UiBackend`]
//!
//! Each modal state gets its own terminal session: raw mode and the
//! alternate screen are entered in `open` and left in `close`.

use super::events::poll_pending;
use super::theme::Theme;
use super::widgets::{AlertDialog, CatalogList, HelpBar, KeyHint};
use crate::ui::error::{Result, UiError};
use crate::ui::traits::UiBackend;
use crate::ui::types::{Screen, UiEvent};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
};
use std::io::{self, Stdout};

/// Terminal frontend for the launch screens
pub struct RatatuiBackend {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    theme: Theme,
    hints: Vec<KeyHint>,
}

impl RatatuiBackend {
    /// Create a new terminal backend; nothing is touched until `open`
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminal: None,
            theme: Theme::default(),
            hints: HelpBar::selector_hints(),
        }
    }

    /// Whether a terminal session is currently open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.terminal.is_some()
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn draw(frame: &mut Frame, screen: &Screen<'_>, theme: &Theme, hints: &[KeyHint]) {
        let area = frame.area();
        match screen {
            Screen::Selector { entries, cursor } => {
                let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
                frame.render_widget(CatalogList::new(entries, *cursor, theme), chunks[0]);
                frame.render_widget(HelpBar::new(hints, theme), chunks[1]);
            }
            Screen::RetryableAlert { message } => {
                frame.render_widget(AlertDialog::retryable(message, theme), area);
            }
            Screen::FatalAlert { message } => {
                frame.render_widget(AlertDialog::fatal(message, theme), area);
            }
        }
    }
}

impl Default for RatatuiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl UiBackend for RatatuiBackend {
    fn open(&mut self) -> Result<()> {
        if self.terminal.is_none() {
            self.terminal = Some(Self::setup_terminal()?);
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<UiEvent>> {
        poll_pending().map_err(Into::into)
    }

    fn present(&mut self, screen: &Screen<'_>) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(UiError::Backend("present called without an open session".into()));
        };
        let theme = &self.theme;
        let hints = &self.hints;
        terminal.draw(|frame| Self::draw(frame, screen, theme, hints))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.terminal.take().is_some() {
            Self::cleanup_terminal()?;
        }
        Ok(())
    }
}

impl Drop for RatatuiBackend {
    fn drop(&mut self) {
        // Never leave the user's terminal in raw mode
        if self.terminal.take().is_some() {
            let _ = Self::cleanup_terminal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_starts_closed() {
        let backend = RatatuiBackend::new();
        assert!(!backend.is_open());
    }

    #[test]
    fn test_present_without_session_fails() {
        let mut backend = RatatuiBackend::default();
        let result = backend.present(&Screen::FatalAlert { message: "x" });
        assert!(matches!(result, Err(UiError::Backend(_))));
    }

    #[test]
    fn test_close_without_session_is_noop() {
        let mut backend = RatatuiBackend::new();
        assert!(backend.close().is_ok());
    }
}
