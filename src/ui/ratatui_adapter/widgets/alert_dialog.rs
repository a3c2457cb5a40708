//! Alert dialog widget
//!
//! Centered modal used for both the retryable "no ROMs found" alert and the
//! fatal error screen.

use crate::ui::ratatui_adapter::theme::Theme;
use crate::ui::types::HALTED_NOTICE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Which alert is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Waits for an acknowledgement, then the launcher retries
    Retryable,
    /// Terminal; only quitting leaves it
    Fatal,
}

/// Alert overlay widget
pub struct AlertDialog<'a> {
    kind: AlertKind,
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> AlertDialog<'a> {
    #[must_use]
    pub const fn retryable(message: &'a str, theme: &'a Theme) -> Self {
        Self {
            kind: AlertKind::Retryable,
            message,
            theme,
        }
    }

    #[must_use]
    pub const fn fatal(message: &'a str, theme: &'a Theme) -> Self {
        Self {
            kind: AlertKind::Fatal,
            message,
            theme,
        }
    }

    /// Calculate centered area for the modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }

    /// Rows the message needs once wrapped to `width` columns
    #[allow(clippy::cast_possible_truncation)]
    fn wrapped_rows(text: &str, width: u16) -> u16 {
        let width = usize::from(width.max(1));
        text.lines()
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum::<usize>()
            .min(usize::from(u16::MAX)) as u16
    }

    const fn title(&self) -> &'static str {
        match self.kind {
            AlertKind::Retryable => " Attention ",
            AlertKind::Fatal => " Fatal error ",
        }
    }

    const fn help(&self) -> &'static str {
        match self.kind {
            AlertKind::Retryable => "Enter: try again | Esc: quit",
            AlertKind::Fatal => "Esc: quit",
        }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 70.min(area.width.saturating_sub(4)).max(20);
        // borders (2) + horizontal padding (2)
        let text_width = width.saturating_sub(4);
        let message_rows = Self::wrapped_rows(self.message, text_width);
        let notice_rows = match self.kind {
            AlertKind::Retryable => 0,
            AlertKind::Fatal => 2,
        };
        // border + spacing + message + notice + spacing + help + border
        let body_rows = message_rows.saturating_add(notice_rows);
        let height = body_rows.saturating_add(5);

        let modal_area = Self::centered_rect(width, height, area);

        // Clear background
        Clear.render(modal_area, buf);

        let border_style = match self.kind {
            AlertKind::Retryable => self.theme.warning_style(),
            AlertKind::Fatal => self.theme.error_style(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title())
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),                         // Spacing
            Constraint::Length(body_rows),                 // Message (+ notice)
            Constraint::Length(1),                         // Spacing
            Constraint::Length(1),                         // Help
        ])
        .horizontal_margin(1)
        .split(inner);

        let mut lines: Vec<Line> = self.message.lines().map(Line::from).collect();
        if self.kind == AlertKind::Fatal {
            lines.push(Line::from(""));
            lines.push(Line::styled(HALTED_NOTICE, self.theme.error_style()));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        Paragraph::new(self.help())
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}
