//! ROM list widget for the selector screen

use crate::library::ContentEntry;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// List of every ROM in the catalog with the cursor entry highlighted
pub struct CatalogList<'a> {
    entries: &'a [ContentEntry],
    cursor: usize,
    theme: &'a Theme,
    title: String,
}

impl<'a> CatalogList<'a> {
    /// Create a new catalog list widget
    #[must_use]
    pub fn new(entries: &'a [ContentEntry], cursor: usize, theme: &'a Theme) -> Self {
        let title = format!(" Select a ROM ({}) ", entries.len());
        Self {
            entries,
            cursor,
            theme,
            title,
        }
    }

    /// First visible row so the cursor stays on screen
    fn scroll_offset(&self, visible_height: usize) -> usize {
        if visible_height == 0 {
            return 0;
        }
        (self.cursor + 1).saturating_sub(visible_height)
    }

    fn render_item(&self, entry: &'a ContentEntry, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let line = Line::from(vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(entry.title(), text_style),
            Span::raw("  "),
            Span::styled(entry.identifier(), self.theme.path_style()),
        ]);

        if is_cursor {
            ListItem::new(line).style(self.theme.selected_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl Widget for CatalogList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let visible_height = inner.height as usize;
        let start = self.scroll_offset(visible_height);
        let end = (start + visible_height).min(self.entries.len());

        let items: Vec<ListItem> = (start..end)
            .filter_map(|idx| {
                let entry = self.entries.get(idx)?;
                Some(self.render_item(entry, idx == self.cursor))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entries(n: usize) -> Vec<ContentEntry> {
        let exts = vec!["3ds".to_string()];
        (0..n)
            .filter_map(|i| ContentEntry::from_path(PathBuf::from(format!("/r/Game{i}.3ds")), &exts))
            .collect()
    }

    fn render(entries: &[ContentEntry], cursor: usize, height: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, height);
        let mut buf = Buffer::empty(area);
        CatalogList::new(entries, cursor, &theme).render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_lists_all_entries() {
        let entries = entries(3);
        let text = render(&entries, 0, 10);
        assert!(text.contains("Select a ROM (3)"));
        assert!(text.contains("> Game0"));
        assert!(text.contains("Game1.3ds"));
        assert!(text.contains("Game2"));
    }

    #[test]
    fn test_scrolls_to_cursor() {
        let entries = entries(20);
        // 3 visible rows inside the border
        let text = render(&entries, 15, 5);
        assert!(text.contains("> Game15"));
        assert!(!text.contains("Game0 "));
    }

    #[test]
    fn test_scroll_offset() {
        let entries = entries(10);
        let theme = Theme::default();
        let list = CatalogList::new(&entries, 7, &theme);
        assert_eq!(list.scroll_offset(5), 3);
        assert_eq!(list.scroll_offset(10), 0);
        assert_eq!(list.scroll_offset(0), 0);
    }
}
