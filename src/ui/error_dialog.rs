use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::Theme;
use crate::config::{DialogAction, KeyResolver};
use crate::ui::{Component, EventResult, Result};

pub enum ErrorDialogEvent {
    /// The last pending error was dismissed.
    Dismissed,
}

/// Popup for failures of the app itself (key handling, background tasks).
///
/// Errors that arrive while the popup is open are stacked; each dismiss
/// removes the newest one.
pub struct ErrorDialog {
    messages: Vec<String>,
    resolver: Arc<KeyResolver>,
}

impl ErrorDialog {
    pub fn new(message: impl Into<String>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            messages: vec![message.into()],
            resolver,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

impl Component for ErrorDialog {
    type Output = ErrorDialogEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.resolver.matches_dialog(&key, DialogAction::Dismiss) {
            return Ok(EventResult::Consumed);
        }
        self.messages.pop();
        Ok(if self.messages.is_empty() {
            ErrorDialogEvent::Dismissed.into()
        } else {
            EventResult::Consumed
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(message) = self.messages.last() else {
            return;
        };
        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Percentage(40));
        frame.render_widget(Clear, popup_area);

        let title = match self.messages.len() {
            1 => " Error ".to_string(),
            n => format!(" Error (1 of {n}) "),
        };
        let hint = format!(
            "{} to dismiss",
            self.resolver.display_dialog(DialogAction::Dismiss)
        );
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(message.as_str(), Style::default().fg(theme.text()))),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(theme.overlay1()))),
        ];

        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(theme.red()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.red()))
            .style(Style::default().bg(theme.base()));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            popup_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::buffer_contains;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_stacked_errors_dismiss_newest_first() {
        let mut dialog = ErrorDialog::new("first", Arc::new(KeyResolver::default()));
        dialog.push("second");

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| dialog.render(f, f.area(), &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(buffer, "Error (1 of 2)"));
        assert!(buffer_contains(buffer, "second"));
        assert!(buffer_contains(buffer, "Enter/Esc/q to dismiss"));

        let result = dialog.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(matches!(result, EventResult::Consumed));
        let result = dialog.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(result, EventResult::Event(ErrorDialogEvent::Dismissed)));
    }

    #[test]
    fn test_other_keys_are_swallowed() {
        let mut dialog = ErrorDialog::new("boom", Arc::new(KeyResolver::default()));
        let result = dialog.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert!(matches!(result, EventResult::Consumed));
    }
}
