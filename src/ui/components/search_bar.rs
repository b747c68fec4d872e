use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;
use crate::config::{KeyResolver, SearchAction};
use crate::ui::{Component, EventResult, Result};

pub enum SearchBarEvent {
    /// The text changed; carries the full new value.
    Changed(String),
    /// Focus left the bar. The text is kept.
    Left,
}

/// Single-line search input that reports every edit.
///
/// The bar only takes keys while focused. The cursor is a char index, so
/// multibyte input is edited correctly.
pub struct SearchBar {
    value: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
    hint: Option<String>,
    resolver: Arc<KeyResolver>,
}

impl SearchBar {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            placeholder: "Search".to_string(),
            hint: None,
            resolver,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub const fn focus(&mut self) {
        self.focused = true;
    }

    pub const fn blur(&mut self) {
        self.focused = false;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, c);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.value.remove(offset);
        true
    }

    fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.value.remove(offset);
        true
    }

    fn delete_word_before_cursor(&mut self) -> bool {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != ' ' {
            start -= 1;
        }
        if start == self.cursor {
            return false;
        }
        let (from, to) = (self.byte_offset(start), self.byte_offset(self.cursor));
        self.value.drain(from..to);
        self.cursor = start;
        true
    }

    fn clear_line(&mut self) -> bool {
        if self.value.is_empty() {
            return false;
        }
        self.value.clear();
        self.cursor = 0;
        true
    }

    /// Insert pasted text at the cursor. Line breaks are dropped.
    pub fn paste(&mut self, text: &str) -> EventResult<SearchBarEvent> {
        if !self.focused {
            return EventResult::Ignored;
        }
        let mut changed = false;
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
            changed = true;
        }
        self.changed(changed)
    }

    fn changed(&self, changed: bool) -> EventResult<SearchBarEvent> {
        if changed {
            SearchBarEvent::Changed(self.value.clone()).into()
        } else {
            EventResult::Consumed
        }
    }
}

impl Component for SearchBar {
    type Output = SearchBarEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.focused {
            return Ok(EventResult::Ignored);
        }

        if self.resolver.matches_search(&key, SearchAction::Leave) {
            self.blur();
            return Ok(SearchBarEvent::Left.into());
        }

        Ok(match (key.code, key.modifiers) {
            (KeyCode::Backspace, KeyModifiers::ALT)
            | (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                let changed = self.delete_word_before_cursor();
                self.changed(changed)
            }
            (KeyCode::Backspace, _) => {
                let changed = self.delete_before_cursor();
                self.changed(changed)
            }
            (KeyCode::Delete, _) => {
                let changed = self.delete_at_cursor();
                self.changed(changed)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = self.clear_line();
                self.changed(changed)
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                EventResult::Consumed
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                EventResult::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                EventResult::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.len();
                EventResult::Consumed
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                self.changed(true)
            }
            // A focused input swallows everything else.
            _ => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let input_style = Style::default().fg(theme.text());
        let cursor_style = Style::default()
            .fg(theme.base())
            .bg(theme.text())
            .add_modifier(Modifier::BOLD);
        let placeholder_style = Style::default().fg(theme.overlay0());

        let mut spans = vec![Span::styled("🔍 ", Style::default().fg(theme.subtext0()))];
        if self.value.is_empty() {
            if self.focused {
                spans.push(Span::styled(" ", cursor_style));
            }
            spans.push(Span::styled(self.placeholder.clone(), placeholder_style));
        } else if self.focused {
            let before: String = self.value.chars().take(self.cursor).collect();
            let mut rest = self.value.chars().skip(self.cursor);
            let at = rest.next().unwrap_or(' ');
            let after: String = rest.collect();
            spans.push(Span::styled(before, input_style));
            spans.push(Span::styled(at.to_string(), cursor_style));
            spans.push(Span::styled(after, input_style));
        } else {
            spans.push(Span::styled(self.value.clone(), input_style));
        }

        let border_color = if self.focused {
            theme.border_focused()
        } else {
            theme.border()
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        if let Some(hint) = &self.hint {
            block = block
                .title_bottom(Line::from(format!(" {hint} ")).right_aligned())
                .title_style(Style::default().fg(theme.overlay1()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
