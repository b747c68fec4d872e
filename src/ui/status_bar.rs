use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::Keybinding;

/// One-line footer: app name and endpoint on the left, key hints on the right.
pub struct StatusBar {
    endpoint: String,
    running_tasks: usize,
}

impl StatusBar {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            running_tasks: 0,
        }
    }

    pub const fn set_running_tasks(&mut self, running_tasks: usize) {
        self.running_tasks = running_tasks;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, keybindings: &[Keybinding]) {
        let [status_area, hints_area] =
            Layout::horizontal([Constraint::Length(48), Constraint::Min(10)]).areas(area);

        let mut status = vec![
            Span::styled(
                " holotable ",
                Style::default()
                    .fg(theme.base())
                    .bg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(self.endpoint.clone(), Style::default().fg(theme.subtext0())),
        ];
        if self.running_tasks > 0 {
            status.push(Span::styled(
                format!("  ⟳ {}", self.running_tasks),
                Style::default().fg(theme.yellow()),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(status)), status_area);

        let key_style = Style::default().fg(theme.peach()).add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.overlay1());
        let hints: Vec<Span> = keybindings
            .iter()
            .filter(|kb| kb.hint)
            .flat_map(|kb| {
                [
                    Span::styled(kb.key.clone(), key_style),
                    Span::styled(format!(" {}  ", kb.description), desc_style),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(hints)).right_aligned(), hints_area);
    }
}
