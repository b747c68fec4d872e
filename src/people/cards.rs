use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;
use crate::people::tally::Tally;
use crate::ui::Component;

/// Three count cards above the table.
#[derive(Default)]
pub struct SummaryCards {
    tally: Tally,
}

impl SummaryCards {
    pub const fn set_tally(&mut self, tally: Tally) {
        self.tally = tally;
    }

    fn card(frame: &mut Frame, area: Rect, title: &str, value: String, color: Color, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Line::from(format!(" {title} ")).centered())
            .title_style(Style::default().fg(theme.subtext1()));
        let value = Paragraph::new(value)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(value, area);
    }
}

impl Component for SummaryCards {
    type Output = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [total, droids, humans] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(area);
        let tally = self.tally;

        Self::card(frame, total, "Total Result", tally.total_count.to_string(), theme.red(), theme);
        Self::card(frame, droids, "Total Droid", tally.droid_count.to_string(), theme.green(), theme);
        Self::card(frame, humans, "Total Human", tally.human_count.to_string(), theme.blue(), theme);
    }
}
