use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, TableAction};
use crate::people::column::{Column, SortState};
use crate::search::Matcher;
use crate::swapi::{PAGE_SIZE, Person};
use crate::ui::{Component, EventResult, Result};

const NO_RESULTS: &str = "⚠ No results found.";

pub enum TableEvent {
    Copy(Person),
}

const fn constraint(column: Column) -> Constraint {
    match column {
        Column::Name => Constraint::Min(18),
        Column::BirthYear => Constraint::Length(12),
        Column::EyeColor | Column::Gender | Column::HairColor | Column::SkinColor => {
            Constraint::Length(13)
        }
        Column::Height | Column::Mass => Constraint::Length(8),
        Column::Created | Column::Edited => Constraint::Length(10),
        Column::Icon => Constraint::Length(6),
    }
}

/// Table over the loaded page of people.
///
/// Sorting and slicing only ever touch the records already loaded; the
/// server is never asked for a sorted page.
pub struct PeopleTable {
    people: Vec<Person>,
    order: Vec<usize>,
    sort: SortState,
    focused_column: usize,
    state: TableState,
    highlight: String,
    loading: bool,
    matcher: Matcher,
    resolver: Arc<KeyResolver>,
}

impl PeopleTable {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            people: Vec::new(),
            order: Vec::new(),
            sort: SortState::default(),
            focused_column: 0,
            state: TableState::default(),
            highlight: String::new(),
            loading: false,
            matcher: Matcher::new(),
            resolver,
        }
    }

    /// Replace the rows with a freshly loaded page. The sort is kept.
    pub fn set_people(&mut self, people: Vec<Person>) {
        self.people = people;
        self.reorder();
        self.state.select(if self.order.is_empty() { None } else { Some(0) });
    }

    pub fn set_highlight(&mut self, query: impl Into<String>) {
        self.highlight = query.into();
    }

    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn focused_column(&self) -> Column {
        Column::ALL[self.focused_column]
    }

    /// Rows in display order, at most one server page of them.
    pub fn visible(&self) -> impl Iterator<Item = &Person> {
        self.order.iter().map(|&i| &self.people[i])
    }

    pub fn selected(&self) -> Option<&Person> {
        self.state
            .selected()
            .and_then(|row| self.order.get(row))
            .map(|&i| &self.people[i])
    }

    fn reorder(&mut self) {
        self.order = self.sort.order(&self.people);
        self.order.truncate(PAGE_SIZE as usize);
    }

    fn toggle_sort(&mut self) {
        let selected = self.state.selected().and_then(|row| self.order.get(row)).copied();
        self.sort.toggle(self.focused_column());
        self.reorder();
        // Keep the cursor on the same person.
        if let Some(index) = selected {
            let row = self.order.iter().position(|&i| i == index).unwrap_or(0);
            self.state.select(Some(row));
        }
    }

    fn move_column(&mut self, forward: bool) {
        let last = Column::ALL.len() - 1;
        self.focused_column = if forward {
            (self.focused_column + 1).min(last)
        } else {
            self.focused_column.saturating_sub(1)
        };
    }

    fn select_row(&mut self, row: usize) {
        if !self.order.is_empty() {
            self.state.select(Some(row.min(self.order.len() - 1)));
        }
    }

    fn render_header(&self, theme: &Theme) -> Row<'static> {
        let focused = self.focused_column();
        let cells: Vec<Cell> = Column::ALL
            .iter()
            .map(|&column| {
                let mut text = column.header().to_string();
                if let Some(direction) = self.sort.direction_of(column) {
                    text.push(' ');
                    text.push_str(direction.arrow());
                }
                let mut style = Style::default()
                    .fg(theme.header())
                    .add_modifier(Modifier::BOLD);
                if column == focused {
                    style = style.fg(theme.base()).bg(theme.header());
                }
                Cell::from(text).style(style)
            })
            .collect();
        Row::new(cells)
            .height(1)
            .style(Style::default().bg(theme.surface0()))
    }

    fn name_cell(&self, name: &str, theme: &Theme) -> Cell<'static> {
        let matched = self.matcher.indices(name, &self.highlight);
        if matched.is_empty() {
            return Cell::from(name.to_string());
        }
        let match_style = Style::default()
            .fg(theme.yellow())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let spans: Vec<Span> = name
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if matched.binary_search(&i).is_ok() {
                    Span::styled(c.to_string(), match_style)
                } else {
                    Span::raw(c.to_string())
                }
            })
            .collect();
        Cell::from(Line::from(spans))
    }

    fn render_row(&self, person: &Person, theme: &Theme) -> Row<'static> {
        let cells: Vec<Cell> = Column::ALL
            .iter()
            .map(|&column| match column {
                Column::Name => self.name_cell(&person.name, theme),
                _ => Cell::from(column.display(person)),
            })
            .collect();
        Row::new(cells).style(Style::default().fg(theme.text()))
    }
}

impl Component for PeopleTable {
    type Output = TableEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let resolver = Arc::clone(&self.resolver);
        let current = self.state.selected().unwrap_or(0);

        if resolver.matches_nav(&key, NavAction::Down) {
            self.select_row(current + 1);
        } else if resolver.matches_nav(&key, NavAction::Up) {
            self.select_row(current.saturating_sub(1));
        } else if resolver.matches_nav(&key, NavAction::Home) {
            self.select_row(0);
        } else if resolver.matches_nav(&key, NavAction::End) {
            self.select_row(usize::MAX);
        } else if resolver.matches_nav(&key, NavAction::ColumnLeft) {
            self.move_column(false);
        } else if resolver.matches_nav(&key, NavAction::ColumnRight) {
            self.move_column(true);
        } else if resolver.matches_table(&key, TableAction::Sort) {
            self.toggle_sort();
        } else if resolver.matches_table(&key, TableAction::Copy) {
            return Ok(self
                .selected()
                .cloned()
                .map_or(EventResult::Consumed, |person| TableEvent::Copy(person).into()));
        } else {
            return Ok(EventResult::Ignored);
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows: Vec<Row> = self
            .visible()
            .map(|person| self.render_row(person, theme))
            .collect();
        let empty = rows.is_empty();
        let widths = Column::ALL.map(constraint);

        let title = match self.sort.sorted_by() {
            Some((column, direction)) => {
                format!(" People · {} {} ", column.header(), direction.arrow())
            }
            None => " People ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(title)
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);

        let table = Table::new(rows, widths)
            .header(self.render_header(theme))
            .block(block)
            .column_spacing(1)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);

        if empty && !self.loading && inner.height > 2 {
            // Below the header row.
            let body = Rect {
                y: inner.y + 2,
                height: 1,
                ..inner
            };
            let notice = Paragraph::new(NO_RESULTS)
                .style(Style::default().fg(theme.peach()))
                .alignment(Alignment::Center);
            frame.render_widget(notice, body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::column::SortDirection;
    use crate::people::testing::person;
    use crate::ui::testing::buffer_contains;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn table() -> PeopleTable {
        PeopleTable::new(Arc::new(KeyResolver::default()))
    }

    fn names(table: &PeopleTable) -> Vec<String> {
        table.visible().map(|p| p.name.clone()).collect()
    }

    fn draw(table: &mut PeopleTable) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(160, 12)).unwrap();
        terminal
            .draw(|f| table.render(f, f.area(), &Theme::default()))
            .unwrap();
        terminal
    }

    #[test]
    fn test_sort_focused_column() {
        let mut table = table();
        table.set_people(vec![
            person("Luke Skywalker", "male"),
            person("C-3PO", "n/a"),
            person("Beru Whitesun lars", "female"),
        ]);

        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(
            table.sort.sorted_by(),
            Some((Column::Name, SortDirection::Ascending))
        );
        assert_eq!(names(&table), ["Beru Whitesun lars", "C-3PO", "Luke Skywalker"]);

        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(names(&table), ["Luke Skywalker", "C-3PO", "Beru Whitesun lars"]);

        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(names(&table), ["Luke Skywalker", "C-3PO", "Beru Whitesun lars"]);
        assert_eq!(table.sort.sorted_by(), None);
    }

    #[test]
    fn test_move_column_and_sort_by_icon() {
        let mut table = table();
        table.set_people(vec![person("Luke Skywalker", "male"), person("R2-D2", "n/a")]);

        table.handle_key(key(KeyCode::End)).unwrap();
        for _ in 0..20 {
            table.handle_key(key(KeyCode::Char('l'))).unwrap();
        }
        assert_eq!(table.focused_column(), Column::Icon);

        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(names(&table), ["R2-D2", "Luke Skywalker"]);
        // The cursor follows the selected person.
        assert_eq!(table.selected().map(|p| p.name.as_str()), Some("R2-D2"));
    }

    #[test]
    fn test_sort_survives_new_page() {
        let mut table = table();
        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        table.set_people(vec![person("Yoda", "male"), person("Ackbar", "male")]);
        assert_eq!(names(&table), ["Ackbar", "Yoda"]);
    }

    #[test]
    fn test_full_server_page_is_visible() {
        let mut table = table();
        table.set_people((0..PAGE_SIZE).map(|i| person(&format!("P{i}"), "male")).collect());
        assert_eq!(names(&table).len(), PAGE_SIZE as usize);
        assert_eq!(names(&table).last().map(String::as_str), Some("P9"));
    }

    #[test]
    fn test_rows_bounded_by_server_page() {
        let mut table = table();
        table.set_people((0..12).map(|i| person(&format!("P{i}"), "male")).collect());
        assert_eq!(names(&table).len(), 10);
    }

    #[test]
    fn test_copy_selected() {
        let mut table = table();
        table.set_people(vec![person("Luke Skywalker", "male"), person("Leia Organa", "female")]);
        table.handle_key(key(KeyCode::Down)).unwrap();

        let result = table.handle_key(key(KeyCode::Char('y'))).unwrap();
        match result {
            EventResult::Event(TableEvent::Copy(person)) => assert_eq!(person.name, "Leia Organa"),
            _ => panic!("expected copy event"),
        }
    }

    #[test]
    fn test_copy_without_rows_is_consumed() {
        let mut table = table();
        let result = table.handle_key(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(result, EventResult::Consumed));
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut table = table();
        let result = table.handle_key(key(KeyCode::Char('z'))).unwrap();
        assert!(matches!(result, EventResult::Ignored));
    }

    #[test]
    fn test_renders_row_with_formatted_dates() {
        let mut table = table();
        table.set_people(vec![person("Luke Skywalker", "male")]);
        let terminal = draw(&mut table);
        let buffer = terminal.backend().buffer();

        assert!(buffer_contains(buffer, "Birth Year"));
        assert!(buffer_contains(buffer, "Luke Skywalker"));
        assert!(buffer_contains(buffer, "09/12/2014"));
        assert!(buffer_contains(buffer, "20/12/2014"));
        assert!(!buffer_contains(buffer, "No results found."));
    }

    #[test]
    fn test_title_names_sorted_column() {
        let mut table = table();
        table.set_people(vec![person("Luke Skywalker", "male")]);
        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        table.handle_key(key(KeyCode::Char('s'))).unwrap();
        let terminal = draw(&mut table);
        assert!(buffer_contains(terminal.backend().buffer(), "People · Name ▼"));
    }

    #[test]
    fn test_empty_page_shows_notice_under_header() {
        let mut table = table();
        table.set_people(Vec::new());
        let terminal = draw(&mut table);
        let buffer = terminal.backend().buffer();

        assert!(buffer_contains(buffer, "Name"));
        assert!(buffer_contains(buffer, "No results found."));
    }

    #[test]
    fn test_no_notice_while_loading() {
        let mut table = table();
        table.set_loading(true);
        let terminal = draw(&mut table);
        assert!(!buffer_contains(terminal.backend().buffer(), "No results found."));
    }
}
