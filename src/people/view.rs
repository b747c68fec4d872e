use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::Theme;
use crate::commands::{Command, CopyToClipboardCmd};
use crate::config::{KeyResolver, NavAction, PagerAction, SearchAction, TableAction};
use crate::people::cards::SummaryCards;
use crate::people::command::FetchPeopleCmd;
use crate::people::message::PeopleMsg;
use crate::people::pager::Pager;
use crate::people::query::QueryState;
use crate::people::table::{PeopleTable, TableEvent};
use crate::people::tally::Tally;
use crate::swapi::{PeoplePage, PeopleSource};
use crate::ui::{Component, EventResult, Keybinding, SearchBar, SearchBarEvent, Spinner};

/// The people screen: search, counts, table and pagination.
///
/// Key handling only queues [`PeopleMsg`]s. The App then calls `update()`,
/// which applies the queue and hands back the commands to spawn. Fetch
/// results come back through the same queue, each tagged with the id of
/// the request that produced it; only the most recent request may change
/// what is shown.
pub struct PeopleView {
    source: Arc<dyn PeopleSource>,
    query: QueryState,
    tally: Tally,
    searching: bool,
    error: Option<String>,
    latest_request: u64,
    search_bar: SearchBar,
    table: PeopleTable,
    cards: SummaryCards,
    spinner: Spinner,
    resolver: Arc<KeyResolver>,
    msg_tx: UnboundedSender<PeopleMsg>,
    msg_rx: UnboundedReceiver<PeopleMsg>,
}

impl PeopleView {
    pub fn new(
        source: Arc<dyn PeopleSource>,
        query: QueryState,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let clear_hint = format!("{} Clear", resolver.display_search(SearchAction::Clear));
        let search_bar = SearchBar::new(Arc::clone(&resolver))
            .with_value(query.search_text())
            .with_hint(clear_hint);

        Self {
            source,
            query,
            tally: Tally::default(),
            searching: false,
            error: None,
            latest_request: 0,
            search_bar,
            table: PeopleTable::new(Arc::clone(&resolver)),
            cards: SummaryCards::default(),
            spinner: Spinner::new("Searching..."),
            resolver,
            msg_tx,
            msg_rx,
        }
    }

    /// Queue the initial fetch.
    pub fn init(&mut self) {
        self.queue(PeopleMsg::Fetch);
    }

    fn queue(&self, msg: PeopleMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn pager(&self) -> Pager {
        Pager::new(self.query.page_index(), self.tally.total_count)
    }

    pub fn handle_tick(&mut self) {
        if self.searching {
            self.spinner.handle_tick();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.search_bar.is_focused() {
            return Ok(match self.search_bar.handle_key(key)? {
                EventResult::Event(SearchBarEvent::Changed(text)) => {
                    self.queue(PeopleMsg::SearchChanged(text));
                    EventResult::Consumed
                }
                EventResult::Event(SearchBarEvent::Left) | EventResult::Consumed => {
                    EventResult::Consumed
                }
                EventResult::Ignored => EventResult::Ignored,
            });
        }

        if self.resolver.matches_search(&key, SearchAction::Focus) {
            self.search_bar.focus();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_search(&key, SearchAction::Clear) {
            self.search_bar.set_value("");
            self.queue(PeopleMsg::ClearSearch);
            return Ok(EventResult::Consumed);
        }

        // Disabled controls swallow their keys.
        let pager = self.pager();
        if self.resolver.matches_pager(&key, PagerAction::Previous) {
            if pager.has_previous() {
                self.queue(PeopleMsg::ChangePage(-1));
            }
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_pager(&key, PagerAction::Next) {
            if pager.has_next() {
                self.queue(PeopleMsg::ChangePage(1));
            }
            return Ok(EventResult::Consumed);
        }

        let result = self.table.handle_key(key)?;
        Ok(result.map(|TableEvent::Copy(person)| {
            self.queue(PeopleMsg::CopyName(person.name));
        }))
    }

    /// Pasted text goes into the search bar while it is focused.
    pub fn handle_paste(&mut self, text: &str) -> EventResult<()> {
        match self.search_bar.paste(text) {
            EventResult::Event(SearchBarEvent::Changed(text)) => {
                self.queue(PeopleMsg::SearchChanged(text));
                EventResult::Consumed
            }
            EventResult::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        }
    }

    /// Apply every queued message.
    ///
    /// # Errors
    /// Message handling itself cannot fail today; the signature matches the
    /// other update paths so the App treats them alike.
    pub fn update(&mut self) -> Result<Vec<Box<dyn Command>>> {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(command) = self.process_message(msg) {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    fn process_message(&mut self, msg: PeopleMsg) -> Option<Box<dyn Command>> {
        match msg {
            PeopleMsg::Fetch => Some(self.fetch()),
            PeopleMsg::SearchChanged(text) => {
                if self.search_bar.value() != text {
                    self.search_bar.set_value(text.clone());
                }
                self.query.set_search(text).then(|| self.fetch())
            }
            PeopleMsg::ClearSearch => self.query.clear_search().then(|| self.fetch()),
            PeopleMsg::ChangePage(delta) => self.query.change_page(delta).then(|| self.fetch()),
            PeopleMsg::CopyName(name) => {
                let description = format!("name of {name}");
                Some(Box::new(CopyToClipboardCmd::new(name, description)))
            }
            PeopleMsg::PageLoaded { request_id, page } => {
                if self.is_current(request_id) {
                    self.show_page(page);
                }
                None
            }
            PeopleMsg::PageFailed { request_id, error } => {
                if self.is_current(request_id) {
                    self.searching = false;
                    self.table.set_loading(false);
                    self.error = Some(error);
                }
                None
            }
        }
    }

    fn is_current(&self, request_id: u64) -> bool {
        let current = request_id == self.latest_request;
        if !current {
            debug!(
                "Discarding response to request {request_id}, latest is {}",
                self.latest_request
            );
        }
        current
    }

    fn fetch(&mut self) -> Box<dyn Command> {
        self.latest_request += 1;
        self.searching = true;
        self.table.set_loading(true);
        info!(
            "Request {}: search {:?} page {}",
            self.latest_request,
            self.query.search_text(),
            self.query.page_index()
        );
        Box::new(FetchPeopleCmd::new(
            Arc::clone(&self.source),
            self.query.clone(),
            self.latest_request,
            self.msg_tx.clone(),
        ))
    }

    fn show_page(&mut self, page: PeoplePage) {
        self.tally = Tally::from_page(&page);
        self.cards.set_tally(self.tally);
        self.table.set_highlight(self.query.search_text());
        self.table.set_people(page.results);
        self.table.set_loading(false);
        self.searching = false;
        self.error = None;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(error) = &self.error {
            let message = Paragraph::new(format!("Error: {error}"))
                .style(Style::default().fg(theme.red()).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let [search_area, cards_area, table_area, busy_area, pager_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.search_bar.render(frame, search_area, theme);
        self.cards.render(frame, cards_area, theme);
        self.table.render(frame, table_area, theme);
        if self.searching {
            self.spinner.render(frame, busy_area, theme);
        }
        self.render_pager(frame, pager_area, theme);
    }

    fn render_pager(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let pager = self.pager();
        let style_for = |enabled: bool| {
            if enabled {
                Style::default().fg(theme.sky()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.overlay0()).add_modifier(Modifier::DIM)
            }
        };

        let line = Line::from(vec![
            Span::styled("◀ Previous", style_for(pager.has_previous())),
            Span::raw("   "),
            Span::styled(pager.label(), Style::default().fg(theme.text())),
            Span::raw("   "),
            Span::styled("Next ▶", style_for(pager.has_next())),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), area);
    }

    /// Keybindings of this screen for the help overlay and status bar.
    pub fn keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;
        if self.search_bar.is_focused() {
            return vec![Keybinding::hint(r.display_search(SearchAction::Leave), "done")];
        }
        vec![
            Keybinding::hint(r.display_search(SearchAction::Focus), "search"),
            Keybinding::hint(r.display_search(SearchAction::Clear), "clear search"),
            Keybinding::hint(r.display_pager(PagerAction::Previous), "previous page"),
            Keybinding::hint(r.display_pager(PagerAction::Next), "next page"),
            Keybinding::hint(r.display_table(TableAction::Sort), "sort column"),
            Keybinding::new(r.display_table(TableAction::Copy), "copy name"),
            Keybinding::new(r.display_nav(NavAction::Up), "row up"),
            Keybinding::new(r.display_nav(NavAction::Down), "row down"),
            Keybinding::new(r.display_nav(NavAction::Home), "first row"),
            Keybinding::new(r.display_nav(NavAction::End), "last row"),
            Keybinding::new(r.display_nav(NavAction::ColumnLeft), "column left"),
            Keybinding::new(r.display_nav(NavAction::ColumnRight), "column right"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::testing::{StubSource, person};
    use crate::swapi::Person;
    use crate::ui::testing::buffer_contains;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn page(count: u64, results: Vec<Person>) -> PeoplePage {
        PeoplePage { count, results }
    }

    fn view_with(source: Arc<StubSource>, query: QueryState) -> PeopleView {
        PeopleView::new(source, query, Arc::new(KeyResolver::default()))
    }

    /// Run `update()` and every command it returns until the queue is empty.
    async fn settle(view: &mut PeopleView) -> usize {
        let (app_tx, _app_rx) = mpsc::unbounded_channel();
        let mut executed = 0;
        loop {
            let commands = view.update().unwrap();
            if commands.is_empty() {
                return executed;
            }
            for command in commands {
                command.execute(app_tx.clone()).await.unwrap();
                executed += 1;
            }
        }
    }

    fn draw(view: &mut PeopleView) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &Theme::default()))
            .unwrap();
        terminal
    }

    fn type_text(view: &mut PeopleView, text: &str) {
        for c in text.chars() {
            view.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[tokio::test]
    async fn test_initial_fetch_uses_empty_search_and_first_page() {
        let source = Arc::new(StubSource::with_page(page(82, vec![person("Luke Skywalker", "male")])));
        let mut view = view_with(source.clone(), QueryState::default());
        view.init();

        assert_eq!(settle(&mut view).await, 1);
        assert_eq!(source.calls(), vec![(String::new(), 0)]);
        assert!(!view.searching);
        assert_eq!(view.tally.total_count, 82);
    }

    #[tokio::test]
    async fn test_search_luke_scenario() {
        let source = Arc::new(StubSource::with_page(page(1, vec![person("Luke Skywalker", "male")])));
        let mut view = view_with(source.clone(), QueryState::new("luke", 0));
        view.init();
        settle(&mut view).await;

        assert_eq!(
            view.tally,
            Tally {
                total_count: 1,
                droid_count: 0,
                human_count: 1,
            }
        );
        let terminal = draw(&mut view);
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(buffer, "Luke Skywalker"));
        assert!(buffer_contains(buffer, "Showing page 1 of 1"));
        assert!(buffer_contains(buffer, "09/12/2014"));
        assert!(buffer_contains(buffer, "Total Human"));
        assert!(!buffer_contains(buffer, "Error:"));
    }

    #[tokio::test]
    async fn test_full_page_is_shown_and_counted_alike() {
        let people: Vec<Person> = (0..10).map(|i| person(&format!("Trooper {i}"), "male")).collect();
        let source = Arc::new(StubSource::with_page(page(82, people)));
        let mut view = view_with(source.clone(), QueryState::default());
        view.init();
        settle(&mut view).await;

        assert_eq!(view.tally.human_count, 10);
        assert_eq!(view.table.visible().count(), 10);
        let terminal = draw(&mut view);
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(buffer, "Trooper 9"));
        assert!(buffer_contains(buffer, "Showing page 1 of 9"));
        assert!(!buffer_contains(buffer, "No results found."));
    }

    #[tokio::test]
    async fn test_every_keystroke_fetches_without_resetting_page() {
        let source = Arc::new(StubSource::with_page(page(82, vec![person("Luke Skywalker", "male")])));
        let mut view = view_with(source.clone(), QueryState::new("", 2));

        view.handle_key(key(KeyCode::Char('/'))).unwrap();
        assert!(view.search_bar.is_focused());
        type_text(&mut view, "lu");
        view.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!view.search_bar.is_focused());

        assert_eq!(settle(&mut view).await, 2);
        assert_eq!(
            source.calls(),
            vec![("l".to_string(), 2), ("lu".to_string(), 2)]
        );
        assert_eq!(view.query.search_text(), "lu");
    }

    #[tokio::test]
    async fn test_clear_search_refetches_once() {
        let source = Arc::new(StubSource::with_page(page(82, Vec::new())));
        let mut view = view_with(source.clone(), QueryState::new("vader", 0));

        view.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(settle(&mut view).await, 1);
        assert_eq!(source.calls(), vec![(String::new(), 0)]);

        // Already empty: nothing to refetch.
        view.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(settle(&mut view).await, 0);
    }

    #[tokio::test]
    async fn test_failure_renders_only_the_error() {
        let source = Arc::new(StubSource::failing());
        let mut view = view_with(source, QueryState::default());
        view.init();
        settle(&mut view).await;

        assert!(!view.searching);
        assert_eq!(
            view.error.as_deref(),
            Some("Request failed with status code 503 Service Unavailable")
        );
        let terminal = draw(&mut view);
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(
            buffer,
            "Error: Request failed with status code 503 Service Unavailable"
        ));
        assert!(!buffer_contains(buffer, "Total Result"));
        assert!(!buffer_contains(buffer, "Showing page"));
    }

    #[tokio::test]
    async fn test_success_clears_error() {
        let mut view = view_with(Arc::new(StubSource::with_page(page(0, Vec::new()))), QueryState::default());
        view.error = Some("boom".to_string());
        view.init();
        settle(&mut view).await;
        assert_eq!(view.error.as_deref(), None);
    }

    #[tokio::test]
    async fn test_empty_result_state() {
        let source = Arc::new(StubSource::with_page(page(0, Vec::new())));
        let mut view = view_with(source, QueryState::new("zzzz", 0));
        view.init();
        settle(&mut view).await;

        assert_eq!(view.tally, Tally::default());
        let terminal = draw(&mut view);
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(buffer, "No results found."));
        assert!(buffer_contains(buffer, "Birth Year"));
        assert!(buffer_contains(buffer, "Showing page 1 of 0"));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let source = Arc::new(StubSource::with_page(page(0, Vec::new())));
        let mut view = view_with(source, QueryState::default());

        view.queue(PeopleMsg::SearchChanged("l".to_string()));
        view.queue(PeopleMsg::SearchChanged("lu".to_string()));
        assert_eq!(view.update().unwrap().len(), 2);
        assert!(view.searching);

        // Request 2 answers first, then the older request 1.
        view.queue(PeopleMsg::PageLoaded {
            request_id: 2,
            page: page(1, vec![person("Luke Skywalker", "male")]),
        });
        view.queue(PeopleMsg::PageLoaded {
            request_id: 1,
            page: page(3, vec![person("Leia Organa", "female"), person("R2-D2", "n/a")]),
        });
        view.update().unwrap();

        assert!(!view.searching);
        assert_eq!(view.tally.total_count, 1);
        let names: Vec<&str> = view.table.visible().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Luke Skywalker"]);
    }

    #[tokio::test]
    async fn test_stale_failure_is_discarded() {
        let mut view = view_with(Arc::new(StubSource::failing()), QueryState::default());
        view.queue(PeopleMsg::Fetch);
        view.queue(PeopleMsg::Fetch);
        view.update().unwrap();

        view.queue(PeopleMsg::PageFailed {
            request_id: 1,
            error: "late".to_string(),
        });
        view.update().unwrap();
        assert_eq!(view.error.as_deref(), None);
        assert!(view.searching);
    }

    #[tokio::test]
    async fn test_pager_controls() {
        let source = Arc::new(StubSource::with_page(page(25, Vec::new())));
        let mut view = view_with(source.clone(), QueryState::default());
        view.init();
        settle(&mut view).await;

        // First page: previous is inert.
        view.handle_key(key(KeyCode::Char('p'))).unwrap();
        assert_eq!(settle(&mut view).await, 0);

        view.handle_key(key(KeyCode::Char('n'))).unwrap();
        view.handle_key(key(KeyCode::Char('n'))).unwrap();
        settle(&mut view).await;
        assert_eq!(view.query.page_index(), 2);

        // Last of three pages: next is inert.
        view.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(settle(&mut view).await, 0);

        view.handle_key(key(KeyCode::Char('p'))).unwrap();
        settle(&mut view).await;
        assert_eq!(view.query.page_index(), 1);
        assert_eq!(
            source.calls().iter().map(|(_, p)| *p).collect::<Vec<_>>(),
            [0, 1, 2, 1]
        );
    }

    #[tokio::test]
    async fn test_next_is_inert_without_pages() {
        let source = Arc::new(StubSource::with_page(page(0, Vec::new())));
        let mut view = view_with(source, QueryState::default());
        view.init();
        settle(&mut view).await;

        view.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(settle(&mut view).await, 0);
    }

    #[tokio::test]
    async fn test_copy_queues_clipboard_command() {
        let source = Arc::new(StubSource::with_page(page(1, vec![person("Luke Skywalker", "male")])));
        let mut view = view_with(source, QueryState::default());
        view.init();
        settle(&mut view).await;

        view.handle_key(key(KeyCode::Char('y'))).unwrap();
        let commands = view.update().unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name(), "Copying name of Luke Skywalker");
    }

    #[test]
    fn test_spinner_shown_while_searching() {
        let mut view = view_with(Arc::new(StubSource::failing()), QueryState::default());
        view.init();
        let commands = view.update().unwrap();
        assert_eq!(commands.len(), 1);

        let terminal = draw(&mut view);
        let buffer = terminal.backend().buffer();
        assert!(buffer_contains(buffer, "Searching..."));
        assert!(!buffer_contains(buffer, "No results found."));
    }

    #[test]
    fn test_paste_into_focused_search() {
        let mut view = view_with(Arc::new(StubSource::failing()), QueryState::default());
        assert!(!view.handle_paste("yoda").is_consumed());

        view.handle_key(key(KeyCode::Char('/'))).unwrap();
        assert!(view.handle_paste("yoda").is_consumed());
        assert_eq!(view.update().unwrap().len(), 1);
        assert_eq!(view.query.search_text(), "yoda");
    }

    #[test]
    fn test_keys_stay_live_in_error_state() {
        let mut view = view_with(Arc::new(StubSource::failing()), QueryState::new("luke", 0));
        view.error = Some("boom".to_string());

        view.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(view.update().unwrap().len(), 1);
        assert!(view.searching);
    }
}
