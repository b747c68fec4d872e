use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::Theme;
use crate::commands::Command;
use crate::config::{GlobalAction, KeyResolver};
use crate::people::PeopleView;
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, ErrorDialog, ErrorDialogEvent, EventResult, HelpEvent, HelpOverlay, Keybinding,
    KeybindingSection, StatusBar, Toast, ToastManager, ToastType,
};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 8.0;

/// Messages from running commands back to the App.
#[derive(Debug)]
pub enum AppMessage {
    ShowToast {
        message: String,
        toast_type: ToastType,
    },
    CommandFinished {
        name: String,
        error: Option<String>,
    },
}

/// Top-level state: the people view plus app chrome (status bar, help,
/// toasts and the error dialog).
pub struct App {
    people: PeopleView,
    status_bar: StatusBar,
    help: Option<HelpOverlay>,
    error_dialog: Option<ErrorDialog>,
    toasts: ToastManager,
    theme: Theme,
    resolver: Arc<KeyResolver>,
    running_commands: usize,
    should_quit: bool,
    should_suspend: bool,
    app_tx: UnboundedSender<AppMessage>,
    app_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        people: PeopleView,
        endpoint: impl Into<String>,
        theme: Theme,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        Self {
            people,
            status_bar: StatusBar::new(endpoint),
            help: None,
            error_dialog: None,
            toasts: ToastManager::default(),
            theme,
            resolver,
            running_commands: 0,
            should_quit: false,
            should_suspend: false,
            app_tx,
            app_rx,
        }
    }

    /// Show a notice in a toast once the UI is up.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.toasts.show(Toast::new(message, ToastType::Info));
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        self.people.init();
        self.update_people();

        while let Some(event) = tui.next_event().await {
            self.handle_event(&mut tui, event)?;
            self.process_messages();
            self.update_people();

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Exiting");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Suspend => self.should_suspend = true,
            Event::Error(message) => self.show_error(message),
            Event::Tick => {
                self.people.handle_tick();
                if !self.toasts.is_empty() {
                    self.toasts.handle_tick();
                }
            }
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Paste(text) => {
                if self.help.is_none() && self.error_dialog.is_none() {
                    self.people.handle_paste(&text);
                }
            }
            Event::Key(key) => {
                if let Err(e) = self.handle_key(key) {
                    self.show_error(format!("Error while handling key: {e}"));
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Overlays are modal.
        if let Some(dialog) = &mut self.error_dialog {
            if let EventResult::Event(ErrorDialogEvent::Dismissed) = dialog.handle_key(key)? {
                self.error_dialog = None;
            }
            return Ok(());
        }
        if let Some(help) = &mut self.help {
            if let EventResult::Event(HelpEvent::Close) = help.handle_key(key)? {
                self.help = None;
            }
            return Ok(());
        }

        if self.people.handle_key(key)?.is_consumed() {
            return Ok(());
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if self.resolver.matches_global(&key, GlobalAction::Help) {
            self.help = Some(HelpOverlay::new(
                self.help_sections(),
                Arc::clone(&self.resolver),
            ));
        }
        Ok(())
    }

    fn update_people(&mut self) {
        match self.people.update() {
            Ok(commands) => {
                for command in commands {
                    self.spawn_command(command);
                }
            }
            Err(e) => self.show_error(format!("Error while updating: {e}")),
        }
    }

    fn spawn_command(&mut self, command: Box<dyn Command>) {
        let name = command.name();
        debug!("Spawning command: {}", name);
        self.running_commands += 1;
        self.status_bar.set_running_tasks(self.running_commands);

        let app_tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = command.execute(app_tx.clone()).await;
            let _ = app_tx.send(AppMessage::CommandFinished {
                name,
                error: result.err().map(|e| e.to_string()),
            });
        });
    }

    fn process_messages(&mut self) {
        while let Ok(message) = self.app_rx.try_recv() {
            match message {
                AppMessage::ShowToast {
                    message,
                    toast_type,
                } => self.toasts.show(Toast::new(message, toast_type)),
                AppMessage::CommandFinished { name, error } => {
                    self.running_commands = self.running_commands.saturating_sub(1);
                    self.status_bar.set_running_tasks(self.running_commands);
                    if let Some(e) = error {
                        error!("{} failed: {}", name, e);
                        self.show_error(format!("{name} failed: {e}"));
                    }
                }
            }
        }
    }

    fn show_error(&mut self, message: impl Into<String>) {
        match &mut self.error_dialog {
            Some(dialog) => dialog.push(message),
            None => {
                self.error_dialog = Some(ErrorDialog::new(message, Arc::clone(&self.resolver)));
            }
        }
    }

    fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Help), "help"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Quit), "quit"),
        ]
    }

    fn help_sections(&self) -> Vec<KeybindingSection> {
        vec![
            KeybindingSection::new("People", self.people.keybindings()),
            KeybindingSection::new("Global", self.global_keybindings()),
        ]
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        self.people.render(frame, main_area, &self.theme);

        let mut hints = self.people.keybindings();
        hints.extend(self.global_keybindings());
        self.status_bar.render(frame, status_area, &self.theme, &hints);

        self.toasts.render(frame, main_area, &self.theme);
        if let Some(help) = &mut self.help {
            help.render(frame, area, &self.theme);
        }
        if let Some(dialog) = &mut self.error_dialog {
            dialog.render(frame, area, &self.theme);
        }
    }
}
