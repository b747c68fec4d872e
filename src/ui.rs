//! Reusable terminal UI building blocks.
//!
//! Components here know nothing about SWAPI. They handle keys, emit generic
//! outputs and render themselves with the active [`Theme`].

pub mod components;
pub mod widgets;

mod error_dialog;
mod help;
mod status_bar;
mod toast;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::Theme;

pub use components::{SearchBar, SearchBarEvent};
pub use error_dialog::{ErrorDialog, ErrorDialogEvent};
pub use help::{HelpEvent, HelpOverlay, Keybinding, KeybindingSection};
pub use status_bar::StatusBar;
pub use toast::{Toast, ToastManager, ToastType};
pub use widgets::Spinner;

/// Result of handling an input event.
///
/// - `Ignored` - the handler didn't recognize this input, the parent may
/// - `Consumed` - handled, no output, not propagated further
/// - `Event(E)` - handled and produced an output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    Ignored,
    Consumed,
    Event(E),
}

impl<E> EventResult<E> {
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Transform the output, keeping `Ignored`/`Consumed` as they are.
    pub fn map<F, T>(self, f: F) -> EventResult<T>
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Self::Ignored => EventResult::Ignored,
            Self::Consumed => EventResult::Consumed,
            Self::Event(event) => EventResult::Event(f(event)),
        }
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
pub trait Component {
    /// What the component reports to its parent.
    type Output;

    /// Handle a key event.
    ///
    /// # Errors
    /// Returns an error if handling the key failed; the App shows it in an
    /// error dialog.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_result_map() {
        let result: EventResult<u8> = 3.into();
        assert_eq!(result.map(|n| n * 2), EventResult::Event(6));

        let consumed: EventResult<u8> = EventResult::Consumed;
        assert_eq!(consumed.map(|n| n * 2), EventResult::Consumed);
        assert!(EventResult::<u8>::Consumed.is_consumed());
        assert!(!EventResult::<u8>::Ignored.is_consumed());
    }
}
