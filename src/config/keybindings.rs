use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub column_left: KeyBinding,
    pub column_right: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchKeybindings {
    pub focus: KeyBinding,
    pub clear: KeyBinding,
    pub leave: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableKeybindings {
    pub sort: KeyBinding,
    pub copy: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerKeybindings {
    pub previous: KeyBinding,
    pub next: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub search: SearchKeybindings,
    pub table: TableKeybindings,
    pub pager: PagerKeybindings,
    pub dialog: DialogKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::char('q').into(),
            help: Key::char('?').into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: vec![Key::char('k'), Key::new(KeyCode::Up)].into(),
            down: vec![Key::char('j'), Key::new(KeyCode::Down)].into(),
            home: vec![Key::char('g'), Key::new(KeyCode::Home)].into(),
            end: vec![Key::char('G'), Key::new(KeyCode::End)].into(),
            column_left: vec![Key::char('h'), Key::new(KeyCode::Left)].into(),
            column_right: vec![Key::char('l'), Key::new(KeyCode::Right)].into(),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            focus: vec![Key::char('/'), Key::with_ctrl(KeyCode::Char('f'))].into(),
            clear: Key::char('x').into(),
            leave: vec![Key::new(KeyCode::Enter), Key::new(KeyCode::Esc)].into(),
        }
    }
}

impl Default for TableKeybindings {
    fn default() -> Self {
        Self {
            sort: Key::char('s').into(),
            copy: Key::char('y').into(),
        }
    }
}

impl Default for PagerKeybindings {
    fn default() -> Self {
        Self {
            previous: vec![Key::char('p'), Key::char('['), Key::new(KeyCode::PageUp)].into(),
            next: vec![Key::char('n'), Key::char(']'), Key::new(KeyCode::PageDown)].into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            dismiss: vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Esc),
                Key::char('q'),
            ]
            .into(),
        }
    }
}
