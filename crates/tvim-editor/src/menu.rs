//! The menu bar: File, Help, Themes and Fonts.
//!
//! Closed, the bar is one row of titles. F10 opens File; Alt plus a
//! title's mnemonic opens that menu. While a menu is open it takes every
//! key: arrows move, Enter activates, Escape closes.

use tvim_term::input::{KeyCode, KeyEvent, Modifiers};
use tvim_theme::{FontFamily, FontStyle, ThemeKind};

// ---------------------------------------------------------------------------
// Actions and entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewWindow,
    Open,
    Save,
    Exit,
    About,
    Commands,
    Theme(ThemeKind),
    Font(FontFamily),
    Style(FontStyle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Item { label: String, action: MenuAction },
    Separator,
}

impl Entry {
    fn item(label: &str, action: MenuAction) -> Self {
        Self::Item {
            label: label.to_string(),
            action,
        }
    }

    const fn action(&self) -> Option<MenuAction> {
        match self {
            Self::Item { action, .. } => Some(*action),
            Self::Separator => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    /// Opens the menu together with Alt.
    pub mnemonic: char,
    pub entries: Vec<Entry>,
}

fn menus() -> Vec<Menu> {
    vec![
        Menu {
            title: "File",
            mnemonic: 'f',
            entries: vec![
                Entry::item("New Window", MenuAction::NewWindow),
                Entry::item("Open", MenuAction::Open),
                Entry::item("Save", MenuAction::Save),
                Entry::item("Exit", MenuAction::Exit),
            ],
        },
        Menu {
            title: "Help",
            mnemonic: 'h',
            entries: vec![
                Entry::item("About", MenuAction::About),
                Entry::item("Commands", MenuAction::Commands),
            ],
        },
        Menu {
            title: "Themes",
            mnemonic: 't',
            entries: ThemeKind::ALL
                .iter()
                .map(|&kind| Entry::item(kind.label(), MenuAction::Theme(kind)))
                .collect(),
        },
        Menu {
            title: "Fonts",
            mnemonic: 'o',
            entries: FontFamily::ALL
                .iter()
                .map(|&family| Entry::item(family.label(), MenuAction::Font(family)))
                .chain([Entry::Separator])
                .chain(
                    FontStyle::ALL
                        .iter()
                        .map(|&style| Entry::item(style.label(), MenuAction::Style(style))),
                )
                .collect(),
        },
    ]
}

// ---------------------------------------------------------------------------
// MenuBar
// ---------------------------------------------------------------------------

/// What the bar did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Not a menu key; the window handles it.
    Ignored,
    /// The bar used the key.
    Consumed,
    /// An entry was chosen. The menu has closed.
    Activate(MenuAction),
}

#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    /// Index of the open menu.
    open: Option<usize>,
    /// Selected entry in the open menu.
    selected: usize,
}

impl MenuBar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            menus: menus(),
            open: None,
            selected: 0,
        }
    }

    #[must_use]
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// `(menu index, selected entry)` while a menu is open.
    #[must_use]
    pub const fn open(&self) -> Option<(usize, usize)> {
        match self.open {
            Some(menu) => Some((menu, self.selected)),
            None => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_menu(&mut self, index: usize) {
        if index < self.menus.len() {
            self.open = Some(index);
            self.selected = 0;
        }
    }

    pub const fn close(&mut self) {
        self.open = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuOutcome {
        let Some(open) = self.open else {
            return self.handle_closed(key);
        };

        match key.code {
            KeyCode::Escape | KeyCode::F(10) => {
                self.close();
                MenuOutcome::Consumed
            }
            KeyCode::Left => {
                self.open_menu((open + self.menus.len() - 1) % self.menus.len());
                MenuOutcome::Consumed
            }
            KeyCode::Right => {
                self.open_menu((open + 1) % self.menus.len());
                MenuOutcome::Consumed
            }
            KeyCode::Up => {
                self.step(open, false);
                MenuOutcome::Consumed
            }
            KeyCode::Down => {
                self.step(open, true);
                MenuOutcome::Consumed
            }
            KeyCode::Enter => {
                let action = self.menus[open].entries.get(self.selected).and_then(Entry::action);
                match action {
                    Some(action) => {
                        self.close();
                        MenuOutcome::Activate(action)
                    }
                    None => MenuOutcome::Consumed,
                }
            }
            KeyCode::Char(ch) if key.modifiers.contains(Modifiers::ALT) => {
                if let Some(index) = self.mnemonic(ch) {
                    self.open_menu(index);
                }
                MenuOutcome::Consumed
            }
            _ => MenuOutcome::Consumed,
        }
    }

    fn handle_closed(&mut self, key: KeyEvent) -> MenuOutcome {
        match key.code {
            KeyCode::F(10) => {
                self.open_menu(0);
                MenuOutcome::Consumed
            }
            KeyCode::Char(ch) if key.modifiers.contains(Modifiers::ALT) => {
                match self.mnemonic(ch) {
                    Some(index) => {
                        self.open_menu(index);
                        MenuOutcome::Consumed
                    }
                    None => MenuOutcome::Ignored,
                }
            }
            _ => MenuOutcome::Ignored,
        }
    }

    fn mnemonic(&self, ch: char) -> Option<usize> {
        let ch = ch.to_ascii_lowercase();
        self.menus.iter().position(|m| m.mnemonic == ch)
    }

    /// Move the selection one entry, wrapping and skipping separators.
    fn step(&mut self, open: usize, down: bool) {
        let entries = &self.menus[open].entries;
        let len = entries.len();
        let mut index = self.selected;
        for _ in 0..len {
            index = if down { (index + 1) % len } else { (index + len - 1) % len };
            if matches!(entries[index], Entry::Item { .. }) {
                self.selected = index;
                return;
            }
        }
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
