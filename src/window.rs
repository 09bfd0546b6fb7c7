// SPDX-License-Identifier: MIT
//
// One editor window: a document, its command line, the mode, the look and
// whatever popup or menu is open. Windows share nothing with each other;
// anything that affects the window list goes back to the workbench as a
// Request.
//
// Key routing, first match wins:
//
//   popup open   → popup
//   menu key     → menu bar (F10, Alt+mnemonic, or anything while open)
//   INSERT mode  → text area; Escape switches to COMMAND
//   COMMAND mode → command line, then the dispatcher

use std::path::Path;

use tracing::{info, warn};

use tvim_editor::buffer::Buffer;
use tvim_editor::command::{CommandLine, Trigger};
use tvim_editor::dispatch::{self, Effect};
use tvim_editor::menu::{MenuAction, MenuBar, MenuOutcome};
use tvim_editor::mode::Mode;
use tvim_editor::popup::{
    ABOUT_MESSAGE, ABOUT_TITLE, COMMANDS_MESSAGE, COMMANDS_TITLE, Popup, PopupOutcome,
    PromptPurpose, save_path,
};
use tvim_editor::surface::TextArea;
use tvim_editor::view::{Screen, View};

use tvim_term::ansi::CursorShape;
use tvim_term::buffer::FrameBuffer;
use tvim_term::input::{Event, KeyCode, KeyEvent};
use tvim_theme::{Font, Theme};

use crate::config::Config;

// ─── Request ────────────────────────────────────────────────────────────────

/// What a window needs from the workbench after an event.
#[derive(Debug)]
pub enum Request {
    Stay,
    /// Remove this window.
    Close,
    /// File → New Window.
    NewWindow,
    /// File → Open read a document; show it in a new window.
    Open(Buffer),
}

// ─── Window ─────────────────────────────────────────────────────────────────

pub struct Window {
    text: TextArea,
    command_line: CommandLine,
    mode: Mode,
    font: Font,
    theme: Theme,
    popup: Option<Popup>,
    menu: MenuBar,
    view: View,
    /// Document rows at the last paint, for PageUp / PageDown.
    text_rows: u16,
    close_on_cancelled_wq: bool,
}

impl Window {
    /// A blank window with the configured look.
    pub fn new(config: &Config) -> Self {
        Self::with_buffer(Buffer::new(), config)
    }

    pub fn with_buffer(buffer: Buffer, config: &Config) -> Self {
        Self {
            text: TextArea::from_buffer(buffer),
            command_line: CommandLine::new(),
            mode: Mode::default(),
            font: config.font,
            theme: Theme::preset(config.theme),
            popup: None,
            menu: MenuBar::new(),
            view: View::new(),
            text_rows: 1,
            close_on_cancelled_wq: config.close_on_cancelled_wq,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Request {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Paste(text) => {
                self.handle_paste(text);
                Request::Stay
            }
        }
    }

    /// Paint into `frame`. Returns the hardware cursor.
    pub fn paint(&mut self, frame: &mut FrameBuffer, index: usize, count: usize) -> Option<(u16, u16, CursorShape)> {
        self.text_rows = View::text_rows(frame.height()).max(1);
        let screen = Screen {
            text: &self.text,
            command_line: &self.command_line,
            mode: self.mode,
            font: self.font,
            theme: &self.theme,
            menu: &self.menu,
            popup: self.popup.as_ref(),
            window_index: index,
            window_count: count,
        };
        self.view.render(frame, &screen)
    }

    // ─── Keys ───────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Request {
        if let Some(popup) = self.popup.as_mut() {
            let outcome = popup.handle_key(key);
            return self.popup_outcome(outcome);
        }

        match self.menu.handle_key(key) {
            MenuOutcome::Ignored => {}
            MenuOutcome::Consumed => return Request::Stay,
            MenuOutcome::Activate(action) => return self.menu_action(action),
        }

        match self.mode {
            Mode::Insert => self.handle_insert(key),
            Mode::Command => self.handle_command(key),
        }
        Request::Stay
    }

    fn handle_insert(&mut self, key: KeyEvent) {
        if key.is_chord() {
            return;
        }
        let page = usize::from(self.text_rows);
        match key.code {
            KeyCode::Escape => self.mode = Mode::Command,
            KeyCode::Char(ch) => self.text.insert_char(ch),
            KeyCode::Enter => self.text.newline(),
            KeyCode::Tab => self.text.insert_char('\t'),
            KeyCode::Backspace => self.text.backspace(),
            KeyCode::Delete => self.text.delete_forward(),
            KeyCode::Left => self.text.move_left(),
            KeyCode::Right => self.text.move_right(),
            KeyCode::Up => self.text.move_up(1),
            KeyCode::Down => self.text.move_down(1),
            KeyCode::PageUp => self.text.move_up(page),
            KeyCode::PageDown => self.text.move_down(page),
            KeyCode::Home => self.text.move_home(),
            KeyCode::End => self.text.move_end(),
            _ => {}
        }
    }

    /// Every key that edits the command line is followed by a dispatch;
    /// Enter dispatches without being stored.
    fn handle_command(&mut self, key: KeyEvent) {
        if key.is_chord() {
            return;
        }
        let line = &mut self.command_line;
        let trigger = match key.code {
            KeyCode::Enter => Trigger::Enter,
            KeyCode::Char(ch) => {
                line.insert_char(ch);
                Trigger::Key
            }
            KeyCode::Backspace => {
                line.backspace();
                Trigger::Key
            }
            KeyCode::Delete => {
                line.delete();
                Trigger::Key
            }
            KeyCode::Left => {
                line.move_left();
                Trigger::Key
            }
            KeyCode::Right => {
                line.move_right();
                Trigger::Key
            }
            KeyCode::Home => {
                line.move_home();
                Trigger::Key
            }
            KeyCode::End => {
                line.move_end();
                Trigger::Key
            }
            _ => return,
        };
        let effect = dispatch::dispatch(&mut self.text, &mut self.command_line, trigger);
        self.apply(effect);
    }

    fn handle_paste(&mut self, text: &str) {
        if let Some(popup) = self.popup.as_mut() {
            popup.paste(text);
            return;
        }
        if self.menu.is_open() {
            return;
        }
        match self.mode {
            Mode::Insert => self.text.paste(text),
            Mode::Command => {
                self.command_line.insert_str(text);
                let effect = dispatch::dispatch(&mut self.text, &mut self.command_line, Trigger::Key);
                self.apply(effect);
            }
        }
    }

    // ─── Effects ────────────────────────────────────────────────────────

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::EnterInsert => self.mode = Mode::Insert,
            Effect::SaveAs { then_close } => {
                self.popup = Some(Popup::prompt(PromptPurpose::SaveAs { then_close }));
            }
            Effect::ConfirmQuit => self.popup = Some(Popup::confirm_quit()),
            Effect::Error(err) => self.popup = Some(Popup::error(err.to_string())),
        }
    }

    fn popup_outcome(&mut self, outcome: PopupOutcome) -> Request {
        match outcome {
            PopupOutcome::Pending => Request::Stay,
            PopupOutcome::Dismissed | PopupOutcome::Answered(false) => {
                self.popup = None;
                Request::Stay
            }
            PopupOutcome::Answered(true) => {
                self.popup = None;
                Request::Close
            }
            PopupOutcome::Submitted {
                purpose: PromptPurpose::Open,
                text,
            } => {
                self.popup = None;
                match Buffer::from_file(Path::new(&text)) {
                    Ok(buffer) => Request::Open(buffer),
                    Err(err) => {
                        warn!(%err, "open failed");
                        self.popup = Some(Popup::error(err.to_string()));
                        Request::Stay
                    }
                }
            }
            PopupOutcome::Submitted {
                purpose: PromptPurpose::SaveAs { then_close },
                text,
            } => {
                self.popup = None;
                self.save_as(&text, then_close)
            }
            PopupOutcome::Cancelled(purpose) => {
                self.popup = None;
                let close = matches!(purpose, PromptPurpose::SaveAs { then_close: true })
                    && self.close_on_cancelled_wq;
                if close { Request::Close } else { Request::Stay }
            }
        }
    }

    fn save_as(&mut self, name: &str, then_close: bool) -> Request {
        let path = save_path(name);
        match self.text.buffer_mut().write_to(&path) {
            Ok(()) => {
                info!(path = %path.display(), then_close, "saved");
                if then_close { Request::Close } else { Request::Stay }
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.popup = Some(Popup::error(err.to_string()));
                Request::Stay
            }
        }
    }

    fn menu_action(&mut self, action: MenuAction) -> Request {
        match action {
            MenuAction::NewWindow => return Request::NewWindow,
            MenuAction::Open => self.popup = Some(Popup::prompt(PromptPurpose::Open)),
            MenuAction::Save => {
                self.popup = Some(Popup::prompt(PromptPurpose::SaveAs { then_close: false }));
            }
            MenuAction::Exit => self.popup = Some(Popup::confirm_quit()),
            MenuAction::About => self.popup = Some(Popup::info(ABOUT_TITLE, ABOUT_MESSAGE)),
            MenuAction::Commands => {
                self.popup = Some(Popup::info(COMMANDS_TITLE, COMMANDS_MESSAGE));
            }
            MenuAction::Theme(kind) => self.theme = Theme::preset(kind),
            MenuAction::Font(family) => self.font.family = family,
            MenuAction::Style(style) => self.font.style = style,
        }
        Request::Stay
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tvim_editor::popup::{ERROR_TITLE, QUIT_TITLE, SAVE_AS_TITLE};
    use tvim_editor::position::Position;
    use tvim_editor::surface::TextSurface;
    use tvim_editor::tag::Tag;
    use tvim_term::input::Modifiers;
    use tvim_theme::{FontFamily, FontStyle, ThemeKind};

    // ── Helpers ───────────────────────────────────────────────────────────

    fn window(text: &str) -> Window {
        Window::with_buffer(Buffer::from_text(text), &Config::default())
    }

    fn key(w: &mut Window, code: KeyCode) -> Request {
        w.handle_event(&Event::Key(KeyEvent::new(code)))
    }

    fn press(w: &mut Window, ch: char) -> Request {
        key(w, KeyCode::Char(ch))
    }

    fn alt(w: &mut Window, ch: char) -> Request {
        w.handle_event(&Event::Key(KeyEvent::with(KeyCode::Char(ch), Modifiers::ALT)))
    }

    fn esc(w: &mut Window) {
        key(w, KeyCode::Escape);
    }

    fn enter(w: &mut Window) -> Request {
        key(w, KeyCode::Enter)
    }

    fn typed(w: &mut Window, text: &str) {
        for ch in text.chars() {
            press(w, ch);
        }
    }

    fn popup_title(w: &Window) -> Option<&str> {
        w.popup.as_ref().map(Popup::title)
    }

    fn popup_body(w: &Window) -> String {
        match &w.popup {
            Some(Popup::Message { body, .. }) => body.clone(),
            other => panic!("expected a message, got {other:?}"),
        }
    }

    // ── Insert mode ───────────────────────────────────────────────────────

    #[test]
    fn starts_in_insert_and_types() {
        let mut w = window("");
        typed(&mut w, "hi");
        enter(&mut w);
        key(&mut w, KeyCode::Tab);
        press(&mut w, 'x');
        assert_eq!(w.mode, Mode::Insert);
        assert_eq!(w.text.contents(), "hi\n\tx");
    }

    #[test]
    fn escape_enters_command_mode() {
        let mut w = window("abc");
        esc(&mut w);
        assert_eq!(w.mode, Mode::Command);
        press(&mut w, 'x');
        assert_eq!(w.text.contents(), "abc");
        assert_eq!(w.command_line.text(), "x");
    }

    #[test]
    fn ctrl_chords_do_not_type() {
        let mut w = window("");
        w.handle_event(&Event::Key(KeyEvent::with(KeyCode::Char('s'), Modifiers::CTRL)));
        assert_eq!(w.text.contents(), "");
    }

    #[test]
    fn paste_goes_to_the_focused_widget() {
        let mut w = window("");
        w.handle_event(&Event::Paste("one\r\ntwo".into()));
        assert_eq!(w.text.contents(), "one\ntwo");

        esc(&mut w);
        w.handle_event(&Event::Paste("?tw".into()));
        assert_eq!(w.command_line.text(), "?tw");
    }

    // ── Command mode ──────────────────────────────────────────────────────

    #[test]
    fn single_key_commands_fire_immediately() {
        let mut w = window("hello\nworld");
        esc(&mut w);
        press(&mut w, 'o');
        assert_eq!(w.mode, Mode::Insert);
        assert!(w.command_line.is_empty());
        assert_eq!(w.text.contents(), "hello\n\nworld");
        assert_eq!(w.text.cursor(), Position::new(1, 0));
    }

    #[test]
    fn gg_marks_the_first_char() {
        let mut w = window("first\nlast");
        w.text.set_cursor(Position::new(1, 2));
        esc(&mut w);
        typed(&mut w, "gg");
        assert_eq!(w.text.cursor(), Position::ZERO);
        assert_eq!(w.text.tags().ranges(Tag::Highlight).len(), 1);
        assert!(w.command_line.is_empty());
        assert_eq!(w.mode, Mode::Command);
    }

    #[test]
    fn search_tags_matches_and_clears_on_insert() {
        let mut w = window("abc abc abc");
        esc(&mut w);
        typed(&mut w, "?abc");
        assert_eq!(w.command_line.text(), "?abc");
        enter(&mut w);
        assert!(w.command_line.is_empty());
        assert_eq!(w.text.tags().ranges(Tag::Search).len(), 3);

        press(&mut w, 'i');
        assert!(w.text.tags().ranges(Tag::Search).is_empty());
    }

    #[test]
    fn missing_pattern_shows_an_error() {
        let mut w = window("abc");
        esc(&mut w);
        typed(&mut w, "?xyz");
        enter(&mut w);
        assert_eq!(popup_title(&w), Some(ERROR_TITLE));
        assert_eq!(
            popup_body(&w),
            "No patterns in this file match the specified pattern."
        );
        enter(&mut w);
        assert!(w.popup.is_none());
    }

    #[test]
    fn unknown_colon_command_shows_an_error() {
        let mut w = window("abc");
        esc(&mut w);
        typed(&mut w, ":z");
        enter(&mut w);
        assert_eq!(popup_body(&w), "Command not recognized.");
        assert!(w.command_line.is_empty());
    }

    #[test]
    fn backspace_can_complete_a_command() {
        let mut w = window("abc");
        esc(&mut w);
        typed(&mut w, "gx");
        key(&mut w, KeyCode::Backspace);
        press(&mut w, 'g');
        assert_eq!(w.text.tags().ranges(Tag::Highlight).len(), 1);
    }

    // ── Quit ──────────────────────────────────────────────────────────────

    #[test]
    fn quit_asks_first() {
        let mut w = window("abc");
        esc(&mut w);
        typed(&mut w, ":q");
        assert!(matches!(enter(&mut w), Request::Stay));
        assert_eq!(popup_title(&w), Some(QUIT_TITLE));
        assert!(matches!(press(&mut w, 'n'), Request::Stay));
        assert!(w.popup.is_none());

        typed(&mut w, ":q");
        enter(&mut w);
        assert!(matches!(press(&mut w, 'y'), Request::Close));
    }

    // ── Save ──────────────────────────────────────────────────────────────

    #[test]
    fn write_saves_with_txt_and_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("notes");
        let mut w = window("line one\nline two\n");
        esc(&mut w);
        typed(&mut w, ":w");
        enter(&mut w);
        assert_eq!(popup_title(&w), Some(SAVE_AS_TITLE));
        w.handle_event(&Event::Paste(name.display().to_string()));
        assert!(matches!(enter(&mut w), Request::Stay));

        let saved = dir.path().join("notes.txt");
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "line one\nline two\n");
        assert_eq!(w.text.buffer().path(), Some(saved.as_path()));
        assert!(w.popup.is_none());
    }

    #[test]
    fn write_quit_closes_after_saving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let mut w = window("x");
        esc(&mut w);
        typed(&mut w, ":wq");
        enter(&mut w);
        w.handle_event(&Event::Paste(path.display().to_string()));
        assert!(matches!(enter(&mut w), Request::Close));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn cancelled_write_quit_keeps_the_window() {
        let mut w = window("x");
        esc(&mut w);
        typed(&mut w, ":wq");
        enter(&mut w);
        assert!(matches!(key(&mut w, KeyCode::Escape), Request::Stay));
        assert!(w.popup.is_none());
    }

    #[test]
    fn cancelled_write_quit_closes_when_configured() {
        let config = Config {
            close_on_cancelled_wq: true,
            ..Config::default()
        };
        let mut w = Window::new(&config);
        esc(&mut w);
        typed(&mut w, ":wq");
        enter(&mut w);
        assert!(matches!(key(&mut w, KeyCode::Escape), Request::Close));
    }

    #[test]
    fn failed_save_reports_and_never_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let mut w = window("x");
        esc(&mut w);
        typed(&mut w, ":wq");
        enter(&mut w);
        w.handle_event(&Event::Paste(path.display().to_string()));
        assert!(matches!(enter(&mut w), Request::Stay));
        assert_eq!(popup_title(&w), Some(ERROR_TITLE));
    }

    // ── Menus ─────────────────────────────────────────────────────────────

    #[test]
    fn file_new_window() {
        let mut w = window("");
        key(&mut w, KeyCode::F(10));
        assert!(matches!(enter(&mut w), Request::NewWindow));
        assert!(!w.menu.is_open());
    }

    #[test]
    fn file_open_reads_into_a_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "from disk").unwrap();

        let mut w = window("");
        alt(&mut w, 'f');
        key(&mut w, KeyCode::Down);
        enter(&mut w);
        w.handle_event(&Event::Paste(path.display().to_string()));
        match enter(&mut w) {
            Request::Open(buffer) => assert_eq!(buffer.contents(), "from disk"),
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn file_open_missing_file_shows_an_error() {
        let mut w = window("");
        alt(&mut w, 'f');
        key(&mut w, KeyCode::Down);
        enter(&mut w);
        typed(&mut w, "/definitely/not/here.txt");
        assert!(matches!(enter(&mut w), Request::Stay));
        assert_eq!(popup_title(&w), Some(ERROR_TITLE));
    }

    #[test]
    fn menu_keys_do_not_reach_the_text() {
        let mut w = window("");
        alt(&mut w, 'h');
        press(&mut w, 'x');
        assert_eq!(w.text.contents(), "");
        esc(&mut w);
        assert_eq!(w.mode, Mode::Insert);
    }

    #[test]
    fn help_popups() {
        let mut w = window("");
        alt(&mut w, 'h');
        enter(&mut w);
        assert_eq!(popup_title(&w), Some(ABOUT_TITLE));
        enter(&mut w);
        alt(&mut w, 'h');
        key(&mut w, KeyCode::Down);
        enter(&mut w);
        assert_eq!(popup_body(&w), COMMANDS_MESSAGE);
    }

    #[test]
    fn theme_and_font_picks() {
        let mut w = window("");
        alt(&mut w, 't');
        key(&mut w, KeyCode::Down);
        enter(&mut w);
        assert_eq!(w.theme, Theme::preset(ThemeKind::DarkMode));

        alt(&mut w, 'o');
        key(&mut w, KeyCode::Down);
        enter(&mut w);
        assert_eq!(w.font.family, FontFamily::Times);

        alt(&mut w, 'o');
        key(&mut w, KeyCode::Up);
        key(&mut w, KeyCode::Up);
        enter(&mut w);
        assert_eq!(w.font.style, FontStyle::BoldItalic);
    }

    // ── Paint ─────────────────────────────────────────────────────────────

    #[test]
    fn paint_shows_mode_and_window_index() {
        let mut w = window("abc");
        let mut frame = FrameBuffer::new(60, 8);
        w.paint(&mut frame, 1, 3);
        assert!(frame.row_text(6).contains("INSERT"));
        assert!(frame.row_text(6).contains("2/3"));

        esc(&mut w);
        let cursor = w.paint(&mut frame, 1, 3);
        assert!(frame.row_text(6).contains("COMMAND"));
        assert_eq!(cursor, Some((0, 7, CursorShape::SteadyBlock)));
    }
}
