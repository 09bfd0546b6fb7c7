//! # tvim-editor — Editor core for tvim
//!
//! Everything a window needs apart from the terminal itself:
//!
//! - **[`position`]** — `Position` (line, col) and half-open `Range`, 0-indexed
//! - **[`buffer`]** — `Buffer` wrapping a rope with editing, literal search and file I/O
//! - **[`cursor`]** — cursor movement with a sticky column
//! - **[`tag`]** — the highlight and search tags laid over the text
//! - **[`surface`]** — the `TextSurface` trait and its `TextArea` implementation
//! - **[`mode`]** — insert and command modes
//! - **[`command`]** — the command line and its parser
//! - **[`search`]** — tagging every match of a pattern
//! - **[`dispatch`]** — running parsed commands against a surface
//! - **[`popup`]** — messages, the quit question and file name prompts
//! - **[`menu`]** — the File, Help, Themes and Fonts menus
//! - **[`view`]** — painting a window into a framebuffer

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod menu;
pub mod mode;
pub mod popup;
pub mod position;
pub mod search;
pub mod surface;
pub mod tag;
pub mod view;

pub use error::EditorError;
