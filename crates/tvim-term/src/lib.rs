// SPDX-License-Identifier: MIT
//
// tvim-term — terminal backend for tvim.
//
// Raw mode and the alternate screen, a byte-level key parser, a cell grid
// painted every frame, and a renderer that writes only the cells that
// changed. Talks to the terminal directly with ANSI sequences and termios.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod reader;
pub mod style;
pub mod terminal;
pub mod writer;
