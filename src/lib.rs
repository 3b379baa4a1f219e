//! vtgrid Terminal Engine Library
//!
//! Turns a byte stream produced by a shell into a grid of styled cells with
//! a bounded scrollback history. This crate provides:
//!
//! - `core`: Screen model, cells, cursor, grid, scrollback buffer, modes
//! - `parser`: Streaming VT/xterm control-sequence parser
//! - `input`: Encoding of keys, text, pastes and focus changes for the shell
//! - `config`: Engine configuration and color palette
//!
//! [`Terminal`] ties the parser to the screen and is the usual entry point.

pub mod config;
pub mod core;
pub mod input;
pub mod parser;
mod terminal;

pub use config::{ColorPalette, Config, ConfigError};
pub use terminal::{Terminal, TitleHook, TAB_WIDTH};
