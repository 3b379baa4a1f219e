//! Terminal escape sequence parser
//!
//! A stateful parser that converts bytes into terminal actions, plus the
//! decoding tables (SGR) that give those actions meaning.

mod action;
mod sgr;
mod state;
mod utf8;

pub use action::{Action, ControlCode, CsiAction, OscAction, Param};
pub use sgr::{parse_sgr, SgrAttribute};
pub use state::Parser;
pub use utf8::{Utf8Decoder, Utf8Result};
