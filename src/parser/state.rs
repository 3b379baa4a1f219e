//! Parser State Machine
//!
//! Converts a byte stream into [`Action`]s. All state survives between
//! calls to [`Parser::feed`], so input may be split at any byte boundary
//! (inside a UTF-8 character, a CSI parameter list or an OSC string) and
//! still produce exactly the same actions as when fed in one piece.
//!
//! States:
//! - Ground: text and C0 controls
//! - Escape: after ESC, waiting for `[` or `]`
//! - Csi: collecting CSI parameter bytes until a final byte
//! - Osc: collecting an OSC body until BEL or ESC `\`
//! - OscEscape: ESC seen inside an OSC body, may be the ST terminator
//! - CarriageReturn: CR seen, waiting to learn whether LF follows
//!
//! Each state owns only the data it needs; accumulators are created on
//! entry and handed to the dispatcher (or dropped) on exit.

use tracing::{debug, trace};

use super::action::{Action, ControlCode, CsiAction, OscAction};
use super::utf8::{Utf8Decoder, Utf8Result};

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;
const BS: u8 = 0x08;
const TAB: u8 = 0x09;
const LF: u8 = 0x0A;
const FF: u8 = 0x0C;
const CR: u8 = 0x0D;

/// Longest CSI parameter string kept; later bytes are dropped until the final byte
const MAX_CSI_LEN: usize = 256;
/// Longest OSC body kept; later bytes are dropped until the terminator
const MAX_OSC_LEN: usize = 4096;

/// Parser state
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi(Vec<u8>),
    Osc(Vec<u8>),
    OscEscape(Vec<u8>),
    CarriageReturn,
}

/// The terminal parser
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    /// UTF-8 decoder state, kept apart from the sequence state
    utf8: Utf8Decoder,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(buf: &mut Vec<u8>, byte: u8, max: usize) {
    if buf.len() < max {
        buf.push(byte);
    } else {
        trace!(byte, "sequence too long, byte dropped");
    }
}

impl Parser {
    /// Create a new parser in the ground state
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            utf8: Utf8Decoder::new(),
        }
    }

    /// Reset the parser to initial state, dropping any partial input
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.utf8.reset();
    }

    /// True when no partial sequence or character is buffered
    pub fn is_ground(&self) -> bool {
        self.state == State::Ground && !self.utf8.is_pending()
    }

    /// Process a chunk of bytes, returning actions
    pub fn feed(&mut self, data: &[u8]) -> Vec<Action> {
        let mut actions = Vec::with_capacity(data.len());
        for &byte in data {
            self.advance(byte, &mut actions);
        }
        actions
    }

    /// Process a single byte
    fn advance(&mut self, byte: u8, out: &mut Vec<Action>) {
        let state = std::mem::replace(&mut self.state, State::Ground);
        self.state = match state {
            State::Ground => self.ground(byte, out),
            State::CarriageReturn => {
                if byte == LF {
                    out.push(Action::Control(ControlCode::LineFeed));
                    State::Ground
                } else {
                    out.push(Action::Control(ControlCode::CarriageReturn));
                    self.ground(byte, out)
                }
            }
            State::Escape => match byte {
                b'[' => State::Csi(Vec::new()),
                b']' => State::Osc(Vec::new()),
                _ => {
                    debug!(byte, "unsupported escape sequence ignored");
                    State::Ground
                }
            },
            State::Csi(mut body) => {
                if (0x40..=0x7E).contains(&byte) {
                    out.push(Action::Csi(CsiAction::parse(&body, byte)));
                    State::Ground
                } else {
                    push_bounded(&mut body, byte, MAX_CSI_LEN);
                    State::Csi(body)
                }
            }
            State::Osc(mut body) => match byte {
                ESC => State::OscEscape(body),
                BEL => {
                    out.push(Action::Osc(OscAction::parse(&body)));
                    State::Ground
                }
                _ => {
                    push_bounded(&mut body, byte, MAX_OSC_LEN);
                    State::Osc(body)
                }
            },
            State::OscEscape(mut body) => {
                if byte == b'\\' {
                    out.push(Action::Osc(OscAction::parse(&body)));
                    State::Ground
                } else {
                    push_bounded(&mut body, ESC, MAX_OSC_LEN);
                    push_bounded(&mut body, byte, MAX_OSC_LEN);
                    State::Osc(body)
                }
            }
        };
    }

    fn ground(&mut self, byte: u8, out: &mut Vec<Action>) -> State {
        let control = match byte {
            ESC => {
                self.drop_partial_char();
                return State::Escape;
            }
            CR => {
                self.drop_partial_char();
                return State::CarriageReturn;
            }
            LF => ControlCode::LineFeed,
            FF => ControlCode::FormFeed,
            TAB => ControlCode::Tab,
            BS => ControlCode::Backspace,
            0x00..=0x1F | 0x7F => {
                self.drop_partial_char();
                trace!(byte, "control byte ignored");
                return State::Ground;
            }
            _ => {
                self.decode(byte, out);
                return State::Ground;
            }
        };

        self.drop_partial_char();
        out.push(Action::Control(control));
        State::Ground
    }

    fn decode(&mut self, byte: u8, out: &mut Vec<Action>) {
        let mut result = self.utf8.feed(byte);
        if result == Utf8Result::Interrupted {
            trace!(byte, "truncated UTF-8 sequence dropped");
            result = self.utf8.feed(byte);
        }
        match result {
            Utf8Result::Char(c) => out.push(Action::Print(c)),
            Utf8Result::Invalid => trace!(byte, "invalid UTF-8 dropped"),
            Utf8Result::Pending | Utf8Result::Interrupted => {}
        }
    }

    fn drop_partial_char(&mut self) {
        if self.utf8.is_pending() {
            trace!("partial UTF-8 sequence interrupted by control byte");
            self.utf8.reset();
        }
    }
}
