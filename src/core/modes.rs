//! Terminal mode flags
//!
//! A small bit-set toggled by DEC private mode sequences (`CSI ? Pn h/l`).
//! The parser is the only writer; the input encoder and renderer read it.
//! `ECHO` and `CURSOR_BLINK` are only stored here for the host to act on.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Display and input modes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modes: u16 {
        /// Translate LF to CRLF in input sent to the shell (DEC 1)
        const LF_TO_CRLF = 1 << 0;
        /// Echo input locally (DEC 2)
        const ECHO = 1 << 1;
        /// DECAWM - wrap at the right margin (DEC 7)
        const AUTO_WRAP = 1 << 2;
        /// Blinking cursor (DEC 12)
        const CURSOR_BLINK = 1 << 3;
        /// DECTCEM - show cursor (DEC 25)
        const CURSOR_VISIBLE = 1 << 4;
        /// Report focus in/out (DEC 1004)
        const FOCUS_TRACKING = 1 << 5;
        /// Wrap pasted text in ESC[200~ / ESC[201~ (DEC 9001, xterm 2004)
        const BRACKETED_PASTE = 1 << 6;
    }
}

impl Default for Modes {
    fn default() -> Self {
        Modes::AUTO_WRAP | Modes::CURSOR_VISIBLE
    }
}

impl Modes {
    /// Map a DEC private mode number to its flag
    pub fn from_dec_mode(mode: u16) -> Option<Modes> {
        match mode {
            1 => Some(Modes::LF_TO_CRLF),
            2 => Some(Modes::ECHO),
            7 => Some(Modes::AUTO_WRAP),
            12 => Some(Modes::CURSOR_BLINK),
            25 => Some(Modes::CURSOR_VISIBLE),
            1004 => Some(Modes::FOCUS_TRACKING),
            2004 | 9001 => Some(Modes::BRACKETED_PASTE),
            _ => None,
        }
    }

    /// Set or reset a DEC private mode (CSI ? Pn h / CSI ? Pn l).
    /// Returns true if the mode was recognized; unknown modes leave the set untouched.
    pub fn set_dec_mode(&mut self, mode: u16, enable: bool) -> bool {
        match Self::from_dec_mode(mode) {
            Some(flag) => {
                self.set(flag, enable);
                true
            }
            None => false,
        }
    }

    /// Reset all modes to default values
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default() {
        let modes = Modes::default();
        assert!(modes.contains(Modes::AUTO_WRAP));
        assert!(modes.contains(Modes::CURSOR_VISIBLE));
        assert!(!modes.contains(Modes::BRACKETED_PASTE));
        assert!(!modes.contains(Modes::LF_TO_CRLF));
        assert!(!modes.contains(Modes::ECHO));
    }

    #[test]
    fn test_dec_mode_set_reset() {
        let mut modes = Modes::default();

        assert!(modes.set_dec_mode(9001, true));
        assert!(modes.contains(Modes::BRACKETED_PASTE));

        assert!(modes.set_dec_mode(9001, false));
        assert!(!modes.contains(Modes::BRACKETED_PASTE));

        assert!(modes.set_dec_mode(25, false));
        assert!(!modes.contains(Modes::CURSOR_VISIBLE));
    }

    #[test]
    fn test_dec_mode_table() {
        let table = [
            (1, Modes::LF_TO_CRLF),
            (2, Modes::ECHO),
            (7, Modes::AUTO_WRAP),
            (12, Modes::CURSOR_BLINK),
            (25, Modes::CURSOR_VISIBLE),
            (1004, Modes::FOCUS_TRACKING),
            (9001, Modes::BRACKETED_PASTE),
            (2004, Modes::BRACKETED_PASTE),
        ];
        for (mode, flag) in table {
            assert_eq!(Modes::from_dec_mode(mode), Some(flag), "mode {mode}");
        }
    }

    #[test]
    fn test_setting_one_mode_keeps_others() {
        let mut modes = Modes::default();
        modes.set_dec_mode(1004, true);
        modes.set_dec_mode(1, true);
        assert!(modes.contains(Modes::FOCUS_TRACKING | Modes::LF_TO_CRLF | Modes::AUTO_WRAP));
    }

    #[test]
    fn test_unknown_mode() {
        let mut modes = Modes::default();
        assert!(!modes.set_dec_mode(9999, true));
        assert!(!modes.set_dec_mode(1049, true));
        assert_eq!(modes, Modes::default());
    }

    #[test]
    fn test_modes_reset() {
        let mut modes = Modes::empty();
        modes.reset();
        assert_eq!(modes, Modes::default());
    }
}
