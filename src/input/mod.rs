//! Input Encoding Module
//!
//! Translates keystrokes, typed text, pastes and focus changes into the
//! bytes a shell expects. The encoder only reads [`Modes`]; the parser is the
//! one writer.
//!
//! Mode flags that matter here:
//! - `LF_TO_CRLF`: every LF sent to the shell becomes CR LF
//! - `BRACKETED_PASTE`: pastes are wrapped in `ESC [200~` / `ESC [201~`
//! - `FOCUS_TRACKING`: focus changes send `ESC [I` / `ESC [O`

use crate::core::Modes;

const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Get the modifier parameter for CSI sequences (1 + bitmask)
    /// Shift=1, Alt=2, Ctrl=4
    pub fn as_csi_param(&self) -> u8 {
        let mut param = 1;
        if self.shift {
            param += 1;
        }
        if self.alt {
            param += 2;
        }
        if self.ctrl {
            param += 4;
        }
        param
    }

    /// Check if any modifier is pressed
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// Special keys that produce escape sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,

    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Backspace,
    Tab,
    Enter,
    Escape,
}

/// Encode a special key press
pub fn encode_key(key: Key, modifiers: Modifiers, modes: Modes) -> Vec<u8> {
    match key {
        Key::Up => encode_cursor_key(b'A', modifiers),
        Key::Down => encode_cursor_key(b'B', modifiers),
        Key::Right => encode_cursor_key(b'C', modifiers),
        Key::Left => encode_cursor_key(b'D', modifiers),
        Key::Home => encode_cursor_key(b'H', modifiers),
        Key::End => encode_cursor_key(b'F', modifiers),

        Key::Insert => encode_tilde_key(2, modifiers),
        Key::Delete => encode_tilde_key(3, modifiers),
        Key::PageUp => encode_tilde_key(5, modifiers),
        Key::PageDown => encode_tilde_key(6, modifiers),

        Key::F1 => encode_function_key(b'P', modifiers),
        Key::F2 => encode_function_key(b'Q', modifiers),
        Key::F3 => encode_function_key(b'R', modifiers),
        Key::F4 => encode_function_key(b'S', modifiers),
        Key::F5 => encode_tilde_key(15, modifiers),
        Key::F6 => encode_tilde_key(17, modifiers),
        Key::F7 => encode_tilde_key(18, modifiers),
        Key::F8 => encode_tilde_key(19, modifiers),
        Key::F9 => encode_tilde_key(20, modifiers),
        Key::F10 => encode_tilde_key(21, modifiers),
        Key::F11 => encode_tilde_key(23, modifiers),
        Key::F12 => encode_tilde_key(24, modifiers),

        Key::Backspace => {
            if modifiers.ctrl {
                vec![0x08]
            } else if modifiers.alt {
                vec![0x1b, 0x7f]
            } else {
                vec![0x7f]
            }
        }
        Key::Tab => {
            if modifiers.shift {
                b"\x1b[Z".to_vec()
            } else {
                vec![b'\t']
            }
        }
        Key::Enter => {
            let mut bytes = if modifiers.alt { vec![0x1b] } else { Vec::new() };
            bytes.extend(translate_newlines(b"\n", modes));
            bytes
        }
        Key::Escape => vec![0x1b],
    }
}

/// Arrow, Home and End keys: `CSI x`, or `CSI 1;m x` with modifiers
fn encode_cursor_key(code: u8, modifiers: Modifiers) -> Vec<u8> {
    if modifiers.any() {
        format!("\x1b[1;{}{}", modifiers.as_csi_param(), code as char).into_bytes()
    } else {
        vec![0x1b, b'[', code]
    }
}

/// Keys of the form `CSI n ~`
fn encode_tilde_key(number: u8, modifiers: Modifiers) -> Vec<u8> {
    if modifiers.any() {
        format!("\x1b[{};{}~", number, modifiers.as_csi_param()).into_bytes()
    } else {
        format!("\x1b[{}~", number).into_bytes()
    }
}

/// F1-F4 use SS3 unless modified
fn encode_function_key(code: u8, modifiers: Modifiers) -> Vec<u8> {
    if modifiers.any() {
        format!("\x1b[1;{}{}", modifiers.as_csi_param(), code as char).into_bytes()
    } else {
        vec![0x1b, b'O', code]
    }
}

/// Encode a character typed with modifiers
pub fn encode_char(c: char, modifiers: Modifiers) -> Vec<u8> {
    let mut buf = [0u8; 4];
    if modifiers.ctrl && c.is_ascii_alphabetic() {
        let ctrl_char = (c.to_ascii_uppercase() as u8) - b'@';
        if modifiers.alt {
            vec![0x1b, ctrl_char]
        } else {
            vec![ctrl_char]
        }
    } else if modifiers.alt {
        let mut bytes = vec![0x1b];
        bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        bytes
    } else {
        c.encode_utf8(&mut buf).as_bytes().to_vec()
    }
}

/// Encode typed text. Printable characters are sent as UTF-8, LF is kept
/// (and translated per `LF_TO_CRLF`), other control characters are dropped.
pub fn encode_text(text: &str, modes: Modes) -> Vec<u8> {
    let filtered: String = text
        .chars()
        .filter(|&c| c == '\n' || (c as u32) >= 0x20)
        .collect();
    translate_newlines(filtered.as_bytes(), modes)
}

/// Encode pasted text, wrapping it in bracketed-paste markers when enabled.
/// End markers inside the text are removed so a paste cannot terminate itself.
pub fn encode_paste(text: &str, modes: Modes) -> Vec<u8> {
    let mut body = translate_newlines(text.as_bytes(), modes);
    if !modes.contains(Modes::BRACKETED_PASTE) {
        return body;
    }

    // Removing one marker can join the bytes around it into another
    while let Some(pos) = find(&body, PASTE_END) {
        body.drain(pos..pos + PASTE_END.len());
    }

    let mut bytes = Vec::with_capacity(body.len() + PASTE_START.len() + PASTE_END.len());
    bytes.extend_from_slice(PASTE_START);
    bytes.extend_from_slice(&body);
    bytes.extend_from_slice(PASTE_END);
    bytes
}

/// Encode a focus change; `None` unless focus tracking is on
pub fn encode_focus(focused: bool, modes: Modes) -> Option<Vec<u8>> {
    if !modes.contains(Modes::FOCUS_TRACKING) {
        return None;
    }
    Some(if focused {
        b"\x1b[I".to_vec()
    } else {
        b"\x1b[O".to_vec()
    })
}

/// Apply LF to CR LF translation when `LF_TO_CRLF` is set
pub fn translate_newlines(bytes: &[u8], modes: Modes) -> Vec<u8> {
    if !modes.contains(Modes::LF_TO_CRLF) {
        return bytes.to_vec();
    }
    let mut out = Vec::with_capacity(bytes.len() + 8);
    for &b in bytes {
        if b == b'\n' {
            out.push(b'\r');
        }
        out.push(b);
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crlf() -> Modes {
        Modes::default() | Modes::LF_TO_CRLF
    }

    #[test]
    fn test_encode_arrow_keys() {
        let none = Modifiers::default();
        let modes = Modes::default();
        assert_eq!(encode_key(Key::Up, none, modes), b"\x1b[A");
        assert_eq!(encode_key(Key::Down, none, modes), b"\x1b[B");
        assert_eq!(encode_key(Key::Right, none, modes), b"\x1b[C");
        assert_eq!(encode_key(Key::Left, none, modes), b"\x1b[D");
    }

    #[test]
    fn test_encode_modified_keys() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        let modes = Modes::default();
        assert_eq!(encode_key(Key::Left, ctrl, modes), b"\x1b[1;5D");
        assert_eq!(encode_key(Key::Delete, shift, modes), b"\x1b[3;2~");
        assert_eq!(encode_key(Key::F1, ctrl, modes), b"\x1b[1;5P");
        assert_eq!(encode_key(Key::Tab, shift, modes), b"\x1b[Z");
    }

    #[test]
    fn test_encode_navigation_and_function_keys() {
        let none = Modifiers::default();
        let modes = Modes::default();
        assert_eq!(encode_key(Key::Home, none, modes), b"\x1b[H");
        assert_eq!(encode_key(Key::End, none, modes), b"\x1b[F");
        assert_eq!(encode_key(Key::PageUp, none, modes), b"\x1b[5~");
        assert_eq!(encode_key(Key::F1, none, modes), b"\x1bOP");
        assert_eq!(encode_key(Key::F12, none, modes), b"\x1b[24~");
    }

    #[test]
    fn test_encode_backspace_and_enter() {
        let none = Modifiers::default();
        assert_eq!(encode_key(Key::Backspace, none, Modes::default()), vec![0x7f]);
        assert_eq!(encode_key(Key::Enter, none, Modes::default()), b"\n");
        assert_eq!(encode_key(Key::Enter, none, crlf()), b"\r\n");
    }

    #[test]
    fn test_encode_char() {
        let none = Modifiers::default();
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let alt = Modifiers {
            alt: true,
            ..Default::default()
        };
        assert_eq!(encode_char('a', none), b"a");
        assert_eq!(encode_char('c', ctrl), vec![0x03]);
        assert_eq!(encode_char('x', alt), b"\x1bx");
        assert_eq!(encode_char('é', none), "é".as_bytes());
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("hé\u{7}\n", Modes::default()), "hé\n".as_bytes());
        assert_eq!(encode_text("a\nb", crlf()), b"a\r\nb");
    }

    #[test]
    fn test_encode_paste() {
        assert_eq!(encode_paste("ls", Modes::default()), b"ls");

        let modes = Modes::default() | Modes::BRACKETED_PASTE;
        assert_eq!(encode_paste("ls", modes), b"\x1b[200~ls\x1b[201~");
        assert_eq!(
            encode_paste("a\x1b[201~b", modes),
            b"\x1b[200~ab\x1b[201~"
        );
        assert_eq!(
            encode_paste("\x1b[20\x1b[201~1~x", modes),
            b"\x1b[200~x\x1b[201~"
        );
    }

    #[test]
    fn test_encode_focus() {
        assert_eq!(encode_focus(true, Modes::default()), None);
        let modes = Modes::default() | Modes::FOCUS_TRACKING;
        assert_eq!(encode_focus(true, modes), Some(b"\x1b[I".to_vec()));
        assert_eq!(encode_focus(false, modes), Some(b"\x1b[O".to_vec()));
    }

    #[test]
    fn test_modifiers_csi_param() {
        assert_eq!(Modifiers::default().as_csi_param(), 1);
        let all = Modifiers {
            shift: true,
            ctrl: true,
            alt: true,
        };
        assert_eq!(all.as_csi_param(), 8);
        assert!(all.any());
    }
}
