//! Terminal Actions
//!
//! Semantic operations produced by the parser that should be applied to the screen.

use serde::{Deserialize, Serialize};

/// A terminal action produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Print a character at the cursor in the current pen
    Print(char),

    /// Execute a C0 control character
    Control(ControlCode),

    /// Execute a CSI (Control Sequence Introducer) command
    Csi(CsiAction),

    /// Execute an OSC (Operating System Command)
    Osc(OscAction),
}

/// C0 control codes the engine acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCode {
    /// BS - Backspace
    Backspace,
    /// HT - Horizontal Tab
    Tab,
    /// LF - Line Feed, also emitted once for a CR LF pair
    LineFeed,
    /// FF - Form Feed (clear screen and home)
    FormFeed,
    /// CR not followed by LF
    CarriageReturn,
}

/// One `;`-separated CSI parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Param {
    /// Nothing between the separators
    Empty,
    /// A decimal value that fits in 16 bits
    Number(u16),
    /// Non-digit content or an out-of-range value
    Malformed,
}

impl Param {
    fn parse(token: &[u8]) -> Param {
        if token.is_empty() {
            return Param::Empty;
        }
        if !token.iter().all(u8::is_ascii_digit) {
            return Param::Malformed;
        }
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .map_or(Param::Malformed, Param::Number)
    }

    /// The numeric value, if any
    pub fn value(self) -> Option<u16> {
        match self {
            Param::Number(n) => Some(n),
            Param::Empty | Param::Malformed => None,
        }
    }
}

/// CSI (Control Sequence Introducer) actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsiAction {
    /// The final character that identifies the command
    pub final_char: char,
    /// Parameters (semicolon-separated)
    pub params: Vec<Param>,
    /// Intermediate characters (0x20-0x2F)
    pub intermediates: Vec<char>,
    /// Private marker (`?`, `=`, `<` or `>`)
    pub private_marker: Option<char>,
}

impl CsiAction {
    pub fn new(final_char: char) -> Self {
        Self {
            final_char,
            params: Vec::new(),
            intermediates: Vec::new(),
            private_marker: None,
        }
    }

    /// Split an accumulated parameter string into marker, parameters and
    /// intermediates. Never fails; bad tokens become [`Param::Malformed`].
    pub fn parse(body: &[u8], final_byte: u8) -> Self {
        let mut csi = CsiAction::new(final_byte as char);

        let mut body = body;
        if let Some((&first, rest)) = body.split_first() {
            if (b'<'..=b'?').contains(&first) {
                csi.private_marker = Some(first as char);
                body = rest;
            }
        }

        let mut params = Vec::with_capacity(body.len());
        for &b in body {
            if (0x20..=0x2F).contains(&b) {
                csi.intermediates.push(b as char);
            } else {
                params.push(b);
            }
        }

        if !params.is_empty() {
            csi.params = params.split(|&b| b == b';').map(Param::parse).collect();
        }
        csi
    }

    /// Get parameter at index; missing, empty and malformed parameters give `default`
    pub fn param(&self, index: usize, default: u16) -> u16 {
        self.params
            .get(index)
            .and_then(|p| p.value())
            .unwrap_or(default)
    }

    /// Get parameter at index, also treating 0 as default
    pub fn param_or_default(&self, index: usize, default: u16) -> u16 {
        match self.param(index, default) {
            0 => default,
            v => v,
        }
    }

    /// Whether this is a DEC private sequence (`CSI ? ...`)
    pub fn is_private(&self) -> bool {
        self.private_marker == Some('?')
    }
}

/// OSC (Operating System Command) actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscAction {
    /// Set window title (OSC 0, OSC 2, or a body without a parameter)
    SetTitle(String),

    /// Set icon name (OSC 1)
    SetIconName(String),

    /// Clipboard operation (OSC 52)
    Clipboard(String),

    /// Any other numeric command
    Unknown { command: u16, data: String },

    /// Parameter that is not a number
    Malformed(String),
}

impl OscAction {
    /// Interpret an OSC body (everything between `ESC ]` and the terminator)
    pub fn parse(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let Some((command, data)) = text.split_once(';') else {
            return OscAction::SetTitle(text.into_owned());
        };

        let data = data.to_string();
        match command.parse::<u16>() {
            Ok(0 | 2) => OscAction::SetTitle(data),
            Ok(1) => OscAction::SetIconName(data),
            Ok(52) => OscAction::Clipboard(data),
            Ok(command) => OscAction::Unknown { command, data },
            Err(_) => OscAction::Malformed(text.into_owned()),
        }
    }
}
