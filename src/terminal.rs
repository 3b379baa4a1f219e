//! Terminal Executor
//!
//! Ties together the parser, screen model, mode flags and current pen, and
//! applies parsed actions to update the terminal state. This is the main
//! integration point between parsing and the screen model.

use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::core::{EraseRegion, Modes, Pen, Screen, ScreenState, SnapshotView, StateError};
use crate::parser::{parse_sgr, Action, ControlCode, CsiAction, OscAction, Parser};

/// Columns written for a horizontal tab
pub const TAB_WIDTH: usize = 4;

/// Receives window title changes (OSC 0 / OSC 2)
pub trait TitleHook {
    fn set_title(&mut self, title: &str);
}

impl<F: FnMut(&str)> TitleHook for F {
    fn set_title(&mut self, title: &str) {
        self(title)
    }
}

/// Terminal executor that processes parsed actions and updates the screen
pub struct Terminal {
    /// The terminal screen
    screen: Screen,
    /// The escape sequence parser
    parser: Parser,
    /// Mode flags toggled by DEC private modes
    modes: Modes,
    /// Style applied to every printed character and erased cell
    pen: Pen,
    /// Last title set via OSC
    title: String,
    title_hook: Option<Box<dyn TitleHook>>,
}

impl Terminal {
    /// Create a new terminal with the given dimensions.
    /// Panics if `scrollback_capacity` is zero; use [`Terminal::with_config`]
    /// for validated construction.
    pub fn new(width: usize, height: usize, scrollback_capacity: usize) -> Self {
        Self {
            screen: Screen::new(width, height, scrollback_capacity),
            parser: Parser::new(),
            modes: Modes::default(),
            pen: Pen::default(),
            title: String::new(),
            title_hook: None,
        }
    }

    /// Create a terminal sized by a validated configuration
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.columns,
            config.rows,
            config.scrollback_lines,
        ))
    }

    /// Install the callback invoked whenever the title changes
    pub fn set_title_hook(&mut self, hook: impl TitleHook + 'static) {
        self.title_hook = Some(Box::new(hook));
    }

    /// Get a reference to the screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Current mode flags
    pub fn modes(&self) -> Modes {
        self.modes
    }

    /// Mutable mode flags, for hosts that toggle modes out of band
    pub fn modes_mut(&mut self) -> &mut Modes {
        &mut self.modes
    }

    /// Current drawing style
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Window title as last set by the shell
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Process output bytes from the shell. Partial sequences at the end of
    /// `data` are kept and completed by the next call.
    pub fn process_chunk(&mut self, data: &[u8]) {
        let actions = self.parser.feed(data);
        for action in actions {
            self.apply_action(action);
        }
    }

    /// Resize the screen. Must not be called while a chunk is being processed,
    /// which `&mut self` already guarantees.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.screen.resize(width, height);
    }

    /// Renderer view at `scrollback_offset` rows back from the live screen
    pub fn snapshot_view(&self, scrollback_offset: usize) -> SnapshotView<'_> {
        self.screen.snapshot_view(scrollback_offset)
    }

    /// Save the screen buffer
    pub fn state(&self) -> ScreenState {
        self.screen.state()
    }

    /// Restore a previously saved screen buffer
    pub fn restore_state(&mut self, state: ScreenState) -> Result<(), StateError> {
        self.screen.restore(state)
    }

    /// Full reset: parser, pen, modes, title and screen contents
    pub fn reset(&mut self) {
        self.parser.reset();
        self.pen.reset();
        self.modes.reset();
        self.title.clear();
        self.screen.reset();
    }

    /// Apply a single parsed action to the screen
    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Print(c) => self.print(c),
            Action::Control(code) => self.execute_control(code),
            Action::Csi(csi) => self.execute_csi(&csi),
            Action::Osc(osc) => self.execute_osc(osc),
        }
    }

    fn print(&mut self, c: char) {
        let autowrap = self.modes.contains(Modes::AUTO_WRAP);
        self.screen.print(self.pen.cell(c), autowrap);
    }

    /// Execute a C0 control character
    fn execute_control(&mut self, code: ControlCode) {
        match code {
            ControlCode::Backspace => self.screen.backspace(),
            ControlCode::Tab => {
                for _ in 0..TAB_WIDTH {
                    self.print(' ');
                }
            }
            ControlCode::LineFeed => {
                self.screen.new_line();
                self.screen.carriage_return();
            }
            ControlCode::FormFeed => self.screen.erase(EraseRegion::Screen, self.pen.blank()),
            ControlCode::CarriageReturn => self.screen.carriage_return(),
        }
    }

    /// Execute a CSI sequence
    fn execute_csi(&mut self, csi: &CsiAction) {
        if !csi.intermediates.is_empty() {
            debug!(?csi, "CSI with intermediates ignored");
            return;
        }

        match csi.private_marker {
            None => {}
            Some('?') => return self.execute_csi_private(csi),
            Some('=') => return self.execute_csi_graphic_mode(csi),
            Some(_) => {
                debug!(?csi, "unsupported private CSI ignored");
                return;
            }
        }

        match csi.final_char {
            // CUU - Cursor Up
            'A' => self.screen.move_up(csi.param_or_default(0, 1) as usize),
            // CUD - Cursor Down
            'B' => self.screen.move_down(csi.param_or_default(0, 1) as usize),
            // CUF - Cursor Forward
            'C' => self.screen.move_right(csi.param_or_default(0, 1) as usize),
            // CUB - Cursor Backward
            'D' => self.screen.move_left(csi.param_or_default(0, 1) as usize),
            // CHA - Cursor Horizontal Absolute (1-based)
            'G' => {
                let col = csi.param_or_default(0, 1) as usize - 1;
                self.screen.set_column(col);
            }
            // CUP / HVP - Cursor Position (1-based row;col)
            'H' | 'f' => {
                let row = csi.param_or_default(0, 1) as usize - 1;
                let col = csi.param_or_default(1, 1) as usize - 1;
                self.screen.move_to(col, row);
            }
            // ED - Erase in Display
            'J' => {
                let region = match csi.param(0, 0) {
                    0 => EraseRegion::ToEndOfScreen,
                    1 => EraseRegion::ToStartOfScreen,
                    2 => EraseRegion::Screen,
                    3 => EraseRegion::Scrollback,
                    mode => {
                        debug!(mode, "unknown erase-in-display mode");
                        return;
                    }
                };
                self.screen.erase(region, self.pen.blank());
            }
            // EL - Erase in Line
            'K' => {
                let region = match csi.param(0, 0) {
                    0 => EraseRegion::ToEndOfLine,
                    1 => EraseRegion::ToStartOfLine,
                    2 => EraseRegion::Line,
                    mode => {
                        debug!(mode, "unknown erase-in-line mode");
                        return;
                    }
                };
                self.screen.erase(region, self.pen.blank());
            }
            // ECH - Erase Characters
            'X' => {
                let n = csi.param_or_default(0, 1) as usize;
                self.screen.erase(EraseRegion::Chars(n), self.pen.blank());
            }
            // SGR - Select Graphic Rendition
            'm' => {
                for attr in parse_sgr(&csi.params) {
                    attr.apply(&mut self.pen);
                }
            }
            'h' | 'l' => debug!(?csi.params, "ANSI mode change ignored"),
            _ => debug!(?csi, "unhandled CSI sequence"),
        }
    }

    /// DEC private modes (CSI ? Pn h / CSI ? Pn l)
    fn execute_csi_private(&mut self, csi: &CsiAction) {
        let enable = match csi.final_char {
            'h' => true,
            'l' => false,
            _ => {
                debug!(?csi, "unhandled private CSI sequence");
                return;
            }
        };

        for param in &csi.params {
            let Some(mode) = param.value() else {
                continue;
            };
            if !self.modes.set_dec_mode(mode, enable) {
                debug!(mode, enable, "unknown DEC mode ignored");
            }
        }
    }

    /// Graphic modes (CSI = Pn h / CSI = Pn l); only line wrapping is honored
    fn execute_csi_graphic_mode(&mut self, csi: &CsiAction) {
        let enable = match csi.final_char {
            'h' => true,
            'l' => false,
            _ => {
                debug!(?csi, "unhandled graphic mode sequence");
                return;
            }
        };

        for param in &csi.params {
            match param.value() {
                Some(7) => self.modes.set(Modes::AUTO_WRAP, enable),
                other => debug!(mode = ?other, "graphic mode ignored"),
            }
        }
    }

    /// Execute an OSC command
    fn execute_osc(&mut self, osc: OscAction) {
        match osc {
            OscAction::SetTitle(title) => {
                if let Some(hook) = self.title_hook.as_mut() {
                    hook.set_title(&title);
                }
                self.title = title;
            }
            other @ (OscAction::SetIconName(_) | OscAction::Clipboard(_)) => {
                debug!(?other, "OSC recognized, no-op");
            }
            OscAction::Unknown { command, .. } => debug!(command, "unknown OSC ignored"),
            OscAction::Malformed(body) => debug!(%body, "malformed OSC ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Attributes, Color};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn term() -> Terminal {
        Terminal::new(80, 24, 1000)
    }

    fn cursor(t: &Terminal) -> (usize, usize) {
        (t.screen().cursor().x, t.screen().cursor().y)
    }

    #[test]
    fn test_terminal_print() {
        let mut t = term();
        t.process_chunk(b"Hello, World!");
        assert_eq!(t.screen().row_text(0), "Hello, World!");
        assert_eq!(cursor(&t), (13, 0));
    }

    #[test]
    fn test_terminal_cursor_movement() {
        let mut t = term();
        t.process_chunk(b"\x1b[10;20H");
        assert_eq!(cursor(&t), (19, 9));

        t.process_chunk(b"\x1b[5A");
        assert_eq!(cursor(&t), (19, 4));
        t.process_chunk(b"\x1b[B\x1b[3C\x1b[2D");
        assert_eq!(cursor(&t), (20, 5));
        t.process_chunk(b"\x1b[100A\x1b[999D");
        assert_eq!(cursor(&t), (0, 0));
    }

    #[test]
    fn test_terminal_cup_defaults() {
        let mut t = term();
        t.process_chunk(b"\x1b[5;5H\x1b[H");
        assert_eq!(cursor(&t), (0, 0));
        t.process_chunk(b"\x1b[3H");
        assert_eq!(cursor(&t), (0, 2));
        t.process_chunk(b"\x1b[;7H");
        assert_eq!(cursor(&t), (6, 0));
        t.process_chunk(b"\x1b[0;0f");
        assert_eq!(cursor(&t), (0, 0));
        t.process_chunk(b"\x1b[999;999H");
        assert_eq!(cursor(&t), (79, 23));
    }

    #[test]
    fn test_terminal_column_absolute() {
        let mut t = term();
        t.process_chunk(b"abc\x1b[10G");
        assert_eq!(cursor(&t), (9, 0));
        t.process_chunk(b"\x1b[G");
        assert_eq!(cursor(&t), (0, 0));
    }

    #[test]
    fn test_terminal_colors() {
        let mut t = term();
        t.process_chunk(b"\x1b[31;44mColored");
        assert_eq!(t.pen().fg, Color::RED);
        assert_eq!(t.pen().bg, Color::BLUE);
        let cell = t.screen().cell(0, 0).unwrap();
        assert_eq!(cell.ch, 'C');
        assert_eq!(cell.fg, Color::RED);
        assert_eq!(cell.bg, Color::BLUE);
    }

    #[test]
    fn test_terminal_sgr_reset() {
        let mut t = term();
        t.process_chunk(b"\x1b[1;3;4;7;38;2;1;2;3;48;5;200m");
        assert_ne!(t.pen(), Pen::default());
        t.process_chunk(b"\x1b[0m");
        assert_eq!(t.pen(), Pen::default());
        t.process_chunk(b"\x1b[1m\x1b[m");
        assert!(t.pen().attrs.is_empty());
    }

    #[test]
    fn test_terminal_attributes_styled_cells() {
        let mut t = term();
        t.process_chunk(b"\x1b[1mB\x1b[4mU");
        assert_eq!(t.screen().cell(0, 0).unwrap().attrs, Attributes::BOLD);
        assert_eq!(
            t.screen().cell(1, 0).unwrap().attrs,
            Attributes::BOLD | Attributes::UNDERLINE
        );
    }

    #[test]
    fn test_terminal_erase_uses_pen() {
        let mut t = Terminal::new(10, 3, 100);
        t.process_chunk(b"Line1\r\nLine2\r\nLine3");
        t.process_chunk(b"\x1b[42m\x1b[2J");

        assert_eq!(cursor(&t), (0, 0));
        for y in 0..3 {
            for x in 0..10 {
                let cell = t.screen().cell(x, y).unwrap();
                assert_eq!(cell.ch, ' ');
                assert_eq!(cell.bg, Color::GREEN);
            }
        }
    }

    #[test]
    fn test_terminal_erase_in_line_and_chars() {
        let mut t = Terminal::new(10, 1, 100);
        t.process_chunk(b"0123456789\x1b[4G\x1b[2X");
        assert_eq!(t.screen().row_text(0), "012  56789");
        t.process_chunk(b"\x1b[K");
        assert_eq!(t.screen().row_text(0), "012");
        t.process_chunk(b"\x1b[2K");
        assert_eq!(t.screen().row_text(0), "");
    }

    #[test]
    fn test_terminal_clear_scrollback() {
        let mut t = Terminal::new(5, 2, 100);
        t.process_chunk(b"a\nb\nc\nd");
        assert_eq!(t.screen().scrollback_len(), 2);
        t.process_chunk(b"\x1b[3J");
        assert_eq!(t.screen().scrollback_len(), 0);
        assert_eq!(t.screen().row_text(1), "d");
    }

    #[test]
    fn test_terminal_line_feed_resets_column() {
        let mut t = term();
        t.process_chunk(b"abc\ndef");
        assert_eq!(t.screen().row_text(0), "abc");
        assert_eq!(t.screen().row_text(1), "def");
    }

    #[test]
    fn test_terminal_lone_cr_resets_column_only() {
        let mut t = term();
        t.process_chunk(b"hello\rJ");
        assert_eq!(t.screen().row_text(0), "Jello");
        assert_eq!(cursor(&t), (1, 0));
    }

    #[test]
    fn test_terminal_crlf_split_across_chunks() {
        let mut t = term();
        t.process_chunk(b"a\r");
        t.process_chunk(b"\nb");
        assert_eq!(t.screen().row_text(1), "b");
        assert_eq!(cursor(&t), (1, 1));
    }

    #[test]
    fn test_terminal_tab_and_backspace() {
        let mut t = term();
        t.process_chunk(b"\x1b[41m\tx\x08\x08y");
        assert_eq!(t.screen().row_text(0), "   yx");
        assert_eq!(t.screen().cell(0, 0).unwrap().bg, Color::RED);
        t.process_chunk(b"\r\x08\x08");
        assert_eq!(cursor(&t), (0, 0));
    }

    #[test]
    fn test_terminal_form_feed() {
        let mut t = term();
        t.process_chunk(b"abc\ndef\x0c");
        assert_eq!(cursor(&t), (0, 0));
        assert_eq!(t.screen().to_text(), "");
    }

    #[test]
    fn test_terminal_autowrap_toggle() {
        let mut t = Terminal::new(3, 2, 10);
        t.process_chunk(b"abcd");
        assert_eq!(t.screen().row_text(1), "d");

        let mut t = Terminal::new(3, 2, 10);
        t.process_chunk(b"\x1b[?7labcd");
        assert_eq!(t.screen().row_text(0), "abd");
        assert!(!t.modes().contains(Modes::AUTO_WRAP));

        t.process_chunk(b"\x1b[=7h");
        assert!(t.modes().contains(Modes::AUTO_WRAP));
    }

    #[test]
    fn test_terminal_dec_modes() {
        let mut t = term();
        t.process_chunk(b"\x1b[?1;2;1004;9001h\x1b[?25l");
        let modes = t.modes();
        assert!(modes.contains(Modes::LF_TO_CRLF));
        assert!(modes.contains(Modes::ECHO));
        assert!(modes.contains(Modes::FOCUS_TRACKING));
        assert!(modes.contains(Modes::BRACKETED_PASTE));
        assert!(!modes.contains(Modes::CURSOR_VISIBLE));

        t.process_chunk(b"\x1b[?9001l\x1b[?1049h\x1b[?12345h");
        assert!(!t.modes().contains(Modes::BRACKETED_PASTE));
        assert!(t.modes().contains(Modes::FOCUS_TRACKING));
    }

    #[test]
    fn test_terminal_title() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut t = term();
        t.set_title_hook(move |title: &str| sink.borrow_mut().push(title.to_string()));
        t.process_chunk(b"\x1b]0;first\x07\x1b]2;second\x1b\\\x1b]bare\x07\x1b]1;icon\x07");

        assert_eq!(t.title(), "bare");
        assert_eq!(*seen.borrow(), vec!["first", "second", "bare"]);
    }

    #[test]
    fn test_terminal_unknown_sequences_are_harmless() {
        let mut t = term();
        t.process_chunk(b"\x1b[5n\x1b[>c\x1b[2 q\x1b]777;x\x07\x1b[99Jok");
        assert_eq!(t.screen().row_text(0), "ok");
    }

    #[test]
    fn test_terminal_truecolor() {
        let mut t = term();
        t.process_chunk(b"\x1b[38;2;255;128;0mX");
        assert_eq!(t.screen().cell(0, 0).unwrap().fg, Color::Rgb(255, 128, 0));
    }

    #[test]
    fn test_terminal_state_round_trip() {
        let mut t = Terminal::new(6, 2, 10);
        t.process_chunk(b"\x1b[33mone\ntwo\nthree");
        let state = t.state();

        let mut other = Terminal::new(6, 2, 10);
        other.restore_state(state.clone()).unwrap();
        assert_eq!(other.state(), state);
        assert_eq!(other.snapshot_view(1).to_text(), t.snapshot_view(1).to_text());
    }

    #[test]
    fn test_terminal_with_config() {
        let config = Config {
            columns: 20,
            rows: 5,
            scrollback_lines: 7,
            ..Config::default()
        };
        let t = Terminal::with_config(&config).unwrap();
        assert_eq!(t.screen().width(), 20);
        assert_eq!(t.screen().height(), 5);
        assert_eq!(t.screen().scrollback().capacity(), 7);

        let bad = Config {
            scrollback_lines: 0,
            ..Config::default()
        };
        assert!(Terminal::with_config(&bad).is_err());
    }

    #[test]
    fn test_terminal_reset() {
        let mut t = term();
        t.process_chunk(b"\x1b[31m\x1b[?25l\x1b]0;x\x07text\x1b[3");
        t.reset();
        assert_eq!(t.pen(), Pen::default());
        assert_eq!(t.modes(), Modes::default());
        assert_eq!(t.title(), "");
        t.process_chunk(b"1m");
        assert_eq!(t.screen().row_text(0), "1m");
    }
}
