//! Terminal Cell
//!
//! A single grid position: one Unicode scalar value plus the colors and
//! attributes it was written with. Cells are plain `Copy` values; the grid,
//! scrollback and snapshots all hold them by value.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The character in this cell
    pub ch: char,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text attributes
    pub attrs: Attributes,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Default,
            bg: Color::Default,
            attrs: Attributes::empty(),
        }
    }
}

impl Cell {
    /// Create a new cell with a single character and default styling
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            ..Default::default()
        }
    }

    /// Check whether this cell is a default-styled space
    pub fn is_blank(&self) -> bool {
        *self == Cell::default()
    }
}

/// Color stored per cell.
///
/// Every SGR color form collapses to one of these variants when the
/// sequence is parsed: 8/16-color codes and 256-color indices below 16 become
/// `Indexed`, the 256-color cube, the grayscale ramp and truecolor become `Rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// Base 16-color palette entry (0-15)
    Indexed(u8),
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    pub const BRIGHT_BLACK: Color = Color::Indexed(8);
    pub const BRIGHT_RED: Color = Color::Indexed(9);
    pub const BRIGHT_GREEN: Color = Color::Indexed(10);
    pub const BRIGHT_YELLOW: Color = Color::Indexed(11);
    pub const BRIGHT_BLUE: Color = Color::Indexed(12);
    pub const BRIGHT_MAGENTA: Color = Color::Indexed(13);
    pub const BRIGHT_CYAN: Color = Color::Indexed(14);
    pub const BRIGHT_WHITE: Color = Color::Indexed(15);

    /// Resolve an xterm 256-color index.
    ///
    /// Indices below 16 stay palette references so they follow the
    /// configured palette; the rest resolve to concrete RGB.
    pub fn from_256(index: u8) -> Color {
        match index {
            0..=15 => Color::Indexed(index),
            16..=231 => {
                let n = index - 16;
                let r = n / 36;
                let g = (n / 6) % 6;
                let b = n % 6;
                Color::Rgb(r * 51, g * 51, b * 51)
            }
            232..=255 => {
                let gray = 8 + (index - 232) * 10;
                Color::Rgb(gray, gray, gray)
            }
        }
    }
}

bitflags! {
    /// Text attributes. Flags accumulate; only an explicit reset clears them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Attributes: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

/// The current drawing style applied to every emitted character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pen {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attributes,
}

impl Pen {
    /// A cell holding `ch` in this pen's style
    pub fn cell(&self, ch: char) -> Cell {
        Cell {
            ch,
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        }
    }

    /// A space in this pen's style, used to fill erased regions
    pub fn blank(&self) -> Cell {
        self.cell(' ')
    }

    /// Reset colors and attributes (SGR 0)
    pub fn reset(&mut self) {
        *self = Pen::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.fg, Color::Default);
        assert_eq!(cell.bg, Color::Default);
        assert!(cell.attrs.is_empty());
        assert!(cell.is_blank());
    }

    #[test]
    fn test_cell_new() {
        let cell = Cell::new('A');
        assert_eq!(cell.ch, 'A');
        assert!(!cell.is_blank());
    }

    #[test]
    fn test_default_is_not_black() {
        assert_ne!(Color::Default, Color::BLACK);
        assert_ne!(Color::Default, Color::WHITE);
    }

    #[test]
    fn test_from_256_base_palette() {
        assert_eq!(Color::from_256(0), Color::BLACK);
        assert_eq!(Color::from_256(9), Color::BRIGHT_RED);
        assert_eq!(Color::from_256(15), Color::BRIGHT_WHITE);
    }

    #[test]
    fn test_from_256_cube() {
        assert_eq!(Color::from_256(16), Color::Rgb(0, 0, 0));
        assert_eq!(Color::from_256(196), Color::Rgb(255, 0, 0));
        assert_eq!(Color::from_256(21), Color::Rgb(0, 0, 255));
        assert_eq!(Color::from_256(231), Color::Rgb(255, 255, 255));
        // 16 + 36*1 + 6*2 + 3
        assert_eq!(Color::from_256(67), Color::Rgb(51, 102, 153));
    }

    #[test]
    fn test_from_256_grayscale() {
        assert_eq!(Color::from_256(232), Color::Rgb(8, 8, 8));
        assert_eq!(Color::from_256(255), Color::Rgb(238, 238, 238));
    }

    #[test]
    fn test_attributes_accumulate() {
        let mut attrs = Attributes::BOLD;
        attrs.insert(Attributes::UNDERLINE);
        assert!(attrs.contains(Attributes::BOLD | Attributes::UNDERLINE));
        assert!(!attrs.contains(Attributes::ITALIC));
    }

    #[test]
    fn test_pen_cell_and_blank() {
        let pen = Pen {
            fg: Color::RED,
            bg: Color::BLUE,
            attrs: Attributes::BOLD,
        };
        let cell = pen.cell('x');
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.fg, Color::RED);
        assert_eq!(cell.bg, Color::BLUE);
        assert_eq!(pen.blank().ch, ' ');
        assert_eq!(pen.blank().bg, Color::BLUE);
    }

    #[test]
    fn test_pen_reset() {
        let mut pen = Pen {
            fg: Color::Rgb(1, 2, 3),
            bg: Color::GREEN,
            attrs: Attributes::all(),
        };
        pen.reset();
        assert_eq!(pen, Pen::default());
    }
}
