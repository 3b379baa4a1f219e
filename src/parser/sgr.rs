//! SGR (Select Graphic Rendition) decoding
//!
//! Turns the parameter list of a `CSI ... m` sequence into pen updates.
//! Empty parameters count as 0; malformed or unknown ones are skipped.

use tracing::debug;

use super::action::Param;
use crate::core::{Attributes, Color, Pen};

/// A single pen update decoded from an SGR sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrAttribute {
    /// Default colors, no attributes (SGR 0)
    Reset,
    Set(Attributes),
    Unset(Attributes),
    Foreground(Color),
    Background(Color),
}

impl SgrAttribute {
    /// Apply this update to `pen`
    pub fn apply(self, pen: &mut Pen) {
        match self {
            SgrAttribute::Reset => pen.reset(),
            SgrAttribute::Set(attrs) => pen.attrs.insert(attrs),
            SgrAttribute::Unset(attrs) => pen.attrs.remove(attrs),
            SgrAttribute::Foreground(color) => pen.fg = color,
            SgrAttribute::Background(color) => pen.bg = color,
        }
    }
}

/// Decode an SGR parameter list, left to right
pub fn parse_sgr(params: &[Param]) -> Vec<SgrAttribute> {
    if params.is_empty() {
        return vec![SgrAttribute::Reset];
    }

    let mut out = Vec::with_capacity(params.len());
    let mut i = 0;
    while i < params.len() {
        let code = match params[i] {
            Param::Empty => 0,
            Param::Number(n) => n,
            Param::Malformed => {
                i += 1;
                continue;
            }
        };

        let attr = match code {
            0 => Some(SgrAttribute::Reset),
            1 => Some(SgrAttribute::Set(Attributes::BOLD)),
            3 => Some(SgrAttribute::Set(Attributes::ITALIC)),
            4 => Some(SgrAttribute::Set(Attributes::UNDERLINE)),
            7 => Some(SgrAttribute::Set(Attributes::INVERSE)),
            22 => Some(SgrAttribute::Unset(Attributes::BOLD)),
            23 => Some(SgrAttribute::Unset(Attributes::ITALIC)),
            24 => Some(SgrAttribute::Unset(Attributes::UNDERLINE)),
            27 => Some(SgrAttribute::Unset(Attributes::INVERSE)),
            30..=37 => Some(SgrAttribute::Foreground(Color::Indexed((code - 30) as u8))),
            39 => Some(SgrAttribute::Foreground(Color::Default)),
            40..=47 => Some(SgrAttribute::Background(Color::Indexed((code - 40) as u8))),
            49 => Some(SgrAttribute::Background(Color::Default)),
            90..=97 => Some(SgrAttribute::Foreground(Color::Indexed((code - 90 + 8) as u8))),
            100..=107 => Some(SgrAttribute::Background(Color::Indexed((code - 100 + 8) as u8))),
            38 | 48 => {
                let (color, consumed) = parse_extended_color(&params[i + 1..]);
                i += consumed;
                color.map(|c| {
                    if code == 38 {
                        SgrAttribute::Foreground(c)
                    } else {
                        SgrAttribute::Background(c)
                    }
                })
            }
            _ => {
                debug!(code, "unsupported SGR code");
                None
            }
        };

        out.extend(attr);
        i += 1;
    }
    out
}

fn component(params: &[Param], index: usize) -> Option<u8> {
    params
        .get(index)
        .and_then(|p| p.value())
        .and_then(|v| u8::try_from(v).ok())
}

/// Decode the tail of `38;...` / `48;...`. Returns the color, if valid, and
/// how many parameters after the 38/48 were consumed.
fn parse_extended_color(rest: &[Param]) -> (Option<Color>, usize) {
    match rest.first().and_then(|p| p.value()) {
        Some(5) => {
            let color = component(rest, 1).map(Color::from_256);
            (color, 2.min(rest.len()))
        }
        Some(2) => {
            let color = match (component(rest, 1), component(rest, 2), component(rest, 3)) {
                (Some(r), Some(g), Some(b)) => Some(Color::Rgb(r, g, b)),
                _ => None,
            };
            (color, 4.min(rest.len()))
        }
        _ => {
            debug!("malformed extended color in SGR");
            (None, 1.min(rest.len()))
        }
    }
}
