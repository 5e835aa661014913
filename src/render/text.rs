//! Text measurement for label boxes.

use crate::defaults;
use crate::types::Size;

use super::Font;

/// Measures the box a string occupies when drawn in a font
pub trait TextMetrics {
    fn measure(&self, text: &str, font: &Font) -> Size;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &Font) -> Size,
{
    fn measure(&self, text: &str, font: &Font) -> Size {
        self(text, font)
    }
}

/// Proportional character widths, in hundredths of the average width,
/// for printable ASCII starting at the space character.
#[rustfmt::skip]
const CHAR_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of any character outside printable ASCII
const OTHER_CHAR_WIDTH: u32 = 100;

/// Built-in measurer: no font files, a fixed proportional width table and a
/// line height of 1.25 em.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalMetrics;

impl ProportionalMetrics {
    /// Text width in hundredths of an average character
    fn hundredths(text: &str) -> u32 {
        text.chars()
            .map(|c| match c {
                ' '..='~' => CHAR_WIDTHS[c as usize - 0x20] as u32,
                _ => OTHER_CHAR_WIDTH,
            })
            .sum()
    }
}

impl TextMetrics for ProportionalMetrics {
    fn measure(&self, text: &str, font: &Font) -> Size {
        let average = font.size * defaults::CHARWID_RATIO;
        Size::new(
            Self::hundredths(text) as f64 * 0.01 * average,
            font.size * defaults::LINE_HEIGHT,
        )
    }
}
