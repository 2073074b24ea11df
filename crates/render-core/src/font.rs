//! The standard Type1 fonts used by both backends, with their advance widths.
//!
//! Widths come from the Adobe Core 14 AFM files and are expressed in 1/1000 em.

/// Advance widths for Helvetica (and Helvetica-Oblique), code points 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Advance widths for Helvetica-Bold, code points 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

const COURIER_WIDTH: u16 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl StandardFont {
    pub const ALL: [StandardFont; 4] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::Courier,
    ];

    pub fn postscript_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::Courier => "Courier",
        }
    }

    pub fn is_monospace(self) -> bool {
        matches!(self, StandardFont::Courier)
    }

    /// Advance width of a single character in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        if self.is_monospace() {
            return COURIER_WIDTH;
        }
        let table = match self {
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            _ => &HELVETICA_WIDTHS,
        };
        match c as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            // no-break space
            0xA0 => table[0],
            _ => 556,
        }
    }

    /// Width of `text` in points when set at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}
