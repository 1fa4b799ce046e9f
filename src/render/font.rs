//! Embedded bitmap fonts
//!
//! `Face::Regular` is a 5x7 font covering ASCII 32..=126. Each glyph is 7 rows;
//! the lower 5 bits of a row are pixels, MSB on the left. A character cell is
//! 6 px wide and 9 px tall at scale 1.
//!
//! `Face::Compact` is a 3x5 font for bubble ids: digits, letters (lowercase
//! folds to uppercase) and a few separators, in a 4x6 px cell.

pub const GLYPH_W: u32 = 5;
pub const GLYPH_H: u32 = 7;
pub const CHAR_W: u32 = 6;
pub const CHAR_H: u32 = 9;

#[rustfmt::skip]
const FONT_5X7: [[u8; 7]; 95] = [
    [0x00,0x00,0x00,0x00,0x00,0x00,0x00], // 32 ' '
    [0x04,0x04,0x04,0x04,0x04,0x00,0x04], // 33 '!'
    [0x0A,0x0A,0x0A,0x00,0x00,0x00,0x00], // 34 '"'
    [0x0A,0x0A,0x1F,0x0A,0x1F,0x0A,0x0A], // 35 '#'
    [0x04,0x0F,0x14,0x0E,0x05,0x1E,0x04], // 36 '$'
    [0x18,0x19,0x02,0x04,0x08,0x13,0x03], // 37 '%'
    [0x0C,0x12,0x14,0x08,0x15,0x12,0x0D], // 38 '&'
    [0x04,0x04,0x08,0x00,0x00,0x00,0x00], // 39 '''
    [0x02,0x04,0x08,0x08,0x08,0x04,0x02], // 40 '('
    [0x08,0x04,0x02,0x02,0x02,0x04,0x08], // 41 ')'
    [0x00,0x04,0x15,0x0E,0x15,0x04,0x00], // 42 '*'
    [0x00,0x04,0x04,0x1F,0x04,0x04,0x00], // 43 '+'
    [0x00,0x00,0x00,0x00,0x00,0x04,0x08], // 44 ','
    [0x00,0x00,0x00,0x1F,0x00,0x00,0x00], // 45 '-'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x04], // 46 '.'
    [0x00,0x01,0x02,0x04,0x08,0x10,0x00], // 47 '/'
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // 48 '0'
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // 49 '1'
    [0x0E,0x11,0x01,0x02,0x04,0x08,0x1F], // 50 '2'
    [0x1F,0x02,0x04,0x02,0x01,0x11,0x0E], // 51 '3'
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // 52 '4'
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // 53 '5'
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // 54 '6'
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // 55 '7'
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // 56 '8'
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // 57 '9'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x00], // 58 ':'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x08], // 59 ';'
    [0x02,0x04,0x08,0x10,0x08,0x04,0x02], // 60 '<'
    [0x00,0x00,0x1F,0x00,0x1F,0x00,0x00], // 61 '='
    [0x08,0x04,0x02,0x01,0x02,0x04,0x08], // 62 '>'
    [0x0E,0x11,0x01,0x02,0x04,0x00,0x04], // 63 '?'
    [0x0E,0x11,0x17,0x15,0x17,0x10,0x0E], // 64 '@'
    [0x0E,0x11,0x11,0x1F,0x11,0x11,0x11], // 65 'A'
    [0x1E,0x11,0x11,0x1E,0x11,0x11,0x1E], // 66 'B'
    [0x0E,0x11,0x10,0x10,0x10,0x11,0x0E], // 67 'C'
    [0x1C,0x12,0x11,0x11,0x11,0x12,0x1C], // 68 'D'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x1F], // 69 'E'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x10], // 70 'F'
    [0x0E,0x11,0x10,0x17,0x11,0x11,0x0F], // 71 'G'
    [0x11,0x11,0x11,0x1F,0x11,0x11,0x11], // 72 'H'
    [0x0E,0x04,0x04,0x04,0x04,0x04,0x0E], // 73 'I'
    [0x07,0x02,0x02,0x02,0x02,0x12,0x0C], // 74 'J'
    [0x11,0x12,0x14,0x18,0x14,0x12,0x11], // 75 'K'
    [0x10,0x10,0x10,0x10,0x10,0x10,0x1F], // 76 'L'
    [0x11,0x1B,0x15,0x15,0x11,0x11,0x11], // 77 'M'
    [0x11,0x11,0x19,0x15,0x13,0x11,0x11], // 78 'N'
    [0x0E,0x11,0x11,0x11,0x11,0x11,0x0E], // 79 'O'
    [0x1E,0x11,0x11,0x1E,0x10,0x10,0x10], // 80 'P'
    [0x0E,0x11,0x11,0x11,0x15,0x12,0x0D], // 81 'Q'
    [0x1E,0x11,0x11,0x1E,0x14,0x12,0x11], // 82 'R'
    [0x0F,0x10,0x10,0x0E,0x01,0x01,0x1E], // 83 'S'
    [0x1F,0x04,0x04,0x04,0x04,0x04,0x04], // 84 'T'
    [0x11,0x11,0x11,0x11,0x11,0x11,0x0E], // 85 'U'
    [0x11,0x11,0x11,0x11,0x11,0x0A,0x04], // 86 'V'
    [0x11,0x11,0x11,0x15,0x15,0x1B,0x11], // 87 'W'
    [0x11,0x11,0x0A,0x04,0x0A,0x11,0x11], // 88 'X'
    [0x11,0x11,0x0A,0x04,0x04,0x04,0x04], // 89 'Y'
    [0x1F,0x01,0x02,0x04,0x08,0x10,0x1F], // 90 'Z'
    [0x0E,0x08,0x08,0x08,0x08,0x08,0x0E], // 91 '['
    [0x00,0x10,0x08,0x04,0x02,0x01,0x00], // 92 '\'
    [0x0E,0x02,0x02,0x02,0x02,0x02,0x0E], // 93 ']'
    [0x04,0x0A,0x11,0x00,0x00,0x00,0x00], // 94 '^'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x1F], // 95 '_'
    [0x08,0x04,0x02,0x00,0x00,0x00,0x00], // 96 '`'
    [0x00,0x00,0x0E,0x01,0x0F,0x11,0x0F], // 97 'a'
    [0x10,0x10,0x16,0x19,0x11,0x11,0x1E], // 98 'b'
    [0x00,0x00,0x0E,0x10,0x10,0x11,0x0E], // 99 'c'
    [0x01,0x01,0x0D,0x13,0x11,0x11,0x0F], // 100 'd'
    [0x00,0x00,0x0E,0x11,0x1F,0x10,0x0E], // 101 'e'
    [0x06,0x09,0x08,0x1C,0x08,0x08,0x08], // 102 'f'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x0E], // 103 'g'
    [0x10,0x10,0x16,0x19,0x11,0x11,0x11], // 104 'h'
    [0x04,0x00,0x0C,0x04,0x04,0x04,0x0E], // 105 'i'
    [0x02,0x00,0x06,0x02,0x02,0x12,0x0C], // 106 'j'
    [0x10,0x10,0x12,0x14,0x18,0x14,0x12], // 107 'k'
    [0x0C,0x04,0x04,0x04,0x04,0x04,0x0E], // 108 'l'
    [0x00,0x00,0x1A,0x15,0x15,0x11,0x11], // 109 'm'
    [0x00,0x00,0x16,0x19,0x11,0x11,0x11], // 110 'n'
    [0x00,0x00,0x0E,0x11,0x11,0x11,0x0E], // 111 'o'
    [0x00,0x00,0x1E,0x11,0x1E,0x10,0x10], // 112 'p'
    [0x00,0x00,0x0D,0x13,0x0F,0x01,0x01], // 113 'q'
    [0x00,0x00,0x16,0x19,0x10,0x10,0x10], // 114 'r'
    [0x00,0x00,0x0E,0x10,0x0E,0x01,0x1E], // 115 's'
    [0x08,0x08,0x1C,0x08,0x08,0x09,0x06], // 116 't'
    [0x00,0x00,0x11,0x11,0x11,0x13,0x0D], // 117 'u'
    [0x00,0x00,0x11,0x11,0x11,0x0A,0x04], // 118 'v'
    [0x00,0x00,0x11,0x11,0x15,0x15,0x0A], // 119 'w'
    [0x00,0x00,0x11,0x0A,0x04,0x0A,0x11], // 120 'x'
    [0x00,0x00,0x11,0x11,0x0F,0x01,0x0E], // 121 'y'
    [0x00,0x00,0x1F,0x02,0x04,0x08,0x1F], // 122 'z'
    [0x02,0x04,0x04,0x08,0x04,0x04,0x02], // 123 '{'
    [0x04,0x04,0x04,0x04,0x04,0x04,0x04], // 124 '|'
    [0x08,0x04,0x04,0x02,0x04,0x04,0x08], // 125 '}'
    [0x00,0x00,0x08,0x15,0x02,0x00,0x00], // 126 '~'
];

/// Glyph rows for `ch`; characters outside printable ASCII render as '?'
pub fn glyph(ch: char) -> &'static [u8; 7] {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        &FONT_5X7[(code - 32) as usize]
    } else {
        &FONT_5X7[('?' as u32 - 32) as usize]
    }
}

/// Whether pixel (col, row) of the glyph is set
pub fn pixel_set(rows: &[u8; 7], col: u32, row: u32) -> bool {
    rows[row as usize] & (0x10 >> col) != 0
}

/// Size in pixels of a single line of regular text, unrotated
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    Face::Regular.text_size(text, scale)
}

/// Integer glyph scale that approximates a point size at the given dpi
pub fn scale_for_points(points: f64, dpi: f64) -> u32 {
    let px = points * dpi / 72.0;
    ((px / GLYPH_H as f64).round() as u32).max(1)
}

#[rustfmt::skip]
const DIGITS_3X5: [[u8; 5]; 10] = [
    [7,5,5,5,7], [2,6,2,2,7], [7,1,7,4,7], [7,1,7,1,7], [5,5,7,1,1],
    [7,4,7,1,7], [7,4,7,5,7], [7,1,1,2,2], [7,5,7,5,7], [7,5,7,1,7],
];

#[rustfmt::skip]
const LETTERS_3X5: [[u8; 5]; 26] = [
    [2,5,7,5,5], [6,5,6,5,6], [3,4,4,4,3], [6,5,5,5,6], [7,4,6,4,7], // A-E
    [7,4,6,4,4], [3,4,5,5,3], [5,5,7,5,5], [7,2,2,2,7], [1,1,1,5,2], // F-J
    [5,5,6,5,5], [4,4,4,4,7], [5,7,7,5,5], [6,5,5,5,5], [2,5,5,5,2], // K-O
    [6,5,6,4,4], [2,5,5,6,3], [6,5,6,5,5], [3,4,2,1,6], [7,2,2,2,2], // P-T
    [5,5,5,5,7], [5,5,5,5,2], [5,5,7,7,5], [5,5,2,5,5], [5,5,2,2,2], // U-Y
    [7,1,2,4,7],                                                      // Z
];

const UNKNOWN_3X5: [u8; 5] = [7, 1, 2, 0, 2];

fn compact_glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        c @ '0'..='9' => DIGITS_3X5[(c as u8 - b'0') as usize],
        c @ 'A'..='Z' => LETTERS_3X5[(c as u8 - b'A') as usize],
        ' ' => [0; 5],
        '-' => [0, 0, 7, 0, 0],
        '+' => [0, 2, 7, 2, 0],
        '.' => [0, 0, 0, 0, 2],
        '_' => [0, 0, 0, 0, 7],
        ':' => [0, 2, 0, 2, 0],
        '/' => [1, 1, 2, 4, 4],
        '#' => [5, 7, 5, 7, 5],
        _ => UNKNOWN_3X5,
    }
}

/// Which bitmap font a text is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    #[default]
    Regular,
    Compact,
}

impl Face {
    pub fn glyph_w(self) -> u32 {
        match self {
            Face::Regular => GLYPH_W,
            Face::Compact => 3,
        }
    }

    pub fn glyph_h(self) -> u32 {
        match self {
            Face::Regular => GLYPH_H,
            Face::Compact => 5,
        }
    }

    /// Horizontal advance per character at scale 1
    pub fn char_w(self) -> u32 {
        self.glyph_w() + 1
    }

    /// Line height at scale 1
    pub fn char_h(self) -> u32 {
        match self {
            Face::Regular => CHAR_H,
            Face::Compact => 6,
        }
    }

    /// Whether pixel (col, row) of `ch` is set in this face
    pub fn pixel(self, ch: char, col: u32, row: u32) -> bool {
        match self {
            Face::Regular => pixel_set(glyph(ch), col, row),
            Face::Compact => compact_glyph(ch)[row as usize] & (0x4 >> col) != 0,
        }
    }

    /// Size in pixels of a single line of text, unrotated
    pub fn text_size(self, text: &str, scale: u32) -> (u32, u32) {
        let n = text.chars().count() as u32;
        if n == 0 {
            return (0, 0);
        }
        let w = n * self.char_w() - (self.char_w() - self.glyph_w());
        (w * scale, self.glyph_h() * scale)
    }
}
