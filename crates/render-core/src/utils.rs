use encoding_rs::WINDOWS_1252;

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Baseline of a text element whose box starts at `top`.
pub fn baseline_from_top(top: f32, font_size: f32) -> f32 {
    top + font_size * 0.8
}

/// Encodes text for a standard font using WinAnsiEncoding (Windows-1252).
///
/// Characters the code page cannot represent become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for c in s.chars() {
        let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if unmappable {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}
