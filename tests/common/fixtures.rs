use base64::Engine;
use base64::engine::general_purpose::STANDARD;

fn encode(img: image::RgbImage, format: image::ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), format)
        .expect("in-memory image encoding");
    out
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(
        image::RgbImage::from_pixel(width, height, image::Rgb([46, 54, 63])),
        image::ImageFormat::Png,
    )
}

#[allow(dead_code)]
pub fn gif(width: u32, height: u32) -> Vec<u8> {
    encode(
        image::RgbImage::from_pixel(width, height, image::Rgb([255, 152, 0])),
        image::ImageFormat::Gif,
    )
}

/// Markdown-style image line carrying `bytes` as a data URI.
pub fn image_markup(alt: &str, mime: &str, bytes: &[u8]) -> String {
    format!("![{}](data:{};base64,{})", alt, mime, STANDARD.encode(bytes))
}

/// Body text long enough to need several pages.
pub fn long_content(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| format!("Paragrafo {} {}", i, "texto de exemplo para preencher a pagina ".repeat(12)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
