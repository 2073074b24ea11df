//! Content blocks queued by an article document between open and build.

use crate::error::RenderError;
use crate::font::StandardFont;
use crate::theme;
use folio_types::{Color, Insets};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
    /// Multiplier applied on top of [`theme::LINE_SPACING`].
    pub leading: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: StandardFont::Helvetica,
            size: theme::BODY_SIZE,
            color: theme::TEXT_COLOR,
            leading: 1.0,
        }
    }
}

impl TextStyle {
    pub fn new(font: StandardFont, size: f32) -> Self {
        Self {
            font,
            size,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    /// Height of one line box set in this style.
    pub fn line_height(&self) -> f32 {
        self.size * theme::LINE_SPACING * self.leading
    }
}

/// A piece of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A flowed box of styled runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub runs: Vec<TextRun>,
    pub align: TextAlign,
    /// Only `top` and `bottom` are used; blocks always span the content width.
    pub margin: Insets,
    pub padding: Insets,
    pub background: Option<Color>,
}

impl TextBlock {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            align: TextAlign::Left,
            margin: Insets::ZERO,
            padding: Insets::ZERO,
            background: None,
        }
    }

    pub fn single(text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(vec![TextRun::new(text, style)])
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn margin(mut self, top: f32, bottom: f32) -> Self {
        self.margin = Insets::vertical(top, bottom);
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Style used for empty lines and spacing decisions.
    pub fn base_style(&self) -> TextStyle {
        self.runs.first().map(|r| r.style).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub color: Color,
    pub thickness: f32,
    pub spacing: Insets,
}

/// Raster image decoded when it is added, so bad payloads fail early.
pub struct DecodedImage {
    pub format: image::ImageFormat,
    pub width: u32,
    pub height: u32,
    /// The payload exactly as supplied by the caller.
    pub bytes: Vec<u8>,
    /// 8-bit RGB pixels, row major.
    pub rgb: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl DecodedImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, RenderError> {
        let format = image::guess_format(bytes)?;
        if !matches!(
            format,
            image::ImageFormat::Png | image::ImageFormat::Jpeg | image::ImageFormat::Gif
        ) {
            return Err(RenderError::UnsupportedImage(format!(
                "{:?} images are not supported",
                format
            )));
        }
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::UnsupportedImage("image has no pixels".into()));
        }
        Ok(Self {
            format,
            width,
            height,
            bytes: bytes.to_vec(),
            rgb: rgb.into_raw(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Paragraph,
    Rule,
    Code,
    Image,
}

/// One discrete unit of document content, in visual order.
#[derive(Debug, Clone)]
pub enum ContentBlock {
    Title(TextBlock),
    Paragraph(TextBlock),
    Rule(Rule),
    /// Preformatted text; breaks only at newlines or when a line overflows.
    Code(TextBlock),
    Image(Arc<DecodedImage>),
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Title(_) => BlockKind::Title,
            ContentBlock::Paragraph(_) => BlockKind::Paragraph,
            ContentBlock::Rule(_) => BlockKind::Rule,
            ContentBlock::Code(_) => BlockKind::Code,
            ContentBlock::Image(_) => BlockKind::Image,
        }
    }

    pub fn text_block(&self) -> Option<&TextBlock> {
        match self {
            ContentBlock::Title(b) | ContentBlock::Paragraph(b) | ContentBlock::Code(b) => Some(b),
            ContentBlock::Rule(_) | ContentBlock::Image(_) => None,
        }
    }

    pub fn runs(&self) -> &[TextRun] {
        self.text_block().map(|b| b.runs.as_slice()).unwrap_or(&[])
    }
}
