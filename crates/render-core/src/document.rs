//! The article adapter shared by every backend.
//!
//! `ArticleDocument` turns each `add_*` call into a styled [`ContentBlock`] and
//! queues it. `build` lays the queue out once and replays the pages through the
//! backend's [`DocumentRenderer`].

use crate::block::{ContentBlock, DecodedImage, Rule, TextAlign, TextBlock, TextRun, TextStyle};
use crate::decoration::StandardPageDecoration;
use crate::error::RenderError;
use crate::font::StandardFont;
use crate::layout::{LayoutEngine, PageGeometry};
use crate::theme;
use crate::traits::{ArticleAdapter, DocumentRenderer};
use crate::types::DocumentMetadata;
use folio_types::{ArticleViewModel, Color, HeadingLevel};
use std::sync::Arc;

/// Replaces every regular space with a no-break space so the engine keeps
/// indentation and runs of spaces intact.
pub fn preserve_spaces(text: &str) -> String {
    text.replace(' ', "\u{a0}")
}

/// Splits a title after its first character.
///
/// Returns `None` for an empty title.
pub fn split_title(title: &str) -> Option<(&str, &str)> {
    let first = title.chars().next()?;
    Some(title.split_at(first.len_utf8()))
}

struct OpenState {
    metadata: DocumentMetadata,
    decoration: StandardPageDecoration,
    blocks: Vec<ContentBlock>,
}

enum DocumentState {
    Idle,
    Open(OpenState),
    Built { blocks: Vec<ContentBlock>, pages: usize },
}

pub struct ArticleDocument<R: DocumentRenderer> {
    renderer: R,
    engine: LayoutEngine,
    state: DocumentState,
}

impl<R: DocumentRenderer> ArticleDocument<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_geometry(renderer, PageGeometry::default())
    }

    pub fn with_geometry(renderer: R, geometry: PageGeometry) -> Self {
        Self {
            renderer,
            engine: LayoutEngine::new(geometry),
            state: DocumentState::Idle,
        }
    }

    /// Blocks queued so far, or the blocks of the last built document.
    pub fn blocks(&self) -> &[ContentBlock] {
        match &self.state {
            DocumentState::Idle => &[],
            DocumentState::Open(open) => &open.blocks,
            DocumentState::Built { blocks, .. } => blocks,
        }
    }

    /// Page count of the last built document.
    pub fn built_page_count(&self) -> Option<usize> {
        match self.state {
            DocumentState::Built { pages, .. } => Some(pages),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DocumentState::Open(_))
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn queue(&mut self) -> Result<&mut Vec<ContentBlock>, RenderError> {
        match &mut self.state {
            DocumentState::Open(open) => Ok(&mut open.blocks),
            DocumentState::Idle => Err(RenderError::DocumentNotOpen),
            DocumentState::Built { .. } => Err(RenderError::DocumentClosed),
        }
    }

    fn push(&mut self, block: ContentBlock) -> Result<(), RenderError> {
        self.queue()?.push(block);
        Ok(())
    }

    fn push_labelled(&mut self, label: &str, text: &str) -> Result<(), RenderError> {
        let queue = self.queue()?;
        let label_style = TextStyle::new(StandardFont::HelveticaBold, theme::SUMMARY_SIZE);
        let text_style = TextStyle::new(StandardFont::Helvetica, theme::SUMMARY_SIZE);
        queue.push(ContentBlock::Paragraph(TextBlock::single(label, label_style)));
        queue.push(ContentBlock::Paragraph(TextBlock::single(text, text_style)));
        Ok(())
    }

    fn rule(spacing: folio_types::Insets) -> ContentBlock {
        ContentBlock::Rule(Rule {
            color: theme::RULE_COLOR,
            thickness: theme::RULE_THICKNESS,
            spacing,
        })
    }
}

impl<R: DocumentRenderer> ArticleAdapter for ArticleDocument<R> {
    fn backend_name(&self) -> &'static str {
        self.renderer.name()
    }

    fn open_document(&mut self, model: &ArticleViewModel, site_name: &str) -> Result<(), RenderError> {
        if site_name.trim().is_empty() {
            return Err(RenderError::invalid_argument(
                "site_name",
                "the page header needs a site name",
            ));
        }
        log::debug!(
            "Opening article '{}' on the {} backend",
            model.title,
            self.renderer.name()
        );
        self.state = DocumentState::Open(OpenState {
            metadata: DocumentMetadata::from_article(model),
            decoration: StandardPageDecoration::new(site_name, model.volume, model.number),
            blocks: Vec::new(),
        });
        Ok(())
    }

    fn add_title(&mut self, title: &str) -> Result<(), RenderError> {
        let queue = self.queue()?;
        let (first, rest) = split_title(title)
            .ok_or_else(|| RenderError::invalid_argument("title", "title must not be empty"))?;
        let style = TextStyle::new(StandardFont::HelveticaBold, theme::TITLE_SIZE);
        let block = TextBlock::new(vec![
            TextRun::new(first, style.color(theme::ACCENT_COLOR)),
            TextRun::new(rest, style.color(Color::WHITE)),
        ])
        .align(TextAlign::Center)
        .padding(theme::TITLE_PADDING)
        .background(theme::PANEL_COLOR);
        queue.push(ContentBlock::Title(block));
        Ok(())
    }

    fn add_header_paragraph_top(&mut self, text: &str) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::HelveticaBold, theme::HEADER_TOP_SIZE)
            .leading(theme::HEADER_LEADING);
        self.push(ContentBlock::Paragraph(
            TextBlock::single(text, style).margin(theme::HEADER_TOP_MARGIN, 0.0),
        ))
    }

    fn add_header_paragraph(&mut self, text: &str) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::Helvetica, theme::HEADER_SIZE)
            .leading(theme::HEADER_LEADING);
        self.push(ContentBlock::Paragraph(TextBlock::single(text, style)))
    }

    fn add_header_paragraph_bottom(&mut self, text: &str) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::Helvetica, theme::HEADER_BOTTOM_SIZE)
            .leading(theme::HEADER_LEADING);
        self.push(ContentBlock::Paragraph(
            TextBlock::single(text, style).margin(0.0, theme::HEADER_BOTTOM_MARGIN),
        ))
    }

    fn add_line_top(&mut self) -> Result<(), RenderError> {
        self.push(Self::rule(theme::RULE_TOP_SPACING))
    }

    fn add_line_bottom(&mut self) -> Result<(), RenderError> {
        self.push(Self::rule(theme::RULE_BOTTOM_SPACING))
    }

    fn add_abstract(&mut self, text: &str) -> Result<(), RenderError> {
        self.push_labelled(theme::ABSTRACT_LABEL, text)
    }

    fn add_key_words(&mut self, text: &str) -> Result<(), RenderError> {
        self.push_labelled(theme::KEYWORDS_LABEL, text)
    }

    fn add_subtitle(&mut self, text: &str, level: HeadingLevel) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::HelveticaBold, level.font_size())
            .color(theme::BODY_COLOR);
        self.push(ContentBlock::Paragraph(
            TextBlock::single(text.trim(), style).margin(theme::SECTION_MARGIN_TOP, 0.0),
        ))
    }

    fn add_code(&mut self, text: &str) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::Courier, theme::CODE_SIZE).color(Color::WHITE);
        self.push(ContentBlock::Code(
            TextBlock::single(preserve_spaces(text), style)
                .margin(theme::SECTION_MARGIN_TOP, 0.0)
                .padding(theme::CODE_PADDING)
                .background(theme::PANEL_COLOR),
        ))
    }

    fn add_body(&mut self, text: &str) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::Helvetica, theme::BODY_SIZE).color(theme::BODY_COLOR);
        self.push(ContentBlock::Paragraph(
            TextBlock::single(text.trim(), style).margin(theme::SECTION_MARGIN_TOP, 0.0),
        ))
    }

    fn add_image(&mut self, image_bytes: &[u8]) -> Result<(), RenderError> {
        self.queue()?;
        let image = DecodedImage::decode(image_bytes)?;
        log::debug!(
            "Queued {:?} image {}x{}",
            image.format,
            image.width,
            image.height
        );
        self.push(ContentBlock::Image(Arc::new(image)))
    }

    fn add_author_about(&mut self, text: &str) -> Result<(), RenderError> {
        let style = TextStyle::new(StandardFont::Helvetica, theme::AUTHOR_ABOUT_SIZE);
        self.push(ContentBlock::Paragraph(TextBlock::single(text, style)))
    }

    fn build(&mut self) -> Result<Vec<u8>, RenderError> {
        let open = match std::mem::replace(&mut self.state, DocumentState::Idle) {
            DocumentState::Open(open) => open,
            DocumentState::Idle => return Err(RenderError::DocumentNotOpen),
            built @ DocumentState::Built { .. } => {
                self.state = built;
                return Err(RenderError::DocumentClosed);
            }
        };

        let laid_out = self.engine.layout(&open.blocks)?;
        let page_count = laid_out.pages.len();

        self.renderer.begin_document(&open.metadata, &laid_out.geometry)?;
        self.renderer.add_resources(&laid_out)?;
        for page in &laid_out.pages {
            self.renderer.render_page(page, &open.decoration)?;
        }
        let bytes = self.renderer.finish()?;

        log::info!(
            "Built '{}' with {}: {} page(s), {} bytes",
            open.metadata.title,
            self.renderer.name(),
            page_count,
            bytes.len()
        );
        self.state = DocumentState::Built {
            blocks: open.blocks,
            pages: page_count,
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::decoration::{PageCanvas, PageDecorator, PageInfo};
    use crate::layout::{LaidOutDocument, LaidOutPage};

    /// Records the calls it receives and hands back a fixed payload.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<String>,
        decorations: Vec<String>,
    }

    impl PageCanvas for Vec<String> {
        fn show_text(&mut self, text: &str, _x: f32, _y: f32, _f: StandardFont, _s: f32, _c: Color) {
            self.push(text.to_string());
        }
    }

    impl DocumentRenderer for RecordingRenderer {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn begin_document(&mut self, metadata: &DocumentMetadata, _g: &PageGeometry) -> Result<(), RenderError> {
            self.calls.push(format!("begin:{}", metadata.title));
            Ok(())
        }

        fn add_resources(&mut self, document: &LaidOutDocument) -> Result<(), RenderError> {
            self.calls.push(format!("resources:{}", document.images.len()));
            Ok(())
        }

        fn render_page(
            &mut self,
            page: &LaidOutPage,
            decorator: &dyn PageDecorator,
        ) -> Result<(), RenderError> {
            self.calls.push(format!("page:{}", page.number));
            let info = PageInfo {
                number: page.number,
                width: 595.0,
                height: 842.0,
            };
            decorator.decorate(&info, &mut self.decorations);
            Ok(())
        }

        fn finish(&mut self) -> Result<Vec<u8>, RenderError> {
            self.calls.push("finish".into());
            Ok(b"%PDF-test".to_vec())
        }
    }

    fn opened() -> ArticleDocument<RecordingRenderer> {
        let mut doc = ArticleDocument::new(RecordingRenderer::default());
        let model = ArticleViewModel::new("Hello", "Ana").with_issue(3, 4);
        doc.open_document(&model, "leaders.tec.br").unwrap();
        doc
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]));
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn title_only_document() {
        let mut doc = opened();
        doc.add_title("Hello").unwrap();
        let bytes = doc.build().unwrap();
        assert_eq!(bytes, b"%PDF-test");

        let blocks = doc.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind(), BlockKind::Title);
        let runs = blocks[0].runs();
        assert_eq!(runs[0].text, "H");
        assert_eq!(runs[1].text, "ello");
        assert_eq!(runs[0].style.color, theme::ACCENT_COLOR);
        assert_eq!(runs[1].style.color, Color::WHITE);
        assert_eq!(doc.built_page_count(), Some(1));
    }

    #[test]
    fn title_split_respects_multibyte_characters() {
        for title in ["Ärger", "日本語のタイトル", "😀 smile", "x"] {
            let (first, rest) = split_title(title).unwrap();
            assert_eq!(first.chars().count(), 1);
            assert_eq!(format!("{first}{rest}"), title);
        }
        assert_eq!(split_title(""), None);
    }

    #[test]
    fn empty_title_is_an_argument_error() {
        let mut doc = opened();
        let err = doc.add_title("").unwrap_err();
        assert!(matches!(err, RenderError::InvalidArgument { name: "title", .. }));
    }

    #[test]
    fn blank_site_name_is_an_argument_error() {
        let mut doc = ArticleDocument::new(RecordingRenderer::default());
        let err = doc
            .open_document(&ArticleViewModel::new("T", "A"), "  ")
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidArgument { name: "site_name", .. }));
        assert!(!doc.is_open());
    }

    #[test]
    fn subtitle_size_follows_heading_level() {
        let mut doc = opened();
        doc.add_subtitle("Small", HeadingLevel::from_tag("h3")).unwrap();
        doc.add_subtitle("Large", HeadingLevel::from_tag("h2")).unwrap();
        let sizes: Vec<f32> = doc.blocks().iter().map(|b| b.runs()[0].style.size).collect();
        assert_eq!(sizes, vec![10.0, 12.0]);
    }

    #[test]
    fn body_and_subtitle_are_trimmed() {
        let mut padded = opened();
        padded.add_body(" X ").unwrap();
        padded.add_subtitle("\tY\n", HeadingLevel::H2).unwrap();
        let mut plain = opened();
        plain.add_body("X").unwrap();
        plain.add_subtitle("Y", HeadingLevel::H2).unwrap();

        for (a, b) in padded.blocks().iter().zip(plain.blocks()) {
            assert_eq!(a.text_block(), b.text_block());
        }
    }

    #[test]
    fn code_replaces_only_spaces() {
        assert_eq!(preserve_spaces("a  b\tc\nd"), "a\u{a0}\u{a0}b\tc\nd");
        assert_eq!(preserve_spaces("no_spaces_here\n\t"), "no_spaces_here\n\t");

        let mut doc = opened();
        doc.add_code("    let x = 1;").unwrap();
        let block = &doc.blocks()[0];
        assert_eq!(block.kind(), BlockKind::Code);
        assert_eq!(block.runs()[0].text, "\u{a0}\u{a0}\u{a0}\u{a0}let\u{a0}x\u{a0}=\u{a0}1;");
        assert_eq!(block.runs()[0].style.font, StandardFont::Courier);
    }

    #[test]
    fn abstract_and_keywords_emit_label_then_text() {
        let mut doc = opened();
        doc.add_abstract("Summary").unwrap();
        doc.add_key_words("PDF, Rust").unwrap();
        let texts: Vec<String> = doc
            .blocks()
            .iter()
            .map(|b| b.text_block().unwrap().text())
            .collect();
        assert_eq!(texts, vec!["Abstract:", "Summary", "Key words:", "PDF, Rust"]);
        assert_eq!(doc.blocks()[0].runs()[0].style.font, StandardFont::HelveticaBold);
        assert_eq!(doc.blocks()[1].runs()[0].style.font, StandardFont::Helvetica);
    }

    #[test]
    fn blocks_keep_call_order() {
        let mut doc = opened();
        doc.add_title("T").unwrap();
        doc.add_header_paragraph_top("top").unwrap();
        doc.add_line_top().unwrap();
        doc.add_body("body").unwrap();
        doc.add_body("body").unwrap();
        doc.add_image(&png_bytes()).unwrap();
        doc.add_code("code").unwrap();
        doc.add_line_bottom().unwrap();
        doc.add_author_about("about").unwrap();

        let kinds: Vec<BlockKind> = doc.blocks().iter().map(ContentBlock::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Title,
                BlockKind::Paragraph,
                BlockKind::Rule,
                BlockKind::Paragraph,
                BlockKind::Paragraph,
                BlockKind::Image,
                BlockKind::Code,
                BlockKind::Rule,
                BlockKind::Paragraph,
            ]
        );
    }

    #[test]
    fn build_is_terminal() {
        let mut doc = opened();
        doc.add_body("text").unwrap();
        doc.build().unwrap();

        assert!(matches!(doc.add_body("more"), Err(RenderError::DocumentClosed)));
        assert!(matches!(doc.add_line_top(), Err(RenderError::DocumentClosed)));
        assert!(matches!(doc.build(), Err(RenderError::DocumentClosed)));
        assert_eq!(doc.blocks().len(), 1);

        doc.open_document(&ArticleViewModel::new("Again", "A"), "site").unwrap();
        assert!(doc.blocks().is_empty());
        doc.add_body("fresh").unwrap();
        assert!(doc.build().is_ok());
    }

    #[test]
    fn adding_before_open_fails() {
        let mut doc = ArticleDocument::new(RecordingRenderer::default());
        assert!(matches!(doc.add_title("T"), Err(RenderError::DocumentNotOpen)));
        assert!(matches!(doc.add_image(b"junk"), Err(RenderError::DocumentNotOpen)));
        assert!(matches!(doc.build(), Err(RenderError::DocumentNotOpen)));
    }

    #[test]
    fn bad_image_fails_at_add_time() {
        let mut doc = opened();
        let err = doc.add_image(b"not an image").unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedImage(_)));
        assert!(doc.blocks().is_empty());
    }

    #[test]
    fn build_drives_renderer_and_decorates_each_page() {
        let mut doc = opened();
        for _ in 0..200 {
            doc.add_body(&"lorem ipsum dolor ".repeat(20)).unwrap();
        }
        doc.build().unwrap();
        let pages = doc.built_page_count().unwrap();
        assert!(pages > 1);

        let calls = &doc.renderer().calls;
        assert_eq!(calls.first().map(String::as_str), Some("begin:Hello"));
        assert_eq!(calls[1], "resources:0");
        assert_eq!(calls.last().map(String::as_str), Some("finish"));
        assert_eq!(calls.len(), pages + 3);

        let decorations = &doc.renderer().decorations;
        assert_eq!(decorations.len(), pages * 3);
        assert_eq!(decorations[0], "leaders.tec.br");
        assert_eq!(decorations[1], "Volume 3, Number 4");
        assert_eq!(decorations[2], "1");
    }
}
