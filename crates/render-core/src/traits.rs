use crate::decoration::PageDecorator;
use crate::error::RenderError;
use crate::layout::{LaidOutDocument, LaidOutPage, PageGeometry};
use crate::types::DocumentMetadata;
use folio_types::{ArticleViewModel, HeadingLevel};

/// The ordered content-append contract an article PDF is assembled through.
///
/// Calls made between [`open_document`](Self::open_document) and
/// [`build`](Self::build) appear in the document in exactly that order.
/// `build` is terminal: appending afterwards fails until the document is
/// opened again.
pub trait ArticleAdapter: Send {
    /// Name of the PDF engine doing the rendering.
    fn backend_name(&self) -> &'static str;

    fn open_document(&mut self, model: &ArticleViewModel, site_name: &str) -> Result<(), RenderError>;

    /// Two-tone heading: first character in the accent color, the rest in white.
    fn add_title(&mut self, title: &str) -> Result<(), RenderError>;

    fn add_header_paragraph_top(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_header_paragraph(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_header_paragraph_bottom(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_line_top(&mut self) -> Result<(), RenderError>;

    fn add_line_bottom(&mut self) -> Result<(), RenderError>;

    fn add_abstract(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_key_words(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_subtitle(&mut self, text: &str, level: HeadingLevel) -> Result<(), RenderError>;

    fn add_code(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_body(&mut self, text: &str) -> Result<(), RenderError>;

    fn add_image(&mut self, image_bytes: &[u8]) -> Result<(), RenderError>;

    fn add_author_about(&mut self, text: &str) -> Result<(), RenderError>;

    fn build(&mut self) -> Result<Vec<u8>, RenderError>;
}

/// A PDF engine binding that draws laid-out pages.
///
/// A document is produced by `begin_document`, `add_resources`, one
/// `render_page` per page in order, then `finish`.
pub trait DocumentRenderer: Send {
    fn name(&self) -> &'static str;

    fn begin_document(
        &mut self,
        metadata: &DocumentMetadata,
        geometry: &PageGeometry,
    ) -> Result<(), RenderError>;

    /// Registers every image the pages refer to.
    fn add_resources(&mut self, document: &LaidOutDocument) -> Result<(), RenderError>;

    /// Draws one page. The backend runs `decorator` for the page as part of creating it.
    fn render_page(
        &mut self,
        page: &LaidOutPage,
        decorator: &dyn PageDecorator,
    ) -> Result<(), RenderError>;

    /// Serializes the document and resets the renderer for the next one.
    fn finish(&mut self) -> Result<Vec<u8>, RenderError>;
}
