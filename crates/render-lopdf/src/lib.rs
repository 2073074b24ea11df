//! Streaming article PDF backend using lopdf.
//!
//! Each page's content stream and page object is written out as soon as the
//! page is drawn; only the shared dictionaries wait for the end of the document.

mod helpers;
mod renderer;
mod writer;

use folio_render_core::ArticleDocument;

pub use helpers::{PageContext, font_dictionary, font_resource_name, image_resource_name, text_string};
pub use renderer::LopdfRenderer;
pub use writer::StreamingPdfWriter;

/// An article adapter rendering through lopdf.
pub type LopdfArticle = ArticleDocument<LopdfRenderer>;

/// Creates a fresh adapter with the default A4 page geometry.
pub fn article_document() -> LopdfArticle {
    ArticleDocument::new(LopdfRenderer::new())
}
