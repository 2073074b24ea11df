//! Article PDF backend on top of printpdf.
//!
//! Pages are built as printpdf operation lists using the standard Type1 fonts
//! and serialized in one go when the document is finished.

mod drawing;
mod renderer;

use folio_render_core::ArticleDocument;

pub use renderer::PrintPdfRenderer;

/// An article adapter rendering through printpdf.
pub type PrintPdfArticle = ArticleDocument<PrintPdfRenderer>;

/// Creates a fresh adapter with the default A4 page geometry.
pub fn article_document() -> PrintPdfArticle {
    ArticleDocument::new(PrintPdfRenderer::new())
}
