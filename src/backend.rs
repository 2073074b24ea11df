//! Selection of the PDF engine an article is rendered with.

use folio_render_core::ArticleAdapter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Produces a fresh, unopened adapter for every document.
pub trait AdapterFactory: Send + Sync {
    fn create(&self) -> Box<dyn ArticleAdapter>;
}

impl<F> AdapterFactory for F
where
    F: Fn() -> Box<dyn ArticleAdapter> + Send + Sync,
{
    fn create(&self) -> Box<dyn ArticleAdapter> {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// printpdf operation lists, serialized at the end.
    #[default]
    PrintPdf,
    /// lopdf objects streamed page by page.
    Lopdf,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::PrintPdf, Backend::Lopdf];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::PrintPdf => "printpdf",
            Backend::Lopdf => "lopdf",
        }
    }

    pub fn create_adapter(self) -> Box<dyn ArticleAdapter> {
        match self {
            Backend::PrintPdf => Box::new(folio_render_printpdf::article_document()),
            Backend::Lopdf => Box::new(folio_render_lopdf::article_document()),
        }
    }
}

impl AdapterFactory for Backend {
    fn create(&self) -> Box<dyn ArticleAdapter> {
        self.create_adapter()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "printpdf" => Ok(Backend::PrintPdf),
            "lopdf" => Ok(Backend::Lopdf),
            other => Err(format!(
                "unknown backend '{}', expected 'printpdf' or 'lopdf'",
                other
            )),
        }
    }
}
