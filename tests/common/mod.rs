pub mod fixtures;
pub mod pdf_assertions;

use chrono::{DateTime, Local, TimeZone};
use folio::{ArticleRequest, ArticleSettings, Backend, compose_article};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A fixed timestamp so dates and file names are predictable.
pub fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 7, 15, 9, 30, 0).unwrap()
}

/// Composes an article with the default settings on `backend`.
pub fn generate(backend: Backend, request: &ArticleRequest) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let mut adapter = backend.create_adapter();
    let bytes = compose_article(adapter.as_mut(), request, &ArticleSettings::default(), fixed_now())?;
    GeneratedPdf::from_bytes(bytes)
}
