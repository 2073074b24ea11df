use crate::drawing::{PageOps, RegisteredImage};
use folio_render_core::{
    DocumentMetadata, DocumentRenderer, LaidOutDocument, LaidOutPage, PageDecorator, PageGeometry,
    PageInfo, RenderError,
};
use printpdf::image::RawImage;
use printpdf::xobject::XObject;
use printpdf::{Mm, OffsetDateTime, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};

/// Renders article pages as printpdf operation lists.
///
/// Only plain page and image data is kept between calls; the `PdfDocument`
/// itself is assembled and serialized inside [`finish`](DocumentRenderer::finish).
pub struct PrintPdfRenderer {
    metadata: Option<DocumentMetadata>,
    page_width_pt: f32,
    page_height_pt: f32,
    images: Vec<RegisteredImage>,
    raw_images: Vec<RawImage>,
    pages: Vec<PdfPage>,
}

impl Default for PrintPdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintPdfRenderer {
    pub fn new() -> Self {
        Self {
            metadata: None,
            page_width_pt: 0.0,
            page_height_pt: 0.0,
            images: Vec::new(),
            raw_images: Vec::new(),
            pages: Vec::new(),
        }
    }

    fn ensure_started(&self) -> Result<(), RenderError> {
        match self.metadata {
            Some(_) => Ok(()),
            None => Err(RenderError::Other("Document not started".into())),
        }
    }

    fn page_dimensions_mm(&self) -> (Mm, Mm) {
        (Pt(self.page_width_pt).into(), Pt(self.page_height_pt).into())
    }

    fn new_document(metadata: &DocumentMetadata) -> PdfDocument {
        let mut doc = PdfDocument::new(&metadata.title);
        let info = &mut doc.metadata.info;
        info.author = metadata.author.clone();
        info.subject = metadata.subject.clone();
        info.keywords = metadata.keywords.clone();
        info.creator = "folio".to_string();
        match OffsetDateTime::from_unix_timestamp(metadata.creation_timestamp) {
            Ok(date) => {
                info.creation_date = date;
                info.modification_date = date;
                info.metadata_date = date;
            }
            Err(e) => log::warn!("Keeping default creation date: {}", e),
        }
        doc
    }
}

impl DocumentRenderer for PrintPdfRenderer {
    fn name(&self) -> &'static str {
        "printpdf"
    }

    fn begin_document(
        &mut self,
        metadata: &DocumentMetadata,
        geometry: &PageGeometry,
    ) -> Result<(), RenderError> {
        self.page_width_pt = geometry.width();
        self.page_height_pt = geometry.height();
        self.images.clear();
        self.raw_images.clear();
        self.pages.clear();
        self.metadata = Some(metadata.clone());
        Ok(())
    }

    fn add_resources(&mut self, document: &LaidOutDocument) -> Result<(), RenderError> {
        self.ensure_started()?;
        for (index, image) in document.images.iter().enumerate() {
            let mut warnings = Vec::new();
            let raw_image = RawImage::decode_from_bytes(&image.bytes, &mut warnings).map_err(|e| {
                RenderError::Pdf(format!("Failed to decode image resource {}: {}", index, e))
            })?;
            self.images.push(RegisteredImage {
                id: XObjectId::new(),
                width: image.width,
                height: image.height,
            });
            self.raw_images.push(raw_image);
        }
        log::debug!("Prepared {} image XObject(s)", self.images.len());
        Ok(())
    }

    fn render_page(
        &mut self,
        page: &LaidOutPage,
        decorator: &dyn PageDecorator,
    ) -> Result<(), RenderError> {
        self.ensure_started()?;
        let mut page_ops = PageOps::new(self.page_height_pt, &self.images);
        for element in &page.elements {
            page_ops.draw_element(element)?;
        }
        let info = PageInfo {
            number: page.number,
            width: self.page_width_pt,
            height: self.page_height_pt,
        };
        decorator.decorate(&info, &mut page_ops);
        let ops = page_ops.into_ops();

        let (width_mm, height_mm) = self.page_dimensions_mm();
        self.pages.push(PdfPage::new(width_mm, height_mm, ops));
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, RenderError> {
        let metadata = self
            .metadata
            .take()
            .ok_or_else(|| RenderError::Other("Document not started or already finished".into()))?;

        let mut document = Self::new_document(&metadata);
        for (registered, raw_image) in self.images.drain(..).zip(self.raw_images.drain(..)) {
            document
                .resources
                .xobjects
                .map
                .insert(registered.id, XObject::Image(raw_image));
        }
        document.pages = std::mem::take(&mut self.pages);

        // text is written as pre-encoded `Tj` operations, which printpdf
        // only serializes when unknown operators are allowed
        let options = PdfSaveOptions {
            secure: false,
            ..Default::default()
        };
        let mut warnings = Vec::new();
        let bytes = document.save(&options, &mut warnings);
        if !warnings.is_empty() {
            log::debug!("printpdf reported {} warning(s) while saving", warnings.len());
        }
        Ok(bytes)
    }
}
