use crate::helpers::{self, PageContext};
use crate::writer::StreamingPdfWriter;
use folio_render_core::{
    DocumentMetadata, DocumentRenderer, LaidOutDocument, LaidOutPage, PageDecorator, PageGeometry,
    PageInfo, RenderError,
};
use lopdf::{Dictionary, Object};
use std::io::Cursor;

/// Streams article pages through lopdf objects into an in-memory buffer.
pub struct LopdfRenderer {
    writer: Option<StreamingPdfWriter<Cursor<Vec<u8>>>>,
    page_width: f32,
    page_height: f32,
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self {
            writer: None,
            page_width: 0.0,
            page_height: 0.0,
        }
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<Cursor<Vec<u8>>>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))
    }

    fn info_dictionary(metadata: &DocumentMetadata) -> Dictionary {
        let mut info = Dictionary::new();
        info.set("Title", helpers::text_string(&metadata.title));
        info.set("Author", helpers::text_string(&metadata.author));
        if !metadata.subject.is_empty() {
            info.set("Subject", helpers::text_string(&metadata.subject));
        }
        if !metadata.keywords.is_empty() {
            info.set("Keywords", helpers::text_string(&metadata.keywords.join(", ")));
        }
        info.set("Creator", Object::string_literal("folio"));
        info.set("Producer", Object::string_literal("lopdf"));
        info.set("CreationDate", Object::string_literal(metadata.creation_date.as_str()));
        info
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn begin_document(
        &mut self,
        metadata: &DocumentMetadata,
        geometry: &PageGeometry,
    ) -> Result<(), RenderError> {
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7", helpers::font_dictionary())?;
        writer.set_info(Self::info_dictionary(metadata));
        self.page_width = geometry.width();
        self.page_height = geometry.height();
        self.writer = Some(writer);
        Ok(())
    }

    fn add_resources(&mut self, document: &LaidOutDocument) -> Result<(), RenderError> {
        let writer = self.writer_mut()?;
        for (index, image) in document.images.iter().enumerate() {
            let name = helpers::image_resource_name(index);
            writer.write_rgb_image(&name, image.width, image.height, &image.rgb)?;
            log::debug!("Wrote image XObject {} ({}x{})", name, image.width, image.height);
        }
        Ok(())
    }

    fn render_page(
        &mut self,
        page: &LaidOutPage,
        decorator: &dyn PageDecorator,
    ) -> Result<(), RenderError> {
        let mut page_ctx = PageContext::new(self.page_height);
        for element in &page.elements {
            page_ctx.draw_element(element);
        }
        let info = PageInfo {
            number: page.number,
            width: self.page_width,
            height: self.page_height,
        };
        decorator.decorate(&info, &mut page_ctx);
        let content = page_ctx.finish();

        let (width, height) = (self.page_width, self.page_height);
        let writer = self.writer_mut()?;
        let content_id = writer.write_content_stream(content)?;
        writer.write_page(content_id, width, height)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, RenderError> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| RenderError::Other("Document was never started with begin_document".into()))?;
        log::debug!("Finishing lopdf document with {} page(s)", writer.page_count());
        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}
