use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::Content;
use lopdf::xref::{Xref, XrefEntry, XrefType};
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes PDF objects to `W` as soon as they are complete.
///
/// Page content, page and image objects are streamed out immediately. The
/// shared resources, the page tree, the catalog and the info dictionary are
/// held back until [`finish`](Self::finish), when every page is known.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    xref: Xref,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    font_dict: Dictionary,
    xobjects: Dictionary,
    info: Option<Dictionary>,
    page_ids: Vec<ObjectId>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str, font_dict: Dictionary) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n%âãÏÓ\n", version).as_bytes())?;

        Ok(Self {
            writer,
            xref: Xref::new(0, XrefType::CrossReferenceTable),
            max_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            font_dict,
            xobjects: Dictionary::new(),
            info: None,
            page_ids: Vec::new(),
            buffered_objects: BTreeMap::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn buffer_object_at_id(&mut self, id: ObjectId, object: Object) {
        if id.0 > self.max_id {
            self.max_id = id.0;
        }
        self.buffered_objects.insert(id, object);
    }

    /// Writes an object to the output right away and returns its id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        internal_writer::write_indirect_object(&mut self.writer, id, &object, &mut self.xref)?;
        Ok(id)
    }

    /// Writes a Flate-compressed content stream.
    pub fn write_content_stream(&mut self, content: Content) -> io::Result<ObjectId> {
        let encoded = content
            .encode()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, deflate(&encoded)?);
        self.write_object(Object::Stream(stream))
    }

    /// Writes an 8-bit RGB image XObject and makes it available to every page
    /// under `name`.
    pub fn write_rgb_image(&mut self, name: &str, width: u32, height: u32, rgb: &[u8]) -> io::Result<ObjectId> {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
            "Filter" => "FlateDecode",
        };
        let id = self.write_object(Object::Stream(Stream::new(dict, deflate(rgb)?)))?;
        self.xobjects.set(name.as_bytes(), Object::Reference(id));
        Ok(id)
    }

    /// Writes a page dictionary pointing at the shared resources.
    pub fn write_page(&mut self, content_id: ObjectId, width: f32, height: f32) -> io::Result<ObjectId> {
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.write_object(page_dict.into())?;
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self) -> io::Result<W> {
        let mut resources = dictionary! { "Font" => std::mem::take(&mut self.font_dict) };
        if !self.xobjects.is_empty() {
            resources.set("XObject", std::mem::take(&mut self.xobjects));
        }
        self.buffer_object_at_id(self.resources_id, resources.into());

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffer_object_at_id(self.pages_id, pages_dict.into());

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.buffer_object_at_id(self.catalog_id, catalog_dict.into());

        let info_id = match self.info.take() {
            Some(info) => {
                let id = self.new_object_id();
                self.buffer_object_at_id(id, info.into());
                Some(id)
            }
            None => None,
        };

        for (id, object) in &self.buffered_objects {
            internal_writer::write_indirect_object(&mut self.writer, *id, object, &mut self.xref)?;
        }

        let xref_start = self.writer.stream_position()?;
        self.xref.size = self.max_id + 1;
        internal_writer::write_xref(&mut self.writer, &self.xref)?;

        let mut trailer = dictionary! { "Size" => self.xref.size as i64, "Root" => self.catalog_id };
        if let Some(info_id) = info_id {
            trailer.set("Info", info_id);
        }
        writeln!(self.writer, "trailer")?;
        internal_writer::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

mod internal_writer {
    use super::*;
    use lopdf::StringFormat;

    pub fn write_indirect_object<W: Write + Seek>(
        writer: &mut W,
        id: ObjectId,
        object: &Object,
        xref: &mut Xref,
    ) -> io::Result<()> {
        let offset = writer.stream_position()?;
        xref.insert(
            id.0,
            XrefEntry::Normal {
                offset: offset as u32,
                generation: id.1,
            },
        );
        writeln!(writer, "{} {} obj", id.0, id.1)?;
        write_object(writer, object)?;
        writeln!(writer, "\nendobj")?;
        Ok(())
    }

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => write!(writer, "{:.3}", r),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, format) => match format {
                StringFormat::Literal => {
                    writer.write_all(b"(")?;
                    for &byte in s {
                        if byte == b'(' || byte == b')' || byte == b'\\' {
                            writer.write_all(b"\\")?;
                        }
                        writer.write_all(&[byte])?;
                    }
                    writer.write_all(b")")
                }
                StringFormat::Hexadecimal => {
                    write!(writer, "<{}>", s.iter().map(|b| format!("{:02X}", b)).collect::<String>())
                }
            },
            Object::Array(arr) => {
                writer.write_all(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, obj)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        let sorted_keys: BTreeMap<_, _> = dict.iter().collect();
        for (key, value) in sorted_keys {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }

    /// Writes the cross-reference table as runs of consecutive object ids.
    pub fn write_xref<W: Write>(writer: &mut W, xref: &Xref) -> io::Result<()> {
        writeln!(writer, "xref")?;
        writeln!(writer, "0 1")?;
        writeln!(writer, "0000000000 65535 f ")?;

        let mut section: Vec<(u32, u32, u16)> = Vec::new();
        for (&id, entry) in &xref.entries {
            if id == 0 {
                continue;
            }
            let XrefEntry::Normal { offset, generation } = *entry else {
                continue;
            };
            if let Some(&(last_id, _, _)) = section.last() {
                if id != last_id + 1 {
                    write_section(writer, &section)?;
                    section.clear();
                }
            }
            section.push((id, offset, generation));
        }
        write_section(writer, &section)
    }

    fn write_section<W: Write>(writer: &mut W, entries: &[(u32, u32, u16)]) -> io::Result<()> {
        let Some(&(start_id, _, _)) = entries.first() else {
            return Ok(());
        };
        writeln!(writer, "{} {}", start_id, entries.len())?;
        for (_, offset, generation) in entries {
            writeln!(writer, "{:010} {:05} n ", offset, generation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_a_document_lopdf_can_load() {
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7", Dictionary::new()).unwrap();
        let content = writer
            .write_content_stream(Content { operations: vec![] })
            .unwrap();
        writer.write_page(content, 595.0, 842.0).unwrap();
        writer.set_info(dictionary! { "Producer" => Object::string_literal("test") });
        assert_eq!(writer.page_count(), 1);

        let bytes = writer.finish().unwrap().into_inner();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert!(doc.trailer.get(b"Info").is_ok());
    }

    #[test]
    fn image_xobjects_are_shared_through_resources() {
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7", Dictionary::new()).unwrap();
        writer.write_rgb_image("Im1", 1, 1, &[255, 0, 0]).unwrap();
        let content = writer
            .write_content_stream(Content { operations: vec![] })
            .unwrap();
        writer.write_page(content, 100.0, 100.0).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let resources = doc
            .get_object(writer_resources_id())
            .and_then(|o| o.as_dict())
            .unwrap();
        let xobjects = resources.get(b"XObject").and_then(|o| o.as_dict()).unwrap();
        assert!(xobjects.has(b"Im1"));
    }

    #[test]
    fn literal_strings_escape_delimiters_and_keep_raw_bytes() {
        let mut out = Vec::new();
        let text = Object::String(b"(a\\b) \xe9\x93".to_vec(), lopdf::StringFormat::Literal);
        internal_writer::write_object(&mut out, &text).unwrap();
        assert_eq!(out, b"(\\(a\\\\b\\) \xe9\x93)".to_vec());
    }

    #[test]
    fn dictionaries_are_written_with_sorted_keys() {
        let mut out = Vec::new();
        let dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Real(595.0), Object::Real(842.5)],
            "Contents" => Object::Reference((4, 0)),
        };
        internal_writer::write_dictionary(&mut out, &dict).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<</Contents 4 0 R /MediaBox [0 0 595.000 842.500] /Type /Page >>"
        );
    }

    fn writer_resources_id() -> ObjectId {
        (1, 0)
    }
}
