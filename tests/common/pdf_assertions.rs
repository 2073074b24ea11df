use lopdf::Document as LopdfDocument;
use lopdf::Object;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Base font names of every font dictionary in the file, nested ones included.
#[allow(dead_code)]
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    fn collect(object: &Object, fonts: &mut Vec<String>) {
        match object {
            Object::Dictionary(dict) => {
                let is_font = dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font".as_slice());
                if is_font {
                    if let Ok(name) = dict.get(b"BaseFont").and_then(|b| b.as_name()) {
                        fonts.push(String::from_utf8_lossy(name).to_string());
                    }
                }
                for (_, value) in dict.iter() {
                    collect(value, fonts);
                }
            }
            Object::Array(items) => items.iter().for_each(|item| collect(item, fonts)),
            _ => {}
        }
    }

    let mut fonts = Vec::new();
    for object in doc.objects.values() {
        collect(object, &mut fonts);
    }
    fonts.sort();
    fonts.dedup();
    fonts
}

/// Count image XObjects in the file.
#[allow(dead_code)]
pub fn count_images(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|s| s.dict.get(b"Subtype").and_then(|v| v.as_name()).ok() == Some(b"Image".as_slice()))
        .count()
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF references a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should reference a font matching '{}', found: {:?}",
            $pattern,
            fonts
        );
    };
}
