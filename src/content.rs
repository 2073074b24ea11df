//! Light markup accepted in the article content field.
//!
//! - `## text` and `### text` start second and third level headings
//! - a line starting with three backticks opens or closes a code block
//! - `![alt](data:image/png;base64,...)` on its own line embeds an image
//! - everything else is body text, one paragraph per blank-line separated chunk
//!
//! Text without any markup therefore becomes a single body paragraph.

use crate::error::Error;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use folio_types::HeadingLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSection {
    Heading { text: String, level: HeadingLevel },
    Paragraph(String),
    Code(String),
    Image { alt: String, bytes: Vec<u8> },
}

const FENCE: &str = "```";

pub fn parse_content(input: &str) -> Result<Vec<ContentSection>, Error> {
    let mut parser = ContentParser::default();
    for line in input.lines() {
        parser.line(line)?;
    }
    parser.finish()
}

#[derive(Default)]
struct ContentParser {
    sections: Vec<ContentSection>,
    paragraph: Vec<String>,
    code: Option<Vec<String>>,
}

impl ContentParser {
    fn line(&mut self, line: &str) -> Result<(), Error> {
        if let Some(code) = self.code.as_mut() {
            if line.trim_start().starts_with(FENCE) {
                let body = code.join("\n");
                self.code = None;
                self.sections.push(ContentSection::Code(body));
            } else {
                code.push(line.to_string());
            }
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.starts_with(FENCE) {
            self.flush_paragraph();
            self.code = Some(Vec::new());
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            self.flush_paragraph();
            self.push_heading(text, "h3");
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            self.flush_paragraph();
            self.push_heading(text, "h2");
        } else if let Some((alt, target)) = parse_image_line(trimmed) {
            self.flush_paragraph();
            let bytes = decode_data_uri(target)?;
            self.sections.push(ContentSection::Image {
                alt: alt.to_string(),
                bytes,
            });
        } else if trimmed.is_empty() {
            self.flush_paragraph();
        } else {
            self.paragraph.push(line.to_string());
        }
        Ok(())
    }

    fn push_heading(&mut self, text: &str, tag: &str) {
        self.sections.push(ContentSection::Heading {
            text: text.trim().to_string(),
            level: HeadingLevel::from_tag(tag),
        });
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = std::mem::take(&mut self.paragraph).join("\n");
            self.sections.push(ContentSection::Paragraph(text));
        }
    }

    fn finish(mut self) -> Result<Vec<ContentSection>, Error> {
        // an unterminated fence runs to the end of the input
        if let Some(code) = self.code.take() {
            self.sections.push(ContentSection::Code(code.join("\n")));
        }
        self.flush_paragraph();
        Ok(self.sections)
    }
}

/// Splits `![alt](target)` into its parts.
fn parse_image_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("![")?;
    let (alt, rest) = rest.split_once("](")?;
    let target = rest.strip_suffix(')')?;
    Some((alt, target.trim()))
}

fn decode_data_uri(target: &str) -> Result<Vec<u8>, Error> {
    let payload = target
        .strip_prefix("data:")
        .ok_or_else(|| Error::content("images must be embedded as data: URIs"))?;
    let (media, data) = payload
        .split_once(',')
        .ok_or_else(|| Error::content("data URI has no payload"))?;
    if !media.starts_with("image/") || !media.ends_with(";base64") {
        return Err(Error::content(format!(
            "unsupported data URI '{}', expected image/...;base64",
            media
        )));
    }
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| Error::content(format!("invalid base64 image data: {}", e)))
}
