//! Content stream drawing for one page.

use folio_render_core::layout::ImageElement;
use folio_render_core::{LayoutElement, PageCanvas, PositionedElement, StandardFont, utils};
use folio_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, StringFormat, dictionary};

/// Resource name a standard font is registered under.
pub fn font_resource_name(font: StandardFont) -> &'static str {
    match font {
        StandardFont::Helvetica => "F1",
        StandardFont::HelveticaBold => "F2",
        StandardFont::HelveticaOblique => "F3",
        StandardFont::Courier => "F4",
    }
}

/// Resource name of the image at `index` in the document's image list.
pub fn image_resource_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

/// The `/Font` resource dictionary covering every standard font.
pub fn font_dictionary() -> Dictionary {
    let mut font_dict = Dictionary::new();
    for font in StandardFont::ALL {
        let single_font_dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.postscript_name(),
            "Encoding" => "WinAnsiEncoding",
        };
        font_dict.set(font_resource_name(font), Object::Dictionary(single_font_dict));
    }
    font_dict
}

/// A PDF text string: literal for ASCII, UTF-16BE with a byte order mark otherwise.
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

fn color_operands(color: Color) -> Vec<Object> {
    color.to_unit_rgb().into_iter().map(Object::Real).collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
struct LopdfPageRenderState {
    font: Option<(StandardFont, f32)>,
    fill_color: Option<Color>,
}

pub struct PageContext {
    page_height: f32,
    content: Content,
    state: LopdfPageRenderState,
}

impl PageContext {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: LopdfPageRenderState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    pub fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Text(text) => {
                let baseline = utils::baseline_from_top(el.y, text.style.size);
                self.draw_text(&text.content, el.x, baseline, text.style.font, text.style.size, text.style.color);
            }
            LayoutElement::Rectangle { fill } => self.fill_rect(el, *fill),
            LayoutElement::Rule { color } => self.stroke_rule(el, *color),
            LayoutElement::Image(image) => self.draw_image(image, el),
        }
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font_resource_name(font).as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((font, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", color_operands(color));
            self.state.fill_color = Some(color);
        }
    }

    fn draw_text(&mut self, content: &str, x: f32, baseline: f32, font: StandardFont, size: f32, color: Color) {
        if content.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.set_fill_color(color);
        let pdf_y = utils::flip_y(baseline, self.page_height);
        self.push("Td", vec![x.into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(utils::to_win_ansi(content), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn fill_rect(&mut self, el: &PositionedElement, fill: Color) {
        let y = self.page_height - (el.y + el.height);
        self.set_fill_color(fill);
        self.push("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
        self.push("f", vec![]);
    }

    fn stroke_rule(&mut self, el: &PositionedElement, color: Color) {
        let line_y = self.page_height - (el.y + el.height / 2.0);
        self.push("w", vec![el.height.into()]);
        self.push("RG", color_operands(color));
        self.push("m", vec![el.x.into(), line_y.into()]);
        self.push("l", vec![(el.x + el.width).into(), line_y.into()]);
        self.push("S", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) {
        let y = self.page_height - (el.y + el.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                el.width.into(),
                0.into(),
                0.into(),
                el.height.into(),
                el.x.into(),
                y.into(),
            ],
        );
        self.push(
            "Do",
            vec![Object::Name(image_resource_name(image.resource).into_bytes())],
        );
        self.push("Q", vec![]);
    }
}

impl PageCanvas for PageContext {
    fn show_text(&mut self, text: &str, x: f32, baseline_y: f32, font: StandardFont, size: f32, color: Color) {
        self.draw_text(text, x, baseline_y, font, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render_core::TextStyle;
    use folio_render_core::layout::TextElement;

    fn operators(content: &Content) -> Vec<&str> {
        content.operations.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn text_is_wrapped_in_its_own_text_object() {
        let mut ctx = PageContext::new(842.0);
        ctx.draw_element(&PositionedElement {
            x: 50.0,
            y: 100.0,
            width: 40.0,
            height: 10.0,
            element: LayoutElement::Text(TextElement {
                content: "Olá".into(),
                style: TextStyle::default(),
            }),
        });
        let content = ctx.finish();
        assert_eq!(operators(&content), vec!["BT", "Tf", "rg", "Td", "Tj", "ET"]);

        match &content.operations[4].operands[0] {
            Object::String(bytes, StringFormat::Literal) => assert_eq!(bytes, b"Ol\xe1"),
            other => panic!("unexpected Tj operand {:?}", other),
        }
        let td_y = content.operations[3].operands[1].as_float().unwrap();
        assert!((td_y - (842.0 - 108.0)).abs() < 0.01);
    }

    #[test]
    fn canvas_text_uses_the_given_baseline() {
        let mut ctx = PageContext::new(800.0);
        ctx.show_text("7", 100.0, 780.0, StandardFont::HelveticaOblique, 10.0, Color::BLACK);
        let content = ctx.finish();
        let tf = &content.operations[1];
        assert_eq!(tf.operands[0].as_name().unwrap(), b"F3");
        let td_y = content.operations[3].operands[1].as_float().unwrap();
        assert!((td_y - 20.0).abs() < 0.01);
    }

    #[test]
    fn blank_text_draws_nothing() {
        let mut ctx = PageContext::new(800.0);
        ctx.show_text("  ", 0.0, 0.0, StandardFont::Helvetica, 10.0, Color::BLACK);
        assert!(ctx.finish().operations.is_empty());
    }

    #[test]
    fn non_ascii_text_strings_use_utf16() {
        match text_string("Técnico") {
            Object::String(bytes, StringFormat::Hexadecimal) => assert_eq!(
                bytes,
                vec![0xFE, 0xFF, 0, b'T', 0, 0xE9, 0, b'c', 0, b'n', 0, b'i', 0, b'c', 0, b'o']
            ),
            other => panic!("expected a UTF-16 string, got {:?}", other),
        }
        assert_eq!(text_string("PDF").as_str().unwrap(), b"PDF");
    }

    #[test]
    fn font_dictionary_lists_every_standard_font() {
        let fonts = font_dictionary();
        for font in StandardFont::ALL {
            let entry = fonts.get(font_resource_name(font).as_bytes()).unwrap();
            let base = entry.as_dict().unwrap().get(b"BaseFont").unwrap();
            assert_eq!(base.as_name().unwrap(), font.postscript_name().as_bytes());
        }
    }
}
