//! Translation of positioned layout elements into printpdf operations.

use folio_render_core::layout::ImageElement;
use folio_render_core::{LayoutElement, PageCanvas, PositionedElement, RenderError, StandardFont, utils};
use folio_types::Color;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::ops::Op;
use printpdf::xobject::XObjectTransform;
use printpdf::{BuiltinFont, DictItem, Pt, Rgb, TextMatrix, XObjectId};

pub(crate) fn builtin_font(font: StandardFont) -> BuiltinFont {
    match font {
        StandardFont::Helvetica => BuiltinFont::Helvetica,
        StandardFont::HelveticaBold => BuiltinFont::HelveticaBold,
        StandardFont::HelveticaOblique => BuiltinFont::HelveticaOblique,
        StandardFont::Courier => BuiltinFont::Courier,
    }
}

fn to_pdf_color(c: Color) -> printpdf::color::Color {
    let [r, g, b] = c.to_unit_rgb();
    printpdf::color::Color::Rgb(Rgb::new(r, g, b, None))
}

/// `Tj` with already encoded WinAnsi bytes.
fn show_text_op(bytes: Vec<u8>) -> Op {
    Op::Unknown {
        key: "Tj".to_string(),
        value: vec![DictItem::String {
            data: bytes,
            literal: true,
        }],
    }
}

/// An image XObject registered with the document, with its pixel size.
#[derive(Debug, Clone)]
pub(crate) struct RegisteredImage {
    pub id: XObjectId,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
struct PageRenderState {
    is_text_section_open: bool,
    current_font: Option<(StandardFont, f32)>,
    current_fill_color: Option<Color>,
}

/// Collects the operations of one page.
pub(crate) struct PageOps<'a> {
    page_height_pt: f32,
    images: &'a [RegisteredImage],
    ops: Vec<Op>,
    state: PageRenderState,
}

impl<'a> PageOps<'a> {
    pub fn new(page_height_pt: f32, images: &'a [RegisteredImage]) -> Self {
        Self {
            page_height_pt,
            images,
            ops: Vec::new(),
            state: PageRenderState::default(),
        }
    }

    pub fn into_ops(mut self) -> Vec<Op> {
        self.close_text_section();
        self.ops
    }

    fn close_text_section(&mut self) {
        if self.state.is_text_section_open {
            self.ops.push(Op::EndTextSection);
            self.state.is_text_section_open = false;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.current_fill_color != Some(color) {
            self.ops.push(Op::SetFillColor {
                col: to_pdf_color(color),
            });
            self.state.current_fill_color = Some(color);
        }
    }

    pub fn draw_element(&mut self, element: &PositionedElement) -> Result<(), RenderError> {
        match &element.element {
            LayoutElement::Text(text) => {
                self.draw_text(&text.content, element.x, element.y, text.style.font, text.style.size, text.style.color);
            }
            LayoutElement::Rectangle { fill } => self.fill_rect(element, *fill),
            LayoutElement::Rule { color } => self.stroke_rule(element, *color),
            LayoutElement::Image(image) => self.draw_image(image, element)?,
        }
        Ok(())
    }

    /// Writes a single line of text whose box starts at `top`.
    fn draw_text(&mut self, content: &str, x: f32, top: f32, font: StandardFont, size: f32, color: Color) {
        self.show_text_at_baseline(content, x, utils::baseline_from_top(top, size), font, size, color);
    }

    fn show_text_at_baseline(
        &mut self,
        content: &str,
        x: f32,
        baseline: f32,
        font: StandardFont,
        size: f32,
        color: Color,
    ) {
        if content.is_empty() {
            return;
        }
        if !self.state.is_text_section_open {
            self.ops.push(Op::StartTextSection);
            self.state.is_text_section_open = true;
        }
        self.set_fill_color(color);
        if self.state.current_font != Some((font, size)) {
            self.ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(size),
                font: builtin_font(font),
            });
            // registers the font resource; an empty item list writes nothing
            self.ops.push(Op::WriteTextBuiltinFont {
                items: Vec::new(),
                font: builtin_font(font),
            });
            self.state.current_font = Some((font, size));
        }

        let pdf_y = utils::flip_y(baseline, self.page_height_pt);
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(pdf_y)),
        });
        self.ops.push(show_text_op(utils::to_win_ansi(content)));
    }

    fn fill_rect(&mut self, positioned: &PositionedElement, fill: Color) {
        self.close_text_section();
        let (x, width, height) = (positioned.x, positioned.width, positioned.height);
        let y = self.page_height_pt - (positioned.y + height);
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(x), y: Pt(y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x + width), y: Pt(y + height) }, bezier: false },
                    LinePoint { p: Point { x: Pt(x), y: Pt(y + height) }, bezier: false },
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::EvenOdd,
        };
        self.set_fill_color(fill);
        self.ops.push(Op::DrawPolygon { polygon });
    }

    /// Strokes a horizontal line through the middle of the element box.
    fn stroke_rule(&mut self, positioned: &PositionedElement, color: Color) {
        self.close_text_section();
        let line_y = self.page_height_pt - (positioned.y + positioned.height / 2.0);
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(positioned.height),
        });
        self.ops.push(Op::SetOutlineColor {
            col: to_pdf_color(color),
        });
        let line = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(positioned.x), y: Pt(line_y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(positioned.x + positioned.width), y: Pt(line_y) }, bezier: false },
                ],
            }],
            mode: PaintMode::Stroke,
            winding_order: WindingOrder::EvenOdd,
        };
        self.ops.push(Op::DrawPolygon { polygon: line });
    }

    fn draw_image(&mut self, image: &ImageElement, positioned: &PositionedElement) -> Result<(), RenderError> {
        self.close_text_section();
        let registered = self.images.get(image.resource).ok_or_else(|| {
            RenderError::Other(format!("Image resource {} was never registered", image.resource))
        })?;

        let y = self.page_height_pt - (positioned.y + positioned.height);
        let transform = XObjectTransform {
            translate_x: Some(Pt(positioned.x)),
            translate_y: Some(Pt(y)),
            scale_x: Some(positioned.width / registered.width as f32),
            scale_y: Some(positioned.height / registered.height as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        self.ops.push(Op::UseXobject {
            id: registered.id.clone(),
            transform,
        });
        Ok(())
    }
}

impl PageCanvas for PageOps<'_> {
    fn show_text(&mut self, text: &str, x: f32, baseline_y: f32, font: StandardFont, size: f32, color: Color) {
        self.show_text_at_baseline(text, x, baseline_y, font, size, color);
    }
}
