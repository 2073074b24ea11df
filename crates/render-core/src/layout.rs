//! Flow layout: turns the ordered content blocks into pages of positioned elements.
//!
//! Blocks are stacked top to bottom inside the page content box. Text is broken
//! greedily at spaces using the standard font widths; a block that does not fit
//! continues on the next page, repeating its background panel.

use crate::block::{ContentBlock, DecodedImage, Rule, TextAlign, TextBlock, TextStyle};
use crate::error::RenderError;
use crate::theme;
use folio_types::{Color, Insets, PageSize, Rect};
use std::sync::Arc;

const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Insets,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            size: theme::PAGE_SIZE,
            margins: Insets::all(theme::PAGE_MARGIN),
        }
    }
}

impl PageGeometry {
    pub fn width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    pub fn content_rect(&self) -> Rect {
        let (w, h) = self.size.dimensions_pt();
        Rect::new(
            self.margins.left,
            self.margins.top,
            w - self.margins.horizontal_sum(),
            h - self.margins.vertical_sum(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone)]
pub struct ImageElement {
    /// Index into [`LaidOutDocument::images`].
    pub resource: usize,
    pub image: Arc<DecodedImage>,
}

#[derive(Debug, Clone)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle { fill: Color },
    Rule { color: Color },
    Image(ImageElement),
}

/// An element with its box in points, top-left origin.
#[derive(Debug, Clone)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Debug, Clone, Default)]
pub struct LaidOutPage {
    /// 1-based page number.
    pub number: usize,
    pub elements: Vec<PositionedElement>,
}

impl LaidOutPage {
    pub fn text_content(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match &e.element {
            LayoutElement::Text(t) => Some(t.content.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<LaidOutPage>,
    /// Every image referenced by the pages, in first-use order.
    pub images: Vec<Arc<DecodedImage>>,
}

/// One item of a broken line: a run fragment at an x offset from the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub text: String,
    pub style: TextStyle,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub items: Vec<LineItem>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    geometry: PageGeometry,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn layout(&self, blocks: &[ContentBlock]) -> Result<LaidOutDocument, RenderError> {
        let mut flow = PageFlow::new(self.geometry);
        for block in blocks {
            match block {
                ContentBlock::Title(b) | ContentBlock::Paragraph(b) => flow.place_text(b, false)?,
                ContentBlock::Code(b) => flow.place_text(b, true)?,
                ContentBlock::Rule(rule) => flow.place_rule(rule),
                ContentBlock::Image(image) => flow.place_image(image),
            }
        }
        let (pages, images) = flow.finish();
        log::debug!(
            "Laid out {} block(s) onto {} page(s)",
            blocks.len(),
            pages.len()
        );
        Ok(LaidOutDocument {
            geometry: self.geometry,
            pages,
            images,
        })
    }
}

struct PageFlow {
    content: Rect,
    pages: Vec<LaidOutPage>,
    current: Vec<PositionedElement>,
    y: f32,
    images: Vec<Arc<DecodedImage>>,
}

impl PageFlow {
    fn new(geometry: PageGeometry) -> Self {
        let content = geometry.content_rect();
        Self {
            content,
            pages: Vec::new(),
            current: Vec::new(),
            y: content.y,
            images: Vec::new(),
        }
    }

    fn bottom(&self) -> f32 {
        self.content.bottom()
    }

    fn at_page_top(&self) -> bool {
        self.current.is_empty() && self.y <= self.content.y
    }

    fn new_page(&mut self) {
        let elements = std::mem::take(&mut self.current);
        self.pages.push(LaidOutPage {
            number: self.pages.len() + 1,
            elements,
        });
        self.y = self.content.y;
    }

    /// Moves the cursor down, starting a new page when the gap runs past the bottom.
    fn advance(&mut self, amount: f32) {
        if self.y + amount > self.bottom() {
            self.new_page();
        } else {
            self.y += amount;
        }
    }

    fn finish(mut self) -> (Vec<LaidOutPage>, Vec<Arc<DecodedImage>>) {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        (self.pages, self.images)
    }

    fn place_text(&mut self, block: &TextBlock, preformatted: bool) -> Result<(), RenderError> {
        let inner_width = self.content.width - block.padding.horizontal_sum();
        if inner_width <= 0.0 {
            return Err(RenderError::Layout(format!(
                "block padding leaves no room for text ({:.1}pt)",
                inner_width
            )));
        }
        let lines = break_lines(block, inner_width, preformatted);
        if lines.is_empty() {
            return Ok(());
        }

        self.advance(block.margin.top);
        let first_needed = block.padding.top + lines[0].height + block.padding.bottom;
        if self.y + first_needed > self.bottom() && !self.at_page_top() {
            self.new_page();
        }

        let mut fragment = Fragment::begin(self);
        self.y += block.padding.top;
        for line in &lines {
            if self.y + line.height + block.padding.bottom > self.bottom() && fragment.has_lines {
                self.close_fragment(fragment, block);
                self.new_page();
                fragment = Fragment::begin(self);
                self.y += block.padding.top;
            }
            self.place_line(line, block.align, block.padding.left, inner_width);
            fragment.has_lines = true;
        }
        self.close_fragment(fragment, block);
        self.advance(block.margin.bottom);
        Ok(())
    }

    fn place_line(&mut self, line: &Line, align: TextAlign, padding_left: f32, inner_width: f32) {
        let offset = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => ((inner_width - line.width) / 2.0).max(0.0),
        };
        let line_x = self.content.x + padding_left + offset;
        for item in &line.items {
            let y = self.y + (line.height - item.style.size) / 2.0;
            self.current.push(PositionedElement {
                x: line_x + item.x,
                y,
                width: item.width,
                height: item.style.size,
                element: LayoutElement::Text(TextElement {
                    content: item.text.clone(),
                    style: item.style,
                }),
            });
        }
        self.y += line.height;
    }

    /// Ends the part of a block that sits on the current page, painting its
    /// background underneath the lines already placed.
    fn close_fragment(&mut self, fragment: Fragment, block: &TextBlock) {
        self.y += block.padding.bottom;
        if let Some(fill) = block.background {
            let panel = PositionedElement {
                x: self.content.x,
                y: fragment.top,
                width: self.content.width,
                height: self.y - fragment.top,
                element: LayoutElement::Rectangle { fill },
            };
            self.current.insert(fragment.first_element, panel);
        }
    }

    fn place_rule(&mut self, rule: &Rule) {
        self.advance(rule.spacing.top);
        if self.y + rule.thickness > self.bottom() {
            self.new_page();
        }
        self.current.push(PositionedElement {
            x: self.content.x,
            y: self.y,
            width: self.content.width,
            height: rule.thickness,
            element: LayoutElement::Rule { color: rule.color },
        });
        self.y += rule.thickness;
        self.advance(rule.spacing.bottom);
    }

    fn place_image(&mut self, image: &Arc<DecodedImage>) {
        let natural_w = image.width as f32;
        let natural_h = image.height as f32;
        let scale = (self.content.width / natural_w)
            .min(self.content.height / natural_h)
            .min(1.0);
        let (width, height) = (natural_w * scale, natural_h * scale);

        if self.y + height > self.bottom() && !self.at_page_top() {
            self.new_page();
        }

        let resource = match self.images.iter().position(|i| Arc::ptr_eq(i, image)) {
            Some(index) => index,
            None => {
                self.images.push(image.clone());
                self.images.len() - 1
            }
        };
        self.current.push(PositionedElement {
            x: self.content.x + (self.content.width - width) / 2.0,
            y: self.y,
            width,
            height,
            element: LayoutElement::Image(ImageElement {
                resource,
                image: image.clone(),
            }),
        });
        self.y += height;
    }
}

struct Fragment {
    top: f32,
    first_element: usize,
    has_lines: bool,
}

impl Fragment {
    fn begin(flow: &PageFlow) -> Self {
        Self {
            top: flow.y,
            first_element: flow.current.len(),
            has_lines: false,
        }
    }
}

/// Breaks the runs of a block into lines no wider than `max_width`.
///
/// Regular text wraps at spaces and honours `\n`; preformatted text only breaks at
/// `\n`, splitting overlong lines between characters. Words wider than a line are
/// split the same way.
pub fn break_lines(block: &TextBlock, max_width: f32, preformatted: bool) -> Vec<Line> {
    let mut builder = LineBuilder::new(max_width, block.base_style());
    for run in &block.runs {
        if preformatted {
            for (i, segment) in run.text.split('\n').enumerate() {
                if i > 0 {
                    builder.hard_break();
                }
                builder.push_word(segment, run.style);
            }
        } else {
            builder.push_flowed(&run.text, run.style);
        }
    }
    builder.finish()
}

struct LineBuilder {
    max_width: f32,
    base_style: TextStyle,
    lines: Vec<Line>,
    items: Vec<LineItem>,
    width: f32,
    pending_space: bool,
    /// Set once anything (even an empty segment) was pushed to the current line.
    touched: bool,
}

impl LineBuilder {
    fn new(max_width: f32, base_style: TextStyle) -> Self {
        Self {
            max_width,
            base_style,
            lines: Vec::new(),
            items: Vec::new(),
            width: 0.0,
            pending_space: false,
            touched: false,
        }
    }

    fn push_flowed(&mut self, text: &str, style: TextStyle) {
        let mut word_start: Option<usize> = None;
        for (i, c) in text.char_indices() {
            let separator = c == '\n' || (c.is_whitespace() && c != NBSP);
            if !separator {
                word_start.get_or_insert(i);
                continue;
            }
            if let Some(start) = word_start.take() {
                self.push_word(&text[start..i], style);
            }
            if c == '\n' {
                self.hard_break();
            } else {
                self.pending_space = true;
            }
        }
        if let Some(start) = word_start {
            self.push_word(&text[start..], style);
        }
    }

    fn push_word(&mut self, word: &str, style: TextStyle) {
        self.touched = true;
        if word.is_empty() {
            return;
        }
        let mut space = if self.pending_space && !self.items.is_empty() {
            style.font.text_width(" ", style.size)
        } else {
            0.0
        };
        self.pending_space = false;

        let width = style.font.text_width(word, style.size);
        if !self.items.is_empty() && self.width + space + width > self.max_width {
            self.soft_break();
            space = 0.0;
        }
        if width > self.max_width {
            self.push_split(word, style, space);
        } else {
            self.append(word, style, space, width);
        }
    }

    /// Splits a word that cannot fit on any line between characters.
    fn push_split(&mut self, word: &str, style: TextStyle, mut space: f32) {
        let mut chunk = String::new();
        let mut chunk_width = 0.0;
        for c in word.chars() {
            let cw = style.font.char_width(c) as f32 * style.size / 1000.0;
            if !chunk.is_empty() && self.width + space + chunk_width + cw > self.max_width {
                self.append(&chunk, style, space, chunk_width);
                self.soft_break();
                space = 0.0;
                chunk.clear();
                chunk_width = 0.0;
            }
            chunk.push(c);
            chunk_width += cw;
        }
        if !chunk.is_empty() {
            self.append(&chunk, style, space, chunk_width);
        }
    }

    fn append(&mut self, text: &str, style: TextStyle, space: f32, width: f32) {
        match self.items.last_mut() {
            Some(last) if last.style == style => {
                if space > 0.0 {
                    last.text.push(' ');
                }
                last.text.push_str(text);
                last.width += space + width;
            }
            _ => self.items.push(LineItem {
                text: text.to_string(),
                style,
                x: self.width + space,
                width,
            }),
        }
        self.width += space + width;
    }

    fn soft_break(&mut self) {
        self.flush_line();
    }

    fn hard_break(&mut self) {
        self.touched = true;
        self.flush_line();
        // the next line exists even if nothing is pushed to it
        self.touched = true;
    }

    fn flush_line(&mut self) {
        let items = std::mem::take(&mut self.items);
        let height = items
            .iter()
            .map(|i| i.style.line_height())
            .fold(0.0f32, f32::max);
        let height = if height > 0.0 {
            height
        } else {
            self.base_style.line_height()
        };
        self.lines.push(Line {
            items,
            width: self.width,
            height,
        });
        self.width = 0.0;
        self.pending_space = false;
        self.touched = false;
    }

    fn finish(mut self) -> Vec<Line> {
        if !self.items.is_empty() || self.touched {
            self.flush_line();
        }
        self.lines
    }
}
