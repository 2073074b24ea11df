//! Per-page header and footer drawing.

use crate::font::StandardFont;
use crate::theme;
use folio_types::Color;

/// The page a decorator is asked to draw on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,
    pub width: f32,
    pub height: f32,
}

/// Absolute-position text drawing offered by a backend while it emits a page.
///
/// `baseline_y` is measured from the top edge of the page.
pub trait PageCanvas {
    fn show_text(
        &mut self,
        text: &str,
        x: f32,
        baseline_y: f32,
        font: StandardFont,
        size: f32,
        color: Color,
    );
}

/// Callback run by a backend once for every page it creates.
pub trait PageDecorator: Send + Sync {
    fn decorate(&self, page: &PageInfo, canvas: &mut dyn PageCanvas);
}

/// Site name on the left, "Volume V, Number N" on the right, page number centered
/// at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardPageDecoration {
    site_name: String,
    volume: u32,
    number: u32,
}

impl StandardPageDecoration {
    const FONT: StandardFont = StandardFont::HelveticaOblique;

    pub fn new(site_name: impl Into<String>, volume: u32, number: u32) -> Self {
        Self {
            site_name: site_name.into(),
            volume,
            number,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn issue_label(&self) -> String {
        format!("Volume {}, Number {}", self.volume, self.number)
    }
}

impl PageDecorator for StandardPageDecoration {
    fn decorate(&self, page: &PageInfo, canvas: &mut dyn PageCanvas) {
        let header_y = theme::DECORATION_EDGE_OFFSET;
        canvas.show_text(
            &self.site_name,
            theme::DECORATION_SIDE_OFFSET,
            header_y,
            Self::FONT,
            theme::SITE_NAME_SIZE,
            theme::SITE_NAME_COLOR,
        );

        let issue = self.issue_label();
        let issue_width = Self::FONT.text_width(&issue, theme::ISSUE_SIZE);
        canvas.show_text(
            &issue,
            page.width - theme::DECORATION_SIDE_OFFSET - issue_width,
            header_y,
            Self::FONT,
            theme::ISSUE_SIZE,
            theme::ISSUE_COLOR,
        );

        let number = page.number.to_string();
        let number_width = Self::FONT.text_width(&number, theme::PAGE_NUMBER_SIZE);
        canvas.show_text(
            &number,
            (page.width - number_width) / 2.0,
            page.height - theme::DECORATION_EDGE_OFFSET,
            Self::FONT,
            theme::PAGE_NUMBER_SIZE,
            theme::PAGE_NUMBER_COLOR,
        );
    }
}
