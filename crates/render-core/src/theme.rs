//! Fixed visual constants of the article layout.

use folio_types::{Color, Insets, PageSize};

pub const PAGE_SIZE: PageSize = PageSize::A4;
pub const PAGE_MARGIN: f32 = 50.0;
pub const PAGE_COLOR: Color = Color::WHITE;

/// Default text color of the page.
pub const TEXT_COLOR: Color = Color::gray(0x21);
/// Body and subtitle color.
pub const BODY_COLOR: Color = Color::gray(0x42);
pub const RULE_COLOR: Color = Color::gray(0x9E);
pub const PANEL_COLOR: Color = Color::rgb(0x2E, 0x36, 0x3F);
pub const ACCENT_COLOR: Color = Color::rgb(0xFF, 0x98, 0x00);

/// Line box height as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.2;
/// Tight leading used by the byline paragraphs.
pub const HEADER_LEADING: f32 = 0.8;

pub const TITLE_SIZE: f32 = 20.0;
pub const TITLE_PADDING: Insets = Insets::symmetric(40.0, 40.0);

pub const HEADER_TOP_SIZE: f32 = 10.0;
pub const HEADER_TOP_MARGIN: f32 = 20.0;
pub const HEADER_SIZE: f32 = 8.0;
pub const HEADER_BOTTOM_SIZE: f32 = 10.0;
pub const HEADER_BOTTOM_MARGIN: f32 = 10.0;

pub const RULE_THICKNESS: f32 = 1.0;
pub const RULE_TOP_SPACING: Insets = Insets::vertical(20.0, 5.0);
pub const RULE_BOTTOM_SPACING: Insets = Insets::vertical(5.0, 20.0);

pub const SUMMARY_SIZE: f32 = 11.0;
pub const ABSTRACT_LABEL: &str = "Abstract:";
pub const KEYWORDS_LABEL: &str = "Key words:";

pub const SECTION_MARGIN_TOP: f32 = 10.0;
pub const BODY_SIZE: f32 = 10.0;
pub const CODE_SIZE: f32 = 10.0;
pub const CODE_PADDING: Insets = Insets::all(10.0);
pub const AUTHOR_ABOUT_SIZE: f32 = 9.0;

/// Page decoration: distance of the header baseline from the top edge and of the
/// footer baseline from the bottom edge.
pub const DECORATION_EDGE_OFFSET: f32 = 20.0;
/// Horizontal inset of the header texts from the page sides.
pub const DECORATION_SIDE_OFFSET: f32 = 35.0;
pub const SITE_NAME_SIZE: f32 = 10.0;
pub const SITE_NAME_COLOR: Color = Color::gray(0x61);
pub const ISSUE_SIZE: f32 = 8.0;
pub const ISSUE_COLOR: Color = Color::gray(0x9E);
pub const PAGE_NUMBER_SIZE: f32 = 10.0;
pub const PAGE_NUMBER_COLOR: Color = Color::gray(0x9E);
