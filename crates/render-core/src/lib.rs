//! Core of the article PDF pipeline.
//!
//! This crate holds everything the PDF backends share:
//! - the `ArticleAdapter` contract and its `ArticleDocument` implementation
//! - the `DocumentRenderer` trait each backend implements
//! - content blocks, the flow layout and the page decoration hook
//! - error types and small encoding helpers

pub mod block;
pub mod decoration;
mod document;
mod error;
pub mod font;
pub mod layout;
pub mod theme;
mod traits;
mod types;
pub mod utils;

pub use block::{BlockKind, ContentBlock, DecodedImage, TextAlign, TextStyle};
pub use decoration::{PageCanvas, PageDecorator, PageInfo, StandardPageDecoration};
pub use document::{ArticleDocument, preserve_spaces, split_title};
pub use error::RenderError;
pub use font::StandardFont;
pub use layout::{LaidOutDocument, LaidOutPage, LayoutElement, LayoutEngine, PageGeometry, PositionedElement};
pub use traits::{ArticleAdapter, DocumentRenderer};
pub use types::DocumentMetadata;
