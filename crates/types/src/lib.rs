pub mod article;
pub mod color;
pub mod geometry;

pub use article::{ArticleViewModel, HeadingLevel};
pub use color::Color;
pub use geometry::{Insets, PageSize, Rect};
