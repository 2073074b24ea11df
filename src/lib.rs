//! Folio composes technical articles into styled PDF documents.
//!
//! The article layout is expressed once, as calls against the
//! [`ArticleAdapter`] contract, and rendered by one of two interchangeable
//! engines selected through [`Backend`].

pub mod article;
pub mod backend;
pub mod content;
mod error;

pub use article::{ArticleRequest, ArticleSettings, build_view_model, compose_article, download_filename};
pub use backend::{AdapterFactory, Backend};
pub use error::Error;

pub use folio_render_core::{ArticleAdapter, ArticleDocument, ContentBlock, RenderError};
pub use folio_types::{ArticleViewModel, HeadingLevel};
