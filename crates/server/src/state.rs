use crate::config::Config;
use crate::error::Result;
use crate::pages;
use folio::{AdapterFactory, ArticleSettings};
use handlebars::Handlebars;
use std::sync::Arc;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Hands out one fresh adapter per request
    pub factory: Arc<dyn AdapterFactory>,

    pub settings: Arc<ArticleSettings>,

    /// Registered HTML page templates
    pub pages: Arc<Handlebars<'static>>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let factory = config.render.backend;
        Self::with_factory(config, Arc::new(factory))
    }

    pub fn with_factory(config: Config, factory: Arc<dyn AdapterFactory>) -> Result<Self> {
        Ok(Self {
            factory,
            settings: Arc::new(config.article_settings()),
            pages: Arc::new(pages::registry()?),
            config: Arc::new(config),
        })
    }
}
