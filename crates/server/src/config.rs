use folio::{ArticleSettings, Backend};
use serde::Deserialize;
use std::path::Path;

const CONFIG_ENV: &str = "FOLIO_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub site: SiteConfig,
    /// Fixed article texts and the fallbacks for missing form fields.
    pub article: ArticleSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            max_request_size_mb: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub backend: Backend,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub volume: u32,
    pub number: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let defaults = ArticleSettings::default();
        Self {
            name: defaults.site_name,
            volume: defaults.volume,
            number: defaults.number,
        }
    }
}

impl Config {
    /// Loads `$FOLIO_CONFIG` (path without `.toml`) or the first
    /// `config/default.toml` found, then layers `FOLIO__SECTION__KEY`
    /// environment variables on top. Without any file the built-in
    /// defaults apply.
    pub fn load() -> Result<Self, config::ConfigError> {
        let candidates = ["config/default", "crates/server/config/default"];

        let from_env = std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty());
        let path = match from_env {
            Some(path) => Some(path),
            None => candidates
                .iter()
                .find(|c| Path::new(&format!("{}.toml", c)).exists())
                .map(|c| c.to_string()),
        };
        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            tracing::debug!("Reading configuration from {}.toml", path);
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("FOLIO").separator("__"));
        builder.build()?.try_deserialize()
    }

    pub fn max_request_bytes(&self) -> usize {
        self.server.max_request_size_mb.saturating_mul(1024 * 1024)
    }

    /// The `[article]` texts with the `[site]` identity applied on top.
    pub fn article_settings(&self) -> ArticleSettings {
        ArticleSettings {
            site_name: self.site.name.clone(),
            volume: self.site.volume,
            number: self.site.number,
            ..self.article.clone()
        }
    }
}
