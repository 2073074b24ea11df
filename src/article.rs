//! The fixed article layout: which adapter calls a request turns into.

use crate::content::{ContentSection, parse_content};
use crate::error::Error;
use chrono::{DateTime, Local};
use folio_render_core::ArticleAdapter;
use folio_types::{ArticleViewModel, HeadingLevel};
use serde::{Deserialize, Serialize};

/// Site and article texts that are the same for every generated PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSettings {
    pub site_name: String,
    pub volume: u32,
    pub number: u32,
    pub subject: String,
    pub keywords: String,
    pub abstract_text: String,
    pub key_words: String,
    pub introduction: String,
    pub default_title: String,
    pub default_author: String,
    pub default_content: String,
}

impl Default for ArticleSettings {
    fn default() -> Self {
        Self {
            site_name: "leaders.tec.br".into(),
            volume: 1,
            number: 1,
            subject: "Artigo Técnico".into(),
            keywords: "PDF, Artigo, Tecnologia".into(),
            abstract_text: "Este é um artigo de exemplo gerado pela plataforma leaders.tec.br, \
                            demonstrando o uso do módulo de geração de artigos em PDF."
                .into(),
            key_words: "PDF, Tecnologia, Open Source, C#, .NET".into(),
            introduction: "Introdução".into(),
            default_title: "Título do Artigo".into(),
            default_author: "Autor Desconhecido".into(),
            default_content: "Conteúdo do artigo não fornecido.".into(),
        }
    }
}

/// The user supplied part of an article. Missing or blank fields fall back to
/// the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

impl ArticleRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            content: Some(content.into()),
        }
    }

    pub fn title<'a>(&'a self, settings: &'a ArticleSettings) -> &'a str {
        or_default(&self.title, &settings.default_title)
    }

    pub fn author<'a>(&'a self, settings: &'a ArticleSettings) -> &'a str {
        or_default(&self.author, &settings.default_author)
    }

    pub fn content<'a>(&'a self, settings: &'a ArticleSettings) -> &'a str {
        or_default(&self.content, &settings.default_content)
    }
}

pub fn build_view_model(request: &ArticleRequest, settings: &ArticleSettings, now: DateTime<Local>) -> ArticleViewModel {
    ArticleViewModel::new(request.title(settings), request.author(settings))
        .with_subject(settings.subject.clone())
        .with_keywords(settings.keywords.clone())
        .with_creation_date(now)
        .with_issue(settings.volume, settings.number)
}

/// Download name of an article generated at `now`.
pub fn download_filename(now: DateTime<Local>) -> String {
    format!("artigo_{}.pdf", now.format("%Y%m%d_%H%M%S"))
}

/// Drives `adapter` through the article layout and returns the PDF bytes.
///
/// Content markup is parsed before the document is opened, so malformed
/// content fails without touching the adapter.
pub fn compose_article(
    adapter: &mut dyn ArticleAdapter,
    request: &ArticleRequest,
    settings: &ArticleSettings,
    now: DateTime<Local>,
) -> Result<Vec<u8>, Error> {
    let sections = parse_content(request.content(settings))?;
    let model = build_view_model(request, settings, now);
    let author = request.author(settings);

    adapter.open_document(&model, &settings.site_name)?;
    adapter.add_title(&model.title)?;
    adapter.add_header_paragraph(&format!("Por: {}", author))?;
    adapter.add_header_paragraph(&format!("Data: {}", now.format("%d/%m/%Y")))?;
    adapter.add_line_top()?;
    adapter.add_abstract(&settings.abstract_text)?;
    adapter.add_key_words(&settings.key_words)?;
    adapter.add_subtitle(&settings.introduction, HeadingLevel::H2)?;
    for section in &sections {
        match section {
            ContentSection::Heading { text, level } => adapter.add_subtitle(text, *level)?,
            ContentSection::Paragraph(text) => adapter.add_body(text)?,
            ContentSection::Code(text) => adapter.add_code(text)?,
            ContentSection::Image { alt, bytes } => {
                log::debug!("Embedding image '{}' ({} bytes)", alt, bytes.len());
                adapter.add_image(bytes)?
            }
        }
    }
    adapter.add_line_bottom()?;
    adapter.add_author_about(&format!("Sobre o autor: {}", author))?;

    let bytes = adapter.build()?;
    log::info!(
        "Composed '{}' with {} ({} bytes)",
        model.title,
        adapter.backend_name(),
        bytes.len()
    );
    Ok(bytes)
}
