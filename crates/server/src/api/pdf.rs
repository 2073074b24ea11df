use crate::error::{Result, ServiceError};
use crate::{flash, pages};
use crate::state::AppState;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use folio::{ArticleRequest, compose_article, download_filename};
use serde::Deserialize;

pub const INDEX_PATH: &str = "/Pdf/Index";
pub const GENERATE_PATH: &str = "/Pdf/Generate";

/// Fields posted by the article form. Any of them may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl From<GenerateForm> for ArticleRequest {
    fn from(form: GenerateForm) -> Self {
        ArticleRequest {
            title: form.title,
            author: form.author,
            content: form.content,
        }
    }
}

pub async fn root() -> Redirect {
    Redirect::to(INDEX_PATH)
}

/// The article form. A pending flash message is shown once and cleared.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let message = flash::read(&headers);
    let page = Html(pages::render_index(&state.pages, message.as_deref())?);
    Ok(match message {
        Some(_) => ([(header::SET_COOKIE, flash::clear_cookie())], page).into_response(),
        None => page.into_response(),
    })
}

/// Renders the posted article. Failures never produce a partial PDF: they
/// redirect back to the form with the reason in a flash message.
pub async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    let request = ArticleRequest::from(form);
    match render(&state, request).await {
        Ok((bytes, filename)) => {
            tracing::info!("Generated {} ({} bytes)", filename, bytes.len());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("PDF generation failed: {}", e);
            let message = format!("Erro ao gerar PDF: {}", e);
            match flash::set_cookie(&message) {
                Some(cookie) => ([(header::SET_COOKIE, cookie)], Redirect::to(INDEX_PATH)).into_response(),
                None => Redirect::to(INDEX_PATH).into_response(),
            }
        }
    }
}

async fn render(state: &AppState, request: ArticleRequest) -> Result<(Vec<u8>, String)> {
    let mut adapter = state.factory.create();
    let settings = state.settings.clone();
    let now = Local::now();
    tracing::debug!("Composing '{}' with {}", request.title(&settings), adapter.backend_name());

    let bytes = tokio::task::spawn_blocking(move || {
        compose_article(adapter.as_mut(), &request, &settings, now)
    })
    .await
    .map_err(|e| ServiceError::TaskFailed(e.to_string()))??;

    Ok((bytes, download_filename(now)))
}
