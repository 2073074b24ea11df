//! One-shot messages carried across the post/redirect/get hop in a cookie.

use axum::http::{HeaderMap, HeaderValue, header};

pub const COOKIE_NAME: &str = "folio_flash";

/// `Set-Cookie` value storing `message` until the next page view.
pub fn set_cookie(message: &str) -> Option<HeaderValue> {
    let value = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        COOKIE_NAME,
        urlencoding::encode(message)
    );
    HeaderValue::from_str(&value)
        .inspect_err(|e| tracing::warn!("Dropping flash message: {}", e))
        .ok()
}

/// `Set-Cookie` value expiring the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("folio_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// The pending message in the request's cookies, if any.
pub fn read(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|message| message.into_owned())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_survives_the_cookie_round_trip() {
        let set = set_cookie("Erro ao gerar PDF: imagem inválida; tente novamente").unwrap();
        let pair = set.to_str().unwrap().split("; Path").next().unwrap().to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("other=1; {}", pair)).unwrap(),
        );
        assert_eq!(
            read(&headers).as_deref(),
            Some("Erro ao gerar PDF: imagem inválida; tente novamente")
        );
    }

    #[test]
    fn cleared_cookie_reads_as_nothing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("folio_flash="));
        assert_eq!(read(&headers), None);
        assert!(clear_cookie().to_str().unwrap().contains("Max-Age=0"));
    }
}
