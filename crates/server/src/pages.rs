//! HTML pages rendered through handlebars, which escapes `{{...}}` values.

use handlebars::Handlebars;
use serde_json::json;

pub const INDEX: &str = "index";

pub fn registry() -> Result<Handlebars<'static>, handlebars::TemplateError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string(INDEX, include_str!("../templates/index.hbs"))?;
    Ok(handlebars)
}

/// The article form, with the pending flash message if there is one.
pub fn render_index(
    handlebars: &Handlebars<'_>,
    message: Option<&str>,
) -> Result<String, handlebars::RenderError> {
    handlebars.render(
        INDEX,
        &json!({
            "message": message,
            "generate_path": crate::api::pdf::GENERATE_PATH,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_text_is_escaped() {
        let pages = registry().unwrap();
        let html = render_index(&pages, Some("<b>x</b> & y")).unwrap();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt; &amp; y"));
        assert!(!html.contains("<b>x</b>"));
    }

    #[test]
    fn form_without_message_has_no_alert() {
        let pages = registry().unwrap();
        let html = render_index(&pages, None).unwrap();
        assert!(!html.contains("role=\"alert\""));
        assert!(html.contains("action=\"/Pdf/Generate\""));
    }
}
