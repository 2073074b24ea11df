mod common;

use common::fixtures::*;
use common::pdf_assertions::count_images;
use common::{TestResult, fixed_now, generate, init_logger};
use folio::{ArticleRequest, ArticleSettings, Backend, Error, RenderError, compose_article};

#[test]
fn minimal_article_renders_on_both_backends() -> TestResult {
    init_logger();
    for backend in Backend::ALL {
        let pdf = generate(backend, &ArticleRequest::new("T", "A", "C"))?;
        assert!(pdf.bytes.starts_with(b"%PDF"), "{backend} output is not a PDF");
        assert_pdf_page_count!(pdf, 1);
    }
    Ok(())
}

#[test]
fn article_sequence_is_visible_in_the_output() -> TestResult {
    init_logger();
    let pdf = generate(Backend::Lopdf, &ArticleRequest::new("Rust e PDF", "Maria", "Texto inicial."))?;

    assert_pdf_contains_text!(pdf, "Por: Maria");
    assert_pdf_contains_text!(pdf, "Data: 15/07/2024");
    assert_pdf_contains_text!(pdf, "Abstract:");
    assert_pdf_contains_text!(pdf, "Key words:");
    assert_pdf_contains_text!(pdf, "PDF, Tecnologia, Open Source, C#, .NET");
    assert_pdf_contains_text!(pdf, "Texto inicial.");
    assert_pdf_contains_text!(pdf, "Sobre o autor: Maria");
    assert_pdf_contains_text!(pdf, "leaders.tec.br");
    assert_pdf_contains_text!(pdf, "Volume 1, Number 1");
    assert_pdf_has_font!(pdf, "Helvetica-Bold");
    assert_pdf_has_font!(pdf, "Helvetica-Oblique");
    Ok(())
}

#[test]
fn missing_fields_fall_back_to_defaults() -> TestResult {
    let pdf = generate(Backend::Lopdf, &ArticleRequest::default())?;
    assert_pdf_contains_text!(pdf, "Autor Desconhecido");
    assert_pdf_contains_text!(pdf, "Conte");
    Ok(())
}

#[test]
fn markup_becomes_headings_code_and_images() -> TestResult {
    init_logger();
    let content = format!(
        "Primeiro paragrafo.\n\n## Detalhes\n\n```\nfn main() {{\n    println!(\"oi\");\n}}\n```\n\n{}\n\nFim.",
        image_markup("diagrama", "image/png", &png(60, 30))
    );
    for backend in Backend::ALL {
        let pdf = generate(backend, &ArticleRequest::new("Markup", "Ana", content.clone()))?;
        assert!(count_images(&pdf.doc) >= 1, "{backend} did not embed the image");
    }

    let pdf = generate(Backend::Lopdf, &ArticleRequest::new("Markup", "Ana", content))?;
    assert_eq!(count_images(&pdf.doc), 1);
    assert_pdf_contains_text!(pdf, "Detalhes");
    assert_pdf_contains_text!(pdf, "Fim.");
    assert_pdf_has_font!(pdf, "Courier");
    Ok(())
}

#[test]
fn long_articles_paginate_identically_on_both_backends() -> TestResult {
    init_logger();
    let request = ArticleRequest::new("Longo", "Ana", long_content(60));
    let printpdf = generate(Backend::PrintPdf, &request)?;
    let lopdf = generate(Backend::Lopdf, &request)?;

    assert_pdf_min_pages!(lopdf, 2);
    assert_eq!(printpdf.page_count(), lopdf.page_count());

    for page in 1..=lopdf.page_count() as u32 {
        let text = lopdf.doc.extract_text(&[page])?;
        assert!(text.contains("leaders.tec.br"), "page {page} has no header");
    }
    Ok(())
}

#[test]
fn malformed_image_markup_fails_before_rendering() {
    let mut adapter = Backend::Lopdf.create_adapter();
    let request = ArticleRequest::new("T", "A", "![x](data:image/png;base64,@@@)");
    let err = compose_article(adapter.as_mut(), &request, &ArticleSettings::default(), fixed_now())
        .unwrap_err();
    assert!(matches!(err, Error::Content(_)));
}

#[test]
fn undecodable_image_is_a_render_error() {
    let mut adapter = Backend::PrintPdf.create_adapter();
    let request = ArticleRequest::new("T", "A", image_markup("x", "image/png", b"not really a png"));
    let err = compose_article(adapter.as_mut(), &request, &ArticleSettings::default(), fixed_now())
        .unwrap_err();
    assert!(matches!(err, Error::Render(RenderError::UnsupportedImage(_))));
}

#[test]
fn gif_images_are_accepted() -> TestResult {
    let content = image_markup("anim", "image/gif", &gif(10, 10));
    let pdf = generate(Backend::Lopdf, &ArticleRequest::new("Gif", "Ana", content))?;
    assert_eq!(count_images(&pdf.doc), 1);
    Ok(())
}
