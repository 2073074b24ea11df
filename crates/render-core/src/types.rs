use folio_types::ArticleViewModel;

/// Values written to the PDF document information dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: Vec<String>,
    /// `D:YYYYMMDDHHmmSS` formatted creation date.
    pub creation_date: String,
    /// The same instant as seconds since the Unix epoch.
    pub creation_timestamp: i64,
}

impl DocumentMetadata {
    pub fn from_article(model: &ArticleViewModel) -> Self {
        let author = if model.author_email.is_empty() {
            model.author.clone()
        } else {
            format!("{} <{}>", model.author, model.author_email)
        };
        Self {
            title: model.title.clone(),
            author,
            subject: model.subject.clone(),
            keywords: model.keyword_list(),
            creation_date: model.creation_date.format("D:%Y%m%d%H%M%S").to_string(),
            creation_timestamp: model.creation_date.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn metadata_from_article() {
        let date = chrono::Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let model = ArticleViewModel::new("Title", "Ana")
            .with_author_email("ana@example.com")
            .with_subject("Artigo Técnico")
            .with_keywords("PDF, Artigo")
            .with_creation_date(date);
        let meta = DocumentMetadata::from_article(&model);
        assert_eq!(meta.author, "Ana <ana@example.com>");
        assert_eq!(meta.keywords, vec!["PDF", "Artigo"]);
        assert_eq!(meta.creation_date, "D:20240506070809");
        assert_eq!(meta.creation_timestamp, date.timestamp());
    }
}
