use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The descriptive data of one article, as handed to a PDF adapter.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleViewModel {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default = "Local::now")]
    pub creation_date: DateTime<Local>,
    /// Journal volume printed in the page header.
    #[serde(default = "default_issue")]
    pub volume: u32,
    /// Issue number within the volume.
    #[serde(default = "default_issue")]
    pub number: u32,
}

fn default_issue() -> u32 {
    1
}

impl Default for ArticleViewModel {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            author_email: String::new(),
            subject: String::new(),
            keywords: String::new(),
            creation_date: Local::now(),
            volume: default_issue(),
            number: default_issue(),
        }
    }
}

impl ArticleViewModel {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_author_email(mut self, email: impl Into<String>) -> Self {
        self.author_email = email.into();
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Local>) -> Self {
        self.creation_date = date;
        self
    }

    pub fn with_issue(mut self, volume: u32, number: u32) -> Self {
        self.volume = volume;
        self.number = number;
        self
    }

    /// Splits the comma separated keyword string into trimmed, non-empty entries.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Section heading depth inside the article body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
}

impl HeadingLevel {
    /// Maps an HTML-like tag name onto a level.
    ///
    /// Any tag containing the digit `3` is a third-level heading; everything else
    /// is rendered as a second-level heading.
    pub fn from_tag(tag: &str) -> Self {
        if tag.contains('3') {
            HeadingLevel::H3
        } else if tag.eq_ignore_ascii_case("h1") {
            HeadingLevel::H1
        } else {
            HeadingLevel::H2
        }
    }

    /// Font size in points used for a subtitle of this level.
    pub fn font_size(self) -> f32 {
        match self {
            HeadingLevel::H3 => 10.0,
            HeadingLevel::H1 | HeadingLevel::H2 => 12.0,
        }
    }
}
