use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an article entered the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleKind {
    NewsUrl,
    PdfUpload,
}

/// An intelligence source article with its reliability assessment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub source: String,
    pub kind: ArticleKind,
    /// Baseline reliability score in 0.0..=1.0
    pub reliability: f64,
    pub contradictions: u32,
    pub flags: u32,
    pub under_review: bool,
    /// Analyst override, set after review
    pub adjusted_score: Option<f64>,
    pub added_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: impl Into<String>, source: impl Into<String>, kind: ArticleKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            excerpt: String::new(),
            content: String::new(),
            source: source.into(),
            kind,
            reliability: 0.0,
            contradictions: 0,
            flags: 0,
            under_review: false,
            adjusted_score: None,
            added_at: Utc::now(),
        }
    }
}
