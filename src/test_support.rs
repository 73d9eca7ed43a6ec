//! Deterministic fixtures shared by unit tests.

use crate::embedding::Embedder;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Bag-of-words embedder over a fixed vocabulary.
///
/// Dimension `i` counts occurrences of `vocab[i]` in the lowercased text.
/// Every call to `embed` or `embed_batch` is counted.
pub struct KeywordEmbedder {
    vocab: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocab: &[&str]) -> Self {
        Self {
            vocab: vocab.iter().map(|w| w.to_lowercase()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let text = text.to_lowercase();
        self.vocab
            .iter()
            .map(|w| text.matches(w.as_str()).count() as f32)
            .collect()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn model(&self) -> &str {
        "keyword-test"
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }
}

pub const JOBS_CSV: &str = "\
job_title,company,location,industry,posted_date,apply_link
Python Developer,Initech,Bangalore,Tech,2024-03-01,https://initech.example/apply
Data Scientist,Globex,Pune,Tech,2024-03-05,https://globex.example/apply
Python Architect,,Bangalore,Tech,2024-03-07,https://nocompany.example/apply
Nurse Practitioner,City Hospital,Delhi,Healthcare,2024-02-11,https://city.example/apply
";

pub const SESSIONS_JSON: &str = r#"[
  {"title": "Python Workshop", "description": "Hands-on python for beginners", "date": "2024-05-01"},
  {"title": "Leadership Webinar", "description": "Leading teams remotely"},
  {"title": "Untitled", "description": ""}
]"#;

pub const MENTORSHIP_JSON: &str = r#"[
  {"title": "Women in Data", "description": "Data science mentorship circle", "location": "Pune"},
  {"title": "Tech Leadership Coaching", "description": "Coaching for new leaders", "location": "Delhi"}
]"#;

/// Write all three fixture files into `dir`.
pub fn write_fixtures(dir: &Path) {
    std::fs::write(dir.join(crate::loader::DEFAULT_JOBS_FILE), JOBS_CSV).unwrap();
    std::fs::write(dir.join(crate::loader::DEFAULT_SESSIONS_FILE), SESSIONS_JSON).unwrap();
    std::fs::write(dir.join(crate::loader::DEFAULT_MENTORSHIP_FILE), MENTORSHIP_JSON).unwrap();
}

/// Vocabulary that separates the fixture records.
pub const FIXTURE_VOCAB: &[&str] = &["python", "data", "nurse", "leader", "coach", "tech", "workshop"];
