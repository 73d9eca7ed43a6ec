//! CLI output formatting utilities.

use crate::collection::{field_text, Collection, Record};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print one matched record.
    pub fn record(collection: Collection, record: &Record, score: Option<f32>) {
        let (title, detail) = record_summary(collection, record);
        let score = score.map(|s| format!(" (score: {:.2})", s)).unwrap_or_default();

        println!("\n{} {}{}", style(">>").green(), style(title).bold(), score);
        println!("   {}", content_preview(&detail, 200));

        if collection == Collection::Jobs {
            if let Some(link) = field_text(record, "apply_link") {
                println!("   {}", style(link).dim());
            }
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Title line and detail line for a record.
fn record_summary(collection: Collection, record: &Record) -> (String, String) {
    let f = |key: &str| field_text(record, key).unwrap_or_default();
    match collection {
        Collection::Jobs => (
            format!("{} at {}", f("job_title"), f("company")),
            format!("{} | {} | posted {}", f("location"), f("industry"), f("posted_date")),
        ),
        Collection::Sessions | Collection::Mentorship => (f("title"), f("description")),
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_len {
        content
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short\ntext", 20), "short text");
        assert_eq!(content_preview("ééééé", 3), "ééé...");
    }

    #[test]
    fn test_job_summary() {
        let job = json!({
            "job_title": "Analyst", "company": "Acme", "location": "Pune",
            "industry": "Finance", "posted_date": "2024-01-02"
        });
        let (title, detail) = record_summary(Collection::Jobs, job.as_object().unwrap());
        assert_eq!(title, "Analyst at Acme");
        assert_eq!(detail, "Pune | Finance | posted 2024-01-02");
    }
}
