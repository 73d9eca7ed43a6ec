//! Doctor command - verify configuration and data files.

use crate::cli::Output;
use crate::collection::{Collection, Corpus};
use crate::config::Settings;
use crate::error::AshaError;
use crate::loader::DataLoader;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Asha Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("Embedding").bold());
    let api_check = check_openai_api_key(std::env::var("OPENAI_API_KEY").ok().as_deref());
    api_check.print();
    checks.push(api_check);
    Output::kv("Model", &settings.embedding.model);

    println!();

    println!("{}", style("Data Files").bold());
    let loader = DataLoader::from_settings(settings);
    for collection in Collection::ALL {
        let check = check_collection(&loader, collection);
        check.print();
        checks.push(check);
    }

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found. Please fix them before using Asha.", errors));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Asha is ready to use.");
    }

    Ok(())
}

fn check_openai_api_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(k) if k.starts_with("sk-") && k.chars().count() > 20 => {
            let masked = mask_key(k);
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", masked))
        }
        Some("") => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// First seven and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(7).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Load a collection and report how many records survive validation.
fn check_collection(loader: &DataLoader, collection: Collection) -> CheckResult {
    let path = loader.path_for(collection);
    match loader.read(collection) {
        Ok(records) => {
            let total = records.len();
            let valid = Corpus::build(collection, records).len();
            let message = format!("{} ({} records, {} valid)", path.display(), total, valid);
            if valid == 0 {
                CheckResult::warning(
                    collection.as_str(),
                    &message,
                    "No usable records; queries for this collection fall back to combined results",
                )
            } else {
                CheckResult::ok(collection.as_str(), &message)
            }
        }
        Err(AshaError::SourceUnavailable { path, .. }) => CheckResult::warning(
            collection.as_str(),
            &format!("{} (missing)", path),
            "The collection will be treated as empty",
        ),
        Err(e) => CheckResult::error(
            collection.as_str(),
            &e.to_string(),
            "Fix the file format; retrieval returns an error result while it is malformed",
        ),
    }
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning("Config file", "using defaults", "Create with: asha config init")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_api_key_check() {
        assert_eq!(
            check_openai_api_key(Some("sk-abcdefghijklmnopqrstuvwxyz")).status,
            CheckStatus::Ok
        );
        assert_eq!(check_openai_api_key(Some("")).status, CheckStatus::Error);
        assert_eq!(check_openai_api_key(Some("gsk_123")).status, CheckStatus::Warning);
        assert_eq!(check_openai_api_key(None).status, CheckStatus::Error);
    }

    #[test]
    fn test_api_key_mask_handles_non_ascii() {
        let key = "sk-ключ-abcdefghijklmnopé";
        let result = check_openai_api_key(Some(key));
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(mask_key(key), "sk-ключ...nopé");
        assert_eq!(mask_key("sk-abcdefghijklmnopqrstuvwxyz"), "sk-abcd...wxyz");
    }

    #[test]
    fn test_collection_checks() {
        let dir = TempDir::new().unwrap();
        let loader = DataLoader::new(dir.path());

        assert_eq!(check_collection(&loader, Collection::Jobs).status, CheckStatus::Warning);

        write_fixtures(dir.path());
        let jobs = check_collection(&loader, Collection::Jobs);
        assert_eq!(jobs.status, CheckStatus::Ok);
        assert!(jobs.message.contains("4 records, 3 valid"));

        std::fs::write(loader.path_for(Collection::Sessions), "{").unwrap();
        assert_eq!(check_collection(&loader, Collection::Sessions).status, CheckStatus::Error);
    }
}
