//! Pre-flight checks before retrieval.
//!
//! Validates that the embedding provider is usable before a query would
//! otherwise fail inside the ranking step.

use crate::config::Settings;
use crate::error::{AshaError, Result};

/// Run pre-flight checks for a retrieval command.
pub fn check(settings: &Settings) -> Result<()> {
    if settings.embedding.provider.eq_ignore_ascii_case("openai") {
        check_api_key(std::env::var("OPENAI_API_KEY").ok().as_deref())?;
    }
    Ok(())
}

/// Check that an OpenAI API key is configured.
pub fn check_api_key(key: Option<&str>) -> Result<()> {
    match key {
        Some(k) if !k.trim().is_empty() => Ok(()),
        Some(_) => Err(AshaError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(AshaError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
