//! Configuration module for Asha.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{DataSettings, EmbeddingSettings, GeneralSettings, RetrievalSettings, Settings};
