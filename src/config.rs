// src/config.rs
//! Externally supplied configuration for the outbound collaborators.
//!
//! Credentials resolve from the environment; a JSON config file may pin them
//! instead, with the literal value "ENV" deferring a field back to the
//! environment. Missing credentials are an expected state (providers are
//! skipped, the model client reports unavailable), never an error here.

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub google_api_key: String,
    #[serde(default)]
    pub google_cse_id: String,
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self {
            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            google_cse_id: env::var("GOOGLE_CSE_ID").unwrap_or_default(),
        }
    }

    pub fn has_google_credentials(&self) -> bool {
        !self.google_api_key.is_empty() && !self.google_cse_id.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl ModelConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl EnrichmentConfig {
    pub fn from_env() -> Self {
        Self {
            search: SearchConfig::from_env(),
            model: ModelConfig::from_env(),
        }
    }

    /// Load from a JSON file. Fields holding the literal "ENV" are resolved
    /// from the corresponding environment variable (empty when unset).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: EnrichmentConfig = serde_json::from_str(&data)?;

        resolve_env(&mut cfg.search.google_api_key, "GOOGLE_API_KEY");
        resolve_env(&mut cfg.search.google_cse_id, "GOOGLE_CSE_ID");
        resolve_env(&mut cfg.model.api_key, "OPENAI_API_KEY");

        Ok(cfg)
    }
}

fn resolve_env(field: &mut String, var: &str) {
    if field.trim().eq_ignore_ascii_case("env") {
        *field = env::var(var).unwrap_or_default();
    }
}
