// src/config/mod.rs
// All values load from the environment (.env supported), with working defaults.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct RehearsalConfig {
    // ── OpenAI Configuration
    pub openai_base_url: String,
    pub model: String,
    pub max_response_tokens: usize,
    pub temperature: f32,
    pub keyword_model_tokens: usize,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Retrieval / Question Bank Services
    pub retrieval_base_url: String,
    pub question_bank_base_url: String,
    pub question_top_k: usize,
    pub question_use_reranker: bool,

    // ── Interview Defaults
    pub default_max_turns: i64,
    pub keyword_memory_limit: i64,

    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Timeouts (seconds)
    pub openai_timeout: u64,
    pub retrieval_timeout: u64,

    // ── Logging
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            // Tolerate inline comments and stray whitespace in .env values
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl RehearsalConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            openai_base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com/v1".to_string()),
            model: env_var_or("REHEARSAL_MODEL", "gpt-4o".to_string()),
            max_response_tokens: env_var_or("REHEARSAL_MAX_RESPONSE_TOKENS", 500),
            temperature: env_var_or("REHEARSAL_TEMPERATURE", 0.7),
            keyword_model_tokens: env_var_or("REHEARSAL_KEYWORD_TOKENS", 1000),
            database_url: env_var_or("DATABASE_URL", "sqlite:./rehearsal.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            retrieval_base_url: env_var_or("RETRIEVAL_BASE_URL", "http://localhost:7700".to_string()),
            question_bank_base_url: env_var_or("QUESTION_BANK_BASE_URL", "http://localhost:7710".to_string()),
            question_top_k: env_var_or("QUESTION_TOP_K", 5),
            question_use_reranker: env_var_or("QUESTION_USE_RERANKER", true),
            default_max_turns: env_var_or("REHEARSAL_MAX_TURNS", 10),
            keyword_memory_limit: env_var_or("REHEARSAL_KEYWORD_LIMIT", 20),
            host: env_var_or("REHEARSAL_HOST", "0.0.0.0".to_string()),
            port: env_var_or("REHEARSAL_PORT", 3001),
            cors_origin: env_var_or("REHEARSAL_CORS_ORIGIN", "http://localhost:3000".to_string()),
            openai_timeout: env_var_or("REHEARSAL_OPENAI_TIMEOUT", 60),
            retrieval_timeout: env_var_or("REHEARSAL_RETRIEVAL_TIMEOUT", 10),
            log_level: env_var_or("REHEARSAL_LOG_LEVEL", "info".to_string()),
        }
    }
}

pub static CONFIG: Lazy<RehearsalConfig> = Lazy::new(RehearsalConfig::from_env);
