// src/config.rs

use std::str::FromStr;

/// Runtime configuration, loaded once in `main` and passed to whatever needs
/// it. Values come from the environment (a local `.env` is honored), with
/// working defaults for everything except the OpenAI key.
#[derive(Debug, Clone)]
pub struct FinsentConfig {
    // ── Reasoning service
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub openai_timeout: u64,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Logging
    pub log_level: String,
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => {
            // Tolerate trailing comments and whitespace in .env values
            let clean = raw.split('#').next().unwrap_or("").trim();
            clean.parse::<T>().unwrap_or(default)
        }
        None => default,
    }
}

fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok(), default)
}

impl FinsentConfig {
    pub fn from_env() -> Self {
        // Existing environment variables win over .env entries
        let _ = dotenvy::dotenv();

        Self {
            openai_api_key: env_var_or("OPENAI_API_KEY", String::new()),
            openai_base_url: env_var_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com".to_string(),
            ),
            model: env_var_or("FINSENT_MODEL", "gpt-4o-mini".to_string()),
            openai_timeout: env_var_or("FINSENT_OPENAI_TIMEOUT", 60),
            database_url: env_var_or(
                "DATABASE_URL",
                "sqlite:./finsent.db?mode=rwc".to_string(),
            ),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            host: env_var_or("FINSENT_HOST", "0.0.0.0".to_string()),
            port: env_var_or("FINSENT_PORT", 8000),
            log_level: env_var_or("FINSENT_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full URL of the chat completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.openai_base_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> FinsentConfig {
        FinsentConfig {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            openai_timeout: 60,
            database_url: "sqlite::memory:".to_string(),
            sqlite_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 8000,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn parse_or_uses_default_when_missing() {
        assert_eq!(parse_or::<u16>(None, 8000), 8000);
    }

    #[test]
    fn parse_or_strips_comments_and_whitespace() {
        assert_eq!(parse_or::<u16>(Some("9000 # port".to_string()), 8000), 9000);
        assert_eq!(parse_or::<String>(Some("  Fed  ".to_string()), String::new()), "Fed");
    }

    #[test]
    fn parse_or_falls_back_on_parse_failure() {
        assert_eq!(parse_or::<u64>(Some("not-a-number".to_string()), 60), 60);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = base_config();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn chat_completions_url_tolerates_trailing_slash() {
        let mut config = base_config();
        config.openai_base_url = "https://api.openai.com/".to_string();
        assert_eq!(
            config.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
