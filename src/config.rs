use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty means fully open.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|raw| Self::parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = Config::parse_origins("https://a.example, https://b.example ,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn parse_origins_empty_string_is_empty() {
        assert!(Config::parse_origins("").is_empty());
    }
}
