use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where the recipe catalog is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in sample recipes.
    Static,
    /// The `recipes` table.
    Database,
}

impl FromStr for CatalogSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(CatalogSource::Static),
            "database" | "db" => Ok(CatalogSource::Database),
            other => bail!("RECIPE_CATALOG must be 'static' or 'database', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Chat and plan personalization are disabled when unset.
    pub openai_api_key: Option<String>,
    pub frontend_url: String,
    pub recipe_catalog: CatalogSource,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            recipe_catalog: std::env::var("RECIPE_CATALOG")
                .unwrap_or_else(|_| "static".to_string())
                .parse()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_source_parses_known_values() {
        assert_eq!("static".parse::<CatalogSource>().unwrap(), CatalogSource::Static);
        assert_eq!(" Database ".parse::<CatalogSource>().unwrap(), CatalogSource::Database);
        assert_eq!("db".parse::<CatalogSource>().unwrap(), CatalogSource::Database);
    }

    #[test]
    fn test_catalog_source_rejects_unknown_value() {
        let err = "redis".parse::<CatalogSource>().unwrap_err();
        assert!(err.to_string().contains("redis"));
    }
}
