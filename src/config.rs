use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Preset author ensured at startup so posts always have an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetAuthor {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Process-wide settings, read once at startup and handed to whatever needs them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub env: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub content_dir: PathBuf,
    pub preset_author: Option<PresetAuthor>,
}

impl Settings {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let preset_author = match (lookup("PRESET_AUTHOR_NAME"), lookup("PRESET_AUTHOR_EMAIL")) {
            (Some(name), Some(email)) => Some(PresetAuthor {
                name,
                email,
                bio: lookup("PRESET_AUTHOR_BIO"),
                avatar: lookup("PRESET_AUTHOR_AVATAR"),
            }),
            _ => None,
        };

        Ok(Self {
            env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            debug: parse_or(&lookup, "DEBUG", false)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            content_dir: lookup("CONTENT_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("content")),
            preset_author,
        })
    }

    pub fn is_development(&self) -> bool {
        self.env == "development"
    }

    pub fn blog_dir(&self) -> PathBuf {
        self.content_dir.join("blog")
    }

    pub fn essays_dir(&self) -> PathBuf {
        self.content_dir.join("essays")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let settings = Settings::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.database_max_connections, 5);
        assert!(!settings.debug);
        assert!(settings.is_development());
        assert_eq!(settings.blog_dir(), PathBuf::from("content/blog"));
        assert!(settings.preset_author.is_none());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn malformed_port_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("DATABASE_URL", "x"), ("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn preset_author_needs_name_and_email() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "x"),
            ("PRESET_AUTHOR_NAME", "Ana"),
            ("PRESET_AUTHOR_EMAIL", "ana@example.com"),
        ]))
        .unwrap();
        let author = settings.preset_author.unwrap();
        assert_eq!(author.name, "Ana");
        assert_eq!(author.bio, None);
    }
}
