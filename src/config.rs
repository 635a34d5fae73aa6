use crate::errors::ServerError;
use crate::i18n::Language;
use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// | Env Var                | Default          |
/// |------------------------|------------------|
/// | `HOST`                 | `127.0.0.1`      |
/// | `PORT`                 | `3000`           |
/// | `DATABASE_PATH`        | `icumbi.sqlite3` |
/// | `SCHEMA_PATH`          | `sql/schema.sql` |
/// | `BACKEND_URL`          | required         |
/// | `BACKEND_ANON_KEY`     | required         |
/// | `BACKEND_TIMEOUT_SECS` | `30`             |
/// | `SESSION_TTL_SECS`     | `604800`         |
/// | `DEFAULT_LANGUAGE`     | `en`             |
/// | `MAX_WORKERS`          | `8`              |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub database_path: String,
    pub schema_path: String,
    pub backend: BackendConfig,
    pub session_ttl_secs: i64,
    pub default_language: Language,
    pub max_workers: usize,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co` (no trailing slash).
    pub url: String,
    /// Public anon key, sent as `apikey` on every call.
    pub anon_key: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "127.0.0.1");
        let port: u16 = parse_var("PORT", &var("PORT", "3000"))?;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| ServerError::Config(format!("invalid HOST/PORT: {e}")))?;

        let url = lookup("BACKEND_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ServerError::Config("BACKEND_URL must be set".into()))?;
        let anon_key = lookup("BACKEND_ANON_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ServerError::Config("BACKEND_ANON_KEY must be set".into()))?;
        let timeout_secs: u64 =
            parse_var("BACKEND_TIMEOUT_SECS", &var("BACKEND_TIMEOUT_SECS", "30"))?;

        let session_ttl_secs: i64 =
            parse_var("SESSION_TTL_SECS", &var("SESSION_TTL_SECS", "604800"))?;
        if session_ttl_secs <= 0 {
            return Err(ServerError::Config(
                "SESSION_TTL_SECS must be positive".into(),
            ));
        }

        let default_language = Language::from_code(&var("DEFAULT_LANGUAGE", "en"))
            .ok_or_else(|| ServerError::Config("DEFAULT_LANGUAGE must be en or fr".into()))?;

        let max_workers: usize = parse_var("MAX_WORKERS", &var("MAX_WORKERS", "8"))?;

        Ok(Self {
            addr,
            database_path: var("DATABASE_PATH", "icumbi.sqlite3"),
            schema_path: var("SCHEMA_PATH", "sql/schema.sql"),
            backend: BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            session_ttl_secs,
            default_language,
            max_workers,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ServerError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ServerError::Config(format!("{key} is invalid: {e}")))
}
