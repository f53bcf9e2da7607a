use vowreel_core::upload::DEFAULT_MAX_UPLOAD_BYTES;
use vowreel_storage::S3Config;

use crate::auth::jwt::JwtConfig;

/// Default request body limit on upload routes (64 MiB).
///
/// Larger than the per-file limit so oversize images reach the uploader and
/// are rejected with a structured `FILE_TOO_LARGE` instead of a bare 413.
pub const DEFAULT_UPLOAD_BODY_LIMIT_BYTES: usize = 64 * 1024 * 1024;

/// Default number of films on the homepage.
pub const DEFAULT_HOMEPAGE_HIGHLIGHT_LIMIT: u32 = 6;

/// Which object store backs uploads.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// S3-compatible bucket.
    S3(S3Config),
    /// Process-local map; uploads vanish on restart.
    Memory,
}

impl StorageBackend {
    /// Short backend label for logs and the health endpoint.
    pub fn label(&self) -> &'static str {
        match self {
            Self::S3(_) => "s3",
            Self::Memory => "memory",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets and storage location have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer token verification settings.
    pub jwt: JwtConfig,
    /// Largest accepted image, in bytes.
    pub max_upload_bytes: u64,
    /// Transport-level body limit on upload routes.
    pub upload_body_limit_bytes: usize,
    /// Number of films returned by the homepage highlights endpoint.
    pub homepage_highlight_limit: u32,
    /// Frontend endpoint receiving revalidation signals. Unset drops them.
    pub revalidate_webhook_url: Option<String>,
    /// Shared secret sent with every revalidation signal.
    pub revalidate_secret: Option<String>,
    pub storage: StorageBackend,
    /// Public base URL prefixed to storage keys.
    pub public_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                   |
    /// |----------------------------|---------------------------|
    /// | `HOST`                     | `0.0.0.0`                 |
    /// | `PORT`                     | `3000`                    |
    /// | `CORS_ORIGINS`             | `http://localhost:3001`   |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                      |
    /// | `AUTH_JWT_SECRET`          | **required**              |
    /// | `MAX_UPLOAD_BYTES`         | `10485760`                |
    /// | `UPLOAD_BODY_LIMIT_BYTES`  | `67108864`                |
    /// | `HOMEPAGE_HIGHLIGHT_LIMIT` | `6`                       |
    /// | `REVALIDATE_WEBHOOK_URL`   | unset                     |
    /// | `REVALIDATE_SECRET`        | unset                     |
    /// | `STORAGE_BACKEND`          | `s3` (or `memory`)        |
    /// | `S3_BUCKET`                | **required** for `s3`     |
    /// | `S3_REGION`                | `auto`                    |
    /// | `S3_ENDPOINT`              | unset                     |
    /// | `S3_ACCESS_KEY_ID`         | unset                     |
    /// | `S3_SECRET_ACCESS_KEY`     | unset                     |
    /// | `S3_PUBLIC_BASE_URL`       | **required** (`http://localhost:3000/uploads` for `memory`) |
    ///
    /// # Panics
    ///
    /// Panics on a missing required variable or an unparsable value;
    /// misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(&var("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3001".into()));

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig {
            secret: var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET must be set in the environment"),
        };

        let max_upload_bytes: u64 = var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid u64"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let upload_body_limit_bytes: usize = var("UPLOAD_BODY_LIMIT_BYTES")
            .map(|v| v.parse().expect("UPLOAD_BODY_LIMIT_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_UPLOAD_BODY_LIMIT_BYTES);

        let homepage_highlight_limit: u32 = var("HOMEPAGE_HIGHLIGHT_LIMIT")
            .map(|v| v.parse().expect("HOMEPAGE_HIGHLIGHT_LIMIT must be a valid u32"))
            .unwrap_or(DEFAULT_HOMEPAGE_HIGHLIGHT_LIMIT);
        assert!(homepage_highlight_limit > 0, "HOMEPAGE_HIGHLIGHT_LIMIT must be at least 1");

        let storage = match var("STORAGE_BACKEND").as_deref().unwrap_or("s3") {
            "s3" => StorageBackend::S3(S3Config {
                bucket: var("S3_BUCKET").expect("S3_BUCKET must be set when STORAGE_BACKEND=s3"),
                region: var("S3_REGION").unwrap_or_else(|| "auto".into()),
                endpoint: var("S3_ENDPOINT"),
                access_key_id: var("S3_ACCESS_KEY_ID"),
                secret_access_key: var("S3_SECRET_ACCESS_KEY"),
            }),
            "memory" => StorageBackend::Memory,
            other => panic!("STORAGE_BACKEND must be 's3' or 'memory', got '{other}'"),
        };

        let public_base_url = match (&storage, var("S3_PUBLIC_BASE_URL")) {
            (_, Some(url)) => url,
            (StorageBackend::Memory, None) => format!("http://localhost:{port}/uploads"),
            (StorageBackend::S3(_), None) => panic!("S3_PUBLIC_BASE_URL must be set"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            max_upload_bytes,
            upload_body_limit_bytes,
            homepage_highlight_limit,
            revalidate_webhook_url: var("REVALIDATE_WEBHOOK_URL"),
            revalidate_secret: var("REVALIDATE_SECRET"),
            storage,
            public_base_url,
        }
    }
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_with_memory_storage() {
        let config = load(&[("AUTH_JWT_SECRET", "s"), ("STORAGE_BACKEND", "memory")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3001"]);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.upload_body_limit_bytes, 64 * 1024 * 1024);
        assert_eq!(config.homepage_highlight_limit, 6);
        assert!(config.revalidate_webhook_url.is_none());
        assert!(matches!(config.storage, StorageBackend::Memory));
        assert_eq!(config.public_base_url, "http://localhost:3000/uploads");
    }

    #[test]
    fn s3_settings_are_read() {
        let config = load(&[
            ("AUTH_JWT_SECRET", "s"),
            ("S3_BUCKET", "vowreel-media"),
            ("S3_ENDPOINT", "https://acct.r2.cloudflarestorage.com"),
            ("S3_PUBLIC_BASE_URL", "https://media.vowreel.test"),
            ("CORS_ORIGINS", "https://vowreel.test, ,http://localhost:3001"),
        ]);
        match config.storage {
            StorageBackend::S3(s3) => {
                assert_eq!(s3.bucket, "vowreel-media");
                assert_eq!(s3.region, "auto");
                assert!(s3.access_key_id.is_none());
            }
            StorageBackend::Memory => panic!("expected s3 storage"),
        }
        assert_eq!(config.public_base_url, "https://media.vowreel.test");
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    #[should_panic(expected = "AUTH_JWT_SECRET")]
    fn missing_secret_fails_fast() {
        load(&[("STORAGE_BACKEND", "memory")]);
    }

    #[test]
    #[should_panic(expected = "HOMEPAGE_HIGHLIGHT_LIMIT")]
    fn negative_highlight_limit_fails_fast() {
        load(&[("AUTH_JWT_SECRET", "s"), ("STORAGE_BACKEND", "memory"), ("HOMEPAGE_HIGHLIGHT_LIMIT", "-3")]);
    }

    #[test]
    #[should_panic(expected = "HOMEPAGE_HIGHLIGHT_LIMIT")]
    fn zero_highlight_limit_fails_fast() {
        load(&[("AUTH_JWT_SECRET", "s"), ("STORAGE_BACKEND", "memory"), ("HOMEPAGE_HIGHLIGHT_LIMIT", "0")]);
    }

    #[test]
    #[should_panic(expected = "STORAGE_BACKEND")]
    fn unknown_backend_fails_fast() {
        load(&[("AUTH_JWT_SECRET", "s"), ("STORAGE_BACKEND", "ftp")]);
    }
}
