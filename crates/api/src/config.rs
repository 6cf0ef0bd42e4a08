/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Upstream job/user/campus-drive services.
    pub directory: DirectoryConfig,
    /// Rows classified concurrently per import (default: `1`, sequential).
    pub import_concurrency: usize,
}

/// Connection settings for the directory services.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    /// Per-lookup timeout in seconds.
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `HOST`                   | `0.0.0.0`                        |
    /// | `PORT`                   | `3000`                           |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                             |
    /// | `DIRECTORY_API_URL`      | `http://localhost:8080/api/v1`   |
    /// | `DIRECTORY_TIMEOUT_SECS` | `10`                             |
    /// | `IMPORT_CONCURRENCY`     | `1`                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let directory = DirectoryConfig {
            base_url: std::env::var("DIRECTORY_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1".into()),
            timeout_secs: std::env::var("DIRECTORY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("DIRECTORY_TIMEOUT_SECS must be a valid u64"),
        };

        let import_concurrency: usize = std::env::var("IMPORT_CONCURRENCY")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("IMPORT_CONCURRENCY must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            directory,
            import_concurrency: import_concurrency.max(1),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
