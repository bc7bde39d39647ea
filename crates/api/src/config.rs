use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// webhook key, which must be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Path of the persisted settings record.
    pub settings_path: PathBuf,
    /// Trigger root of the notification webhook.
    pub webhook_base_url: String,
    /// Subscriber key appended to every trigger URL.
    pub webhook_key: String,
    /// Seconds of device silence before the silent alert fires. Must stay
    /// comfortably larger than the temperature report interval to avoid
    /// false positives.
    pub device_timeout_secs: u64,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `5000`                           |
    /// | `SETTINGS_PATH`        | `settings.json`                  |
    /// | `WEBHOOK_BASE_URL`     | `http://maker.ifttt.com/trigger` |
    /// | `WEBHOOK_KEY`          | (required)                       |
    /// | `DEVICE_TIMEOUT_SECS`  | `50`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let settings_path: PathBuf = std::env::var("SETTINGS_PATH")
            .unwrap_or_else(|_| "settings.json".into())
            .into();

        let webhook_base_url = std::env::var("WEBHOOK_BASE_URL")
            .unwrap_or_else(|_| "http://maker.ifttt.com/trigger".into());

        let webhook_key = std::env::var("WEBHOOK_KEY").expect("WEBHOOK_KEY must be set");

        let device_timeout_secs: u64 = std::env::var("DEVICE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("DEVICE_TIMEOUT_SECS must be a valid u64");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            settings_path,
            webhook_base_url,
            webhook_key,
            device_timeout_secs,
            cors_origins,
            request_timeout_secs,
        }
    }
}
