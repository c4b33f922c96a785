use std::env;
use std::time::Duration;

use crate::shared::constants::{DEFAULT_MAX_UPLOAD_SIZE, R2_DOMAIN, R2_REGION};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub log: LogConfig,
    pub r2: R2Config,
    pub swagger: SwaggerConfig,
}

/// How HTTP status codes are chosen for the file endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    /// Wire-compatible with existing clients: 302 for successful reads,
    /// 408 for failed uploads, 404 for failed listings and signatures
    #[default]
    Legacy,
    /// 200 for successful reads, 502/504 for upstream failures
    Standard,
}

impl StatusMode {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "standard" => Ok(Self::Standard),
            other => Err(format!(
                "API_STATUS_MODE must be 'legacy' or 'standard', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_size: usize,
    pub status_mode: StatusMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Unknown or empty values fall back to INFO
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARN" => Self::Warn,
            "ERROR" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub prefix: String,
}

/// Cloudflare R2 credentials and bucket
#[derive(Clone)]
pub struct R2Config {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    /// Upper bound for a single provider call
    pub request_timeout: Duration,
}

// Keep the secret out of logs
impl std::fmt::Debug for R2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R2Config")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    /// Env-format config file read next to the binary
    const LOCAL_CONFIG_FILE: &'static str = "local.env";

    pub fn from_env() -> Result<Self, String> {
        // Neither file is mandatory; variables already set take precedence
        for loaded in [
            dotenvy::dotenv(),
            dotenvy::from_filename(Self::LOCAL_CONFIG_FILE),
        ] {
            if let Err(e) = loaded {
                if !e.not_found() {
                    eprintln!("Warning: Error loading config file: {}", e);
                }
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            log: LogConfig::from_env(),
            r2: R2Config::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size = env::var("MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_SIZE must be a valid number".to_string())?;

        let status_mode = match env::var("API_STATUS_MODE") {
            Ok(value) => StatusMode::parse(&value)?,
            Err(_) => StatusMode::default(),
        };

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_upload_size,
            status_mode,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            level: LogLevel::parse(&env::var("LOG_LVL").unwrap_or_default()),
            prefix: env::var("LOG_PREFIX").unwrap_or_default(),
        }
    }
}

impl R2Config {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let request_timeout_secs = env::var("R2_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "R2_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            account_id: required("R2_ACCOUNT_ID")?,
            access_key_id: required("R2_ACCESS_KEY_ID")?,
            secret_access_key: required("R2_SECRET_ACCESS_KEY")?,
            bucket_name: required("R2_BUCKET_NAME")?,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Account-scoped S3 endpoint, e.g. `https://abc123.r2.cloudflarestorage.com`
    pub fn endpoint(&self) -> String {
        format!("https://{}.{}", self.account_id, R2_DOMAIN)
    }

    /// R2 is region-agnostic; signers still need a region token
    pub fn region(&self) -> &'static str {
        R2_REGION
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "R2 File Gateway".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Upload, list and share files stored in Cloudflare R2".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

fn required(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("{} environment variable is required", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("ERROR"), LogLevel::Error);
        assert_eq!(LogLevel::parse("INFO"), LogLevel::Info);
        // Anything unrecognised is INFO, including lowercase
        assert_eq!(LogLevel::parse("debug"), LogLevel::Info);
        assert_eq!(LogLevel::parse(""), LogLevel::Info);
    }

    #[test]
    fn test_status_mode_parse() {
        assert_eq!(StatusMode::parse("legacy"), Ok(StatusMode::Legacy));
        assert_eq!(StatusMode::parse(" Standard "), Ok(StatusMode::Standard));
        assert!(StatusMode::parse("strict").is_err());
    }

    #[test]
    fn test_r2_endpoint_and_region() {
        let config = R2Config {
            account_id: "abc123".to_string(),
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
            bucket_name: "uploads".to_string(),
            request_timeout: Duration::from_secs(30),
        };
        assert_eq!(config.endpoint(), "https://abc123.r2.cloudflarestorage.com");
        assert_eq!(config.region(), "auto");
        assert!(!format!("{:?}", config).contains("\"secret\""));
    }

    #[test]
    fn test_swagger_credentials() {
        let mut config = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(config.credentials(), None);
        config.password = Some("pw".to_string());
        assert_eq!(config.credentials(), Some("admin:pw".to_string()));
    }
}
