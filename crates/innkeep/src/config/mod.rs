use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub mail: MailConfig,
    pub rate_limit: RateLimitConfig,
    pub admin_token: Option<String>,
    pub firestore: Option<FirestoreConfig>,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mail = MailConfig {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidSmtpPort)?,
            username: env::var("SMTP_USER").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            from_address: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "no-reply@innkeep.example".to_string()),
            admin_address: env::var("CONTACT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "frontdesk@innkeep.example".to_string()),
            front_desk_phone: env::var("FRONT_DESK_PHONE")
                .unwrap_or_else(|_| "+1 (555) 010-4477".to_string()),
        };

        // Production keeps the tight contact quota; other stages get a high
        // default so local testing is not throttled. Zero disables the limit.
        let default_limit = match environment {
            AppEnvironment::Production => 5,
            _ => 100,
        };
        let max_requests = match env::var("CONTACT_RATE_LIMIT") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidRateLimit)?,
            Err(_) => default_limit,
        };
        let window_secs = match env::var("CONTACT_RATE_WINDOW_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidRateLimit)?,
            Err(_) => 900,
        };
        let rate_limit = RateLimitConfig {
            max_requests,
            window: Duration::from_secs(window_secs),
        };

        let admin_token = env::var("ADMIN_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let firestore = env::var("FIRESTORE_PROJECT_ID")
            .ok()
            .map(|project_id| FirestoreConfig { project_id });

        let cloudinary = match (
            env::var("CLOUDINARY_CLOUD_NAME").ok(),
            env::var("CLOUDINARY_API_KEY").ok(),
            env::var("CLOUDINARY_API_SECRET").ok(),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            (None, None, None) => None,
            _ => return Err(ConfigError::IncompleteCloudinary),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail,
            rate_limit,
            admin_token,
            firestore,
            cloudinary,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Outbound mail transport credentials and fixed contact-form addresses.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
    /// Operator mailbox receiving the admin notice for each submission.
    pub admin_address: String,
    /// Phone number quoted in the guest acknowledgment.
    pub front_desk_phone: String,
}

/// Per-source-address quota for the public contact endpoint.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per window; zero disables enforcement.
    pub max_requests: u32,
    pub window: Duration,
}

/// Project identity for the document mirror.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
}

/// Credentials for the object storage media adapter.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidSmtpPort,
    InvalidRateLimit,
    IncompleteCloudinary,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid u16"),
            ConfigError::InvalidRateLimit => write!(
                f,
                "CONTACT_RATE_LIMIT and CONTACT_RATE_WINDOW_SECS must be non-negative integers"
            ),
            ConfigError::IncompleteCloudinary => write!(
                f,
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY, and CLOUDINARY_API_SECRET must be set together"
            ),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "SMTP_HOST",
            "SMTP_PORT",
            "SMTP_USER",
            "SMTP_PASSWORD",
            "SMTP_FROM",
            "CONTACT_ADMIN_EMAIL",
            "FRONT_DESK_PHONE",
            "CONTACT_RATE_LIMIT",
            "CONTACT_RATE_WINDOW_SECS",
            "ADMIN_API_TOKEN",
            "FIRESTORE_PROJECT_ID",
            "CLOUDINARY_CLOUD_NAME",
            "CLOUDINARY_API_KEY",
            "CLOUDINARY_API_SECRET",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.mail.smtp_port, 587);
        assert!(config.mail.username.is_none());
        assert!(config.admin_token.is_none());
        assert!(config.firestore.is_none());
        assert!(config.cloudinary.is_none());
    }

    #[test]
    fn contact_quota_is_relaxed_outside_production() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.rate_limit.max_requests, 100);

        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(900));

        env::set_var("CONTACT_RATE_LIMIT", "0");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.rate_limit.max_requests, 0);
        reset_env();
    }

    #[test]
    fn partial_cloudinary_credentials_are_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CLOUDINARY_CLOUD_NAME", "innkeep");
        env::set_var("CLOUDINARY_API_KEY", "key-only");
        let error = AppConfig::load().expect_err("missing secret must fail");
        assert!(matches!(error, ConfigError::IncompleteCloudinary));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
