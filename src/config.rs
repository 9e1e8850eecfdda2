use axum::http::HeaderValue;
use sqlx::mysql::MySqlConnectOptions;

/// The service listens on a fixed port; only the store target and the
/// CORS origin are configurable.
pub const LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub mysql_host: String,
    pub mysql_port: u16,
    pub mysql_user: String,
    pub mysql_password: String,
    pub mysql_database: String,
    pub allowed_origin: AllowedOrigin,
    pub log_level: String,
}

/// CORS origin policy: wildcard or a single named origin.
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigin {
    Any,
    Exact(HeaderValue),
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let mysql_host = env_or("MYSQL_HOST", "localhost");

        let mysql_port: u16 = env_or("MYSQL_PORT", "3306")
            .parse()
            .map_err(|e| format!("Invalid MYSQL_PORT: {e}"))?;

        let mysql_user = env_required("MYSQL_USER")?;
        let mysql_password = env_or("MYSQL_PASSWORD", "");
        let mysql_database = env_required("MYSQL_DATABASE")?;

        let allowed_origin = match env_or("FORMSINK_ALLOWED_ORIGIN", "*").as_str() {
            "*" => AllowedOrigin::Any,
            origin => AllowedOrigin::Exact(
                origin
                    .parse()
                    .map_err(|e| format!("Invalid FORMSINK_ALLOWED_ORIGIN: {e}"))?,
            ),
        };

        let log_level = env_or("FORMSINK_LOG_LEVEL", "info");

        Ok(Config {
            mysql_host,
            mysql_port,
            mysql_user,
            mysql_password,
            mysql_database,
            allowed_origin,
            log_level,
        })
    }

    /// Connection target for the store, built from the MYSQL_* pieces.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.mysql_host)
            .port(self.mysql_port)
            .username(&self.mysql_user)
            .password(&self.mysql_password)
            .database(&self.mysql_database)
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
