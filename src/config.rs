use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub uploads_dir: String,
    pub max_body_size: usize,
    pub reminder_interval_secs: Option<u64>,
    pub reminder_window_days: i64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("ASSOCIA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ASSOCIA_HOST: {e}"))?;

        let port: u16 = env_or("ASSOCIA_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ASSOCIA_PORT: {e}"))?;

        let base_url = env_or("ASSOCIA_BASE_URL", &format!("http://{host}:{port}"));

        let uploads_dir = env_or("ASSOCIA_UPLOADS_DIR", "uploads");

        let max_body_size: usize = env_or("ASSOCIA_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid ASSOCIA_MAX_BODY_SIZE: {e}"))?;

        // 0 disables the billing sweeper.
        let reminder_interval_secs = match env_or("ASSOCIA_REMINDER_INTERVAL_SECS", "0")
            .parse::<u64>()
            .map_err(|e| format!("Invalid ASSOCIA_REMINDER_INTERVAL_SECS: {e}"))?
        {
            0 => None,
            n => Some(n),
        };

        let reminder_window_days: i64 = env_or("ASSOCIA_REMINDER_WINDOW_DAYS", "5")
            .parse()
            .map_err(|e| format!("Invalid ASSOCIA_REMINDER_WINDOW_DAYS: {e}"))?;

        let log_level = env_or("ASSOCIA_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("ASSOCIA_SMTP_HOST").ok(),
            std::env::var("ASSOCIA_SMTP_PORT").ok(),
            std::env::var("ASSOCIA_SMTP_USER").ok(),
            std::env::var("ASSOCIA_SMTP_PASS").ok(),
            std::env::var("ASSOCIA_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid ASSOCIA_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            base_url,
            uploads_dir,
            max_body_size,
            reminder_interval_secs,
            reminder_window_days,
            log_level,
            smtp,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
