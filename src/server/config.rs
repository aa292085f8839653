use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use crate::server::error::config::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://gym.db?mode=rwc";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_MESSAGING_BASE_URL: &str = "https://wasenderapi.com";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_INVOICE_TEMPLATE_PATH: &str = "static/template_invoice.jpg";
const DEFAULT_INVOICE_LOGO_PATH: &str = "static/icons/instagram.png";
const DEFAULT_INVOICE_FONT_PATH: &str = "fonts/NotoSansGujarati-Regular.ttf";
const DEFAULT_REMINDER_THROTTLE_SECONDS: u64 = 5;

/// Credentials for the admin created at startup when it does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub messaging_base_url: String,
    pub messaging_api_key: String,
    pub static_dir: PathBuf,
    pub invoice_template_path: PathBuf,
    pub invoice_logo_path: PathBuf,
    pub invoice_font_path: PathBuf,
    pub reminder_throttle_seconds: u64,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let messaging_api_key = lookup("MESSAGING_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("MESSAGING_API_KEY".to_string()))?;

        let bind_address = parse_var("BIND_ADDRESS", &var("BIND_ADDRESS", DEFAULT_BIND_ADDRESS))?;

        let reminder_throttle_seconds = match lookup("REMINDER_THROTTLE_SECONDS") {
            Some(value) => parse_var("REMINDER_THROTTLE_SECONDS", &value)?,
            None => DEFAULT_REMINDER_THROTTLE_SECONDS,
        };

        let bootstrap_admin = match (
            lookup("BOOTSTRAP_ADMIN_USERNAME"),
            lookup("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidEnvValue {
                    var: "BOOTSTRAP_ADMIN_USERNAME".to_string(),
                    reason: "BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .to_string(),
                })
            }
        };

        Ok(Self {
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_address,
            messaging_base_url: var("MESSAGING_BASE_URL", DEFAULT_MESSAGING_BASE_URL),
            messaging_api_key,
            static_dir: var("STATIC_DIR", DEFAULT_STATIC_DIR).into(),
            invoice_template_path: var("INVOICE_TEMPLATE_PATH", DEFAULT_INVOICE_TEMPLATE_PATH)
                .into(),
            invoice_logo_path: var("INVOICE_LOGO_PATH", DEFAULT_INVOICE_LOGO_PATH).into(),
            invoice_font_path: var("INVOICE_FONT_PATH", DEFAULT_INVOICE_FONT_PATH).into(),
            reminder_throttle_seconds,
            bootstrap_admin,
        })
    }

    /// Directory rendered invoices are written to, served under `/static/generated`.
    pub fn generated_dir(&self) -> PathBuf {
        self.static_dir.join("generated")
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
