//! Process configuration, read from the environment (after `.env`).

use actix_web::cookie::SameSite;
use std::fmt;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_CLUSTER: &str = "cluster0.wixlrgj.mongodb.net";
const DEFAULT_DB_NAME: &str = "bloodHub";
const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Flags applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Production serves the client from another site, so the cookie must be
    /// `Secure; SameSite=None` to be sent cross-site.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self {
                secure: true,
                same_site: SameSite::None,
            },
            Environment::Development => Self {
                secure: false,
                same_site: SameSite::Strict,
            },
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has invalid value '{}'", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_uri: String,
    pub database_name: String,
    pub access_token_secret: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub environment: Environment,
    pub client_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let database_uri = match lookup("DATABASE_URL") {
            Some(uri) => uri,
            None => {
                let user = required("DB_USER")?;
                let password = required("DB_PASSWORD")?;
                let cluster = lookup("DB_CLUSTER").unwrap_or_else(|| DEFAULT_DB_CLUSTER.to_string());
                format!(
                    "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                    urlencoding::encode(&user),
                    urlencoding::encode(&password),
                    cluster
                )
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_uri,
            database_name: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            stripe_api_base: lookup("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            environment: Environment::parse(lookup("NODE_ENV").as_deref()),
            client_url: lookup("CLIENT_URL").unwrap_or_else(|| DEFAULT_CLIENT_URL.to_string()),
        })
    }

    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::for_environment(self.environment)
    }
}
