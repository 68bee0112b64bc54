use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Process-wide configuration, loaded once at startup and passed explicitly
/// through `AppState`. Never read from the environment after this point.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub security: SecurityConfig,
    pub sms: SmsConfig,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    /// Digits in a generated one-time code.
    pub otp_length: usize,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_url: String,
    /// Pre-encoded `Authorization` header used for the client-credentials
    /// exchange, e.g. `Basic <base64>`.
    pub authorization_header: String,
    /// Sender short code, without the country prefix.
    pub sender: String,
    /// Country calling code without the `+`, prepended to contacts.
    pub country_prefix: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_or("PORT", 3000)?,
            database_url: required("DATABASE_URL")?,
            security: SecurityConfig {
                access_token_secret: required("ACCESS_TOKEN_SECRET")?,
                refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
                otp_length: parse_or("OTP_LENGTH", 4)?,
            },
            sms: SmsConfig {
                api_url: env::var("SMS_API_URL")
                    .unwrap_or_else(|_| "https://api.orange.com".to_string()),
                authorization_header: required("SMS_API_AUTHORIZATION_HEADER")?,
                sender: env::var("SMS_SENDER").unwrap_or_else(|_| "0000".to_string()),
                country_prefix: env::var("SMS_COUNTRY_PREFIX")
                    .unwrap_or_else(|_| "225".to_string()),
                timeout_secs: parse_or("SMS_TIMEOUT_SECS", 10)?,
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(v) => v
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(name, v)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        database_url: "postgres://localhost/fanxp_test".to_string(),
        security: SecurityConfig {
            access_token_secret: "access-secret-for-tests".to_string(),
            refresh_token_secret: "refresh-secret-for-tests".to_string(),
            otp_length: 4,
        },
        sms: SmsConfig {
            api_url: "https://api.orange.invalid".to_string(),
            authorization_header: "Basic dGVzdDp0ZXN0".to_string(),
            sender: "0000".to_string(),
            country_prefix: "225".to_string(),
            timeout_secs: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race each other.
    #[test]
    fn from_env_requires_secrets_and_applies_defaults() {
        env::remove_var("DATABASE_URL");
        env::set_var("ACCESS_TOKEN_SECRET", "a");
        env::set_var("REFRESH_TOKEN_SECRET", "r");
        env::set_var("SMS_API_AUTHORIZATION_HEADER", "Basic x");
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));

        env::set_var("DATABASE_URL", "postgres://localhost/fanxp");
        env::remove_var("PORT");
        env::remove_var("OTP_LENGTH");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.security.otp_length, 4);
        assert_eq!(config.sms.country_prefix, "225");

        env::set_var("OTP_LENGTH", "six");
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("OTP_LENGTH", _)));
        env::remove_var("OTP_LENGTH");
    }
}
