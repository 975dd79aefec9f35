use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::email::EmailConfig;

/// Server settings, read from `BOOKING_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    /// Directory holding `demo_bookings.csv`
    pub data_dir: PathBuf,
    /// Built frontend served for every non-API path
    pub frontend_dist: PathBuf,
    pub allowed_origin: String,
    /// Prefix of generated meeting links
    pub meeting_link_base: String,
    /// Confirmation mails are only sent when `BOOKING_SMTP_SERVER` is set
    pub smtp: Option<EmailConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            frontend_dist: PathBuf::from("../frontend/dist"),
            allowed_origin: "http://localhost:8080".to_string(),
            meeting_link_base: "https://meet.jit.si/demo".to_string(),
            smtp: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("BOOKING_ADDR") {
            config.addr = addr
                .parse()
                .with_context(|| format!("BOOKING_ADDR is not a socket address: {}", addr))?;
        }
        if let Some(dir) = lookup("BOOKING_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("BOOKING_FRONTEND_DIST") {
            config.frontend_dist = PathBuf::from(dir);
        }
        if let Some(origin) = lookup("BOOKING_ALLOWED_ORIGIN") {
            config.allowed_origin = origin;
        }
        if let Some(base) = lookup("BOOKING_MEETING_LINK_BASE") {
            config.meeting_link_base = base.trim_end_matches('/').to_string();
        }
        if let Some(smtp_server) = lookup("BOOKING_SMTP_SERVER") {
            let smtp_port = match lookup("BOOKING_SMTP_PORT") {
                Some(port) => port
                    .parse()
                    .with_context(|| format!("BOOKING_SMTP_PORT is not a port number: {}", port))?,
                None => 587,
            };
            let username = lookup("BOOKING_SMTP_USERNAME").unwrap_or_default();
            config.smtp = Some(EmailConfig {
                smtp_server,
                smtp_port,
                password: lookup("BOOKING_SMTP_PASSWORD").unwrap_or_default(),
                from_email: lookup("BOOKING_SMTP_FROM").unwrap_or_else(|| username.clone()),
                username,
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.smtp, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOOKING_ADDR", "0.0.0.0:8000"),
            ("BOOKING_DATA_DIR", "/var/lib/booking"),
            ("BOOKING_MEETING_LINK_BASE", "https://meet.example.com/demo/"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/booking"));
        assert_eq!(config.meeting_link_base, "https://meet.example.com/demo");
        assert_eq!(config.allowed_origin, "http://localhost:8080");
    }

    #[test]
    fn test_smtp_settings() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOOKING_SMTP_SERVER", "smtp.example.com"),
            ("BOOKING_SMTP_USERNAME", "bookings@example.com"),
            ("BOOKING_SMTP_PASSWORD", "secret"),
        ]))
        .unwrap();

        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.smtp_server, "smtp.example.com");
        assert_eq!(smtp.smtp_port, 587);
        assert_eq!(smtp.from_email, "bookings@example.com");
        assert_eq!(smtp.password, "secret");

        let result = Config::from_lookup(lookup_from(&[
            ("BOOKING_SMTP_SERVER", "smtp.example.com"),
            ("BOOKING_SMTP_PORT", "smtp"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_addr_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("BOOKING_ADDR", "localhost")]));
        assert!(result.is_err());
    }
}
