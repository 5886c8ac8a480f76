use dotenv::dotenv;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::mapping::FieldMapping;
use crate::models::registration::RegistrationField;

pub const DEFAULT_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSentrbNhwl6kuOoWmnyuozUYNMT0Ii88Sdrw0sdBGmdPKSIig/formResponse";
pub const DEFAULT_ORIGIN: &str = "https://docs.google.com";
pub const DEFAULT_REFERER: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSentrbNhwl6kuOoWmnyuozUYNMT0Ii88Sdrw0sdBGmdPKSIig/viewform";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/137.0.0.0 Safari/537.36";

const ENTRY_KEYS: [(&str, RegistrationField); 4] = [
    ("FORM_ENTRY_FIRST_NAME", RegistrationField::FirstName),
    ("FORM_ENTRY_LAST_NAME", RegistrationField::LastName),
    ("FORM_ENTRY_EMAIL", RegistrationField::Email),
    ("FORM_ENTRY_PHONE_NUMBER", RegistrationField::PhoneNumber),
];

/// Where and how the relay forwards submissions
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub form_url: String,
    pub origin: String,
    pub referer: String,
    pub user_agent: String,
    pub mapping: FieldMapping,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            form_url: DEFAULT_FORM_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mapping: FieldMapping::relay_default(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to the defaults
    /// for keys that are absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let form_url = lookup("FORM_URL").unwrap_or(defaults.form_url);
        if !form_url.starts_with("http://") && !form_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "FORM_URL".to_string(),
                reason: format!("'{}' is not an http(s) URL", form_url),
            });
        }

        let mut mapping = defaults.mapping;
        for (key, field) in ENTRY_KEYS {
            if let Some(identifier) = lookup(key) {
                let identifier = identifier.trim().to_string();
                if identifier.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason: "entry identifier is empty".to_string(),
                    });
                }
                info!("Using {} for field {}", identifier, field);
                mapping = mapping.with(field, identifier);
            }
        }

        Ok(Self {
            form_url,
            origin: lookup("FORM_ORIGIN").unwrap_or(defaults.origin),
            referer: lookup("FORM_REFERER").unwrap_or(defaults.referer),
            user_agent: lookup("FORM_USER_AGENT").unwrap_or(defaults.user_agent),
            mapping,
        })
    }
}

/// Listener and static asset settings for the server binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let host: IpAddr = host.parse().map_err(|e| ConfigError::InvalidValue {
            key: "HOST".to_string(),
            reason: format!("{}", e),
        })?;

        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                reason: format!("{}", e),
            })?,
            None => 3000,
        };

        let static_dir = lookup("STATIC_DIR").map(PathBuf::from);
        if let Some(dir) = &static_dir {
            if !dir.is_dir() {
                warn!("STATIC_DIR {} is not a directory", dir.display());
            }
        }

        Ok(Self {
            addr: SocketAddr::new(host, port),
            static_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_relay_defaults() {
        let config = RelayConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.form_url, DEFAULT_FORM_URL);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.mapping, FieldMapping::relay_default());
    }

    #[test]
    fn test_relay_entry_override() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("FORM_URL", "http://localhost:9000/formResponse"),
            ("FORM_ENTRY_EMAIL", " entry.42 "),
        ]))
        .unwrap();

        assert_eq!(config.form_url, "http://localhost:9000/formResponse");
        assert_eq!(
            config.mapping.identifier(RegistrationField::Email),
            Some("entry.42")
        );
        assert_eq!(config.mapping.len(), 4);
    }

    #[test]
    fn test_relay_rejects_bad_values() {
        assert!(RelayConfig::from_lookup(lookup_from(&[("FORM_URL", "docs.google.com")])).is_err());
        assert!(RelayConfig::from_lookup(lookup_from(&[("FORM_ENTRY_LAST_NAME", "  ")])).is_err());
    }

    #[test]
    fn test_server_config() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert!(config.static_dir.is_none());

        let config =
            ServerConfig::from_lookup(lookup_from(&[("HOST", "127.0.0.1"), ("PORT", "8080")]))
                .unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");

        assert!(ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
    }
}
