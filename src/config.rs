use crate::error::{Result, ZoneGenError};
use crate::zone::{Host, Zone, constants};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maximum zone description size (1MB)
pub const MAX_DOCUMENT_SIZE: usize = 1024 * 1024;

fn default_ttl() -> String {
    constants::DEFAULT_TTL.to_string()
}

fn default_refresh() -> String {
    constants::DEFAULT_REFRESH.to_string()
}

fn default_retry() -> String {
    constants::DEFAULT_RETRY.to_string()
}

fn default_expire() -> String {
    constants::DEFAULT_EXPIRE.to_string()
}

fn default_negative_cache_ttl() -> String {
    constants::DEFAULT_NEGATIVE_CACHE_TTL.to_string()
}

/// A zone described in TOML:
///
/// ```toml
/// zone_name = "thedreaming.org."
/// contact_address = "root@thedreaming.org"
/// name_servers = ["thedreaming.org."]
///
/// [[hosts]]
/// name = "lucid"
/// addresses = ["192.168.0.10"]
/// ipv6_addresses = ["fe80::0224:01ff:fe0f:7770"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneDocument {
    pub zone_name: String,
    pub contact_address: String,
    pub name_servers: Vec<String>,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default = "default_ttl")]
    pub ttl: String,
    #[serde(default = "default_refresh")]
    pub refresh: String,
    #[serde(default = "default_retry")]
    pub retry: String,
    #[serde(default = "default_expire")]
    pub expire: String,
    #[serde(default = "default_negative_cache_ttl")]
    pub negative_cache_ttl: String,
}

impl ZoneDocument {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build and validate the zone this document describes
    pub fn into_zone(self) -> Result<Zone> {
        let zone = Zone {
            zone_name: self.zone_name,
            contact_address: soa_mailbox(&self.contact_address),
            name_servers: self.name_servers,
            hosts: self.hosts,
            ttl: self.ttl,
            refresh: self.refresh,
            retry: self.retry,
            expire: self.expire,
            negative_cache_ttl: self.negative_cache_ttl,
        };
        zone.validate()?;
        Ok(zone)
    }
}

/// Turn an email contact ("root@thedreaming.org") into SOA mailbox form
/// ("root.thedreaming.org."). Contacts without an "@" are kept as they are.
pub fn soa_mailbox(contact: &str) -> String {
    let contact = contact.trim();
    match contact.split_once('@') {
        Some((local, domain)) => {
            let mailbox = format!("{}.{}", local.replace('.', "\\."), domain);
            if mailbox.ends_with('.') {
                mailbox
            } else {
                format!("{}.", mailbox)
            }
        }
        None => contact.to_string(),
    }
}

/// Load and validate a zone description from a TOML file
pub fn load_zone<P: AsRef<Path>>(path: P) -> Result<Zone> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    if contents.len() > MAX_DOCUMENT_SIZE {
        return Err(ZoneGenError::Configuration(format!(
            "Zone description {} exceeds maximum size",
            path.display()
        )));
    }

    let zone = ZoneDocument::from_toml_str(&contents)
        .map_err(|e| ZoneGenError::ConfigParse(format!("{}: {}", path.display(), e)))?
        .into_zone()?;

    debug!(
        "Loaded zone {} with {} hosts from {}",
        zone.zone_name,
        zone.hosts.len(),
        path.display()
    );
    Ok(zone)
}

/// Settings for a generator run that do not belong to the zone itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Serial number to write. `None` derives one from today's date.
    pub serial: Option<String>,

    /// File to write to. `None` writes to stdout.
    pub output: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Create a GeneratorConfig from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a GeneratorConfig from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(serial) = lookup("ZONEGEN_SERIAL") {
            let serial = serial.trim();
            if !serial.is_empty() {
                config.serial = Some(serial.to_string());
            }
        }

        if let Some(output) = lookup("ZONEGEN_OUTPUT") {
            if !output.is_empty() && output != "-" {
                config.output = Some(PathBuf::from(output));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(serial) = &self.serial {
            // SOA serials are unsigned 32-bit numbers
            if !serial.chars().all(|c| c.is_ascii_digit()) || serial.parse::<u32>().is_err() {
                return Err(ZoneGenError::Configuration(format!(
                    "Invalid serial number: {}",
                    serial
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DEMO: &str = r#"
zone_name = "thedreaming.org."
contact_address = "root.thedreaming.org."
name_servers = ["thedreaming.org."]

[[hosts]]
name = "thedreaming.org."
addresses = ["192.168.0.1", "209.217.122.208"]
aliases = ["www", "ftp"]

[[hosts.mail_exchangers]]
mail_host = "thedreaming.org."

[[hosts]]
name = "lucid"
addresses = ["192.168.0.10"]
ipv6_addresses = ["fe80::0224:01ff:fe0f:7770"]
"#;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_document_defaults() {
        let zone = ZoneDocument::from_toml_str(DEMO).unwrap().into_zone().unwrap();

        assert_eq!(zone.ttl, "1D");
        assert_eq!(zone.negative_cache_ttl, "1M");
        assert_eq!(zone.hosts.len(), 2);
        assert_eq!(zone.hosts[0].mail_exchangers[0].priority(), 1);
        assert!(zone.hosts[0].ipv6_addresses.is_empty());
        assert!(zone.hosts[1].aliases.is_empty());
    }

    #[test]
    fn test_document_rejects_unknown_fields() {
        let result = ZoneDocument::from_toml_str("zone_name = \"a.\"\nbogus = 1\n");
        assert!(matches!(result, Err(ZoneGenError::ConfigParse(_))));
    }

    #[test]
    fn test_document_requires_name_servers() {
        let doc = r#"
zone_name = "thedreaming.org."
contact_address = "root.thedreaming.org."
name_servers = []
"#;
        let result = ZoneDocument::from_toml_str(doc).unwrap().into_zone();
        assert!(matches!(result, Err(ZoneGenError::Configuration(_))));
    }

    #[test]
    fn test_soa_mailbox() {
        assert_eq!(soa_mailbox("root@thedreaming.org"), "root.thedreaming.org.");
        assert_eq!(soa_mailbox("root@thedreaming.org."), "root.thedreaming.org.");
        assert_eq!(
            soa_mailbox("john.doe@example.org"),
            "john\\.doe.example.org."
        );
        assert_eq!(soa_mailbox("root.thedreaming.org"), "root.thedreaming.org");
    }

    #[test]
    fn test_default_generator_config_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generator_config_from_lookup() {
        let config = GeneratorConfig::from_lookup(lookup_from(&[
            ("ZONEGEN_SERIAL", "2011010701"),
            ("ZONEGEN_OUTPUT", "/tmp/thedreaming.org.zone"),
        ]))
        .unwrap();

        assert_eq!(config.serial.as_deref(), Some("2011010701"));
        assert_eq!(
            config.output,
            Some(PathBuf::from("/tmp/thedreaming.org.zone"))
        );

        let config = GeneratorConfig::from_lookup(lookup_from(&[("ZONEGEN_OUTPUT", "-")])).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_serial() {
        assert!(GeneratorConfig::from_lookup(lookup_from(&[("ZONEGEN_SERIAL", "2011-01-07")])).is_err());
        assert!(GeneratorConfig::from_lookup(lookup_from(&[("ZONEGEN_SERIAL", "99999999999")])).is_err());
    }
}
