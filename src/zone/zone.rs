use super::{Host, constants};
use crate::address::expand_ipv6;
use crate::error::{Result, ZoneGenError};
use std::net::Ipv4Addr;

/// A collection of hosts which can be written out to a zone file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Absolute zone name (e.g. "thedreaming.org.")
    pub zone_name: String,
    /// Contact mailbox with the "@" replaced by "." (e.g. "root.thedreaming.org.")
    pub contact_address: String,
    /// Authoritative name servers. The first one is the SOA primary.
    pub name_servers: Vec<String>,
    pub hosts: Vec<Host>,
    /// How long records from this zone may be cached
    pub ttl: String,
    /// How often secondaries poll the primary for changes
    pub refresh: String,
    /// Delay between retries when a secondary cannot reach the primary
    pub retry: String,
    /// How long a secondary keeps serving the zone without reaching the primary
    pub expire: String,
    /// How long negative answers are cached
    pub negative_cache_ttl: String,
}

impl Zone {
    /// Create a zone with no hosts and the default timers
    pub fn new(
        zone_name: impl Into<String>,
        contact_address: impl Into<String>,
        name_servers: Vec<String>,
    ) -> Self {
        Self {
            zone_name: zone_name.into(),
            contact_address: contact_address.into(),
            name_servers,
            hosts: Vec::new(),
            ttl: constants::DEFAULT_TTL.to_string(),
            refresh: constants::DEFAULT_REFRESH.to_string(),
            retry: constants::DEFAULT_RETRY.to_string(),
            expire: constants::DEFAULT_EXPIRE.to_string(),
            negative_cache_ttl: constants::DEFAULT_NEGATIVE_CACHE_TTL.to_string(),
        }
    }

    pub fn with_host(mut self, host: Host) -> Self {
        self.add_host(host);
        self
    }

    pub fn add_host(&mut self, host: Host) {
        self.hosts.push(host);
    }

    /// The SOA primary (MNAME), if any name server is configured
    pub fn primary_name_server(&self) -> Option<&str> {
        self.name_servers.first().map(String::as_str)
    }

    /// Check everything a zone file needs before any of it is written.
    ///
    /// Name servers must be present and every address must be well formed, so a
    /// writer never leaves a half-written file behind because of bad input.
    pub fn validate(&self) -> Result<()> {
        if self.zone_name.trim().is_empty() {
            return Err(ZoneGenError::Configuration(
                "Zone name must not be empty".to_string(),
            ));
        }

        if self.name_servers.is_empty() {
            return Err(ZoneGenError::Configuration(format!(
                "Zone {} must have at least one name server",
                self.zone_name
            )));
        }

        if let Some(blank) = self.name_servers.iter().position(|ns| ns.trim().is_empty()) {
            return Err(ZoneGenError::Configuration(format!(
                "Zone {} has an empty name server at position {}",
                self.zone_name, blank
            )));
        }

        for timer in [
            &self.ttl,
            &self.refresh,
            &self.retry,
            &self.expire,
            &self.negative_cache_ttl,
        ] {
            if timer.trim().is_empty() || timer.contains(char::is_whitespace) {
                return Err(ZoneGenError::Configuration(format!(
                    "Invalid timer value {:?} in zone {}",
                    timer, self.zone_name
                )));
            }
        }

        for host in &self.hosts {
            if host.name.trim().is_empty() {
                return Err(ZoneGenError::Configuration(format!(
                    "Host with empty name in zone {}",
                    self.zone_name
                )));
            }

            for address in &host.addresses {
                address.parse::<Ipv4Addr>().map_err(|_| {
                    ZoneGenError::InvalidAddressFormat(format!(
                        "Invalid IPv4 address {} for host {}",
                        address, host.name
                    ))
                })?;
            }

            for address in &host.ipv6_addresses {
                expand_ipv6(address)?;
            }
        }

        Ok(())
    }
}
