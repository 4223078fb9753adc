use super::{Zone, constants};
use crate::address::ipv6_nibbles;
use crate::error::{Result, ZoneGenError};
use chrono::{Local, NaiveDate};
use std::io::Write;
use tracing::{debug, trace, warn};

/// Absolute domain names end in "."
pub fn is_absolute_domain_name(name: &str) -> bool {
    name.ends_with('.')
}

/// Lay out one record line: owner, record type, then the value.
///
/// Owner and type are left-justified to fixed widths, matching hand-written
/// BIND zone files. Fields longer than their column are never truncated.
pub fn format_record(owner: &str, rtype: &str, value: &str) -> String {
    format!(
        "{:<left$} {:<mid$} {}",
        owner,
        rtype,
        value,
        left = constants::LEFT_COLUMN_WIDTH,
        mid = constants::MID_COLUMN_WIDTH,
    )
}

/// Date-based serial number in `YYYYMMDD` form
pub fn serial_for_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Use the caller's serial, or derive one from today's date
fn resolve_serial(serial: Option<&str>) -> String {
    match serial {
        Some(serial) if !serial.is_empty() => serial.to_string(),
        _ => serial_for_date(Local::now().date_naive()),
    }
}

fn write_record<W: Write + ?Sized>(out: &mut W, owner: &str, rtype: &str, value: &str) -> Result<()> {
    writeln!(out, "{}", format_record(owner, rtype, value))?;
    Ok(())
}

/// Reverse the dot-separated labels of an address suffix ("0.11" -> "11.0")
fn reverse_labels(suffix: &str) -> String {
    suffix.split('.').rev().collect::<Vec<_>>().join(".")
}

/// Writes BIND zone files (forward, IPv4 reverse, IPv6 reverse) for a [`Zone`].
///
/// The zone is only borrowed, so one zone can be written out several times.
/// Every write validates the zone before the first line goes to the sink. I/O errors
/// from the sink are returned as they are and leave whatever was already written.
pub struct ZoneFileWriter<'a> {
    zone: &'a Zone,
}

impl<'a> ZoneFileWriter<'a> {
    pub fn new(zone: &'a Zone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> &Zone {
        self.zone
    }

    /// Write the `$TTL` line, the SOA record and the NS records.
    ///
    /// Without a serial number (or with an empty one) today's date is used.
    pub fn write_prolog<W: Write + ?Sized>(&self, out: &mut W, serial: Option<&str>) -> Result<()> {
        self.zone.validate()?;
        self.write_prolog_unchecked(out, serial)
    }

    /// Write the SOA record for the zone with the given serial number
    pub fn write_soa_record<W: Write + ?Sized>(&self, out: &mut W, serial: &str) -> Result<()> {
        let primary = self.zone.primary_name_server().ok_or_else(|| {
            ZoneGenError::Configuration(format!(
                "Zone {} must have at least one name server",
                self.zone.zone_name
            ))
        })?;

        writeln!(
            out,
            "{} {} (",
            format_record("@", "IN SOA", primary),
            self.zone.contact_address
        )?;

        let timers = [
            (serial, "Serial"),
            (self.zone.refresh.as_str(), "Refresh slaves"),
            (self.zone.retry.as_str(), "Retry"),
            (self.zone.expire.as_str(), "Expire"),
            (self.zone.negative_cache_ttl.as_str(), "Negative cache TTL"),
        ];
        for (value, comment) in timers {
            writeln!(
                out,
                "{:left$}    {:<timer$} ; {}",
                "",
                value,
                comment,
                left = constants::LEFT_COLUMN_WIDTH,
                timer = constants::SOA_TIMER_WIDTH,
            )?;
        }

        writeln!(out, "{:left$} )", "", left = constants::LEFT_COLUMN_WIDTH)?;
        Ok(())
    }

    /// Write one NS record per name server
    pub fn write_ns_records<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        for ns in &self.zone.name_servers {
            write_record(out, "@", "IN NS", ns)?;
        }
        Ok(())
    }

    /// Write the forward zone file.
    ///
    /// For each host, in order: A, AAAA, MX (in the order given, not sorted by
    /// priority), then one CNAME per alias pointing at the host name. Names are
    /// written verbatim. Returns the number of host records written.
    pub fn write_forward_zone<W: Write + ?Sized>(
        &self,
        out: &mut W,
        serial: Option<&str>,
    ) -> Result<usize> {
        self.zone.validate()?;
        self.write_prolog_unchecked(out, serial)?;

        let mut written = 0;
        for host in &self.zone.hosts {
            if host.record_count() == 0 {
                warn!("Host {} in zone {} has no records", host.name, self.zone.zone_name);
                continue;
            }

            for address in &host.addresses {
                write_record(out, &host.name, "IN A", address)?;
            }
            for address in &host.ipv6_addresses {
                write_record(out, &host.name, "IN AAAA", address)?;
            }
            for mx in &host.mail_exchangers {
                let value = format!("{} {}", mx.priority(), mx.mail_host());
                write_record(out, &host.name, "IN MX", &value)?;
            }
            for alias in &host.aliases {
                write_record(out, alias, "IN CNAME", &host.name)?;
            }
            written += host.record_count();
        }

        debug!(
            "Wrote forward zone {} with {} records for {} hosts",
            self.zone.zone_name,
            written,
            self.zone.hosts.len()
        );
        Ok(written)
    }

    /// Write the reverse-mapping zone file for an IPv4 prefix.
    ///
    /// `prefix` is matched as plain text, e.g. "192.168.0." for
    /// `0.168.192.in-addr.arpa`. A missing trailing "." is added. Addresses
    /// outside the prefix are skipped. Returns the number of PTR records written.
    pub fn write_reverse_zone_v4<W: Write + ?Sized>(
        &self,
        out: &mut W,
        prefix: &str,
        serial: Option<&str>,
    ) -> Result<usize> {
        let prefix = normalize_prefix(prefix, |label| {
            !label.is_empty() && label.len() <= 3 && label.chars().all(|c| c.is_ascii_digit())
        })?;
        self.zone.validate()?;

        let mut entries = Vec::new();
        for host in &self.zone.hosts {
            for address in &host.addresses {
                self.collect_ptr(&mut entries, &prefix, address, &host.name);
            }
        }

        self.write_ptr_zone(out, &prefix, &entries, serial)
    }

    /// Write the reverse-mapping zone file for an IPv6 nibble prefix.
    ///
    /// `prefix` is written in nibbles, e.g. "2.0.0.1." for `1.0.0.2.ip6.arpa`.
    /// Each IPv6 address is expanded to 32 dot-separated nibbles before matching.
    /// Returns the number of PTR records written.
    pub fn write_reverse_zone_v6<W: Write + ?Sized>(
        &self,
        out: &mut W,
        prefix: &str,
        serial: Option<&str>,
    ) -> Result<usize> {
        let prefix = normalize_prefix(&prefix.to_ascii_lowercase(), |label| {
            label.len() == 1 && label.chars().all(|c| c.is_ascii_hexdigit())
        })?;
        self.zone.validate()?;

        let mut entries = Vec::new();
        for host in &self.zone.hosts {
            for address in &host.ipv6_addresses {
                let nibbles = ipv6_nibbles(address)?;
                self.collect_ptr(&mut entries, &prefix, &nibbles, &host.name);
            }
        }

        self.write_ptr_zone(out, &prefix, &entries, serial)
    }

    fn write_prolog_unchecked<W: Write + ?Sized>(
        &self,
        out: &mut W,
        serial: Option<&str>,
    ) -> Result<()> {
        let serial = resolve_serial(serial);
        writeln!(out, "$TTL {}", self.zone.ttl)?;
        writeln!(out)?;
        self.write_soa_record(out, &serial)?;
        self.write_ns_records(out)
    }

    /// Queue a PTR entry if `address` (dotted octets or nibbles) starts with `prefix`
    fn collect_ptr(
        &self,
        entries: &mut Vec<(String, String)>,
        prefix: &str,
        address: &str,
        host_name: &str,
    ) {
        let Some(suffix) = address.strip_prefix(prefix) else {
            trace!("Skipping {} for {}: outside prefix {}", address, host_name, prefix);
            return;
        };

        entries.push((reverse_labels(suffix), self.qualify(host_name)));
    }

    fn write_ptr_zone<W: Write + ?Sized>(
        &self,
        out: &mut W,
        prefix: &str,
        entries: &[(String, String)],
        serial: Option<&str>,
    ) -> Result<usize> {
        self.write_prolog_unchecked(out, serial)?;

        for (owner, target) in entries {
            write_record(out, owner, "IN PTR", target)?;
        }

        debug!(
            "Wrote reverse zone for prefix {} of {} with {} PTR records",
            prefix,
            self.zone.zone_name,
            entries.len()
        );
        Ok(entries.len())
    }

    /// Make a relative host name absolute by appending the zone name
    fn qualify(&self, name: &str) -> String {
        if is_absolute_domain_name(name) {
            name.to_string()
        } else {
            format!("{}.{}", name, self.zone.zone_name)
        }
    }
}

/// Append the trailing "." and check each label of a reverse zone prefix
fn normalize_prefix(prefix: &str, valid_label: impl Fn(&str) -> bool) -> Result<String> {
    let trimmed = prefix.trim();
    let labels = trimmed.strip_suffix('.').unwrap_or(trimmed);

    if labels.is_empty() || !labels.split('.').all(valid_label) {
        return Err(ZoneGenError::Configuration(format!(
            "Invalid reverse zone prefix: {:?}",
            prefix
        )));
    }

    Ok(format!("{}.", labels))
}
