//! Shared fixtures for zonegen integration tests

#![allow(dead_code)] // Not every test file uses every fixture

use zonegen::{Host, MailExchanger, Zone, ZoneFileWriter};

pub const SERIAL: &str = "2011010701";

/// The thedreaming.org. zone: absolute and relative host names, aliases,
/// a mail exchanger and one IPv6 host
pub fn thedreaming_zone() -> Zone {
    Zone::new(
        "thedreaming.org.",
        "root.thedreaming.org",
        vec!["thedreaming.org.".to_string()],
    )
    .with_host(
        Host::new("thedreaming.org.")
            .with_address("192.168.0.1")
            .with_address("209.217.122.208")
            .with_alias("www")
            .with_alias("ftp")
            .with_alias("mail")
            .with_alias("tachikoma")
            .with_mail_exchanger(MailExchanger::with_default_priority("thedreaming.org.")),
    )
    .with_host(
        Host::new("lucid")
            .with_address("192.168.0.10")
            .with_ipv6_address("fe80::0224:01ff:fe0f:7770"),
    )
    .with_host(Host::new("mystic").with_address("192.168.0.11"))
    .with_host(Host::new("renegade.thedreaming.org.").with_address("192.168.0.12"))
    .with_host(Host::new("www.renegade").with_address("192.168.0.13"))
}

/// Zone with a single name server and no hosts
pub fn empty_zone() -> Zone {
    Zone::new(
        "example.org.",
        "root.example.org.",
        vec!["ns1.example.org.".to_string()],
    )
}

pub fn forward_text(zone: &Zone, serial: Option<&str>) -> String {
    let mut out = Vec::new();
    ZoneFileWriter::new(zone)
        .write_forward_zone(&mut out, serial)
        .unwrap();
    String::from_utf8(out).unwrap()
}

pub fn reverse_v4_text(zone: &Zone, prefix: &str) -> String {
    let mut out = Vec::new();
    ZoneFileWriter::new(zone)
        .write_reverse_zone_v4(&mut out, prefix, Some(SERIAL))
        .unwrap();
    String::from_utf8(out).unwrap()
}

pub fn reverse_v6_text(zone: &Zone, prefix: &str) -> String {
    let mut out = Vec::new();
    ZoneFileWriter::new(zone)
        .write_reverse_zone_v6(&mut out, prefix, Some(SERIAL))
        .unwrap();
    String::from_utf8(out).unwrap()
}

/// Lines of a zone file that carry the given record type
pub fn record_lines<'a>(text: &'a str, rtype: &str) -> Vec<&'a str> {
    let needle = format!(" {:<10} ", rtype);
    text.lines().filter(|line| line.contains(&needle)).collect()
}
