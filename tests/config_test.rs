mod common;

use common::*;
use std::fs;
use tempfile::TempDir;
use zonegen::ZoneGenError;
use zonegen::config::load_zone;

const THEDREAMING: &str = r#"
zone_name = "thedreaming.org."
contact_address = "root.thedreaming.org"
name_servers = ["thedreaming.org."]

[[hosts]]
name = "thedreaming.org."
addresses = ["192.168.0.1", "209.217.122.208"]
aliases = ["www", "ftp", "mail", "tachikoma"]
mail_exchangers = [{ mail_host = "thedreaming.org." }]

[[hosts]]
name = "lucid"
addresses = ["192.168.0.10"]
ipv6_addresses = ["fe80::0224:01ff:fe0f:7770"]

[[hosts]]
name = "mystic"
addresses = ["192.168.0.11"]

[[hosts]]
name = "renegade.thedreaming.org."
addresses = ["192.168.0.12"]

[[hosts]]
name = "www.renegade"
addresses = ["192.168.0.13"]
"#;

fn write_document(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("zone.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_zone_matches_built_zone() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, THEDREAMING);

    let zone = load_zone(&path).unwrap();
    assert_eq!(zone, thedreaming_zone());
    assert_eq!(
        forward_text(&zone, Some(SERIAL)),
        include_str!("data/thedreaming.org.zone")
    );
}

#[test]
fn test_load_zone_converts_email_contact() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        r#"
zone_name = "example.org."
contact_address = "hostmaster@example.org"
name_servers = ["ns1.example.org.", "ns2.example.org."]
ttl = "3H"
"#,
    );

    let zone = load_zone(&path).unwrap();
    assert_eq!(zone.contact_address, "hostmaster.example.org.");
    assert_eq!(zone.ttl, "3H");
    assert_eq!(zone.refresh, "2H");
    assert!(zone.hosts.is_empty());
}

#[test]
fn test_load_zone_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_zone(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ZoneGenError::Io(_))));
}

#[test]
fn test_load_zone_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "zone_name = \n");
    assert!(matches!(load_zone(&path), Err(ZoneGenError::ConfigParse(_))));
}

#[test]
fn test_load_zone_rejects_bad_address() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        r#"
zone_name = "example.org."
contact_address = "root.example.org."
name_servers = ["ns1.example.org."]

[[hosts]]
name = "mystic"
addresses = ["192.168.0.256"]
"#,
    );
    assert!(matches!(
        load_zone(&path),
        Err(ZoneGenError::InvalidAddressFormat(_))
    ));
}

#[test]
fn test_load_zone_requires_name_servers() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        r#"
zone_name = "example.org."
contact_address = "root.example.org."
name_servers = []
"#,
    );
    assert!(matches!(
        load_zone(&path),
        Err(ZoneGenError::Configuration(_))
    ));
}
