//! Address forms used when building IPv6 zones.
//!
//! [`mac_to_eui64`] derives the modified EUI-64 interface identifier of RFC 4291
//! §2.5.1 from a MAC address, and [`expand_ipv6`] writes an IPv6 address out in its
//! longest form (eight zero-padded groups, no `::`), which is the form reverse
//! `ip6.arpa` names are built from.

use crate::error::{Result, ZoneGenError};
use std::net::Ipv6Addr;

/// Bit of the first MAC octet inverted when forming a modified EUI-64
const UNIVERSAL_LOCAL_BIT: u8 = 0x02;

/// Octets inserted between the OUI and the NIC-specific half of the MAC
const EUI64_FILLER: [u8; 2] = [0xff, 0xfe];

/// Link-local prefix that EUI-64 identifiers are usually appended to
pub const LINK_LOCAL_PREFIX: &str = "fe80::";

/// Generate the EUI-64 interface identifier for a MAC address.
///
/// `"00:24:01:0f:77:70"` becomes `"0224:01ff:fe0f:7770"`. Knowing the MAC addresses of
/// autoconfigured machines lets you build their addresses by appending the identifier
/// to a routing prefix and subnet ID, or to `fe80::` for link-local addresses.
pub fn mac_to_eui64(mac: &str) -> Result<String> {
    let octets = parse_mac(mac)?;

    let eui64 = [
        octets[0] ^ UNIVERSAL_LOCAL_BIT,
        octets[1],
        octets[2],
        EUI64_FILLER[0],
        EUI64_FILLER[1],
        octets[3],
        octets[4],
        octets[5],
    ];

    Ok(eui64
        .chunks(2)
        .map(|pair| format!("{:02x}{:02x}", pair[0], pair[1]))
        .collect::<Vec<_>>()
        .join(":"))
}

/// Link-local IPv6 address (`fe80::<eui64>`) for a MAC address
pub fn link_local_from_mac(mac: &str) -> Result<String> {
    Ok(format!("{}{}", LINK_LOCAL_PREFIX, mac_to_eui64(mac)?))
}

/// Write an IPv6 address out in the longest form possible.
///
/// `"fe08::1"` becomes `"fe08:0000:0000:0000:0000:0000:0000:0001"`. Hex digits are
/// lower-cased, so expanding an already expanded address returns it unchanged.
pub fn expand_ipv6(address: &str) -> Result<String> {
    let addr: Ipv6Addr = address
        .trim()
        .parse()
        .map_err(|_| ZoneGenError::InvalidAddressFormat(format!("Invalid IPv6 address: {}", address)))?;

    Ok(addr
        .segments()
        .iter()
        .map(|segment| format!("{:04x}", segment))
        .collect::<Vec<_>>()
        .join(":"))
}

/// The 32 hex digits of an expanded IPv6 address, joined by `"."`.
///
/// This is the nibble form reverse zone prefixes (e.g. `"f.e.8.0."`) are matched against.
pub fn ipv6_nibbles(address: &str) -> Result<String> {
    let expanded = expand_ipv6(address)?;

    Ok(expanded
        .chars()
        .filter(|c| *c != ':')
        .map(String::from)
        .collect::<Vec<_>>()
        .join("."))
}

fn parse_mac(mac: &str) -> Result<[u8; 6]> {
    let invalid = || ZoneGenError::InvalidAddressFormat(format!("Invalid MAC address: {}", mac));

    let fields: Vec<&str> = mac.trim().split(':').collect();
    if fields.len() != 6 {
        return Err(invalid());
    }

    let mut octets = [0u8; 6];
    for (octet, field) in octets.iter_mut().zip(&fields) {
        if field.is_empty() || field.len() > 2 || !field.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        *octet = u8::from_str_radix(field, 16).map_err(|_| invalid())?;
    }

    Ok(octets)
}
