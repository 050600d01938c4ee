//! Canonical address keys.
//!
//! Every address that enters the store is folded into a single 16-byte
//! representation first. IPv4 addresses are embedded in the IPv4-mapped
//! IPv6 range (`::ffff:a.b.c.d`), so `12.13.14.15` and
//! `::ffff:12.13.14.15` are the same key.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Fixed-width (128-bit) key for one network address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressKey([u8; 16]);

impl AddressKey {
    /// Build the canonical key for an address.
    pub fn from_ip(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Self(v4.to_ipv6_mapped().octets()),
            IpAddr::V6(v6) => Self(v6.octets()),
        }
    }

    /// Consume the key, returning its bytes.
    pub fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Address this key stands for, with mapped IPv4 shown as IPv4.
    pub fn to_ip(&self) -> IpAddr {
        canonical_ip(IpAddr::V6(Ipv6Addr::from(self.0)))
    }
}

impl From<IpAddr> for AddressKey {
    fn from(ip: IpAddr) -> Self {
        Self::from_ip(ip)
    }
}

impl From<Ipv4Addr> for AddressKey {
    fn from(ip: Ipv4Addr) -> Self {
        Self::from_ip(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for AddressKey {
    fn from(ip: Ipv6Addr) -> Self {
        Self::from_ip(IpAddr::V6(ip))
    }
}

impl fmt::Debug for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressKey({})", self.to_ip())
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip())
    }
}

/// Collapse an IPv4-mapped IPv6 address to plain IPv4.
///
/// Containment checks run on this form so an address and a range written in
/// different families still compare.
pub fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v6() -> IpAddr {
        "c22:384e:0:c22:384e::68".parse().unwrap()
    }

    #[test]
    fn test_v6_key_is_raw_octets() {
        let key = AddressKey::from_ip(v6());
        assert_eq!(
            key.into_bytes(),
            [12, 34, 56, 78, 0, 0, 12, 34, 56, 78, 0, 0, 0, 0, 0, 104]
        );
    }

    #[test]
    fn test_v4_key_uses_mapped_prefix() {
        let key = AddressKey::from(Ipv4Addr::new(12, 13, 14, 15));
        assert_eq!(
            key.into_bytes(),
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 12, 13, 14, 15]
        );
    }

    #[test]
    fn test_v4_and_mapped_v6_share_key() {
        let short = IpAddr::V4(Ipv4Addr::new(12, 13, 14, 15));
        let mapped: IpAddr = "::ffff:12.13.14.15".parse().unwrap();
        assert_eq!(AddressKey::from(short), AddressKey::from(mapped));
    }

    #[test]
    fn test_compatible_v6_is_not_mapped() {
        // ::12.13.14.15 (deprecated compatible form) is a distinct address
        let compat: IpAddr = "::c0d:e0f".parse().unwrap();
        let short = IpAddr::V4(Ipv4Addr::new(12, 13, 14, 15));
        assert_ne!(AddressKey::from(compat), AddressKey::from(short));
    }

    #[test]
    fn test_canonical_ip() {
        let mapped: IpAddr = "::ffff:192.168.1.1".parse().unwrap();
        assert_eq!(canonical_ip(mapped), IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(canonical_ip(v6()), v6());
    }

    #[test]
    fn test_display_round_trips_family() {
        let key = AddressKey::from(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(key.to_string(), "10.0.0.1");
        assert_eq!(AddressKey::from_ip(v6()).to_ip(), v6());
    }
}
