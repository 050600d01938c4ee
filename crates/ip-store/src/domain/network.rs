//! Network (CIDR block) entries.

use super::address_key::canonical_ip;
use super::errors::IpStoreError;
use ipnet::{IpNet, Ipv4Net};
use std::net::IpAddr;

/// One configured address range.
///
/// The base address may carry host bits (`192.168.22.255/24` is accepted
/// and covers the whole `/24`). The identifier is the trimmed text the
/// entry was registered under and is the only key that removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    id: String,
    net: IpNet,
}

impl NetworkEntry {
    /// Parse a CIDR specification.
    pub fn parse(spec: &str) -> Result<Self, IpStoreError> {
        let id = normalize_id(spec)?;
        let net: IpNet = id
            .parse()
            .map_err(|_| IpStoreError::InvalidFormat(spec.to_string()))?;

        Ok(Self {
            net: canonical_net(net),
            id: id.to_string(),
        })
    }

    /// Registration identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parsed range, with mapped IPv6 ranges folded to IPv4.
    pub fn net(&self) -> IpNet {
        self.net
    }

    /// Whether `ip` lies inside this range.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.net.contains(&canonical_ip(ip))
    }
}

// Rejects empty and all-whitespace input.
fn normalize_id(spec: &str) -> Result<&str, IpStoreError> {
    let id = spec.trim();
    if id.is_empty() {
        return Err(IpStoreError::InvalidFormat(spec.to_string()));
    }
    Ok(id)
}

fn canonical_net(net: IpNet) -> IpNet {
    let IpNet::V6(v6) = net else {
        return net;
    };
    if v6.prefix_len() < 96 {
        return net;
    }
    match v6.addr().to_ipv4_mapped() {
        Some(v4) => Ipv4Net::new(v4, v6.prefix_len() - 96)
            .map(IpNet::V4)
            .unwrap_or(net),
        None => net,
    }
}
