//! End-to-end behavior of an IP store opened through the driver registry.

mod common;

use common::{ip, open_memory_store};
use ip_store::{AddressKey, DriverRegistry, IpStoreConfig, IpStoreError};
use std::net::{IpAddr, Ipv4Addr};

fn v6() -> IpAddr {
    ip("0c22:384e:0:0c22:384e::68")
}

fn v4() -> IpAddr {
    ip("::ffff:12.13.14.15")
}

fn v4s() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(12, 13, 14, 15))
}

#[test]
fn test_key_table() {
    let table: [(IpAddr, [u8; 16]); 3] = [
        (v6(), [12, 34, 56, 78, 0, 0, 12, 34, 56, 78, 0, 0, 0, 0, 0, 104]),
        (v4(), [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 12, 13, 14, 15]),
        (v4s(), [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 12, 13, 14, 15]),
    ];

    for (input, expected) in table {
        assert_eq!(AddressKey::from_ip(input).into_bytes(), expected, "{input}");
    }
}

#[test]
fn test_ip_lifecycle() {
    let store = open_memory_store();

    assert!(!store.has_ip(v4()).unwrap());

    store.add_ip(v4()).unwrap();
    assert!(store.has_ip(v4()).unwrap());
    assert!(store.has_ip(v4s()).unwrap());
    assert!(!store.has_ip(v6()).unwrap());

    assert!(matches!(
        store.remove_ip(v6()),
        Err(IpStoreError::NotFound(_))
    ));
    store.remove_ip(v4s()).unwrap();
    assert!(!store.has_ip(v4()).unwrap());

    store.add_ip(v6()).unwrap();
    assert!(store.has_ip(v6()).unwrap());
    store.remove_ip(v6()).unwrap();
    assert!(!store.has_ip(v6()).unwrap());

    assert_eq!(
        store.stop().wait_blocking(),
        Ok(()),
        "IP store shutdown must not fail"
    );
}

#[test]
fn test_networks() {
    let store = open_memory_store();
    let net1 = "192.168.22.255/24";
    let net2 = "192.168.23.255/24";
    let included = ip("192.168.22.23");
    let excluded = ip("192.168.23.22");

    assert!(!store.has_ip(included).unwrap());
    assert!(!store.has_ip(excluded).unwrap());

    assert!(store.add_network("").is_err());
    assert!(store.remove_network("").is_err());

    store.add_network(net1).unwrap();
    assert!(store.has_ip(included).unwrap());
    assert!(!store.has_ip(excluded).unwrap());

    assert!(store.remove_network(net2).is_err());
    store.remove_network(net1).unwrap();

    assert!(!store.has_ip(included).unwrap());
    assert!(!store.has_ip(excluded).unwrap());

    assert_eq!(store.stop().wait_blocking(), Ok(()));
}

#[tokio::test]
async fn test_stop_from_async_context() {
    let store = open_memory_store();
    store.add_network("10.0.0.0/8").unwrap();
    store.add_ip(v6()).unwrap();

    let handle = store.stop();
    assert_eq!(handle.await, Ok(()));
    assert_eq!(store.has_ip(v6()), Err(IpStoreError::Stopped));
}

#[tokio::test]
async fn test_stop_can_be_awaited_with_timeout() {
    let store = open_memory_store();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), store.stop()).await;
    assert_eq!(result.expect("shutdown within timeout"), Ok(()));
}

#[test]
fn test_open_from_config_with_seed() {
    common::init_tracing();
    let config = IpStoreConfig::parse(
        r#"
        [ip_store]
        driver = "memory"

        [ip_store.options]
        ip_capacity = 16

        [ip_store.seed]
        ips = ["12.13.14.15"]
        networks = ["192.168.22.255/24", "2001:db8::/32"]
        "#,
    )
    .unwrap();

    let store = config.open(&DriverRegistry::with_builtin()).unwrap();
    assert!(store.has_ip(v4()).unwrap());
    assert!(store.has_ip(ip("192.168.22.1")).unwrap());
    assert!(store.has_ip(ip("2001:db8::42")).unwrap());

    let stats = store.stats().unwrap();
    assert_eq!((stats.ip_count, stats.network_count), (1, 2));
    assert_eq!(store.stop().wait_blocking(), Ok(()));
}

#[test]
fn test_open_from_config_bad_seed_network() {
    let config = IpStoreConfig::parse(
        r#"
        [ip_store.seed]
        networks = ["10.0.0.0/99"]
        "#,
    )
    .unwrap();

    let result = config.open(&DriverRegistry::with_builtin());
    assert!(matches!(result, Err(IpStoreError::InvalidFormat(_))));
}

#[test]
fn test_open_from_config_unknown_driver() {
    let config = IpStoreConfig::parse("[ip_store]\ndriver = \"postgres\"\n").unwrap();
    let result = config.open(&DriverRegistry::with_builtin());
    assert!(matches!(result, Err(IpStoreError::UnknownDriver(_))));
}
