use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_when_unset() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.addr().to_string(), "0.0.0.0:8000");
    assert_eq!(config.drain, Duration::ZERO);
}

#[test]
fn test_overrides_from_environment() {
    let config = Config::from_lookup(lookup_from(&[
        ("HOST", "127.0.0.1"),
        ("PORT", " 9090 "),
        ("SHUTDOWN_DRAIN_SECONDS", "5"),
    ]))
    .unwrap();

    assert_eq!(config.addr().to_string(), "127.0.0.1:9090");
    assert_eq!(config.drain, Duration::from_secs(5));
}

#[test]
fn test_ipv6_host() {
    let config = Config::from_lookup(lookup_from(&[("HOST", "::"), ("PORT", "80")])).unwrap();

    assert_eq!(config.addr().to_string(), "[::]:80");
}

#[test]
fn test_invalid_port_rejected() {
    let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort(ref v) if v == "http"));

    let err = Config::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort(_)));
}

#[test]
fn test_invalid_host_rejected() {
    let err = Config::from_lookup(lookup_from(&[("HOST", "localhost")])).unwrap_err();
    assert_eq!(err.to_string(), "Invalid bind address: localhost");
}

#[test]
fn test_invalid_drain_rejected() {
    let err = Config::from_lookup(lookup_from(&[("SHUTDOWN_DRAIN_SECONDS", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDrain(_)));
}
