use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_rejects_unknown() {
    let result = parse_environment("staging");
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_ENV"),
        "expected InvalidEnvVar(STOREFRONT_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.base_url, "http://localhost:3000");
    assert_eq!(cfg.state_dir.to_str(), Some("./.storefront"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "storefront/0.1");
    assert_eq!(cfg.search_debounce(), Duration::from_millis(300));
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_ENV", "production");
    map.insert("STOREFRONT_BIND_ADDR", "127.0.0.1:8080");
    map.insert("STOREFRONT_BASE_URL", "https://shop.example.com/");
    map.insert("STOREFRONT_STATE_DIR", "/var/lib/storefront");
    map.insert("STOREFRONT_SEARCH_DEBOUNCE_MS", "400");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.port(), 8080);
    assert_eq!(cfg.base_url, "https://shop.example.com");
    assert_eq!(cfg.state_dir.to_str(), Some("/var/lib/storefront"));
    assert_eq!(cfg.search_debounce_ms, 400);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_BIND_ADDR"),
        "expected InvalidEnvVar(STOREFRONT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_BASE_URL", "localhost:3000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_BASE_URL"),
        "expected InvalidEnvVar(STOREFRONT_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_debounce() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_SEARCH_DEBOUNCE_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_SEARCH_DEBOUNCE_MS"),
        "expected InvalidEnvVar(STOREFRONT_SEARCH_DEBOUNCE_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("STOREFRONT_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOREFRONT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOREFRONT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}
