//! Configuration Loading Tests
//!
//! Layered loading of `matreq.toml` / `matreq.<env>.toml` from a directory,
//! environment overrides and validation failures.

use std::fs;

use chrono::{TimeZone, Utc};
use config::Map;
use matreq_core::config::{ConfigManager, ConfigurationError, MatreqConfig};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn empty_directory_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::load_from_directory_with_env(dir.path(), "development").unwrap();
    let config = manager.config();

    assert_eq!(manager.environment(), "development");
    assert_eq!(config.systems.len(), 3);
    assert_eq!(config.business.sales_document_type, "ZMTQ");
    assert_eq!(config.resolve_sales_area("us01").sold_to, "166");
}

#[test]
fn environment_file_overrides_base_file() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "matreq.toml",
        r#"
        [[systems]]
        id = "DEV"
        host = "dev.example.com"
        system_number = "00"
        description = "Development"

        [[plants]]
        plant = "DE10"
        sales_org = "DE01"
        sold_to = "5000"
        ship_to = "W5000"

        [session]
        expiry_hours = 8
        "#,
    );
    write(
        &dir,
        "matreq.production.toml",
        r#"
        [session]
        expiry_hours = 2
        "#,
    );

    let production = ConfigManager::load_from_directory_with_env(dir.path(), "production").unwrap();
    let config = production.config();
    assert_eq!(config.session.expiry_hours, 2);
    assert_eq!(config.systems.len(), 1);
    assert_eq!(config.plant("de10").unwrap().ship_to, "W5000");
    // plant table comes from the file, not the built-in defaults
    assert_eq!(config.resolve_sales_area("US01").sales_org, "US01");
    assert_eq!(config.resolve_sales_area("US01").sold_to, "");

    let development =
        ConfigManager::load_from_directory_with_env(dir.path(), "development").unwrap();
    assert_eq!(development.config().session.expiry_hours, 8);
}

#[test]
fn environment_variables_override_files() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "matreq.toml",
        r#"
        [connection]
        language = "EN"
        "#,
    );
    let variables = Map::from([("MATREQ_CONNECTION__LANGUAGE".to_string(), "DE".to_string())]);

    let manager =
        ConfigManager::load_from_directory_with_overrides(dir.path(), "test", variables).unwrap();
    assert_eq!(manager.config().connection.language, "DE");
}

#[test]
fn duplicate_system_ids_are_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "matreq.toml",
        r#"
        [[systems]]
        id = "DEV"
        host = "a.example.com"
        system_number = "00"
        description = "A"

        [[systems]]
        id = "dev"
        host = "b.example.com"
        system_number = "01"
        description = "B"
        "#,
    );

    let err = ConfigManager::load_from_directory_with_env(dir.path(), "development").unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
}

#[test]
fn malformed_file_is_a_build_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "matreq.toml", "[business\ndivision = ");

    let err = ConfigManager::load_from_directory_with_env(dir.path(), "development").unwrap_err();
    assert!(matches!(err, ConfigurationError::BuildError { .. }));
}

#[test]
fn debug_config_is_json() {
    let manager = ConfigManager::load_from_toml("").unwrap();
    let value = manager.debug_config();
    assert_eq!(value["business"]["division"], "01");
    assert_eq!(value["systems"][2]["id"], "PRD");
}

#[test]
fn session_expiry_timestamp() {
    let config = MatreqConfig::default();
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
    assert_eq!(
        config.session.expires_at(created),
        Utc.with_ymd_and_hms(2024, 3, 2, 4, 0, 0).unwrap()
    );
}
