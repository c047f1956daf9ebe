use tempfile::TempDir;

use rosti_core::config::{ConfigStore, RostiConfig};

#[test]
fn load_missing_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_dir(&temp.path().join("config"));

    let config = store.load().unwrap();

    assert_eq!(config, RostiConfig::default());
    assert_eq!(config.remembered_company(), None);
}

#[test]
fn save_then_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_dir(&temp.path().join("config"));

    let config = RostiConfig {
        token: Some("secret".to_string()),
        company_id: Some(42),
        ssh_key_candidates: vec!["id_ed25519".to_string()],
        ..RostiConfig::default()
    };
    store.save(&config).unwrap();

    assert!(store.config_path().exists());
    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn remember_company_keeps_other_settings() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_dir(temp.path());
    store
        .save(&RostiConfig {
            token: Some("secret".to_string()),
            ..RostiConfig::default()
        })
        .unwrap();

    store.remember_company(7).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.remembered_company(), Some(7));
    assert_eq!(loaded.token.as_deref(), Some("secret"));
}

#[test]
fn invalid_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_dir(temp.path());
    std::fs::write(store.config_path(), "company_id = [").unwrap();

    let err = store.load().unwrap_err();

    assert!(format!("{:#}", err).contains("rosti.toml"));
}

#[test]
fn invalid_api_url_is_rejected_on_load() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_dir(temp.path());
    std::fs::write(store.config_path(), "api_url = \"not a url\"\n").unwrap();

    assert!(store.load().is_err());
}
