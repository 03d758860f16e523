//! Configuration loading as the CLI performs it.
//!
//! The CLI is a binary crate, so these tests drive the library calls it makes
//! with `--config` pointing at temporary files.

use std::fs;

use qlab_hal::{HalError, QlabConfig};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_explicit_config_with_token() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
ibm:
  key: "abc123"
  instance: "ibm-q/open/main"
execution:
  poll_interval_ms: 500
"#,
    );

    let config = QlabConfig::from_file(&path).unwrap();
    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.token, "abc123");
    assert_eq!(credentials.instance.as_deref(), Some("ibm-q/open/main"));
    assert!(credentials.verify);
    assert_eq!(credentials.poll_policy.interval.as_millis(), 500);
    assert!(!format!("{credentials:?}").contains("abc123"));
}

#[test]
fn test_proxies_and_tls() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
ibm:
  key: "abc123"
  proxies:
    https: "http://proxy.local:8443"
  verify: false
"#,
    );

    let credentials = QlabConfig::from_file(&path).unwrap().credentials().unwrap();
    assert_eq!(
        credentials.proxies.https.as_deref(),
        Some("http://proxy.local:8443")
    );
    assert!(credentials.proxies.http.is_none());
    assert!(!credentials.verify);
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let result = QlabConfig::load(Some(dir.path().join("absent.yaml").as_path()));
    assert!(matches!(result, Err(HalError::Configuration(_))));
}

#[test]
fn test_config_without_ibm_section_has_no_credentials() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "execution:\n  timeout_secs: 60\n");

    let config = QlabConfig::from_file(&path).unwrap();
    assert!(config.credentials().is_err());
}

#[test]
fn test_blank_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "ibm:\n  key: \"   \"\n");

    let config = QlabConfig::from_file(&path).unwrap();
    assert!(matches!(
        config.credentials(),
        Err(HalError::Configuration(_))
    ));
}

#[test]
fn test_malformed_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "ibm: [not, a, mapping\n");
    assert!(QlabConfig::from_file(&path).is_err());

    let path = write_config(&dir, "ibm:\n  key: k\n  endpoint: \"ftp://nope\"\n");
    assert!(QlabConfig::from_file(&path).is_err());
}
