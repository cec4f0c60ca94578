//! Configuration file loading.

use std::io::Write;

use sample_store_core::config::BenchConfig;
use sample_store_core::error::BenchError;

#[test]
fn test_load_partial_config_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{ "sizes": [1, 3], "stage_timeout_ms": 250, "backends": ["ordered", "skiplist"] }}"#
    )?;

    let config = BenchConfig::from_json_file(file.path())?;
    assert_eq!(config.sizes, vec![1, 3]);
    assert_eq!(config.stage_timeout_ms, Some(250));
    assert_eq!(config.backends, vec!["ordered", "skiplist"]);
    // Unspecified fields keep their defaults
    assert_eq!(config.query_points, BenchConfig::default().query_points);
    assert_eq!(config.range_from, 4.0);
    config.validate()?;
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = BenchConfig::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(BenchError::Io(_))));
}

#[test]
fn test_load_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ sizes: ").unwrap();
    let result = BenchConfig::from_json_file(file.path());
    assert!(matches!(result, Err(BenchError::Serialization(_))));
}
