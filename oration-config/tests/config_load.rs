use oration_config::{LogEncoding, OrationConfigLoader};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
collector:
  output_path: "${ORATION_TEST_ROOT}/speeches.json"
  request_timeout_secs: 10
sampler:
  input_path: "${ORATION_TEST_ROOT}/speeches.json"
  exclusions: []
  min_year: 1800
  target_chunks: 20
logging:
  format: json
  emit_stderr: false
  "#;
    let p = write_yaml(&tmp, "oration.yaml", file_yaml);

    temp_env::with_var("ORATION_TEST_ROOT", Some("/data"), || {
        let config = OrationConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load system config");

        assert_eq!(config.collector.output_path, PathBuf::from("/data/speeches.json"));
        assert_eq!(config.collector.request_timeout_secs, 10);
        assert_eq!(config.sampler.input_path, PathBuf::from("/data/speeches.json"));
        assert!(config.sampler.exclusions.is_empty());
        assert_eq!(config.sampler.min_year, 1800);
        assert_eq!(config.sampler.target_chunks, 20);
        // untouched fields keep their defaults
        assert_eq!(config.sampler.default_chunk_size, 200);
        assert_eq!(config.logging.format, LogEncoding::Json);
        assert!(!config.logging.emit_stderr);
    });
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "oration.yaml",
        "sampler:\n  min_year: 1800\n  emit_empty_samples: true\n",
    );

    temp_env::with_vars(
        [
            ("ORATION__SAMPLER__MIN_YEAR", Some("1950")),
            ("ORATION__SAMPLER__EMIT_EMPTY_SAMPLES", Some("false")),
        ],
        || {
            let config = OrationConfigLoader::new().with_file(&p).load().unwrap();
            assert_eq!(config.sampler.min_year, 1950);
            assert!(!config.sampler.emit_empty_samples);
        },
    );
}

#[test]
#[serial]
fn optional_file_may_be_missing() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent.yaml");

    let config = OrationConfigLoader::new()
        .with_optional_file(&missing)
        .load()
        .expect("missing optional file is fine");
    assert_eq!(config.sampler.min_year, 1900);
}

#[test]
#[serial]
fn required_file_must_exist() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent.yaml");

    assert!(OrationConfigLoader::new().with_file(&missing).load().is_err());
}

#[test]
#[serial]
fn rejects_unknown_log_encoding() {
    let result = OrationConfigLoader::new()
        .with_yaml_str("logging:\n  format: xml\n")
        .load();
    assert!(result.is_err());
}
