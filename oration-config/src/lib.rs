//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (every field has one, so an empty config is valid)
//! 2. YAML files / inline snippets, in the order they were attached
//! 3. `ORATION__`-prefixed environment variables, `__` separating sections
//!    (`ORATION__SAMPLER__MIN_YEAR=1950`)
//!
//! String values may reference other environment variables as `${VAR}`; they
//! are expanded after the sources are merged.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_LISTING_URL: &str = "https://www.presidency.ucsb.edu/documents/presidential-documents-archive-guidebook/annual-messages-congress-the-state-the-union";
pub const DEFAULT_SPEECHES_FILE: &str = "state_of_union_speeches.json";
pub const DEFAULT_CONFIG_FILE: &str = "oration.yaml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrationConfig {
    pub collector: CollectorSettings,
    pub sampler: SamplerSettings,
    pub logging: LoggingSettings,
}

/// Where and how the collector fetches speeches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollectorSettings {
    pub listing_url: String,
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.into(),
            output_path: PathBuf::from(DEFAULT_SPEECHES_FILE),
            request_timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// Sampler inputs, filters and output location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Speakers dropped from sampling entirely.
    pub exclusions: Vec<String>,
    /// Earliest year kept (inclusive).
    pub min_year: u16,
    /// Chunk budget shared across one speaker's speeches.
    pub target_chunks: usize,
    /// Word budget used when `--chunk_size` is not given.
    pub default_chunk_size: usize,
    /// Keep samples for chunks where no sentence fit the budget.
    pub emit_empty_samples: bool,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_SPEECHES_FILE),
            output_dir: PathBuf::from("samples"),
            exclusions: vec!["Zachary Taylor".into(), "Franklin D. Roosevelt".into()],
            min_year: 1900,
            target_chunks: 52,
            default_chunk_size: 200,
            emit_empty_samples: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEncoding {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub dir: Option<PathBuf>,
    pub format: LogEncoding,
    pub emit_stderr: bool,
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogEncoding::Text,
            emit_stderr: true,
            filter: "info".into(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct OrationConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for OrationConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OrationConfigLoader {
    /// Start from the built-in defaults with no file sources attached.
    ///
    /// ```
    /// use oration_config::OrationConfigLoader;
    ///
    /// let config = OrationConfigLoader::new().load().expect("defaults are valid");
    /// assert_eq!(config.sampler.min_year, 1900);
    /// assert_eq!(config.sampler.target_chunks, 52);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent (e.g. the default `oration.yaml`).
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use oration_config::OrationConfigLoader;
    ///
    /// let cfg = OrationConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// sampler:
    ///   exclusions: ["Somebody Else"]
    ///   emit_empty_samples: false
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.sampler.exclusions, vec!["Somebody Else".to_string()]);
    /// assert!(!cfg.sampler.emit_empty_samples);
    /// assert_eq!(cfg.sampler.min_year, 1900);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// `ORATION__`-prefixed environment variables are layered on top of every
    /// attached file, then `${VAR}` placeholders are expanded.
    ///
    /// ```
    /// use oration_config::OrationConfigLoader;
    /// use std::path::PathBuf;
    ///
    /// unsafe { std::env::set_var("ORATION_DOCTEST_DATA", "/srv/speeches"); }
    ///
    /// let config = OrationConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// sampler:
    ///   output_dir: "${ORATION_DOCTEST_DATA}/samples"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.sampler.output_dir, PathBuf::from("/srv/speeches/samples"));
    ///
    /// unsafe { std::env::remove_var("ORATION_DOCTEST_DATA"); }
    /// ```
    pub fn load(self) -> Result<OrationConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("ORATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: OrationConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
