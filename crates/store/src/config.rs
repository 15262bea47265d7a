//! Store configuration: where the file lives and how it is written.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable naming the backing file.
pub const ENV_STORE_PATH: &str = "RECORDKEEP_STORE_PATH";
/// Environment variable selecting the [`WriteMode`] (`overwrite` | `atomic`).
pub const ENV_WRITE_MODE: &str = "RECORDKEEP_WRITE_MODE";
/// Environment variable selecting the [`MissingRecordPolicy`] (`skip` | `insert`).
pub const ENV_ON_MISSING: &str = "RECORDKEEP_ON_MISSING";

pub const DEFAULT_STORE_PATH: &str = "recordkeep.json";

/// How `save_all` replaces the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate the file and write the new contents in place.
    ///
    /// A crash mid-write can leave the file empty or truncated.
    #[default]
    Overwrite,
    /// Write a sibling temp file, fsync it, then rename it over the target.
    Atomic,
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(WriteMode::Overwrite),
            "atomic" | "atomic-rename" => Ok(WriteMode::Atomic),
            other => Err(format!("unknown write mode `{other}`")),
        }
    }
}

/// What `save` does when the entity has an identifier that the store no
/// longer holds (e.g. the record was deleted through another instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRecordPolicy {
    /// Write nothing and report `SaveOutcome::SkippedMissing`.
    #[default]
    Skip,
    /// Re-insert the record under the entity's existing identifier.
    Insert,
}

impl FromStr for MissingRecordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MissingRecordPolicy::Skip),
            "insert" => Ok(MissingRecordPolicy::Insert),
            other => Err(format!("unknown missing-record policy `{other}`")),
        }
    }
}

/// File store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub write_mode: WriteMode,
    pub missing_record: MissingRecordPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            write_mode: WriteMode::default(),
            missing_record: MissingRecordPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_missing_record(mut self, policy: MissingRecordPolicy) -> Self {
        self.missing_record = policy;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables take their defaults; unparseable values are logged and
    /// replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`], with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let path = lookup(ENV_STORE_PATH)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                tracing::debug!(
                    "{ENV_STORE_PATH} not set; using {}",
                    defaults.path.display()
                );
                defaults.path.clone()
            });

        Self {
            path,
            write_mode: parse_or_default(&lookup, ENV_WRITE_MODE, defaults.write_mode),
            missing_record: parse_or_default(&lookup, ENV_ON_MISSING, defaults.missing_record),
        }
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr<Err = String> + core::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            tracing::warn!("{key}: {err}; falling back to {default:?}");
            default
        }),
    }
}
