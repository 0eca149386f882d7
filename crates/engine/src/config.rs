#![forbid(unsafe_code)]

use crate::error::EngineError;
use ck_core::{ErrorDetail, ValidationMode, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path of an optional JSON config file.
pub const ENV_CONFIG: &str = "CHECKLIST_CONFIG";
pub const ENV_STORAGE_ROOT: &str = "CHECKLIST_STORAGE_ROOT";
pub const ENV_VALIDATION_MODE: &str = "CHECKLIST_VALIDATION_MODE";
pub const ENV_ERROR_DETAIL: &str = "CHECKLIST_ERROR_DETAIL";

const DEFAULT_STORAGE_DIR: &str = "data";
const FALLBACK_DIR_NAME: &str = "checklist_data";
const WRITE_PROBE: &str = ".write_probe";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overrides the default `./data` root (database and evidence images).
    pub storage_root: Option<PathBuf>,
    pub validation_mode: ValidationMode,
    pub error_detail: ErrorDetail,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, then the file named by `CHECKLIST_CONFIG`, then per-field env overrides.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let base = match non_empty(lookup(ENV_CONFIG)) {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(&lookup)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            EngineError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            EngineError::Config(format!("failed to parse {}: {err}", path.display()))
        })
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        if let Some(root) = non_empty(lookup(ENV_STORAGE_ROOT)) {
            self.storage_root = Some(PathBuf::from(root));
        }
        if let Some(raw) = non_empty(lookup(ENV_VALIDATION_MODE)) {
            self.validation_mode = ValidationMode::parse(Some(&raw))
                .ok_or_else(|| EngineError::Config(format!("unknown validation mode: {raw}")))?;
        }
        if let Some(raw) = non_empty(lookup(ENV_ERROR_DETAIL)) {
            self.error_detail = ErrorDetail::parse(Some(&raw))
                .ok_or_else(|| EngineError::Config(format!("unknown error detail: {raw}")))?;
        }
        Ok(self)
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy::new(self.validation_mode, self.error_detail)
    }

    /// Explicit root if configured; else `./data` when writable; else a temp directory.
    pub fn resolve_storage_root(&self) -> PathBuf {
        match &self.storage_root {
            Some(root) => root.clone(),
            None => resolve_default_root(Path::new(DEFAULT_STORAGE_DIR), &std::env::temp_dir()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn resolve_default_root(preferred: &Path, temp_dir: &Path) -> PathBuf {
    if is_writable(preferred) {
        return preferred.to_path_buf();
    }
    let fallback = temp_dir.join(FALLBACK_DIR_NAME);
    tracing::warn!(
        preferred = %preferred.display(),
        fallback = %fallback.display(),
        "storage root is not writable, falling back to temp directory"
    );
    fallback
}

fn is_writable(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(WRITE_PROBE);
    let writable = std::fs::write(&probe, b"ok").is_ok();
    let _ = std::fs::remove_file(&probe);
    writable
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_dir(test_name: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = base.join(format!("ck_engine_{test_name}_{pid}_{nonce}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_are_partial_and_aggregate() {
        let config = EngineConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.validation_mode, ValidationMode::PartialAllowed);
        assert_eq!(config.error_detail, ErrorDetail::Aggregate);
    }

    #[test]
    fn env_overrides_file_values() {
        let dir = temp_dir("env_overrides_file_values");
        let file = dir.join("checklist.json");
        std::fs::write(
            &file,
            r#"{"storage_root": "/srv/checklist", "validation_mode": "strict_all"}"#,
        )
        .expect("write config");
        let file_str = file.to_string_lossy().to_string();

        let from_file =
            EngineConfig::from_lookup(lookup(&[(ENV_CONFIG, file_str.as_str())])).expect("config");
        assert_eq!(from_file.storage_root, Some(PathBuf::from("/srv/checklist")));
        assert_eq!(from_file.validation_mode, ValidationMode::StrictAll);
        assert_eq!(from_file.error_detail, ErrorDetail::Aggregate);

        let overridden = EngineConfig::from_lookup(lookup(&[
            (ENV_CONFIG, file_str.as_str()),
            (ENV_STORAGE_ROOT, " /tmp/other "),
            (ENV_VALIDATION_MODE, "partial"),
            (ENV_ERROR_DETAIL, "per_item"),
        ]))
        .expect("config");
        assert_eq!(overridden.storage_root, Some(PathBuf::from("/tmp/other")));
        assert_eq!(overridden.validation_mode, ValidationMode::PartialAllowed);
        assert_eq!(overridden.error_detail, ErrorDetail::PerItem);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = EngineConfig::from_lookup(lookup(&[(ENV_VALIDATION_MODE, "lenient")]))
            .expect_err("unknown mode");
        assert!(matches!(err, EngineError::Config(_)), "got {err:?}");

        let dir = temp_dir("bad_values_are_config_errors");
        let file = dir.join("broken.json");
        std::fs::write(&file, "{").expect("write");
        let err = EngineConfig::load_file(&file).expect_err("broken file");
        assert!(matches!(err, EngineError::Config(_)), "got {err:?}");
    }

    #[test]
    fn unwritable_default_root_falls_back_to_temp() {
        let dir = temp_dir("unwritable_default_root_falls_back_to_temp");
        let blocker = dir.join("data");
        std::fs::write(&blocker, b"not a directory").expect("write blocker");

        let resolved = resolve_default_root(&blocker, &dir);
        assert_eq!(resolved, dir.join(FALLBACK_DIR_NAME));

        let writable = dir.join("writable");
        assert_eq!(resolve_default_root(&writable, &dir), writable);
        assert!(!writable.join(WRITE_PROBE).exists());
    }

    #[test]
    fn explicit_root_is_used_as_is() {
        let config = EngineConfig {
            storage_root: Some(PathBuf::from("/mnt/evidence")),
            ..EngineConfig::default()
        };
        assert_eq!(config.resolve_storage_root(), PathBuf::from("/mnt/evidence"));
    }
}
