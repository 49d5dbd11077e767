use crate::models::Config;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".debtgate.toml";

/// Load configuration from file or use defaults
///
/// Search order:
/// 1. Custom path if provided via --config
/// 2. .debtgate.toml in current directory
/// 3. ~/.debtgate.toml in home directory
/// 4. Built-in defaults
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    // If custom path provided, use it exclusively
    if let Some(path) = custom_path {
        log::debug!("Loading config from {}", path.display());
        return load_config_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let current_config = PathBuf::from(CONFIG_FILE_NAME);
    if current_config.exists() {
        log::debug!("Loading config from {}", current_config.display());
        return load_config_from_file(&current_config);
    }

    if let Some(home_config) = get_home_config_path() {
        if home_config.exists() {
            log::debug!("Loading config from {}", home_config.display());
            return load_config_from_file(&home_config);
        }
    }

    log::debug!("No config file found, using defaults");
    Ok(Config::default())
}

/// Load config from a specific file
fn load_config_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Get path to home directory config file
fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Save a config to a file, used by `debtgate init`
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Reject configurations the scanner cannot run with
pub fn validate_config(config: &Config) -> Result<()> {
    if config.markers.is_empty() {
        bail!("At least one marker must be configured");
    }

    let normalize = |marker: &str| {
        if config.case_sensitive {
            marker.to_string()
        } else {
            marker.to_lowercase()
        }
    };

    let mut seen: Vec<String> = Vec::with_capacity(config.markers.len());
    for marker in &config.markers {
        if marker.trim().is_empty() {
            bail!("Markers must not be empty");
        }
        let key = normalize(marker);
        if seen.contains(&key) {
            bail!("Duplicate marker: {}", marker);
        }
        seen.push(key);
    }

    if config.extensions.iter().all(|ext| ext.is_empty()) {
        bail!("At least one non-empty file extension must be configured");
    }

    if config.comment_prefix.is_empty() {
        bail!("Comment prefix must not be empty");
    }

    for marker in &config.fail_on {
        if config.find_marker(marker).is_none() {
            bail!(
                "fail_on marker {} is not one of the configured markers {:?}",
                marker,
                config.markers
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_custom_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
root = "../builder"
extensions = [".go", ".rs"]
markers = ["FIXME", "TODO", "HACK"]
fail_on = ["FIXME", "HACK"]
case_sensitive = true
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.root, PathBuf::from("../builder"));
        assert_eq!(config.extensions.len(), 2);
        assert!(config.markers.contains(&"HACK".to_string()));
        assert_eq!(config.fail_on, vec!["FIXME".to_string(), "HACK".to_string()]);
        assert!(config.case_sensitive);
        // unspecified keys keep their defaults
        assert_eq!(config.comment_prefix, "//");
        assert!(!config.trailing_comments);
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_load_missing_custom_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("missing.toml").as_path())).is_err());
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"markers = \"TODO\"").unwrap();
        assert!(load_config_from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = Config::default();

        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config_from_file(temp_file.path()).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_validate_default_config() {
        validate_config(&Config::default()).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_markers() {
        let empty = Config {
            markers: vec![],
            fail_on: vec![],
            ..Config::default()
        };
        assert!(validate_config(&empty).is_err());

        let blank = Config {
            markers: vec!["TODO".to_string(), " ".to_string()],
            fail_on: vec![],
            ..Config::default()
        };
        assert!(validate_config(&blank).is_err());

        let duplicate = Config {
            markers: vec!["TODO".to_string(), "todo".to_string()],
            fail_on: vec![],
            ..Config::default()
        };
        assert!(validate_config(&duplicate).is_err());

        let duplicate_ok = Config {
            case_sensitive: true,
            ..duplicate
        };
        validate_config(&duplicate_ok).unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_fail_on() {
        let config = Config {
            fail_on: vec!["HACK".to_string()],
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("HACK"));
    }

    #[test]
    fn test_validate_accepts_fail_on_in_other_case() {
        let config = Config {
            fail_on: vec!["fixme".to_string()],
            ..Config::default()
        };
        validate_config(&config).unwrap();

        let strict = Config {
            case_sensitive: true,
            ..config
        };
        assert!(validate_config(&strict).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_prefix_and_extensions() {
        let no_prefix = Config {
            comment_prefix: String::new(),
            ..Config::default()
        };
        assert!(validate_config(&no_prefix).is_err());

        let no_extensions = Config {
            extensions: vec![String::new()],
            ..Config::default()
        };
        assert!(validate_config(&no_extensions).is_err());
    }
}
