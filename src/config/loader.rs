use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::{EngineConfig, SmellThresholds};

pub const CONFIG_FILE_NAME: &str = ".debtlens.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<EngineConfig, String> {
    let mut config = toml::from_str::<EngineConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.thresholds.validate() {
        tracing::warn!("Invalid smell thresholds: {}. Using defaults.", e);
        config.thresholds = SmellThresholds::default();
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<EngineConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load an explicit config file, falling back to defaults when it is
/// missing or malformed.
pub fn load_config_from(path: &Path) -> EngineConfig {
    try_load_config_from_path(path).unwrap_or_else(|| {
        tracing::debug!("No usable config at {}. Using defaults.", path.display());
        EngineConfig::default()
    })
}

/// Search the working directory and its ancestors for `.debtlens.toml`.
pub fn load_config() -> EngineConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return EngineConfig::default();
        }
    };

    find_config_from(current)
}

pub(crate) fn find_config_from(start: PathBuf) -> EngineConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            EngineConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[thresholds]
length_medium = 25
params_high = 7

[debt]
minutes_per_finding = 30

[suggestions]
max_suggestions = 5
"#;
        let config = parse_and_validate_config(contents).unwrap();
        assert_eq!(config.thresholds.length_medium, 25);
        assert_eq!(config.thresholds.params_high, 7);
        assert_eq!(config.debt.minutes_per_finding, 30);
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.suggestions.min_function_lines, 10);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_thresholds_fall_back() {
        let contents = "[thresholds]\nnesting_medium = 9\n";
        let config = parse_and_validate_config(contents).unwrap();
        assert_eq!(config.thresholds, SmellThresholds::default());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = parse_and_validate_config("[thresholds\nbroken").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_directory_ancestors_limit() {
        let start = PathBuf::from("/a/b/c/d");
        let dirs: Vec<PathBuf> = directory_ancestors(start, 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn test_find_config_in_parent_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("pkg").join("module");
        fs::create_dir_all(&nested).unwrap();

        let mut file = fs::File::create(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        writeln!(file, "[debt]\nminutes_per_finding = 20").unwrap();

        let config = find_config_from(nested);
        assert_eq!(config.debt.minutes_per_finding, 20);
    }

    #[test]
    fn test_load_missing_explicit_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(&temp.path().join("absent.toml"));
        assert_eq!(config, EngineConfig::default());
    }
}
