use anyhow::{bail, Context, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::{ApiSettings, CometConfig};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<CometConfig> {
    if !path.exists() {
        // If config doesn't exist, create a default one
        let config = CometConfig::default();
        save_config(path, &config)?;
        log::info!("Created default configuration at {}", path.display());
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: CometConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(path: &Path, config: &CometConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), BaseDirs::new()) {
        (Ok(rest), Some(dirs)) => dirs.home_dir().join(rest),
        _ => path.to_path_buf(),
    }
}

/// The API key: inline value first, otherwise the trimmed key file.
/// `key_file` replaces `api.key_file` for this lookup only.
pub fn resolve_api_key(api: &ApiSettings, key_file: Option<&Path>) -> Result<String> {
    if let Some(key) = api.api_key.as_deref().map(str::trim) {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    let Some(key_file) = key_file.or(api.key_file.as_deref()) else {
        bail!("No API key configured; set api.api_key or api.key_file");
    };

    let path = expand_home(key_file);
    let key = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read API key file: {}", path.display()))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("API key file is empty: {}", path.display());
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("comet.toml");

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.api.base_url, "https://constelia.ai/api.php");
        assert!(config_path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("test.toml");

        let mut config = CometConfig::default();
        config.settings.auto_save = false;
        config.settings.sidebar_collapsed = true;
        config.settings.features.insert("forum".into(), false);

        save_config(&config_path, &config).unwrap();
        let loaded = load_config(&config_path).unwrap();

        assert_eq!(loaded, config);
        assert!(!loaded.settings.feature("forum"));
        assert!(loaded.settings.feature("perks"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "version = \"0.0.1\"\n[settings]\ntheme = \"dark\"\n").unwrap();

        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded.settings.theme, "dark");
        assert_eq!(loaded.settings.forum_post_count, 10);
        assert_eq!(loaded.api.timeout_seconds, 30);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "version = ").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_resolve_api_key() {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("key.txt");
        fs::write(&key_path, "  secret-key\n").unwrap();

        let mut api = ApiSettings {
            key_file: Some(key_path.clone()),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&api, None).unwrap(), "secret-key");

        api.api_key = Some("inline".into());
        assert_eq!(resolve_api_key(&api, None).unwrap(), "inline");

        api.api_key = Some("   ".into());
        fs::write(&key_path, "\n").unwrap();
        assert!(resolve_api_key(&api, None).is_err());

        assert!(resolve_api_key(&ApiSettings::default(), None).is_err());
    }

    #[test]
    fn test_key_file_override_is_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("comet.toml");
        let key_path = temp_dir.path().join("override.txt");
        fs::write(&key_path, "override-key\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(
            resolve_api_key(&config.api, Some(&key_path)).unwrap(),
            "override-key"
        );

        save_config(&config_path, &config).unwrap();
        let reloaded = load_config(&config_path).unwrap();
        assert_eq!(reloaded.api.key_file, None);
        assert!(!fs::read_to_string(&config_path).unwrap().contains("override.txt"));
    }
}
