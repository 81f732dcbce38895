// LogViewer - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::SourceTag;
use crate::platform::backend::{normalise_base_url, BackendSettings};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for LogViewer configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logviewer/ or %APPDATA%\LogViewer\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[backend]` section.
    pub backend: BackendSection,
    /// `[search]` section.
    pub search: SearchSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[backend]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct BackendSection {
    /// Base URL of the log server.
    pub base_url: Option<String>,
    /// Use the older `/fs/ls_files` listing endpoint.
    pub legacy_listing: Option<bool>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[search]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Source tag selected at startup.
    pub default_source: Option<String>,
    /// Initial value of the count field.
    pub default_count: Option<u32>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Backend --
    pub base_url: String,
    pub legacy_listing: bool,
    pub timeout_secs: u64,

    // -- Search --
    pub default_source: SourceTag,
    pub default_count: u32,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            legacy_listing: false,
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            default_source: SourceTag::default(),
            default_count: constants::DEFAULT_COUNT,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Connection settings for the HTTP backend.
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.base_url.clone(),
            legacy_listing: self.legacy_listing,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Load and validate config.toml at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults plus a warning, so the application
/// still starts but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw(config_path) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

fn read_raw(config_path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source,
    })
}

/// Warning text for a numeric value outside its allowed range.
fn out_of_range(field: &str, value: impl ToString, expected: String, default: impl ToString) -> String {
    let e = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{e}. Using default ({}).", default.to_string())
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Backend: base_url --
    // Same rules as the HTTP client.
    if let Some(url) = raw.backend.base_url {
        match normalise_base_url(&url) {
            Ok(normalised) => config.base_url = normalised,
            Err(e) => warnings.push(format!(
                "[backend] base_url: {e}. Using default ({}).",
                constants::DEFAULT_BASE_URL,
            )),
        }
    }

    // -- Backend: legacy_listing --
    if let Some(legacy) = raw.backend.legacy_listing {
        config.legacy_listing = legacy;
    }

    // -- Backend: timeout_secs --
    if let Some(secs) = raw.backend.timeout_secs {
        if (constants::MIN_TIMEOUT_SECS..=constants::MAX_TIMEOUT_SECS).contains(&secs) {
            config.timeout_secs = secs;
        } else {
            warnings.push(out_of_range(
                "backend.timeout_secs",
                secs,
                format!("{}-{}", constants::MIN_TIMEOUT_SECS, constants::MAX_TIMEOUT_SECS),
                constants::DEFAULT_TIMEOUT_SECS,
            ));
        }
    }

    // -- Search: default_source --
    if let Some(tag) = raw.search.default_source {
        match SourceTag::new(tag) {
            Ok(tag) => config.default_source = tag,
            Err(e) => warnings.push(format!(
                "[search] default_source: {e}. Using default ({}).",
                constants::DEFAULT_SOURCE,
            )),
        }
    }

    // -- Search: default_count --
    if let Some(count) = raw.search.default_count {
        if count <= constants::MAX_COUNT {
            config.default_count = count;
        } else {
            warnings.push(out_of_range(
                "search.default_count",
                count,
                format!("0-{}", constants::MAX_COUNT),
                constants::DEFAULT_COUNT,
            ));
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(out_of_range(
                "ui.font_size",
                size,
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, content).expect("write config");
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
        assert_eq!(config.default_source.as_str(), "v3");
        assert_eq!(config.timeout_secs, constants::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_valid_config_applied() {
        let (_dir, path) = write_config(
            r#"
            [backend]
            base_url = "http://logs.example:9000"
            legacy_listing = true
            timeout_secs = 5

            [search]
            default_source = "v1"
            default_count = 0

            [ui]
            theme = "Light"
            font_size = 12.0

            [logging]
            level = "DEBUG"
            "#,
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.base_url, "http://logs.example:9000");
        assert!(config.legacy_listing);
        assert_eq!(config.backend_settings().timeout, Duration::from_secs(5));
        assert_eq!(config.default_source.as_str(), "v1");
        assert_eq!(config.default_count, 0);
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 12.0);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let (_dir, path) = write_config(
            r#"
            [backend]
            base_url = "localhost:5000"
            timeout_secs = 0

            [search]
            default_source = "../admin"

            [ui]
            theme = "solarized"
            "#,
        );
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 4, "warnings: {warnings:?}");
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, constants::DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.default_source.as_str(), constants::DEFAULT_SOURCE);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_base_url_without_host_or_with_query_falls_back() {
        for bad in ["http://", "http://host?x=1", "https://#frag"] {
            let (_dir, path) = write_config(&format!("[backend]\nbase_url = \"{bad}\"\n"));
            let (config, warnings) = load_config(&path);
            assert_eq!(warnings.len(), 1, "{bad:?}: {warnings:?}");
            assert!(warnings[0].contains("base_url"), "{}", warnings[0]);
            assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
            // Whatever config hands over must be accepted by the client.
            assert!(
                crate::platform::backend::HttpBackend::new(&config.backend_settings()).is_ok(),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalised() {
        let (_dir, path) = write_config("[backend]\nbase_url = \" http://logs:5000/ \"\n");
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.base_url, "http://logs:5000");
    }

    #[test]
    fn test_unparseable_file_warns() {
        let (_dir, path) = write_config("[backend\nbase_url = ");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to parse"));
        assert_eq!(config.base_url, constants::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_out_of_range_warning_names_field() {
        let (_dir, path) = write_config("[ui]\nfont_size = 99.0\n");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ui.font_size"), "{}", warnings[0]);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
    }
}
