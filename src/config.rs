use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::autosave::{AutoSaveConfig, OverlapPolicy};

/// Environment variable holding the blog service base URL.
pub const API_URL_ENV: &str = "BLOGCRAFT_API_URL";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Flags as they appear in a flags file, the environment or on the command
/// line. Unset values fall through to the next layer down.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub api_url: Option<String>,
    pub theme: Option<ThemeMode>,
    pub autosave_interval_ms: Option<u64>,
    pub autosave_debounce_ms: Option<u64>,
    /// A switch with no "off" form: once any layer sets it, it stays set.
    /// `--clear` drops a saved one.
    pub autosave_unguarded: bool,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Layer `other` over `self`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            api_url: other.api_url.clone().or_else(|| self.api_url.clone()),
            theme: other.theme.or(self.theme),
            autosave_interval_ms: other.autosave_interval_ms.or(self.autosave_interval_ms),
            autosave_debounce_ms: other.autosave_debounce_ms.or(self.autosave_debounce_ms),
            autosave_unguarded: self.autosave_unguarded || other.autosave_unguarded,
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub theme: ThemeMode,
    pub autosave: AutoSaveConfig,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&ConfigFlags::default())
    }
}

impl Settings {
    pub fn resolve(flags: &ConfigFlags) -> Self {
        let defaults = AutoSaveConfig::default();
        let autosave = AutoSaveConfig {
            interval: flags
                .autosave_interval_ms
                .map_or(defaults.interval, Duration::from_millis),
            debounce: flags
                .autosave_debounce_ms
                .map_or(defaults.debounce, Duration::from_millis),
            policy: if flags.autosave_unguarded {
                OverlapPolicy::Unguarded
            } else {
                OverlapPolicy::SingleFlight
            },
        };
        Self {
            api_url: flags
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            theme: flags.theme.unwrap_or_default(),
            autosave,
            timeout: flags.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            log_file: flags.log_file.clone(),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("blogcraft").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("blogcraft")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("blogcraft").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("blogcraft")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".blogcraftrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` as the defaults file at `path`.
///
/// # Errors
/// Fails when a value contains whitespace, since flags files are split on
/// whitespace and the value would not load back intact, or when the file
/// cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    if let Some(url) = &flags.api_url {
        ensure_single_token("--api-url", url)?;
    }
    if let Some(log_file) = &flags.log_file {
        ensure_single_token("--log-file", &log_file.to_string_lossy())?;
    }
    let mut lines = vec!["# blogcraft defaults (saved with --save)".to_string()];
    if let Some(url) = &flags.api_url {
        lines.push(format!("--api-url {url}"));
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(ms) = flags.autosave_interval_ms {
        lines.push(format!("--autosave-interval {ms}"));
    }
    if let Some(ms) = flags.autosave_debounce_ms {
        lines.push(format!("--autosave-debounce {ms}"));
    }
    if flags.autosave_unguarded {
        lines.push("--autosave-unguarded".to_string());
    }
    if let Some(secs) = flags.timeout_secs {
        lines.push(format!("--timeout {secs}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

fn ensure_single_token(flag: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_whitespace) {
        anyhow::bail!("Cannot save {flag} {value:?}: config values cannot contain spaces");
    }
    Ok(())
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list. Unknown tokens and malformed values
/// are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--autosave-unguarded" {
            flags.autosave_unguarded = true;
            i += 1;
            continue;
        }
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token, None),
        };
        if !is_valued_flag(name) {
            i += 1;
            continue;
        }
        let value = match inline {
            Some(value) => value,
            None => match tokens.get(i + 1) {
                Some(next) => {
                    i += 1;
                    next.clone()
                }
                None => break,
            },
        };
        apply_flag(&mut flags, name, &value);
        i += 1;
    }
    flags
}

fn is_valued_flag(name: &str) -> bool {
    matches!(
        name,
        "--api-url"
            | "--theme"
            | "--autosave-interval"
            | "--autosave-debounce"
            | "--timeout"
            | "--log-file"
    )
}

fn apply_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--api-url" => flags.api_url = Some(value.to_string()),
        "--theme" => flags.theme = parse_theme(value),
        "--autosave-interval" => flags.autosave_interval_ms = value.parse().ok(),
        "--autosave-debounce" => flags.autosave_debounce_ms = value.parse().ok(),
        "--timeout" => flags.timeout_secs = value.parse().ok(),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

/// Flags taken from the environment via `lookup`.
pub fn env_flags_with(lookup: impl Fn(&str) -> Option<String>) -> ConfigFlags {
    ConfigFlags {
        api_url: lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()),
        ..ConfigFlags::default()
    }
}

/// Flags taken from the process environment (after `.env` is loaded).
pub fn env_flags() -> ConfigFlags {
    env_flags_with(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "blogcraft".to_string(),
            "--api-url".to_string(),
            "http://blog.test/api".to_string(),
            "--theme".to_string(),
            "light".to_string(),
            "--autosave-interval=60000".to_string(),
            "--autosave-unguarded".to_string(),
            "--log-file".to_string(),
            "blogcraft.log".to_string(),
            "edit".to_string(),
            "7".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.api_url.as_deref(), Some("http://blog.test/api"));
        assert_eq!(flags.theme, Some(ThemeMode::Light));
        assert_eq!(flags.autosave_interval_ms, Some(60_000));
        assert!(flags.autosave_unguarded);
        assert_eq!(flags.log_file, Some(PathBuf::from("blogcraft.log")));
        assert_eq!(flags.autosave_debounce_ms, None);
    }

    #[test]
    fn test_malformed_numbers_are_ignored() {
        let args = vec!["--timeout".to_string(), "soon".to_string()];
        assert_eq!(parse_flag_tokens(&args).timeout_secs, None);
    }

    #[test]
    fn test_config_union_prefers_upper_layer() {
        let file = ConfigFlags {
            api_url: Some("http://file/api".into()),
            theme: Some(ThemeMode::Light),
            timeout_secs: Some(5),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            autosave_unguarded: true,
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.api_url.as_deref(), Some("http://file/api"));
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.timeout_secs, Some(5));
        assert!(merged.autosave_unguarded);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.autosave, AutoSaveConfig::default());
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_settings_resolve_autosave() {
        let settings = Settings::resolve(&ConfigFlags {
            autosave_interval_ms: Some(1_000),
            autosave_debounce_ms: Some(200),
            autosave_unguarded: true,
            ..ConfigFlags::default()
        });
        assert_eq!(settings.autosave.interval, Duration::from_secs(1));
        assert_eq!(settings.autosave.debounce, Duration::from_millis(200));
        assert_eq!(settings.autosave.policy, OverlapPolicy::Unguarded);
    }

    #[test]
    fn test_env_flags_ignore_blank_url() {
        let flags = env_flags_with(|_| Some("  ".to_string()));
        assert_eq!(flags.api_url, None);
        let flags = env_flags_with(|key| (key == API_URL_ENV).then(|| "http://env/api".into()));
        assert_eq!(flags.api_url.as_deref(), Some("http://env/api"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            api_url: Some("http://blog.test/api".into()),
            theme: Some(ThemeMode::Light),
            autosave_interval_ms: Some(10_000),
            autosave_debounce_ms: Some(2_000),
            autosave_unguarded: true,
            timeout_secs: Some(30),
            log_file: Some(PathBuf::from("blogcraft.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_save_rejects_values_with_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        let flags = ConfigFlags {
            log_file: Some(PathBuf::from("my logs/blogcraft.log")),
            ..ConfigFlags::default()
        };
        let err = save_config_flags(&path, &flags).unwrap_err();
        assert!(err.to_string().contains("--log-file"));
        assert!(!path.exists(), "nothing is written");

        let flags = ConfigFlags {
            api_url: Some("http://blog.test/a b".into()),
            ..ConfigFlags::default()
        };
        assert!(save_config_flags(&path, &flags).is_err());
    }

    #[test]
    fn test_unguarded_cannot_be_turned_off_by_upper_layer() {
        let file = ConfigFlags {
            autosave_unguarded: true,
            ..ConfigFlags::default()
        };
        assert!(file.union(&ConfigFlags::default()).autosave_unguarded);
    }
}
