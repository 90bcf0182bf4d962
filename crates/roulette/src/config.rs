use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use wheelkit::{DEFAULT_DURATION, Variant, WheelOptions};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Which wheel is mounted at startup.
    pub variant: Variant,
    pub duration_ms: u64,
    /// Initial state of live label updates on the extended wheel.
    pub live_labels: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Normal,
            duration_ms: DEFAULT_DURATION.as_millis() as u64,
            live_labels: true,
        }
    }
}

impl WheelConfig {
    pub fn options(&self) -> WheelOptions {
        WheelOptions {
            duration: Duration::from_millis(self.duration_ms),
            live_labels: self.live_labels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    pub wheel_face: Option<PathBuf>,
    pub stopper: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font: String,
    pub size: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font: "Sans".to_string(),
            size: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub label: LabelConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "wheelkit", "roulette").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    load_from(config::File::from(config_path).required(false), environment())
}

/// `ROULETTE_WHEEL__DURATION_MS=3000` overrides `wheel.duration_ms`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("ROULETTE")
        .prefix_separator("_")
        .separator("__")
}

fn load_from<F>(file: F, env: config::Environment) -> Result<Config, ConfigError>
where
    F: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

/// What a reload changed, as far as the mounted wheel is concerned. Label
/// settings are read on every frame and need no tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigChanges {
    pub variant: Option<Variant>,
    pub live_labels: Option<bool>,
    pub duration: Option<Duration>,
    pub assets: bool,
}

impl ConfigChanges {
    pub fn between(old: &Config, new: &Config) -> Self {
        fn changed<T: PartialEq>(old: T, new: T) -> Option<T> {
            (old != new).then_some(new)
        }

        Self {
            variant: changed(old.wheel.variant, new.wheel.variant),
            live_labels: changed(old.wheel.live_labels, new.wheel.live_labels),
            duration: changed(old.wheel.duration_ms, new.wheel.duration_ms)
                .map(Duration::from_millis),
            assets: old.assets != new.assets,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to the default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_deserialization() {
        let cases = vec![
            ("\"normal\"", Variant::Normal),
            ("\"Normal\"", Variant::Normal),
            ("\"EXTENDED\"", Variant::Extended),
            ("\"live\"", Variant::Extended),
            ("\"base\"", Variant::Normal),
        ];

        for (json, expected) in cases {
            let deserialized: Variant = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "wheel": { "variant": "extended", "duration_ms": 3000 } }"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.wheel.variant, Variant::Extended);
        assert_eq!(parsed.wheel.duration_ms, 3000);
        assert!(parsed.wheel.live_labels);
        assert_eq!(parsed.label, LabelConfig::default());
        assert_eq!(parsed.assets.wheel_face, None);

        let options = parsed.wheel.options();
        assert_eq!(options.duration, Duration::from_millis(3000));
    }

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    fn default_file() -> config::File<config::FileSourceString, config::FileFormat> {
        config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml)
    }

    #[test]
    fn test_env_overrides_use_single_underscore_prefix() {
        let env = env_with(&[
            ("ROULETTE_WHEEL__DURATION_MS", "2000"),
            ("ROULETTE_WHEEL__VARIANT", "extended"),
            ("ROULETTE_LABEL__FONT", "Serif"),
        ]);
        let config = load_from(default_file(), env).unwrap();

        assert_eq!(config.wheel.duration_ms, 2000);
        assert_eq!(config.wheel.variant, Variant::Extended);
        assert_eq!(config.label.font, "Serif");
        assert!(config.wheel.live_labels);
    }

    #[test]
    fn test_unrelated_env_is_ignored() {
        let env = env_with(&[("ROULETTEWHEEL__DURATION_MS", "2000"), ("HOME", "/root")]);
        let config = load_from(default_file(), env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_changes() {
        let old = Config::default();
        assert!(ConfigChanges::between(&old, &old).is_empty());

        let mut new = old.clone();
        new.wheel.variant = Variant::Extended;
        new.wheel.live_labels = false;
        new.wheel.duration_ms = 1500;
        new.label.size = 24.0;

        let changes = ConfigChanges::between(&old, &new);
        assert_eq!(changes.variant, Some(Variant::Extended));
        assert_eq!(changes.live_labels, Some(false));
        assert_eq!(changes.duration, Some(Duration::from_millis(1500)));
        assert!(!changes.assets);

        new.assets.stopper = Some(PathBuf::from("/opt/stopper.png"));
        assert!(ConfigChanges::between(&old, &new).assets);
    }
}
