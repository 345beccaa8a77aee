use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use wheelkit::anim::Ease;
use wheelkit::colors::{HexColor, SliceColors};
use wheelkit::sequence::{DEFAULT_SETTLE_DELAY, DEFAULT_SPIN_DURATION, SpinTimings};
use wheelkit::store::{JsonFileStore, StoreError};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub settle_delay_ms: u64,
    pub spin_duration_ms: u64,
    pub easing: Ease,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            spin_duration_ms: DEFAULT_SPIN_DURATION.as_millis() as u64,
            easing: Ease::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub title: String,
    pub colors: Vec<HexColor>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            title: "Decision Wheel".to_string(),
            colors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SoundConfig {
    pub add: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PointerConfig {
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    pub fn timings(&self) -> SpinTimings {
        SpinTimings {
            settle_delay: Duration::from_millis(self.timing.settle_delay_ms),
            spin_duration: Duration::from_millis(self.timing.spin_duration_ms),
        }
    }

    pub fn slice_colors(&self) -> SliceColors {
        SliceColors::new(self.wheel.colors.clone())
    }

    pub fn open_store(&self) -> Result<JsonFileStore, StoreError> {
        match &self.storage.path {
            Some(path) => Ok(JsonFileStore::new(path)),
            None => JsonFileStore::open_default(),
        }
    }
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
        ProjectDirs::from("org", "dudu", "spinwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SPINWHEEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

/// Writes the commented default config unless one already exists. Returns
/// the config path either way.
pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Returns whether a new file was written; an existing config is left alone.
pub fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether `event` means the file at `config_path` needs re-reading.
pub fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    let edits = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    edits && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] whenever config.toml changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Not watching config: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Cannot create {} to watch it: {}", config_dir.display(), e);
        return;
    }

    // notify calls back on its own thread; hop onto the async side
    let (notify_tx, notify_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = notify_tx.send_blocking(res);
        },
        notify::Config::default(),
    );
    let mut watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config watcher unavailable: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Cannot watch {}: {}", config_dir.display(), e);
        return;
    }
    log::debug!("Watching {} for config changes", config_path.display());

    while let Ok(res) = notify_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Config watch error: {}", e);
                continue;
            }
        };
        if is_config_change(&event, &config_path)
            && tx.send(AppEvent::ConfigReload).await.is_err()
        {
            // the window is gone
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.timings(), defaults.timings());
        assert_eq!(parsed.timing.easing, Ease::Ease);
        assert_eq!(parsed.wheel.title, defaults.wheel.title);
        assert_eq!(parsed.slice_colors(), SliceColors::default());
        assert!(parsed.sound.add.is_none());
        assert!(parsed.pointer.image.is_none());
        assert!(parsed.storage.path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let parsed = parse_config(
            r##"
            [timing]
            spin_duration_ms = 2500
            easing = "ease-out"

            [wheel]
            colors = ["#000000", "#ffffff"]

            [storage]
            path = "/tmp/lunch.json"
            "##,
        )
        .unwrap();

        assert_eq!(parsed.timings().settle_delay, DEFAULT_SETTLE_DELAY);
        assert_eq!(parsed.timings().spin_duration, Duration::from_millis(2500));
        assert_eq!(parsed.timing.easing, Ease::EaseOut);
        assert_eq!(parsed.slice_colors().len(), 2);
        assert_eq!(parsed.wheel.title, "Decision Wheel");
        assert_eq!(
            parsed.open_store().unwrap().path(),
            std::path::Path::new("/tmp/lunch.json")
        );
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(parse_config("[timing]\neasing = \"wobbly\"").is_err());
        assert!(parse_config("[wheel]\ncolors = [\"#nothex\"]").is_err());
    }

    #[test]
    fn test_empty_config() {
        let parsed = parse_config("").unwrap();
        assert_eq!(parsed.timings(), SpinTimings::default());
        assert_eq!(parsed.slice_colors().len(), 14);
    }

    #[test]
    fn test_timing_deserialization() {
        let timing: TimingConfig =
            serde_json::from_str(r#"{"settle_delay_ms": 50, "easing": "LINEAR"}"#).unwrap();
        assert_eq!(timing.settle_delay_ms, 50);
        assert_eq!(timing.spin_duration_ms, 6000);
        assert_eq!(timing.easing, Ease::Linear);
    }

    fn scratch_dir() -> PathBuf {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        std::env::temp_dir().join(format!(
            "spinwheel_config_{}_{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ))
    }

    #[test]
    fn test_write_default_config_once() {
        let path = scratch_dir().join("nested").join("config.toml");

        assert!(write_default_config_to(&path).unwrap());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "[wheel]\ntitle = \"Lunch\"\n").unwrap();
        assert!(!write_default_config_to(&path).unwrap());
        let kept = fs_err::read_to_string(&path).unwrap();
        assert_eq!(parse_config(&kept).unwrap().wheel.title, "Lunch");
    }

    #[test]
    fn test_config_change_filter() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let config_path = PathBuf::from("/cfg/spinwheel/config.toml");
        let event = |kind, path: &str| notify::Event::new(kind).add_path(PathBuf::from(path));

        assert!(is_config_change(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/spinwheel/config.toml"),
            &config_path
        ));
        assert!(is_config_change(
            &event(EventKind::Create(CreateKind::File), "/cfg/spinwheel/config.toml"),
            &config_path
        ));
        assert!(!is_config_change(
            &event(EventKind::Modify(ModifyKind::Any), "/cfg/spinwheel/other.toml"),
            &config_path
        ));
        assert!(!is_config_change(
            &event(EventKind::Access(AccessKind::Any), "/cfg/spinwheel/config.toml"),
            &config_path
        ));
    }
}
