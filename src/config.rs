use dial::geometry::{DisplayConfig, Size};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Host-side settings: screen layout and runtime plumbing. User preferences
/// (colours, alerts, ...) live in the preference store instead.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub screen: Size,
    pub ring_radius: i32,
    pub label_box: Size,
    pub reveal_seconds: u64,
    pub socket_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen: Size::new(144, 168),
            ring_radius: 125,
            label_box: Size::new(40, 30),
            reveal_seconds: 4,
            socket_path: PathBuf::from("/tmp/macroclock.sock"),
        }
    }
}

/// Accepted ring radius and screen/label dimensions, in pixels.
pub const PIXEL_RANGE: RangeInclusive<i32> = 1..=4096;

impl Config {
    /// Replaces out-of-range layout values with their defaults, logging each
    /// one.
    pub fn validated(self) -> Self {
        let defaults = Self::default();

        let ring_radius = if PIXEL_RANGE.contains(&self.ring_radius) {
            self.ring_radius
        } else {
            log::error!(
                "ring_radius {} outside {:?}, using {}",
                self.ring_radius,
                PIXEL_RANGE,
                defaults.ring_radius
            );
            defaults.ring_radius
        };

        Self {
            ring_radius,
            screen: valid_size("screen", self.screen, defaults.screen),
            label_box: valid_size("label_box", self.label_box, defaults.label_box),
            ..self
        }
    }

    /// Layout part of the display config. The hour notation is a user
    /// preference and is left at its default here.
    pub fn layout(&self) -> DisplayConfig {
        DisplayConfig {
            use_24h: false,
            ring_radius: self.ring_radius,
            screen_center: self.screen.center(),
            label_box: self.label_box,
        }
    }

    pub fn reveal_after(&self) -> Duration {
        Duration::from_secs(self.reveal_seconds)
    }
}

fn valid_size(name: &str, size: Size, default: Size) -> Size {
    if PIXEL_RANGE.contains(&size.width) && PIXEL_RANGE.contains(&size.height) {
        size
    } else {
        log::error!(
            "{} {}x{} outside {:?}, using {}x{}",
            name,
            size.width,
            size.height,
            PIXEL_RANGE,
            default.width,
            default.height
        );
        default
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

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("org", "macroclock", "macroclock").ok_or(ConfigError::ConfigDirNotFound)
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn get_store_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().join("preferences.json"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("MACROCLOCK"))
        .build()?;

    Ok(s.try_deserialize::<Config>()?.validated())
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
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
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
