use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DRAG_SELECT_DEADZONE, MAX_HISTORY_SIZE, MAX_RECENT_MAPS};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Tunables for the editing tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Number of commands kept for undo
    pub history_limit: usize,
    /// Pointer travel in pixels before a click turns into a box selection
    pub drag_select_deadzone: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_limit: MAX_HISTORY_SIZE,
            drag_select_deadzone: DEFAULT_DRAG_SELECT_DEADZONE,
        }
    }
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// JSON manifest listing the object and material names the game provides
    #[serde(default)]
    pub asset_manifest_path: Option<PathBuf>,

    /// Recently opened or saved map scripts, most recent first
    #[serde(default)]
    pub recent_maps: Vec<PathBuf>,

    /// Last opened map file path (not auto-loaded, just remembered for quick access)
    #[serde(default)]
    pub last_map_path: Option<PathBuf>,

    #[serde(default)]
    pub editor: EditorSettings,
}

impl AppConfigData {
    /// Move `path` to the front of the recent list and remember it as the last map.
    pub fn remember_map(&mut self, path: &Path) {
        // Remove if already in list (to move it to front)
        self.recent_maps.retain(|p| p != path);
        self.recent_maps.insert(0, path.to_path_buf());
        self.recent_maps.truncate(MAX_RECENT_MAPS);
        self.last_map_path = Some(path.to_path_buf());
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource recording that the remembered map file is gone
#[derive(Resource, Default)]
pub struct MissingMapWarning {
    pub show: bool,
    pub path: Option<PathBuf>,
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether the reset still needs to be reported
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to set the asset manifest path
#[derive(Message)]
pub struct SetAssetManifestRequest {
    pub path: PathBuf,
}

/// Message to update the last map path (and recent maps) in config
#[derive(Message)]
pub struct UpdateLastMapPathRequest {
    pub path: PathBuf,
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: AppConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config(config_path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        warn!("Config reset to defaults: {}", reason);
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to check if last map exists
fn check_last_map_exists(config: Res<AppConfig>, mut warning: ResMut<MissingMapWarning>) {
    if let Some(ref path) = config.data.last_map_path
        && !path.exists()
    {
        warning.show = true;
        warning.path = Some(path.clone());
        info!("Last opened map no longer exists: {:?}", path);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to set the asset manifest path
fn set_asset_manifest_system(
    mut events: MessageReader<SetAssetManifestRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.asset_manifest_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Set asset manifest to {:?}", event.path);
    }
}

/// System to update last map path
fn update_last_map_path_system(
    mut events: MessageReader<UpdateLastMapPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.remember_map(&event.path);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<MissingMapWarning>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetAssetManifestRequest>()
            .add_message::<UpdateLastMapPathRequest>()
            .add_systems(
                Startup,
                (load_config_system, check_last_map_exists)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    set_asset_manifest_system.run_if(on_message::<SetAssetManifestRequest>),
                    update_last_map_path_system.run_if(on_message::<UpdateLastMapPathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
