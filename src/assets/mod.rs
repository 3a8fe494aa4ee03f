//! Asset catalog for resolving map object names.
//!
//! - [`catalog`] - the [`AssetCatalog`] interface and handle types
//! - [`library`] - [`AssetLibrary`], the manifest-backed implementation

mod catalog;
mod library;

pub use catalog::{
    editor_asset_name, AssetCatalog, MaterialHandle, RenderableHandle, UnknownAssetError,
};
pub use library::{open_asset_manifest, AssetLibrary, AssetManifest, ManifestError};

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded};

/// Message to re-read the asset manifest from disk
#[derive(Message)]
pub struct RefreshAssetLibrary;

pub struct AssetLibraryPlugin;

impl Plugin for AssetLibraryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetLibrary>()
            .add_message::<RefreshAssetLibrary>()
            .add_systems(Startup, init_library_from_config.after(ConfigLoaded))
            .add_systems(
                Update,
                refresh_asset_library.run_if(on_message::<RefreshAssetLibrary>),
            );
    }
}

/// Open the asset manifest named in the config, if any
fn init_library_from_config(config: Res<AppConfig>, mut library: ResMut<AssetLibrary>) {
    let Some(ref path) = config.data.asset_manifest_path else {
        info!("No asset manifest configured, accepting every object name");
        return;
    };

    if !path.exists() {
        warn!("Asset manifest no longer exists: {:?}", path);
        return;
    }

    match open_asset_manifest(&mut library, path) {
        Ok(count) => info!("Loaded {} object names from {:?}", count, path),
        Err(e) => warn!("Failed to open asset manifest: {}", e),
    }
}

fn refresh_asset_library(
    mut events: MessageReader<RefreshAssetLibrary>,
    mut library: ResMut<AssetLibrary>,
) {
    for _ in events.read() {
        let Some(path) = library.manifest_path.clone() else {
            continue;
        };
        match open_asset_manifest(&mut library, &path) {
            Ok(count) => info!("Reloaded {} object names from {:?}", count, path),
            Err(e) => warn!("Failed to reload asset manifest: {}", e),
        }
    }
}
