use crate::config::AssetConfig;
use gdk_pixbuf::Pixbuf;
use gtk4::gio;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum AssetKey {
    WheelFace,
    Stopper,
}

impl AssetKey {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::WheelFace => "wheel.png",
            Self::Stopper => "stopper.png",
        }
    }

    fn configured(self, config: &AssetConfig) -> Option<PathBuf> {
        match self {
            Self::WheelFace => config.wheel_face.clone(),
            Self::Stopper => config.stopper.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("No {0} texture found")]
    NotFound(AssetKey),
    #[error("Failed to read {key} from {}: {source}", .path.display())]
    Read {
        key: AssetKey,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {0}: {1}")]
    Decode(AssetKey, glib::Error),
}

/// File contents by path, shared by every wheel mounted in this process, so
/// swapping variants does not hit the disk again.
static CACHE: OnceLock<RwLock<HashMap<PathBuf, Arc<[u8]>>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<PathBuf, Arc<[u8]>>> {
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Raw asset bytes; decoding into textures happens on the GTK thread.
#[derive(Debug, Default)]
pub struct AssetBundle {
    pub bytes: HashMap<AssetKey, Arc<[u8]>>,
    pub failures: Vec<AssetError>,
}

pub async fn load(config: &AssetConfig) -> AssetBundle {
    let mut bundle = AssetBundle::default();
    for key in AssetKey::iter() {
        match load_one(key, config).await {
            Ok(bytes) => {
                bundle.bytes.insert(key, bytes);
            }
            Err(e) => bundle.failures.push(e),
        }
    }
    bundle
}

async fn load_one(key: AssetKey, config: &AssetConfig) -> Result<Arc<[u8]>, AssetError> {
    let path = resolve_path(key, config).ok_or(AssetError::NotFound(key))?;

    let cached = cache().read().get(&path).cloned();
    if let Some(bytes) = cached {
        log::debug!("{} served from cache", key);
        return Ok(bytes);
    }

    let bytes: Arc<[u8]> = tokio::fs::read(&path)
        .await
        .map_err(|source| AssetError::Read {
            key,
            path: path.clone(),
            source,
        })?
        .into();
    log::debug!("{} loaded from {}", key, path.display());
    cache().write().insert(path, bytes.clone());
    Ok(bytes)
}

/// A configured path wins; otherwise the XDG data directories are searched.
pub fn resolve_path(key: AssetKey, config: &AssetConfig) -> Option<PathBuf> {
    key.configured(config).or_else(|| {
        get_data_directories()
            .into_iter()
            .map(|dir| dir.join(key.file_name()))
            .find(|path| path.exists())
    })
}

fn get_data_directories() -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs = Vec::new();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join("roulette"));
    }

    dirs.extend(xdg.get_data_dirs().into_iter().map(|p| p.join("roulette")));
    dirs
}

pub struct Textures {
    pub face: Option<Pixbuf>,
    pub stopper: Option<Pixbuf>,
}

impl Textures {
    pub fn decode(bundle: &AssetBundle) -> Self {
        let decode = |key: AssetKey| {
            let bytes = bundle.bytes.get(&key)?;
            decode_pixbuf(bytes)
                .map_err(|e| log::warn!("{}", AssetError::Decode(key, e)))
                .ok()
        };

        Self {
            face: decode(AssetKey::WheelFace),
            stopper: decode(AssetKey::Stopper),
        }
    }
}

fn decode_pixbuf(bytes: &Arc<[u8]>) -> Result<Pixbuf, glib::Error> {
    let stream = gio::MemoryInputStream::from_bytes(&glib::Bytes::from_owned(bytes.clone()));
    Pixbuf::from_stream(&stream, gio::Cancellable::NONE)
}
