//! In-memory audio asset table.

use bridge_traits::audio::{AudioAssetProvider, AudioHandle};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Asset table keyed by logical audio name.
///
/// Hosts register handles as their loader finishes decoding each clip. The
/// table is the single inventory the audio manager consults for bulk stop
/// operations, so every playable asset should be registered here.
#[derive(Default)]
pub struct AssetTable {
    audio: RwLock<HashMap<String, Arc<dyn AudioHandle>>>,
}

impl AssetTable {
    /// Create an empty asset table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handle for `name`.
    pub fn insert(&self, name: impl Into<String>, handle: Arc<dyn AudioHandle>) {
        let name = name.into();
        debug!(name = %name, "Registering audio asset");
        self.audio.write().insert(name, handle);
    }

    /// Remove the handle for `name`, returning it if present.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn AudioHandle>> {
        self.audio.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.audio.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.audio.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.read().is_empty()
    }
}

impl AudioAssetProvider for AssetTable {
    fn get_audio(&self, name: &str) -> Option<Arc<dyn AudioHandle>> {
        self.audio.read().get(name).cloned()
    }

    fn audio_assets(&self) -> Vec<(String, Arc<dyn AudioHandle>)> {
        self.audio
            .read()
            .iter()
            .map(|(name, handle)| (name.clone(), Arc::clone(handle)))
            .collect()
    }
}

impl std::fmt::Debug for AssetTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let audio = self.audio.read();
        let mut names: Vec<&String> = audio.keys().collect();
        names.sort();
        f.debug_struct("AssetTable").field("audio", &names).finish()
    }
}
