//! Mutable manager state.

use bridge_traits::audio::PlaybackId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the manager remembers between calls.
///
/// One instance lives inside each [`AudioManager`](crate::AudioManager);
/// [`AudioManager::state`](crate::AudioManager::state) hands out copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerState {
    /// Last value passed to `set_volume`. Not a master gain.
    pub volume: f32,
    pub muted_sound: bool,
    pub muted_music: bool,
    /// Hard override suppressing sound effects regardless of mute.
    pub prevent_sounds: bool,
    /// The single "current" music slot, kept while muted.
    pub current_music_name: Option<String>,
    /// Loop flag of the most recent `play_music`, recorded even when muted.
    pub music_loop: bool,
    /// True only while the current track's handle started successfully.
    pub is_playing_music: bool,
    pub saved_mute_sound: bool,
    pub saved_mute_music: bool,
    pub hidden: bool,
    /// Bumped by every `play_music`; lets a bulk stop spare a track started
    /// from inside one of its own callbacks.
    #[serde(skip)]
    pub(crate) music_generation: u64,
    /// Instances started by `play_music` that no stop has covered yet.
    #[serde(skip)]
    pub(crate) music_instances: HashMap<String, Vec<PlaybackId>>,
}

impl ManagerState {
    pub(crate) fn new(volume: f32, muted_sound: bool, muted_music: bool, music_loop: bool) -> Self {
        Self {
            volume,
            muted_sound,
            muted_music,
            prevent_sounds: false,
            current_music_name: None,
            music_loop,
            is_playing_music: false,
            saved_mute_sound: false,
            saved_mute_music: false,
            hidden: false,
            music_generation: 0,
            music_instances: HashMap::new(),
        }
    }

    /// Whether sound effects are currently dropped.
    pub fn sounds_suppressed(&self) -> bool {
        self.muted_sound || self.prevent_sounds
    }
}
