//! Per-call playback options.

use bridge_traits::audio::OnEnd;
use std::fmt;
use std::sync::Arc;

/// Options for [`AudioManager::play_sound_with`](crate::AudioManager::play_sound_with).
///
/// `looping` and `on_end` are applied to the handle only when set; leaving
/// them `None` keeps whatever the handle already has.
#[derive(Clone, Default)]
pub struct SoundOptions {
    pub looping: Option<bool>,
    pub on_end: Option<OnEnd>,
    /// Stop every in-flight instance of the same asset first.
    pub restart: bool,
}

impl SoundOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    pub fn on_end<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_end = Some(Arc::new(callback));
        self
    }

    pub fn restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }
}

impl fmt::Debug for SoundOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundOptions")
            .field("looping", &self.looping)
            .field("on_end", &self.on_end.as_ref().map(|_| "Fn()"))
            .field("restart", &self.restart)
            .finish()
    }
}

/// Options for [`AudioManager::play_music_with`](crate::AudioManager::play_music_with).
#[derive(Clone, Default)]
pub struct MusicOptions {
    /// Falls back to `AudioSettings::music_loops_by_default` when `None`.
    pub looping: Option<bool>,
    pub on_end: Option<OnEnd>,
    /// Run `stop_all_music` before starting.
    pub stop_all: bool,
}

impl MusicOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    pub fn on_end<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_end = Some(Arc::new(callback));
        self
    }

    pub fn stop_all(mut self, stop_all: bool) -> Self {
        self.stop_all = stop_all;
        self
    }
}

impl fmt::Debug for MusicOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MusicOptions")
            .field("looping", &self.looping)
            .field("on_end", &self.on_end.as_ref().map(|_| "Fn()"))
            .field("stop_all", &self.stop_all)
            .finish()
    }
}
