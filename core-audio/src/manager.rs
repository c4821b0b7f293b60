//! # Audio Manager
//!
//! Playback controller and mute state machine for sound effects and music.
//!
//! ## Overview
//!
//! The manager is an explicit context object owned by the host: build it once
//! from an [`AudioConfig`] and share it behind an `Arc`. Every operation takes
//! `&self` and returns plain values; failures are logged and published on the
//! event bus, never propagated.
//!
//! ## Re-entrancy
//!
//! Handles may fire `on_end` callbacks synchronously from `stop`, and those
//! callbacks may call back into the manager. To keep that safe:
//!
//! - the state lock is released before any handle is touched;
//! - bulk stops walk a snapshot of the provider's table;
//! - state is updated before the handle call it describes.
//!
//! ## Usage
//!
//! ```ignore
//! use core_audio::{AudioManager, MusicOptions};
//! use core_runtime::config::AudioConfig;
//!
//! let config = AudioConfig::builder().asset_provider(assets).build()?;
//! let audio = AudioManager::new(&config)?;
//!
//! audio.play_music_with("bgm_title", MusicOptions::new().stop_all(true));
//! audio.play_sound("sfx_click");
//! audio.mute_music(true, false);
//! ```

use crate::category::{Category, Classifier};
use crate::error::{AudioError, Result};
use crate::options::{MusicOptions, SoundOptions};
use crate::resolver::AssetResolver;
use crate::state::ManagerState;

use bridge_traits::audio::{AudioHandle, PlaybackId};
use bridge_traits::error::BridgeError;
use bridge_traits::visibility::VisibilitySource;
use core_runtime::config::AudioConfig;
use core_runtime::events::{
    AudioEvent, DiagnosticEvent, EventBus, MusicEvent, MuteChannel, SoundEvent, StateEvent,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Categorizes, mutes, loops and restores audio playback.
pub struct AudioManager {
    resolver: AssetResolver,
    state: Mutex<ManagerState>,
    events: Option<EventBus>,
    visibility_sources: Vec<Arc<dyn VisibilitySource>>,
    music_loops_by_default: bool,
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("state", &*self.state.lock())
            .field("classifier", self.resolver.classifier())
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl AudioManager {
    /// Build a manager from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Config`] if the settings fail validation.
    pub fn new(config: &AudioConfig) -> Result<Self> {
        config.validate()?;

        let settings = &config.settings;
        let resolver = AssetResolver::new(
            Arc::clone(&config.asset_provider),
            Classifier::from_settings(settings),
            config.event_bus.clone(),
        );

        info!(
            sound_prefix = %settings.sound_prefix,
            music_prefix = %settings.music_prefix,
            muted_sound = settings.start_muted_sound,
            muted_music = settings.start_muted_music,
            "Audio manager created"
        );

        Ok(Self {
            resolver,
            state: Mutex::new(ManagerState::new(
                settings.initial_volume,
                settings.start_muted_sound,
                settings.start_muted_music,
                settings.music_loops_by_default,
            )),
            events: config.event_bus.clone(),
            visibility_sources: config.visibility_sources.clone(),
            music_loops_by_default: settings.music_loops_by_default,
        })
    }

    /// Copy of the current state.
    pub fn state(&self) -> ManagerState {
        self.state.lock().clone()
    }

    /// Visibility sources handed in through the configuration.
    pub fn visibility_sources(&self) -> &[Arc<dyn VisibilitySource>] {
        &self.visibility_sources
    }

    // ========================================================================
    // Volume
    // ========================================================================

    /// Set the volume of one asset, clamped to `0.0..=1.0`.
    ///
    /// The value is also recorded as the manager's `volume` even when the
    /// asset cannot be resolved.
    pub fn set_volume(&self, value: f32, name: &str) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.state.lock().volume = value;

        if let Some(handle) = self.resolver.resolve(name) {
            handle.set_volume(value);
            debug!(name = %name, volume = value, "Volume set");
        }
    }

    /// Volume of one asset; the recorded manager volume if it is unresolvable.
    pub fn get_volume(&self, name: &str) -> f32 {
        match self.resolver.resolve(name) {
            Some(handle) => handle.volume(),
            None => self.state.lock().volume,
        }
    }

    // ========================================================================
    // Sound Effects
    // ========================================================================

    /// Play a sound effect, keeping the handle's loop and completion settings.
    pub fn play_sound(&self, name: &str) {
        self.play_sound_with(name, SoundOptions::default());
    }

    /// Play a sound effect.
    ///
    /// Dropped (not queued) while sounds are muted or prevented.
    #[instrument(skip(self, options), fields(restart = options.restart))]
    pub fn play_sound_with(&self, name: &str, options: SoundOptions) {
        self.resolver.classify(name);
        let Some(handle) = self.resolver.resolve(name) else {
            return;
        };

        {
            let state = self.state.lock();
            if state.sounds_suppressed() {
                debug!(
                    muted = state.muted_sound,
                    prevented = state.prevent_sounds,
                    "Sound request dropped"
                );
                return;
            }
        }

        if options.restart {
            handle.stop(None);
        }
        if let Some(looping) = options.looping {
            handle.set_loop(looping);
        }
        if let Some(callback) = options.on_end {
            handle.set_on_end(Some(callback));
        }

        match start(name, handle.as_ref()) {
            Ok(_) => {
                debug!("Sound started");
                self.publish(AudioEvent::Sound(SoundEvent::Started {
                    name: name.to_string(),
                }));
            }
            Err(err) => self.report_failure(name, err),
        }
    }

    /// Stop every instance of one sound effect.
    pub fn stop_sound(&self, name: &str) {
        let Some(handle) = self.resolver.resolve(name) else {
            return;
        };

        handle.stop(None);
        debug!(name = %name, "Sound stopped");
        self.publish(AudioEvent::Sound(SoundEvent::Stopped {
            name: name.to_string(),
        }));
    }

    /// Stop every asset in the provider's table classified as a sound effect.
    pub fn stop_all_sound(&self) {
        let assets = self.resolver.assets_in(Category::SoundEffect);
        let count = assets.len();

        for (_, handle) in assets {
            handle.stop(None);
        }

        debug!(count, "All sound effects stopped");
        self.publish(AudioEvent::Sound(SoundEvent::AllStopped { count }));
    }

    /// Set the hard override that drops every sound request.
    ///
    /// Sounds already playing keep playing.
    pub fn prevent_sounds(&self, prevent: bool) {
        let changed = {
            let mut state = self.state.lock();
            let changed = state.prevent_sounds != prevent;
            state.prevent_sounds = prevent;
            changed
        };

        if changed {
            info!(prevent, "Sound prevention changed");
            self.publish(AudioEvent::State(StateEvent::SoundsPrevented {
                prevented: prevent,
            }));
        }
    }

    // ========================================================================
    // Music
    // ========================================================================

    /// Play a music track with the default loop flag.
    pub fn play_music(&self, name: &str) {
        self.play_music_with(name, MusicOptions::default());
    }

    /// Make `name` the current track and start it unless music is muted.
    ///
    /// The name and loop flag are recorded even while muted so that a later
    /// unmute can resume the track.
    #[instrument(skip(self, options), fields(stop_all = options.stop_all))]
    pub fn play_music_with(&self, name: &str, options: MusicOptions) {
        if options.stop_all {
            self.stop_all_music();
        }

        let looping = options.looping.unwrap_or(self.music_loops_by_default);
        {
            let mut state = self.state.lock();
            state.current_music_name = Some(name.to_string());
            state.music_loop = looping;
            state.is_playing_music = false;
            state.music_generation = state.music_generation.wrapping_add(1);

            if state.muted_music {
                debug!(looping, "Music muted, track remembered");
                return;
            }
        }

        self.resolver.classify(name);
        let Some(handle) = self.resolver.resolve(name) else {
            return;
        };

        if let Some(callback) = options.on_end {
            handle.set_on_end(Some(callback));
        }
        handle.set_loop(looping);

        match start(name, handle.as_ref()) {
            Ok(id) => {
                {
                    let mut state = self.state.lock();
                    state
                        .music_instances
                        .entry(name.to_string())
                        .or_default()
                        .push(id);
                    if state.current_music_name.as_deref() == Some(name) {
                        state.is_playing_music = true;
                    }
                }
                debug!(looping, "Music started");
                self.publish(AudioEvent::Music(MusicEvent::Started {
                    name: name.to_string(),
                    looping,
                }));
            }
            Err(err) => self.report_failure(name, err),
        }
    }

    /// Stop one track. The current track name is kept.
    pub fn stop_music(&self, name: &str) {
        {
            let mut state = self.state.lock();
            state.is_playing_music = false;
            state.music_instances.remove(name);
        }

        let Some(handle) = self.resolver.resolve(name) else {
            return;
        };

        handle.stop(None);
        debug!(name = %name, "Music stopped");
        self.publish(AudioEvent::Music(MusicEvent::Stopped {
            name: name.to_string(),
        }));
    }

    /// Stop all instances of every music asset and forget the current track.
    ///
    /// A track started by an `on_end` callback fired during the sweep keeps
    /// its new instance; only the instances that predate the sweep are
    /// stopped, whatever order the provider lists its assets in.
    pub fn stop_all_music(&self) {
        let (generation, previous) = {
            let mut state = self.state.lock();
            state.current_music_name = None;
            state.is_playing_music = false;
            (
                state.music_generation,
                std::mem::take(&mut state.music_instances),
            )
        };

        let assets = self.resolver.assets_in(Category::Music);
        let count = assets.len();

        for (name, handle) in assets {
            if self.started_since(generation, &name) {
                let stale = previous.get(&name).map(Vec::as_slice).unwrap_or_default();
                debug!(name = %name, stale = stale.len(), "Keeping track started during stop");
                for id in stale {
                    handle.stop(Some(*id));
                }
                continue;
            }
            handle.stop(None);
        }

        debug!(count, "All music stopped");
        self.publish(AudioEvent::Music(MusicEvent::AllStopped { count }));
    }

    /// Without a name: whether music is playing. With a name: whether that
    /// track is the current one.
    ///
    /// The named form is logical: a track remembered while muted, or kept
    /// after `stop_music`, still matches.
    pub fn is_playing_music(&self, name: Option<&str>) -> bool {
        let state = self.state.lock();
        match name {
            Some(name) => state.current_music_name.as_deref() == Some(name),
            None => state.is_playing_music,
        }
    }

    // ========================================================================
    // Mute State Machine
    // ========================================================================

    /// Mute or unmute sound effects. Muting stops every sound effect;
    /// unmuting resumes nothing.
    pub fn mute_sound(&self, mute: bool) {
        let changed = {
            let mut state = self.state.lock();
            let changed = state.muted_sound != mute;
            state.muted_sound = mute;
            changed
        };

        if mute {
            self.stop_all_sound();
        }

        if changed {
            info!(muted = mute, "Sound mute changed");
            self.publish(AudioEvent::State(StateEvent::MuteChanged {
                channel: MuteChannel::Sound,
                muted: mute,
            }));
        }
    }

    /// Mute or unmute music.
    ///
    /// Muting silences everything but remembers the current track. Unmuting
    /// with `continue_music` replays the remembered track with its loop flag,
    /// unless it is already playing.
    pub fn mute_music(&self, mute: bool, continue_music: bool) {
        if mute {
            let (changed, remembered) = {
                let mut state = self.state.lock();
                let changed = !state.muted_music;
                state.muted_music = true;
                (changed, state.current_music_name.clone())
            };

            self.stop_all_music();

            {
                let mut state = self.state.lock();
                if state.current_music_name.is_none() {
                    state.current_music_name = remembered;
                }
            }

            if changed {
                info!(muted = true, "Music mute changed");
                self.publish_music_mute(true);
            }
            return;
        }

        let (changed, resume) = {
            let mut state = self.state.lock();
            let changed = state.muted_music;
            state.muted_music = false;
            let resume = if continue_music && !state.is_playing_music {
                state
                    .current_music_name
                    .clone()
                    .map(|name| (name, state.music_loop))
            } else {
                None
            };
            (changed, resume)
        };

        if changed {
            info!(muted = false, continue_music, "Music mute changed");
            self.publish_music_mute(false);
        }

        if let Some((name, looping)) = resume {
            self.play_music_with(&name, MusicOptions::new().looping(looping));
        }
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Entry point for foreground/background transitions.
    ///
    /// Hiding snapshots both mute flags and force-mutes everything. Showing
    /// restores the snapshot verbatim and replays the remembered track,
    /// including one requested while hidden; the restored music mute still
    /// applies. Repeated calls with the same value are ignored.
    pub fn set_app_hidden(&self, hidden: bool) {
        let restore = {
            let mut state = self.state.lock();
            if state.hidden == hidden {
                debug!(hidden, "Visibility unchanged");
                return;
            }
            state.hidden = hidden;

            if hidden {
                state.saved_mute_sound = state.muted_sound;
                state.saved_mute_music = state.muted_music;
                None
            } else {
                Some((state.saved_mute_sound, state.saved_mute_music))
            }
        };

        info!(hidden, "App visibility changed");
        self.publish(AudioEvent::State(StateEvent::VisibilityChanged { hidden }));

        match restore {
            None => {
                self.mute_sound(true);
                self.mute_music(true, false);
            }
            Some((muted_sound, muted_music)) => {
                self.mute_sound(muted_sound);
                self.mute_music(muted_music, false);

                let resume = {
                    let state = self.state.lock();
                    state
                        .current_music_name
                        .clone()
                        .map(|name| (name, state.music_loop))
                };
                if let Some((name, looping)) = resume {
                    self.play_music_with(&name, MusicOptions::new().looping(looping));
                }
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn started_since(&self, generation: u64, name: &str) -> bool {
        let state = self.state.lock();
        state.music_generation != generation && state.current_music_name.as_deref() == Some(name)
    }

    fn report_failure(&self, name: &str, err: AudioError) {
        error!(name = %name, error = %err, "Audio playback failed");
        let message = match err {
            AudioError::PlaybackFailed { message, .. } => message,
            other => other.to_string(),
        };
        self.publish(AudioEvent::Diagnostic(DiagnosticEvent::PlaybackFailed {
            name: name.to_string(),
            message,
        }));
    }

    fn publish_music_mute(&self, muted: bool) {
        self.publish(AudioEvent::State(StateEvent::MuteChanged {
            channel: MuteChannel::Music,
            muted,
        }));
    }

    fn publish(&self, event: AudioEvent) {
        if let Some(bus) = &self.events {
            let _ = bus.emit(event);
        }
    }
}

fn start(name: &str, handle: &dyn AudioHandle) -> Result<PlaybackId> {
    handle
        .play()
        .map_err(|err: BridgeError| AudioError::PlaybackFailed {
            name: name.to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::audio::{AudioAssetProvider, OnEnd};
    use bridge_traits::error::Result as BridgeResult;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHandle {
        plays: AtomicUsize,
        stops: AtomicUsize,
        looping: AtomicBool,
        refuse: bool,
    }

    impl AudioHandle for CountingHandle {
        fn play(&self) -> BridgeResult<PlaybackId> {
            if self.refuse {
                return Err(BridgeError::AudioDevice("no output device".into()));
            }
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(PlaybackId::new())
        }
        fn stop(&self, _id: Option<PlaybackId>) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
        fn set_loop(&self, looping: bool) {
            self.looping.store(looping, Ordering::SeqCst);
        }
        fn is_looping(&self) -> bool {
            self.looping.load(Ordering::SeqCst)
        }
        fn set_volume(&self, _volume: f32) {}
        fn volume(&self) -> f32 {
            0.25
        }
        fn set_on_end(&self, _callback: Option<OnEnd>) {}
    }

    struct Table(HashMap<String, Arc<CountingHandle>>);

    impl AudioAssetProvider for Table {
        fn get_audio(&self, name: &str) -> Option<Arc<dyn AudioHandle>> {
            self.0
                .get(name)
                .map(|handle| Arc::clone(handle) as Arc<dyn AudioHandle>)
        }

        fn audio_assets(&self) -> Vec<(String, Arc<dyn AudioHandle>)> {
            self.0
                .iter()
                .map(|(name, handle)| (name.clone(), Arc::clone(handle) as Arc<dyn AudioHandle>))
                .collect()
        }
    }

    fn manager(table: Table) -> AudioManager {
        let config = AudioConfig::builder()
            .asset_provider(Arc::new(table))
            .build()
            .unwrap();
        AudioManager::new(&config).unwrap()
    }

    #[test]
    fn test_refused_start_is_silent() {
        let handle = Arc::new(CountingHandle {
            refuse: true,
            ..Default::default()
        });
        let audio = manager(Table(HashMap::from([(
            "bgm_title".to_string(),
            Arc::clone(&handle),
        )])));

        audio.play_music("bgm_title");

        assert!(!audio.is_playing_music(None));
        assert_eq!(audio.state().current_music_name.as_deref(), Some("bgm_title"));
        assert_eq!(handle.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_get_volume_falls_back_to_recorded_value() {
        let audio = manager(Table(HashMap::from([(
            "sfx_jump".to_string(),
            Arc::new(CountingHandle::default()),
        )])));

        audio.set_volume(1.7, "sfx_missing");
        assert_eq!(audio.state().volume, 1.0);
        assert_eq!(audio.get_volume("sfx_missing"), 1.0);
        assert_eq!(audio.get_volume("sfx_jump"), 0.25);

        audio.set_volume(-3.0, "sfx_jump");
        assert_eq!(audio.state().volume, 0.0);
    }

    #[test]
    fn test_start_maps_bridge_error() {
        let handle = CountingHandle {
            refuse: true,
            ..Default::default()
        };
        let err = start("sfx_zap", &handle).unwrap_err();
        assert!(matches!(err, AudioError::PlaybackFailed { ref name, .. } if name == "sfx_zap"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = AudioConfig::builder()
            .asset_provider(Arc::new(Table(HashMap::new())))
            .build()
            .unwrap();
        config.settings.initial_volume = 4.0;

        assert!(matches!(
            AudioManager::new(&config),
            Err(AudioError::Config(_))
        ));
    }
}
