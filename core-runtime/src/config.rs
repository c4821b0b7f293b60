//! # Audio Configuration Module
//!
//! Provides configuration management for the audio core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct an
//! `AudioConfig` holding the host bridges and the tunable [`AudioSettings`].
//! It enforces fail-fast validation so a manager is never created without an
//! asset provider or with a naming convention that cannot categorize assets.
//!
//! ## Required Dependencies
//!
//! - `AudioAssetProvider` - Resolves logical names to playable handles
//!
//! ## Optional Dependencies
//!
//! - `VisibilitySource` - One or more platform visibility primitives; the
//!   visibility watcher tries them in priority order
//! - `EventBus` - Receives [`AudioEvent`](crate::events::AudioEvent)s
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{AudioConfig, AudioSettings};
//! use std::sync::Arc;
//!
//! let config = AudioConfig::builder()
//!     .asset_provider(Arc::new(MyAssets::load()?))
//!     .visibility_source(Arc::new(MyPageVisibility))
//!     .settings(AudioSettings::default().with_initial_volume(0.8))
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::AudioConfig;
//!
//! // This will panic with an actionable error message
//! let config = AudioConfig::builder()
//!     .build()
//!     .expect("Should fail - missing asset provider");
//! ```

use crate::error::{Error, Result};
use crate::events::EventBus;
use bridge_traits::{AudioAssetProvider, VisibilitySource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default leaf-name prefix marking sound effects.
pub const DEFAULT_SOUND_PREFIX: &str = "sfx_";

/// Default leaf-name prefix marking music tracks.
pub const DEFAULT_MUSIC_PREFIX: &str = "bgm_";

/// Audio configuration.
///
/// Holds every dependency and setting the audio manager needs. Use
/// [`AudioConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct AudioConfig {
    /// Asset provider the manager resolves names against (required)
    pub asset_provider: Arc<dyn AudioAssetProvider>,

    /// Candidate visibility sources, tried in priority order
    pub visibility_sources: Vec<Arc<dyn VisibilitySource>>,

    /// Optional event bus receiving playback and mute events
    pub event_bus: Option<EventBus>,

    /// Tunable settings
    pub settings: AudioSettings,
}

impl std::fmt::Debug for AudioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioConfig")
            .field("asset_provider", &"AudioAssetProvider { ... }")
            .field(
                "visibility_sources",
                &self
                    .visibility_sources
                    .iter()
                    .map(|source| source.kind())
                    .collect::<Vec<_>>(),
            )
            .field("event_bus", &self.event_bus)
            .field("settings", &self.settings)
            .finish()
    }
}

impl AudioConfig {
    /// Creates a new builder for constructing an `AudioConfig`.
    pub fn builder() -> AudioConfigBuilder {
        AudioConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()
    }
}

/// Tunable audio settings.
///
/// Serializable so hosts can ship them alongside other game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Leaf-name prefix for sound effects.
    ///
    /// Default: `"sfx_"`.
    #[serde(default = "default_sound_prefix")]
    pub sound_prefix: String,

    /// Leaf-name prefix for music tracks.
    ///
    /// Default: `"bgm_"`.
    #[serde(default = "default_music_prefix")]
    pub music_prefix: String,

    /// Loop flag applied when `play_music` is called without one.
    ///
    /// Default: true.
    #[serde(default = "default_music_loops_by_default")]
    pub music_loops_by_default: bool,

    /// Value reported as the manager volume before any `set_volume` call.
    ///
    /// Default: 1.0.
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    /// Start with sound effects muted.
    #[serde(default)]
    pub start_muted_sound: bool,

    /// Start with music muted.
    #[serde(default)]
    pub start_muted_music: bool,

    /// Capacity of an event bus created through
    /// [`AudioConfigBuilder::with_events`].
    ///
    /// Default: 100.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_prefix: default_sound_prefix(),
            music_prefix: default_music_prefix(),
            music_loops_by_default: default_music_loops_by_default(),
            initial_volume: default_initial_volume(),
            start_muted_sound: false,
            start_muted_music: false,
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

impl AudioSettings {
    pub fn with_prefixes(
        mut self,
        sound_prefix: impl Into<String>,
        music_prefix: impl Into<String>,
    ) -> Self {
        self.sound_prefix = sound_prefix.into();
        self.music_prefix = music_prefix.into();
        self
    }

    pub fn with_music_loops_by_default(mut self, looping: bool) -> Self {
        self.music_loops_by_default = looping;
        self
    }

    pub fn with_initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = volume;
        self
    }

    pub fn with_start_muted(mut self, sound: bool, music: bool) -> Self {
        self.start_muted_sound = sound;
        self.start_muted_music = music;
        self
    }

    /// Validate settings values.
    ///
    /// Prefixes must be non-empty and neither may be a prefix of the other,
    /// otherwise a name could match both categories.
    pub fn validate(&self) -> Result<()> {
        if self.sound_prefix.is_empty() {
            return Err(Error::Config("Sound prefix cannot be empty".to_string()));
        }

        if self.music_prefix.is_empty() {
            return Err(Error::Config("Music prefix cannot be empty".to_string()));
        }

        if self.sound_prefix.starts_with(&self.music_prefix)
            || self.music_prefix.starts_with(&self.sound_prefix)
        {
            return Err(Error::Config(format!(
                "Sound prefix '{}' and music prefix '{}' overlap",
                self.sound_prefix, self.music_prefix
            )));
        }

        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(Error::Config(format!(
                "Initial volume {} must be between 0.0 and 1.0",
                self.initial_volume
            )));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_sound_prefix() -> String {
    DEFAULT_SOUND_PREFIX.to_string()
}

fn default_music_prefix() -> String {
    DEFAULT_MUSIC_PREFIX.to_string()
}

fn default_music_loops_by_default() -> bool {
    true
}

fn default_initial_volume() -> f32 {
    1.0
}

fn default_event_buffer_size() -> usize {
    crate::events::DEFAULT_EVENT_BUFFER_SIZE
}

fn asset_provider_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "AudioAssetProvider".to_string(),
        message: "An AudioAssetProvider is required to resolve audio names. \
                 Desktop: register decoded handles in bridge_desktop::AssetTable. \
                 Web: wrap the preloaded HtmlAudioElement table."
            .to_string(),
    }
}

/// Builder for constructing [`AudioConfig`] instances.
#[derive(Default)]
pub struct AudioConfigBuilder {
    asset_provider: Option<Arc<dyn AudioAssetProvider>>,
    visibility_sources: Vec<Arc<dyn VisibilitySource>>,
    event_bus: Option<EventBus>,
    with_events: bool,
    settings: Option<AudioSettings>,
}

impl AudioConfigBuilder {
    /// Sets the asset provider (required).
    pub fn asset_provider(mut self, provider: Arc<dyn AudioAssetProvider>) -> Self {
        self.asset_provider = Some(provider);
        self
    }

    /// Adds a candidate visibility source. May be called repeatedly; the
    /// watcher picks the supported source with the highest priority.
    pub fn visibility_source(mut self, source: Arc<dyn VisibilitySource>) -> Self {
        self.visibility_sources.push(source);
        self
    }

    /// Uses an existing event bus, e.g. one shared with the rest of the game.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Creates a dedicated event bus sized by
    /// [`AudioSettings::event_buffer_size`] when no bus was supplied.
    pub fn with_events(mut self, enabled: bool) -> Self {
        self.with_events = enabled;
        self
    }

    /// Sets the tunable settings.
    pub fn settings(mut self, settings: AudioSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Builds the final [`AudioConfig`].
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] if no asset provider was supplied
    /// - [`Error::Config`] if the settings fail validation
    pub fn build(self) -> Result<AudioConfig> {
        let asset_provider = self
            .asset_provider
            .ok_or_else(asset_provider_missing_error)?;

        let settings = self.settings.unwrap_or_default();

        let event_bus = match self.event_bus {
            Some(bus) => Some(bus),
            None if self.with_events => Some(EventBus::new(settings.event_buffer_size.max(1))),
            None => None,
        };

        let config = AudioConfig {
            asset_provider,
            visibility_sources: self.visibility_sources,
            event_bus,
            settings,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::{AudioHandle, VisibilitySignalStream, VisibilitySourceKind};

    struct EmptyProvider;

    impl AudioAssetProvider for EmptyProvider {
        fn get_audio(&self, _name: &str) -> Option<Arc<dyn AudioHandle>> {
            None
        }

        fn audio_assets(&self) -> Vec<(String, Arc<dyn AudioHandle>)> {
            Vec::new()
        }
    }

    struct FocusSource;

    #[async_trait::async_trait]
    impl VisibilitySource for FocusSource {
        fn kind(&self) -> VisibilitySourceKind {
            VisibilitySourceKind::WindowFocus
        }

        async fn subscribe(&self) -> bridge_traits::error::Result<Box<dyn VisibilitySignalStream>> {
            Err(bridge_traits::BridgeError::NotAvailable("test".to_string()))
        }
    }

    #[test]
    fn test_builder_requires_asset_provider() {
        let result = AudioConfig::builder().build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "AudioAssetProvider");
            }
            other => panic!("expected CapabilityMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = AudioConfig::builder()
            .asset_provider(Arc::new(EmptyProvider))
            .build()
            .unwrap();

        assert_eq!(config.settings, AudioSettings::default());
        assert_eq!(config.settings.sound_prefix, "sfx_");
        assert_eq!(config.settings.music_prefix, "bgm_");
        assert!(config.settings.music_loops_by_default);
        assert_eq!(config.settings.initial_volume, 1.0);
        assert!(config.visibility_sources.is_empty());
        assert!(config.event_bus.is_none());
    }

    #[test]
    fn test_builder_collects_visibility_sources() {
        let config = AudioConfig::builder()
            .asset_provider(Arc::new(EmptyProvider))
            .visibility_source(Arc::new(FocusSource))
            .visibility_source(Arc::new(FocusSource))
            .build()
            .unwrap();

        assert_eq!(config.visibility_sources.len(), 2);
        assert!(format!("{:?}", config).contains("WindowFocus"));
    }

    #[test]
    fn test_builder_creates_event_bus() {
        let config = AudioConfig::builder()
            .asset_provider(Arc::new(EmptyProvider))
            .with_events(true)
            .build()
            .unwrap();

        assert!(config.event_bus.is_some());
    }

    #[test]
    fn test_builder_prefers_supplied_event_bus() {
        let bus = EventBus::new(8);
        let _rx = bus.subscribe();

        let config = AudioConfig::builder()
            .asset_provider(Arc::new(EmptyProvider))
            .event_bus(bus)
            .with_events(true)
            .build()
            .unwrap();

        assert_eq!(config.event_bus.unwrap().subscriber_count(), 1);
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let settings = AudioSettings::default().with_prefixes("", "bgm_");
        assert!(settings.validate().is_err());

        let settings = AudioSettings::default().with_prefixes("sfx_", "");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlapping_prefixes() {
        let settings = AudioSettings::default().with_prefixes("a_", "a_");
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("overlap"));

        let settings = AudioSettings::default().with_prefixes("snd", "snd_music");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_volume_out_of_range() {
        assert!(AudioSettings::default()
            .with_initial_volume(1.5)
            .validate()
            .is_err());
        assert!(AudioSettings::default()
            .with_initial_volume(-0.1)
            .validate()
            .is_err());
        assert!(AudioSettings::default()
            .with_initial_volume(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_build_rejects_invalid_settings() {
        let result = AudioConfig::builder()
            .asset_provider(Arc::new(EmptyProvider))
            .settings(AudioSettings {
                event_buffer_size: 0,
                ..Default::default()
            })
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: AudioSettings =
            serde_json::from_str(r#"{ "start_muted_music": true }"#).unwrap();

        assert!(settings.start_muted_music);
        assert!(!settings.start_muted_sound);
        assert_eq!(settings.sound_prefix, "sfx_");
        assert_eq!(settings.event_buffer_size, 100);
    }

    #[test]
    fn test_settings_builders() {
        let settings = AudioSettings::default()
            .with_prefixes("se_", "mus_")
            .with_music_loops_by_default(false)
            .with_initial_volume(0.5)
            .with_start_muted(true, false);

        assert_eq!(settings.sound_prefix, "se_");
        assert_eq!(settings.music_prefix, "mus_");
        assert!(!settings.music_loops_by_default);
        assert_eq!(settings.initial_volume, 0.5);
        assert!(settings.start_muted_sound);
        assert!(!settings.start_muted_music);
        assert!(settings.validate().is_ok());
    }
}
