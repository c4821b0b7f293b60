//! Audio bridge traits and supporting types.
//!
//! These abstractions let the audio core drive whatever playable primitive the
//! host exposes (an `HtmlAudioElement`, a rodio `Sink`, a native voice) without
//! knowing how the asset was loaded or decoded. Host applications own the
//! handles; the core only ever borrows them through shared references.

use crate::{error::Result, platform::PlatformSendSync};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Callback invoked by the platform primitive when a playback instance ends.
///
/// The callback may re-enter the audio manager (for example to start the next
/// music track), so implementations must not hold internal locks while
/// invoking it.
pub type OnEnd = Arc<dyn Fn() + Send + Sync>;

/// Identifier of a single playback instance started by [`AudioHandle::play`].
///
/// A handle may support several concurrent instances of the same asset; each
/// call to `play` yields a fresh identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(Uuid);

impl PlaybackId {
    /// Generate a new playback identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct an identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlaybackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playable unit for one logical audio asset.
///
/// All methods are synchronous and must return immediately; completion is
/// reported asynchronously through the [`OnEnd`] callback. Settings such as
/// loop, volume and the end callback persist on the handle across plays.
pub trait AudioHandle: PlatformSendSync {
    /// Start a new playback instance.
    fn play(&self) -> Result<PlaybackId>;

    /// Stop a single instance, or every instance of this asset when `id` is
    /// `None`. Stopping an instance that already ended is a no-op.
    fn stop(&self, id: Option<PlaybackId>);

    /// Configure whether subsequent instances loop.
    fn set_loop(&self, looping: bool);

    /// Current loop setting.
    fn is_looping(&self) -> bool;

    /// Set the asset volume, normalized to `0.0..=1.0`.
    fn set_volume(&self, volume: f32);

    /// Current asset volume.
    fn volume(&self) -> f32;

    /// Replace the completion callback. `None` clears it.
    fn set_on_end(&self, callback: Option<OnEnd>);
}

/// Resolves logical audio names to host-owned handles.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::audio::AudioAssetProvider;
///
/// fn click(provider: &dyn AudioAssetProvider) {
///     if let Some(handle) = provider.get_audio("ui/sfx_click") {
///         handle.play().ok();
///     }
/// }
/// ```
pub trait AudioAssetProvider: PlatformSendSync {
    /// Look up a single audio asset by logical name.
    fn get_audio(&self, name: &str) -> Option<Arc<dyn AudioHandle>>;

    /// Snapshot of every loaded audio asset.
    ///
    /// Callers iterate the returned vector, so providers may keep mutating
    /// their own table while the snapshot is in use.
    fn audio_assets(&self) -> Vec<(String, Arc<dyn AudioHandle>)>;
}
