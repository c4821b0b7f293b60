//! # Audio Error Types
//!
//! Error types for the audio manager and its collaborators.
//!
//! None of these cross the manager's playback surface: operations that fail
//! log the error and degrade to silence. Internal helpers and the visibility
//! watcher return them so callers can decide how loud to be.

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors that can occur while resolving or playing audio.
#[derive(Error, Debug)]
pub enum AudioError {
    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// The asset provider has no audio registered under this name.
    #[error("Audio asset not found: {0}")]
    AssetNotFound(String),

    /// The leaf name carries neither the sound nor the music prefix.
    #[error("Audio asset '{0}' does not follow the sound/music naming convention")]
    NamingConvention(String),

    // ========================================================================
    // Playback Errors
    // ========================================================================
    /// The platform handle refused to start playback.
    #[error("Playback failed for '{name}': {message}")]
    PlaybackFailed { name: String, message: String },

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// None of the configured visibility sources is supported on this host.
    #[error("No supported visibility source")]
    NoVisibilitySource,

    /// Error surfaced by a bridge implementation.
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),
}

impl AudioError {
    /// Returns `true` if the error concerns the asset table rather than the
    /// platform.
    pub fn is_asset_error(&self) -> bool {
        matches!(
            self,
            AudioError::AssetNotFound(_) | AudioError::NamingConvention(_)
        )
    }

    /// Returns `true` if the error is a warning that never changes the
    /// outcome of an operation.
    pub fn is_advisory(&self) -> bool {
        matches!(self, AudioError::NamingConvention(_))
    }
}

/// Result type for audio operations.
pub type Result<T> = std::result::Result<T, AudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(AudioError::AssetNotFound("sfx_jump".into()).is_asset_error());
        assert!(AudioError::NamingConvention("jump".into()).is_asset_error());
        assert!(AudioError::NamingConvention("jump".into()).is_advisory());
        assert!(!AudioError::AssetNotFound("sfx_jump".into()).is_advisory());

        let failed = AudioError::PlaybackFailed {
            name: "bgm_title".into(),
            message: "device lost".into(),
        };
        assert!(!failed.is_asset_error());
        assert!(!failed.is_advisory());
    }

    #[test]
    fn test_bridge_error_conversion() {
        let err: AudioError = BridgeError::NotAvailable("page visibility".into()).into();
        assert!(matches!(err, AudioError::Bridge(_)));
        assert_eq!(
            err.to_string(),
            "Bridge error: Bridge capability not available: page visibility"
        );
    }

    #[test]
    fn test_playback_failed_display() {
        let err = AudioError::PlaybackFailed {
            name: "sfx_coin".into(),
            message: "decoder busy".into(),
        };
        assert_eq!(err.to_string(), "Playback failed for 'sfx_coin': decoder busy");
    }
}
