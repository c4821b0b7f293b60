//! # Audio Playback Module
//!
//! Categorizes, mutes, loops and restores sound-effect and music playback for
//! interactive applications.
//!
//! ## Overview
//!
//! This module handles:
//! - Name-based classification of assets into sound effects and music
//! - Resolution of logical names through the host's asset provider
//! - Start/stop, loop and completion control for both categories
//! - Independent mute toggles with save/restore across visibility changes
//! - A single de-duplicated visibility subscription driving that state
//!
//! The crate never loads or decodes audio; it drives the handles the host
//! registers with its [`AudioAssetProvider`](bridge_traits::AudioAssetProvider).

pub mod category;
pub mod error;
pub mod manager;
pub mod options;
pub mod resolver;
pub mod state;
pub mod visibility;

pub use category::{Category, Classifier};
pub use error::{AudioError, Result};
pub use manager::AudioManager;
pub use options::{MusicOptions, SoundOptions};
pub use resolver::AssetResolver;
pub use state::ManagerState;
pub use visibility::VisibilityWatcher;
