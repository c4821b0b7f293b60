//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the audio core and platform-specific
//! implementations. Each trait represents a capability that the core requires
//! but that must be implemented differently per platform (desktop, mobile, web).
//!
//! ## Traits
//!
//! ### Audio
//! - [`AudioHandle`](audio::AudioHandle) - Playable unit for one logical asset
//! - [`AudioAssetProvider`](audio::AudioAssetProvider) - Name → handle lookup and asset table snapshot
//!
//! ### Platform Integration
//! - [`VisibilitySource`](visibility::VisibilitySource) - Foreground/background signals
//!   (lifecycle, page visibility, window focus)
//!
//! ### Utilities
//! - [`LoggerSink`](logger::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ In Progress |
//! | Web      | TBD                 | 📋 Planned |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for consistent
//! error handling. Platform implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Provide actionable error messages
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` on native targets (see
//! [`platform::PlatformSendSync`]) so handles and sources can be shared behind
//! `Arc`. On `wasm32` the bounds collapse to no-ops.
//!
//! ## Examples
//!
//! ### Implementing AudioAssetProvider
//!
//! ```ignore
//! use bridge_traits::audio::{AudioAssetProvider, AudioHandle};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! pub struct Preloaded {
//!     clips: HashMap<String, Arc<dyn AudioHandle>>,
//! }
//!
//! impl AudioAssetProvider for Preloaded {
//!     fn get_audio(&self, name: &str) -> Option<Arc<dyn AudioHandle>> {
//!         self.clips.get(name).cloned()
//!     }
//!
//!     fn audio_assets(&self) -> Vec<(String, Arc<dyn AudioHandle>)> {
//!         self.clips.iter().map(|(k, v)| (k.clone(), Arc::clone(v))).collect()
//!     }
//! }
//! ```

pub mod audio;
pub mod error;
pub mod logger;
pub mod platform;
pub mod visibility;

pub use error::BridgeError;

// Re-export commonly used types
pub use audio::{AudioAssetProvider, AudioHandle, OnEnd, PlaybackId};
pub use logger::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use visibility::{
    LifecycleState, VisibilitySignal, VisibilitySignalStream, VisibilitySource,
    VisibilitySourceKind,
};
