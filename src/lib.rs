//! Workspace facade crate.
//!
//! Re-exports the individual workspace crates so host applications can depend
//! on `audio-core-workspace` alone. The `desktop-shims` feature (on by default)
//! adds the in-memory asset table and channel visibility source from
//! `bridge-desktop`.

pub use bridge_traits;
pub use core_audio;
pub use core_runtime;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;

pub use core_audio::{AudioManager, MusicOptions, SoundOptions};
pub use core_runtime::config::{AudioConfig, AudioSettings};
