//! Name-based category inference.
//!
//! An asset's category is never stored: it is derived from the leading
//! characters of the leaf name (the part after the last `/` or `\`).

use crate::error::{AudioError, Result};

use core_runtime::config::AudioSettings;
use serde::{Deserialize, Serialize};

/// Category of an audio asset, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Short one-shot effect (`sfx_` prefix by default).
    SoundEffect,
    /// Background music track (`bgm_` prefix by default).
    Music,
    /// Neither prefix; tolerated but excluded from bulk stops.
    Unknown,
}

/// Returns the leaf of a possibly path-qualified asset name.
///
/// ```
/// use core_audio::category::leaf_name;
///
/// assert_eq!(leaf_name("audio/ui/sfx_click"), "sfx_click");
/// assert_eq!(leaf_name("audio\\bgm_title"), "bgm_title");
/// assert_eq!(leaf_name("sfx_jump"), "sfx_jump");
/// ```
pub fn leaf_name(name: &str) -> &str {
    match name.rfind(['/', '\\']) {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Prefix-based classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    sound_prefix: String,
    music_prefix: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_settings(&AudioSettings::default())
    }
}

impl Classifier {
    pub fn new(sound_prefix: impl Into<String>, music_prefix: impl Into<String>) -> Self {
        Self {
            sound_prefix: sound_prefix.into(),
            music_prefix: music_prefix.into(),
        }
    }

    pub fn from_settings(settings: &AudioSettings) -> Self {
        Self::new(settings.sound_prefix.clone(), settings.music_prefix.clone())
    }

    /// Category of `name` without any logging.
    pub fn category(&self, name: &str) -> Category {
        let leaf = leaf_name(name);
        if leaf.starts_with(self.sound_prefix.as_str()) {
            Category::SoundEffect
        } else if leaf.starts_with(self.music_prefix.as_str()) {
            Category::Music
        } else {
            Category::Unknown
        }
    }

    /// Category of `name`, or [`AudioError::NamingConvention`] when it
    /// follows neither convention.
    ///
    /// The error is advisory; callers never refuse an operation because of it.
    pub fn try_classify(&self, name: &str) -> Result<Category> {
        match self.category(name) {
            Category::Unknown => Err(AudioError::NamingConvention(name.to_string())),
            category => Ok(category),
        }
    }
}
