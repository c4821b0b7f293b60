//! Asset resolution against the host's provider.

use crate::category::{Category, Classifier};
use crate::error::{AudioError, Result};

use bridge_traits::audio::{AudioAssetProvider, AudioHandle};
use core_runtime::events::{AudioEvent, DiagnosticEvent, EventBus};
use std::sync::Arc;
use tracing::warn;

/// Looks logical names up in the [`AudioAssetProvider`] and reports misses.
///
/// The resolver never caches handles: every call goes back to the provider,
/// which stays the single owner of the asset table.
pub struct AssetResolver {
    provider: Arc<dyn AudioAssetProvider>,
    classifier: Classifier,
    events: Option<EventBus>,
}

impl AssetResolver {
    pub fn new(
        provider: Arc<dyn AudioAssetProvider>,
        classifier: Classifier,
        events: Option<EventBus>,
    ) -> Self {
        Self {
            provider,
            classifier,
            events,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Handle for `name`, or [`AudioError::AssetNotFound`].
    pub fn try_resolve(&self, name: &str) -> Result<Arc<dyn AudioHandle>> {
        self.provider
            .get_audio(name)
            .ok_or_else(|| AudioError::AssetNotFound(name.to_string()))
    }

    /// Handle for `name`; a miss is logged and published, never propagated.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn AudioHandle>> {
        match self.try_resolve(name) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(name = %name, error = %err, "Audio asset not found");
                self.publish(AudioEvent::Diagnostic(DiagnosticEvent::AssetNotFound {
                    name: name.to_string(),
                }));
                None
            }
        }
    }

    /// Category of `name`; a naming-convention violation is logged and
    /// published, and reported as [`Category::Unknown`].
    pub fn classify(&self, name: &str) -> Category {
        match self.classifier.try_classify(name) {
            Ok(category) => category,
            Err(err) => {
                warn!(name = %name, error = %err, "Audio asset name follows neither naming convention");
                self.publish(AudioEvent::Diagnostic(DiagnosticEvent::NamingConvention {
                    name: name.to_string(),
                }));
                Category::Unknown
            }
        }
    }

    /// Snapshot of every asset whose leaf belongs to `category`.
    ///
    /// Taken from the provider's full table so nothing depends on a
    /// manager-side registry.
    pub fn assets_in(&self, category: Category) -> Vec<(String, Arc<dyn AudioHandle>)> {
        self.provider
            .audio_assets()
            .into_iter()
            .filter(|(name, _)| self.classifier.category(name) == category)
            .collect()
    }

    fn publish(&self, event: AudioEvent) {
        if let Some(bus) = &self.events {
            // No subscribers is fine.
            let _ = bus.emit(event);
        }
    }
}
