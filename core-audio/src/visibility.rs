//! # Visibility Watcher
//!
//! Turns one platform visibility source into de-duplicated
//! `set_app_hidden` calls on the [`AudioManager`].
//!
//! The source is chosen once, at startup, by checking the candidates in
//! priority order (lifecycle, then page visibility, then window focus) and
//! keeping the first one the host supports. The manager never learns which
//! source fired.

use crate::error::{AudioError, Result};
use crate::manager::AudioManager;

use bridge_traits::visibility::{VisibilitySignal, VisibilitySource, VisibilitySourceKind};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Single-subscription visibility strategy.
pub struct VisibilityWatcher {
    source: Arc<dyn VisibilitySource>,
    hidden: bool,
}

impl std::fmt::Debug for VisibilityWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityWatcher")
            .field("kind", &self.source.kind())
            .field("hidden", &self.hidden)
            .finish()
    }
}

impl VisibilityWatcher {
    /// Pick the highest-priority supported source.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoVisibilitySource`] if none is supported.
    pub fn select(sources: &[Arc<dyn VisibilitySource>]) -> Result<Self> {
        let source = sources
            .iter()
            .filter(|source| {
                let supported = source.is_supported();
                if !supported {
                    debug!(kind = ?source.kind(), "Visibility source unsupported");
                }
                supported
            })
            .min_by_key(|source| source.kind().priority())
            .cloned()
            .ok_or(AudioError::NoVisibilitySource)?;

        info!(kind = ?source.kind(), "Visibility source selected");

        // The app is assumed visible at startup.
        Ok(Self {
            source,
            hidden: false,
        })
    }

    pub fn kind(&self) -> VisibilitySourceKind {
        self.source.kind()
    }

    /// Normalize a raw signal. Returns the new hidden state on a real
    /// transition, `None` for repeats and for signals from other sources.
    pub fn observe(&mut self, signal: &VisibilitySignal) -> Option<bool> {
        if signal.kind() != self.source.kind() {
            warn!(
                expected = ?self.source.kind(),
                received = ?signal.kind(),
                "Ignoring visibility signal from unselected source"
            );
            return None;
        }

        let hidden = signal.is_hidden();
        if hidden == self.hidden {
            return None;
        }

        self.hidden = hidden;
        Some(hidden)
    }

    /// Subscribe and forward transitions until the source closes.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Bridge`] if the subscription fails.
    #[instrument(name = "visibility_watcher", skip_all, fields(kind = ?self.kind()))]
    pub async fn run(mut self, manager: Arc<AudioManager>) -> Result<()> {
        let mut stream = self.source.subscribe().await?;

        while let Some(signal) = stream.next().await {
            if let Some(hidden) = self.observe(&signal) {
                manager.set_app_hidden(hidden);
            }
        }

        debug!("Visibility source closed");
        Ok(())
    }

    /// Run the watcher on the current Tokio runtime.
    pub fn spawn(self, manager: Arc<AudioManager>) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run(manager))
    }
}

impl AudioManager {
    /// Select from the configured visibility sources and start forwarding their
    /// transitions to this manager.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoVisibilitySource`] if no configured source is
    /// supported.
    pub fn watch_visibility(self: &Arc<Self>) -> Result<JoinHandle<Result<()>>> {
        let watcher = VisibilityWatcher::select(self.visibility_sources())?;
        Ok(watcher.spawn(Arc::clone(self)))
    }
}
