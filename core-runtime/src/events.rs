//! # Event Bus System
//!
//! Broadcasts audio state changes using `tokio::sync::broadcast` so UI layers
//! (mute toggles, debug overlays, analytics) can observe the audio core
//! without holding a reference to it.
//!
//! ## Overview
//!
//! - **Event Types**: `AudioEvent` wraps per-domain enums for sound effects,
//!   music, manager state and diagnostics
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{AudioEvent, EventBus, MusicEvent};
//!
//! let event_bus = EventBus::new(100);
//! let mut subscriber = event_bus.subscribe();
//!
//! event_bus
//!     .emit(AudioEvent::Music(MusicEvent::Started {
//!         name: "bgm_theme".to_string(),
//!         looping: true,
//!     }))
//!     .ok();
//!
//! assert!(subscriber.try_recv().is_ok());
//! ```
//!
//! ## Event Types
//!
//! ### Sound Events
//! - `Started`, `Stopped`, `AllStopped`
//!
//! ### Music Events
//! - `Started`, `Stopped`, `AllStopped`
//!
//! ### State Events
//! - `MuteChanged`: sound or music mute flag flipped
//! - `SoundsPrevented`: prevent-sounds override changed
//! - `VisibilityChanged`: app hidden/shown transition applied
//!
//! ### Diagnostic Events
//! - `AssetNotFound`, `PlaybackFailed`, `NamingConvention`
//!
//! ## Error Handling
//!
//! Subscribers that fall behind receive `RecvError::Lagged(n)` and may keep
//! reading; `RecvError::Closed` signals that every sender was dropped.
//! Emitting with no subscribers returns an error the audio core ignores.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Audio Event Types
// ============================================================================

/// Top-level event enum encompassing all audio event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum AudioEvent {
    /// Sound-effect playback events
    Sound(SoundEvent),
    /// Music playback events
    Music(MusicEvent),
    /// Mute / visibility state events
    State(StateEvent),
    /// Non-fatal diagnostics
    Diagnostic(DiagnosticEvent),
}

impl AudioEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            AudioEvent::Sound(e) => e.description(),
            AudioEvent::Music(e) => e.description(),
            AudioEvent::State(e) => e.description(),
            AudioEvent::Diagnostic(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            AudioEvent::Diagnostic(DiagnosticEvent::PlaybackFailed { .. }) => EventSeverity::Error,
            AudioEvent::Diagnostic(_) => EventSeverity::Warning,
            AudioEvent::State(_) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

/// Which mute toggle an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuteChannel {
    Sound,
    Music,
}

// ============================================================================
// Sound Events
// ============================================================================

/// Events related to sound-effect playback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SoundEvent {
    /// A sound effect instance started.
    Started {
        /// Logical asset name.
        name: String,
    },
    /// Every instance of a sound effect was stopped.
    Stopped {
        /// Logical asset name.
        name: String,
    },
    /// Every sound effect in the asset table was stopped.
    AllStopped {
        /// Number of assets the stop was issued to.
        count: usize,
    },
}

impl SoundEvent {
    fn description(&self) -> &str {
        match self {
            SoundEvent::Started { .. } => "Sound effect started",
            SoundEvent::Stopped { .. } => "Sound effect stopped",
            SoundEvent::AllStopped { .. } => "All sound effects stopped",
        }
    }
}

// ============================================================================
// Music Events
// ============================================================================

/// Events related to music playback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum MusicEvent {
    /// A music track became audible.
    Started {
        /// Logical asset name.
        name: String,
        /// Whether the track loops.
        looping: bool,
    },
    /// A music track was stopped; the manager still remembers it.
    Stopped {
        /// Logical asset name.
        name: String,
    },
    /// All music was stopped and the current track forgotten.
    AllStopped {
        /// Number of assets the stop was issued to.
        count: usize,
    },
}

impl MusicEvent {
    fn description(&self) -> &str {
        match self {
            MusicEvent::Started { .. } => "Music started",
            MusicEvent::Stopped { .. } => "Music stopped",
            MusicEvent::AllStopped { .. } => "All music stopped",
        }
    }
}

// ============================================================================
// State Events
// ============================================================================

/// Events describing manager state transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum StateEvent {
    /// A mute flag changed value.
    MuteChanged {
        /// Which toggle changed.
        channel: MuteChannel,
        /// New value.
        muted: bool,
    },
    /// The prevent-sounds override changed value.
    SoundsPrevented {
        /// New value.
        prevented: bool,
    },
    /// The app was hidden or shown.
    VisibilityChanged {
        /// Whether the app is now hidden.
        hidden: bool,
    },
}

impl StateEvent {
    fn description(&self) -> &str {
        match self {
            StateEvent::MuteChanged { .. } => "Mute state changed",
            StateEvent::SoundsPrevented { .. } => "Sound prevention changed",
            StateEvent::VisibilityChanged { .. } => "App visibility changed",
        }
    }
}

// ============================================================================
// Diagnostic Events
// ============================================================================

/// Non-fatal failures surfaced for tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum DiagnosticEvent {
    /// The asset provider has no audio under this name.
    AssetNotFound {
        /// Requested name.
        name: String,
    },
    /// The platform refused to start playback.
    PlaybackFailed {
        /// Requested name.
        name: String,
        /// Platform error message.
        message: String,
    },
    /// The name carries neither the sound nor the music prefix.
    NamingConvention {
        /// Offending name.
        name: String,
    },
}

impl DiagnosticEvent {
    fn description(&self) -> &str {
        match self {
            DiagnosticEvent::AssetNotFound { .. } => "Audio asset not found",
            DiagnosticEvent::PlaybackFailed { .. } => "Audio playback failed",
            DiagnosticEvent::NamingConvention { .. } => "Audio asset naming convention violated",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for broadcasting audio events.
///
/// Cloning the bus is cheap; all clones publish into the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AudioEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer per subscriber.
    ///   When a subscriber falls behind by more than this amount, it will
    ///   receive a `RecvError::Lagged` error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are no active subscribers.
    pub fn emit(&self, event: AudioEvent) -> Result<usize, SendError<AudioEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<AudioEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    ///
    /// ```rust
    /// use core_runtime::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.subscriber_count(), 0);
    ///
    /// let _subscriber = event_bus.subscribe();
    /// assert_eq!(event_bus.subscriber_count(), 1);
    /// ```
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&AudioEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// ```rust
/// use core_runtime::events::{AudioEvent, EventBus, EventStream};
///
/// let event_bus = EventBus::new(100);
/// let music_only = EventStream::new(event_bus.subscribe())
///     .filter(|event| matches!(event, AudioEvent::Music(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<AudioEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<AudioEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter function to this stream.
    ///
    /// Only events that match the filter will be returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&AudioEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter (if any).
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n` events.
    /// Returns `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<AudioEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive an event without blocking.
    ///
    /// Returns `None` if no matching events are currently available.
    pub fn try_recv(&mut self) -> Option<Result<AudioEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };

                    if filter(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
