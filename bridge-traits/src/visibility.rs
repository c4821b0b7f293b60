//! App Visibility Signals
//!
//! Hosts report foreground/background transitions through whichever primitive
//! they have: an application lifecycle callback, the Page Visibility API, or
//! plain window focus events. Each primitive is exposed as a
//! [`VisibilitySource`]; the core checks the available sources once at
//! startup and listens to exactly one of them.

use crate::{
    error::Result,
    platform::{PlatformSend, PlatformSendSync},
};

/// Application lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Application is in the foreground and active
    Foreground,
    /// Application is in the background
    Background,
    /// Application is being suspended
    Suspended,
}

/// Kind of platform primitive backing a [`VisibilitySource`].
///
/// Variants are declared in selection priority order: when several sources are
/// supported, the one with the lowest [`priority`](Self::priority) wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisibilitySourceKind {
    /// Mobile / desktop application lifecycle notifications
    Lifecycle,
    /// Browser Page Visibility API (`visibilitychange`)
    PageVisibility,
    /// Window focus/blur events
    WindowFocus,
}

impl VisibilitySourceKind {
    /// Selection priority, lower is preferred.
    pub fn priority(&self) -> u8 {
        match self {
            VisibilitySourceKind::Lifecycle => 0,
            VisibilitySourceKind::PageVisibility => 1,
            VisibilitySourceKind::WindowFocus => 2,
        }
    }
}

/// Raw signal emitted by a visibility source before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilitySignal {
    /// Application lifecycle transition
    Lifecycle(LifecycleState),
    /// Page visibility change; `hidden` mirrors `document.hidden`
    PageVisibility { hidden: bool },
    /// Window focus change
    WindowFocus { focused: bool },
}

impl VisibilitySignal {
    /// Kind of source this signal originates from.
    pub fn kind(&self) -> VisibilitySourceKind {
        match self {
            VisibilitySignal::Lifecycle(_) => VisibilitySourceKind::Lifecycle,
            VisibilitySignal::PageVisibility { .. } => VisibilitySourceKind::PageVisibility,
            VisibilitySignal::WindowFocus { .. } => VisibilitySourceKind::WindowFocus,
        }
    }

    /// Collapse the signal into a single "is the app hidden" flag.
    pub fn is_hidden(&self) -> bool {
        match self {
            VisibilitySignal::Lifecycle(state) => !matches!(state, LifecycleState::Foreground),
            VisibilitySignal::PageVisibility { hidden } => *hidden,
            VisibilitySignal::WindowFocus { focused } => !focused,
        }
    }
}

/// Platform visibility source
///
/// # Platform Support
///
/// - **iOS / Android**: application lifecycle callbacks
/// - **Web**: Page Visibility API, falling back to window blur/focus
/// - **Desktop**: window focus/minimize events
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait VisibilitySource: PlatformSendSync {
    /// Kind of primitive this source wraps.
    fn kind(&self) -> VisibilitySourceKind;

    /// Capability check: whether the host actually exposes this primitive.
    fn is_supported(&self) -> bool {
        true
    }

    /// Subscribe to raw visibility signals.
    async fn subscribe(&self) -> Result<Box<dyn VisibilitySignalStream>>;
}

/// Stream of raw visibility signals
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait VisibilitySignalStream: PlatformSend {
    /// Get the next signal
    ///
    /// Returns `None` when the stream is closed.
    async fn next(&mut self) -> Option<VisibilitySignal>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_normalization() {
        assert!(!VisibilitySignal::Lifecycle(LifecycleState::Foreground).is_hidden());
        assert!(VisibilitySignal::Lifecycle(LifecycleState::Background).is_hidden());
        assert!(VisibilitySignal::Lifecycle(LifecycleState::Suspended).is_hidden());
        assert!(VisibilitySignal::PageVisibility { hidden: true }.is_hidden());
        assert!(!VisibilitySignal::PageVisibility { hidden: false }.is_hidden());
        assert!(VisibilitySignal::WindowFocus { focused: false }.is_hidden());
        assert!(!VisibilitySignal::WindowFocus { focused: true }.is_hidden());
    }

    #[test]
    fn test_priority_order() {
        let mut kinds = vec![
            VisibilitySourceKind::WindowFocus,
            VisibilitySourceKind::Lifecycle,
            VisibilitySourceKind::PageVisibility,
        ];
        kinds.sort_by_key(|k| k.priority());

        assert_eq!(
            kinds,
            vec![
                VisibilitySourceKind::Lifecycle,
                VisibilitySourceKind::PageVisibility,
                VisibilitySourceKind::WindowFocus,
            ]
        );
    }

    #[test]
    fn test_signal_kind() {
        assert_eq!(
            VisibilitySignal::WindowFocus { focused: true }.kind(),
            VisibilitySourceKind::WindowFocus
        );
    }
}
