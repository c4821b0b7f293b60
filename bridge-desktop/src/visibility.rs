//! Channel-driven visibility source.
//!
//! Desktop shells (winit, tao, Tauri) deliver focus and minimize events on
//! their own event loop. [`ChannelVisibilitySource`] bridges those callbacks
//! into the [`VisibilitySource`] contract: the shell keeps a
//! [`VisibilitySender`] and forwards raw signals, the core subscribes once.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    visibility::{
        VisibilitySignal, VisibilitySignalStream, VisibilitySource, VisibilitySourceKind,
    },
};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Sending half held by the host event loop.
#[derive(Debug, Clone)]
pub struct VisibilitySender {
    kind: VisibilitySourceKind,
    tx: mpsc::UnboundedSender<VisibilitySignal>,
}

impl VisibilitySender {
    /// Forward a raw signal. Signals of a different kind than the source are
    /// dropped. Returns `false` once the subscriber is gone.
    pub fn send(&self, signal: VisibilitySignal) -> bool {
        if signal.kind() != self.kind {
            warn!(
                expected = ?self.kind,
                received = ?signal.kind(),
                "Dropping visibility signal from foreign source"
            );
            return true;
        }
        self.tx.send(signal).is_ok()
    }
}

/// Visibility source fed through an unbounded channel.
pub struct ChannelVisibilitySource {
    kind: VisibilitySourceKind,
    supported: bool,
    rx: Mutex<Option<mpsc::UnboundedReceiver<VisibilitySignal>>>,
}

impl ChannelVisibilitySource {
    /// Create a supported source of the given kind with its sender.
    pub fn new(kind: VisibilitySourceKind) -> (Self, VisibilitySender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            kind,
            supported: true,
            rx: Mutex::new(Some(rx)),
        };
        (source, VisibilitySender { kind, tx })
    }

    /// Source whose capability check fails, for hosts that lack the primitive.
    pub fn unsupported(kind: VisibilitySourceKind) -> Self {
        Self {
            kind,
            supported: false,
            rx: Mutex::new(None),
        }
    }
}

#[async_trait]
impl VisibilitySource for ChannelVisibilitySource {
    fn kind(&self) -> VisibilitySourceKind {
        self.kind
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn subscribe(&self) -> Result<Box<dyn VisibilitySignalStream>> {
        if !self.supported {
            return Err(BridgeError::NotAvailable(format!(
                "{:?} visibility source",
                self.kind
            )));
        }

        let rx = self.rx.lock().take().ok_or_else(|| {
            BridgeError::OperationFailed(format!(
                "{:?} visibility source already subscribed",
                self.kind
            ))
        })?;

        debug!(kind = ?self.kind, "Visibility source subscribed");
        Ok(Box::new(ChannelSignalStream { rx }))
    }
}

struct ChannelSignalStream {
    rx: mpsc::UnboundedReceiver<VisibilitySignal>,
}

#[async_trait]
impl VisibilitySignalStream for ChannelSignalStream {
    async fn next(&mut self) -> Option<VisibilitySignal> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signals_flow_to_subscriber() {
        let (source, sender) = ChannelVisibilitySource::new(VisibilitySourceKind::WindowFocus);
        let mut stream = source.subscribe().await.unwrap();

        assert!(sender.send(VisibilitySignal::WindowFocus { focused: false }));
        assert_eq!(
            stream.next().await,
            Some(VisibilitySignal::WindowFocus { focused: false })
        );
    }

    #[tokio::test]
    async fn test_foreign_signals_are_dropped() {
        let (source, sender) = ChannelVisibilitySource::new(VisibilitySourceKind::WindowFocus);
        let mut stream = source.subscribe().await.unwrap();

        sender.send(VisibilitySignal::PageVisibility { hidden: true });
        sender.send(VisibilitySignal::WindowFocus { focused: true });

        assert_eq!(
            stream.next().await,
            Some(VisibilitySignal::WindowFocus { focused: true })
        );
    }

    #[tokio::test]
    async fn test_single_subscription() {
        let (source, _sender) = ChannelVisibilitySource::new(VisibilitySourceKind::Lifecycle);
        assert!(source.subscribe().await.is_ok());
        assert!(matches!(
            source.subscribe().await,
            Err(BridgeError::OperationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_source() {
        let source = ChannelVisibilitySource::unsupported(VisibilitySourceKind::PageVisibility);
        assert!(!source.is_supported());
        assert!(matches!(
            source.subscribe().await,
            Err(BridgeError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_stream_closes_when_sender_dropped() {
        let (source, sender) = ChannelVisibilitySource::new(VisibilitySourceKind::Lifecycle);
        let mut stream = source.subscribe().await.unwrap();
        drop(sender);
        assert_eq!(stream.next().await, None);
    }
}
