//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop hosts
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - [`AssetTable`] - `AudioAssetProvider` backed by an in-memory map that the
//!   host's loader fills with decoded handles
//! - [`ChannelVisibilitySource`] - `VisibilitySource` fed from the window
//!   event loop through a [`VisibilitySender`]
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{AssetTable, ChannelVisibilitySource};
//! use bridge_traits::VisibilitySourceKind;
//! use std::sync::Arc;
//!
//! let assets = Arc::new(AssetTable::new());
//! let (focus, focus_tx) = ChannelVisibilitySource::new(VisibilitySourceKind::WindowFocus);
//!
//! // In the window event handler:
//! // focus_tx.send(VisibilitySignal::WindowFocus { focused });
//! ```

mod assets;
mod visibility;

pub use assets::AssetTable;
pub use visibility::{ChannelVisibilitySource, VisibilitySender};
