//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the audio core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the playback crates depend on.
//! It establishes the logging conventions, the fail-fast configuration
//! builder and the broadcast channel used to observe the audio manager.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{AudioConfig, AudioConfigBuilder, AudioSettings};
pub use error::{Error, Result};
pub use events::{AudioEvent, EventBus, EventSeverity, EventStream};
