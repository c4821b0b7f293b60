//! Host doubles shared by the integration suites.

#![allow(dead_code)]

use bridge_desktop::AssetTable;
use bridge_traits::audio::{AudioHandle, OnEnd, PlaybackId};
use bridge_traits::error::{BridgeError, Result};
use core_audio::AudioManager;
use core_runtime::config::{AudioConfig, AudioSettings};
use core_runtime::events::EventBus;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    plays: usize,
    stops: usize,
    active: Vec<PlaybackId>,
    looping: bool,
    volume: f32,
    on_end: Option<OnEnd>,
    loop_sets: usize,
    on_end_sets: usize,
}

/// Handle that records every call and can fire `on_end` synchronously from
/// `stop`, the way browser audio elements do.
#[derive(Default)]
pub struct RecordingHandle {
    inner: Mutex<Recorded>,
    refuse: bool,
    fire_on_stop: bool,
}

impl RecordingHandle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            refuse: true,
            ..Default::default()
        })
    }

    pub fn firing_on_stop() -> Arc<Self> {
        Arc::new(Self {
            fire_on_stop: true,
            ..Default::default()
        })
    }

    pub fn plays(&self) -> usize {
        self.inner.lock().unwrap().plays
    }

    pub fn stops(&self) -> usize {
        self.inner.lock().unwrap().stops
    }

    pub fn is_playing(&self) -> bool {
        !self.inner.lock().unwrap().active.is_empty()
    }

    pub fn active(&self) -> usize {
        self.inner.lock().unwrap().active.len()
    }

    pub fn loop_sets(&self) -> usize {
        self.inner.lock().unwrap().loop_sets
    }

    pub fn on_end_sets(&self) -> usize {
        self.inner.lock().unwrap().on_end_sets
    }

    pub fn has_on_end(&self) -> bool {
        self.inner.lock().unwrap().on_end.is_some()
    }

    /// Simulate natural completion of every instance.
    pub fn finish(&self) {
        let callback = {
            let mut inner = self.inner.lock().unwrap();
            inner.active.clear();
            inner.on_end.clone()
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl AudioHandle for RecordingHandle {
    fn play(&self) -> Result<PlaybackId> {
        if self.refuse {
            return Err(BridgeError::AudioDevice("autoplay blocked".into()));
        }
        let id = PlaybackId::new();
        let mut inner = self.inner.lock().unwrap();
        inner.plays += 1;
        inner.active.push(id);
        Ok(id)
    }

    fn stop(&self, id: Option<PlaybackId>) {
        let callback = {
            let mut inner = self.inner.lock().unwrap();
            inner.stops += 1;
            let before = inner.active.len();
            match id {
                Some(id) => inner.active.retain(|active| *active != id),
                None => inner.active.clear(),
            }
            if self.fire_on_stop && inner.active.len() < before {
                inner.on_end.clone()
            } else {
                None
            }
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    fn set_loop(&self, looping: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.looping = looping;
        inner.loop_sets += 1;
    }

    fn is_looping(&self) -> bool {
        self.inner.lock().unwrap().looping
    }

    fn set_volume(&self, volume: f32) {
        self.inner.lock().unwrap().volume = volume;
    }

    fn volume(&self) -> f32 {
        self.inner.lock().unwrap().volume
    }

    fn set_on_end(&self, callback: Option<OnEnd>) {
        let mut inner = self.inner.lock().unwrap();
        inner.on_end = callback;
        inner.on_end_sets += 1;
    }
}

/// Asset table plus the recording handles registered in it.
pub struct Fixture {
    pub table: Arc<AssetTable>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            table: Arc::new(AssetTable::new()),
        }
    }

    pub fn add(&self, name: &str) -> Arc<RecordingHandle> {
        self.add_handle(name, RecordingHandle::new())
    }

    pub fn add_handle(&self, name: &str, handle: Arc<RecordingHandle>) -> Arc<RecordingHandle> {
        self.table.insert(name, handle.clone() as Arc<dyn AudioHandle>);
        handle
    }

    pub fn manager(&self) -> AudioManager {
        self.manager_with(AudioSettings::default(), None)
    }

    pub fn manager_with(&self, settings: AudioSettings, bus: Option<EventBus>) -> AudioManager {
        let mut builder = AudioConfig::builder()
            .asset_provider(self.table.clone())
            .settings(settings);
        if let Some(bus) = bus {
            builder = builder.event_bus(bus);
        }
        AudioManager::new(&builder.build().unwrap()).unwrap()
    }
}
