//! Loading and playback configuration.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Knobs for building animations and sizing per-skeleton buffers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validate frame ordering and payload lengths when loading an animation.
    pub validate_on_load: bool,
    /// Initial capacity of event buffers handed to `apply`.
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_on_load: true,
            event_capacity: 16,
        }
    }
}

impl Config {
    /// Fresh event sink sized by `event_capacity`.
    pub fn event_buffer(&self) -> Vec<Event> {
        Vec::with_capacity(self.event_capacity)
    }
}
