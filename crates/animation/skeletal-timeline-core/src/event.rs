//! Event payloads fired by event timelines.

use serde::{Deserialize, Serialize};

/// Setup values of a named event, owned by the skeleton data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub name: String,
    #[serde(default)]
    pub int_value: i32,
    #[serde(default)]
    pub float_value: f32,
    #[serde(default)]
    pub string_value: String,
}

/// One keyed occurrence of an event. Values start from the [`EventData`]
/// defaults and may be overridden per key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Index into `SkeletonData::events`.
    pub data: usize,
    pub time: f32,
    pub int_value: i32,
    pub float_value: f32,
    pub string_value: String,
}

impl Event {
    pub fn new(data_index: usize, data: &EventData, time: f32) -> Self {
        Self {
            data: data_index,
            time,
            int_value: data.int_value,
            float_value: data.float_value,
            string_value: data.string_value.clone(),
        }
    }
}
