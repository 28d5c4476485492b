use serde::{Deserialize, Serialize};

use super::{assert_frame_count, KeyframeTimeline};
use crate::error::{TimelineError, TimelineResult};
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{MixDirection, MixPose, PropertyKind};
use crate::search::binary_search;
use crate::skeleton::{Skeleton, SkeletonData};

/// Fires keyed events into the caller's sink. Pose, direction and alpha do
/// not apply; a caller that wants no events while mixing out passes `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTimeline {
    frames: Vec<f32>,
    events: Vec<Option<Event>>,
}

impl EventTimeline {
    pub fn new(frame_count: usize) -> Self {
        assert_frame_count(frame_count);
        Self {
            frames: vec![0.0; frame_count],
            events: vec![None; frame_count],
        }
    }

    /// The event's time is overwritten with `time`.
    pub fn set_frame(&mut self, frame: usize, time: f32, mut event: Event) {
        event.time = time;
        self.frames[frame] = time;
        self.events[frame] = Some(event);
    }

    pub fn events(&self) -> &[Option<Event>] {
        &self.events
    }

    /// Push events keyed in `(last_time, time]`. When `last_time > time` the
    /// animation looped: the tail after `last_time` fires first, then the
    /// head up to `time`.
    pub fn fire(&self, last_time: f32, time: f32, fired: &mut Vec<Event>) {
        let frames = &self.frames;
        let count = frames.len();
        let mut last_time = last_time;

        if last_time > time {
            self.fire(last_time, f32::MAX, fired);
            last_time = f32::NEG_INFINITY;
        } else if last_time >= frames[count - 1] {
            return;
        }
        if time < frames[0] {
            return;
        }

        let mut frame = if last_time < frames[0] {
            0
        } else {
            binary_search(frames, last_time, 1)
        };
        while frame < count && time >= frames[frame] {
            if let Some(event) = &self.events[frame] {
                fired.push(event.clone());
            }
            frame += 1;
        }
    }
}

impl KeyframeTimeline for EventTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::Event
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Discrete
    }

    fn frames(&self) -> &[f32] {
        &self.frames
    }

    fn payload_len(&self) -> usize {
        self.events.len()
    }

    fn target_count(&self, _data: &SkeletonData) -> Option<usize> {
        None
    }

    fn validate(&self, data: &SkeletonData) -> TimelineResult<()> {
        self.validate_frames()?;
        let len = data.events.len();
        match self.events.iter().flatten().find(|e| e.data >= len) {
            Some(event) => Err(TimelineError::TargetOutOfRange {
                kind: self.timeline_type(),
                index: event.data,
                len,
            }),
            None => Ok(()),
        }
    }

    fn apply(
        &self,
        _skeleton: &mut Skeleton,
        last_time: f32,
        time: f32,
        events: Option<&mut Vec<Event>>,
        _alpha: f32,
        _pose: MixPose,
        _direction: MixDirection,
    ) {
        if let Some(fired) = events {
            self.fire(last_time, time, fired);
        }
    }
}
