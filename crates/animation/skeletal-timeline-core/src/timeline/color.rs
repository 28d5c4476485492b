use serde::{Deserialize, Serialize};

use super::{assert_target, CurveFrames, KeyframeTimeline};
use crate::error::TimelineResult;
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{blend, lerp, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Color, Skeleton, SkeletonData};

/// Keys an absolute RGBA tint for one slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorTimeline {
    slot_index: usize,
    keys: CurveFrames,
    colors: Vec<Color>,
}

impl ColorTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            slot_index: 0,
            keys: CurveFrames::new(frame_count),
            colors: vec![[1.0; 4]; frame_count],
        }
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn set_slot_index(&mut self, slot_index: usize) {
        self.slot_index = slot_index;
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, color: Color) {
        self.keys.set_time(frame, time);
        self.colors[frame] = color;
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn keys(&self) -> &CurveFrames {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut CurveFrames {
        &mut self.keys
    }
}

impl KeyframeTimeline for ColorTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::Color
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Continuous
    }

    fn frames(&self) -> &[f32] {
        self.keys.frames()
    }

    fn payload_len(&self) -> usize {
        self.colors.len()
    }

    fn target_index(&self) -> usize {
        self.slot_index
    }

    fn target_count(&self, data: &SkeletonData) -> Option<usize> {
        Some(data.slots.len())
    }

    fn validate_frames(&self) -> TimelineResult<()> {
        self.keys.check(self.timeline_type(), self.payload_len())
    }

    fn apply(
        &self,
        skeleton: &mut Skeleton,
        _last_time: f32,
        time: f32,
        _events: Option<&mut Vec<Event>>,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        assert_target(self.timeline_type(), self.slot_index, skeleton.slots.len());
        let setup = skeleton.data.slots[self.slot_index].color;
        let slot = &mut skeleton.slots[self.slot_index];

        let sample = self.keys.sample(time, pose, direction);
        let Some((left, right, t)) = self.keys.segment(sample) else {
            if sample == Sample::Setup {
                slot.color = setup;
            }
            return;
        };

        let (a, b) = (self.colors[left], self.colors[right]);
        for channel in 0..4 {
            let value = lerp(a[channel], b[channel], t);
            slot.color[channel] = if alpha == 1.0 {
                value
            } else {
                blend(setup[channel], slot.color[channel], value, alpha, pose)
            };
        }
    }
}
