use serde::{Deserialize, Serialize};

use super::{assert_frame_count, assert_target, KeyframeTimeline};
use crate::error::TimelineResult;
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{sample, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Skeleton, SkeletonData};

/// Switches the attachment shown by one slot. Attachment names are discrete:
/// the left keyframe is held until the next one, alpha is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttachmentTimeline {
    slot_index: usize,
    frames: Vec<f32>,
    /// `None` or an empty name hides the slot's attachment.
    attachment_names: Vec<Option<String>>,
}

impl AttachmentTimeline {
    pub fn new(frame_count: usize) -> Self {
        assert_frame_count(frame_count);
        Self {
            slot_index: 0,
            frames: vec![0.0; frame_count],
            attachment_names: vec![None; frame_count],
        }
    }

    /// Builds a timeline from parallel key arrays, as a loader reads them.
    /// Fails on empty or unsorted frames and on a length mismatch.
    pub fn from_keys(
        slot_index: usize,
        frames: Vec<f32>,
        attachment_names: Vec<Option<String>>,
    ) -> TimelineResult<Self> {
        let timeline = Self {
            slot_index,
            frames,
            attachment_names,
        };
        timeline.validate_frames()?;
        Ok(timeline)
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn set_slot_index(&mut self, slot_index: usize) {
        self.slot_index = slot_index;
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, attachment_name: Option<String>) {
        self.frames[frame] = time;
        self.attachment_names[frame] = attachment_name;
    }

    pub fn attachment_names(&self) -> &[Option<String>] {
        &self.attachment_names
    }
}

impl KeyframeTimeline for AttachmentTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::Attachment
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Discrete
    }

    fn frames(&self) -> &[f32] {
        &self.frames
    }

    fn payload_len(&self) -> usize {
        self.attachment_names.len()
    }

    fn target_index(&self) -> usize {
        self.slot_index
    }

    fn target_count(&self, data: &SkeletonData) -> Option<usize> {
        Some(data.slots.len())
    }

    fn apply(
        &self,
        skeleton: &mut Skeleton,
        _last_time: f32,
        time: f32,
        _events: Option<&mut Vec<Event>>,
        _alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        assert_target(self.timeline_type(), self.slot_index, skeleton.slots.len());

        match sample(PropertyKind::Discrete, &self.frames, time, pose, direction) {
            Sample::Setup => skeleton.reset_slot_attachment(self.slot_index),
            Sample::Untouched => {}
            Sample::Key(frame) | Sample::Between { frame, .. } => {
                skeleton.set_attachment(self.slot_index, self.attachment_names[frame].as_deref());
            }
        }
    }
}
