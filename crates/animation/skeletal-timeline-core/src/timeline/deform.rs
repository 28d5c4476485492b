use serde::{Deserialize, Serialize};

use super::{assert_target, CurveFrames, KeyframeTimeline};
use crate::error::{TimelineError, TimelineResult};
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{lerp, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Skeleton, SkeletonData};

/// Keys the vertices of one mesh attachment shown in one slot.
///
/// The timeline only acts while the slot shows `attachment`. Results land in
/// the slot's deform buffer, where an empty buffer stands for the setup
/// vertices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeformTimeline {
    slot_index: usize,
    attachment: String,
    keys: CurveFrames,
    frame_vertices: Vec<Vec<f32>>,
}

impl DeformTimeline {
    pub fn new(frame_count: usize, attachment: impl Into<String>) -> Self {
        Self {
            slot_index: 0,
            attachment: attachment.into(),
            keys: CurveFrames::new(frame_count),
            frame_vertices: vec![Vec::new(); frame_count],
        }
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn set_slot_index(&mut self, slot_index: usize) {
        self.slot_index = slot_index;
    }

    pub fn attachment(&self) -> &str {
        &self.attachment
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, vertices: Vec<f32>) {
        self.keys.set_time(frame, time);
        self.frame_vertices[frame] = vertices;
    }

    pub fn frame_vertices(&self) -> &[Vec<f32>] {
        &self.frame_vertices
    }

    pub fn keys(&self) -> &CurveFrames {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut CurveFrames {
        &mut self.keys
    }

    fn vertex_count(&self) -> usize {
        self.frame_vertices.first().map_or(0, Vec::len)
    }
}

impl KeyframeTimeline for DeformTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::Deform
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Continuous
    }

    fn frames(&self) -> &[f32] {
        self.keys.frames()
    }

    fn payload_len(&self) -> usize {
        self.frame_vertices.len()
    }

    fn target_index(&self) -> usize {
        self.slot_index
    }

    fn target_count(&self, data: &SkeletonData) -> Option<usize> {
        Some(data.slots.len())
    }

    fn validate_frames(&self) -> TimelineResult<()> {
        self.keys.check(self.timeline_type(), self.payload_len())?;
        let expected = self.vertex_count();
        for (frame, vertices) in self.frame_vertices.iter().enumerate() {
            if vertices.len() != expected {
                return Err(TimelineError::DeformVertexCount {
                    frame,
                    expected,
                    actual: vertices.len(),
                });
            }
        }
        Ok(())
    }

    fn validate(&self, data: &SkeletonData) -> TimelineResult<()> {
        self.validate_frames()?;
        let len = data.slots.len();
        if self.slot_index >= len {
            return Err(TimelineError::TargetOutOfRange {
                kind: self.timeline_type(),
                index: self.slot_index,
                len,
            });
        }
        if let Some(setup) = data
            .skin
            .get(self.slot_index, &self.attachment)
            .and_then(|a| a.setup_vertices())
        {
            if setup.len() != self.vertex_count() {
                return Err(TimelineError::DeformVertexCount {
                    frame: 0,
                    expected: setup.len(),
                    actual: self.vertex_count(),
                });
            }
        }
        Ok(())
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
        let slot = &mut skeleton.slots[self.slot_index];
        if slot.attachment.as_deref() != Some(self.attachment.as_str()) {
            return;
        }
        let Some(setup) = skeleton
            .data
            .skin
            .get(self.slot_index, &self.attachment)
            .and_then(|a| a.setup_vertices())
        else {
            log::trace!(
                "deform timeline: attachment '{}' on slot {} has no vertices",
                self.attachment,
                self.slot_index
            );
            return;
        };

        let sample = self.keys.sample(time, pose, direction);
        let Some((left, right, t)) = self.keys.segment(sample) else {
            if sample == Sample::Setup {
                slot.deform.clear();
            }
            return;
        };

        let vertex_count = self.vertex_count();
        assert!(
            setup.len() == vertex_count,
            "deform timeline keys {vertex_count} values but attachment '{}' has {} setup vertices",
            self.attachment,
            setup.len()
        );
        let mut alpha = alpha;
        if slot.deform.len() != vertex_count {
            // Never mix from an uninitialized buffer.
            if pose == MixPose::Current {
                alpha = 1.0;
            }
            slot.deform.resize(vertex_count, 0.0);
        }

        let from = &self.frame_vertices[left];
        let to = &self.frame_vertices[right];
        for (i, out) in slot.deform.iter_mut().enumerate() {
            let value = lerp(from[i], to[i], t);
            *out = if alpha == 1.0 {
                value
            } else {
                match pose {
                    MixPose::Setup => lerp(setup[i], value, alpha),
                    MixPose::Current => lerp(*out, value, alpha),
                }
            };
        }
    }
}
