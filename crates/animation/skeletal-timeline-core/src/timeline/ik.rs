use serde::{Deserialize, Serialize};

use super::{assert_target, CurveFrames, KeyframeTimeline};
use crate::error::TimelineResult;
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{blend, lerp, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Skeleton, SkeletonData};

/// Keys the mix and bend direction of one IK constraint.
///
/// The mix interpolates and blends like any continuous value. The bend
/// direction is discrete: it takes the left key while mixing in, and while
/// mixing out it reverts to setup (`Setup`) or is left alone (`Current`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IkConstraintTimeline {
    ik_constraint_index: usize,
    keys: CurveFrames,
    mixes: Vec<f32>,
    bend_directions: Vec<i32>,
}

impl IkConstraintTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            ik_constraint_index: 0,
            keys: CurveFrames::new(frame_count),
            mixes: vec![1.0; frame_count],
            bend_directions: vec![1; frame_count],
        }
    }

    pub fn ik_constraint_index(&self) -> usize {
        self.ik_constraint_index
    }

    pub fn set_ik_constraint_index(&mut self, index: usize) {
        self.ik_constraint_index = index;
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, mix: f32, bend_direction: i32) {
        self.keys.set_time(frame, time);
        self.mixes[frame] = mix;
        self.bend_directions[frame] = bend_direction;
    }

    pub fn mixes(&self) -> &[f32] {
        &self.mixes
    }

    pub fn bend_directions(&self) -> &[i32] {
        &self.bend_directions
    }

    pub fn keys(&self) -> &CurveFrames {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut CurveFrames {
        &mut self.keys
    }
}

impl KeyframeTimeline for IkConstraintTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::IkConstraint
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Continuous
    }

    fn frames(&self) -> &[f32] {
        self.keys.frames()
    }

    fn payload_len(&self) -> usize {
        self.mixes.len().min(self.bend_directions.len())
    }

    fn target_index(&self) -> usize {
        self.ik_constraint_index
    }

    fn target_count(&self, data: &SkeletonData) -> Option<usize> {
        Some(data.ik_constraints.len())
    }

    fn validate_frames(&self) -> TimelineResult<()> {
        let kind = self.timeline_type();
        self.keys.check(kind, self.mixes.len())?;
        self.keys.check(kind, self.bend_directions.len())
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
        let index = self.ik_constraint_index;
        assert_target(self.timeline_type(), index, skeleton.ik_constraints.len());
        let data = &skeleton.data.ik_constraints[index];
        let constraint = &mut skeleton.ik_constraints[index];

        let sample = self.keys.sample(time, pose, direction);
        let Some((left, right, t)) = self.keys.segment(sample) else {
            if sample == Sample::Setup {
                constraint.mix = data.mix;
                constraint.bend_direction = data.bend_direction;
            }
            return;
        };

        let mix = lerp(self.mixes[left], self.mixes[right], t);
        constraint.mix = blend(data.mix, constraint.mix, mix, alpha, pose);
        match (direction, pose) {
            (MixDirection::In, _) => constraint.bend_direction = self.bend_directions[left],
            (MixDirection::Out, MixPose::Setup) => constraint.bend_direction = data.bend_direction,
            (MixDirection::Out, MixPose::Current) => {}
        }
    }
}
