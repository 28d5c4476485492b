//! Bone transform timelines. Rotation, translation and shear key offsets from
//! the setup pose; scale keys a factor of the setup scale.

use serde::{Deserialize, Serialize};

use super::{assert_target, CurveFrames, KeyframeTimeline};
use crate::error::TimelineResult;
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{blend, lerp, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Skeleton, SkeletonData};

/// Wrap degrees into `(-180, 180]`.
#[inline]
pub(crate) fn wrap_degrees(degrees: f32) -> f32 {
    degrees - (degrees / 360.0 - 0.5).ceil() * 360.0
}

/// Sign with `signum(0) == 0`.
#[inline]
fn signum(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotateTimeline {
    bone_index: usize,
    keys: CurveFrames,
    /// Degrees, relative to the setup rotation.
    rotations: Vec<f32>,
}

impl RotateTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            bone_index: 0,
            keys: CurveFrames::new(frame_count),
            rotations: vec![0.0; frame_count],
        }
    }

    pub fn bone_index(&self) -> usize {
        self.bone_index
    }

    pub fn set_bone_index(&mut self, bone_index: usize) {
        self.bone_index = bone_index;
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, degrees: f32) {
        self.keys.set_time(frame, time);
        self.rotations[frame] = degrees;
    }

    pub fn rotations(&self) -> &[f32] {
        &self.rotations
    }

    pub fn keys(&self) -> &CurveFrames {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut CurveFrames {
        &mut self.keys
    }
}

impl KeyframeTimeline for RotateTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::Rotate
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Continuous
    }

    fn frames(&self) -> &[f32] {
        self.keys.frames()
    }

    fn payload_len(&self) -> usize {
        self.rotations.len()
    }

    fn target_index(&self) -> usize {
        self.bone_index
    }

    fn target_count(&self, data: &SkeletonData) -> Option<usize> {
        Some(data.bones.len())
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
        assert_target(self.timeline_type(), self.bone_index, skeleton.bones.len());
        let setup = skeleton.data.bones[self.bone_index].rotation;
        let bone = &mut skeleton.bones[self.bone_index];

        let sample = self.keys.sample(time, pose, direction);
        let Some((left, right, t)) = self.keys.segment(sample) else {
            if sample == Sample::Setup {
                bone.rotation = setup;
            }
            return;
        };

        let r = if left == right {
            self.rotations[left]
        } else {
            let from = self.rotations[left];
            wrap_degrees(from + wrap_degrees(self.rotations[right] - from) * t)
        };
        match pose {
            MixPose::Setup => bone.rotation = setup + r * alpha,
            MixPose::Current => {
                bone.rotation += wrap_degrees(setup + r - bone.rotation) * alpha;
            }
        }
    }
}

/// Shared `(x, y)` keys for translate, scale and shear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct PairKeys {
    bone_index: usize,
    keys: CurveFrames,
    values: Vec<[f32; 2]>,
}

impl PairKeys {
    fn new(frame_count: usize, fill: f32) -> Self {
        Self {
            bone_index: 0,
            keys: CurveFrames::new(frame_count),
            values: vec![[fill; 2]; frame_count],
        }
    }

    fn set_frame(&mut self, frame: usize, time: f32, x: f32, y: f32) {
        self.keys.set_time(frame, time);
        self.values[frame] = [x, y];
    }

    /// Resolved sample plus the interpolated pair, `None` for revert/no-op.
    fn value(
        &self,
        time: f32,
        pose: MixPose,
        direction: MixDirection,
    ) -> (Sample, Option<[f32; 2]>) {
        let sample = self.keys.sample(time, pose, direction);
        let value = self.keys.segment(sample).map(|(left, right, t)| {
            let a = self.values[left];
            let b = self.values[right];
            [lerp(a[0], b[0], t), lerp(a[1], b[1], t)]
        });
        (sample, value)
    }
}

macro_rules! pair_timeline_common {
    ($name:ident, $kind:expr) => {
        impl $name {
            pub fn bone_index(&self) -> usize {
                self.inner.bone_index
            }

            pub fn set_bone_index(&mut self, bone_index: usize) {
                self.inner.bone_index = bone_index;
            }

            pub fn set_frame(&mut self, frame: usize, time: f32, x: f32, y: f32) {
                self.inner.set_frame(frame, time, x, y);
            }

            pub fn values(&self) -> &[[f32; 2]] {
                &self.inner.values
            }

            pub fn keys(&self) -> &CurveFrames {
                &self.inner.keys
            }

            pub fn keys_mut(&mut self) -> &mut CurveFrames {
                &mut self.inner.keys
            }
        }

        impl KeyframeTimeline for $name {
            fn timeline_type(&self) -> TimelineType {
                $kind
            }

            fn property_kind(&self) -> PropertyKind {
                PropertyKind::Continuous
            }

            fn frames(&self) -> &[f32] {
                self.inner.keys.frames()
            }

            fn payload_len(&self) -> usize {
                self.inner.values.len()
            }

            fn target_index(&self) -> usize {
                self.inner.bone_index
            }

            fn target_count(&self, data: &SkeletonData) -> Option<usize> {
                Some(data.bones.len())
            }

            fn validate_frames(&self) -> TimelineResult<()> {
                self.inner.keys.check($kind, self.payload_len())
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
                assert_target($kind, self.inner.bone_index, skeleton.bones.len());
                self.pose_bone(skeleton, time, alpha, pose, direction);
            }
        }
    };
}

/// Keys `(x, y)` offsets added to the setup position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslateTimeline {
    #[serde(flatten)]
    inner: PairKeys,
}

impl TranslateTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            inner: PairKeys::new(frame_count, 0.0),
        }
    }

    fn pose_bone(
        &self,
        skeleton: &mut Skeleton,
        time: f32,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        let data = &skeleton.data.bones[self.inner.bone_index];
        let bone = &mut skeleton.bones[self.inner.bone_index];
        match self.inner.value(time, pose, direction) {
            (_, Some([x, y])) => {
                bone.x = blend(data.x, bone.x, data.x + x, alpha, pose);
                bone.y = blend(data.y, bone.y, data.y + y, alpha, pose);
            }
            (Sample::Setup, None) => {
                bone.x = data.x;
                bone.y = data.y;
            }
            _ => {}
        }
    }
}

pair_timeline_common!(TranslateTimeline, TimelineType::Translate);

/// Keys `(x, y)` offsets added to the setup shear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShearTimeline {
    #[serde(flatten)]
    inner: PairKeys,
}

impl ShearTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            inner: PairKeys::new(frame_count, 0.0),
        }
    }

    fn pose_bone(
        &self,
        skeleton: &mut Skeleton,
        time: f32,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        let data = &skeleton.data.bones[self.inner.bone_index];
        let bone = &mut skeleton.bones[self.inner.bone_index];
        match self.inner.value(time, pose, direction) {
            (_, Some([x, y])) => {
                bone.shear_x = blend(data.shear_x, bone.shear_x, data.shear_x + x, alpha, pose);
                bone.shear_y = blend(data.shear_y, bone.shear_y, data.shear_y + y, alpha, pose);
            }
            (Sample::Setup, None) => {
                bone.shear_x = data.shear_x;
                bone.shear_y = data.shear_y;
            }
            _ => {}
        }
    }
}

pair_timeline_common!(ShearTimeline, TimelineType::Shear);

/// Keys `(x, y)` factors of the setup scale.
///
/// While blending (`alpha < 1`) the sign of the result is taken from the base
/// pose when mixing out and from the key when mixing in, so a fade between
/// mirrored poses flips once instead of collapsing through zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleTimeline {
    #[serde(flatten)]
    inner: PairKeys,
}

impl ScaleTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            inner: PairKeys::new(frame_count, 1.0),
        }
    }

    fn pose_bone(
        &self,
        skeleton: &mut Skeleton,
        time: f32,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        let data = &skeleton.data.bones[self.inner.bone_index];
        let bone = &mut skeleton.bones[self.inner.bone_index];
        let (sample, value) = self.inner.value(time, pose, direction);
        let Some([fx, fy]) = value else {
            if sample == Sample::Setup {
                bone.scale_x = data.scale_x;
                bone.scale_y = data.scale_y;
            }
            return;
        };

        let mut x = fx * data.scale_x;
        let mut y = fy * data.scale_y;
        if alpha == 1.0 {
            bone.scale_x = x;
            bone.scale_y = y;
            return;
        }

        let (mut bx, mut by) = match pose {
            MixPose::Setup => (data.scale_x, data.scale_y),
            MixPose::Current => (bone.scale_x, bone.scale_y),
        };
        match direction {
            MixDirection::Out => {
                x = x.abs() * signum(bx);
                y = y.abs() * signum(by);
            }
            MixDirection::In => {
                bx = bx.abs() * signum(x);
                by = by.abs() * signum(y);
            }
        }
        bone.scale_x = lerp(bx, x, alpha);
        bone.scale_y = lerp(by, y, alpha);
    }
}

pair_timeline_common!(ScaleTimeline, TimelineType::Scale);
