//! Timeline family.
//!
//! Every variant owns a `frames` time array plus parallel payload arrays of the
//! same length, and implements [`KeyframeTimeline`]. Discrete variants hold
//! the left keyframe; continuous variants interpolate through [`CurveFrames`]
//! and blend with alpha. [`Timeline`] is the tagged union the loader builds and
//! [`crate::Animation`] stores.

mod attachment;
mod bone;
mod color;
mod deform;
mod draw_order;
mod event;
mod ik;

pub use attachment::AttachmentTimeline;
pub use bone::{RotateTimeline, ScaleTimeline, ShearTimeline, TranslateTimeline};
pub use color::ColorTimeline;
pub use deform::DeformTimeline;
pub use draw_order::DrawOrderTimeline;
pub use event::EventTimeline;
pub use ik::IkConstraintTimeline;

use serde::{Deserialize, Serialize};

use crate::curve::Curves;
use crate::error::{TimelineError, TimelineResult};
use crate::event::Event;
use crate::ids::{PropertyId, TimelineType};
use crate::mix::{sample, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Skeleton, SkeletonData};

/// Capability shared by all timeline variants.
pub trait KeyframeTimeline: Send + Sync {
    fn timeline_type(&self) -> TimelineType;

    fn property_kind(&self) -> PropertyKind;

    /// Keyframe times, sorted ascending.
    fn frames(&self) -> &[f32];

    /// Length of the payload arrays parallel to `frames`.
    fn payload_len(&self) -> usize;

    /// Slot, bone or constraint driven by this timeline; 0 when untargeted.
    fn target_index(&self) -> usize {
        0
    }

    /// Number of skeleton objects `target_index` may address, `None` when the
    /// timeline drives the skeleton as a whole.
    fn target_count(&self, data: &SkeletonData) -> Option<usize>;

    #[inline]
    fn frame_count(&self) -> usize {
        self.frames().len()
    }

    #[inline]
    fn property_id(&self) -> PropertyId {
        PropertyId::new(self.timeline_type(), self.target_index())
    }

    /// Frame ordering and payload lengths, independent of any skeleton.
    fn validate_frames(&self) -> TimelineResult<()> {
        check_frames(self.timeline_type(), self.frames(), self.payload_len())
    }

    /// Everything `apply` asserts, reported instead of panicking.
    fn validate(&self, data: &SkeletonData) -> TimelineResult<()> {
        self.validate_frames()?;
        if let Some(len) = self.target_count(data) {
            let index = self.target_index();
            if index >= len {
                return Err(TimelineError::TargetOutOfRange {
                    kind: self.timeline_type(),
                    index,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Pose the skeleton for `time`.
    ///
    /// `last_time` is only read by event firing. `events` may be `None` when
    /// the caller is not interested in events.
    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        skeleton: &mut Skeleton,
        last_time: f32,
        time: f32,
        events: Option<&mut Vec<Event>>,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    );
}

pub(crate) fn check_frames(
    kind: TimelineType,
    frames: &[f32],
    payload: usize,
) -> TimelineResult<()> {
    if frames.is_empty() {
        return Err(TimelineError::EmptyFrames { kind });
    }
    if payload != frames.len() {
        return Err(TimelineError::PayloadLength {
            kind,
            frames: frames.len(),
            payload,
        });
    }
    let mut previous = f32::NEG_INFINITY;
    for (frame, &time) in frames.iter().enumerate() {
        if !time.is_finite() {
            return Err(TimelineError::NonFiniteTime { kind, frame, time });
        }
        if time < previous {
            return Err(TimelineError::NonMonotonicFrames {
                kind,
                frame,
                time,
                previous,
            });
        }
        previous = time;
    }
    Ok(())
}

#[inline]
#[track_caller]
pub(crate) fn assert_target(kind: TimelineType, index: usize, len: usize) {
    assert!(
        index < len,
        "{kind:?} timeline targets index {index} but the skeleton has {len}"
    );
}

#[inline]
#[track_caller]
pub(crate) fn assert_frame_count(frame_count: usize) {
    assert!(frame_count > 0, "a timeline needs at least one frame");
}

/// Keyframe times plus one easing curve per segment, shared by the
/// continuous variants. Payloads stay in the owning timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveFrames {
    frames: Vec<f32>,
    curves: Curves,
}

impl CurveFrames {
    pub fn new(frame_count: usize) -> Self {
        assert_frame_count(frame_count);
        Self {
            frames: vec![0.0; frame_count],
            curves: Curves::new(frame_count),
        }
    }

    #[inline]
    pub fn frames(&self) -> &[f32] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn set_time(&mut self, frame: usize, time: f32) {
        self.frames[frame] = time;
    }

    pub fn curves(&self) -> &Curves {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut Curves {
        &mut self.curves
    }

    /// Frame checks plus one curve per segment.
    pub fn check(&self, kind: TimelineType, payload: usize) -> TimelineResult<()> {
        check_frames(kind, &self.frames, payload)?;
        let expected = self.frames.len() - 1;
        if self.curves.len() != expected {
            return Err(TimelineError::CurveCount {
                kind,
                expected,
                actual: self.curves.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn sample(&self, time: f32, pose: MixPose, direction: MixDirection) -> Sample {
        sample(PropertyKind::Continuous, &self.frames, time, pose, direction)
    }

    /// `(left, right, eased)` for a sample that selects keyframe data. A held
    /// frame reports `left == right`.
    #[inline]
    pub fn segment(&self, sample: Sample) -> Option<(usize, usize, f32)> {
        match sample {
            Sample::Setup | Sample::Untouched => None,
            Sample::Key(frame) => Some((frame, frame, 0.0)),
            Sample::Between { frame, percent } => {
                Some((frame, frame + 1, self.curves.percent(frame, percent)))
            }
        }
    }
}

/// Tagged union over every timeline variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Timeline {
    Attachment(AttachmentTimeline),
    Rotate(RotateTimeline),
    Translate(TranslateTimeline),
    Scale(ScaleTimeline),
    Shear(ShearTimeline),
    Color(ColorTimeline),
    Deform(DeformTimeline),
    DrawOrder(DrawOrderTimeline),
    Event(EventTimeline),
    IkConstraint(IkConstraintTimeline),
}

macro_rules! timeline_variants {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        impl Timeline {
            #[inline]
            pub fn as_keyframes(&self) -> &dyn KeyframeTimeline {
                match self {
                    $(Timeline::$variant(t) => t,)*
                }
            }
        }

        $(
            impl From<$ty> for Timeline {
                fn from(t: $ty) -> Self {
                    Timeline::$variant(t)
                }
            }
        )*
    };
}

timeline_variants!(
    Attachment(AttachmentTimeline),
    Rotate(RotateTimeline),
    Translate(TranslateTimeline),
    Scale(ScaleTimeline),
    Shear(ShearTimeline),
    Color(ColorTimeline),
    Deform(DeformTimeline),
    DrawOrder(DrawOrderTimeline),
    Event(EventTimeline),
    IkConstraint(IkConstraintTimeline),
);

impl KeyframeTimeline for Timeline {
    fn timeline_type(&self) -> TimelineType {
        self.as_keyframes().timeline_type()
    }

    fn property_kind(&self) -> PropertyKind {
        self.as_keyframes().property_kind()
    }

    fn frames(&self) -> &[f32] {
        self.as_keyframes().frames()
    }

    fn payload_len(&self) -> usize {
        self.as_keyframes().payload_len()
    }

    fn target_index(&self) -> usize {
        self.as_keyframes().target_index()
    }

    fn target_count(&self, data: &SkeletonData) -> Option<usize> {
        self.as_keyframes().target_count(data)
    }

    fn validate_frames(&self) -> TimelineResult<()> {
        self.as_keyframes().validate_frames()
    }

    fn validate(&self, data: &SkeletonData) -> TimelineResult<()> {
        self.as_keyframes().validate(data)
    }

    #[inline]
    fn apply(
        &self,
        skeleton: &mut Skeleton,
        last_time: f32,
        time: f32,
        events: Option<&mut Vec<Event>>,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        self.as_keyframes()
            .apply(skeleton, last_time, time, events, alpha, pose, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_frames_reports_each_defect() {
        let kind = TimelineType::Rotate;
        assert_eq!(check_frames(kind, &[0.0, 0.0, 1.0], 3), Ok(()));
        assert_eq!(
            check_frames(kind, &[], 0),
            Err(TimelineError::EmptyFrames { kind })
        );
        assert_eq!(
            check_frames(kind, &[0.0, 1.0], 3),
            Err(TimelineError::PayloadLength {
                kind,
                frames: 2,
                payload: 3
            })
        );
        assert!(matches!(
            check_frames(kind, &[0.0, 2.0, 1.0], 3),
            Err(TimelineError::NonMonotonicFrames { frame: 2, .. })
        ));
        assert!(matches!(
            check_frames(kind, &[0.0, f32::NAN], 2),
            Err(TimelineError::NonFiniteTime { frame: 1, .. })
        ));
    }

    #[test]
    fn curve_frames_segment() {
        let mut keys = CurveFrames::new(3);
        keys.set_time(0, 0.0);
        keys.set_time(1, 1.0);
        keys.set_time(2, 2.0);
        keys.curves_mut().set_stepped(1);

        let s = keys.sample(0.5, MixPose::Current, MixDirection::In);
        assert_eq!(keys.segment(s), Some((0, 1, 0.5)));
        let s = keys.sample(1.5, MixPose::Current, MixDirection::In);
        assert_eq!(keys.segment(s), Some((1, 2, 0.0)));
        let s = keys.sample(3.0, MixPose::Current, MixDirection::In);
        assert_eq!(keys.segment(s), Some((2, 2, 0.0)));
        assert_eq!(keys.segment(Sample::Setup), None);
    }

    #[test]
    #[should_panic(expected = "at least one frame")]
    fn zero_frames_panics() {
        CurveFrames::new(0);
    }
}
