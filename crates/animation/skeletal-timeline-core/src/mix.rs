//! Pose-mix protocol shared by every timeline.
//!
//! Each `apply` call carries a [`MixPose`] and a [`MixDirection`]. [`sample`]
//! resolves them, together with the query time and the timeline's frames, into
//! a single [`Sample`] describing what the timeline must do. The rules are:
//!
//! - discrete property, `Out` + `Setup`: revert to setup, ignoring time;
//! - before the first frame: revert with `Setup`, leave untouched with `Current`;
//! - at or after the last frame: hold the last frame;
//! - inside: hold the left frame (discrete) or interpolate the segment (continuous).

use serde::{Deserialize, Serialize};

use crate::search::binary_search;

/// Which pose a timeline blends from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MixPose {
    /// Start from the skeleton's setup (bind) pose.
    Setup,
    /// Start from whatever the skeleton currently holds.
    Current,
}

/// Whether the owning animation is mixing in or out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MixDirection {
    In,
    Out,
}

/// Whether values can be interpolated between keyframes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PropertyKind {
    Discrete,
    Continuous,
}

/// Outcome of resolving one `apply` call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sample {
    /// Restore the setup value.
    Setup,
    /// Leave the target as it is.
    Untouched,
    /// Use the value of this frame as is.
    Key(usize),
    /// Between `frame` and `frame + 1`; `percent` is the linear position of
    /// the query time inside the segment, in `[0, 1)`.
    Between { frame: usize, percent: f32 },
}

/// Resolve the pose-mix protocol for one call.
///
/// `frames` must be non-empty and sorted.
pub fn sample(
    kind: PropertyKind,
    frames: &[f32],
    time: f32,
    pose: MixPose,
    direction: MixDirection,
) -> Sample {
    assert!(!frames.is_empty(), "timeline has no frames");

    if kind == PropertyKind::Discrete
        && direction == MixDirection::Out
        && pose == MixPose::Setup
    {
        return Sample::Setup;
    }

    if time < frames[0] {
        return match pose {
            MixPose::Setup => Sample::Setup,
            MixPose::Current => Sample::Untouched,
        };
    }

    let last = frames.len() - 1;
    if time >= frames[last] {
        return Sample::Key(last);
    }

    // frames[frame] <= time < frames[frame + 1]
    let frame = binary_search(frames, time, 1) - 1;
    match kind {
        PropertyKind::Discrete => Sample::Key(frame),
        PropertyKind::Continuous => {
            let start = frames[frame];
            let percent = (time - start) / (frames[frame + 1] - start);
            Sample::Between { frame, percent }
        }
    }
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Combine a computed value with the pose selected by `pose`, weighted by `alpha`.
#[inline]
pub fn blend(setup: f32, current: f32, value: f32, alpha: f32, pose: MixPose) -> f32 {
    match pose {
        MixPose::Setup => lerp(setup, value, alpha),
        MixPose::Current => lerp(current, value, alpha),
    }
}
