//! Error types for timeline validation and loading.
//!
//! `apply` never returns these: a timeline that fails validation is a loader
//! bug and panics on the hot path. Validation lets hosts that cannot afford a
//! panic reject a malformed animation up front.

use thiserror::Error;

use crate::ids::TimelineType;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimelineError {
    #[error("{kind:?} timeline has no frames")]
    EmptyFrames { kind: TimelineType },

    #[error("{kind:?} timeline frame {frame} at {time} precedes the previous frame at {previous}")]
    NonMonotonicFrames {
        kind: TimelineType,
        frame: usize,
        time: f32,
        previous: f32,
    },

    #[error("{kind:?} timeline frame {frame} has non-finite time {time}")]
    NonFiniteTime {
        kind: TimelineType,
        frame: usize,
        time: f32,
    },

    #[error("{kind:?} timeline has {frames} frames but {payload} payload entries")]
    PayloadLength {
        kind: TimelineType,
        frames: usize,
        payload: usize,
    },

    #[error("{kind:?} timeline has {actual} curves, expected {expected}")]
    CurveCount {
        kind: TimelineType,
        expected: usize,
        actual: usize,
    },

    #[error("{kind:?} timeline targets index {index} but the skeleton has {len}")]
    TargetOutOfRange {
        kind: TimelineType,
        index: usize,
        len: usize,
    },

    #[error("deform frame {frame} has {actual} vertices, expected {expected}")]
    DeformVertexCount {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    #[error("draw order frame {frame} is not a permutation of {slots} slots")]
    InvalidDrawOrder { frame: usize, slots: usize },

    #[error("animation json parse error: {0}")]
    Parse(String),
}

pub type TimelineResult<T> = Result<T, TimelineError>;
