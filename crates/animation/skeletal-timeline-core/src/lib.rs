//! Skeletal Timeline Core
//!
//! Timeline evaluation and pose mixing for 2D skeletal animation. A timeline
//! maps animation time to the value of one skeleton property (a slot's
//! attachment, a bone's rotation, ...) and writes it onto a [`Skeleton`],
//! blending with what is already there according to `alpha`, [`MixPose`] and
//! [`MixDirection`]. Deciding which animations play, and with which mix
//! parameters, is left to the host's scheduler.

pub mod animation;
pub mod config;
pub mod curve;
pub mod error;
pub mod event;
pub mod ids;
pub mod mix;
pub mod search;
pub mod skeleton;
pub mod timeline;

// Re-exports for consumers (schedulers, loaders)
pub use animation::Animation;
pub use config::Config;
pub use curve::{Curve, Curves};
pub use error::{TimelineError, TimelineResult};
pub use event::{Event, EventData};
pub use ids::{PropertyId, TimelineType};
pub use mix::{MixDirection, MixPose, PropertyKind, Sample};
pub use search::{binary_search, linear_search};
pub use skeleton::{
    Attachment, Bone, BoneData, Color, IkConstraint, IkConstraintData, Skeleton, SkeletonData,
    Skin, Slot, SlotData,
};
pub use timeline::{
    AttachmentTimeline, ColorTimeline, CurveFrames, DeformTimeline, DrawOrderTimeline,
    EventTimeline, IkConstraintTimeline, KeyframeTimeline, RotateTimeline, ScaleTimeline,
    ShearTimeline, Timeline, TranslateTimeline,
};
