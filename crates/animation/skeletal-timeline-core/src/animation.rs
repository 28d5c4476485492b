//! Animation: a named list of timelines applied together.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{TimelineError, TimelineResult};
use crate::event::Event;
use crate::ids::PropertyId;
use crate::mix::{MixDirection, MixPose};
use crate::skeleton::{Skeleton, SkeletonData};
use crate::timeline::{KeyframeTimeline, Timeline};

/// Immutable after construction; share across skeletons behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    name: String,
    timelines: Vec<Timeline>,
    /// Seconds.
    duration: f32,
}

impl Animation {
    /// Builds an animation after checking every timeline's frames.
    pub fn new(
        name: impl Into<String>,
        timelines: Vec<Timeline>,
        duration: f32,
    ) -> TimelineResult<Self> {
        let animation = Self::new_unchecked(name, timelines, duration);
        animation.validate_frames()?;
        log::debug!(
            "animation '{}': {} timelines, {}s",
            animation.name,
            animation.timelines.len(),
            animation.duration
        );
        Ok(animation)
    }

    /// Builds an animation without validation, for loaders that already did it.
    pub fn new_unchecked(name: impl Into<String>, timelines: Vec<Timeline>, duration: f32) -> Self {
        Self {
            name: name.into(),
            timelines,
            duration,
        }
    }

    /// Parse an animation from its JSON form.
    pub fn from_json(s: &str) -> TimelineResult<Self> {
        Self::from_json_with(s, &Config::default())
    }

    pub fn from_json_with(s: &str, cfg: &Config) -> TimelineResult<Self> {
        let animation: Animation =
            serde_json::from_str(s).map_err(|e| TimelineError::Parse(e.to_string()))?;
        if cfg.validate_on_load {
            animation.validate_frames()?;
        }
        log::debug!(
            "loaded animation '{}' ({} timelines)",
            animation.name,
            animation.timelines.len()
        );
        Ok(animation)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    pub fn has_timeline(&self, id: PropertyId) -> bool {
        self.timelines.iter().any(|t| t.property_id() == id)
    }

    /// Checks that hold regardless of the skeleton.
    pub fn validate_frames(&self) -> TimelineResult<()> {
        self.timelines.iter().try_for_each(|t| t.validate_frames())
    }

    /// Checks every precondition `apply` would otherwise assert for `data`.
    pub fn validate_for(&self, data: &SkeletonData) -> TimelineResult<()> {
        self.timelines.iter().try_for_each(|t| t.validate(data))
    }

    /// Applies every timeline in order. With `looping` and a positive
    /// duration, both times wrap into `[0, duration)`.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        skeleton: &mut Skeleton,
        last_time: f32,
        time: f32,
        looping: bool,
        mut events: Option<&mut Vec<Event>>,
        alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        let mut last_time = last_time;
        let mut time = time;
        if looping && self.duration > 0.0 {
            time %= self.duration;
            if last_time > 0.0 {
                last_time %= self.duration;
            }
        }

        for timeline in &self.timelines {
            timeline.apply(
                skeleton,
                last_time,
                time,
                events.as_deref_mut(),
                alpha,
                pose,
                direction,
            );
        }
    }
}
