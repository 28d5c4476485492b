use serde::{Deserialize, Serialize};

use super::{assert_frame_count, KeyframeTimeline};
use crate::error::{TimelineError, TimelineResult};
use crate::event::Event;
use crate::ids::TimelineType;
use crate::mix::{sample, MixDirection, MixPose, PropertyKind, Sample};
use crate::skeleton::{Skeleton, SkeletonData};

/// Keys the slot draw order of the whole skeleton. Discrete, same mix rules
/// as attachment switching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawOrderTimeline {
    frames: Vec<f32>,
    /// Per frame, draw position -> setup slot index. `None` is the setup order.
    draw_orders: Vec<Option<Vec<usize>>>,
}

impl DrawOrderTimeline {
    pub fn new(frame_count: usize) -> Self {
        assert_frame_count(frame_count);
        Self {
            frames: vec![0.0; frame_count],
            draw_orders: vec![None; frame_count],
        }
    }

    pub fn set_frame(&mut self, frame: usize, time: f32, draw_order: Option<Vec<usize>>) {
        self.frames[frame] = time;
        self.draw_orders[frame] = draw_order;
    }

    pub fn draw_orders(&self) -> &[Option<Vec<usize>>] {
        &self.draw_orders
    }
}

fn reset_draw_order(skeleton: &mut Skeleton) {
    for (position, slot) in skeleton.draw_order.iter_mut().enumerate() {
        *slot = position;
    }
}

impl KeyframeTimeline for DrawOrderTimeline {
    fn timeline_type(&self) -> TimelineType {
        TimelineType::DrawOrder
    }

    fn property_kind(&self) -> PropertyKind {
        PropertyKind::Discrete
    }

    fn frames(&self) -> &[f32] {
        &self.frames
    }

    fn payload_len(&self) -> usize {
        self.draw_orders.len()
    }

    fn target_count(&self, _data: &SkeletonData) -> Option<usize> {
        None
    }

    fn validate(&self, data: &SkeletonData) -> TimelineResult<()> {
        self.validate_frames()?;
        let slots = data.slots.len();
        for (frame, order) in self.draw_orders.iter().enumerate() {
            let Some(order) = order else { continue };
            let mut seen = vec![false; slots];
            let is_permutation = order.len() == slots
                && order
                    .iter()
                    .all(|&i| i < slots && !std::mem::replace(&mut seen[i], true));
            if !is_permutation {
                return Err(TimelineError::InvalidDrawOrder { frame, slots });
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
        _alpha: f32,
        pose: MixPose,
        direction: MixDirection,
    ) {
        match sample(PropertyKind::Discrete, &self.frames, time, pose, direction) {
            Sample::Setup => reset_draw_order(skeleton),
            Sample::Untouched => {}
            Sample::Key(frame) | Sample::Between { frame, .. } => match &self.draw_orders[frame] {
                None => reset_draw_order(skeleton),
                Some(order) => {
                    assert!(
                        order.len() == skeleton.draw_order.len(),
                        "draw order frame {frame} has {} entries but the skeleton has {} slots",
                        order.len(),
                        skeleton.draw_order.len()
                    );
                    skeleton.draw_order.copy_from_slice(order);
                }
            },
        }
    }
}
