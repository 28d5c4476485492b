//! Per-segment easing curves for continuous timelines.
//!
//! Segment `i` spans frames `i .. i + 1`, so a timeline with `n` frames stores
//! `n - 1` curves. Bezier control points live in the normalized segment space
//! (time and value both in `0..1`), with implicit end points (0,0) and (1,1).

use serde::{Deserialize, Serialize};

/// Bisection steps used to invert the bezier's x polynomial.
const BEZIER_ITERATIONS: usize = 24;
const BEZIER_EPSILON: f32 = 1e-6;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Curve {
    #[default]
    Linear,
    /// Hold the left value until the next frame.
    Stepped,
    Bezier { cx1: f32, cy1: f32, cx2: f32, cy2: f32 },
}

impl Curve {
    /// Map a linear segment position to the eased one.
    #[inline]
    pub fn ease(&self, percent: f32) -> f32 {
        let t = percent.clamp(0.0, 1.0);
        match *self {
            Curve::Linear => t,
            Curve::Stepped => 0.0,
            Curve::Bezier { cx1, cy1, cx2, cy2 } => bezier_ease(t, cx1, cy1, cx2, cy2),
        }
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Solve x(s) = t by bisection, then return y(s).
#[inline]
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Bezier(0,0,1,1) is exactly linear.
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // x stays monotonic only while the control xs stay inside [0,1].
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..BEZIER_ITERATIONS {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < BEZIER_EPSILON {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Parallel array of segment curves, indexed by the segment's left frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Curves {
    segments: Vec<Curve>,
}

impl Curves {
    pub fn new(frame_count: usize) -> Self {
        Self {
            segments: vec![Curve::Linear; frame_count.saturating_sub(1)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn set(&mut self, frame: usize, curve: Curve) {
        self.segments[frame] = curve;
    }

    pub fn set_linear(&mut self, frame: usize) {
        self.set(frame, Curve::Linear);
    }

    pub fn set_stepped(&mut self, frame: usize) {
        self.set(frame, Curve::Stepped);
    }

    pub fn set_bezier(&mut self, frame: usize, cx1: f32, cy1: f32, cx2: f32, cy2: f32) {
        self.set(frame, Curve::Bezier { cx1, cy1, cx2, cy2 });
    }

    pub fn get(&self, frame: usize) -> Curve {
        self.segments[frame]
    }

    /// Eased position inside the segment starting at `frame`.
    #[inline]
    pub fn percent(&self, frame: usize, percent: f32) -> f32 {
        self.segments[frame].ease(percent)
    }

    pub fn as_slice(&self) -> &[Curve] {
        &self.segments
    }
}
