//! Size rescaling, fit-to-surface and zoom-dependent scaling.
//!
//! # Coordinate Spaces
//!
//! - **Graph space**: raw `x`/`y` from the payload.
//! - **Stage space**: graph space fitted into the surface with a margin. At
//!   zoom 1 one stage unit is one pixel.
//! - **Screen space**: stage space after the pan/zoom view transform.
//!
//! Drawing happens in stage space with the view transform applied to the
//! canvas, so sizes produced here are stage-space values.

use super::graph::Graph;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant stage-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// Stage-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the stage-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Linear map from the payload's size range into a configured range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRange {
	data_min: f64,
	data_max: f64,
	min: f64,
	max: f64,
}

impl SizeRange {
	pub fn new(values: impl IntoIterator<Item = f64>, min: f64, max: f64) -> Self {
		let (data_min, data_max) = values
			.into_iter()
			.filter(|v| v.is_finite())
			.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
				(lo.min(v), hi.max(v))
			});
		Self {
			data_min,
			data_max,
			min,
			max,
		}
	}

	/// Rescale `value`. A degenerate data range maps everything to `max`.
	pub fn apply(&self, value: f64) -> f64 {
		let span = self.data_max - self.data_min;
		if !span.is_finite() || span <= f64::EPSILON {
			return self.max;
		}
		let t = ((value - self.data_min) / span).clamp(0.0, 1.0);
		self.min + (self.max - self.min) * t
	}
}

/// Uniform scale and offset that fit the graph bounds into a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
	pub scale: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Fit {
	/// Center the bounding box of the graph inside `width` x `height`,
	/// keeping `margin` pixels free on every side and the aspect ratio intact.
	pub fn new(graph: &Graph, width: f64, height: f64, margin: f64) -> Self {
		let mut bounds = (
			f64::INFINITY,
			f64::INFINITY,
			f64::NEG_INFINITY,
			f64::NEG_INFINITY,
		);
		for n in graph.nodes() {
			let (x, y) = (n.record.x, n.record.y);
			bounds = (
				bounds.0.min(x),
				bounds.1.min(y),
				bounds.2.max(x),
				bounds.3.max(y),
			);
		}
		let (min_x, min_y, max_x, max_y) = bounds;
		if !min_x.is_finite() {
			return Self {
				scale: 1.0,
				offset_x: width / 2.0,
				offset_y: height / 2.0,
			};
		}

		let (gw, gh) = (max_x - min_x, max_y - min_y);
		let (avail_w, avail_h) = ((width - 2.0 * margin).max(1.0), (height - 2.0 * margin).max(1.0));
		let scale = match (gw > f64::EPSILON, gh > f64::EPSILON) {
			(true, true) => (avail_w / gw).min(avail_h / gh),
			(true, false) => avail_w / gw,
			(false, true) => avail_h / gh,
			(false, false) => 1.0,
		};

		Self {
			scale,
			offset_x: width / 2.0 - (min_x + gw / 2.0) * scale,
			offset_y: height / 2.0 - (min_y + gh / 2.0) * scale,
		}
	}

	/// Graph space to stage space.
	pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
		(x * self.scale + self.offset_x, y * self.scale + self.offset_y)
	}
}
