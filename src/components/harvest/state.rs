//! Canvas-side view state: pan/zoom, drags, selection highlight fades and
//! the latest layout frame.
//!
//! None of this is part of the graph. It is rebuilt freely and only ever
//! feeds back into the session as inputs.

use std::collections::{HashMap, HashSet};

use crate::layout::Frame;
use crate::model::VertexId;

use super::scale::{ScaleConfig, ScaledValues};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks a press on a fruit. A press that never moves is a click.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub vertex: Option<VertexId>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer travel (screen pixels) after which a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Smooth selection ring fades.
///
/// Each highlighted vertex has an intensity that eases towards 1.0 while it
/// is highlighted and back towards 0.0 afterwards (exponential smoothing).
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	target_set: HashSet<VertexId>,
	intensity: HashMap<VertexId, f64>,
}

impl HighlightState {
	pub fn set_targets(&mut self, targets: &HashSet<VertexId>) {
		if &self.target_set != targets {
			self.target_set = targets.clone();
		}
	}

	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 10.0;
		const FADE_OUT_SPEED: f64 = 6.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &v in &self.target_set {
			let i = self.intensity.entry(v).or_insert(0.0);
			*i += (1.0 - *i) * fade_in;
		}
		let targets = &self.target_set;
		self.intensity.retain(|v, i| {
			if targets.contains(v) {
				return true;
			}
			*i *= fade_out;
			*i > 0.005
		});
	}

	pub fn intensity(&self, vertex: VertexId) -> f64 {
		self.intensity.get(&vertex).copied().unwrap_or(0.0)
	}
}

/// Everything the canvas needs between frames.
pub struct CanvasState {
	pub frame: Frame,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			frame: Frame::default(),
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost vertex under a screen point, using the last frame's positions.
	pub fn vertex_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<VertexId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		self.frame
			.vertices
			.iter()
			.rev()
			.find(|p| {
				let (dx, dy) = (p.x - gx, p.y - gy);
				(dx * dx + dy * dy).sqrt() < scale.hit_radius
			})
			.map(|p| p.vertex)
	}

	pub fn position_of(&self, vertex: VertexId) -> Option<(f64, f64)> {
		self.frame
			.vertices
			.iter()
			.find(|p| p.vertex == vertex)
			.map(|p| (p.x, p.y))
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
