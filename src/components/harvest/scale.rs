//! Zoom-dependent sizes for fruits, vines and arrows.
//!
//! World-space values scale with zoom; screen-space values keep their pixel
//! size. See [`ScaleBehavior`].

/// How a visual property scales with zoom level `k`.
#[derive(Clone, Debug)]
#[allow(dead_code, reason = "World completes the API for custom ScaleConfigs")]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels).
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
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

/// Scaling configuration for every drawn element.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Fruit radius in world units.
	pub node_radius: f64,
	pub node_behavior: ScaleBehavior,
	/// Click target radius in world units.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Vine width in screen pixels.
	pub line_width: f64,
	/// Arrow head length in world units, for directed vines.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Selection ring width in screen pixels.
	pub ring_width: f64,
	/// Title font size in screen pixels; stops shrinking below `label_min_k`.
	pub label_size: f64,
	pub label_min_k: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 7.5,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 12.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: f64::INFINITY,
			},
			line_width: 1.5,
			arrow_size: 6.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 0.0,
				max_screen: 18.0,
			},
			ring_width: 2.0,
			label_size: 11.0,
			label_min_k: 0.5,
		}
	}
}

/// Sizes for one zoom level, computed once per frame. All world-space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	pub line_width: f64,
	pub arrow_size: f64,
	pub ring_width: f64,
	pub label_font: String,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_radius: config.node_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			line_width: config.line_width / k,
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			ring_width: config.ring_width / k,
			label_font: format!("{}px sans-serif", label_font_size),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_keeps_a_minimum_screen_size() {
		let b = ScaleBehavior::Clamped {
			min_screen: 5.0,
			max_screen: f64::INFINITY,
		};
		assert_eq!(b.apply(7.5, 1.0), 7.5);
		// zoomed far out: 7.5 * 0.25 < 5px, so grow in world units
		assert_eq!(b.apply(7.5, 0.25), 20.0);
	}

	#[test]
	fn screen_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 4.0), 0.5);
		assert_eq!(ScaleBehavior::World.apply(2.0, 4.0), 2.0);
	}

	#[test]
	fn label_font_stops_growing_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 0.1).label_font, "22px sans-serif");
	}
}
