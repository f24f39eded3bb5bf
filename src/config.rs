//! Session configuration.
//!
//! Every field has a default, so a page can supply a partial JSON object
//! (or nothing at all).

use serde::Deserialize;

/// Top-level settings for a [`GraphSession`](crate::GraphSession).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarvestConfig {
	/// Accept an edge whose two ends are the same vertex.
	pub allow_self_loops: bool,
	/// Shade amount for the picker's lighter/darker variants of a vertex color.
	pub picker_shade: f64,
	/// Canvas theme name, resolved by the renderer.
	pub theme: String,
	/// Physics parameters.
	pub simulation: SimulationConfig,
}

impl Default for HarvestConfig {
	fn default() -> Self {
		Self {
			allow_self_loops: true,
			picker_shade: 0.6,
			theme: "default".into(),
			simulation: SimulationConfig::default(),
		}
	}
}

impl HarvestConfig {
	/// Parse settings; absent fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// Physics parameters handed to the force simulation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring stiffness along links.
	pub force_spring: f32,
	/// Cap on the force applied to a node per step.
	pub force_max: f32,
	/// Velocity multiplier.
	pub node_speed: f32,
	/// Velocity kept after each step.
	pub damping_factor: f32,
	/// Mass of every node.
	pub node_mass: f32,
	/// Radius of the ring new vertices are spawned on, around the bounds centre.
	pub spawn_radius: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			spawn_radius: 100.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = HarvestConfig::from_json(
			r#"{ "allow_self_loops": false, "simulation": { "force_charge": 50.0 } }"#,
		)
		.unwrap();
		assert!(!config.allow_self_loops);
		assert_eq!(config.picker_shade, 0.6);
		assert_eq!(config.theme, "default");
		assert_eq!(config.simulation.force_charge, 50.0);
		assert_eq!(config.simulation.damping_factor, 0.9);
	}

	#[test]
	fn theme_is_read_by_name() {
		let config = HarvestConfig::from_json(r#"{ "theme": "paper" }"#).unwrap();
		assert_eq!(config.theme, "paper");
		assert!(config.allow_self_loops);
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(HarvestConfig::from_json("{}").unwrap(), HarvestConfig::default());
	}
}
