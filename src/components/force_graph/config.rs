use serde::Deserialize;

use super::error::GraphError;

/// Tunables for the layout simulation and the view hosting it.
///
/// Deserializes from a partial document; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Link constraint passes per tick.
	pub link_iterations: usize,
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Floor on the many-body distance, avoids singular forces.
	pub charge_distance_min: f64,
	/// Fraction of the centroid offset removed each tick.
	pub center_strength: f64,
	/// Fraction of each overlap resolved per collision pass.
	pub collide_strength: f64,
	/// Collision passes per tick.
	pub collide_iterations: usize,
	/// Collision radius is `sqrt(value)` times this.
	pub collide_radius_factor: f64,
	/// Drawn radius is `sqrt(value)` times this.
	pub display_radius_factor: f64,
	/// Smallest collision and drawn radius.
	pub min_radius: f64,
	/// Alpha at start.
	pub alpha: f64,
	/// Below this alpha the layout is settled.
	pub alpha_min: f64,
	/// Fraction of the distance to the alpha target covered per tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha target held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Smallest zoom scale.
	pub zoom_min: f64,
	/// Largest zoom scale.
	pub zoom_max: f64,
	/// Nominal simulation rate.
	pub ticks_per_second: f64,
	/// Catch-up cap for a single frame.
	pub max_ticks_per_frame: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			link_distance: 100.0,
			link_iterations: 1,
			charge_strength: -200.0,
			charge_distance_min: 1.0,
			center_strength: 1.0,
			collide_strength: 1.0,
			collide_iterations: 2,
			collide_radius_factor: 4.0,
			display_radius_factor: 3.0,
			min_radius: 4.0,
			alpha: 1.0,
			alpha_min,
			// ~300 ticks from 1.0 down to alpha_min
			alpha_decay: 1.0 - f64::powf(alpha_min, 1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			zoom_min: 0.5,
			zoom_max: 5.0,
			ticks_per_second: 60.0,
			max_ticks_per_frame: 4,
		}
	}
}

impl LayoutConfig {
	/// Reject values the simulation or the view cannot run with.
	pub fn validate(&self) -> Result<(), GraphError> {
		fn fail(field: &'static str, reason: &'static str) -> Result<(), GraphError> {
			Err(GraphError::InvalidConfig { field, reason })
		}
		let unit = |v: f64| (0.0..=1.0).contains(&v);

		let finite = [
			("link_distance", self.link_distance),
			("charge_strength", self.charge_strength),
			("charge_distance_min", self.charge_distance_min),
			("center_strength", self.center_strength),
			("collide_strength", self.collide_strength),
			("collide_radius_factor", self.collide_radius_factor),
			("display_radius_factor", self.display_radius_factor),
		];
		for (field, value) in finite {
			if !value.is_finite() {
				return fail(field, "must be finite");
			}
		}

		if self.link_distance < 0.0 {
			return fail("link_distance", "must not be negative");
		}
		if self.charge_distance_min <= 0.0 {
			return fail("charge_distance_min", "must be positive");
		}
		if self.collide_radius_factor < 0.0 || self.display_radius_factor < 0.0 {
			return fail("collide_radius_factor", "radius factors must not be negative");
		}
		if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
			return fail("min_radius", "must be positive");
		}
		if !unit(self.alpha) {
			return fail("alpha", "must lie in [0, 1]");
		}
		if !(self.alpha_min.is_finite() && self.alpha_min > 0.0) {
			return fail("alpha_min", "must be positive");
		}
		if !unit(self.alpha_decay) {
			return fail("alpha_decay", "must lie in [0, 1]");
		}
		if !unit(self.velocity_decay) {
			return fail("velocity_decay", "must lie in [0, 1]");
		}
		if !unit(self.drag_alpha_target) {
			return fail("drag_alpha_target", "must lie in [0, 1]");
		}
		if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) {
			return fail("zoom_min", "must be positive");
		}
		if !(self.zoom_max.is_finite() && self.zoom_max >= self.zoom_min) {
			return fail("zoom_max", "must not be below zoom_min");
		}
		if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
			return fail("ticks_per_second", "must be positive");
		}
		if self.max_ticks_per_frame == 0 {
			return fail("max_ticks_per_frame", "must be at least 1");
		}
		Ok(())
	}
}
