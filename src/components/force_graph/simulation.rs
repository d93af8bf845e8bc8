//! Velocity-Verlet style force layout with a cooling parameter.
//!
//! Each tick moves `alpha` toward its target, accumulates link, charge and
//! collision forces into node velocities, recenters the layout, and then
//! integrates. Link and charge contributions scale with `alpha`, so they fade
//! as the layout settles; collision does not, so overlap keeps resolving
//! until the last tick.

use std::f64::consts::PI;

use log::debug;

use super::config::LayoutConfig;
use super::error::GraphError;
use super::graph::{Graph, Node};

const INITIAL_RADIUS: f64 = 10.0;

/// Where the simulation is in its cooling cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Alpha is decaying and forces apply every tick.
	Cooling,
	/// A drag holds alpha up around the dragged node.
	Perturbed,
	/// Alpha is below the minimum; ticks are skipped.
	Settled,
}

/// Linear congruential source for the coincidence jiggle; seeded so
/// layouts repeat exactly.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	fn new() -> Self {
		Self(1)
	}

	fn sample(&mut self) -> f64 {
		self.0 = (Self::A * self.0 + Self::C) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	fn jiggle(&mut self) -> f64 {
		(self.sample() - 0.5) * 1e-6
	}
}

/// Owned simulation context for one [`Graph`].
///
/// The graph stays caller-owned and is passed to every call; the simulation
/// only keeps what is derived from it at construction.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: LayoutConfig,
	alpha: f64,
	alpha_target: f64,
	center: (f64, f64),
	link_strengths: Vec<f64>,
	link_biases: Vec<f64>,
	random: Lcg,
	lag: f64,
}

impl Simulation {
	/// Prepare a simulation for `graph`, placing unplaced nodes on a spiral
	/// around the center of a `width` x `height` viewport.
	pub fn new(
		graph: &mut Graph,
		config: LayoutConfig,
		width: f64,
		height: f64,
	) -> Result<Self, GraphError> {
		config.validate()?;
		let center = (width / 2.0, height / 2.0);

		let degrees = graph.degrees();
		let (link_strengths, link_biases) = graph
			.links()
			.iter()
			.map(|link| {
				let (ds, dt) = (degrees[link.source] as f64, degrees[link.target] as f64);
				(link.weight / ds.min(dt), ds / (ds + dt))
			})
			.unzip();

		place_nodes(graph.nodes_mut(), center);

		Ok(Self {
			alpha: config.alpha,
			alpha_target: 0.0,
			config,
			center,
			link_strengths,
			link_biases,
			random: Lcg::new(),
			lag: 0.0,
		})
	}

	/// Current cooling parameter.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Value alpha is decaying toward.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Centering target.
	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	/// Active configuration.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Current phase, derived from alpha and its target.
	pub fn phase(&self) -> Phase {
		if self.alpha_target > 0.0 {
			Phase::Perturbed
		} else if self.alpha < self.config.alpha_min {
			Phase::Settled
		} else {
			Phase::Cooling
		}
	}

	/// Advance one tick unless settled. Returns whether anything moved.
	pub fn step(&mut self, graph: &mut Graph) -> bool {
		let before = self.phase();
		if before == Phase::Settled {
			return false;
		}
		self.tick(graph);
		let after = self.phase();
		if before != after {
			debug!("layout {before:?} -> {after:?} at alpha {:.4}", self.alpha);
		}
		true
	}

	/// Run as many fixed-rate ticks as `dt` seconds of frame time cover,
	/// capped per call. Returns the number of ticks run.
	pub fn advance(&mut self, graph: &mut Graph, dt: f64) -> usize {
		if self.phase() == Phase::Settled {
			self.lag = 0.0;
			return 0;
		}
		let interval = 1.0 / self.config.ticks_per_second;
		let cap = self.config.max_ticks_per_frame;
		self.lag += dt.max(0.0);

		let mut ticks = 0;
		while self.lag >= interval && ticks < cap {
			if !self.step(graph) {
				self.lag = 0.0;
				break;
			}
			self.lag -= interval;
			ticks += 1;
		}
		if ticks == cap {
			self.lag = self.lag.min(interval);
		}
		ticks
	}

	/// Hold alpha up while a node is dragged.
	pub fn begin_drag(&mut self) {
		self.alpha_target = self.config.drag_alpha_target;
		self.alpha = self.alpha.max(self.alpha_target);
		debug!("drag start, alpha {:.4}", self.alpha);
	}

	/// Let alpha decay again after a drag.
	pub fn end_drag(&mut self) {
		self.alpha_target = 0.0;
		debug!("drag end, alpha {:.4}", self.alpha);
	}

	/// Raise alpha to at least `alpha` without changing the target.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha.clamp(0.0, 1.0));
	}

	/// Move the centering target.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	fn tick(&mut self, graph: &mut Graph) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.force_link(graph);
		let nodes = graph.nodes_mut();
		self.force_charge(nodes);
		self.force_center(nodes);
		self.force_collide(nodes);

		let retain = 1.0 - self.config.velocity_decay;
		for node in nodes.iter_mut() {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= retain;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= retain;
					node.y += node.vy;
				}
			}
		}
	}

	fn force_link(&mut self, graph: &mut Graph) {
		let (alpha, distance) = (self.alpha, self.config.link_distance);
		let (nodes, links) = graph.parts_mut();

		for _ in 0..self.config.link_iterations {
			for ((link, &strength), &bias) in
				links.iter().zip(&self.link_strengths).zip(&self.link_biases)
			{
				let (s, t) = (&nodes[link.source], &nodes[link.target]);
				let mut x = t.x + t.vx - s.x - s.vx;
				let mut y = t.y + t.vy - s.y - s.vy;
				if x == 0.0 {
					x = self.random.jiggle();
				}
				if y == 0.0 {
					y = self.random.jiggle();
				}
				let l = (x * x + y * y).sqrt();
				let l = (l - distance) / l * alpha * strength;
				let (x, y) = (x * l, y * l);

				let target = &mut nodes[link.target];
				target.vx -= x * bias;
				target.vy -= y * bias;
				let source = &mut nodes[link.source];
				source.vx += x * (1.0 - bias);
				source.vy += y * (1.0 - bias);
			}
		}
	}

	fn force_charge(&mut self, nodes: &mut [Node]) {
		let strength = self.config.charge_strength * self.alpha;
		let min2 = self.config.charge_distance_min * self.config.charge_distance_min;

		for i in 0..nodes.len() {
			let (xi, yi) = (nodes[i].x, nodes[i].y);
			let (mut ax, mut ay) = (0.0, 0.0);
			for (j, other) in nodes.iter().enumerate() {
				if i == j {
					continue;
				}
				let (mut x, mut y) = (other.x - xi, other.y - yi);
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				let w = strength / l;
				ax += x * w;
				ay += y * w;
			}
			nodes[i].vx += ax;
			nodes[i].vy += ay;
		}
	}

	fn force_center(&self, nodes: &mut [Node]) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let (sx, sy) = nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let strength = self.config.center_strength;
		let dx = (sx / n - self.center.0) * strength;
		let dy = (sy / n - self.center.1) * strength;
		for node in nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn force_collide(&mut self, nodes: &mut [Node]) {
		let strength = self.config.collide_strength;

		for _ in 0..self.config.collide_iterations {
			for i in 0..nodes.len() {
				let ri = nodes[i].radius;
				let ri2 = ri * ri;
				let xi = nodes[i].x + nodes[i].vx;
				let yi = nodes[i].y + nodes[i].vy;

				for j in (i + 1)..nodes.len() {
					let rj = nodes[j].radius;
					let r = ri + rj;
					let mut x = xi - nodes[j].x - nodes[j].vx;
					let mut y = yi - nodes[j].y - nodes[j].vy;
					let mut l = x * x + y * y;
					if l >= r * r {
						continue;
					}
					if x == 0.0 {
						x = self.random.jiggle();
						l += x * x;
					}
					if y == 0.0 {
						y = self.random.jiggle();
						l += y * y;
					}
					let d = l.sqrt();
					let k = (r - d) / d * strength;
					let (x, y) = (x * k, y * k);
					let rj2 = rj * rj;
					let share = rj2 / (ri2 + rj2);

					nodes[i].vx += x * share;
					nodes[i].vy += y * share;
					nodes[j].vx -= x * (1.0 - share);
					nodes[j].vy -= y * (1.0 - share);
				}
			}
		}
	}
}

/// Phyllotaxis placement for nodes without a finite position.
fn place_nodes(nodes: &mut [Node], (cx, cy): (f64, f64)) {
	let angle_step = PI * (3.0 - 5f64.sqrt());
	for (i, node) in nodes.iter_mut().enumerate() {
		if let Some(fx) = node.fx {
			node.x = fx;
		}
		if let Some(fy) = node.fy {
			node.y = fy;
		}
		if !node.x.is_finite() || !node.y.is_finite() {
			let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
			let angle = i as f64 * angle_step;
			node.x = cx + radius * angle.cos();
			node.y = cy + radius * angle.sin();
		}
		if !node.vx.is_finite() || !node.vy.is_finite() {
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}
}
