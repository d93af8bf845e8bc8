use log::{debug, info};

use super::config::LayoutConfig;
use super::error::GraphError;
use super::graph::Graph;
use super::scale;
use super::simulation::{Phase, Simulation};
use super::types::GraphData;

/// Extra hit-test reach around a node's drawn radius, in graph units.
pub const HIT_SLOP: f64 = 4.0;

const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Screen = graph * k + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Scale.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Graph coordinates to screen coordinates.
	pub fn apply(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Screen coordinates to graph coordinates.
	pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

/// Allowed range of the zoom scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomExtent {
	/// Smallest scale.
	pub min: f64,
	/// Largest scale.
	pub max: f64,
}

impl ZoomExtent {
	/// Clamp a requested scale into range.
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

/// An in-progress node drag: pointer and node positions at its start.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// An in-progress background pan.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A node ready to draw, in graph coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite<'a> {
	/// Center.
	pub x: f64,
	/// Center.
	pub y: f64,
	/// Drawn radius.
	pub radius: f64,
	/// Fill color.
	pub color: &'static str,
	/// Label text.
	pub label: &'a str,
}

/// A link ready to draw, in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
	/// Source end.
	pub x1: f64,
	/// Source end.
	pub y1: f64,
	/// Target end.
	pub x2: f64,
	/// Target end.
	pub y2: f64,
	/// Stroke opacity.
	pub opacity: f64,
	/// Stroke width.
	pub width: f64,
}

/// The graph, its simulation, and the pointer/viewport state around them.
#[allow(missing_docs)]
pub struct ForceGraphState {
	pub graph: Graph,
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub zoom: ZoomExtent,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	color: fn(u32) -> &'static str,
}

impl ForceGraphState {
	/// Validate `data` and start a fresh layout in a `width` x `height` viewport.
	pub fn new(
		data: &GraphData,
		config: LayoutConfig,
		width: f64,
		height: f64,
		color: fn(u32) -> &'static str,
	) -> Result<Self, GraphError> {
		let mut graph = Graph::new(data, &config)?;
		let zoom = ZoomExtent {
			min: config.zoom_min,
			max: config.zoom_max,
		};
		let simulation = Simulation::new(&mut graph, config, width, height)?;
		info!(
			"force graph ready: {} nodes, {} links in {width}x{height}",
			graph.len(),
			graph.links().len()
		);

		Ok(Self {
			graph,
			simulation,
			transform: ViewTransform::default(),
			zoom,
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			color,
		})
	}

	/// Screen point to graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.invert(sx, sy)
	}

	/// Whether a screen point lies inside the viewport.
	pub fn contains(&self, sx: f64, sy: f64) -> bool {
		(0.0..=self.width).contains(&sx) && (0.0..=self.height).contains(&sy)
	}

	/// Topmost node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// later nodes draw on top
		self.graph.nodes().iter().rposition(|node| {
			let (dx, dy) = (node.x - gx, node.y - gy);
			(dx * dx + dy * dy).sqrt() < node.display_radius + HIT_SLOP
		})
	}

	/// Start dragging the node under the pointer, or panning if there is none.
	/// A gesture already in progress is ended first.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if !self.contains(sx, sy) {
			return;
		}
		if self.drag.active || self.pan.active {
			self.pointer_up();
		}
		match self.node_at_position(sx, sy) {
			Some(idx) => {
				let (nx, ny) = {
					let node = &self.graph.nodes()[idx];
					(node.x, node.y)
				};
				self.drag = DragState {
					active: true,
					node_idx: Some(idx),
					start_x: sx,
					start_y: sy,
					node_start_x: nx,
					node_start_y: ny,
				};
				self.graph.pin(idx, nx, ny);
				self.simulation.begin_drag();
				debug!("dragging `{}`", self.graph.nodes()[idx].id);
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Move the pinned node or the view with the pointer.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if !self.contains(sx, sy) {
			return;
		}
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(sx - self.drag.start_x) / self.transform.k,
					(sy - self.drag.start_y) / self.transform.k,
				);
				self.graph
					.pin(idx, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// End any drag or pan; a dragged node is released to the forces.
	pub fn pointer_up(&mut self) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				self.graph.release(idx);
			}
			self.simulation.end_drag();
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
	}

	/// The pointer left the canvas; treated as a release.
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
	}

	/// Wheel zoom around the pointer.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if !self.contains(sx, sy) {
			return;
		}
		let factor = if delta_y > 0.0 {
			WHEEL_ZOOM_OUT
		} else {
			WHEEL_ZOOM_IN
		};
		self.zoom_at(sx, sy, factor);
	}

	/// Scale by `factor` keeping the graph point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = self.zoom.clamp(self.transform.k * factor);
		if !new_k.is_finite() || new_k == self.transform.k {
			return;
		}
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Set the scale directly, anchored at the viewport center.
	pub fn set_zoom(&mut self, k: f64) {
		let factor = k / self.transform.k;
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Advance the layout by `dt` seconds of frame time.
	pub fn tick(&mut self, dt: f64) -> usize {
		self.simulation.advance(&mut self.graph, dt)
	}

	/// Current simulation phase.
	pub fn phase(&self) -> Phase {
		self.simulation.phase()
	}

	/// Follow a viewport resize; the layout recenters.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width / 2.0, height / 2.0);
		let reheat = self.simulation.config().drag_alpha_target;
		self.simulation.reheat(reheat);
		debug!("viewport resized to {width}x{height}");
	}

	/// Per-node draw data.
	pub fn node_sprites(&self) -> impl Iterator<Item = NodeSprite<'_>> + '_ {
		self.graph.nodes().iter().map(|node| NodeSprite {
			x: node.x,
			y: node.y,
			radius: node.display_radius,
			color: (self.color)(node.group),
			label: &node.label,
		})
	}

	/// Per-link draw data.
	pub fn link_segments(&self) -> impl Iterator<Item = LinkSegment> + '_ {
		let nodes = self.graph.nodes();
		self.graph.links().iter().map(move |link| {
			let (s, t) = (&nodes[link.source], &nodes[link.target]);
			LinkSegment {
				x1: s.x,
				y1: s.y,
				x2: t.x,
				y2: t.y,
				opacity: scale::link_opacity(link.weight),
				width: scale::link_width(link.weight),
			}
		})
	}
}
