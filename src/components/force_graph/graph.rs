use std::collections::HashMap;

use log::{debug, warn};

use super::config::LayoutConfig;
use super::error::{GraphError, LinkEnd};
use super::scale::SqrtScale;
use super::types::GraphData;

/// A simulated node. Position and velocity belong to the simulation;
/// `fx`/`fy` pin a coordinate while the node is dragged.
#[derive(Clone, Debug)]
pub struct Node {
	/// Unique id.
	pub id: String,
	/// Display text.
	pub label: String,
	/// Category.
	pub group: u32,
	/// Raw value as supplied, `0.0` when missing.
	pub value: f64,
	/// Collision radius.
	pub radius: f64,
	/// Drawn radius.
	pub display_radius: f64,
	/// Position, NaN until the simulation places the node.
	pub x: f64,
	/// Position, NaN until the simulation places the node.
	pub y: f64,
	/// Velocity.
	pub vx: f64,
	/// Velocity.
	pub vy: f64,
	/// Pinned x.
	pub fx: Option<f64>,
	/// Pinned y.
	pub fy: Option<f64>,
}

impl Node {
	/// Whether a drag currently holds this node.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// A validated link between two node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	/// Weight in (0, 1].
	pub weight: f64,
}

/// Nodes and links with referential integrity checked at construction.
#[derive(Clone, Debug)]
pub struct Graph {
	nodes: Vec<Node>,
	links: Vec<Link>,
	index: HashMap<String, usize>,
}

impl Graph {
	/// Validate a definition and derive per-node radii from `config`.
	pub fn new(data: &GraphData, config: &LayoutConfig) -> Result<Self, GraphError> {
		config.validate()?;
		let collide = SqrtScale::new(config.collide_radius_factor, config.min_radius);
		let display = SqrtScale::new(config.display_radius_factor, config.min_radius);

		let mut index = HashMap::with_capacity(data.nodes.len());
		let mut nodes = Vec::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(GraphError::DuplicateNode(node.id.clone()));
			}
			if let Some(v) = node.value.filter(|v| !(v.is_finite() && *v > 0.0)) {
				warn!("node `{}` has value {v}, drawing at minimum radius", node.id);
			}
			nodes.push(Node {
				id: node.id.clone(),
				label: node.label.clone().unwrap_or_else(|| node.id.clone()),
				group: node.group,
				value: node.value.unwrap_or(0.0),
				radius: collide.radius(node.value),
				display_radius: display.radius(node.value),
				x: f64::NAN,
				y: f64::NAN,
				vx: 0.0,
				vy: 0.0,
				fx: None,
				fy: None,
			});
		}

		let resolve = |i: usize, end: LinkEnd, id: &str| {
			index
				.get(id)
				.copied()
				.ok_or_else(|| GraphError::UnknownNode {
					index: i,
					end,
					id: id.to_owned(),
				})
		};
		let links = data
			.links
			.iter()
			.enumerate()
			.map(|(i, link)| {
				let source = resolve(i, LinkEnd::Source, &link.source)?;
				let target = resolve(i, LinkEnd::Target, &link.target)?;
				if source == target {
					return Err(GraphError::SelfLink {
						index: i,
						id: link.source.clone(),
					});
				}
				if !(link.value > 0.0 && link.value <= 1.0) {
					return Err(GraphError::InvalidWeight {
						index: i,
						weight: link.value,
					});
				}
				Ok(Link {
					source,
					target,
					weight: link.value,
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		debug!("graph built: {} nodes, {} links", nodes.len(), links.len());
		Ok(Self {
			nodes,
			links,
			index,
		})
	}

	/// All nodes, in definition order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Mutable access for the simulation.
	pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	/// All links, in definition order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Split borrow used by forces that read links while writing nodes.
	pub(crate) fn parts_mut(&mut self) -> (&mut [Node], &[Link]) {
		(&mut self.nodes, &self.links)
	}

	/// Node at an index.
	pub fn node(&self, idx: usize) -> Option<&Node> {
		self.nodes.get(idx)
	}

	/// Index of the node with the given id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of links touching each node.
	pub fn degrees(&self) -> Vec<usize> {
		let mut degrees = vec![0; self.nodes.len()];
		for link in &self.links {
			degrees[link.source] += 1;
			degrees[link.target] += 1;
		}
		degrees
	}

	/// Pin a node at a position. Returns false for an unknown index.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) -> bool {
		let Some(node) = self.nodes.get_mut(idx) else {
			return false;
		};
		node.fx = Some(x);
		node.fy = Some(y);
		true
	}

	/// Release a pinned node so forces move it again.
	pub fn release(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
	}
}
