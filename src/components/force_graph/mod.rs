//! Force-directed layout of a weighted graph, and the canvas view hosting it.

mod component;
mod config;
mod error;
mod graph;
mod render;
pub mod scale;
mod simulation;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use config::LayoutConfig;
pub use error::{GraphError, LinkEnd};
pub use graph::{Graph, Link, Node};
pub use simulation::{Phase, Simulation};
pub use state::{ForceGraphState, LinkSegment, NodeSprite, ViewTransform, ZoomExtent};
pub use types::{GraphData, GraphLink, GraphNode};
