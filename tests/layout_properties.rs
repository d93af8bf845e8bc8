use proptest::prelude::*;
use subscription_network::components::force_graph::{
	ForceGraphState, Graph, GraphData, GraphError, GraphLink, GraphNode, LayoutConfig, Phase,
	Simulation, scale,
};

const WIDTH: f64 = 1600.0;
const HEIGHT: f64 = 1200.0;
/// Allowed overlap as a fraction of the two radii.
const OVERLAP_TOLERANCE: f64 = 1e-2;

fn subscription_network() -> GraphData {
	GraphData::from_json(include_str!("../data/subscription_network.json")).unwrap()
}

fn start(data: &GraphData) -> (Graph, Simulation) {
	let config = LayoutConfig::default();
	let mut graph = Graph::new(data, &config).unwrap();
	let sim = Simulation::new(&mut graph, config, WIDTH, HEIGHT).unwrap();
	(graph, sim)
}

fn settle(graph: &mut Graph, sim: &mut Simulation) {
	let mut ticks = 0;
	while sim.step(graph) {
		ticks += 1;
		assert!(ticks < 5000, "layout never settled");
	}
}

/// Largest pairwise overlap relative to the pair's radius sum.
fn worst_overlap(graph: &Graph) -> f64 {
	let nodes = graph.nodes();
	let mut worst = f64::NEG_INFINITY;
	for (i, a) in nodes.iter().enumerate() {
		for b in &nodes[i + 1..] {
			let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
			let r = a.radius + b.radius;
			worst = worst.max((r - d) / r);
		}
	}
	worst
}

fn graph_strategy() -> impl Strategy<Value = GraphData> {
	// values up to 1000 give radii past half the link distance
	(2usize..16)
		.prop_flat_map(|n| {
			(
				prop::collection::vec(prop::option::of(0.0f64..1000.0), n),
				prop::collection::vec((0..n, 0..n, 0.05f64..=1.0), 0..(2 * n)),
			)
		})
		.prop_map(|(values, links)| GraphData {
			nodes: values
				.iter()
				.enumerate()
				.map(|(i, &value)| GraphNode {
					id: format!("n{i}"),
					group: (i % 5) as u32 + 1,
					value,
					label: None,
				})
				.collect(),
			links: links
				.into_iter()
				.filter(|(s, t, _)| s != t)
				.map(|(s, t, value)| GraphLink {
					source: format!("n{s}"),
					target: format!("n{t}"),
					value,
				})
				.collect(),
		})
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(48))]

	#[test]
	fn settled_layouts_do_not_overlap(data in graph_strategy()) {
		let (mut graph, mut sim) = start(&data);
		settle(&mut graph, &mut sim);
		let overlap = worst_overlap(&graph);
		prop_assert!(overlap <= OVERLAP_TOLERANCE, "overlap {}", overlap);
	}

	#[test]
	fn alpha_decreases_until_settled(data in graph_strategy()) {
		let (mut graph, mut sim) = start(&data);
		let mut previous = sim.alpha();
		while sim.step(&mut graph) {
			prop_assert!(sim.alpha() < previous);
			previous = sim.alpha();
		}
		prop_assert_eq!(sim.phase(), Phase::Settled);
		// settled ticks leave alpha alone
		sim.step(&mut graph);
		prop_assert_eq!(sim.alpha(), previous);
	}

	#[test]
	fn zoom_stays_within_extent(factors in prop::collection::vec(0.01f64..20.0, 1..30)) {
		let mut state = ForceGraphState::new(
			&subscription_network(),
			LayoutConfig::default(),
			WIDTH,
			HEIGHT,
			scale::group_color,
		)
		.unwrap();
		for factor in factors {
			state.zoom_at(WIDTH / 3.0, HEIGHT / 3.0, factor);
			prop_assert!((0.5..=5.0).contains(&state.transform.k));
		}
	}
}

#[test]
fn sample_network_settles_without_overlap() {
	let (mut graph, mut sim) = start(&subscription_network());
	settle(&mut graph, &mut sim);
	assert!(worst_overlap(&graph) <= OVERLAP_TOLERANCE);

	// linked services end up closer than unrelated ones
	let distance = |a: &str, b: &str| {
		let (a, b) = (
			&graph.nodes()[graph.index_of(a).unwrap()],
			&graph.nodes()[graph.index_of(b).unwrap()],
		);
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	};
	assert!(distance("Netflix", "Hulu") < distance("Netflix", "Fitness App"));
}

#[test]
fn minimum_radius_nodes_stay_apart() {
	let node = |id: &str, value| GraphNode {
		id: id.into(),
		group: 1,
		value,
		label: None,
	};
	let data = GraphData {
		nodes: vec![node("zero", Some(0.0)), node("missing", None)],
		links: vec![GraphLink {
			source: "zero".into(),
			target: "missing".into(),
			value: 1.0,
		}],
	};
	let config = LayoutConfig::default();
	let (mut graph, mut sim) = start(&data);
	assert!(graph.nodes().iter().all(|n| n.radius == config.min_radius));
	settle(&mut graph, &mut sim);
	assert!(worst_overlap(&graph) <= OVERLAP_TOLERANCE);
}

#[test]
fn large_linked_bubbles_keep_apart() {
	let node = |i: usize| GraphNode {
		id: format!("big{i}"),
		group: (i % 5) as u32 + 1,
		value: Some(900.0),
		label: None,
	};
	let n = 12;
	let data = GraphData {
		nodes: (0..n).map(node).collect(),
		links: (1..n)
			.map(|i| GraphLink {
				source: "big0".into(),
				target: format!("big{i}"),
				value: 1.0,
			})
			.collect(),
	};
	let (mut graph, mut sim) = start(&data);
	let config = LayoutConfig::default();
	assert!(2.0 * graph.nodes()[0].radius > config.link_distance);
	settle(&mut graph, &mut sim);
	let overlap = worst_overlap(&graph);
	assert!(overlap <= OVERLAP_TOLERANCE, "overlap {overlap}");
}

#[test]
fn drag_reheats_and_release_frees_the_node() {
	let mut state = ForceGraphState::new(
		&subscription_network(),
		LayoutConfig::default(),
		WIDTH,
		HEIGHT,
		scale::group_color,
	)
	.unwrap();
	while state.tick(1.0) > 0 {}
	assert_eq!(state.phase(), Phase::Settled);

	let idx = state.graph.index_of("Netflix").unwrap();
	let (x, y) = (state.graph.nodes()[idx].x, state.graph.nodes()[idx].y);
	let (sx, sy) = state.transform.apply(x, y);
	let settled_alpha = state.simulation.alpha();

	state.pointer_down(sx, sy);
	assert_eq!(state.drag.node_idx, Some(idx));
	assert!(state.simulation.alpha() > settled_alpha);

	state.pointer_move(sx + 150.0, sy);
	for _ in 0..30 {
		state.tick(1.0 / 60.0);
	}
	let held = (state.graph.nodes()[idx].x, state.graph.nodes()[idx].y);
	assert!((held.0 - (x + 150.0)).abs() < 1e-9);

	state.pointer_up();
	assert!(!state.graph.nodes()[idx].is_pinned());
	for _ in 0..30 {
		state.tick(1.0 / 60.0);
	}
	let free = (state.graph.nodes()[idx].x, state.graph.nodes()[idx].y);
	assert_ne!(free, held);

	while state.tick(1.0) > 0 {}
	assert_eq!(state.phase(), Phase::Settled);
}

#[test]
fn unknown_link_ids_fail_construction() {
	let mut data = subscription_network();
	assert!(Graph::new(&data, &LayoutConfig::default()).is_ok());

	data.links.push(GraphLink {
		source: "Netflix".into(),
		target: "Peacock".into(),
		value: 0.5,
	});
	let err = Graph::new(&data, &LayoutConfig::default()).unwrap_err();
	assert!(matches!(err, GraphError::UnknownNode { index: 13, .. }));
}

#[test]
fn zoom_beyond_bounds_is_idempotent() {
	let mut state = ForceGraphState::new(
		&subscription_network(),
		LayoutConfig::default(),
		WIDTH,
		HEIGHT,
		scale::group_color,
	)
	.unwrap();
	state.set_zoom(50.0);
	assert_eq!(state.transform.k, 5.0);
	let at_max = state.transform;
	for _ in 0..5 {
		state.wheel(200.0, 200.0, -1.0);
	}
	assert_eq!(state.transform, at_max);

	state.set_zoom(0.0001);
	assert_eq!(state.transform.k, 0.5);
}
