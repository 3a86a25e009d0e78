use std::f64::consts::PI;

use pattern_web::components::pattern_web::{
	EdgeKey, EdgeStyle, HitTarget, NodeClicked, Pattern, PatternWebOptions, PatternWebState, Point,
};

fn chain() -> Vec<Pattern> {
	vec![
		Pattern::new("A", "Scenario Expansion", ["B"]),
		Pattern::new("B", "Constraint Emphasis", ["C"]),
		Pattern::new("C", "Conflict Mediation", Vec::<String>::new()),
	]
}

fn close(a: Point, b: Point) -> bool {
	a.distance(b) < 1e-9
}

#[test]
fn three_node_chain_end_to_end() {
	let mut state = PatternWebState::new(chain(), PatternWebOptions::default(), 300.0, 300.0);

	let center = Point::new(150.0, 150.0);
	for (id, degrees) in [("A", 0.0_f64), ("B", 120.0), ("C", 240.0)] {
		let angle = degrees * PI / 180.0;
		let expected = Point::new(150.0 + 105.0 * angle.cos(), 150.0 + 105.0 * angle.sin());
		let actual = state.positions()[id];
		assert!(close(actual, expected), "{id}: {actual:?} != {expected:?}");
		assert!((center.distance(actual) - 105.0).abs() < 1e-9);
	}

	let specs = state.edge_specs();
	let keys: Vec<_> = specs
		.iter()
		.map(|e| (e.source.as_str(), e.target.as_str()))
		.collect();
	assert_eq!(keys, vec![("A", "B"), ("B", "C")]);
	assert!(specs.iter().all(|e| !e.emphasized));

	// Hover B: both edges and B light up.
	let b = state.positions()["B"];
	assert!(state.pointer_move(b));
	assert!(state.edge_specs().iter().all(|e| e.emphasized));
	assert!(state.is_node_emphasized("B"));
	assert!(!state.is_node_emphasized("A"));
	assert!(!state.is_node_emphasized("C"));

	// Move onto C and click it.
	let c = state.positions()["C"];
	state.pointer_move(c);
	assert_eq!(state.click(c), Some(NodeClicked("C".into())));
	assert_eq!(state.interaction.selected_node.as_deref(), Some("C"));

	// With the pointer gone, only the edge ending at the selection stays emphasized.
	state.pointer_leave();
	let emphasized: Vec<_> = state
		.edge_specs()
		.into_iter()
		.filter(|e| e.emphasized)
		.map(|e| e.source)
		.collect();
	assert_eq!(emphasized, vec!["B".to_string()]);
}

#[test]
fn repeated_clicks_report_every_time() {
	let mut state = PatternWebState::new(chain(), PatternWebOptions::default(), 300.0, 300.0);
	let a = state.positions()["A"];

	let mut notifications = Vec::new();
	for _ in 0..3 {
		if let Some(NodeClicked(id)) = state.click(a) {
			notifications.push(id);
		}
	}
	assert_eq!(notifications, vec!["A", "A", "A"]);
	assert_eq!(state.interaction.selected_node.as_deref(), Some("A"));
}

#[test]
fn hovered_edge_endpoint_policy() {
	for highlight in [true, false] {
		let options = PatternWebOptions {
			highlight_edge_endpoints: highlight,
			..PatternWebOptions::default()
		};
		let mut state = PatternWebState::new(chain(), options, 300.0, 300.0);
		let apex = state.edges()[0].path.sample(0.5);
		state.pointer_move(apex);

		assert_eq!(state.pointer_target(), Some(HitTarget::Edge(0)));
		assert_eq!(state.interaction.hovered_edge, Some(EdgeKey::new("A", "B")));
		assert_eq!(state.is_node_emphasized("A"), highlight);
		assert_eq!(state.is_node_emphasized("B"), highlight);
		assert!(!state.is_node_emphasized("C"));
	}
}

#[test]
fn straight_edges_and_changing_inputs() {
	let options = PatternWebOptions {
		edge_style: EdgeStyle::Straight,
		arrows: false,
		..PatternWebOptions::default()
	};
	let mut state = PatternWebState::new(chain(), options, 300.0, 300.0);
	for edge in state.edges() {
		assert!(close(edge.path.control, edge.path.start.midpoint(edge.path.end)));
	}

	state.set_patterns(vec![
		Pattern::new("A", "Solo", ["ghost"]),
	]);
	assert_eq!(state.nodes().len(), 1);
	assert!(state.edges().is_empty());
	assert!(close(state.positions()["A"], Point::new(255.0, 150.0)));

	state.set_patterns(Vec::new());
	assert!(state.positions().is_empty());
	assert_eq!(state.hit_test(Point::new(150.0, 150.0)), None);
}
