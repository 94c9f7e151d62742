// SPDX-License-Identifier: MPL-2.0

#![cfg(feature = "serde")]

use depsat::graph::DependencyGraph;
use depsat::node::Node;
use depsat::scenario::{sample_scenarios, Scenario};
use depsat::session::{GameState, SelectOutcome, Session};
use depsat::solver::enumerate;

#[test]
fn node_is_written_as_its_identifier() {
    let node = Node::new("flask==2.0.0");
    let text = ron::ser::to_string(&node).expect("serializable");
    assert_eq!(text, "\"flask==2.0.0\"");
    let back: Node = ron::de::from_str(&text).expect("deserializable");
    assert_eq!(back.name(), "flask");
    assert_eq!(back.version(), "2.0.0");
}

#[test]
fn graph_from_ron() {
    let text = r#"{
        "A==2.0": ["B==1.3", "B==1.4"],
        "B==1.3": ["G==0.5"],
        "B==1.4": [],
        "G==0.5": [],
    }"#;
    let graph: DependencyGraph = ron::de::from_str(text).expect("a graph");
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    let successors: Vec<&str> = graph.successors("A==2.0").map(Node::as_str).collect();
    assert_eq!(successors, ["B==1.3", "B==1.4"]);
}

#[test]
fn dependency_missing_as_key_becomes_a_node() {
    let graph: DependencyGraph = ron::de::from_str(r#"{ "A==1.0": ["B==1.0"] }"#).expect("a graph");
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.contains("B==1.0"));
    let order: Vec<&str> = graph.nodes().map(Node::as_str).collect();
    assert_eq!(order, ["A==1.0", "B==1.0"]);

    let root = Node::new("A==1.0");
    let solutions = enumerate(&graph, &root, 20);
    assert_eq!(solutions.len(), 1);
    assert!(solutions[0].contains("B==1.0"));

    let mut session = Session::new(graph, root).expect("root is a node");
    assert_eq!(session.select("B==1.0"), SelectOutcome::Selected);
}

#[test]
fn scenarios_survive_ron() {
    for scenario in sample_scenarios() {
        let text = ron::ser::to_string(&scenario).expect("serializable");
        let back: Scenario = ron::de::from_str(&text).expect("deserializable");
        assert_eq!(back, scenario);
        assert!(back.graph.nodes().eq(scenario.graph.nodes()));
    }
}

#[test]
fn game_state_is_serializable() {
    let mut session = Session::from_scenario(&sample_scenarios()[0]).expect("root is a node");
    session.select("A==2.0");
    session.select("B==1.3");
    let state = session.state();
    let text = ron::ser::to_string(&state).expect("serializable");
    let back: GameState = ron::de::from_str(&text).expect("deserializable");
    assert_eq!(back, state);
    assert!(!back.is_valid_solution);
    // A==2.0 and B==1.3 both miss a version of G.
    assert_eq!(back.violations.len(), 2);
}
