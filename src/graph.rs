// SPDX-License-Identifier: MPL-2.0

//! Directed graph of package versions.
//!
//! An edge `(a, b)` means that `a` depends on `b`.
//! The dependency is satisfied by `b` or by any other version of `b`'s package:
//! grouping by package name is applied when constraints are compiled,
//! it is not baked into the edges.

use std::collections::VecDeque;

use crate::node::Node;
use crate::type_aliases::{Map, PackageGroups, Set};

/// Dependency graph over package [nodes](Node).
///
/// Nodes and edges keep their insertion order,
/// which is the order used by constraint compilation and enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DependencyGraph {
    dependencies: Map<Node, Set<Node>>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node without dependencies.
    /// Adding a node twice keeps its existing dependencies.
    pub fn add_node(&mut self, node: impl Into<Node>) -> Node {
        let node = node.into();
        self.dependencies.entry(node.clone()).or_default();
        node
    }

    /// Registers that `from` depends on `to`.
    /// Missing endpoints are added to the graph.
    pub fn add_dependency(&mut self, from: impl Into<Node>, to: impl Into<Node>) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.dependencies.entry(from).or_default().insert(to);
    }

    /// Registers several dependencies of the same node.
    pub fn add_dependencies<I, N>(&mut self, from: impl Into<Node>, dependencies: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let from = self.add_node(from);
        for to in dependencies {
            self.add_dependency(from.clone(), to);
        }
    }

    /// Whether the graph has a node with that identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.dependencies.contains_key(id)
    }

    /// The node with that identifier, if any.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.dependencies.get_key_value(id).map(|(node, _)| node)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.dependencies.keys()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(|deps| deps.len()).sum()
    }

    /// All edges `(dependent, dependency)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.dependencies
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from, to)))
    }

    /// Direct dependencies of a node.
    /// Empty if the node is unknown.
    pub fn successors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Node> + 'a {
        self.dependencies.get(id).into_iter().flatten()
    }

    /// Nodes depending directly on the given one.
    pub fn predecessors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.dependencies
            .iter()
            .filter(move |(_, deps)| deps.contains(id))
            .map(|(from, _)| from)
    }

    /// Nodes grouped by package name.
    /// Groups appear in the order their first node was added.
    pub fn package_groups(&self) -> PackageGroups {
        let mut groups = PackageGroups::default();
        for node in self.nodes() {
            groups
                .entry(node.name().to_owned())
                .or_default()
                .push(node.clone());
        }
        groups
    }

    /// Every version of the given package present in the graph.
    pub fn versions_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes().filter(move |node| node.name() == name)
    }

    /// Nodes ordered so that every node comes before its dependencies.
    /// Returns [None] if the graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<Node>> {
        let mut in_degree: Map<&Node, usize> = self.nodes().map(|n| (n, 0)).collect();
        for (_, to) in self.edges() {
            if let Some(degree) = in_degree.get_mut(to) {
                *degree += 1;
            }
        }
        let mut ready: VecDeque<&Node> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut order = Vec::with_capacity(self.node_count());
        while let Some(node) = ready.pop_front() {
            order.push(node.clone());
            for dep in self.successors(node.as_str()) {
                if let Some(degree) = in_degree.get_mut(dep) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(dep);
                    }
                }
            }
        }
        (order.len() == self.node_count()).then_some(order)
    }

    /// Whether the graph has no cycle.
    /// Layouts by dependency level only apply to acyclic graphs.
    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_some()
    }
}

// Replayed through the builder: keys keep their order,
// dependencies missing as keys become nodes after them.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DependencyGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Map<Node, Vec<Node>> as serde::Deserialize>::deserialize(deserializer)?;
        let mut graph = Self::new();
        for from in raw.keys() {
            graph.add_node(from);
        }
        for (from, dependencies) in raw {
            graph.add_dependencies(from, dependencies);
        }
        Ok(graph)
    }
}

impl<F, T> FromIterator<(F, T)> for DependencyGraph
where
    F: Into<Node>,
    T: Into<Node>,
{
    fn from_iter<I: IntoIterator<Item = (F, T)>>(edges: I) -> Self {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_dependency(from, to);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_dependencies("A==2.0", ["B==1.3", "B==1.4"]);
        graph.add_dependencies("B==1.3", ["G==0.5", "G==0.6"]);
        graph.add_dependency("B==1.4", "G==0.7");
        graph
    }

    #[test]
    fn counts_and_lookup() {
        let graph = sample();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains("G==0.7"));
        assert!(!graph.contains("G==0.8"));
        assert_eq!(graph.node("B==1.4").map(Node::version), Some("1.4"));
    }

    #[test]
    fn add_node_keeps_dependencies() {
        let mut graph = sample();
        graph.add_node("A==2.0");
        assert_eq!(graph.successors("A==2.0").count(), 2);
        graph.add_dependency("A==2.0", "B==1.3");
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn neighbours() {
        let graph = sample();
        let succ: Vec<&str> = graph.successors("B==1.3").map(Node::as_str).collect();
        assert_eq!(succ, ["G==0.5", "G==0.6"]);
        let pred: Vec<&str> = graph.predecessors("B==1.4").map(Node::as_str).collect();
        assert_eq!(pred, ["A==2.0"]);
        assert_eq!(graph.successors("missing").count(), 0);
    }

    #[test]
    fn groups_follow_insertion_order() {
        let groups = sample().package_groups();
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, ["A", "B", "G"]);
        let g: Vec<&str> = groups["G"].iter().map(Node::as_str).collect();
        assert_eq!(g, ["G==0.5", "G==0.6", "G==0.7"]);
    }

    #[test]
    fn dependent_comes_before_dependency() {
        let graph: DependencyGraph = [("A==1.0", "B==1.0"), ("C==1.0", "A==1.0")]
            .into_iter()
            .collect();
        let order: Vec<&str> = graph.nodes().map(Node::as_str).collect();
        assert_eq!(order, ["A==1.0", "B==1.0", "C==1.0"]);

        let mut graph = DependencyGraph::new();
        graph.add_dependency("x==1.0", "y==1.0");
        let order: Vec<&str> = graph.nodes().map(Node::as_str).collect();
        assert_eq!(order, ["x==1.0", "y==1.0"]);
    }

    #[test]
    fn acyclicity() {
        let mut graph = sample();
        assert!(graph.is_acyclic());
        let order = graph.topological_order().unwrap_or_default();
        assert_eq!(order.first().map(Node::as_str), Some("A==2.0"));
        graph.add_dependency("G==0.7", "A==2.0");
        assert!(!graph.is_acyclic());
        assert_eq!(graph.topological_order(), None);
    }
}
