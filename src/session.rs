// SPDX-License-Identifier: MPL-2.0

//! Interactive selection state over a dependency graph.
//!
//! A [Session] owns a private copy of the graph and of the root node,
//! and the set of nodes picked so far.
//! Selecting two versions of the same package is refused when it happens,
//! while dependencies are only checked when asked for.

use crate::clause::FormulaDescriptor;
use crate::constraints::{compile, explain, ConstraintSet, Explanations};
use crate::error::SessionError;
use crate::graph::DependencyGraph;
use crate::node::Node;
use crate::report::Violation;
use crate::scenario::Scenario;
use crate::solver;
use crate::type_aliases::{Map, Selection, Set};

/// Number of solutions shown when they are revealed.
pub const REVEAL_LIMIT: usize = 5;

/// Result of [Session::select].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The node was added to the selection.
    Selected,
    /// Another version of the same package is already selected.
    /// Selecting an already selected node also ends up here.
    RejectedVersionConflict {
        /// The selected node sharing the package name.
        conflicting: Node,
    },
    /// The node is not part of the graph.
    RejectedUnknownNode,
}

impl SelectOutcome {
    /// Whether the node was added.
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected)
    }
}

/// Result of [Session::toggle].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The node was selected and has been removed.
    Deselected,
    /// The node was not selected, this is the outcome of selecting it.
    Select(SelectOutcome),
}

/// A clause descriptor along with its value for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClauseStatus {
    /// Position of the clause in the compiled constraints.
    pub index: usize,
    /// How to display the clause.
    pub descriptor: FormulaDescriptor,
    /// Whether the clause holds.
    pub satisfied: bool,
}

/// Snapshot of a session, for display or debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Root node.
    pub root: Node,
    /// Selected nodes.
    pub selected: Selection,
    /// Diagnostics of the selection.
    pub violations: Vec<Violation>,
    /// Whether the selection satisfies every constraint.
    pub is_valid_solution: bool,
    /// Number of nodes of the graph.
    pub total_packages: usize,
    /// Number of edges of the graph.
    pub total_dependencies: usize,
}

/// Selection state of one player over one graph.
#[derive(Debug, Clone)]
pub struct Session {
    graph: DependencyGraph,
    root: Node,
    selected: Selection,
}

impl Session {
    /// Start a session with an empty selection.
    /// Fails if `root` is not a node of `graph`.
    pub fn new(graph: DependencyGraph, root: impl Into<Node>) -> Result<Self, SessionError> {
        let root = root.into();
        if !graph.contains(root.as_str()) {
            return Err(SessionError::RootNotInGraph { root });
        }
        log::debug!(
            "new session rooted at {} over {} nodes",
            root,
            graph.node_count()
        );
        Ok(Self {
            graph,
            root,
            selected: Selection::new(),
        })
    }

    /// Start a session on a copy of the scenario graph.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, SessionError> {
        Self::new(scenario.graph.clone(), scenario.root.clone())
    }

    /// The session graph.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Currently selected nodes.
    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    /// Whether that node is currently selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Add a node to the selection.
    /// The selection is left untouched when the node is rejected.
    pub fn select(&mut self, id: &str) -> SelectOutcome {
        let Some(node) = self.graph.node(id) else {
            log::trace!("select {}: unknown node", id);
            return SelectOutcome::RejectedUnknownNode;
        };
        if let Some(conflicting) = self.selected.iter().find(|s| s.same_package(node)) {
            log::trace!("select {}: conflicts with {}", id, conflicting);
            return SelectOutcome::RejectedVersionConflict {
                conflicting: conflicting.clone(),
            };
        }
        log::trace!("select {}", id);
        self.selected.insert(node.clone());
        SelectOutcome::Selected
    }

    /// Remove a node from the selection.
    /// Returns false if it was not selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        let removed = self.selected.remove(id);
        if removed {
            log::trace!("deselect {}", id);
        }
        removed
    }

    /// Deselect the node if it is selected, select it otherwise.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if self.deselect(id) {
            ToggleOutcome::Deselected
        } else {
            ToggleOutcome::Select(self.select(id))
        }
    }

    /// Clear the selection.
    pub fn reset(&mut self) {
        self.selected.clear();
    }

    /// Constraints of the session graph, compiled afresh.
    pub fn constraints(&self) -> ConstraintSet {
        compile(&self.graph, &self.root)
    }

    /// Plain language summary of the constraints.
    pub fn explanations(&self) -> Explanations {
        explain(&self.graph, &self.root)
    }

    /// Whether the selection satisfies every constraint.
    pub fn is_valid_solution(&self) -> bool {
        self.constraints().evaluate(&self.selected).all_satisfied
    }

    /// Every clause with its value for the current selection.
    pub fn hints(&self) -> Vec<ClauseStatus> {
        let constraints = self.constraints();
        let evaluation = constraints.evaluate(&self.selected);
        constraints
            .descriptors()
            .iter()
            .zip(evaluation.per_clause)
            .enumerate()
            .map(|(index, (descriptor, satisfied))| ClauseStatus {
                index,
                descriptor: descriptor.clone(),
                satisfied,
            })
            .collect()
    }

    /// Diagnose the selection without going through the clauses.
    ///
    /// Reports packages with several selected versions,
    /// then selected nodes depending on a package with no selected version,
    /// once per dependent node and missing package.
    /// The root requirement is not checked here.
    pub fn check_violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut by_name: Map<&str, Vec<Node>> = Map::default();
        for node in &self.selected {
            by_name.entry(node.name()).or_default().push(node.clone());
        }
        for (package, selected) in &by_name {
            if selected.len() > 1 {
                violations.push(Violation::MultipleVersions {
                    package: package.to_string(),
                    selected: selected.clone(),
                });
            }
        }

        for node in &self.selected {
            let mut reported: Set<&str> = Set::default();
            for dep in self.graph.successors(node.as_str()) {
                if !by_name.contains_key(dep.name()) && reported.insert(dep.name()) {
                    violations.push(Violation::MissingDependency {
                        dependent: node.clone(),
                        dependency: dep.name().to_owned(),
                    });
                }
            }
        }
        violations
    }

    /// Selected nodes whose whole dependency closure is covered
    /// by selected package names, any version.
    pub fn installable(&self) -> Selection {
        let names: Set<&str> = self.selected.iter().map(Node::name).collect();
        self.selected
            .iter()
            .filter(|node| self.closure_covered(node, &names))
            .cloned()
            .collect()
    }

    fn closure_covered(&self, start: &Node, names: &Set<&str>) -> bool {
        let mut visited: Set<&Node> = Set::default();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if !names.contains(node.name()) {
                return false;
            }
            stack.extend(self.graph.successors(node.as_str()));
        }
        true
    }

    /// Up to [REVEAL_LIMIT] solutions of the session graph.
    pub fn reveal_solutions(&self) -> Vec<Selection> {
        let mut solutions =
            solver::enumerate(&self.graph, &self.root, solver::DEFAULT_MAX_SOLUTIONS);
        solutions.truncate(REVEAL_LIMIT);
        solutions
    }

    /// Snapshot of the session.
    pub fn state(&self) -> GameState {
        GameState {
            root: self.root.clone(),
            selected: self.selected.clone(),
            violations: self.check_violations(),
            is_valid_solution: self.is_valid_solution(),
            total_packages: self.graph.node_count(),
            total_dependencies: self.graph.edge_count(),
        }
    }
}
