// SPDX-License-Identifier: MPL-2.0

//! Exhaustive enumeration of the selections satisfying a graph's constraints.
//!
//! This is a brute force search, not a SAT solver.
//! The search decides "not selected" then "selected" for every node of the graph,
//! so its cost is `O(2^n)` in the number of nodes `n`, only reduced by refusing to
//! select two versions of the same package. It is meant for graphs of a few tens
//! of nodes at most; callers bound the work with `max_solutions`, there is no
//! other cancellation mechanism.
//!
//! ```
//! # use depsat::graph::DependencyGraph;
//! # use depsat::node::Node;
//! # use depsat::solver::enumerate;
//! let mut graph = DependencyGraph::new();
//! graph.add_dependencies("app==1.0", ["lib==1.0", "lib==2.0"]);
//! let solutions = enumerate(&graph, &Node::new("app==1.0"), 10);
//! assert_eq!(solutions.len(), 2);
//! ```

use crate::constraints::{compile, ConstraintSet};
use crate::graph::DependencyGraph;
use crate::node::Node;
use crate::type_aliases::{Selection, Set};

/// Number of raw candidates collected when the caller has no better bound.
pub const DEFAULT_MAX_SOLUTIONS: usize = 20;

/// Enumerate minimal selections satisfying every constraint of the graph.
///
/// The search stops once `max_solutions` raw candidates were accepted.
/// Each candidate is then [minimized](minimize) and duplicates are removed,
/// so fewer than `max_solutions` solutions may come back even when more exist:
/// a short result does not tell whether the search was exhaustive or cut.
/// Solutions are not guaranteed to be the smallest ones, nor the first ones
/// in any particular order.
///
/// An empty result means no solution was found,
/// which is the case when the constraints are unsatisfiable.
pub fn enumerate(graph: &DependencyGraph, root: &Node, max_solutions: usize) -> Vec<Selection> {
    let constraints = compile(graph, root);
    let raw = search(graph, &constraints, max_solutions);
    let raw_count = raw.len();

    let mut solutions: Vec<Selection> = Vec::new();
    for candidate in raw {
        let solution = minimize(&constraints, candidate);
        if !solutions.contains(&solution) {
            solutions.push(solution);
        }
    }
    log::debug!(
        "enumeration from {}: {} raw candidates, {} distinct solutions",
        root,
        raw_count,
        solutions.len()
    );
    solutions
}

/// Complete assignments accepted by the search, before minimization.
///
/// Every returned selection satisfies all the constraints, and contains at most
/// one version of each package. Stops after `max_solutions` of them.
pub fn candidates(graph: &DependencyGraph, root: &Node, max_solutions: usize) -> Vec<Selection> {
    search(graph, &compile(graph, root), max_solutions)
}

/// Remove nodes from a selection while it stays satisfying.
///
/// Each pass tries to drop every remaining node once, in order,
/// keeping a removal when all constraints still hold.
/// Passes repeat until one removes nothing,
/// so no single node of the result can be removed.
/// The result depends on the order of the nodes,
/// it is a local minimum, not a minimum cardinality selection.
pub fn minimize(constraints: &ConstraintSet, mut selection: Selection) -> Selection {
    loop {
        let before = selection.len();
        let snapshot: Vec<Node> = selection.iter().cloned().collect();
        for node in snapshot {
            selection.remove(&node);
            if constraints.is_satisfied_by(&selection) {
                log::trace!("minimize: dropped {}", node);
            } else {
                selection.insert(node);
            }
        }
        if selection.len() == before {
            return selection;
        }
    }
}

/// Greedy guess: the root, then for every dependency whose package is not chosen
/// yet, the highest version of that package, following the chosen nodes.
///
/// Cheap, but not guaranteed to satisfy the constraints:
/// check the result before presenting it as a solution.
pub fn suggest(graph: &DependencyGraph, root: &Node) -> Selection {
    let mut chosen = Selection::new();
    let mut names: Set<&str> = Set::default();
    let mut stack = vec![root.clone()];
    chosen.insert(root.clone());
    names.insert(root.name());

    while let Some(node) = stack.pop() {
        for dep in graph.successors(node.as_str()) {
            if names.contains(dep.name()) {
                continue;
            }
            let best = graph
                .versions_of(dep.name())
                .max_by(|a, b| a.cmp_version(b))
                .unwrap_or(dep);
            names.insert(best.name());
            chosen.insert(best.clone());
            stack.push(best.clone());
        }
    }
    chosen
}

fn search(graph: &DependencyGraph, constraints: &ConstraintSet, max_solutions: usize) -> Vec<Selection> {
    let mut search = Search {
        nodes: graph.nodes().collect(),
        constraints,
        max_solutions,
        chosen: Selection::new(),
        taken: Set::default(),
        found: Vec::new(),
    };
    if max_solutions > 0 {
        search.descend(0);
    }
    search.found
}

/// Depth first search state.
/// `chosen` and `taken` are updated on the way down and restored on the way up.
struct Search<'a> {
    nodes: Vec<&'a Node>,
    constraints: &'a ConstraintSet,
    max_solutions: usize,
    chosen: Selection,
    /// Package names of the nodes in `chosen`.
    taken: Set<&'a str>,
    found: Vec<Selection>,
}

impl<'a> Search<'a> {
    fn descend(&mut self, depth: usize) {
        if self.found.len() >= self.max_solutions {
            return;
        }
        let Some(&node) = self.nodes.get(depth) else {
            if self.constraints.is_satisfied_by(&self.chosen) {
                log::trace!("accepted candidate of {} nodes", self.chosen.len());
                self.found.push(self.chosen.clone());
            }
            return;
        };

        // Exclude first.
        self.descend(depth + 1);

        if self.taken.contains(node.name()) {
            return;
        }
        self.taken.insert(node.name());
        self.chosen.insert(node.clone());
        self.descend(depth + 1);
        self.chosen.remove(node);
        self.taken.swap_remove(node.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(ids: &[&str]) -> Selection {
        ids.iter().map(|&id| Node::new(id)).collect()
    }

    fn game() -> (DependencyGraph, Node) {
        let mut graph = DependencyGraph::new();
        graph.add_dependencies("A==2.0", ["B==1.3", "B==1.4"]);
        graph.add_dependencies("B==1.3", ["G==0.5", "G==0.6"]);
        graph.add_dependency("B==1.4", "G==0.7");
        (graph, Node::new("A==2.0"))
    }

    #[test]
    fn all_minimal_solutions() {
        let (graph, root) = game();
        let mut solutions = enumerate(&graph, &root, 1000);
        solutions.sort();
        let mut expected = vec![
            selection(&["A==2.0", "B==1.3", "G==0.5"]),
            selection(&["A==2.0", "B==1.3", "G==0.6"]),
            selection(&["A==2.0", "B==1.4", "G==0.7"]),
        ];
        expected.sort();
        assert_eq!(solutions, expected);
    }

    #[test]
    fn zero_max_searches_nothing() {
        let (graph, root) = game();
        assert!(enumerate(&graph, &root, 0).is_empty());
        assert!(candidates(&graph, &root, 0).is_empty());
    }

    #[test]
    fn cap_applies_to_raw_candidates() {
        let (graph, root) = game();
        let raw = candidates(&graph, &root, 2);
        assert_eq!(raw.len(), 2);
        assert!(enumerate(&graph, &root, 2).len() <= 2);
    }

    #[test]
    fn search_never_picks_two_versions() {
        let (graph, root) = game();
        for candidate in candidates(&graph, &root, 1000) {
            let names: Set<&str> = candidate.iter().map(Node::name).collect();
            assert_eq!(names.len(), candidate.len());
        }
    }

    #[test]
    fn minimize_until_fixpoint() {
        // `x` is only needed while `y` is selected, and `x` sorts first.
        let mut graph = DependencyGraph::new();
        graph.add_node("r==1.0");
        graph.add_dependency("y==1.0", "x==1.0");
        let constraints = compile(&graph, &Node::new("r==1.0"));
        let minimal = minimize(&constraints, selection(&["r==1.0", "x==1.0", "y==1.0"]));
        assert_eq!(minimal, selection(&["r==1.0"]));
    }

    #[test]
    fn suggestion_picks_highest_versions() {
        let (graph, root) = game();
        assert_eq!(
            suggest(&graph, &root),
            selection(&["A==2.0", "B==1.4", "G==0.7"])
        );
    }

    #[test]
    fn suggestion_may_be_invalid() {
        let mut graph = DependencyGraph::new();
        graph.add_dependencies("app==1.0", ["lib==1.0", "util==1.0"]);
        graph.add_node("lib==2.0");
        let root = Node::new("app==1.0");
        let guess = suggest(&graph, &root);
        assert!(guess.contains("lib==2.0"));
        assert!(!compile(&graph, &root).is_satisfied_by(&guess));
    }
}
