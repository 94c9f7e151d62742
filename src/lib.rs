// SPDX-License-Identifier: MPL-2.0

//! Package dependency resolution as a constraint satisfaction game.
//!
//! A player is given a dependency graph of pinned package versions,
//! such as `flask==2.0.0`, and a root node.
//! They must pick a set of nodes that a package manager could install:
//! the root is picked, at most one version of each package is picked,
//! and every picked node has some version of each package it depends on picked.
//!
//! # Nodes and graphs
//!
//! A [Node](node::Node) is a package version identifier,
//! written `name==version` or `name-version`.
//! The package name and version are parsed once, when the node is built.
//! A [DependencyGraph](graph::DependencyGraph) holds nodes and "depends on" edges.
//! When a node depends on several versions of a package,
//! any one of them satisfies the dependency.
//!
//! # Constraints
//!
//! [compile](constraints::compile) turns a graph and a root into
//! boolean [clauses](clause::Clause), each a disjunction of literals
//! "this node is selected" or "this node is not selected":
//!
//! ```txt
//! A==2.0                          the root is selected
//! ¬(B==1.3 ∧ B==1.4)              at most one version of B
//! A==2.0 → (B==1.3 ∨ B==1.4)      A==2.0 needs some version of B it depends on
//! ```
//!
//! Each clause comes with a [FormulaDescriptor](clause::FormulaDescriptor)
//! rendering it for humans.
//!
//! # Solving
//!
//! The [solver] module enumerates selections satisfying every clause
//! by brute force, then shrinks each of them to a minimal one.
//! It is exponential in the number of nodes and only meant for small graphs.
//!
//! ```
//! # use depsat::graph::DependencyGraph;
//! # use depsat::node::Node;
//! # use depsat::solver::enumerate;
//! let mut graph = DependencyGraph::new();
//! graph.add_dependencies("A==2.0", ["B==1.3", "B==1.4"]);
//! graph.add_dependencies("B==1.3", ["G==0.5", "G==0.6"]);
//! graph.add_dependency("B==1.4", "G==0.7");
//!
//! let solutions = enumerate(&graph, &Node::new("A==2.0"), 20);
//! assert_eq!(solutions.len(), 3);
//! ```
//!
//! # Playing
//!
//! A [Session](session::Session) keeps the player's selection.
//! Selecting a second version of a package is refused on the spot,
//! missing dependencies are only reported when the selection is checked.
//!
//! ```
//! # use depsat::scenario::sample_scenarios;
//! # use depsat::session::{SelectOutcome, Session};
//! let scenario = &sample_scenarios()[0];
//! let mut session = Session::from_scenario(scenario).unwrap();
//! session.select("A==2.0");
//! session.select("B==1.3");
//! assert!(matches!(
//!     session.select("B==1.4"),
//!     SelectOutcome::RejectedVersionConflict { .. }
//! ));
//! session.select("G==0.6");
//! assert!(session.is_valid_solution());
//! ```

#![warn(missing_docs)]

pub mod clause;
pub mod constraints;
pub mod error;
pub mod graph;
pub mod node;
pub mod report;
pub mod scenario;
pub mod session;
pub mod solver;
pub mod type_aliases;
