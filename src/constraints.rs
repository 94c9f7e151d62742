// SPDX-License-Identifier: MPL-2.0

//! Translation of a dependency graph into boolean clauses.
//!
//! Clauses are generated in three groups, always in this order:
//!
//! 1. the root clause, `root`;
//! 2. one version clause `¬(v1 ∧ v2)` per pair of versions of the same package;
//! 3. one dependency clause `p → (d1 ∨ … ∨ dk)` per node `p`
//!    and per package among its direct dependencies,
//!    where `d1 … dk` are the dependencies of `p` with that package name.
//!
//! The root clause requires the root node itself,
//! other versions of the root package do not satisfy it.
//!
//! [explain] gives a shorter plain language summary of the same constraints.

use crate::clause::{self, Clause, ClauseKind, Evaluation, FormulaDescriptor, Literal};
use crate::graph::DependencyGraph;
use crate::node::Node;
use crate::type_aliases::{Map, Selection, Set};

/// Clauses compiled from a graph, each paired with its descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    clauses: Vec<Clause>,
    descriptors: Vec<FormulaDescriptor>,
    variables: usize,
    package_groups: usize,
}

/// Size statistics of a [ConstraintSet].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaStats {
    /// Number of clauses.
    pub total_clauses: usize,
    /// Number of nodes in the graph, one boolean variable each.
    pub total_variables: usize,
    /// Number of distinct package names.
    pub package_groups: usize,
    /// Mean number of literals per clause, 0 without clauses.
    pub avg_clause_length: f64,
    /// Longest clause, 0 without clauses.
    pub max_clause_length: usize,
    /// Shortest clause, 0 without clauses.
    pub min_clause_length: usize,
}

/// Compile the constraints of a graph anchored on `root`.
///
/// Clauses and descriptors are index aligned.
/// This never fails, `root` does not even need to belong to the graph.
pub fn compile(graph: &DependencyGraph, root: &Node) -> ConstraintSet {
    let groups = graph.package_groups();
    let mut set = ConstraintSet {
        variables: graph.node_count(),
        package_groups: groups.len(),
        ..ConstraintSet::default()
    };

    set.push(
        Clause::new(vec![Literal::positive(root)]),
        FormulaDescriptor {
            kind: ClauseKind::Root,
            formula: root.to_string(),
            description: format!("Root package {} must be installed", root),
        },
    );

    for versions in groups.values() {
        for (i, first) in versions.iter().enumerate() {
            for second in &versions[i + 1..] {
                set.push(
                    Clause::new(vec![Literal::negative(first), Literal::negative(second)]),
                    FormulaDescriptor {
                        kind: ClauseKind::VersionConstraint,
                        formula: format!("¬({} ∧ {})", first, second),
                        description: format!("Cannot select both {} and {}", first, second),
                    },
                );
            }
        }
    }

    for package in graph.nodes() {
        let mut by_name: Map<&str, Vec<&Node>> = Map::default();
        for dep in graph.successors(package.as_str()) {
            by_name.entry(dep.name()).or_default().push(dep);
        }
        for deps in by_name.values() {
            let clause = std::iter::once(Literal::negative(package))
                .chain(deps.iter().map(|&dep| Literal::positive(dep)))
                .collect();
            let rendered = render_disjunction(deps);
            set.push(
                clause,
                FormulaDescriptor {
                    kind: ClauseKind::Dependency,
                    formula: format!("{} → {}", package, rendered),
                    description: format!(
                        "If {} is selected, then {} must be selected",
                        package, rendered
                    ),
                },
            );
        }
    }

    log::debug!(
        "compiled {} clauses over {} nodes for root {}",
        set.clauses.len(),
        set.variables,
        root
    );
    set
}

/// Plain language summary of the constraints of a graph,
/// grouped like the clauses but one line per package or dependent node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explanations {
    /// Why the root must be selected.
    pub root: String,
    /// One line per package with several versions, listing them.
    pub versions: Vec<String>,
    /// One line per node with dependencies, listing the packages it needs.
    pub dependencies: Vec<String>,
}

/// Explain the constraints of a graph anchored on `root`.
pub fn explain(graph: &DependencyGraph, root: &Node) -> Explanations {
    let versions = graph
        .package_groups()
        .iter()
        .filter(|(_, nodes)| nodes.len() > 1)
        .map(|(name, nodes)| {
            let list: Vec<&str> = nodes.iter().map(Node::version).collect();
            format!(
                "At most one version of {} can be selected: {}",
                name,
                list.join(", ")
            )
        })
        .collect();

    let mut dependencies = Vec::new();
    for package in graph.nodes() {
        let names: Set<&str> = graph
            .successors(package.as_str())
            .map(Node::name)
            .collect();
        if names.is_empty() {
            continue;
        }
        let names: Vec<&str> = names.into_iter().collect();
        dependencies.push(format!(
            "If {}({}) is selected, then {} must also be selected",
            package.name(),
            package.version(),
            names.join(", ")
        ));
    }

    Explanations {
        root: format!("{} must be selected (it's the root package)", root),
        versions,
        dependencies,
    }
}

/// `d` for a single node, `(d1 ∨ d2 ∨ …)` otherwise.
fn render_disjunction(nodes: &[&Node]) -> String {
    match nodes {
        [single] => single.to_string(),
        _ => {
            let inner: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
            format!("({})", inner.join(" ∨ "))
        }
    }
}

impl ConstraintSet {
    fn push(&mut self, clause: Clause, descriptor: FormulaDescriptor) {
        self.clauses.push(clause);
        self.descriptors.push(descriptor);
    }

    /// The clauses, in generation order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The descriptors, aligned with [clauses](ConstraintSet::clauses).
    pub fn descriptors(&self) -> &[FormulaDescriptor] {
        &self.descriptors
    }

    /// Clauses paired with their descriptors.
    pub fn iter(&self) -> impl Iterator<Item = (&Clause, &FormulaDescriptor)> {
        self.clauses.iter().zip(&self.descriptors)
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether there is no clause.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate every clause against a selection.
    pub fn evaluate(&self, selection: &Selection) -> Evaluation {
        clause::evaluate_all(&self.clauses, selection)
    }

    /// Same answer as `self.evaluate(selection).all_satisfied`,
    /// stopping at the first violated clause.
    pub fn is_satisfied_by(&self, selection: &Selection) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(selection))
    }

    /// Size statistics.
    pub fn stats(&self) -> FormulaStats {
        let lengths = self.clauses.iter().map(Clause::len);
        let total: usize = lengths.clone().sum();
        FormulaStats {
            total_clauses: self.clauses.len(),
            total_variables: self.variables,
            package_groups: self.package_groups,
            avg_clause_length: if self.clauses.is_empty() {
                0.0
            } else {
                total as f64 / self.clauses.len() as f64
            },
            max_clause_length: lengths.clone().max().unwrap_or(0),
            min_clause_length: lengths.min().unwrap_or(0),
        }
    }
}
