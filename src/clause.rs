// SPDX-License-Identifier: MPL-2.0

//! Boolean clauses over the selection state of nodes, and their evaluation.

use std::fmt;

use crate::node::Node;
use crate::type_aliases::Selection;

/// A node paired with the selection state it requires.
///
/// `(n, true)` holds iff `n` is selected,
/// `(n, false)` holds iff `n` is not selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    /// Node the literal is about.
    pub node: Node,
    /// Required selection state.
    pub selected: bool,
}

impl Literal {
    /// Literal true when the node is selected.
    pub fn positive(node: impl Into<Node>) -> Self {
        Self {
            node: node.into(),
            selected: true,
        }
    }

    /// Literal true when the node is not selected.
    pub fn negative(node: impl Into<Node>) -> Self {
        Self {
            node: node.into(),
            selected: false,
        }
    }

    /// Evaluate the literal against a selection.
    pub fn holds(&self, selection: &Selection) -> bool {
        selection.contains(&self.node) == self.selected
    }
}

/// A disjunction of literals.
/// Satisfied iff at least one literal holds, so the empty clause is never satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause from its literals.
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// Literals, in order.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether the clause has no literal.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Evaluate the clause against a selection.
    pub fn is_satisfied_by(&self, selection: &Selection) -> bool {
        self.literals.iter().any(|literal| literal.holds(selection))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Where a clause comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClauseKind {
    /// The root node must be selected.
    Root,
    /// Two versions of the same package cannot both be selected.
    VersionConstraint,
    /// A selected node needs some version of each package it depends on.
    Dependency,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::VersionConstraint => "version_constraint",
            Self::Dependency => "dependency",
        })
    }
}

/// Human readable rendering of a clause, for display next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaDescriptor {
    /// Kind of the described clause.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ClauseKind,
    /// The formula, written with `¬`, `∧`, `∨` and `→`.
    pub formula: String,
    /// Plain language sentence.
    pub description: String,
}

/// Result of evaluating a list of clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether every clause holds.
    pub all_satisfied: bool,
    /// Result of each clause, in input order.
    pub per_clause: Vec<bool>,
}

/// Evaluate a single clause.
pub fn evaluate(clause: &Clause, selection: &Selection) -> bool {
    clause.is_satisfied_by(selection)
}

/// Evaluate every clause.
/// All clauses are evaluated, there is no short circuit.
pub fn evaluate_all<'a>(
    clauses: impl IntoIterator<Item = &'a Clause>,
    selection: &Selection,
) -> Evaluation {
    let per_clause: Vec<bool> = clauses
        .into_iter()
        .map(|clause| clause.is_satisfied_by(selection))
        .collect();
    Evaluation {
        all_satisfied: per_clause.iter().all(|&ok| ok),
        per_clause,
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selected {
            write!(f, "{}", self.node)
        } else {
            write!(f, "¬{}", self.node)
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return f.write_str("⊥");
        }
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                f.write_str(" ∨ ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}
