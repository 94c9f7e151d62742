// SPDX-License-Identifier: MPL-2.0

//! Human readable diagnostics about a selection.

use std::fmt;

use crate::node::Node;

/// A problem found in a selection by
/// [check_violations](crate::session::Session::check_violations).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Violation {
    /// More than one version of a package is selected.
    MultipleVersions {
        /// Package name.
        package: String,
        /// Selected versions of that package.
        selected: Vec<Node>,
    },
    /// A selected node depends on a package of which no version is selected.
    MissingDependency {
        /// The selected node.
        dependent: Node,
        /// Name of the package it depends on.
        dependency: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleVersions { package, selected } => {
                write!(f, "Multiple versions selected for {}: ", package)?;
                for (i, node) in selected.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", node)?;
                }
                Ok(())
            }
            Self::MissingDependency {
                dependent,
                dependency,
            } => write!(f, "{} requires {} but it's not selected", dependent, dependency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let multiple = Violation::MultipleVersions {
            package: "B".into(),
            selected: vec![Node::new("B==1.3"), Node::new("B==1.4")],
        };
        assert_eq!(
            multiple.to_string(),
            "Multiple versions selected for B: B==1.3, B==1.4"
        );
        let missing = Violation::MissingDependency {
            dependent: Node::new("A==2.0"),
            dependency: "G".into(),
        };
        assert_eq!(missing.to_string(), "A==2.0 requires G but it's not selected");
    }
}
