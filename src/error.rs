// SPDX-License-Identifier: MPL-2.0

//! Handling session errors.

use thiserror::Error;

use crate::node::Node;

/// Errors that may occur while setting up a [Session](crate::session::Session).
///
/// Rejected selections are not errors,
/// they are reported by [SelectOutcome](crate::session::SelectOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The root node is not a node of the dependency graph.
    #[error("Root package {root} not found in dependency graph")]
    RootNotInGraph {
        /// Root that was requested.
        root: Node,
    },
}
