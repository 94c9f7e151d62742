// SPDX-License-Identifier: MPL-2.0

//! Publicly exported type aliases.

use std::collections::BTreeSet;
use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

use crate::node::Node;

/// Map implementation used by the library.
/// Iteration follows insertion order.
pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Set implementation used by the library.
/// Iteration follows insertion order.
pub type Set<T> = indexmap::IndexSet<T, BuildHasherDefault<FxHasher>>;

/// A set of selected nodes.
/// Used for the session selection, for candidate assignments
/// and for solutions returned by the enumerator.
pub type Selection = BTreeSet<Node>;

/// Package name to the nodes sharing it, in graph order.
pub type PackageGroups = Map<String, Vec<Node>>;
