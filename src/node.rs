// SPDX-License-Identifier: MPL-2.0

//! Package nodes and the parsing of their identifiers.
//!
//! A node is identified by a string such as `flask==2.0.0` or `flask-2.0.0`.
//! The package name and version are derived from that identifier once,
//! when the node is built, following this precedence:
//!
//! 1. `name==version`, when splitting on `==` yields exactly two parts;
//! 2. `name-version`, splitting on the last `-`, when the version contains a `.`;
//! 3. otherwise the whole identifier is the name and the version is [DEFAULT_VERSION].
//!
//! Parsing never fails.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Version assigned to identifiers that carry none.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Split a node identifier into its package name and version.
pub fn parse(id: &str) -> (&str, &str) {
    if let Some((name, version)) = id.split_once("==") {
        if !version.contains("==") {
            return (name, version);
        }
    }
    if let Some((name, version)) = id.rsplit_once('-') {
        if version.contains('.') {
            return (name, version);
        }
    }
    (id, DEFAULT_VERSION)
}

/// A pinned package version, vertex of a [DependencyGraph](crate::graph::DependencyGraph).
///
/// Identity, hashing and ordering only look at the raw identifier,
/// so a node can be looked up with a plain `&str`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", from = "String"))]
pub struct Node {
    id: String,
    name: String,
    version: String,
}

impl Node {
    /// Build a node from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let (name, version) = parse(&id);
        let (name, version) = (name.to_owned(), version.to_owned());
        Self { id, name, version }
    }

    /// The raw identifier, as given at construction.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether both nodes are versions of the same package.
    pub fn same_package(&self, other: &Node) -> bool {
        self.name == other.name
    }

    /// Compare the versions of two nodes.
    ///
    /// Dot separated components are compared numerically when both are numbers,
    /// and as strings otherwise. A version that is a prefix of the other is lower.
    pub fn cmp_version(&self, other: &Node) -> Ordering {
        let mut left = self.version.split('.');
        let mut right = other.version.split('.');
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(l), Some(r)) => {
                    let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                        (Ok(l), Ok(r)) => l.cmp(&r),
                        _ => l.cmp(r),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for Node {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Node {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Node {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

impl From<Node> for String {
    fn from(node: Node) -> Self {
        node.id
    }
}
