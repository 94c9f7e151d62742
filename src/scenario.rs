// SPDX-License-Identifier: MPL-2.0

//! Ready made dependency graphs to play with.

use crate::graph::DependencyGraph;
use crate::node::Node;

/// A named dependency graph with the node to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// Short title.
    pub name: String,
    /// One sentence presentation.
    pub description: String,
    /// The dependency graph.
    pub graph: DependencyGraph,
    /// Node the resolution is anchored on.
    pub root: Node,
}

impl Scenario {
    /// Build a scenario from a list of packages and of dependency edges.
    ///
    /// Packages without edges are kept as isolated nodes.
    /// `root` is not checked here, starting a
    /// [Session](crate::session::Session) on the scenario does that.
    pub fn custom<P, D, N>(packages: P, dependencies: D, root: impl Into<Node>) -> Self
    where
        P: IntoIterator<Item = N>,
        D: IntoIterator<Item = (N, N)>,
        N: Into<Node>,
    {
        let mut graph = DependencyGraph::new();
        for package in packages {
            graph.add_node(package);
        }
        for (from, to) in dependencies {
            graph.add_dependency(from, to);
        }
        Self {
            name: "Custom Graph".into(),
            description: "User-defined dependency graph".into(),
            graph,
            root: root.into(),
        }
    }

    fn sample(
        name: &str,
        description: &str,
        packages: &[&str],
        dependencies: &[(&str, &str)],
        root: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::custom(packages.iter().copied(), dependencies.iter().copied(), root)
        }
    }
}

/// The built-in scenarios, easiest first.
/// The last one has no solution.
#[rustfmt::skip]
pub fn sample_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::sample(
            "Boolean Logic",
            "A==2.0 with complex B and G version dependencies",
            &["A==2.0", "B==1.3", "B==1.4", "G==0.5", "G==0.6", "G==0.7"],
            &[
                ("A==2.0", "B==1.3"), ("A==2.0", "B==1.4"),
                ("A==2.0", "G==0.6"), ("A==2.0", "G==0.7"),
                ("B==1.3", "G==0.5"), ("B==1.3", "G==0.6"),
                ("B==1.4", "G==0.7"),
            ],
            "A==2.0",
        ),
        Scenario::sample(
            "Simple Web App",
            "A basic web application with Flask and requests",
            &[
                "myapp==1.0.0",
                "flask==2.0.0", "flask==1.5.0",
                "req==2.25.0", "req==2.20.0",
                "jinja2==3.0.0",
                "urllib3==1.26.0",
            ],
            &[
                ("myapp==1.0.0", "flask==2.0.0"), ("myapp==1.0.0", "req==2.25.0"),
                ("flask==2.0.0", "jinja2==3.0.0"), ("req==2.25.0", "urllib3==1.26.0"),
                ("flask==1.5.0", "jinja2==3.0.0"), ("req==2.20.0", "urllib3==1.26.0"),
            ],
            "myapp==1.0.0",
        ),
        Scenario::sample(
            "Data Science Stack",
            "Scientific computing with numpy, pandas, and plotly",
            &[
                "sklearn==1.0.0",
                "numpy==1.21.0", "numpy==1.20.0",
                "pandas==1.3.0", "pandas==1.2.0",
                "plotly==3.4.0",
                "scipy==1.7.0",
                "py_util==2.8.0",
            ],
            &[
                ("sklearn==1.0.0", "numpy==1.21.0"), ("sklearn==1.0.0", "pandas==1.3.0"),
                ("sklearn==1.0.0", "plotly==3.4.0"),
                ("pandas==1.3.0", "numpy==1.21.0"), ("pandas==1.3.0", "py_util==2.8.0"),
                ("pandas==1.2.0", "numpy==1.20.0"), ("pandas==1.2.0", "py_util==2.8.0"),
                ("plotly==3.4.0", "numpy==1.21.0"),
                ("scipy==1.7.0", "numpy==1.21.0"),
            ],
            "sklearn==1.0.0",
        ),
        // cuda==12.1 needs cudnn==8.7.0 while torch needs cudnn==8.9.2.
        Scenario::sample(
            "Torch GPU Stack",
            "A moderately tough scenario with a version conflict in the torch, cuda, cudnn, and driver GPU stack.",
            &[
                "torch==2.3.1",
                "cuda==12.1", "cuda==11.8",
                "cudnn==8.9.2", "cudnn==8.7.0",
                "driver==35.10",
            ],
            &[
                ("torch==2.3.1", "cuda==12.1"), ("torch==2.3.1", "cudnn==8.9.2"),
                ("cuda==12.1", "cudnn==8.7.0"), ("cuda==11.8", "driver==35.10"),
                ("cudnn==8.9.2", "cuda==11.8"), ("cudnn==8.7.0", "driver==35.10"),
            ],
            "torch==2.3.1",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_well_formed() {
        for scenario in sample_scenarios() {
            assert!(scenario.graph.contains(scenario.root.as_str()), "{}", scenario.name);
            assert!(scenario.graph.is_acyclic(), "{}", scenario.name);
        }
    }

    #[test]
    fn custom_keeps_isolated_packages() {
        let scenario = Scenario::custom(["a==1.0", "b==1.0", "c==1.0"], [("a==1.0", "b==1.0")], "a==1.0");
        assert_eq!(scenario.graph.node_count(), 3);
        assert_eq!(scenario.graph.edge_count(), 1);
        assert_eq!(scenario.name, "Custom Graph");
    }
}
