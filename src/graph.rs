// 🕸️ Graph Builder - aggregated edges → renderable nodes and edges
//
// Pure: the same (edges, filter) always produces the same NetworkGraph.

use crate::aggregator::{node_flows, AggregatedEdge, NodeFlow};
use crate::ecosystem::Ecosystem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

pub const NODE_SIZE: u32 = 20;
pub const EMPHASIS_SIZE: u32 = 35;
pub const EMPHASIS_COLOR: &str = "#ff0000";

// ============================================================================
// SELECTION FILTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionFilter {
    #[default]
    All,
    Node(String),
}

impl SelectionFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// `None`, empty or "All" select everything
    pub fn from_option(node: Option<&str>) -> Self {
        match node.map(str::trim) {
            None | Some("") => SelectionFilter::All,
            Some(n) if n == Self::ALL_LABEL => SelectionFilter::All,
            Some(n) => SelectionFilter::Node(n.to_string()),
        }
    }

    pub fn selected_node(&self) -> Option<&str> {
        match self {
            SelectionFilter::All => None,
            SelectionFilter::Node(node) => Some(node),
        }
    }
}

impl fmt::Display for SelectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionFilter::All => f.write_str(Self::ALL_LABEL),
            SelectionFilter::Node(node) => f.write_str(node),
        }
    }
}

impl FromStr for SelectionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SelectionFilter::from_option(Some(s)))
    }
}

// ============================================================================
// NODES & EDGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Sends money somewhere in the data set
    Account,

    /// Only ever receives (ecosystem / merchant category)
    Category,
}

impl NodeKind {
    /// vis-network shape name
    pub fn shape(&self) -> &'static str {
        match self {
            NodeKind::Account => "dot",
            NodeKind::Category => "box",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Hover text
    pub title: String,
    pub kind: NodeKind,
    pub ecosystem: Ecosystem,
    pub color: String,
    pub size: u32,
    pub bold: bool,
    pub emphasized: bool,
    pub flow: NodeFlow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub ecosystem: Ecosystem,
    pub color: String,
    /// Drives edge width
    pub value: u64,
    pub amount: u64,
    pub frequency: u64,
    pub weight_percentage: f64,
    /// Hover text / label
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl NetworkGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Two decimals with a percent sign, e.g. `42.50%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn edge_title(edge: &AggregatedEdge) -> String {
    format!(
        "Amount: {} | Frequency: {} | Weight: {}",
        edge.amount,
        edge.frequency,
        format_percentage(edge.weight_percentage)
    )
}

fn node_title(id: &str, flow: &NodeFlow) -> String {
    format!(
        "{}\nIncoming: {} ({} tx)\nOutgoing: {} ({} tx)",
        id, flow.incoming_amount, flow.incoming_frequency, flow.outgoing_amount, flow.outgoing_frequency
    )
}

// ============================================================================
// BUILD
// ============================================================================

/// Build the node/edge description for the given filter.
///
/// `edges` is the full aggregated list: node kinds and flow totals are always
/// computed over all of it, the filter only restricts what is emitted.
pub fn build(edges: &[AggregatedEdge], filter: &SelectionFilter) -> NetworkGraph {
    let senders: BTreeSet<&str> = edges.iter().map(|e| e.source.as_str()).collect();
    let flows: BTreeMap<String, NodeFlow> = node_flows(edges);

    let selected = filter.selected_node();
    let visible: Vec<&AggregatedEdge> = match selected {
        None => edges.iter().collect(),
        Some(node) => edges.iter().filter(|e| e.touches(node)).collect(),
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::new();

    for edge in &visible {
        for id in [edge.source.as_str(), edge.target.as_str()] {
            if !seen.insert(id) {
                continue;
            }

            let emphasized = selected == Some(id);
            let kind = if senders.contains(id) {
                NodeKind::Account
            } else {
                NodeKind::Category
            };
            let flow = flows.get(id).copied().unwrap_or_default();

            nodes.push(GraphNode {
                id: id.to_string(),
                label: id.to_string(),
                title: node_title(id, &flow),
                kind,
                ecosystem: edge.ecosystem,
                color: if emphasized {
                    EMPHASIS_COLOR.to_string()
                } else {
                    edge.ecosystem.color().to_string()
                },
                size: if emphasized { EMPHASIS_SIZE } else { NODE_SIZE },
                bold: emphasized,
                emphasized,
                flow,
            });
        }
    }

    let edges = visible
        .iter()
        .map(|edge| GraphEdge {
            from: edge.source.clone(),
            to: edge.target.clone(),
            ecosystem: edge.ecosystem,
            color: edge.ecosystem.color().to_string(),
            value: edge.weight,
            amount: edge.amount,
            frequency: edge.frequency,
            weight_percentage: edge.weight_percentage,
            title: edge_title(edge),
        })
        .collect();

    NetworkGraph { nodes, edges }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::source::{sample_transactions, TransactionGenerator};

    #[test]
    fn test_filter_parsing() {
        assert_eq!(SelectionFilter::from_option(None), SelectionFilter::All);
        assert_eq!(SelectionFilter::from_option(Some("All")), SelectionFilter::All);
        assert_eq!(SelectionFilter::from_option(Some("  ")), SelectionFilter::All);
        assert_eq!(
            "ACC1234".parse::<SelectionFilter>().unwrap(),
            SelectionFilter::Node("ACC1234".to_string())
        );
        assert_eq!(SelectionFilter::Node("X".into()).to_string(), "X");
    }

    #[test]
    fn test_all_filter_on_sample_dataset() {
        let edges = aggregate(&sample_transactions());
        let graph = build(&edges, &SelectionFilter::All);

        assert_eq!(graph.nodes.len(), 14);
        assert_eq!(graph.edges.len(), 10);

        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), graph.nodes.len());

        let categories: Vec<&GraphNode> =
            graph.nodes.iter().filter(|n| n.kind == NodeKind::Category).collect();
        let accounts: Vec<&GraphNode> =
            graph.nodes.iter().filter(|n| n.kind == NodeKind::Account).collect();
        assert_eq!(categories.len(), 4);
        assert_eq!(accounts.len(), 10);

        assert!(graph.nodes.iter().all(|n| !n.emphasized && n.size == NODE_SIZE));
    }

    #[test]
    fn test_nodes_colored_by_ecosystem() {
        let edges = aggregate(&sample_transactions());
        let graph = build(&edges, &SelectionFilter::All);

        let mrt = graph.node("MRT").unwrap();
        assert_eq!(mrt.color, Ecosystem::Mrt.color());
        assert_eq!(mrt.kind.shape(), "box");

        let customer = graph.node("Nasabah4").unwrap();
        assert_eq!(customer.color, Ecosystem::PamJaya.color());
        assert_eq!(customer.kind.shape(), "dot");
    }

    #[test]
    fn test_selected_node_restricts_edges() {
        let edges = aggregate(&TransactionGenerator::default().generate());
        let filter = SelectionFilter::Node("ACC1234".to_string());
        let graph = build(&edges, &filter);

        let expected: Vec<&AggregatedEdge> = edges.iter().filter(|e| e.touches("ACC1234")).collect();
        assert!(!expected.is_empty());
        assert_eq!(graph.edges.len(), expected.len());
        assert!(graph.edges.iter().all(|e| e.from == "ACC1234" || e.to == "ACC1234"));

        let ends: HashSet<&str> = expected
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ends);
    }

    #[test]
    fn test_selected_node_emphasis() {
        let edges = aggregate(&sample_transactions());
        let graph = build(&edges, &SelectionFilter::Node("MRT".to_string()));

        let selected = graph.node("MRT").unwrap();
        assert!(selected.emphasized);
        assert!(selected.bold);
        assert_eq!(selected.size, EMPHASIS_SIZE);
        assert_eq!(selected.color, EMPHASIS_COLOR);

        for node in graph.nodes.iter().filter(|n| n.id != "MRT") {
            assert!(!node.emphasized);
            assert_eq!(node.size, NODE_SIZE);
            assert_ne!(node.color, EMPHASIS_COLOR);
        }

        // Nasabah1, Nasabah5, Nasabah9 pay into MRT
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.nodes.len(), 4);
    }

    #[test]
    fn test_absent_node_yields_empty_graph() {
        let edges = aggregate(&sample_transactions());
        let graph = build(&edges, &SelectionFilter::Node("Nobody".to_string()));

        assert!(graph.is_empty());
    }

    #[test]
    fn test_edge_title_format() {
        let edges = aggregate(&sample_transactions());
        let graph = build(&edges, &SelectionFilter::Node("Nasabah5".to_string()));

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].title, "Amount: 30 | Frequency: 1 | Weight: 100.00%");
        assert_eq!(format_percentage(12.3456), "12.35%");
    }

    #[test]
    fn test_node_title_shows_flows() {
        let edges = aggregate(&sample_transactions());
        let graph = build(&edges, &SelectionFilter::All);

        let jakpro = graph.node("JAKPRO").unwrap();
        assert_eq!(jakpro.flow.incoming_amount, 45);
        assert!(jakpro.title.contains("Incoming: 45 (3 tx)"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let edges = aggregate(&TransactionGenerator::new(9, 60).generate());

        for filter in [SelectionFilter::All, SelectionFilter::Node("ACC2345".to_string())] {
            assert_eq!(build(&edges, &filter), build(&edges, &filter));
        }
    }
}
