// 📋 Node Property Summary - statistics for the selected node

use crate::aggregator::AggregatedEdge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub node: String,

    /// Aggregated edges incident to the node
    pub edge_count: usize,

    /// Transactions behind those edges (sum of frequencies)
    pub transaction_count: u64,

    pub total_weight: u64,
    pub total_incoming_amount: u64,
    pub total_outgoing_amount: u64,
    pub total_incoming_frequency: u64,
    pub total_outgoing_frequency: u64,
    pub incoming_edge_count: usize,
    pub outgoing_edge_count: usize,

    /// Distinct, sorted
    pub transaction_types: Vec<String>,

    /// Distinct, sorted
    pub channels: Vec<String>,
}

impl PropertySummary {
    /// Zero-valued summary for a node with no edges
    pub fn empty(node: &str) -> Self {
        Self {
            node: node.to_string(),
            ..Self::default()
        }
    }
}

/// Edges where the node is source or target, in input order
pub fn incident_edges<'a>(edges: &'a [AggregatedEdge], node: &str) -> Vec<&'a AggregatedEdge> {
    edges.iter().filter(|e| e.touches(node)).collect()
}

/// Summarize a node over its incident edges.
///
/// Edges not touching `node` are ignored. An edge whose target is the node is
/// incoming, otherwise outgoing, so a self-loop counts as outgoing once.
/// Totals saturate at `u64::MAX`.
pub fn summarize(edges_for_node: &[AggregatedEdge], node: &str) -> PropertySummary {
    let mut summary = PropertySummary::empty(node);
    let mut types = BTreeSet::new();
    let mut channels = BTreeSet::new();

    for edge in incident_edges(edges_for_node, node) {
        summary.edge_count += 1;
        summary.transaction_count = summary.transaction_count.saturating_add(edge.frequency);
        summary.total_weight = summary.total_weight.saturating_add(edge.weight);

        if edge.target == node && edge.source != node {
            summary.incoming_edge_count += 1;
            summary.total_incoming_amount = summary.total_incoming_amount.saturating_add(edge.amount);
            summary.total_incoming_frequency =
                summary.total_incoming_frequency.saturating_add(edge.frequency);
        } else {
            summary.outgoing_edge_count += 1;
            summary.total_outgoing_amount = summary.total_outgoing_amount.saturating_add(edge.amount);
            summary.total_outgoing_frequency =
                summary.total_outgoing_frequency.saturating_add(edge.frequency);
        }

        types.extend(edge.transaction_types.iter().cloned());
        channels.extend(edge.channels.iter().cloned());
    }

    summary.transaction_types = types.into_iter().collect();
    summary.channels = channels.into_iter().collect();
    summary
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::ecosystem::Ecosystem;
    use crate::source::{sample_transactions, TransactionGenerator};
    use crate::transaction::Transaction;
    use chrono::NaiveDate;

    fn tx(source: &str, target: &str, amount: u64, tx_type: &str, channel: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            source,
            target,
            Ecosystem::Jakpro,
            amount,
            tx_type,
            channel,
        )
    }

    #[test]
    fn test_incoming_outgoing_partition() {
        let edges = aggregate(&[
            tx("A", "B", 100, "transfer", "web"),
            tx("A", "B", 50, "payment", "web"),
            tx("C", "A", 30, "transfer", "atm"),
            tx("B", "C", 999, "transfer", "atm"),
        ]);

        let summary = summarize(&edges, "A");

        assert_eq!(summary.edge_count, 2);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.total_outgoing_amount, 150);
        assert_eq!(summary.total_outgoing_frequency, 2);
        assert_eq!(summary.total_incoming_amount, 30);
        assert_eq!(summary.total_incoming_frequency, 1);
        assert_eq!(summary.total_weight, 150 * 2 + 30);
        assert_eq!(summary.transaction_types, vec!["payment", "transfer"]);
        assert_eq!(summary.channels, vec!["atm", "web"]);
    }

    #[test]
    fn test_selected_account_summary_totals() {
        let edges = aggregate(&TransactionGenerator::default().generate());
        let summary = summarize(&edges, "ACC1234");

        assert_eq!(summary.edge_count, incident_edges(&edges, "ACC1234").len());
        assert_eq!(
            summary.incoming_edge_count + summary.outgoing_edge_count,
            summary.edge_count
        );
        assert_eq!(
            summary.total_incoming_frequency + summary.total_outgoing_frequency,
            summary.transaction_count
        );
    }

    #[test]
    fn test_frequency_sum_equals_edge_count_for_single_rows() {
        // every (source, target, ecosystem) appears once in the sample data
        let edges = aggregate(&sample_transactions());
        let summary = summarize(&edges, "MRT");

        assert_eq!(summary.edge_count, 3);
        assert_eq!(
            (summary.total_incoming_frequency + summary.total_outgoing_frequency) as usize,
            summary.edge_count
        );
        assert_eq!(summary.total_incoming_amount, 60);
        assert_eq!(summary.total_outgoing_amount, 0);
    }

    #[test]
    fn test_self_loop_counts_as_outgoing() {
        let edges = aggregate(&[tx("A", "A", 10, "transfer", "web")]);
        let summary = summarize(&edges, "A");

        assert_eq!(summary.outgoing_edge_count, 1);
        assert_eq!(summary.incoming_edge_count, 0);
        assert_eq!(summary.total_outgoing_amount, 10);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = i64::MAX as u64;
        let edges = aggregate(&[
            tx("A", "B", huge, "transfer", "web"),
            tx("A", "C", huge, "transfer", "web"),
            tx("A", "D", huge, "transfer", "web"),
        ]);

        let summary = summarize(&edges, "A");

        assert_eq!(summary.edge_count, 3);
        assert_eq!(summary.total_outgoing_amount, u64::MAX);
        assert_eq!(summary.total_weight, u64::MAX);
        assert_eq!(summary.total_outgoing_frequency, 3);
    }

    #[test]
    fn test_absent_node_is_zero_valued() {
        let edges = aggregate(&sample_transactions());
        let summary = summarize(&edges, "Nobody");

        assert_eq!(summary, PropertySummary::empty("Nobody"));
        assert_eq!(summary.edge_count, 0);
        assert!(summary.transaction_types.is_empty());
    }
}
