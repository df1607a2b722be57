// 📊 Dashboard - one interaction = pure function of (transactions, filter)
//
// Transactions are aggregated once at construction and never mutated.
// Every selection change produces a fresh DashboardView.

use crate::aggregator::{aggregate, AggregatedEdge};
use crate::graph::{build, NetworkGraph, SelectionFilter};
use crate::summary::{summarize, PropertySummary};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: SelectionFilter,
    pub graph: NetworkGraph,
    /// Only present when a specific node is selected
    pub summary: Option<PropertySummary>,
    /// Aggregated edges shown in the graph
    pub edges: Vec<AggregatedEdge>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    transactions: Vec<Transaction>,
    edges: Vec<AggregatedEdge>,
}

impl Dashboard {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let edges = aggregate(&transactions);
        Self { transactions, edges }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn edges(&self) -> &[AggregatedEdge] {
        &self.edges
    }

    /// "All" followed by each distinct source account, in first-seen order
    pub fn node_options(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut options = vec![SelectionFilter::ALL_LABEL.to_string()];

        for tx in &self.transactions {
            if seen.insert(tx.source_account.as_str()) {
                options.push(tx.source_account.clone());
            }
        }

        options
    }

    pub fn view(&self, filter: &SelectionFilter) -> DashboardView {
        let graph = build(&self.edges, filter);

        let (summary, edges) = match filter.selected_node() {
            None => (None, self.edges.clone()),
            Some(node) => {
                let incident: Vec<AggregatedEdge> =
                    self.edges.iter().filter(|e| e.touches(node)).cloned().collect();
                (Some(summarize(&incident, node)), incident)
            }
        };

        DashboardView {
            filter: filter.clone(),
            graph,
            summary,
            edges,
        }
    }

    /// Raw transactions involving the node (property panel detail table)
    pub fn transactions_for(&self, node: &str) -> Vec<&Transaction> {
        self.transactions.iter().filter(|tx| tx.touches(node)).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
