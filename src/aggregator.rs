// 🔗 Aggregator - collapse transactions into weighted directed edges
//
// Group key: (source, target, ecosystem), exact string match.
// weight = sum(amount) × frequency, then min-max normalized over ALL edges.

use crate::ecosystem::Ecosystem;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

// ============================================================================
// AGGREGATED EDGE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEdge {
    pub source: String,
    pub target: String,
    pub ecosystem: Ecosystem,

    /// Sum of amounts in the group
    pub amount: u64,

    /// Number of transactions in the group
    pub frequency: u64,

    /// amount × frequency
    pub weight: u64,

    /// Weight min-max normalized to [0, 100] across the whole edge list
    pub weight_percentage: f64,

    /// Distinct transaction types in the group (sorted)
    pub transaction_types: Vec<String>,

    /// Distinct channels in the group (sorted)
    pub channels: Vec<String>,
}

impl AggregatedEdge {
    /// Check whether the node is this edge's source or target
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }
}

#[derive(Default)]
struct Group {
    amount: u64,
    frequency: u64,
    transaction_types: BTreeSet<String>,
    channels: BTreeSet<String>,
}

/// Aggregate transactions into one edge per (source, target, ecosystem).
///
/// The result is sorted by key. An empty input yields an empty list.
/// When every edge has the same weight the range is zero and every
/// percentage is 0.0.
pub fn aggregate(transactions: &[Transaction]) -> Vec<AggregatedEdge> {
    let mut groups: BTreeMap<(String, String, Ecosystem), Group> = BTreeMap::new();

    for tx in transactions {
        let key = (tx.source_account.clone(), tx.target_account.clone(), tx.ecosystem);
        let group = groups.entry(key).or_default();
        group.amount = group.amount.saturating_add(tx.amount);
        group.frequency = group.frequency.saturating_add(1);
        group.transaction_types.insert(tx.transaction_type.clone());
        group.channels.insert(tx.channel.clone());
    }

    let mut edges: Vec<AggregatedEdge> = groups
        .into_iter()
        .map(|((source, target, ecosystem), group)| AggregatedEdge {
            source,
            target,
            ecosystem,
            amount: group.amount,
            frequency: group.frequency,
            weight: group.amount.saturating_mul(group.frequency),
            weight_percentage: 0.0,
            transaction_types: group.transaction_types.into_iter().collect(),
            channels: group.channels.into_iter().collect(),
        })
        .collect();

    let min = edges.iter().map(|e| e.weight).min();
    let max = edges.iter().map(|e| e.weight).max();

    if let (Some(min), Some(max)) = (min, max) {
        for edge in &mut edges {
            edge.weight_percentage = normalize(edge.weight, min, max);
        }
    }

    debug!(
        transactions = transactions.len(),
        edges = edges.len(),
        "aggregated transactions into edges"
    );

    edges
}

fn normalize(weight: u64, min: u64, max: u64) -> f64 {
    if max <= min {
        return 0.0;
    }
    (weight - min) as f64 / (max - min) as f64 * 100.0
}

// ============================================================================
// NODE FLOWS
// ============================================================================

/// Incoming / outgoing totals for one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlow {
    pub incoming_amount: u64,
    pub outgoing_amount: u64,
    pub incoming_frequency: u64,
    pub outgoing_frequency: u64,
}

/// Per-node totals over the edge list.
/// A self-loop edge counts once, as outgoing. Totals saturate at `u64::MAX`.
pub fn node_flows(edges: &[AggregatedEdge]) -> BTreeMap<String, NodeFlow> {
    let mut flows: BTreeMap<String, NodeFlow> = BTreeMap::new();

    for edge in edges {
        let out = flows.entry(edge.source.clone()).or_default();
        out.outgoing_amount = out.outgoing_amount.saturating_add(edge.amount);
        out.outgoing_frequency = out.outgoing_frequency.saturating_add(edge.frequency);

        let incoming = flows.entry(edge.target.clone()).or_default();
        if edge.source != edge.target {
            incoming.incoming_amount = incoming.incoming_amount.saturating_add(edge.amount);
            incoming.incoming_frequency = incoming.incoming_frequency.saturating_add(edge.frequency);
        }
    }

    flows
}

// ============================================================================
// TESTS
// ============================================================================
