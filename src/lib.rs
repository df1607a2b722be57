// Transaction Network - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod ecosystem;
pub mod transaction;
pub mod source;      // Transaction Source - sample list / seeded generator
pub mod aggregator;  // (source, target, ecosystem) → weighted edges
pub mod graph;       // Graph Builder - nodes, edges, emphasis
pub mod summary;     // Node Property Summary
pub mod dashboard;   // One interaction = (transactions, filter) → view
pub mod render;      // vis-network HTML
pub mod config;

// Re-export commonly used types
pub use error::GraphError;
pub use ecosystem::Ecosystem;
pub use transaction::{load_csv, Transaction};
pub use source::{sample_transactions, TransactionGenerator, ACCOUNT_POOL};
pub use aggregator::{aggregate, node_flows, AggregatedEdge, NodeFlow};
pub use graph::{
    build, format_percentage, GraphEdge, GraphNode, NetworkGraph, NodeKind, SelectionFilter,
};
pub use summary::{summarize, PropertySummary};
pub use dashboard::{Dashboard, DashboardView};
pub use render::{legend, render_html, vis_data, vis_options};
pub use config::{DataArgs, DataSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
