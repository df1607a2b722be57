// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transaction_network::{format_percentage, Dashboard, DataArgs, SelectionFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Transaction network graph analysis", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui {
        /// Node selected on startup
        #[arg(long)]
        node: Option<String>,
    },

    /// Write the graph as a standalone HTML page
    Render {
        /// Node to focus on ("All" or omitted for the full graph)
        #[arg(long)]
        node: Option<String>,

        #[arg(long, short, default_value = "network.html")]
        output: PathBuf,
    },

    /// Print the property summary of one node
    Summary {
        #[arg(long)]
        node: String,
    },

    /// List the selectable nodes
    Nodes,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transaction_network=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui { node: None });

    // Log lines would corrupt the alternate screen
    if !matches!(command, Command::Tui { .. }) {
        init_tracing();
    }

    let transactions = cli.data.load().context("Failed to load transactions")?;
    let dashboard = Dashboard::new(transactions);

    match command {
        Command::Tui { node } => run_ui_mode(dashboard, SelectionFilter::from_option(node.as_deref()))?,
        Command::Render { node, output } => {
            run_render(&dashboard, SelectionFilter::from_option(node.as_deref()), &output)?
        }
        Command::Summary { node } => run_summary(&dashboard, &node),
        Command::Nodes => {
            for option in dashboard.node_options() {
                println!("{}", option);
            }
        }
    }

    Ok(())
}

fn run_render(dashboard: &Dashboard, filter: SelectionFilter, output: &Path) -> Result<()> {
    println!("🕸️  Rendering network graph ({})", filter);

    let view = dashboard.view(&filter);
    let title = format!("Network Graph Analysis - {}", filter);
    let html = transaction_network::render_html(&view.graph, &title)?;

    fs::write(output, html).with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✓ {} nodes, {} edges → {}",
        view.graph.nodes.len(),
        view.graph.edges.len(),
        output.display()
    );

    Ok(())
}

fn run_summary(dashboard: &Dashboard, node: &str) {
    let filter = SelectionFilter::from_option(Some(node));
    let view = dashboard.view(&filter);

    let Some(summary) = view.summary else {
        println!("Select a specific node to see its properties.");
        return;
    };

    println!("Properties of Node {}:", summary.node);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Edges:              {}", summary.edge_count);
    println!("Transactions:       {}", summary.transaction_count);
    println!("Total weight:       {}", summary.total_weight);
    println!(
        "Incoming:           {} ({} tx)",
        summary.total_incoming_amount, summary.total_incoming_frequency
    );
    println!(
        "Outgoing:           {} ({} tx)",
        summary.total_outgoing_amount, summary.total_outgoing_frequency
    );
    println!("Transaction types:  {}", summary.transaction_types.join(", "));
    println!("Channels:           {}", summary.channels.join(", "));

    if !view.edges.is_empty() {
        println!("\nEdges:");
        for edge in &view.edges {
            println!(
                "  {} → {} [{}] amount={} freq={} weight={}",
                edge.source,
                edge.target,
                edge.ecosystem,
                edge.amount,
                edge.frequency,
                format_percentage(edge.weight_percentage)
            );
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(dashboard: Dashboard, initial: SelectionFilter) -> Result<()> {
    let mut app = ui::App::new(dashboard, initial);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_dashboard: Dashboard, _initial: SelectionFilter) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin network-server --features server");
    std::process::exit(1);
}
