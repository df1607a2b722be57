use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use transaction_network::{
    format_percentage, Dashboard, DashboardView, Ecosystem, PropertySummary, SelectionFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Nodes,
    Edges,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Nodes => Focus::Edges,
            Focus::Edges => Focus::Nodes,
        }
    }
}

pub struct App {
    pub dashboard: Dashboard,
    pub options: Vec<String>,
    pub node_state: ListState,
    pub edge_state: TableState,
    pub view: DashboardView,
    pub focus: Focus,
    pub show_detail: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, initial: SelectionFilter) -> Self {
        let mut options = dashboard.node_options();
        let index = match options
            .iter()
            .position(|o| SelectionFilter::from_option(Some(o.as_str())) == initial)
        {
            Some(i) => i,
            // Target-only nodes are not dropdown options; list the startup one anyway
            None => {
                options.push(initial.to_string());
                options.len() - 1
            }
        };

        let mut node_state = ListState::default();
        node_state.select(Some(index));

        let view = dashboard.view(&initial);
        let mut edge_state = TableState::default();
        if !view.edges.is_empty() {
            edge_state.select(Some(0));
        }

        Self {
            dashboard,
            options,
            node_state,
            edge_state,
            view,
            focus: Focus::Nodes,
            show_detail: false,
        }
    }

    pub fn selected_filter(&self) -> SelectionFilter {
        let option = self
            .node_state
            .selected()
            .and_then(|i| self.options.get(i))
            .map(String::as_str);
        SelectionFilter::from_option(option)
    }

    /// Recompute the whole view for the current selection
    fn refresh(&mut self) {
        self.view = self.dashboard.view(&self.selected_filter());
        self.edge_state.select(if self.view.edges.is_empty() { None } else { Some(0) });
    }

    pub fn select_node(&mut self, index: usize) {
        if index < self.options.len() {
            self.node_state.select(Some(index));
            self.refresh();
        }
    }

    /// Switch between the edge table and the transaction table
    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
        self.edge_state.select(if self.edge_rows() == 0 { None } else { Some(0) });
    }

    pub fn next(&mut self) {
        match self.focus {
            Focus::Nodes => {
                let i = step(self.node_state.selected(), self.options.len(), 1);
                self.select_node(i);
            }
            Focus::Edges => {
                let i = step(self.edge_state.selected(), self.edge_rows(), 1);
                self.edge_state.select(Some(i));
            }
        }
    }

    pub fn previous(&mut self) {
        match self.focus {
            Focus::Nodes => {
                let i = step(self.node_state.selected(), self.options.len(), -1);
                self.select_node(i);
            }
            Focus::Edges => {
                let i = step(self.edge_state.selected(), self.edge_rows(), -1);
                self.edge_state.select(Some(i));
            }
        }
    }

    pub fn page_down(&mut self) {
        let len = self.edge_rows();
        if len == 0 {
            return;
        }
        let i = self.edge_state.selected().map(|i| (i + 20).min(len - 1)).unwrap_or(0);
        self.edge_state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = self.edge_state.selected().map(|i| i.saturating_sub(20)).unwrap_or(0);
        self.edge_state.select(Some(i));
    }

    fn edge_rows(&self) -> usize {
        match (self.show_detail, self.view.filter.selected_node()) {
            (true, Some(node)) => self.dashboard.transactions_for(node).len(),
            _ => self.view.edges.len(),
        }
    }
}

/// Wrapping move by `delta` within `len` rows
fn step(current: Option<usize>, len: usize, delta: i64) -> usize {
    if len == 0 {
        return 0;
    }
    let i = current.unwrap_or(0) as i64 + delta;
    i.rem_euclid(len as i64) as usize
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.toggle(),
                KeyCode::Char('a') => app.select_node(0),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with legend
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1]);

    render_node_list(f, content[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(content[1]);

    match (app.show_detail, app.view.filter.selected_node().map(str::to_string)) {
        (true, Some(node)) => render_transactions(f, right[0], app, &node),
        _ => render_edges(f, right[0], app),
    }
    render_properties(f, right[1], app);

    render_status_bar(f, chunks[2], app);
}

fn eco_color(eco: Ecosystem) -> Color {
    let (r, g, b) = eco.rgb();
    Color::Rgb(r, g, b)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "Network Graph Analysis",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Tx: {}", app.dashboard.transactions().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Edges: {}", app.dashboard.edges().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
    ];

    for eco in Ecosystem::ALL {
        spans.push(Span::styled("■ ", Style::default().fg(eco_color(eco))));
        spans.push(Span::raw(format!("{}  ", eco.as_str())));
    }
    spans.push(Span::styled("■ ", Style::default().fg(Color::Red)));
    spans.push(Span::raw("Selected"));

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn focus_style(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_node_list(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app.options.iter().map(|o| ListItem::new(o.clone())).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app, Focus::Nodes))
                .title(" Node "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.node_state);
}

fn render_edges(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Source", "Target", "Ecosystem", "Amount", "Freq", "Weight", "Weight %"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let selected = app.view.filter.selected_node().map(str::to_string);

    let rows = app.view.edges.iter().map(|edge| {
        let node_style = |id: &str| {
            if selected.as_deref() == Some(id) {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        let cells = vec![
            Cell::from(edge.source.clone()).style(node_style(&edge.source)),
            Cell::from(edge.target.clone()).style(node_style(&edge.target)),
            Cell::from(edge.ecosystem.as_str()).style(Style::default().fg(eco_color(edge.ecosystem))),
            Cell::from(edge.amount.to_string()),
            Cell::from(edge.frequency.to_string()),
            Cell::from(edge.weight.to_string()),
            Cell::from(format_percentage(edge.weight_percentage)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app, Focus::Edges))
            .title(format!(" Graph: {} ", app.view.filter)),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.edge_state);
}

fn render_transactions(f: &mut Frame, area: Rect, app: &mut App, node: &str) {
    let header_cells = ["Date", "Source", "Target", "Ecosystem", "Amount", "Type", "Channel"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .dashboard
        .transactions_for(node)
        .into_iter()
        .map(|tx| {
            Row::new(vec![
                Cell::from(tx.date.to_string()),
                Cell::from(tx.source_account.clone()),
                Cell::from(tx.target_account.clone()),
                Cell::from(tx.ecosystem.as_str()).style(Style::default().fg(eco_color(tx.ecosystem))),
                Cell::from(tx.amount.to_string()),
                Cell::from(tx.transaction_type.clone()),
                Cell::from(tx.channel.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app, Focus::Edges))
            .title(format!(" Transactions: {} ", node)),
    )
    .highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.edge_state);
}

fn summary_lines(summary: &PropertySummary) -> Vec<Line<'static>> {
    let label = |text: &str| Span::styled(text.to_string(), Style::default().fg(Color::Cyan));

    vec![
        Line::from(vec![
            Span::styled(
                format!("Properties of Node {}", summary.node),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Edges: "),
            Span::raw(format!(
                "{} ({} in / {} out)",
                summary.edge_count, summary.incoming_edge_count, summary.outgoing_edge_count
            )),
        ]),
        Line::from(vec![label("Total weight: "), Span::raw(summary.total_weight.to_string())]),
        Line::from(vec![
            label("Incoming: "),
            Span::styled(
                format!("{} ({} tx)", summary.total_incoming_amount, summary.total_incoming_frequency),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            label("Outgoing: "),
            Span::styled(
                format!("{} ({} tx)", summary.total_outgoing_amount, summary.total_outgoing_frequency),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![label("Types: "), Span::raw(summary.transaction_types.join(", "))]),
        Line::from(vec![label("Channels: "), Span::raw(summary.channels.join(", "))]),
    ]
}

fn render_properties(f: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.view.summary {
        Some(summary) => summary_lines(summary),
        None => vec![
            Line::from(Span::styled(
                "All nodes",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} nodes, {} edges",
                app.view.graph.nodes.len(),
                app.view.graph.edges.len()
            )),
            Line::from(Span::styled(
                "Select a node to see its properties",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Properties "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.edge_state.selected().map(|i| i + 1).unwrap_or(0);

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, app.edge_rows()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Focus | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Transactions | "),
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::raw(" All | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// TESTS
// ============================================================================
