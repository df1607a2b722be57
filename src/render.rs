// 🖼️ Render - NetworkGraph → vis-network page
//
// Produces the node-link diagram entirely in memory. Nothing is written to
// disk here; callers decide whether to save or serve the string.

use crate::ecosystem::Ecosystem;
use crate::graph::{NetworkGraph, EMPHASIS_COLOR};
use anyhow::{Context, Result};
use serde_json::{json, Value};

pub const VIS_NETWORK_SCRIPT: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// vis-network options shared by the standalone page and the dashboard
pub fn vis_options() -> Value {
    json!({
        "physics": { "enabled": false },
        "layout": { "randomSeed": 42 },
        "nodes": {
            "size": 20,
            "font": { "size": 16, "multi": "html" }
        },
        "edges": {
            "smooth": { "type": "continuous" },
            "arrows": { "to": { "enabled": true, "scaleFactor": 1.5 } }
        },
        "interaction": { "hover": true, "tooltipDelay": 100 }
    })
}

/// vis-network DataSet payload: `{ "nodes": [...], "edges": [...] }`
pub fn vis_data(graph: &NetworkGraph) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|node| {
            let label = if node.bold {
                format!("<b>{}</b>", escape_html(&node.label))
            } else {
                escape_html(&node.label)
            };
            let border_width = if node.emphasized { 3 } else { 1 };
            json!({
                "id": node.id,
                "label": label,
                "title": node.title,
                "shape": node.kind.shape(),
                "color": node.color,
                "size": node.size,
                "borderWidth": border_width,
            })
        })
        .collect();

    let edges: Vec<Value> = graph
        .edges
        .iter()
        .map(|edge| {
            json!({
                "from": edge.from,
                "to": edge.to,
                "value": edge.value,
                "title": edge.title,
                "color": { "color": edge.color },
            })
        })
        .collect();

    json!({ "nodes": nodes, "edges": edges })
}

/// Ecosystem → color pairs plus the emphasis entry
pub fn legend() -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Ecosystem::ALL
        .iter()
        .map(|eco| (eco.as_str().to_string(), eco.color().to_string()))
        .collect();
    entries.push(("Selected node".to_string(), EMPHASIS_COLOR.to_string()));
    entries
}

fn legend_html() -> String {
    legend()
        .iter()
        .map(|(label, color)| {
            format!(
                "<li><span class=\"swatch\" style=\"background:{}\"></span>{}</li>",
                color,
                escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

/// Complete standalone HTML page for the graph
pub fn render_html(graph: &NetworkGraph, title: &str) -> Result<String> {
    let data = script_json(&vis_data(graph)).context("Failed to serialize graph data")?;
    let options = script_json(&vis_options()).context("Failed to serialize graph options")?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{script}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 0; display: flex; }}
    #network {{ flex: 1; height: 600px; border: 1px solid #ddd; }}
    #legend {{ width: 200px; padding: 12px; }}
    #legend ul {{ list-style: none; padding: 0; }}
    .swatch {{ display: inline-block; width: 12px; height: 12px; margin-right: 6px; border-radius: 2px; }}
  </style>
</head>
<body>
  <div id="network"></div>
  <div id="legend">
    <h3>Ecosystems</h3>
    <ul>
      {legend}
    </ul>
  </div>
  <script>
    var data = {data};
    var options = {options};
    new vis.Network(
      document.getElementById("network"),
      {{ nodes: new vis.DataSet(data.nodes), edges: new vis.DataSet(data.edges) }},
      options
    );
  </script>
</body>
</html>
"#,
        title = escape_html(title),
        script = VIS_NETWORK_SCRIPT,
        legend = legend_html(),
        data = data,
        options = options,
    ))
}

/// JSON safe to inline inside a <script> element
fn script_json(value: &Value) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
