//! State-transition diagrams for checkpoint paths
//!
//! A path is described as a Graphviz digraph. Explicit-state paths are drawn
//! over a fixed legend of the schema's checkpoints; single-pattern paths are
//! drawn as plain boxes. Rasterizing goes through a `GraphRenderer` and is
//! optional: a failure leaves the diagram out.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt::Write as _;
use std::sync::Arc;

use crate::external::{CollaboratorResult, GraphRenderer};
use crate::models::{Schema, Strategy};
use crate::validators::checkpoints as cp;

const CUSTOM_LEGEND: &[(&str, &str)] = &[
    (cp::START, "START"),
    (cp::TYPE, "TYPE"),
    (cp::UUID, "UUID"),
    (cp::VERSION, "VERSION"),
    (cp::TIMESTAMP, "TIMESTAMP"),
    (cp::DATA, "DATA"),
    (cp::PROCESS, "PROCESS"),
];

const WIFI_LEGEND: &[(&str, &str)] = &[
    (cp::START, "START"),
    (cp::WIFI, "WIFI:"),
    (cp::SSID, "SSID✓"),
    (cp::AUTH, "AUTH✓"),
    (cp::PASSWORD, "PASS✓"),
    (cp::HIDDEN, "HIDDEN✓"),
];

/// Quote a string as a DOT identifier
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn edge_color(rejected: bool) -> &'static str {
    if rejected {
        "red"
    } else {
        "blue"
    }
}

/// Describe a checkpoint path as a Graphviz digraph
pub fn describe(path: &[String], schema: Schema, strategy: Strategy) -> String {
    match strategy {
        Strategy::Dfa => describe_dfa(path, schema),
        Strategy::Nfa => describe_nfa(path),
    }
}

fn describe_dfa(path: &[String], schema: Schema) -> String {
    let legend = match schema {
        Schema::Custom => CUSTOM_LEGEND,
        Schema::Wifi => WIFI_LEGEND,
    };

    let mut dot = String::from(
        "digraph DFA { rankdir=LR; node [shape=circle, style=filled, fillcolor=lightblue];",
    );
    for (id, label) in legend {
        let _ = write!(dot, " {} [label={}]", id, quoted(label));
    }
    let _ = write!(
        dot,
        " {} [label=\"ACCEPT\", shape=doublecircle, fillcolor=green] {} [label=\"REJECT\", shape=doublecircle, fillcolor=red];",
        cp::ACCEPT,
        cp::REJECT
    );

    for pair in path.windows(2) {
        let color = edge_color(pair[1] == cp::REJECT);
        let _ = write!(
            dot,
            " {} -> {} [color={}, penwidth=3];",
            quoted(&pair[0]),
            quoted(&pair[1]),
            color
        );
    }
    dot.push_str(" }");
    dot
}

fn describe_nfa(path: &[String]) -> String {
    let mut dot = String::from(
        "digraph NFA { rankdir=LR; node [shape=rectangle, style=filled, fillcolor=lightgreen];",
    );
    for pair in path.windows(2) {
        let color = edge_color(pair[1].to_lowercase().contains("reject"));
        let _ = write!(
            dot,
            " {} -> {} [color={}, penwidth=3];",
            quoted(&pair[0]),
            quoted(&pair[1]),
            color
        );
    }
    dot.push_str(" }");
    dot
}

/// Turns checkpoint paths into PNG data URIs
#[derive(Clone)]
pub struct DiagramRenderer {
    renderer: Arc<dyn GraphRenderer>,
}

impl DiagramRenderer {
    pub fn new(renderer: Arc<dyn GraphRenderer>) -> Self {
        Self { renderer }
    }

    /// Render a path as `data:image/png;base64,...`
    pub async fn render(
        &self,
        path: &[String],
        schema: Schema,
        strategy: Strategy,
    ) -> CollaboratorResult<String> {
        let description = describe(path, schema, strategy);
        let png = self.renderer.render(&description).await?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    pub async fn probe(&self) -> CollaboratorResult<()> {
        self.renderer.probe().await
    }
}
