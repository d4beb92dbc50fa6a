// CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::graph::NodeId;
use crate::reliability::DEFAULT_MAX_EDGES;

/// Netstab - structural reliability for unreliable networks
///
/// Reads an undirected graph whose edges carry success probabilities and
/// reports pairwise connection probabilities, full connectivity, and the
/// node/edge disconnection counters.
#[derive(Parser, Debug, Clone)]
#[command(name = "netstab")]
#[command(author, version, about)]
#[command(long_about = "Netstab computes structural reliability metrics for a small undirected graph
whose edges fail independently.

Input is JSON: {\"nodes\": [...], \"edges\": [{\"source\", \"target\", \"successChance\"}]}

Reliability is exact: every one of the 2^m edge states is enumerated, so the
cost is exponential in the edge count. Use --max-edges to set how much work
you are willing to pay for.")]
pub struct Cli {
    /// Graph JSON file ('-' reads stdin)
    #[arg(global = true, long, env = "NETSTAB_GRAPH")]
    pub graph: Option<String>,

    /// Output format
    #[arg(global = true, long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Largest edge count to enumerate exhaustively
    #[arg(global = true, long, env = "NETSTAB_MAX_EDGES", default_value_t = DEFAULT_MAX_EDGES)]
    pub max_edges: usize,

    /// Evaluate node pairs on the calling thread only
    #[arg(global = true, long)]
    pub sequential: bool,

    /// Restrict the analysis to these nodes (repeatable)
    #[arg(global = true, long = "node", value_name = "ID")]
    pub nodes: Vec<NodeId>,

    /// Restrict the analysis to these edges, written SOURCE:TARGET (repeatable)
    #[arg(global = true, long = "edge", value_name = "A:B", value_parser = parse_edge_spec)]
    pub edges: Vec<(NodeId, NodeId)>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Human,
    /// Compact JSON for programmatic consumption
    Json,
    /// Formatted JSON with indentation
    Pretty,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Connection probability of every node pair
    Reliability(ReliabilityArgs),

    /// Check whether the graph is connected with every edge up
    Connected(ConnectedArgs),

    /// Node and edge disconnection counters (xG, alphaG)
    Counters(CountersArgs),

    /// Every metric in one report
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug, Clone, Copy)]
pub struct ReliabilityArgs {
    /// List the least reliable pairs first
    #[arg(long)]
    pub weakest_first: bool,
}

#[derive(Parser, Debug, Clone, Copy)]
pub struct ConnectedArgs {}

#[derive(Parser, Debug, Clone, Copy)]
pub struct CountersArgs {
    /// Only compute the counter for this element kind
    #[arg(long, value_enum)]
    pub element: Option<ElementArg>,
}

#[derive(Parser, Debug, Clone, Copy)]
pub struct AnalyzeArgs {}

/// Element kind selector for `counters`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementArg {
    /// Node-removal counter (xG)
    Node,
    /// Edge-removal counter (alphaG)
    Edge,
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Default graph file when neither --graph nor NETSTAB_GRAPH is given
pub const DEFAULT_GRAPH_PATH: &str = "./graph.json";

/// Resolve the graph path
///
/// Priority: CLI arg (clap already folds in NETSTAB_GRAPH) > "./graph.json"
pub fn resolve_graph_path(cli_graph: Option<String>) -> String {
    cli_graph.unwrap_or_else(|| DEFAULT_GRAPH_PATH.to_string())
}

/// Parse an edge filter written `SOURCE:TARGET`
pub fn parse_edge_spec(spec: &str) -> Result<(NodeId, NodeId), String> {
    let (a, b) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected SOURCE:TARGET, got '{}'", spec))?;
    if a.is_empty() || b.is_empty() {
        return Err(format!("expected SOURCE:TARGET, got '{}'", spec));
    }
    Ok((node_id(a), node_id(b)))
}

fn node_id(s: &str) -> NodeId {
    s.parse().unwrap_or_else(|never: std::convert::Infallible| match never {})
}

// ============================================================================
// Command Handlers
// ============================================================================

pub mod cmds {
    use super::*;
    use crate::connectivity::{count_edge_connectivity, count_node_connectivity, is_connected};
    use crate::graph::{Graph, GraphInput, SearchFilter};
    use crate::output;
    use crate::reliability::{
        compute_reliability, ExecutionStrategy, PairReliability, ReliabilityLimits, MAX_ENUMERABLE_EDGES,
    };
    use crate::report::{analyze as analyze_graph, StabilityReport};
    use anyhow::{Context, Result};
    use serde::Serialize;
    use std::io::Read;
    use tracing::debug;

    /// Read, validate and filter the graph named on the command line
    pub fn load_graph(cli: &Cli) -> Result<Graph> {
        let path = resolve_graph_path(cli.graph.clone());

        let text = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read graph from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read graph file {}", path))?
        };

        let input: GraphInput =
            serde_json::from_str(&text).with_context(|| format!("failed to parse graph JSON from {}", path))?;
        let graph = Graph::try_from(input)?;

        let filter = search_filter(cli);
        let graph = filter.apply(&graph)?;
        debug!(
            path = %path,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            filtered = !filter.is_empty(),
            "graph loaded"
        );
        Ok(graph)
    }

    /// Filter assembled from --node/--edge flags
    pub fn search_filter(cli: &Cli) -> SearchFilter {
        let mut filter = SearchFilter::new();
        if !cli.nodes.is_empty() {
            filter = filter.with_nodes(cli.nodes.clone());
        }
        if !cli.edges.is_empty() {
            filter = filter.with_edges(cli.edges.clone());
        }
        filter
    }

    /// Enumeration limits from --max-edges/--sequential
    pub fn limits(cli: &Cli) -> ReliabilityLimits {
        if cli.max_edges > MAX_ENUMERABLE_EDGES {
            output::warn(&format!(
                "--max-edges {} is above the enumerator's width, using {}",
                cli.max_edges, MAX_ENUMERABLE_EDGES
            ));
        }
        let strategy = if cli.sequential {
            ExecutionStrategy::Sequential
        } else {
            ExecutionStrategy::Parallel
        };
        ReliabilityLimits::default()
            .with_max_edges(cli.max_edges)
            .with_strategy(strategy)
    }

    fn emit<T: Serialize>(format: OutputFormat, data: T, human: impl FnOnce(&T)) {
        match format {
            OutputFormat::Human => human(&data),
            OutputFormat::Json => println!("{}", output::JsonResponse::new(data).to_json()),
            OutputFormat::Pretty => println!("{}", output::JsonResponse::new(data).to_pretty_json()),
        }
    }

    fn print_table(rows: &[PairReliability]) {
        if rows.is_empty() {
            println!("  (no node pairs)");
            return;
        }
        let width = rows
            .iter()
            .map(|r| r.source.to_string().len() + r.target.to_string().len() + 4)
            .max()
            .unwrap_or(0);
        for row in rows {
            let pair = format!("{} -- {}", row.source, row.target);
            println!("  {:<width$}  {:.6}", pair, row.probability, width = width);
        }
    }

    pub fn reliability(args: ReliabilityArgs, cli: &Cli) -> Result<()> {
        let graph = load_graph(cli)?;
        let mut rows = compute_reliability(&graph, &limits(cli))?;
        if args.weakest_first {
            rows.sort_by(|a, b| a.probability.total_cmp(&b.probability));
        }

        emit(cli.output, rows, |rows| {
            output::header(&format!(
                "Pairwise reliability ({} nodes, {} edges, {} pairs)",
                graph.node_count(),
                graph.edge_count(),
                rows.len()
            ));
            print_table(rows);
        });
        Ok(())
    }

    #[derive(Debug, Serialize)]
    pub struct ConnectedData {
        pub connected: bool,
        pub node_count: usize,
        pub edge_count: usize,
    }

    pub fn connected(_args: ConnectedArgs, cli: &Cli) -> Result<()> {
        let graph = load_graph(cli)?;
        let data = ConnectedData {
            connected: is_connected(&graph),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        };

        emit(cli.output, data, |data| {
            if data.connected {
                println!("Graph is connected ({} nodes, {} edges)", data.node_count, data.edge_count);
            } else {
                println!("Graph is not connected ({} nodes, {} edges)", data.node_count, data.edge_count);
            }
        });
        Ok(())
    }

    #[derive(Debug, Serialize)]
    pub struct CountersData {
        #[serde(rename = "xG", skip_serializing_if = "Option::is_none")]
        pub x_g: Option<usize>,
        #[serde(rename = "alphaG", skip_serializing_if = "Option::is_none")]
        pub alpha_g: Option<usize>,
    }

    pub fn counters(args: CountersArgs, cli: &Cli) -> Result<()> {
        let graph = load_graph(cli)?;
        let want_nodes = args.element != Some(ElementArg::Edge);
        let want_edges = args.element != Some(ElementArg::Node);
        let data = CountersData {
            x_g: want_nodes.then(|| count_node_connectivity(&graph)),
            alpha_g: want_edges.then(|| count_edge_connectivity(&graph)),
        };

        emit(cli.output, data, |data| {
            if let Some(x_g) = data.x_g {
                println!("xG (node counter):     {}", x_g);
            }
            if let Some(alpha_g) = data.alpha_g {
                println!("alphaG (edge counter): {}", alpha_g);
            }
        });
        Ok(())
    }

    pub fn analyze(_args: AnalyzeArgs, cli: &Cli) -> Result<()> {
        let graph = load_graph(cli)?;
        let report: StabilityReport = analyze_graph(&graph, &limits(cli))?;

        emit(cli.output, report, |report| {
            output::header(&format!(
                "Stability report ({} nodes, {} edges)",
                report.node_count, report.edge_count
            ));
            output::info(&format!("Graph fingerprint: {}", report.graph_hash));
            println!("Connected:             {}", if report.connected { "yes" } else { "no" });
            println!("xG (node counter):     {}", report.x_g);
            println!("alphaG (edge counter): {}", report.alpha_g);
            if let Some(weakest) = report.weakest_pair() {
                println!(
                    "Weakest pair:          {} -- {} ({:.6})",
                    weakest.source, weakest.target, weakest.probability
                );
            }
            println!();
            println!("Pairwise reliability:");
            print_table(&report.probabilities);
        });
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_graph_path_default() {
        assert_eq!(resolve_graph_path(None), "./graph.json");
    }

    #[test]
    fn test_resolve_graph_path_with_cli_arg() {
        let result = resolve_graph_path(Some("/custom/net.json".to_string()));
        assert_eq!(result, "/custom/net.json");
    }

    #[test]
    fn test_parse_edge_spec() {
        assert_eq!(
            parse_edge_spec("A:B").unwrap(),
            (NodeId::from("A"), NodeId::from("B"))
        );
        assert_eq!(
            parse_edge_spec("1:hub").unwrap(),
            (NodeId::Number(1), NodeId::from("hub"))
        );
        assert!(parse_edge_spec("AB").is_err());
        assert!(parse_edge_spec(":B").is_err());
    }

    #[test]
    fn test_cli_parses_filters_and_limits() {
        let cli = Cli::try_parse_from([
            "netstab",
            "--graph",
            "net.json",
            "--max-edges",
            "12",
            "--sequential",
            "--node",
            "A",
            "--node",
            "2",
            "--edge",
            "A:2",
            "reliability",
            "--weakest-first",
        ])
        .unwrap();

        assert_eq!(cli.graph.as_deref(), Some("net.json"));
        assert_eq!(cli.max_edges, 12);
        assert!(cli.sequential);
        assert_eq!(cli.nodes, vec![NodeId::from("A"), NodeId::Number(2)]);
        assert_eq!(cli.edges, vec![(NodeId::from("A"), NodeId::Number(2))]);
        assert!(matches!(cli.command, Commands::Reliability(ReliabilityArgs { weakest_first: true })));

        let filter = cmds::search_filter(&cli);
        assert!(!filter.is_empty());
        let limits = cmds::limits(&cli);
        assert_eq!(limits.max_edges, 12);
        assert_eq!(limits.strategy, crate::reliability::ExecutionStrategy::Sequential);
    }

    #[test]
    fn test_cli_counters_element() {
        let cli = Cli::try_parse_from(["netstab", "counters", "--element", "edge"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Counters(CountersArgs { element: Some(ElementArg::Edge) })
        ));
        assert!(cli.nodes.is_empty());
        assert!(cmds::search_filter(&cli).is_empty());
    }

    #[test]
    fn test_cli_rejects_bad_edge_filter() {
        assert!(Cli::try_parse_from(["netstab", "--edge", "nope", "analyze"]).is_err());
    }
}
