use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::load_catalog;
use crate::error::{PackgraphError, Result};
use crate::graph::builder::build_dependency_graph;
use crate::graph::export::{export_dot, export_json_string};
use crate::graph::query::{filter_by_pack, filter_edges, highlight_path, search_nodes};
use crate::graph::{ConflictSeverity, DependencyGraph};
use crate::layout::{layout_graph, parse_direction, parse_layout_kind, LayoutOptions};
use crate::util::output;

#[derive(Parser, Debug)]
#[command(name = "packgraph")]
#[command(about = "Pack dependency graph analyzer", long_about = None)]
pub struct Cli {
    /// Pack catalogue file (JSON or YAML)
    #[arg(short, long, env = "PACKGRAPH_CATALOG")]
    pub catalog: PathBuf,
    #[arg(short, long)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Build(BuildArgs),
    Layout(LayoutArgs),
    Export(ExportArgs),
    Search(SearchArgs),
    Conflicts(ConflictsArgs),
    Highlight(HighlightArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[arg(short, long, default_value = "dagre")]
    pub layout: String,
    #[arg(short, long, default_value = "down")]
    pub direction: String,
    #[arg(long)]
    pub node_width: Option<f64>,
    #[arg(long)]
    pub node_height: Option<f64>,
    /// Restrict output to these pack slugs
    #[arg(long)]
    pub packs: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short, long, default_value = "json")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Args, Debug)]
pub struct ConflictsArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// Start node: a pack slug or full node id
    pub node: String,
}

pub fn run() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let packs = load_catalog(&cli.catalog)?;
    let graph = build_dependency_graph(&packs);

    match cli.command {
        Commands::Build(args) => handle_build(args, &graph, cli.quiet),
        Commands::Layout(args) => handle_layout(args, &graph),
        Commands::Export(args) => handle_export(args, &graph),
        Commands::Search(args) => handle_search(args, &graph),
        Commands::Conflicts(args) => handle_conflicts(args, &graph),
        Commands::Highlight(args) => handle_highlight(args, &graph),
    }
}

fn handle_build(args: BuildArgs, graph: &DependencyGraph, quiet: bool) -> Result<()> {
    if args.json {
        let text = export_json_string(graph).map_err(|err| anyhow::anyhow!(err))?;
        println!("{text}");
        return Ok(());
    }

    let stats = &graph.stats;
    output::info(&format!(
        "{} packs, {} agents, {} dependencies, depth {}",
        stats.pack_count, stats.agent_count, stats.dependency_count, stats.max_depth
    ));
    if !quiet {
        report_conflicts(graph);
    }
    Ok(())
}

fn report_conflicts(graph: &DependencyGraph) {
    if graph.conflicts.is_empty() {
        output::info("no conflicts detected");
        return;
    }
    for conflict in &graph.conflicts {
        match conflict.severity {
            ConflictSeverity::Warning => output::warn(&conflict.message),
            ConflictSeverity::Error => output::error(&conflict.message),
            ConflictSeverity::Critical => output::critical(&conflict.message),
        }
        if let Some(resolution) = conflict.resolution.as_deref() {
            output::info(&format!("  hint: {resolution}"));
        }
    }
}

fn handle_layout(args: LayoutArgs, graph: &DependencyGraph) -> Result<()> {
    let kind = parse_layout_kind(&args.layout).ok_or_else(|| {
        PackgraphError::Other(anyhow::anyhow!(format!(
            "unknown layout '{}'",
            args.layout
        )))
    })?;
    let direction = parse_direction(&args.direction).ok_or_else(|| {
        PackgraphError::Other(anyhow::anyhow!(format!(
            "unknown direction '{}'",
            args.direction
        )))
    })?;

    let defaults = LayoutOptions::default();
    let options = LayoutOptions {
        node_width: args.node_width.unwrap_or(defaults.node_width),
        node_height: args.node_height.unwrap_or(defaults.node_height),
        direction,
        ..defaults
    };

    let nodes = filter_by_pack(&graph.nodes, &args.packs);
    let visible: HashSet<String> = nodes.iter().map(|node| node.id.clone()).collect();
    let edges = filter_edges(&graph.edges, &visible);
    let placed = layout_graph(&nodes, &edges, kind, &options);

    let text = serde_json::to_string_pretty(&placed).map_err(|err| anyhow::anyhow!(err))?;
    println!("{text}");
    Ok(())
}

fn handle_export(args: ExportArgs, graph: &DependencyGraph) -> Result<()> {
    match args.format.to_ascii_lowercase().as_str() {
        "json" => {
            let text = export_json_string(graph).map_err(|err| anyhow::anyhow!(err))?;
            println!("{text}");
            Ok(())
        }
        "dot" => {
            print!("{}", export_dot(graph));
            Ok(())
        }
        other => Err(PackgraphError::Other(anyhow::anyhow!(format!(
            "unknown export format '{other}'"
        )))),
    }
}

fn handle_search(args: SearchArgs, graph: &DependencyGraph) -> Result<()> {
    let matches = search_nodes(&graph.nodes, &args.query);
    if matches.is_empty() {
        output::info("no matching packs");
        return Ok(());
    }
    for node in matches {
        println!("{}\t{} {}", node.slug, node.name, node.version);
    }
    Ok(())
}

fn handle_conflicts(args: ConflictsArgs, graph: &DependencyGraph) -> Result<()> {
    if args.json {
        let text =
            serde_json::to_string_pretty(&graph.conflicts).map_err(|err| anyhow::anyhow!(err))?;
        println!("{text}");
        return Ok(());
    }
    report_conflicts(graph);
    if !graph.conflicts.is_empty() {
        std::process::exit(2);
    }
    Ok(())
}

fn handle_highlight(args: HighlightArgs, graph: &DependencyGraph) -> Result<()> {
    // Accept a bare slug as shorthand for the node id.
    let node_id = if graph.nodes.iter().any(|node| node.id == args.node) {
        args.node.clone()
    } else {
        crate::graph::node_id_for(&args.node)
    };
    let highlighted = highlight_path(&node_id, &graph.nodes, &graph.edges);

    let mut reachable: Vec<&String> = highlighted.node_ids.iter().collect();
    reachable.sort();
    for id in reachable {
        println!("{id}");
    }
    Ok(())
}
