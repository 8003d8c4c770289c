use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use gitviz_core::DateFilter;
use gitviz_graph::dot::{save_dot, to_dot};
use gitviz_graph::engine::{render_with_engine, DEFAULT_ENGINE};
use gitviz_graph::{link_ancestry, render};
use gitviz_store::GitRepo;

use crate::config::{find_repo_root, load_render_config};
use crate::output;

const DOT_FORMAT: &str = "dot";

#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// Path to the git repository (default: the repository around the current directory)
    #[arg(long)]
    repo_path: Option<PathBuf>,
    /// Where to write the graph
    #[arg(long, required_unless_present = "json")]
    output_path: Option<PathBuf>,
    /// Only include commits authored on or before this date (YYYY-MM-DD, UTC)
    #[arg(long)]
    date: Option<DateFilter>,
    /// Output format: "dot" writes the graph description, anything else is rendered by the engine
    #[arg(long, default_value = DOT_FORMAT)]
    format: String,
    /// Graphviz engine binary used for non-dot formats
    #[arg(long, default_value = DEFAULT_ENGINE)]
    engine: String,
    /// TOML file with render settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the presentation graph as JSON on stdout
    #[arg(long)]
    json: bool,
}

pub fn run(args: VisualizeArgs) -> anyhow::Result<()> {
    let root = match args.repo_path {
        Some(path) => path,
        None => find_repo_root()?,
    };
    let config = load_render_config(args.config.as_deref())?;

    let repo = GitRepo::open(&root)
        .with_context(|| format!("opening repository at {}", root.display()))?;
    tracing::debug!("git directory: {}", repo.layout().git_dir().display());
    if let Some(filter) = &args.date {
        tracing::info!("date filter: {}", filter);
    }
    let walk = repo.walk(args.date.as_ref())?;

    let table = link_ancestry(walk.table);
    let graph = render(&table, &walk.head, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        println!("{}", output::summary(&walk.head, &walk.stats, &graph));
    }

    let Some(output_path) = args.output_path else {
        return Ok(());
    };
    let dot = to_dot(&graph);
    if args.format == DOT_FORMAT {
        save_dot(&dot, &output_path)
            .with_context(|| format!("writing {}", output_path.display()))?;
        if !args.json {
            println!("DOT file saved to: {}", output_path.display());
        }
    } else {
        render_with_engine(&dot, &args.engine, &args.format, &output_path)?;
        if !args.json {
            println!("Graph rendered to: {}", output_path.display());
        }
    }

    Ok(())
}
