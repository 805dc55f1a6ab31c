use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser};
use itertools::Itertools;
use tourlca::{
    lca::LcaEngine,
    parser::parse_tree,
    rmq::{NaiveTable, RangeMinimum, SparseTable},
    tree::Node,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tourlca",
    version,
    about = "Answer lowest-common-ancestor queries on a tree written in bracket notation, e.g. A(B(D,E),C(F))."
)]
struct Cli {
    /// The tree, in bracket notation.
    #[arg(
        long,
        value_name = "TEXT",
        conflicts_with = "tree_file",
        required_unless_present = "tree_file"
    )]
    tree: Option<String>,
    /// File holding the tree in bracket notation.
    #[arg(long, value_name = "FILE")]
    tree_file: Option<PathBuf>,
    /// Range-minimum index backing the queries.
    #[arg(long, value_enum, default_value_t = Strategy::Sparse)]
    strategy: Strategy,
    /// Print the lowest common ancestor of two labels.
    #[arg(long = "query", value_name = "U,V", action = ArgAction::Append)]
    queries: Vec<String>,
    /// Print the ancestor of a label at the given depth.
    #[arg(long = "ancestor", value_name = "U:D", action = ArgAction::Append)]
    ancestors: Vec<String>,
    /// Read whitespace-separated `U V` pairs from stdin, one query per line.
    #[arg(long)]
    stdin: bool,
    /// Print the tree.
    #[arg(long)]
    draw: bool,
    /// Print the Euler tour sequences.
    #[arg(long)]
    tour: bool,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Strategy {
    /// O(n log n) sparse table.
    Sparse,
    /// O(n²) table; small trees only.
    Naive,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let text = match (&cli.tree, &cli.tree_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read tree file {}", path.display()))?,
        (None, None) => bail!("one of --tree or --tree-file is required"),
    };
    let root = parse_tree(&text).context("failed to parse tree")?;
    info!(nodes = root.n_nodes(), strategy = ?cli.strategy, "parsed tree");

    match cli.strategy {
        Strategy::Sparse => answer::<SparseTable<usize>>(cli, root),
        Strategy::Naive => answer::<NaiveTable<usize>>(cli, root),
    }
}

fn answer<R: RangeMinimum<usize>>(cli: &Cli, root: Node<String>) -> Result<()> {
    let engine = LcaEngine::<String, R>::from_node(root).context("failed to build lca engine")?;
    let mut out = io::stdout().lock();

    if cli.draw {
        write!(out, "{}", engine.tree().draw())?;
    }

    if cli.tour {
        let tree = engine.tree();
        let tour = engine.tour();
        writeln!(out, "visit_order: {}", tour.labels(tree).join(" "))?;
        writeln!(out, "depth_at_step: {}", tour.depth_at_step().iter().join(" "))?;
        writeln!(
            out,
            "first_occurrence: {}",
            tree.iter_node_ids()
                .zip(tour.first_occurrences())
                .map(|(id, step)| format!("{}:{step}", tree[id]))
                .join(" ")
        )?;
    }

    for raw in &cli.queries {
        let (u, v) = raw
            .split_once(',')
            .map(|(u, v)| (u.trim(), v.trim()))
            .ok_or_else(|| anyhow!("expected U,V in --query {raw:?}"))?;
        let lca = engine
            .query(u, v)
            .with_context(|| format!("query {raw:?} failed"))?;
        writeln!(out, "lca({u}, {v}) = {lca}")?;
    }

    for raw in &cli.ancestors {
        let (u, depth) = raw
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("expected U:D in --ancestor {raw:?}"))?;
        let u = u.trim();
        let depth: usize = depth
            .trim()
            .parse()
            .with_context(|| format!("invalid depth in --ancestor {raw:?}"))?;
        let ancestor = engine
            .level_ancestor(u, depth)
            .with_context(|| format!("ancestor query {raw:?} failed"))?;
        match ancestor {
            Some(a) => writeln!(out, "ancestor({u}, {depth}) = {a}")?,
            None => writeln!(out, "ancestor({u}, {depth}) = none")?,
        }
    }

    if cli.stdin {
        let mut answered = 0usize;
        for (line_no, line) in io::stdin().lock().lines().enumerate() {
            let line = line.context("failed to read stdin")?;
            let mut words = line.split_whitespace();
            let (u, v) = match (words.next(), words.next(), words.next()) {
                (None, _, _) => continue,
                (Some(u), Some(v), None) => (u, v),
                _ => bail!("line {}: expected two labels, got {line:?}", line_no + 1),
            };
            let lca = engine
                .query(u, v)
                .with_context(|| format!("line {}", line_no + 1))?;
            writeln!(out, "lca({u}, {v}) = {lca}")?;
            answered += 1;
        }
        debug!(answered, "answered queries from stdin");
    }

    Ok(())
}
