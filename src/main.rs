use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use memmap2::Mmap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stix::config::IndexConfig;
use stix::output::{self, FindReport, LcpReport, RepeatReport, RmqReport, StatsReport};
use stix::rmq::{RangeMinimumQuery, RmqTier, build_rmq};
use stix::tree::{BuildStrategy, ROOT, SuffixTree};
use stix::utils::BuildSpinner;

#[derive(Parser)]
#[command(name = "stix")]
#[command(about = "Suffix tree text index with constant-time longest-common-prefix queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

/// Where the indexed text comes from, and how to index it
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Index this text
    #[arg(short, long)]
    text: Option<String>,

    /// Index the contents of this file (UTF-8)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    source: Source,

    /// Construction algorithm (overrides the config file)
    #[arg(short, long, value_enum)]
    strategy: Option<BuildStrategy>,

    /// Fold case of text and patterns
    #[arg(short, long)]
    ignore_case: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every occurrence of one or more patterns
    Find {
        #[command(flatten)]
        build: BuildArgs,

        /// Patterns to look up
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Count occurrences of a pattern
    Count {
        #[command(flatten)]
        build: BuildArgs,

        pattern: String,
    },
    /// Longest substring repeated at least N times
    Repeat {
        #[command(flatten)]
        build: BuildArgs,

        /// Minimum number of repetitions
        #[arg(short = 'n', long, default_value_t = 2)]
        min: usize,
    },
    /// Longest common prefix of the suffixes starting at I and J
    Lcp {
        #[command(flatten)]
        build: BuildArgs,

        i: usize,
        j: usize,
    },
    /// Print the tree structure
    Dump {
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Show index statistics
    Stats {
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Range minimum query over a list of integers
    Rmq {
        /// Comma separated values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        values: Vec<i64>,

        /// RMQ tier (overrides the config file)
        #[arg(long, value_enum)]
        tier: Option<RmqTier>,

        i: usize,
        j: usize,
    },
}

/// Indexed text kept alongside the tree for rendering
struct Loaded {
    chars: Vec<char>,
    tree: SuffixTree<char>,
    config: IndexConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => IndexConfig::load(path)?,
        None => IndexConfig::default(),
    };

    let color = !cli.no_color;
    let mut out = output::stdout(color);

    match cli.command {
        Commands::Find { build, patterns } => {
            let loaded = load(&build, config, color)?;
            let folded: Vec<String> = patterns
                .iter()
                .map(|p| loaded.config.fold(p).into_owned())
                .collect();
            let needles: Vec<Vec<char>> = folded.iter().map(|p| p.chars().collect()).collect();

            let results = loaded.tree.occurrences_batch(&needles);
            for ((pattern, needle), result) in folded.iter().zip(&needles).zip(results) {
                let mut positions = result?;
                positions.sort_unstable();

                if cli.json {
                    let report = FindReport {
                        pattern,
                        count: positions.len(),
                        positions,
                    };
                    output::print_json(&mut out, &report)?;
                } else {
                    output::print_occurrences(&mut out, &loaded.chars, &positions, needle.len())?;
                }
            }
        }
        Commands::Count { build, pattern } => {
            let loaded = load(&build, config, color)?;
            let pattern = loaded.config.fold(&pattern).into_owned();
            let count = loaded.tree.count(&pattern)?;

            if cli.json {
                let report = FindReport {
                    pattern: &pattern,
                    count,
                    positions: Vec::new(),
                };
                output::print_json(&mut out, &report)?;
            } else {
                output::print_count(&mut out, &pattern, count)?;
            }
        }
        Commands::Repeat { build, min } => {
            let loaded = load(&build, config, color)?;
            let span = loaded.tree.longest_repeated_span(min)?;
            let mut positions = loaded.tree.longest_repeated_substring(min)?;
            positions.sort_unstable();

            if cli.json {
                let report = RepeatReport {
                    min_repetitions: min,
                    substring: span.clone().map(|s| loaded.chars[s].iter().collect()),
                    positions,
                };
                output::print_json(&mut out, &report)?;
            } else {
                output::print_repeat(&mut out, &loaded.chars, span, &positions)?;
            }
        }
        Commands::Lcp { build, i, j } => {
            let loaded = load(&build, config, color)?;
            let length = loaded.tree.longest_common_prefix(i, j)?;
            let prefix = loaded.tree.text()[i..i + length]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let report = LcpReport { i, j, length, prefix };

            if cli.json {
                output::print_json(&mut out, &report)?;
            } else {
                output::print_lcp(&mut out, &report)?;
            }
        }
        Commands::Dump { build } => {
            let loaded = load(&build, config, color)?;
            writeln!(out, "{}", loaded.tree)?;
        }
        Commands::Stats { build } => {
            let loaded = load(&build, config, color)?;
            let tree = &loaded.tree;
            let leaves = tree.leaf_count(ROOT).unwrap_or(0);
            let longest_repeat = tree
                .longest_repeated_span(2)?
                .map(|span| span.len())
                .unwrap_or(0);
            let stats = StatsReport {
                strategy: value_name(tree.strategy()),
                text_len: tree.len(),
                nodes: tree.node_count(),
                leaves,
                internal_nodes: tree.node_count() - leaves,
                longest_repeat,
            };

            if cli.json {
                output::print_json(&mut out, &stats)?;
            } else {
                output::print_stats(&mut out, &stats)?;
            }
        }
        Commands::Rmq { values, tier, i, j } => {
            let tier = tier.unwrap_or(config.rmq_tier);
            let table = build_rmq(tier, values.clone())?;
            let index = table.rmq(i, j)?;
            let report = RmqReport {
                tier: value_name(tier),
                i,
                j,
                index,
                value: values[index],
            };

            if cli.json {
                output::print_json(&mut out, &report)?;
            } else {
                output::print_rmq(&mut out, &report)?;
            }
        }
    }

    Ok(())
}

/// Read the source text, apply config overrides and build the tree
fn load(args: &BuildArgs, mut config: IndexConfig, color: bool) -> Result<Loaded> {
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.ignore_case {
        config.case_insensitive = true;
    }

    let mapped: Option<Mmap>;
    let raw: &str = match (&args.source.text, &args.source.file) {
        (Some(text), _) => {
            config.check_size(text.len() as u64)?;
            text
        }
        (None, Some(path)) => {
            mapped = map_file(path, &config)?;
            match &mapped {
                Some(bytes) => std::str::from_utf8(bytes)
                    .with_context(|| format!("{} is not valid UTF-8", path.display()))?,
                None => "",
            }
        }
        (None, None) => anyhow::bail!("Either --text or --file is required"),
    };

    let text = config.fold(raw);
    let chars: Vec<char> = text.chars().collect();

    let spinner = BuildSpinner::start(
        &format!("Building suffix tree over {} symbols", chars.len()),
        color && !chars.is_empty(),
    );
    let tree = SuffixTree::new(&chars, config.strategy);
    spinner.finish();

    Ok(Loaded {
        chars,
        tree: tree?,
        config,
    })
}

/// Map `path` after checking its size against the configured limit.
/// Empty files have nothing to map.
fn map_file(path: &Path, config: &IndexConfig) -> Result<Option<Mmap>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let len = file.metadata()?.len();
    config.check_size(len)?;
    if len == 0 {
        return Ok(None);
    }

    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Some(mmap))
}

/// Command line name of a value enum variant
fn value_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}
