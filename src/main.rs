//! Ranks the pages of an HTML corpus, once by sampling and once by iteration.

use anyhow::{Context, Result};
use clap::Parser;
use link_rank::page_rank::{
    iterated, sampled, IteratedPageRank, PageRank, RngSource, SampledPageRank, DEFAULT_DAMPING,
};
use std::{collections::BTreeMap, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "link-rank", version, about)]
struct Cli {
    /// Directory holding the `.html` pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(short, long, default_value_t = DEFAULT_DAMPING)]
    damping: f64,

    /// Number of pages visited by the random walk
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Largest per-page change at which iteration stops
    #[arg(short, long, default_value_t = 0.001)]
    threshold: f64,

    /// Seed for the random walk; a fresh one is drawn when absent
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let corpus = link_rank::crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;

    let source = match cli.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let config = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let spr = SampledPageRank::new(&corpus, &config, source)?;
    let ranks = corpus.named(&spr.calc()?.page_rank);
    println!("PageRank Results from Sampling (n = {})", cli.samples);
    print_ranks(&ranks);

    let config = iterated::Config {
        damping: cli.damping,
        epsilon: cli.threshold,
        ..iterated::Config::default()
    };
    let ipr = IteratedPageRank::new(&corpus, &config)?;
    let ranks = corpus.named(&ipr.calc()?.page_rank);
    println!("PageRank Results from Iteration");
    print_ranks(&ranks);

    Ok(())
}

fn print_ranks(ranks: &BTreeMap<String, f64>) {
    for (page, rank) in ranks.iter() {
        println!("  {page}: {rank:.4}");
    }
}
