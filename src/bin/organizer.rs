//! Mines a basket CSV for frequent pairs and prints the interesting associations.

use std::fs::File;
use std::io::{stdout, BufReader, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pair_miner::report::{write_json, write_text};
use pair_miner::{compare, index_baskets, mine, Algorithm, BasketReader, Comparison, MiningConfig};
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "store-organizer")]
#[command(about = "Finds frequently co-occurring item pairs and ranks their associations")]
#[command(version)]
struct Cli {
    /// Basket CSV with one row per purchased item
    #[arg(long, short = 'd')]
    data: PathBuf,

    /// JSON file with mining parameters; flags below take precedence
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Support threshold for items, buckets and pairs
    #[arg(long, short = 's')]
    support: Option<u32>,

    /// Number of PCY hash buckets
    #[arg(long, short = 'b')]
    buckets: Option<usize>,

    /// Lowest interest reported, in [0, 1]
    #[arg(long, short = 'i')]
    interest: Option<f64>,

    /// How final pair counts are compared against the support threshold
    #[arg(long, value_enum)]
    pair_comparison: Option<ComparisonArg>,

    #[arg(long, short = 'a', value_enum, default_value_t = AlgorithmArg::Both)]
    algorithm: AlgorithmArg,

    #[arg(long, default_value = pair_miner::io::TRANSACTION_COLUMN)]
    transaction_column: String,

    #[arg(long, default_value = pair_miner::io::ITEM_COLUMN)]
    item_column: String,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,

    /// More logging on stderr, repeat for debug output
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Apriori,
    Pcy,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
enum ComparisonArg {
    AtLeast,
    GreaterThan,
}

impl From<ComparisonArg> for Comparison {
    fn from(arg: ComparisonArg) -> Self {
        match arg {
            ComparisonArg::AtLeast => Comparison::AtLeast,
            ComparisonArg::GreaterThan => Comparison::GreaterThan,
        }
    }
}

impl Cli {
    fn mining_config(&self) -> Result<MiningConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open config {}", path.display()))?;
                MiningConfig::from_json_reader(BufReader::new(file))?
            }
            None => MiningConfig::default(),
        };

        if let Some(support) = self.support {
            config.support_threshold = support;
        }
        if let Some(buckets) = self.buckets {
            config.bucket_count = buckets;
        }
        if let Some(interest) = self.interest {
            config.interest_threshold = interest;
        }
        if let Some(comparison) = self.pair_comparison {
            config.pair_comparison = comparison.into();
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.mining_config()?;
    info!(
        data = %cli.data.display(),
        support = config.support_threshold,
        buckets = config.bucket_count,
        interest = config.interest_threshold,
        "starting"
    );

    let raw = BasketReader::with_columns(&cli.transaction_column, &cli.item_column)
        .read_path(&cli.data)
        .with_context(|| format!("failed to load baskets from {}", cli.data.display()))?;
    let (indexer, baskets) = index_baskets(raw);

    let reports = match cli.algorithm {
        AlgorithmArg::Apriori => vec![mine(&baskets, &config, Algorithm::Apriori)?],
        AlgorithmArg::Pcy => vec![mine(&baskets, &config, Algorithm::Pcy)?],
        AlgorithmArg::Both => compare(&baskets, &config)?.to_vec(),
    };

    let stdout = stdout();
    let mut out = stdout.lock();
    if cli.json {
        write_json(&reports, &indexer, &mut out)?;
    } else {
        writeln!(out, "Data Source: {}", cli.data.display())?;
        writeln!(out, "Support Threshold: {}", config.support_threshold)?;
        writeln!(out, "Bucket Count used for PCY: {}", config.bucket_count)?;
        writeln!(out, "Interest Threshold: {}", config.interest_threshold)?;
        for report in &reports {
            writeln!(out)?;
            write_text(report, &indexer, &mut out)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}
