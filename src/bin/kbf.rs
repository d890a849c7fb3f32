use clap::Parser;
use kmer_bloom_index::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::info;

const NUCLEOTIDES: [u8; 4] = *b"ATCG";

/// Build a Bloom filter over the canonical k-mers of a FASTA file and query it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// FASTA file to map into the Bloom filter
    #[arg(short = 'i', long = "file")]
    file: PathBuf,

    /// K-mer length (<= 31)
    #[arg(short = 'k', long)]
    k: usize,

    /// Size of the Bloom filter in bits (<= 2^34)
    #[arg(short = 'n', long)]
    n: u64,

    /// Number of hash functions (<= 64)
    #[arg(long = "nf")]
    nf: usize,

    /// Number of random k-mer queries
    #[arg(short = 'r', long, default_value_t = 0)]
    r: usize,

    /// Seed for the random queries (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Literal k-mer to look up (repeatable)
    #[arg(short = 'q', long = "query")]
    queries: Vec<String>,

    /// Threads for batch queries
    #[arg(long)]
    threads: Option<usize>,
}

fn random_kmers(rng: &mut SmallRng, count: usize, k: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            (0..k)
                .map(|_| NUCLEOTIDES[rng.random_range(0..NUCLEOTIDES.len())])
                .collect()
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = BuildConfig::new(args.k, args.n, args.nf);
    let cfg = match args.threads {
        Some(n) => cfg.threads(n),
        None => cfg,
    };

    let (idx, stats) = build_from_path(&args.file, &cfg)?;
    info!(
        symbols = stats.symbols,
        kmers = stats.kmers,
        est_fpp = idx.filter().estimated_fpp(),
        "filter ready"
    );
    println!("{}", idx.count_ones());

    if args.r > 0 {
        let mut rng = match args.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_os_rng(),
        };
        let codes: Vec<u64> = random_kmers(&mut rng, args.r, idx.k())
            .iter()
            .map(|w| canonical_code(w))
            .collect();
        let found = idx.filter().count_present(&codes);
        println!("{found} random words found over {} tested.", args.r);
    }

    for q in &args.queries {
        let presence = if idx.query_kmer(q.as_bytes())? {
            " has been found."
        } else {
            " is absent."
        };
        println!("\"{q}\"{presence}");
    }

    Ok(())
}
