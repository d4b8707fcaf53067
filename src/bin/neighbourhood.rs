use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use docopt::Docopt;
use log::{error, info};
use serde_derive::Deserialize;

use ordinal_neighbours::analysis::*;
use ordinal_neighbours::analyzer::{KernelParams, KnnParams};
use ordinal_neighbours::utils::{dataset_pairs, load_table, store_results, store_summary};

const USAGE: &str = "
Assign a type (safe, borderline, rare, outlier) to the examples of ordinal
classification datasets.

With --batch, <metadata> and <data> are directories: metadata and data files
with the same name are paired, the results of each dataset are stored into
<results-dir>/<dataset>/, and the type percentages of all datasets into
<results-dir>/summary_<family>.csv.

Usage: neighbourhood [options] <metadata> <data> <results-dir>
       neighbourhood (--help | --version)

Options:
    -b, --batch                  Analyze every dataset of two directories.
    -k, --knn=<k>                Number of neighbors for k-NN [default: 5].
    --knn-limits=<limits>        Safe, borderline and rare lower limits of the
                                 same-class neighbor count [default: 4,2,1].
    --kernel-limits=<limits>     Safe, borderline and rare lower limits (strict)
                                 of the kernel density ratio [default: 0.7,0.3,0.1].
    -m, --mutual                 Confirm rare examples by checking mutual
                                 nearest neighbors.
    -d, --delimiter=<c>          Column separator of data files [default: ,].
    -h, --help                   Show help.
    --version                    Show the version.
";

#[derive(Deserialize)]
struct Args {
    flag_batch: bool,
    flag_knn: usize,
    flag_knn_limits: String,
    flag_kernel_limits: String,
    flag_mutual: bool,
    flag_delimiter: String,
    arg_metadata: String,
    arg_data: String,
    arg_results_dir: String,
}

/// Parses comma separated safe, borderline and rare limits.
fn parse_limits<T: FromStr>(limits: &str) -> anyhow::Result<(T, T, T)> {
    let values = limits.split(',')
                       .map(|l| l.trim().parse::<T>()
                                 .map_err(|_| anyhow!("invalid limit {:?}", l)))
                       .collect::<anyhow::Result<Vec<_>>>()?;

    match <[T; 3]>::try_from(values) {
        Ok([safe, borderline, rare]) => Ok((safe, borderline, rare)),
        Err(_) => bail!("expected three limits, got {:?}", limits),
    }
}

fn parse_delimiter(delimiter: &str) -> anyhow::Result<u8> {
    match delimiter {
        "\\t" | "tab" => Ok(b'\t'),
        d if d.len() == 1 => Ok(d.as_bytes()[0]),
        d => bail!("delimiter must be a single character, got {:?}", d),
    }
}

fn config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let (safe, borderline, rare) = parse_limits(&args.flag_knn_limits)
                                       .context("Failed to parse --knn-limits")?;
    let knn = KnnParams { k: args.flag_knn, safe, borderline, rare };

    let (safe, borderline, rare) = parse_limits(&args.flag_kernel_limits)
                                       .context("Failed to parse --kernel-limits")?;
    let kernel = KernelParams { safe, borderline, rare, ..Default::default() };

    let knn_rule = if args.flag_mutual {
        KnnRule::MutualNeighbour
    } else {
        KnnRule::SameClassCount
    };

    Ok(AnalysisConfig { knn, kernel, knn_rule })
}

/// Analyzes one dataset and stores its results into `results_dir`.
fn analyze(metadata: &Path, data: &Path, results_dir: &Path, config: AnalysisConfig,
           delimiter: u8) -> anyhow::Result<AnalysisResults> {
    let table = load_table(metadata, data, delimiter)
                    .with_context(|| format!("Failed to load {}", data.display()))?;
    info!("loaded {} objects, {} attributes, {} classes from {}",
          table.n_objects(), table.n_attributes(), table.classes().len(), data.display());

    let results = NeighbourhoodAnalysis::new(&table, config)?
                                        .run()?;

    store_results(&results, results_dir)
        .with_context(|| format!("Failed to store results into {}", results_dir.display()))?;
    Ok(results)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse args from command line.
    let args: Args = Docopt::new(USAGE)
                            .map(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string())))
                            .and_then(|d| d.deserialize())
                            .unwrap_or_else(|e| e.exit());

    let config = config(&args)?;
    let delimiter = parse_delimiter(&args.flag_delimiter)?;
    let results_dir = Path::new(&args.arg_results_dir);

    if !args.flag_batch {
        analyze(Path::new(&args.arg_metadata), Path::new(&args.arg_data), results_dir,
                config, delimiter)?;
        return Ok(());
    }

    let pairs = dataset_pairs(&args.arg_metadata, &args.arg_data)
                    .context("Failed to list datasets")?;
    fs::create_dir_all(results_dir)?;
    info!("{} datasets found", pairs.len());

    let mut summaries: BTreeMap<Family, Vec<SummaryRow>> = BTreeMap::new();
    for (name, metadata, data) in pairs {
        // A broken dataset does not stop the batch.
        match analyze(&metadata, &data, &results_dir.join(&name), config, delimiter) {
            Ok(results) => {
                for result in results.iter() {
                    summaries.entry(result.family())
                             .or_default()
                             .push(result.distribution().summary(&name));
                }
            }
            Err(e) => error!("{}: {:#}", name, e),
        }
    }

    for family in Family::ALL.iter() {
        let rows = summaries.get(family).map(Vec::as_slice).unwrap_or(&[]);
        let path = results_dir.join(format!("summary_{}.csv", family.name()));
        store_summary(rows, &path)
            .with_context(|| format!("Failed to store {}", path.display()))?;
    }

    Ok(())
}
