//! `nierodka-sim [config.json] [--batch N]`
//!
//! Runs one session (or `N` sessions on consecutive seeds) and prints the
//! report as JSON on stdout. Logging goes to stderr, filtered by `RUST_LOG`.

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use nierodka_sim::{run, run_batch, BatchSummary, RunConfig};

struct Args {
    config: Option<String>,
    batch: Option<u64>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        batch: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--batch" => {
                let n = iter.next().context("--batch needs a count")?;
                args.batch = Some(n.parse().with_context(|| format!("bad batch count `{n}`"))?);
            }
            flag if flag.starts_with("--") => bail!("unknown flag `{flag}`"),
            path => {
                if args.config.replace(path.to_string()).is_some() {
                    bail!("more than one config file given");
                }
            }
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => RunConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => RunConfig::default(),
    };

    let output = match args.batch {
        None => serde_json::to_value(run(&config)?)?,
        Some(n) => {
            let seeds: Vec<u64> = (0..n).map(|i| config.seed.wrapping_add(i)).collect();
            let reports = run_batch(&seeds, &config)?;
            json!({
                "summary": BatchSummary::from_reports(&reports),
                "runs": reports,
            })
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
