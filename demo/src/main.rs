//! `sk-demo` — run one or all sorting algorithms and print what they recorded.
//!
//! ```text
//! sk-demo [algorithm_id|all] [--save PATH] [--random N] [values...]
//! ```

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sk_common::{AlgorithmKind, EngineConfig};
use sk_executor::{
    ArrayGenerator, ArrayKind, JsonFileStepStore, MemoryStepStore, SortOutcome, SortingExecutor,
    StepStore,
};

const DEFAULT_INPUT: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];

struct Args {
    algorithms: Vec<AlgorithmKind>,
    values: Vec<i64>,
    save_path: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1).peekable();

    let first = args.peek().cloned();
    let algorithms = match first.as_deref() {
        None | Some("all") => {
            args.next();
            AlgorithmKind::ALL.to_vec()
        }
        Some(arg) if arg.starts_with("--") || arg.parse::<i64>().is_ok() => {
            AlgorithmKind::ALL.to_vec()
        }
        Some(id) => {
            args.next();
            vec![id.parse::<AlgorithmKind>()?]
        }
    };

    let mut values = Vec::new();
    let mut save_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--save" => save_path = Some(args.next().context("--save needs a path")?),
            "--random" => {
                let size: usize = args
                    .next()
                    .context("--random needs a size")?
                    .parse()
                    .context("--random size must be a number")?;
                values = ArrayGenerator::from_entropy().generate(ArrayKind::RandomDefault, size)?;
            }
            other => values.push(
                other
                    .parse()
                    .with_context(|| format!("not an integer: {other}"))?,
            ),
        }
    }
    if values.is_empty() {
        values = DEFAULT_INPUT.to_vec();
    }

    Ok(Args {
        algorithms,
        values,
        save_path,
    })
}

fn print_outcome(outcome: &SortOutcome) {
    let stats = &outcome.stats;
    println!(
        "{:<15} {:>5} steps  {:>4} compares  {:>4} swaps  {:>4} moves  -> {:?}",
        outcome.algorithm.display_name(),
        stats.steps,
        stats.comparisons,
        stats.swaps,
        stats.moves,
        outcome.final_values()
    );
    if let Some(err) = &outcome.save_error {
        println!("    warning: {err}");
    }
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let store: Arc<dyn StepStore> = match &args.save_path {
        Some(path) => Arc::new(JsonFileStepStore::new(path)),
        None => Arc::new(MemoryStepStore::new()),
    };
    let executor = SortingExecutor::new(EngineConfig::default(), store);
    let delay = EngineConfig::clamp_delay(executor.config().default_delay_ms);

    println!("Input: {:?}", args.values);
    for kind in &args.algorithms {
        let outcome = executor
            .execute(*kind, &args.values, delay)
            .with_context(|| format!("{} failed", kind.display_name()))?;
        print_outcome(&outcome);

        let mut expected = args.values.clone();
        expected.sort();
        if outcome.final_values() != expected {
            bail!("{} produced an unsorted result", kind.display_name());
        }
    }

    if let Some(path) = &args.save_path {
        println!("Steps of the last run saved to {path}");
    }
    Ok(())
}
