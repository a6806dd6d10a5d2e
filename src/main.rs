mod config;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use serde::Serialize;

use config::DemoConfig;
use rusty_dataset::{class_counts, filter_by_class, ClassCounts, Dataset, SplitSizes, WriteOptions};

/// Everything the demo reports, for `--json`.
#[derive(Serialize)]
struct Summary<'a> {
    header: Option<&'a [String]>,
    rows: usize,
    split: SplitSizes,
    class_counts: ClassCounts,
    class: &'a str,
    selected: usize,
    output: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cfg = DemoConfig::parse();

    let mut dataset = Dataset::new();
    if let Err(err) = dataset.load(&cfg.input, &cfg.load_options()) {
        // Not fatal: carry on with whatever the dataset holds (nothing).
        warn!("continuing without data: {err}");
    }

    let split = dataset.split(cfg.ratios());
    let counts = class_counts(dataset.rows(), cfg.class_index);
    let selected = filter_by_class(dataset.rows(), &cfg.class);

    if let Some(dir) = cfg.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    dataset
        .write_subset(&selected, &cfg.output, &WriteOptions::default())
        .with_context(|| format!("saving class {} subset", cfg.class))?;

    if cfg.json {
        let summary = Summary {
            header: dataset.header().columns(),
            rows: dataset.len(),
            split: split.sizes(),
            class_counts: counts,
            class: &cfg.class,
            selected: selected.len(),
            output: cfg.output.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Header of the dataset");
    println!("{}", dataset.header());
    println!("Body of the dataset");
    for row in dataset.body(0, -1) {
        println!("{}", row.join(", "));
    }

    let sizes = split.sizes();
    println!(
        "Split: {} rows -> train {}, validate {}, test {}",
        dataset.len(),
        sizes.train,
        sizes.validate,
        sizes.test
    );

    println!("Decision class countability");
    for (class, count) in counts.iter() {
        println!("  {class}: {count}");
    }

    println!("Dataset based on decision class {}", cfg.class);
    for row in &selected {
        println!("{}", row.join(", "));
    }
    println!("Saved {} rows to {}", selected.len(), cfg.output.display());

    Ok(())
}
