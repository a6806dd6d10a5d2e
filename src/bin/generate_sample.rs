use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv::{Terminator, WriterBuilder};
use log::info;

/// Deterministic splitmix64 stream; the same seed always yields the same file.
struct SampleRng(u64);

impl SampleRng {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample via Box-Muller.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic wine-style CSV for the demo", long_about = None)]
struct Args {
    /// Destination file
    #[arg(default_value = "input/wine.csv")]
    output: PathBuf,

    /// Seed for the value generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const COLUMNS: [&str; 6] = [
    "class",
    "alcohol",
    "malic_acid",
    "ash",
    "magnesium",
    "color_intensity",
];

/// Per-class (mean, std) for every measured column, loosely after the UCI wine data.
const PROFILES: [(&str, usize, [(f64, f64); 5]); 3] = [
    ("1", 59, [(13.7, 0.46), (2.01, 0.69), (2.46, 0.23), (106.3, 10.5), (5.5, 1.2)]),
    ("2", 71, [(12.3, 0.54), (1.93, 1.02), (2.24, 0.32), (94.5, 16.8), (3.1, 0.9)]),
    ("3", 48, [(13.2, 0.53), (3.33, 1.09), (2.44, 0.18), (99.3, 10.9), (7.4, 2.3)]),
];

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let output_path = args.output;
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SampleRng(args.seed);
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    writer.write_record(COLUMNS)?;
    let mut written = 0usize;
    for (class, count, stats) in &PROFILES {
        for _ in 0..*count {
            let mut record = vec![class.to_string()];
            for &(mean, std_dev) in stats {
                let value = rng.gauss(mean, std_dev).max(0.0);
                record.push(format!("{value:.2}"));
            }
            writer.write_record(&record)?;
            written += 1;
        }
    }
    writer.flush().context("flushing sample file")?;

    info!("generated {written} rows");
    println!(
        "Wrote {written} rows ({} columns) to {}",
        COLUMNS.len(),
        output_path.display()
    );
    Ok(())
}
