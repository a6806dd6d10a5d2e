use std::path::PathBuf;

use clap::Parser;

use rusty_dataset::{LoadOptions, SplitRatios, DEFAULT_CLASS_INDEX};

// ---------------------------------------------------------------------------
// Demo configuration
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rusty-dataset")]
#[command(about = "Load a delimited dataset, split it, count classes and save one class", long_about = None)]
pub struct DemoConfig {
    /// Delimited file to load
    #[arg(default_value = "input/wine.csv")]
    pub input: PathBuf,

    /// Where the filtered subset is written
    #[arg(short, long, default_value = "output/dec3.csv")]
    pub output: PathBuf,

    /// Field separator of INPUT
    #[arg(short, long, default_value = ",", value_parser = single_char)]
    pub delimiter: char,

    /// INPUT has no label line
    #[arg(long)]
    pub no_header: bool,

    /// Keep the final line of INPUT as a row
    #[arg(long)]
    pub keep_last_line: bool,

    /// Decision class to filter on
    #[arg(short, long, default_value = "3")]
    pub class: String,

    /// Field counted as decision class
    #[arg(long, default_value_t = DEFAULT_CLASS_INDEX)]
    pub class_index: usize,

    /// Share of rows for training
    #[arg(long, default_value = "0.7", value_parser = finite_fraction)]
    pub train: f64,

    /// Share of rows for validation
    #[arg(long, default_value = "0.1", value_parser = finite_fraction)]
    pub validate: f64,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl DemoConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new()
            .with_header(!self.no_header)
            .with_delimiter(self.delimiter)
            .keep_last_line(self.keep_last_line)
    }

    pub fn ratios(&self) -> SplitRatios {
        SplitRatios::new(self.train, self.validate)
    }
}

fn single_char(raw: &str) -> Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(format!("must be a single character, got {raw:?}")),
    }
}

fn finite_fraction(raw: &str) -> Result<f64, String> {
    let fraction: f64 = raw
        .parse()
        .map_err(|_| format!("{raw:?} is not a number"))?;
    if !fraction.is_finite() {
        return Err(format!("{raw:?} is not a finite number"));
    }
    Ok(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DemoConfig, clap::Error> {
        DemoConfig::try_parse_from(std::iter::once("rusty-dataset").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_follow_the_wine_demo() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.input, PathBuf::from("input/wine.csv"));
        assert_eq!(cfg.output, PathBuf::from("output/dec3.csv"));
        assert_eq!(cfg.class, "3");
        assert_eq!(cfg.class_index, 0);
        assert_eq!(cfg.load_options(), LoadOptions::default());
        assert_eq!(cfg.ratios(), SplitRatios::default());
        assert!(!cfg.json);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "data.txt",
            "-d",
            ";",
            "--no-header",
            "--class",
            "2",
            "--class-index",
            "1",
            "--train",
            "0.6",
            "--validate",
            "0.2",
            "-o",
            "out/two.csv",
            "--json",
        ])
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("data.txt"));
        assert_eq!(cfg.output, PathBuf::from("out/two.csv"));
        let load = cfg.load_options();
        assert_eq!(load.delimiter, ';');
        assert!(!load.has_header);
        assert_eq!(cfg.class, "2");
        assert_eq!(cfg.class_index, 1);
        assert_eq!(cfg.ratios(), SplitRatios::new(0.6, 0.2));
        assert!(cfg.json);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["--delimiter", "ab"]).is_err());
        assert!(parse(&["--train"]).is_err());
        assert!(parse(&["--train", "lots"]).is_err());
        assert!(parse(&["--train", "inf"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
    }
}
