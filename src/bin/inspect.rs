//! Load a CSV and print a channel-set summary.
//!
//! Usage: `inspect <file.csv> <x_cols> <y_cols> [delimiter]`
//! where `x_cols` and `y_cols` are comma-separated column names.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use channelset::{CsvOptions, load_csv};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 || args.len() > 4 {
        bail!("usage: inspect <file.csv> <x_cols> <y_cols> [delimiter]");
    }
    let path = PathBuf::from(&args[0]);
    let x_cols: Vec<&str> = args[1].split(',').collect();
    let y_cols: Vec<&str> = args[2].split(',').collect();

    let mut options = CsvOptions::default();
    if let Some(d) = args.get(3) {
        options.delimiter = *d.as_bytes().first().context("empty delimiter")?;
    }

    let set = load_csv(&path, &options, &x_cols, &y_cols)?;

    println!("{} channel(s)", set.output_dims());
    for ch in &set {
        let train = ch.train_mask().iter().filter(|&&m| m).count();
        println!(
            "  {:<20} {} rows, {} input dim(s), {} train / {} test",
            ch.name(),
            ch.len(),
            ch.input_dims(),
            train,
            ch.len() - train,
        );
    }
    Ok(())
}
