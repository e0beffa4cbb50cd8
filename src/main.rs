//! FX Rate Feed CLI
//!
//! Reads a fixed-width exchange rate feed and writes the admitted detail
//! records as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- I_171021_T057.sw0 > rates.csv
//! cargo run -- /var/feeds/ > rates.csv   # picks the latest feed file
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use fx_rate_feed::{latest_in_dir, FeedError, FeedProcessor, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(FeedError::MissingArgument);
    }

    let mut input_path = PathBuf::from(&args[1]);
    if input_path.is_dir() {
        input_path = latest_in_dir(&input_path)?;
    }

    info!("Processing exchange rates file {}", input_path.display());
    let file = File::open(&input_path)?;
    let reader = BufReader::new(file);

    let outcome = FeedProcessor::new().process_reader(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    outcome.write_output(handle)?;

    Ok(())
}
