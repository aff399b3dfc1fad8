use clap::Parser;
use log::{error, info};
use std::process;

use datumaro_summary::{process_dataset, Args};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Starting the summary process...");

    match process_dataset(&args) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            error!("Failed to summarize annotations: {}", e);
            process::exit(1);
        }
    }
}
