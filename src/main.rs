use anyhow::Result;
use clap::Parser;
use std::process;
use ripple::args::{Cli, Commands};
use ripple::commands;
use ripple::config::RippleConfig;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = RippleConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Dwt(args) => {
            let bands = commands::run_dwt(&args, &config)?;
            for (i, band) in bands.iter().enumerate() {
                println!("band {}: {} coefficients", i + 1, band.len());
            }
        }
        Commands::Peaks(args) => {
            let indices = commands::run_peaks(&args, &config)?;
            if indices.is_empty() {
                println!("No peaks found.");
            }
            for idx in indices {
                println!("{}", idx);
            }
        }
        Commands::Cluster(args) => {
            let clusters = commands::run_cluster(&args)?;
            if clusters.is_empty() {
                println!("No clusters found.");
            }
            for (i, c) in clusters.iter().enumerate() {
                println!("{}, {}", i, c);
            }
        }
        Commands::Config => {
            println!("{}", commands::describe_config(&config, cli.config.as_deref()));
        }
    }

    Ok(())
}
