// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "foodtrucks")]
#[command(about = "Food truck finder - search approved mobile food permits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Permit CSV file to load
        #[arg(short, long, env = "DATA_PATH")]
        data: Option<PathBuf>,
    },

    /// Search the permit file locally and print JSON results
    Search {
        /// Only vendors whose offerings mention this keyword
        #[arg(short, long)]
        search: Option<String>,

        /// Latitude of the reference point (requires --lon)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the reference point (requires --lat)
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Sort most recently received permits first
        #[arg(long)]
        newest: bool,

        /// Log search diagnostics
        #[arg(long)]
        debug: bool,

        /// Permit CSV file to load
        #[arg(short, long, env = "DATA_PATH")]
        data: Option<PathBuf>,
    },
}
