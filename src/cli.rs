use anyhow::Result;
use clap::{Parser, Subcommand};
use compute::DEFAULT_DATA_SOURCE;

pub mod commands;

use commands::{serve, summary};

use crate::config::DEFAULT_BIND_ADDRESS;

#[derive(Parser)]
#[command(name = "loadchart")]
#[command(about = "Interactive daily energy load chart for five zones")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// CSV dataset to chart
        ///
        /// Either a local file path or an http(s) URL. The CSV needs a header
        /// row with at least `datetime, zone_1, zone_2, zone_3, zone_4, zone_5`.
        ///
        /// Examples:
        ///   ./data/dailyload5zone.csv
        ///   https://example.org/dailyload5zone.csv
        #[arg(short, long, env = "DATA_SOURCE", default_value = DEFAULT_DATA_SOURCE)]
        data_source: String,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:8050, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,
    },
    /// Load the dataset and print its coverage and per-zone statistics
    Summary {
        /// CSV dataset, a local file path or an http(s) URL
        #[arg(short, long, env = "DATA_SOURCE", default_value = DEFAULT_DATA_SOURCE)]
        data_source: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { data_source, bind_address } => {
                serve(&data_source, &bind_address).await?;
            }
            Commands::Summary { data_source } => {
                summary(&data_source).await?;
            }
        }
        Ok(())
    }
}
