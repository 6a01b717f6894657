use clap::Parser;
use cw_core::{models::Chart, ports::SummaryHost as _};
use cw_model::{Introduction, export::TextWriter};
use std::{io::Write, path::PathBuf};
use tracing::{Level, event};

mod config;
pub use config::AppConfig;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments: where the configuration lives, and which subcommand to execute
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CW_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Summary { scenario, intro } => {
                let presenter = config.with_new_price(scenario.new_price)?.presenter();
                let frame = presenter.frame(scenario.raw_slope(&presenter));

                let mut output = std::io::stdout().lock();
                if intro {
                    writeln!(output, "{}", Introduction::for_scenario(presenter.scenario()))?;
                }
                TextWriter(&mut output).show(&frame.summary)?;
                output.flush()?;
            }
            Commands::Chart {
                scenario,
                io,
                format,
            } => {
                let format = io.chart_format(format)?;
                let presenter = config.with_new_price(scenario.new_price)?.presenter();
                let output = io.write()?;
                let (frame, mut output) =
                    format.render(&presenter, scenario.raw_slope(&presenter), output)?;
                output.flush()?;
                event!(Level::DEBUG, slope = frame.slope.value(), ?format, "wrote chart");
            }
            Commands::Sweep { new_price, io } => {
                let presenter = config.with_new_price(new_price)?.presenter();
                let mut output = io.write()?;
                let count = sweep(&presenter, &mut output)?;
                output.flush()?;
                event!(Level::DEBUG, count, "wrote sweep");
            }
            Commands::Schema { io } => {
                let schema = schemars::schema_for!(Chart);
                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &schema)?;
                writeln!(output)?;
                output.flush()?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Unable to infer chart format, please specify a valid format")]
    FormatInference,
}
