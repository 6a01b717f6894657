use super::OutputArgs;
use clap::{Args, Subcommand};
use cw_model::Presenter;

mod chart;
mod sweep;

pub use chart::{ChartFormat, ChartFormatError};
pub use sweep::{SweepRecord, sweep};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the demand equation and the consumer surplus figures for one slope
    Summary {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Print the introductory text before the figures
        #[arg(long)]
        intro: bool,
    },

    /// Draw the chart for one slope and export it to a standard format
    Chart {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        io: OutputArgs,

        /// The file format to use (if omitted, will infer based on filename)
        #[arg(short, long)]
        format: Option<ChartFormat>,
    },

    /// Evaluate every stop of the slope control and report the surpluses
    Sweep {
        /// Override the configured new price
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        new_price: Option<f64>,

        #[command(flatten)]
        io: OutputArgs,
    },

    /// Write the JSON schema of the exported chart
    Schema {
        #[command(flatten)]
        io: OutputArgs,
    },
}

// The position of the slope control, plus the one scenario constant worth varying per run
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// The slope of the demand curve (clamped and snapped onto the control's grid)
    #[arg(short, long, allow_negative_numbers = true)]
    pub slope: Option<f64>,

    /// Override the configured new price
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pub new_price: Option<f64>,
}

impl ScenarioArgs {
    /// The raw control value, falling back to the control's default
    pub fn raw_slope(&self, presenter: &Presenter) -> f64 {
        self.slope
            .unwrap_or_else(|| presenter.range().default_slope().value())
    }
}
