use crate::models::{PlotSeries, Scenario};

/// A locked axis of the chart
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// The axis title
    pub title: String,
    /// The lower end of the visible range
    pub min: f64,
    /// The upper end of the visible range
    pub max: f64,
    /// Whether the host must refuse to zoom or pan this axis
    pub fixed: bool,
}

/// Legend orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LegendOrientation {
    /// Entries laid out side by side
    #[default]
    Horizontal,
    /// Entries stacked
    Vertical,
}

/// Placement of the legend.
///
/// `x` and `y` locate the top-center of the legend as fractions of the plot
/// area, so a negative `y` puts the legend below the plot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Legend {
    /// Entry layout
    pub orientation: LegendOrientation,
    /// Horizontal anchor position
    pub x: f64,
    /// Vertical anchor position
    pub y: f64,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            orientation: LegendOrientation::Horizontal,
            x: 0.5,
            y: -0.2,
        }
    }
}

/// Everything about the chart that is not a series
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartLayout {
    /// The quantity axis
    pub x_axis: Axis,
    /// The price axis
    pub y_axis: Axis,
    /// The legend placement
    pub legend: Legend,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl ChartLayout {
    /// The 800×600 layout with both axes locked to the scenario's bounds
    pub fn for_scenario(scenario: &Scenario) -> Self {
        Self {
            x_axis: Axis {
                title: "Quantity".to_owned(),
                min: 0.0,
                max: scenario.max_quantity(),
                fixed: true,
            },
            y_axis: Axis {
                title: "Price".to_owned(),
                min: 0.0,
                max: scenario.max_price(),
                fixed: true,
            },
            legend: Legend::default(),
            width: 800,
            height: 600,
        }
    }
}

/// A complete chart: layout plus series
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// Axes, legend and canvas
    pub layout: ChartLayout,
    /// The series, in drawing order
    pub series: PlotSeries,
}
