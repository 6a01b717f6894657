use crate::models::{LinearDemand, SurplusResult};
use std::fmt;

/// The numeric display accompanying the chart.
///
/// All values are rendered with one decimal place.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// The demand curve the surpluses were computed for
    pub demand: LinearDemand,
    /// The surplus at the original price
    pub original_surplus: f64,
    /// The change in surplus caused by the price change
    pub additional_surplus: f64,
    /// The surplus at the new price
    pub total_surplus: f64,
}

impl Summary {
    /// Extract the displayed values from a surplus result
    pub fn new(demand: LinearDemand, result: &SurplusResult) -> Self {
        Self {
            demand,
            original_surplus: result.original_surplus,
            additional_surplus: result.additional_surplus,
            total_surplus: result.total_surplus,
        }
    }

    /// The labelled, formatted lines of the display
    pub fn lines(&self) -> [(&'static str, String); 4] {
        [
            ("Demand Curve", format!("{:.1}", self.demand)),
            (
                "Original Consumer Surplus",
                format!("{:.1}", self.original_surplus),
            ),
            (
                "Additional Consumer Surplus",
                format!("{:.1}", self.additional_surplus),
            ),
            (
                "Total Consumer Surplus",
                format!("{:.1}", self.total_surplus),
            ),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.lines() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
