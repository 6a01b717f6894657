use crate::models::{Scenario, Slope};
use std::fmt;

/// A linear demand curve `P(Q) = b - s·Q` with a strictly positive slope `s`.
///
/// The curve is never stored by the visualizer; it is derived from the
/// current slope and the scenario's pivot on every recomputation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearDemand {
    intercept: f64,
    slope: Slope,
}

impl LinearDemand {
    /// The demand curve with the given slope passing through `(quantity, price)`
    pub fn pivoting(slope: Slope, quantity: f64, price: f64) -> Self {
        Self {
            intercept: price + slope.value() * quantity,
            slope,
        }
    }

    /// The demand curve with the given slope passing through the scenario's original bundle
    pub fn through(scenario: &Scenario, slope: Slope) -> Self {
        Self::pivoting(
            slope,
            scenario.original_quantity(),
            scenario.original_price(),
        )
    }

    /// The price-axis intercept `b`
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// The slope `s`
    pub fn slope(&self) -> Slope {
        self.slope
    }

    /// The price at which `quantity` units are demanded
    pub fn price_at(&self, quantity: f64) -> f64 {
        self.intercept - self.slope.value() * quantity
    }

    /// The quantity demanded at `price`
    pub fn quantity_at(&self, price: f64) -> f64 {
        (self.intercept - price) / self.slope.value()
    }

    /// The definite integral of `P(Q)` from `q0` to `q1`
    pub fn integral(&self, q0: f64, q1: f64) -> f64 {
        self.intercept * (q1 - q0) - 0.5 * self.slope.value() * (q1 * q1 - q0 * q0)
    }
}

// Renders as `P = 60.0 – 1.0·Q`, honoring a requested precision for both coefficients.
impl fmt::Display for LinearDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.slope.value();
        match f.precision() {
            Some(p) => write!(f, "P = {:.p$} – {:.p$}·Q", self.intercept, s),
            None => write!(f, "P = {} – {}·Q", self.intercept, s),
        }
    }
}
