use cw_core::models::{
    Dash, LinearDemand, PlotSeries, Point, Scenario, Series, SeriesId, SurplusResult,
};
use tracing::{Level, event};

const SURPLUS_OPACITY: f64 = 0.4;
const ADDITIONAL_COLOR: &str = "purple";
const ADDITIONAL_GROUP: &str = "additional_surplus";

/// `len` evenly spaced values from `start` to `end`, both included.
///
/// The iterator is finite, restartable (it is `Clone`) and double-ended.
/// The last value is exactly `end`, so sampled series span their interval
/// without accumulated rounding at the far end.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    end: f64,
    len: usize,
    front: usize,
    back: usize,
}

/// Construct a [`Linspace`]
pub fn linspace(start: f64, end: f64, len: usize) -> Linspace {
    Linspace {
        start,
        end,
        len,
        front: 0,
        back: len,
    }
}

impl Linspace {
    fn at(&self, i: usize) -> f64 {
        if i + 1 == self.len && self.len > 1 {
            self.end
        } else if i == 0 {
            self.start
        } else {
            self.start + (self.end - self.start) * (i as f64 / (self.len - 1) as f64)
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front < self.back {
            let value = self.at(self.front);
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Linspace {
    fn next_back(&mut self) -> Option<f64> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.at(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Linspace {}

/// Sampling density of the series builder.
///
/// `demand_samples` points trace the demand line over the whole quantity
/// axis; `region_samples` points trace the curved edge of each surplus region.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SamplingDto", into = "SamplingDto")
)]
pub struct SeriesBuilder {
    demand_samples: usize,
    region_samples: usize,
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self {
            demand_samples: 400,
            region_samples: 200,
        }
    }
}

impl SeriesBuilder {
    /// Creates a new builder, requiring at least two samples per curve
    pub fn new(demand_samples: usize, region_samples: usize) -> Result<Self, SamplingError> {
        Self::try_from(SamplingDto {
            demand_samples,
            region_samples,
        })
    }

    /// Samples along the demand line
    pub fn demand_samples(&self) -> usize {
        self.demand_samples
    }

    /// Samples along the curved edge of a surplus region
    pub fn region_samples(&self) -> usize {
        self.region_samples
    }

    /// The demand line sampled over `[0, max_quantity]` as `(Q, P)` pairs
    pub fn demand_points<'a>(
        &self,
        demand: &'a LinearDemand,
        max_quantity: f64,
    ) -> impl DoubleEndedIterator<Item = Point> + ExactSizeIterator + Clone + 'a {
        linspace(0.0, max_quantity, self.demand_samples).map(move |q| Point {
            quantity: q,
            price: demand.price_at(q),
        })
    }

    /// The region between the demand curve and a horizontal price line over
    /// `[q0, q1]`: the curve traced forward, then the price line backward.
    fn region_under(&self, demand: &LinearDemand, q0: f64, q1: f64, price: f64) -> Vec<Point> {
        let qs = linspace(q0, q1, self.region_samples);
        let mut points = Vec::with_capacity(2 * qs.len());
        points.extend(qs.clone().map(|q| Point {
            quantity: q,
            price: demand.price_at(q),
        }));
        points.extend(qs.rev().map(|q| Point { quantity: q, price }));
        points
    }

    /// Build every series of the chart for one result.
    ///
    /// The triangle of additional surplus is only emitted when the new
    /// quantity exceeds the original one; the numeric result is untouched.
    pub fn build(
        &self,
        scenario: &Scenario,
        demand: &LinearDemand,
        result: &SurplusResult,
    ) -> PlotSeries {
        let q_eq = scenario.original_quantity();
        let p_eq = scenario.original_price();
        let p_new = scenario.new_price();
        let q_max = scenario.max_quantity();
        let q_new = result.new_quantity;

        let mut series = PlotSeries::default();

        series.insert(
            SeriesId::Demand,
            Series::line(
                SeriesId::Demand.label(),
                self.demand_points(demand, q_max).collect(),
            ),
        );

        series.insert(
            SeriesId::OriginalPrice,
            Series::line(
                SeriesId::OriginalPrice.label(),
                vec![(0.0, p_eq).into(), (q_max, p_eq).into()],
            )
            .stroked(None, Dash::Dash),
        );

        series.insert(
            SeriesId::NewPrice,
            Series::line(
                SeriesId::NewPrice.label(),
                vec![(0.0, p_new).into(), (q_max, p_new).into()],
            )
            .stroked(Some(ADDITIONAL_COLOR), Dash::Dot),
        );

        series.insert(
            SeriesId::OriginalSurplus,
            Series::region(
                SeriesId::OriginalSurplus.label(),
                self.region_under(demand, 0.0, q_eq, p_eq),
            )
            .with_opacity(SURPLUS_OPACITY),
        );

        series.insert(
            SeriesId::AdditionalSurplusRectangle,
            Series::region(
                SeriesId::AdditionalSurplusRectangle.label(),
                vec![
                    (0.0, p_eq).into(),
                    (q_eq, p_eq).into(),
                    (q_eq, p_new).into(),
                    (0.0, p_new).into(),
                ],
            )
            .filled(ADDITIONAL_COLOR)
            .stroked(Some(ADDITIONAL_COLOR), Dash::Solid)
            .with_opacity(SURPLUS_OPACITY)
            .grouped(ADDITIONAL_GROUP, true),
        );

        if q_new > q_eq {
            series.insert(
                SeriesId::AdditionalSurplusTriangle,
                Series::region(
                    SeriesId::AdditionalSurplusTriangle.label(),
                    self.region_under(demand, q_eq, q_new, p_new),
                )
                .filled(ADDITIONAL_COLOR)
                .stroked(Some(ADDITIONAL_COLOR), Dash::Solid)
                .with_opacity(SURPLUS_OPACITY)
                // the rectangle already carries the legend entry for this group
                .grouped(ADDITIONAL_GROUP, false),
            );
        }

        event!(Level::TRACE, series = series.len(), "built plot series");
        series
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct SamplingDto {
    /// Samples along the demand line (at least 2)
    pub demand_samples: usize,
    /// Samples along the curved edge of a surplus region (at least 2)
    pub region_samples: usize,
}

impl From<SeriesBuilder> for SamplingDto {
    fn from(value: SeriesBuilder) -> Self {
        Self {
            demand_samples: value.demand_samples,
            region_samples: value.region_samples,
        }
    }
}

impl TryFrom<SamplingDto> for SeriesBuilder {
    type Error = SamplingError;

    fn try_from(value: SamplingDto) -> Result<Self, Self::Error> {
        if value.demand_samples < 2 {
            return Err(SamplingError::TooFew("demand_samples", value.demand_samples));
        }
        if value.region_samples < 2 {
            return Err(SamplingError::TooFew("region_samples", value.region_samples));
        }
        Ok(Self {
            demand_samples: value.demand_samples,
            region_samples: value.region_samples,
        })
    }
}

/// Errors that can occur when creating or validating a SeriesBuilder
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SamplingError {
    /// Error when a curve would be sampled at fewer than two points
    #[error("{0} must be at least 2, got {1}")]
    TooFew(&'static str, usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        let values = linspace(0.0, 40.0, 400).collect::<Vec<_>>();
        assert_eq!(values.len(), 400);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[399], 40.0);
    }

    #[test]
    fn linspace_degenerate() {
        assert_eq!(linspace(3.0, 7.0, 0).count(), 0);
        assert_eq!(linspace(3.0, 7.0, 1).collect::<Vec<_>>(), vec![3.0]);
        assert_eq!(linspace(3.0, 7.0, 2).collect::<Vec<_>>(), vec![3.0, 7.0]);
        assert_eq!(linspace(3.0, 3.0, 3).collect::<Vec<_>>(), vec![3.0; 3]);
    }

    #[test]
    fn linspace_reverses() {
        let forward = linspace(0.0, 1.0, 5).collect::<Vec<_>>();
        let mut backward = linspace(0.0, 1.0, 5).rev().collect::<Vec<_>>();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn linspace_is_restartable() {
        let space = linspace(0.0, 2.0, 3);
        let a = space.clone().collect::<Vec<_>>();
        let b = space.collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn linspace_meets_in_the_middle() {
        let mut space = linspace(0.0, 4.0, 5);
        assert_eq!(space.next(), Some(0.0));
        assert_eq!(space.next_back(), Some(4.0));
        assert_eq!(space.len(), 3);
        assert_eq!(space.next_back(), Some(3.0));
        assert_eq!(space.next(), Some(1.0));
        assert_eq!(space.next(), Some(2.0));
        assert_eq!(space.next(), None);
        assert_eq!(space.next_back(), None);
    }

    #[test]
    fn sampling_validation() {
        assert!(SeriesBuilder::new(2, 2).is_ok());
        assert_eq!(
            SeriesBuilder::new(1, 200).unwrap_err(),
            SamplingError::TooFew("demand_samples", 1)
        );
        assert_eq!(
            SeriesBuilder::new(400, 0).unwrap_err(),
            SamplingError::TooFew("region_samples", 0)
        );
    }
}
