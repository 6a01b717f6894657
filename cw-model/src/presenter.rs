use crate::{SeriesBuilder, compute};
use cw_core::{
    models::{Chart, ChartLayout, LinearDemand, Scenario, Slope, SlopeRange, Summary, SurplusResult},
    ports::{ChartHost, SummaryHost},
};
use tracing::{Level, event, span};

/// Everything displayed for one position of the slope control.
///
/// A frame is rebuilt from scratch on every change and shares nothing with
/// the frame it replaces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    /// The slope after the boundary guard
    pub slope: Slope,
    /// The demand curve through the pivot
    pub demand: LinearDemand,
    /// The computed surpluses
    pub result: SurplusResult,
    /// The numeric display
    pub summary: Summary,
    /// The chart
    pub chart: Chart,
}

/// The adapter between a slope control and the hosts that display a frame.
///
/// The presenter holds only immutable configuration. Every call recomputes
/// from the raw control value, so presenters can be shared freely.
#[derive(Clone, Debug, Default)]
pub struct Presenter {
    scenario: Scenario,
    range: SlopeRange,
    builder: SeriesBuilder,
}

impl Presenter {
    /// Create a presenter for a scenario, slope control and sampling density
    pub fn new(scenario: Scenario, range: SlopeRange, builder: SeriesBuilder) -> Self {
        Self {
            scenario,
            range,
            builder,
        }
    }

    /// The scenario constants
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The slope control
    pub fn range(&self) -> &SlopeRange {
        &self.range
    }

    /// Build the frame for a raw control value.
    ///
    /// The raw value is clamped and snapped onto the control's grid before
    /// anything is computed, so no input can reach the model with a
    /// non-positive slope.
    pub fn frame(&self, raw_slope: f64) -> Frame {
        if !self.range.contains(raw_slope) {
            event!(
                Level::WARN,
                raw_slope,
                min = self.range.min().value(),
                max = self.range.max().value(),
                "slope outside the control range, clamping"
            );
        }
        self.frame_at(self.range.clamp(raw_slope))
    }

    /// Build the frame for an already validated slope, bypassing the control's grid
    pub fn frame_at(&self, slope: Slope) -> Frame {
        let demand = LinearDemand::through(&self.scenario, slope);
        let result = compute(&self.scenario, slope);
        let series = self.builder.build(&self.scenario, &demand, &result);

        Frame {
            slope,
            demand,
            result,
            summary: Summary::new(demand, &result),
            chart: Chart {
                layout: ChartLayout::for_scenario(&self.scenario),
                series,
            },
        }
    }

    /// Build the frame for a raw control value and push it to both hosts.
    ///
    /// Both hosts are redrawn unconditionally; the summary goes first.
    pub fn present<C: ChartHost, T: SummaryHost>(
        &self,
        raw_slope: f64,
        chart_host: &mut C,
        summary_host: &mut T,
    ) -> Result<Frame, PresentError<C::Error, T::Error>>
    where
        C::Error: 'static,
        T::Error: 'static,
    {
        let span = span!(Level::INFO, "present", raw_slope);
        let _guard = span.enter();

        let frame = self.frame(raw_slope);
        summary_host
            .show(&frame.summary)
            .map_err(PresentError::Summary)?;
        chart_host.draw(&frame.chart).map_err(PresentError::Chart)?;
        Ok(frame)
    }

    /// Like [`Presenter::present`], for a single host that displays both the summary and the chart
    pub fn present_to<H: ChartHost + SummaryHost>(
        &self,
        raw_slope: f64,
        host: &mut H,
    ) -> Result<Frame, PresentError<<H as ChartHost>::Error, <H as SummaryHost>::Error>>
    where
        <H as ChartHost>::Error: 'static,
        <H as SummaryHost>::Error: 'static,
    {
        let span = span!(Level::INFO, "present", raw_slope);
        let _guard = span.enter();

        let frame = self.frame(raw_slope);
        host.show(&frame.summary).map_err(PresentError::Summary)?;
        host.draw(&frame.chart).map_err(PresentError::Chart)?;
        Ok(frame)
    }

    /// Evaluate every stop of the slope control, in ascending order
    pub fn sweep(&self) -> impl Iterator<Item = (Slope, SurplusResult)> + '_ {
        self.range
            .stops()
            .map(|slope| (slope, compute(&self.scenario, slope)))
    }
}

/// Errors raised by the hosts while presenting a frame
#[derive(Debug, thiserror::Error)]
pub enum PresentError<C: std::error::Error + 'static, T: std::error::Error + 'static> {
    /// The chart host failed to draw
    #[error("chart host failed: {0}")]
    Chart(#[source] C),
    /// The summary host failed to display
    #[error("summary host failed: {0}")]
    Summary(#[source] T),
}
