use crate::models::{Chart, Summary};

/// A collaborator that draws charts, such as a plotting library or a file exporter.
///
/// The host is asked to redraw on every recomputation and must replace
/// whatever it drew before; frames carry no identity across redraws.
pub trait ChartHost {
    /// Error type for drawing failures
    type Error: std::error::Error;

    /// Draw (or redraw) the chart
    fn draw(&mut self, chart: &Chart) -> Result<(), Self::Error>;
}

/// A collaborator that displays the numeric summary as text or markup.
pub trait SummaryHost {
    /// Error type for display failures
    type Error: std::error::Error;

    /// Show (or replace) the numeric summary
    fn show(&mut self, summary: &Summary) -> Result<(), Self::Error>;
}

impl<T: ChartHost + ?Sized> ChartHost for &mut T {
    type Error = T::Error;

    fn draw(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        (**self).draw(chart)
    }
}

impl<T: SummaryHost + ?Sized> SummaryHost for &mut T {
    type Error = T::Error;

    fn show(&mut self, summary: &Summary) -> Result<(), Self::Error> {
        (**self).show(summary)
    }
}
