mod chart;
mod demand;
mod point;
mod scenario;
mod series;
mod slope;
mod summary;
mod surplus;

pub use chart::{Axis, Chart, ChartLayout, Legend, LegendOrientation};
pub use demand::LinearDemand;
pub use point::Point;
pub use scenario::{Scenario, ScenarioDto, ScenarioError};
pub use series::{Dash, Fill, PlotSeries, Series, SeriesId, SeriesKind, Stroke};
pub use slope::{Slope, SlopeError, SlopeRange, SlopeRangeDto, SlopeRangeError};
pub use summary::Summary;
pub use surplus::SurplusResult;
