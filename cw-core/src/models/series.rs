use crate::models::Point;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// The drawable series of one frame, keyed by role, in drawing order.
///
/// Hosts paint series in insertion order, so later regions cover earlier ones
/// and the legend lists entries in the same order. Read access goes through
/// the underlying `IndexMap`; series are only ever added, never removed.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(transparent))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PlotSeries(IndexMap<SeriesId, Series, FxBuildHasher>);

impl PlotSeries {
    /// Add a series to be drawn above the ones already present.
    ///
    /// A series inserted under an existing id replaces it in place.
    pub fn insert(&mut self, id: SeriesId, series: Series) -> Option<Series> {
        self.0.insert(id, series)
    }

    /// The series that ask for a legend entry, with their drawing position
    pub fn legend_entries(&self) -> impl Iterator<Item = (usize, &Series)> {
        self.0
            .values()
            .enumerate()
            .filter(|(_, series)| series.show_legend)
    }
}

impl std::ops::Deref for PlotSeries {
    type Target = IndexMap<SeriesId, Series, FxBuildHasher>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a PlotSeries {
    type Item = (&'a SeriesId, &'a Series);
    type IntoIter = indexmap::map::Iter<'a, SeriesId, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(SeriesId, Series)> for PlotSeries {
    fn from_iter<I: IntoIterator<Item = (SeriesId, Series)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

/// The semantic role of a series on the chart
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SeriesId {
    /// The demand curve across the whole quantity axis
    Demand,
    /// The horizontal line at the original price
    OriginalPrice,
    /// The horizontal line at the new price
    NewPrice,
    /// The region between the demand curve and the original price
    OriginalSurplus,
    /// The surplus gained on the units already purchased
    AdditionalSurplusRectangle,
    /// The surplus gained on the additional units purchased
    AdditionalSurplusTriangle,
}

impl SeriesId {
    /// The human-readable name shown in the legend
    pub fn label(self) -> &'static str {
        match self {
            Self::Demand => "Demand",
            Self::OriginalPrice => "Original Price",
            Self::NewPrice => "New Price",
            Self::OriginalSurplus => "Original Consumer Surplus",
            Self::AdditionalSurplusRectangle | Self::AdditionalSurplusTriangle => {
                "Additional Consumer Surplus"
            }
        }
    }
}

/// How the points of a series are to be interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SeriesKind {
    /// An open polyline
    Line,
    /// A polygon, implicitly closed from the last point back to the first, and filled
    Region,
}

/// The dash pattern of a stroke
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Dash {
    /// A continuous stroke
    #[default]
    Solid,
    /// Long dashes
    Dash,
    /// Dots
    Dot,
}

/// Stroke hints. A missing colour leaves the choice to the host's palette.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// A CSS colour
    pub color: Option<String>,
    /// The dash pattern
    pub dash: Dash,
}

/// Fill hints for regions. A missing colour leaves the choice to the host's palette.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fill {
    /// A CSS colour
    pub color: Option<String>,
}

/// A labelled polyline or polygon with its rendering hints.
///
/// The hints are presentation metadata for the chart host, not computed values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Series {
    /// The legend label
    pub label: String,
    /// Polyline or filled polygon
    pub kind: SeriesKind,
    /// The vertices, in drawing order
    pub points: Vec<Point>,
    /// The outline
    pub stroke: Stroke,
    /// The interior, for regions
    pub fill: Option<Fill>,
    /// Opacity of the whole series, in `[0, 1]`
    pub opacity: f64,
    /// Whether the series gets its own legend entry
    pub show_legend: bool,
    /// Series sharing a group toggle together in the legend
    pub legend_group: Option<String>,
}

impl Series {
    /// An opaque, solid polyline with a legend entry
    pub fn line(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            kind: SeriesKind::Line,
            points,
            stroke: Stroke::default(),
            fill: None,
            opacity: 1.0,
            show_legend: true,
            legend_group: None,
        }
    }

    /// An opaque polygon filled with the host's palette colour, with a legend entry
    pub fn region(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            kind: SeriesKind::Region,
            fill: Some(Fill::default()),
            ..Self::line(label, points)
        }
    }

    /// Set the stroke colour and dash pattern
    pub fn stroked(mut self, color: Option<&str>, dash: Dash) -> Self {
        self.stroke = Stroke {
            color: color.map(str::to_owned),
            dash,
        };
        self
    }

    /// Set the fill colour (regions only)
    pub fn filled(mut self, color: &str) -> Self {
        if self.kind == SeriesKind::Region {
            self.fill = Some(Fill {
                color: Some(color.to_owned()),
            });
        }
        self
    }

    /// Set the opacity
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Place the series in a legend group, optionally suppressing its own entry
    pub fn grouped(mut self, group: &str, show_legend: bool) -> Self {
        self.legend_group = Some(group.to_owned());
        self.show_legend = show_legend;
        self
    }
}
