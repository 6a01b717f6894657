use std::fmt;

/// The slope of a demand curve, i.e. the price decrease per unit of quantity.
///
/// A demand curve must slope downward in (quantity, price) space, so a
/// `Slope` is always finite and strictly positive. Holding a `Slope` is the
/// proof that the surplus computation is well defined.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(transparent))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Slope(f64);

impl Slope {
    /// Creates a new slope, rejecting NaN, infinite and non-positive values
    pub fn new(value: f64) -> Result<Self, SlopeError> {
        Self::try_from(value)
    }

    /// The magnitude of the slope
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Slope {
    type Error = SlopeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            Err(SlopeError::NaN)
        } else if value.is_infinite() {
            Err(SlopeError::Infinity)
        } else if value <= 0.0 {
            Err(SlopeError::NonPositive(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Slope> for f64 {
    fn from(value: Slope) -> Self {
        value.0
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors that can occur when creating a Slope
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SlopeError {
    /// Error when the slope is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when the slope is infinite
    #[error("Slope cannot be infinite")]
    Infinity,
    /// Error when the demand curve would not slope downward
    #[error("Slope must be strictly positive, got {0}")]
    NonPositive(f64),
}

/// The bounded, stepped control that produces slopes.
///
/// This is the boundary guard in front of the surplus computation: any raw
/// value from a slider, a command line or a config file goes through
/// [`SlopeRange::clamp`] and comes out as a valid [`Slope`] on the step grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SlopeRangeDto", into = "SlopeRangeDto")
)]
pub struct SlopeRange {
    min: f64,
    max: f64,
    step: f64,
    default: f64,
}

impl SlopeRange {
    /// Creates a new slope range with validation
    pub fn new(min: f64, max: f64, step: f64, default: f64) -> Result<Self, SlopeRangeError> {
        Self::try_from(SlopeRangeDto {
            min,
            max,
            step,
            default,
        })
    }

    /// The smallest selectable slope
    pub fn min(&self) -> Slope {
        Slope(self.min)
    }

    /// The largest selectable slope
    pub fn max(&self) -> Slope {
        Slope(self.max)
    }

    /// The distance between neighboring stops
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The initial position of the control, on the step grid
    pub fn default_slope(&self) -> Slope {
        Slope(self.default)
    }

    /// Whether the raw value lies within the range (ignoring the step grid)
    pub fn contains(&self, raw: f64) -> bool {
        self.min <= raw && raw <= self.max
    }

    /// Map an arbitrary raw value onto the nearest stop of the range.
    ///
    /// Values outside the range are clamped to its first or last stop, values inside are
    /// snapped to the step grid, and NaN falls back to the default position.
    pub fn clamp(&self, raw: f64) -> Slope {
        if raw.is_nan() {
            return self.default_slope();
        }
        Slope(snap(raw, self.min, self.max, self.step))
    }

    /// The number of stops on the control
    pub fn len(&self) -> usize {
        // validation bounds the count, so this never saturates
        stop_count(self.min, self.max, self.step).unwrap_or(MAX_STOPS)
    }

    /// A range always has at least one stop
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every stop of the control, from `min` upward
    pub fn stops(&self) -> impl ExactSizeIterator<Item = Slope> + Clone + '_ {
        (0..self.len()).map(move |i| Slope(self.min + i as f64 * self.step))
    }
}

// The most stops a control may have
const MAX_STOPS: usize = 100_000;

// The number of steps between min and the last stop
fn intervals(min: f64, max: f64, step: f64) -> f64 {
    // the epsilon absorbs representation error in e.g. 4.5 / 0.1
    ((max - min) / step + 1e-9).floor()
}

// Clamp into [min, max] and round onto the nearest stop `min + k·step`
fn snap(raw: f64, min: f64, max: f64, step: f64) -> f64 {
    let k = ((raw.clamp(min, max) - min) / step)
        .round()
        .min(intervals(min, max, step));
    (min + k * step).min(max)
}

// The number of stops in [min, max], if it does not exceed MAX_STOPS
fn stop_count(min: f64, max: f64, step: f64) -> Option<usize> {
    let intervals = intervals(min, max, step);
    if intervals.is_finite() && intervals < MAX_STOPS as f64 {
        Some(intervals as usize + 1)
    } else {
        None
    }
}

impl Default for SlopeRange {
    /// From 0.5 to 5.0 in steps of 0.1, starting at 1.0
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 5.0,
            step: 0.1,
            default: 1.0,
        }
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct SlopeRangeDto {
    /// The smallest selectable slope (strictly positive)
    pub min: f64,
    /// The largest selectable slope (at least `min`)
    pub max: f64,
    /// The distance between neighboring stops (strictly positive)
    pub step: f64,
    /// The initial position (within `[min, max]`)
    pub default: f64,
}

impl From<SlopeRange> for SlopeRangeDto {
    fn from(value: SlopeRange) -> Self {
        Self {
            min: value.min,
            max: value.max,
            step: value.step,
            default: value.default,
        }
    }
}

impl TryFrom<SlopeRangeDto> for SlopeRange {
    type Error = SlopeRangeError;

    fn try_from(value: SlopeRangeDto) -> Result<Self, Self::Error> {
        let SlopeRangeDto {
            min,
            max,
            step,
            default,
        } = value;

        for x in [min, max, step, default] {
            if x.is_nan() {
                return Err(SlopeRangeError::NaN);
            }
            if x.is_infinite() {
                return Err(SlopeRangeError::Infinity);
            }
        }
        if min <= 0.0 {
            return Err(SlopeRangeError::Slope(SlopeError::NonPositive(min)));
        }
        if max < min {
            return Err(SlopeRangeError::Empty);
        }
        if step <= 0.0 {
            return Err(SlopeRangeError::Step);
        }
        if stop_count(min, max, step).is_none() {
            return Err(SlopeRangeError::TooManyStops);
        }
        if !(min <= default && default <= max) {
            return Err(SlopeRangeError::Default);
        }

        Ok(Self {
            min,
            max,
            step,
            default: snap(default, min, max, step),
        })
    }
}

/// Errors that can occur when creating or validating a SlopeRange
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SlopeRangeError {
    /// Error when any bound is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when any bound is infinite
    #[error("Slope range bounds cannot be infinite")]
    Infinity,
    /// Error when the lower bound is not itself a valid slope
    #[error("invalid lower bound: {0}")]
    Slope(#[from] SlopeError),
    /// Error when the upper bound is below the lower bound
    #[error("Maximum slope is below the minimum slope")]
    Empty,
    /// Error when the step is zero or negative
    #[error("Step must be strictly positive")]
    Step,
    /// Error when the step is so small that the control would have too many stops
    #[error("Step is too small, the range would exceed {MAX_STOPS} stops")]
    TooManyStops,
    /// Error when the default position lies outside the range
    #[error("Default slope lies outside the range")]
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_validation() {
        assert!(Slope::new(1.0).is_ok());
        assert!(Slope::new(f64::MIN_POSITIVE).is_ok());
        assert_eq!(Slope::new(0.0).unwrap_err(), SlopeError::NonPositive(0.0));
        assert_eq!(Slope::new(-2.0).unwrap_err(), SlopeError::NonPositive(-2.0));
        assert_eq!(Slope::new(f64::NAN).unwrap_err(), SlopeError::NaN);
        assert_eq!(Slope::new(f64::INFINITY).unwrap_err(), SlopeError::Infinity);
    }

    #[test]
    fn test_slope_display_precision() {
        let slope = Slope::new(1.27).unwrap();
        assert_eq!(format!("{slope:.1}"), "1.3");
        assert_eq!(format!("{slope}"), "1.27");
    }

    #[test]
    fn test_deserialize_slope() {
        assert_eq!(serde_json::from_str::<Slope>("2.5").unwrap().value(), 2.5);
        assert!(serde_json::from_str::<Slope>("0.0").is_err());
        assert!(serde_json::from_str::<Slope>("-1.0").is_err());
    }

    #[test]
    fn test_default_range() {
        let range = SlopeRange::default();
        assert_eq!(range.min().value(), 0.5);
        assert_eq!(range.max().value(), 5.0);
        assert_eq!(range.default_slope().value(), 1.0);
        assert_eq!(range.len(), 46);
    }

    #[test]
    fn test_clamp_out_of_range() {
        let range = SlopeRange::default();
        assert_eq!(range.clamp(-3.0).value(), 0.5);
        assert_eq!(range.clamp(0.0).value(), 0.5);
        assert_eq!(range.clamp(100.0).value(), 5.0);
        assert_eq!(range.clamp(f64::INFINITY).value(), 5.0);
        assert_eq!(range.clamp(f64::NEG_INFINITY).value(), 0.5);
        assert_eq!(range.clamp(f64::NAN).value(), 1.0);
    }

    #[test]
    fn test_clamp_snaps_to_grid() {
        let range = SlopeRange::default();
        assert!((range.clamp(2.04).value() - 2.0).abs() < 1e-12);
        assert!((range.clamp(2.06).value() - 2.1).abs() < 1e-12);
        assert_eq!(range.clamp(2.0).value(), 2.0);
    }

    #[test]
    fn test_stops() {
        let range = SlopeRange::default();
        let stops = range.stops().map(Slope::value).collect::<Vec<_>>();
        assert_eq!(stops.len(), 46);
        assert_eq!(stops[0], 0.5);
        assert!((stops[45] - 5.0).abs() < 1e-12);
        assert!(stops.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_degenerate_range() {
        let range = SlopeRange::new(2.0, 2.0, 0.5, 2.0).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.clamp(9.0).value(), 2.0);
    }

    #[test]
    fn test_tiny_steps_are_rejected() {
        assert_eq!(
            SlopeRange::new(0.5, 5.0, 1e-300, 1.0).unwrap_err(),
            SlopeRangeError::TooManyStops
        );
        assert_eq!(
            SlopeRange::new(0.5, 5.0, 1e-9, 1.0).unwrap_err(),
            SlopeRangeError::TooManyStops
        );
        assert_eq!(
            SlopeRange::new(f64::MIN_POSITIVE, 1e300, 1.0, 1.0).unwrap_err(),
            SlopeRangeError::TooManyStops
        );

        let fine = SlopeRange::new(0.5, 5.0, 1e-4, 1.0).unwrap();
        assert_eq!(fine.len(), 45_001);
        assert_eq!(fine.stops().len(), 45_001);
    }

    #[test]
    fn test_default_is_snapped_to_grid() {
        let range = SlopeRange::new(0.5, 5.0, 0.1, 1.05).unwrap();
        let default = range.default_slope();
        assert_eq!(default, range.clamp(1.05));
        assert!(range.stops().any(|stop| stop == default));

        let range = SlopeRange::new(0.5, 5.0, 1.0, 5.0).unwrap();
        assert_eq!(range.default_slope().value(), 4.5);
        assert!(range.stops().any(|stop| stop == range.default_slope()));
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(
            SlopeRange::new(0.0, 5.0, 0.1, 1.0).unwrap_err(),
            SlopeRangeError::Slope(SlopeError::NonPositive(0.0))
        );
        assert_eq!(
            SlopeRange::new(5.0, 0.5, 0.1, 1.0).unwrap_err(),
            SlopeRangeError::Empty
        );
        assert_eq!(
            SlopeRange::new(0.5, 5.0, 0.0, 1.0).unwrap_err(),
            SlopeRangeError::Step
        );
        assert_eq!(
            SlopeRange::new(0.5, 5.0, 0.1, 6.0).unwrap_err(),
            SlopeRangeError::Default
        );
        assert_eq!(
            SlopeRange::new(0.5, f64::NAN, 0.1, 1.0).unwrap_err(),
            SlopeRangeError::NaN
        );
    }
}
