/// The fixed constants of a consumer surplus scenario.
///
/// A scenario pins the demand curve to the original equilibrium bundle
/// `(original_quantity, original_price)` and describes the price change under
/// study. The chart bounds are part of the scenario because the chart axes are
/// locked to them.
///
/// The new price is unconstrained relative to the original
/// price: a price rise is a valid scenario whose additional surplus is
/// negative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ScenarioDto", into = "ScenarioDto")
)]
pub struct Scenario {
    original_quantity: f64,
    original_price: f64,
    new_price: f64,
    max_quantity: f64,
    max_price: f64,
}

impl Scenario {
    /// Creates a new scenario with validation
    pub fn new(
        original_quantity: f64,
        original_price: f64,
        new_price: f64,
        max_quantity: f64,
        max_price: f64,
    ) -> Result<Self, ScenarioError> {
        Self::try_from(ScenarioDto {
            original_quantity,
            original_price,
            new_price,
            max_quantity,
            max_price,
        })
    }

    /// The quantity purchased at the original price (`Q_eq`)
    pub fn original_quantity(&self) -> f64 {
        self.original_quantity
    }

    /// The price before the change (`P_eq`)
    pub fn original_price(&self) -> f64 {
        self.original_price
    }

    /// The price after the change (`P_new`)
    pub fn new_price(&self) -> f64 {
        self.new_price
    }

    /// The upper bound of the quantity axis (`Q_max`)
    pub fn max_quantity(&self) -> f64 {
        self.max_quantity
    }

    /// The upper bound of the price axis
    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    /// Returns a copy of this scenario with a different new price, revalidated
    pub fn with_new_price(&self, new_price: f64) -> Result<Self, ScenarioError> {
        let mut dto: ScenarioDto = self.clone().into();
        dto.new_price = new_price;
        Self::try_from(dto)
    }
}

impl Default for Scenario {
    /// The bundle (Q = 10, P = 50) with a price drop to 40, drawn on a 40 × 100 canvas
    fn default() -> Self {
        Self {
            original_quantity: 10.0,
            original_price: 50.0,
            new_price: 40.0,
            max_quantity: 40.0,
            max_price: 100.0,
        }
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct ScenarioDto {
    /// The quantity purchased at the original price (strictly positive)
    pub original_quantity: f64,
    /// The original price (strictly positive)
    pub original_price: f64,
    /// The price after the change (finite)
    pub new_price: f64,
    /// The upper bound of the quantity axis (greater than the original quantity)
    pub max_quantity: f64,
    /// The upper bound of the price axis (strictly positive)
    pub max_price: f64,
}

impl From<Scenario> for ScenarioDto {
    fn from(value: Scenario) -> Self {
        Self {
            original_quantity: value.original_quantity,
            original_price: value.original_price,
            new_price: value.new_price,
            max_quantity: value.max_quantity,
            max_price: value.max_price,
        }
    }
}

impl TryFrom<ScenarioDto> for Scenario {
    type Error = ScenarioError;

    fn try_from(value: ScenarioDto) -> Result<Self, Self::Error> {
        let ScenarioDto {
            original_quantity,
            original_price,
            new_price,
            max_quantity,
            max_price,
        } = value;
        let all = [
            original_quantity,
            original_price,
            new_price,
            max_quantity,
            max_price,
        ];

        if all.iter().any(|x| x.is_nan()) {
            return Err(ScenarioError::NaN);
        }
        if all.iter().any(|x| x.is_infinite()) {
            return Err(ScenarioError::Infinity);
        }
        if original_quantity <= 0.0 {
            return Err(ScenarioError::NonPositiveQuantity);
        }
        if original_price <= 0.0 {
            return Err(ScenarioError::NonPositivePrice);
        }
        if max_quantity <= original_quantity {
            return Err(ScenarioError::QuantityBound);
        }
        if max_price <= 0.0 {
            return Err(ScenarioError::PriceBound);
        }

        Ok(Self {
            original_quantity,
            original_price,
            new_price,
            max_quantity,
            max_price,
        })
    }
}

/// Errors that can occur when creating or validating a Scenario
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    /// Error when any constant is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when any constant is infinite
    #[error("Scenario constants cannot be infinite")]
    Infinity,
    /// Error when the original quantity is zero or negative
    #[error("Original quantity must be strictly positive")]
    NonPositiveQuantity,
    /// Error when the original price is zero or negative
    #[error("Original price must be strictly positive")]
    NonPositivePrice,
    /// Error when the quantity axis does not extend past the original quantity
    #[error("Maximum quantity must exceed the original quantity")]
    QuantityBound,
    /// Error when the price axis is empty
    #[error("Maximum price must be strictly positive")]
    PriceBound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let default = Scenario::default();
        let rebuilt = Scenario::new(10.0, 50.0, 40.0, 40.0, 100.0).unwrap();
        assert_eq!(default, rebuilt);
    }

    #[test]
    fn test_price_rise_is_allowed() {
        assert!(Scenario::new(10.0, 50.0, 60.0, 40.0, 100.0).is_ok());
        assert!(Scenario::new(10.0, 50.0, 50.0, 40.0, 100.0).is_ok());
    }

    #[test]
    fn test_nans() {
        assert_eq!(
            Scenario::new(f64::NAN, 50.0, 40.0, 40.0, 100.0).unwrap_err(),
            ScenarioError::NaN
        );
        assert_eq!(
            Scenario::new(10.0, 50.0, f64::NAN, 40.0, 100.0).unwrap_err(),
            ScenarioError::NaN
        );
    }

    #[test]
    fn test_infinities() {
        assert_eq!(
            Scenario::new(10.0, f64::INFINITY, 40.0, 40.0, 100.0).unwrap_err(),
            ScenarioError::Infinity
        );
        assert_eq!(
            Scenario::new(10.0, 50.0, 40.0, 40.0, f64::INFINITY).unwrap_err(),
            ScenarioError::Infinity
        );
    }

    #[test]
    fn test_non_positive_pivot() {
        assert_eq!(
            Scenario::new(0.0, 50.0, 40.0, 40.0, 100.0).unwrap_err(),
            ScenarioError::NonPositiveQuantity
        );
        assert_eq!(
            Scenario::new(10.0, -1.0, 40.0, 40.0, 100.0).unwrap_err(),
            ScenarioError::NonPositivePrice
        );
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            Scenario::new(10.0, 50.0, 40.0, 10.0, 100.0).unwrap_err(),
            ScenarioError::QuantityBound
        );
        assert_eq!(
            Scenario::new(10.0, 50.0, 40.0, 40.0, 0.0).unwrap_err(),
            ScenarioError::PriceBound
        );
    }

    #[test]
    fn test_with_new_price() {
        let scenario = Scenario::default().with_new_price(45.0).unwrap();
        assert_eq!(scenario.new_price(), 45.0);
        assert_eq!(scenario.original_price(), 50.0);

        assert_eq!(
            Scenario::default().with_new_price(f64::NAN).unwrap_err(),
            ScenarioError::NaN
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let raw = r#"{
            "original_quantity": 10.0,
            "original_price": 50.0,
            "new_price": 40.0,
            "max_quantity": 5.0,
            "max_price": 100.0
        }"#;

        assert!(serde_json::from_str::<Scenario>(raw).is_err());
    }
}
